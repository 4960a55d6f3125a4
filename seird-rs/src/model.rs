use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;
use tracing::{debug, trace};

use crate::{
    error::SeirdError,
    output::{Compartment, DailyState, SeirdOutput},
    parameters::Parameters,
    rounding::stochastic_round,
};

/// How a call to [`SeirdModel::run_to_completion`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunStatus {
    /// No exposed or infected individuals remain.
    Converged { days: usize },
    /// The day limit was hit with the epidemic still active.
    DayLimitReached { days: usize },
}

impl RunStatus {
    pub fn days(&self) -> usize {
        match self {
            RunStatus::Converged { days } | RunStatus::DayLimitReached { days } => *days,
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, RunStatus::Converged { .. })
    }
}

/// A finished run, as returned by [`SeirdModel::simulate`].
#[derive(Debug, Clone)]
pub struct SeirdRun {
    pub parameters: Parameters,
    pub seed: u64,
    pub status: RunStatus,
    pub output: SeirdOutput,
}

pub struct SeirdModel {
    parameters: Parameters,
    output: SeirdOutput,
}

impl SeirdModel {
    /// Builds a model at day 0 with a single infected individual.
    ///
    /// # Errors
    ///
    /// Any error from [`Parameters::validate`].
    pub fn new(parameters: Parameters) -> Result<SeirdModel, SeirdError> {
        parameters.validate()?;
        Ok(SeirdModel {
            parameters,
            output: SeirdOutput::initial(parameters.population),
        })
    }

    /// Seeds a generator, runs a fresh model to completion and returns its history.
    pub fn simulate(
        parameters: &Parameters,
        seed: u64,
        max_days: Option<usize>,
    ) -> Result<SeirdRun, SeirdError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut model = SeirdModel::new(*parameters)?;
        let status = model.run_to_completion(&mut rng, max_days)?;
        debug!(
            seed,
            days = status.days(),
            converged = status.is_converged(),
            dead = model.current().dead,
            "simulation finished"
        );
        Ok(SeirdRun {
            parameters: *parameters,
            seed,
            status,
            output: model.into_output(),
        })
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn output(&self) -> &SeirdOutput {
        &self.output
    }

    pub fn into_output(self) -> SeirdOutput {
        self.output
    }

    /// Index of the most recent day.
    pub fn day(&self) -> usize {
        self.output.len() - 1
    }

    pub fn current(&self) -> DailyState {
        self.output.last()
    }

    /// True once nobody is exposed or infected.
    pub fn is_complete(&self) -> bool {
        self.current().active() == 0
    }

    /// Simulates one day and appends it to the history.
    ///
    /// Only the susceptible to exposed, exposed to infected and infected to
    /// removed flows are rounded independently. The exposed, infected and
    /// removed changes are residuals of those flows, and deaths are a
    /// rounded share of the removals.
    ///
    /// # Errors
    ///
    /// - [`SeirdError::NonFiniteFlow`] if an expected flow overflows `f64`.
    /// - [`SeirdError::ConservationViolation`] if the new day does not sum to
    ///   the population.
    /// - [`SeirdError::NegativeCompartment`] if a flow drains its source
    ///   compartment below zero, which can happen when a rate exceeds one.
    ///
    /// On error nothing is appended.
    pub fn advance_day(&mut self, rng: &mut impl Rng) -> Result<(), SeirdError> {
        let p = &self.parameters;
        let prev = self.output.last();
        let day = self.output.len();
        let (s, e, i) = (
            prev.susceptible as f64,
            prev.exposed as f64,
            prev.infected as f64,
        );

        let new_infections = round_flow(
            day,
            "infection",
            p.beta * i * s / p.population as f64,
            rng,
        )?;
        let new_symptomatic = round_flow(day, "symptom onset", p.gamma * e, rng)?;
        let new_removals = round_flow(day, "removal", p.sigma * i, rng)?;
        let new_deaths = round_flow(day, "death", p.mortality * new_removals as f64, rng)?;

        // Flows are at most u64::MAX each, so i128 arithmetic is exact.
        let ds = -new_infections;
        let de = new_infections - new_symptomatic;
        let di = new_symptomatic - new_removals;
        let dr = new_removals - new_deaths;
        let dd = new_deaths;

        let next = [
            i128::from(prev.susceptible) + ds,
            i128::from(prev.exposed) + de,
            i128::from(prev.infected) + di,
            i128::from(prev.recovered) + dr,
            i128::from(prev.dead) + dd,
        ];

        let total: i128 = next.iter().sum();
        if total != i128::from(p.population) {
            return Err(SeirdError::ConservationViolation {
                day,
                total,
                population: p.population,
            });
        }
        if let Some((compartment, &value)) = Compartment::ALL
            .iter()
            .zip(next.iter())
            .find(|(_, value)| **value < 0)
        {
            return Err(SeirdError::NegativeCompartment {
                day,
                compartment: *compartment,
                value,
            });
        }

        // Non-negative and summing to the population, so each fits in u64.
        let [susceptible, exposed, infected, recovered, dead] = next.map(|v| v as u64);
        trace!(
            day,
            susceptible, exposed, infected, recovered, dead, "advanced day"
        );
        self.output.push(DailyState {
            susceptible,
            exposed,
            infected,
            recovered,
            dead,
        });
        Ok(())
    }

    /// Advances until nobody is exposed or infected.
    ///
    /// With `max_days` set, stops once the history reaches that day index
    /// and reports [`RunStatus::DayLimitReached`]. With `None` the loop is
    /// unbounded, and never ends if `gamma` or `sigma` is zero while the
    /// corresponding compartment is occupied.
    pub fn run_to_completion(
        &mut self,
        rng: &mut impl Rng,
        max_days: Option<usize>,
    ) -> Result<RunStatus, SeirdError> {
        while !self.is_complete() {
            if max_days.is_some_and(|limit| self.day() >= limit) {
                return Ok(RunStatus::DayLimitReached { days: self.day() });
            }
            self.advance_day(rng)?;
        }
        Ok(RunStatus::Converged { days: self.day() })
    }
}

/// Rounds one expected flow, rejecting rates that overflowed to infinity.
fn round_flow(
    day: usize,
    flow: &'static str,
    rate: f64,
    rng: &mut impl Rng,
) -> Result<i128, SeirdError> {
    if !rate.is_finite() {
        return Err(SeirdError::NonFiniteFlow { day, flow, rate });
    }
    Ok(i128::from(stochastic_round(rate, rng)))
}
