use std::fmt;

use serde::Serialize;

/// One of the five mutually exclusive health states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Compartment {
    Susceptible,
    Exposed,
    Infected,
    Recovered,
    Dead,
}

impl Compartment {
    pub const ALL: [Compartment; 5] = [
        Compartment::Susceptible,
        Compartment::Exposed,
        Compartment::Infected,
        Compartment::Recovered,
        Compartment::Dead,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Compartment::Susceptible => "susceptible",
            Compartment::Exposed => "exposed",
            Compartment::Infected => "infected",
            Compartment::Recovered => "recovered",
            Compartment::Dead => "dead",
        }
    }
}

impl fmt::Display for Compartment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compartment counts on a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyState {
    pub susceptible: u64,
    pub exposed: u64,
    pub infected: u64,
    pub recovered: u64,
    pub dead: u64,
}

impl DailyState {
    pub fn get(&self, compartment: Compartment) -> u64 {
        match compartment {
            Compartment::Susceptible => self.susceptible,
            Compartment::Exposed => self.exposed,
            Compartment::Infected => self.infected,
            Compartment::Recovered => self.recovered,
            Compartment::Dead => self.dead,
        }
    }

    pub fn total(&self) -> u64 {
        self.susceptible + self.exposed + self.infected + self.recovered + self.dead
    }

    /// Individuals still progressing through the disease (E + I).
    pub fn active(&self) -> u64 {
        self.exposed + self.infected
    }
}

/// Full run history: one entry per compartment per simulated day, day 0 first.
///
/// All five sequences always have the same, non-zero length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeirdOutput {
    susceptible: Vec<u64>,
    exposed: Vec<u64>,
    infected: Vec<u64>,
    recovered: Vec<u64>,
    dead: Vec<u64>,
}

impl SeirdOutput {
    /// Day-0 history: a single infected individual, everyone else susceptible.
    pub(crate) fn initial(population: u64) -> SeirdOutput {
        SeirdOutput {
            susceptible: vec![population - 1],
            exposed: vec![0],
            infected: vec![1],
            recovered: vec![0],
            dead: vec![0],
        }
    }

    pub(crate) fn push(&mut self, state: DailyState) {
        self.susceptible.push(state.susceptible);
        self.exposed.push(state.exposed);
        self.infected.push(state.infected);
        self.recovered.push(state.recovered);
        self.dead.push(state.dead);
    }

    pub fn len(&self) -> usize {
        self.susceptible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.susceptible.is_empty()
    }

    pub fn susceptible(&self) -> &[u64] {
        &self.susceptible
    }

    pub fn exposed(&self) -> &[u64] {
        &self.exposed
    }

    pub fn infected(&self) -> &[u64] {
        &self.infected
    }

    pub fn recovered(&self) -> &[u64] {
        &self.recovered
    }

    pub fn dead(&self) -> &[u64] {
        &self.dead
    }

    pub fn series(&self, compartment: Compartment) -> &[u64] {
        match compartment {
            Compartment::Susceptible => &self.susceptible,
            Compartment::Exposed => &self.exposed,
            Compartment::Infected => &self.infected,
            Compartment::Recovered => &self.recovered,
            Compartment::Dead => &self.dead,
        }
    }

    pub fn day(&self, day: usize) -> Option<DailyState> {
        (day < self.len()).then(|| self.state_at(day))
    }

    pub fn last(&self) -> DailyState {
        self.state_at(self.len() - 1)
    }

    pub fn final_deaths(&self) -> u64 {
        self.last().dead
    }

    /// Day and size of the largest infected count. Ties resolve to the earliest day.
    pub fn peak_infected(&self) -> (usize, u64) {
        let mut peak = (0, self.infected[0]);
        for (day, &count) in self.infected.iter().enumerate().skip(1) {
            if count > peak.1 {
                peak = (day, count);
            }
        }
        peak
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, DailyState)> + '_ {
        (0..self.len()).map(move |day| (day, self.state_at(day)))
    }

    fn state_at(&self, day: usize) -> DailyState {
        DailyState {
            susceptible: self.susceptible[day],
            exposed: self.exposed[day],
            infected: self.infected[day],
            recovered: self.recovered[day],
            dead: self.dead[day],
        }
    }
}
