//! Run-level properties that must hold for every seed.

use rand::SeedableRng;
use rand::rngs::StdRng;
use seird::{Compartment, Parameters, RunStatus, SeirdError, SeirdModel};

const MAX_DAYS: usize = 100_000;

fn reference_parameters() -> Parameters {
    Parameters::new(1000)
        .with_beta(0.33)
        .with_gamma(0.2)
        .with_sigma(0.11)
        .with_mortality(0.01)
}

#[test]
fn population_is_conserved_every_day() {
    let parameter_sets = [
        reference_parameters(),
        Parameters::new(50).with_beta(0.9).with_mortality(0.5),
        Parameters::new(10_000).with_beta(0.5).with_gamma(0.5).with_sigma(0.3),
        Parameters::new(3).with_mortality(1.0),
    ];
    for parameters in parameter_sets {
        for seed in 0..20 {
            let run = SeirdModel::simulate(&parameters, seed, Some(MAX_DAYS)).unwrap();
            for (day, state) in run.output.iter() {
                assert_eq!(
                    state.total(),
                    parameters.population,
                    "seed {seed}, day {day}"
                );
            }
        }
    }
}

#[test]
fn sequences_have_equal_length() {
    let run = SeirdModel::simulate(&reference_parameters(), 5, Some(MAX_DAYS)).unwrap();
    let len = run.output.len();
    for compartment in Compartment::ALL {
        assert_eq!(run.output.series(compartment).len(), len);
    }
    assert_eq!(len, run.status.days() + 1);
}

#[test]
fn reference_run_terminates() {
    for seed in 0..50 {
        let run = SeirdModel::simulate(&reference_parameters(), seed, Some(MAX_DAYS)).unwrap();
        assert!(run.status.is_converged(), "seed {seed}: {:?}", run.status);
        let last = run.output.last();
        assert_eq!(last.exposed, 0);
        assert_eq!(last.infected, 0);
        assert!(last.dead <= 1000);
    }
}

#[test]
fn deaths_never_decrease() {
    let parameters = reference_parameters().with_mortality(0.2);
    for seed in 0..20 {
        let run = SeirdModel::simulate(&parameters, seed, Some(MAX_DAYS)).unwrap();
        assert!(run.output.dead().windows(2).all(|w| w[0] <= w[1]));
        assert!(run.output.susceptible().windows(2).all(|w| w[0] >= w[1]));
    }
}

#[test]
fn single_individual_population() {
    let parameters = Parameters::new(1).with_sigma(0.5);
    for seed in 0..20 {
        let run = SeirdModel::simulate(&parameters, seed, Some(MAX_DAYS)).unwrap();
        assert!(run.status.is_converged());
        assert!(run.output.susceptible().iter().all(|&s| s == 0));
        assert!(run.output.exposed().iter().all(|&e| e == 0));
        let last = run.output.last();
        assert_eq!(last.recovered + last.dead, 1);
    }
}

#[test]
fn stalled_epidemic_hits_day_limit() {
    let parameters = reference_parameters().with_gamma(0.0).with_sigma(0.0);
    let run = SeirdModel::simulate(&parameters, 1, Some(365)).unwrap();
    assert_eq!(run.status, RunStatus::DayLimitReached { days: 365 });
    assert_eq!(run.output.len(), 366);
    assert!(run.output.last().active() > 0);
}

#[test]
fn same_seed_same_history() {
    let parameters = reference_parameters();
    let a = SeirdModel::simulate(&parameters, 2024, Some(MAX_DAYS)).unwrap();
    let b = SeirdModel::simulate(&parameters, 2024, Some(MAX_DAYS)).unwrap();
    assert_eq!(a.output, b.output);
}

#[test]
fn injected_generator_drives_the_model() {
    let parameters = reference_parameters();
    let mut rng = StdRng::seed_from_u64(77);
    let mut model = SeirdModel::new(parameters).unwrap();
    let status = model.run_to_completion(&mut rng, Some(MAX_DAYS)).unwrap();

    let run = SeirdModel::simulate(&parameters, 77, Some(MAX_DAYS)).unwrap();
    assert_eq!(status, run.status);
    assert_eq!(model.output(), &run.output);
}

#[test]
fn oversized_rates_surface_as_errors() {
    let parameters = Parameters::new(1000)
        .with_beta(2.0)
        .with_gamma(5.0)
        .with_sigma(0.0)
        .with_mortality(0.0);
    let result = SeirdModel::simulate(&parameters, 0, Some(MAX_DAYS));
    assert!(matches!(
        result,
        Err(SeirdError::NegativeCompartment {
            compartment: Compartment::Exposed,
            ..
        })
    ));
}

#[test]
fn invalid_parameters_rejected_before_running() {
    let result = SeirdModel::simulate(&Parameters::new(0), 0, Some(10));
    assert!(matches!(result, Err(SeirdError::InvalidPopulation { .. })));
}
