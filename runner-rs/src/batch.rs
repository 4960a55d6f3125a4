use seird::{Parameters, SeirdError, SeirdModel, SeirdRun};
use tracing::{info, warn};

use crate::error::RunnerError;

/// Day limit applied when neither the request nor the CLI sets one.
pub const DEFAULT_MAX_DAYS: usize = 100_000;

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub replicates: u64,
    pub max_days: usize,
    pub fail_fast: bool,
}

#[derive(Debug)]
pub struct ReplicateRun {
    pub replicate: u64,
    pub run: SeirdRun,
}

#[derive(Debug)]
pub struct ReplicateFailure {
    pub replicate: u64,
    pub seed: u64,
    pub error: SeirdError,
}

#[derive(Debug, Default)]
pub struct BatchResult {
    pub runs: Vec<ReplicateRun>,
    pub failures: Vec<ReplicateFailure>,
}

/// Runs independent replicates of one parameter set.
///
/// Replicate `k` is numbered `first_replicate + k` and seeded with
/// `base_seed + k` (wrapping). The replicate numbers must fit in `u64`.
/// A failing replicate is recorded and skipped unless `fail_fast` is set,
/// in which case it ends the batch.
pub fn run_batch(
    parameters: &Parameters,
    base_seed: u64,
    first_replicate: u64,
    options: &BatchOptions,
) -> Result<BatchResult, RunnerError> {
    if options.replicates > 0 && first_replicate.checked_add(options.replicates - 1).is_none() {
        return Err(RunnerError::ReplicateOverflow {
            first: first_replicate,
            count: options.replicates,
        });
    }
    let mut result = BatchResult::default();
    for k in 0..options.replicates {
        let replicate = first_replicate + k;
        let seed = base_seed.wrapping_add(k);
        match SeirdModel::simulate(parameters, seed, Some(options.max_days)) {
            Ok(run) => {
                if !run.status.is_converged() {
                    warn!(replicate, seed, days = run.status.days(), "replicate hit the day limit");
                }
                info!(
                    replicate,
                    seed,
                    days = run.status.days(),
                    dead = run.output.final_deaths(),
                    "replicate finished"
                );
                result.runs.push(ReplicateRun { replicate, run });
            }
            Err(source) if options.fail_fast => {
                return Err(RunnerError::Replicate {
                    replicate,
                    seed,
                    source,
                });
            }
            Err(error) => {
                warn!(replicate, seed, %error, "replicate failed");
                result.failures.push(ReplicateFailure {
                    replicate,
                    seed,
                    error,
                });
            }
        }
    }
    Ok(result)
}
