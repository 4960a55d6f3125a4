//! Error types for the runner.

use seird::SeirdError;

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("no run request on stdin")]
    EmptyRequest,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid run input: {0}")]
    Input(#[source] serde_json::Error),

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("replicate numbers overflow: {count} replicates starting at {first}")]
    ReplicateOverflow { first: u64, count: u64 },

    #[error("replicate {replicate} (seed {seed}) failed")]
    Replicate {
        replicate: u64,
        seed: u64,
        #[source]
        source: SeirdError,
    },
}
