use std::path::PathBuf;

use clap::Parser;

/// Runs the stochastic SEIRD model.
///
/// The run request is read as JSON from stdin unless `--config` names a TOML
/// file. Flags override the matching request fields.
#[derive(Debug, Parser)]
#[command(name = "seird-run", version, about = "Stochastic SEIRD epidemic simulator")]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace, -vvvv per-day model state).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to a TOML run request.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the base RNG seed.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Number of replicates; replicate k uses seed + k.
    #[arg(short = 'n', long)]
    pub replicates: Option<u64>,

    /// Stop a replicate after this many days.
    #[arg(long)]
    pub max_days: Option<usize>,

    /// Write outputs into this directory instead of stdout.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Abort the batch on the first failing replicate.
    #[arg(long)]
    pub fail_fast: bool,
}
