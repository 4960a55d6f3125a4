mod batch;
mod cli;
mod environment;
mod error;
mod input;
mod logging;
mod report;

use std::{io, process};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{debug, info};

use crate::batch::{BatchOptions, DEFAULT_MAX_DAYS, run_batch};
use crate::cli::Cli;
use crate::environment::{Environment, OutputTarget};
use crate::input::RunInput;
use crate::report::{
    CSV_HEADERS, MANIFEST_JSON, Manifest, OUTPUT_CSV, RunSummary, SUMMARY_JSON, csv_rows,
};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

/// Applies CLI flags over the request and settles the batch options.
///
/// Flags win over request fields; the day limit falls back to
/// [`DEFAULT_MAX_DAYS`] when neither sets it.
fn apply_overrides(cli: &Cli, env: &mut Environment<RunInput>) -> BatchOptions {
    if let Some(seed) = cli.seed {
        env.seed = seed;
    }
    if let Some(dir) = &cli.output_dir {
        env.output = OutputTarget::Directory(dir.clone());
    }
    BatchOptions {
        replicates: cli.replicates.unwrap_or(env.input.replicates),
        max_days: cli
            .max_days
            .or(env.input.max_days)
            .unwrap_or(DEFAULT_MAX_DAYS),
        fail_fast: cli.fail_fast,
    }
}

fn run(cli: Cli) -> Result<()> {
    let env = match &cli.config {
        Some(path) => Environment::from_toml_file(path)
            .with_context(|| format!("failed to load run request: {}", path.display()))?,
        None => Environment::from_reader(io::stdin().lock())
            .context("failed to load run request from stdin")?,
    };
    debug!(input = ?env.input_json(), "loaded run request");
    let mut env = env.with_input_type::<RunInput>()?;
    let options = apply_overrides(&cli, &mut env);

    let parameters = env.input.parameters;
    parameters.validate().context("invalid model parameters")?;
    info!(
        population = parameters.population,
        beta = parameters.beta,
        gamma = parameters.gamma,
        sigma = parameters.sigma,
        mortality = parameters.mortality,
        seed = env.seed,
        replicates = options.replicates,
        "starting run"
    );

    let batch = run_batch(&parameters, env.seed, env.replicate, &options)?;
    for r in &batch.runs {
        eprintln!(
            "Number dead: {} (replicate {}, {} days)",
            r.run.output.final_deaths(),
            r.replicate,
            r.run.status.days()
        );
    }

    let mut manifest = Manifest::default();
    if let Some(path) = env.write_csv(OUTPUT_CSV, &CSV_HEADERS, &csv_rows(&batch.runs))? {
        manifest.add_file(&path)?;
    }
    if env.output_dir().is_some() {
        let summary = RunSummary::new(parameters, options.max_days, &batch);
        if let Some(path) = env.write(SUMMARY_JSON, &serde_json::to_vec_pretty(&summary)?)? {
            manifest.add_file(&path)?;
        }
        env.write(MANIFEST_JSON, &serde_json::to_vec_pretty(&manifest)?)?;
    }

    if batch.runs.is_empty() && !batch.failures.is_empty() {
        bail!("all {} replicates failed", batch.failures.len());
    }
    Ok(())
}
