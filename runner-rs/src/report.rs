use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use seird::{Parameters, RunStatus};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::batch::{BatchResult, ReplicateRun};

pub const OUTPUT_CSV: &str = "seird_output.csv";
pub const SUMMARY_JSON: &str = "seird_summary.json";
pub const MANIFEST_JSON: &str = "manifest.json";

pub const CSV_HEADERS: [&str; 7] = [
    "replicate",
    "day",
    "susceptible",
    "exposed",
    "infected",
    "recovered",
    "dead",
];

/// One row per replicate per day, in the order of [`CSV_HEADERS`].
pub fn csv_rows(runs: &[ReplicateRun]) -> Vec<Vec<String>> {
    runs.iter()
        .flat_map(|r| {
            r.run.output.iter().map(move |(day, state)| {
                vec![
                    r.replicate.to_string(),
                    day.to_string(),
                    state.susceptible.to_string(),
                    state.exposed.to_string(),
                    state.infected.to_string(),
                    state.recovered.to_string(),
                    state.dead.to_string(),
                ]
            })
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct ReplicateSummary {
    pub replicate: u64,
    pub seed: u64,
    #[serde(flatten)]
    pub status: RunStatus,
    pub final_susceptible: u64,
    pub final_recovered: u64,
    pub final_deaths: u64,
    pub peak_infected: u64,
    pub peak_day: usize,
    /// Share of the population that left the susceptible compartment.
    pub attack_rate: f64,
}

impl ReplicateSummary {
    pub fn new(replicate: &ReplicateRun) -> ReplicateSummary {
        let run = &replicate.run;
        let last = run.output.last();
        let (peak_day, peak_infected) = run.output.peak_infected();
        let population = run.parameters.population;
        ReplicateSummary {
            replicate: replicate.replicate,
            seed: run.seed,
            status: run.status,
            final_susceptible: last.susceptible,
            final_recovered: last.recovered,
            final_deaths: last.dead,
            peak_infected,
            peak_day,
            attack_rate: (population - last.susceptible) as f64 / population as f64,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FailureSummary {
    pub replicate: u64,
    pub seed: u64,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub parameters: Parameters,
    pub max_days: usize,
    pub replicates: Vec<ReplicateSummary>,
    pub failures: Vec<FailureSummary>,
}

impl RunSummary {
    pub fn new(parameters: Parameters, max_days: usize, batch: &BatchResult) -> RunSummary {
        RunSummary {
            parameters,
            max_days,
            replicates: batch.runs.iter().map(ReplicateSummary::new).collect(),
            failures: batch
                .failures
                .iter()
                .map(|f| FailureSummary {
                    replicate: f.replicate,
                    seed: f.seed,
                    error: f.error.to_string(),
                })
                .collect(),
        }
    }
}

/// SHA-256 digests of the files a run wrote, keyed by file name.
#[derive(Debug, Default, Serialize)]
pub struct Manifest {
    pub files: BTreeMap<String, String>,
}

impl Manifest {
    pub fn add_file(&mut self, path: &Path) -> io::Result<()> {
        let digest = Sha256::digest(fs::read(path)?);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.files.insert(name, hex::encode(digest));
        Ok(())
    }
}
