use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::RunnerError;

/// Where run outputs go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    Directory(PathBuf),
}

impl OutputTarget {
    /// Resolves the `output` section of a run request.
    ///
    /// A flat `{"spec": "filesystem", "dir": ...}` or a profile map whose
    /// `default` (else first) entry has that shape selects a directory.
    /// Anything else means stdout.
    fn from_json(output: &Value) -> OutputTarget {
        let selected = match output.get("profile").and_then(|v| v.as_object()) {
            Some(profiles) => profiles
                .get("default")
                .or_else(|| profiles.values().next()),
            None => Some(output),
        };
        selected
            .filter(|o| o.get("spec").and_then(|v| v.as_str()) == Some("filesystem"))
            .and_then(|o| o.get("dir"))
            .and_then(|v| v.as_str())
            .map(|dir| OutputTarget::Directory(PathBuf::from(dir)))
            .unwrap_or(OutputTarget::Stdout)
    }
}

/// A parsed run request: typed model input plus the run-level fields.
pub struct Environment<I = ()> {
    input_json: serde_json::Map<String, Value>,
    pub input: I,
    pub seed: u64,
    pub replicate: u64,
    pub output: OutputTarget,
}

impl Environment {
    pub fn from_json(data: Value) -> Self {
        let mut input_json = data
            .get("input")
            .and_then(|v| v.as_object())
            .cloned()
            .unwrap_or_default();

        let seed = input_json
            .remove("seed")
            .and_then(|v| v.as_u64())
            .unwrap_or(0);

        let replicate = input_json
            .remove("replicate")
            .and_then(|v| v.as_u64())
            .unwrap_or(0);

        let output = data
            .get("output")
            .map(OutputTarget::from_json)
            .unwrap_or(OutputTarget::Stdout);

        Self {
            input_json,
            input: (),
            seed,
            replicate,
            output,
        }
    }

    /// Reads a JSON run request, typically from stdin.
    pub fn from_reader(mut reader: impl Read) -> Result<Self, RunnerError> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;
        if raw.trim().is_empty() {
            return Err(RunnerError::EmptyRequest);
        }
        let data: Value = serde_json::from_str(&raw)?;
        Ok(Self::from_json(data))
    }

    /// Parses a TOML run request with `[input]` and `[output]` tables.
    pub fn from_toml_str(raw: &str) -> Result<Self, RunnerError> {
        let value: toml::Value = toml::from_str(raw)?;
        Ok(Self::from_json(serde_json::to_value(value)?))
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, RunnerError> {
        let raw = fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn with_input_type<I: DeserializeOwned>(self) -> Result<Environment<I>, RunnerError> {
        let input_value = Value::Object(self.input_json.clone());
        let input = serde_json::from_value(input_value).map_err(RunnerError::Input)?;
        Ok(Environment {
            input_json: self.input_json,
            input,
            seed: self.seed,
            replicate: self.replicate,
            output: self.output,
        })
    }
}

impl<I> Environment<I> {
    pub fn input_json(&self) -> &serde_json::Map<String, Value> {
        &self.input_json
    }

    pub fn output_dir(&self) -> Option<&Path> {
        match &self.output {
            OutputTarget::Directory(dir) => Some(dir),
            OutputTarget::Stdout => None,
        }
    }

    /// Writes `data` to `filename` in the output directory, or to stdout.
    ///
    /// Returns the path written, if any.
    pub fn write(&self, filename: &str, data: &[u8]) -> Result<Option<PathBuf>, RunnerError> {
        match self.output_file(filename)? {
            Some(path) => {
                fs::write(&path, data)?;
                Ok(Some(path))
            }
            None => {
                io::stdout().write_all(data)?;
                Ok(None)
            }
        }
    }

    pub fn write_csv(
        &self,
        filename: &str,
        headers: &[&str],
        rows: &[Vec<String>],
    ) -> Result<Option<PathBuf>, RunnerError> {
        match self.output_file(filename)? {
            Some(path) => {
                write_records(fs::File::create(&path)?, headers, rows)?;
                Ok(Some(path))
            }
            None => {
                write_records(io::stdout().lock(), headers, rows)?;
                Ok(None)
            }
        }
    }

    fn output_file(&self, filename: &str) -> Result<Option<PathBuf>, RunnerError> {
        let Some(dir) = self.output_dir() else {
            return Ok(None);
        };
        fs::create_dir_all(dir)?;
        let path = dir.join(filename);
        debug!(path = %path.display(), "writing output");
        Ok(Some(path))
    }
}

fn write_records<W: Write>(
    writer: W,
    headers: &[&str],
    rows: &[Vec<String>],
) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(headers)?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}
