use serde::{Deserialize, Serialize};

use crate::error::SeirdError;

/// Fixed inputs of a single SEIRD run.
///
/// Rates are per day. `mortality` is the fraction of individuals leaving the
/// infected compartment who die rather than recover.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub population: u64,
    #[serde(default = "default_beta")]
    pub beta: f64,
    #[serde(default = "default_gamma")]
    pub gamma: f64,
    #[serde(default = "default_sigma")]
    pub sigma: f64,
    #[serde(default = "default_mortality")]
    pub mortality: f64,
}

fn default_beta() -> f64 {
    0.33
}
fn default_gamma() -> f64 {
    0.2
}
fn default_sigma() -> f64 {
    0.11
}
fn default_mortality() -> f64 {
    0.01
}

impl Parameters {
    /// Parameters for `population` individuals with the default rates.
    pub fn new(population: u64) -> Parameters {
        Parameters {
            population,
            beta: default_beta(),
            gamma: default_gamma(),
            sigma: default_sigma(),
            mortality: default_mortality(),
        }
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    pub fn with_mortality(mut self, mortality: f64) -> Self {
        self.mortality = mortality;
        self
    }

    /// Checks that the parameters describe a runnable model.
    ///
    /// # Errors
    ///
    /// - [`SeirdError::InvalidPopulation`] if `population` is zero.
    /// - [`SeirdError::InvalidRate`] if a rate is negative or non-finite.
    /// - [`SeirdError::InvalidMortality`] if `mortality` is outside [0, 1].
    pub fn validate(&self) -> Result<(), SeirdError> {
        if self.population < 1 {
            return Err(SeirdError::InvalidPopulation {
                population: self.population,
            });
        }
        for (name, value) in [
            ("beta", self.beta),
            ("gamma", self.gamma),
            ("sigma", self.sigma),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SeirdError::InvalidRate { name, value });
            }
        }
        if !(0.0..=1.0).contains(&self.mortality) {
            return Err(SeirdError::InvalidMortality {
                value: self.mortality,
            });
        }
        Ok(())
    }
}
