//! Error types for the seird crate.

use crate::output::Compartment;

/// Error type for all fallible operations in the seird crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeirdError {
    /// Returned when a model is constructed with no individuals.
    #[error("invalid population: {population} (must be at least 1)")]
    InvalidPopulation {
        /// The rejected population size.
        population: u64,
    },

    /// Returned when a transition rate is negative or non-finite.
    #[error("invalid {name}: {value} (must be finite and >= 0)")]
    InvalidRate {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Returned when the mortality fraction lies outside [0, 1].
    #[error("invalid mortality: {value} (must be in [0, 1])")]
    InvalidMortality {
        /// The rejected value.
        value: f64,
    },

    /// Returned when an expected flow overflows to a non-finite value.
    #[error("{flow} flow on day {day} is not finite: {rate}")]
    NonFiniteFlow {
        /// Day index being computed.
        day: usize,
        /// Name of the flow.
        flow: &'static str,
        /// The computed expected count.
        rate: f64,
    },

    /// Returned when a day's compartments no longer sum to the population.
    #[error("population not conserved on day {day}: compartments sum to {total}, expected {population}")]
    ConservationViolation {
        /// Day index that failed the check.
        day: usize,
        /// Sum over all compartments.
        total: i128,
        /// Model population.
        population: u64,
    },

    /// Returned when a residual flow would drive a compartment below zero.
    #[error("{compartment} would become negative on day {day}: {value}")]
    NegativeCompartment {
        /// Day index that failed the check.
        day: usize,
        /// The offending compartment.
        compartment: Compartment,
        /// The negative count.
        value: i128,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_population() {
        let e = SeirdError::InvalidPopulation { population: 0 };
        assert_eq!(e.to_string(), "invalid population: 0 (must be at least 1)");
    }

    #[test]
    fn error_invalid_rate() {
        let e = SeirdError::InvalidRate {
            name: "gamma",
            value: -0.5,
        };
        assert_eq!(e.to_string(), "invalid gamma: -0.5 (must be finite and >= 0)");
    }

    #[test]
    fn error_invalid_mortality() {
        let e = SeirdError::InvalidMortality { value: 1.5 };
        assert_eq!(e.to_string(), "invalid mortality: 1.5 (must be in [0, 1])");
    }

    #[test]
    fn error_non_finite_flow() {
        let e = SeirdError::NonFiniteFlow {
            day: 1,
            flow: "infection",
            rate: f64::INFINITY,
        };
        assert_eq!(e.to_string(), "infection flow on day 1 is not finite: inf");
    }

    #[test]
    fn error_conservation_violation() {
        let e = SeirdError::ConservationViolation {
            day: 12,
            total: 999,
            population: 1000,
        };
        assert_eq!(
            e.to_string(),
            "population not conserved on day 12: compartments sum to 999, expected 1000"
        );
    }

    #[test]
    fn error_negative_compartment() {
        let e = SeirdError::NegativeCompartment {
            day: 3,
            compartment: Compartment::Exposed,
            value: -2,
        };
        assert_eq!(e.to_string(), "exposed would become negative on day 3: -2");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<SeirdError>();
    }
}
