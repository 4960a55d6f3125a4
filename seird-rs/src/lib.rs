//! Discrete-time stochastic SEIRD epidemic model.
//!
//! A population of `N` individuals moves through five compartments
//! (susceptible, exposed, infected, recovered, dead) one day at a time.
//! Daily flows are expected counts rounded to whole individuals with
//! [`stochastic_round`], so every compartment stays integral while the
//! dynamics match the continuous-rate model in expectation. The total
//! population is conserved on every day.
//!
//! ```rust
//! use seird::{Parameters, SeirdModel};
//!
//! let parameters = Parameters::new(1000).with_beta(0.33).with_mortality(0.01);
//! let run = SeirdModel::simulate(&parameters, 42, Some(100_000))?;
//!
//! let last = run.output.last();
//! assert_eq!(last.exposed + last.infected, 0);
//! assert_eq!(last.total(), 1000);
//! # Ok::<(), seird::SeirdError>(())
//! ```

pub mod error;
pub mod model;
pub mod output;
pub mod parameters;
pub mod rounding;

pub use error::SeirdError;
pub use model::{RunStatus, SeirdModel, SeirdRun};
pub use output::{Compartment, DailyState, SeirdOutput};
pub use parameters::Parameters;
pub use rounding::stochastic_round;
