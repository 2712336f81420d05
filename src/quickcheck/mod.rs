//! Property-based testing on top of the dispatch engine.
//!
//! Generation (`arbitrary`) and shrinking (`shrink`) are ordinary dispatched
//! operations, so a new data type becomes testable by registering both for
//! its values and shapes. [`for_all`] drives the trials:
//!
//! ```
//! use lambdata::Shape;
//!
//! let env = lambdata::standard().unwrap().with_seed(1);
//! let report = env
//!     .for_all(|_, args| Ok(args[0].as_int().unwrap_or(0) < 10), &[Shape::Number])
//!     .unwrap()
//!     .expect("some generated number is at least 10");
//! assert!(report.inputs[0].as_int().unwrap() >= 10);
//! ```

pub mod arbitrary;
pub mod config;
pub mod runner;
pub mod shrink;

#[cfg(test)]
mod tests;

pub use arbitrary::arbitrary;
pub use config::CheckConfig;
pub use runner::{find_smallest, for_all, generate, goal, FailureReport, DEFAULT_GOAL};
pub use shrink::shrink;
