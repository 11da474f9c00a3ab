#![deny(missing_docs)]
#![doc = "Data model and error types for the SoA/AoS benchmark harness."]

pub mod errors;
mod types;

pub use errors::{DodError, ErrorInfo};
pub use types::{BuildMode, RunConfiguration, RunResult, Timings};
