//! Build, run, sweep and report orchestration for the SoA/AoS benchmark.

mod builder;
mod config;
mod launch;
mod report;
mod runner;
mod summary;
mod sweep;

pub use builder::{Builder, Executable};
pub use config::{CompilerFlavor, HarnessConfig};
pub use launch::{Invocation, Launcher, ProcessOutput, SystemLauncher};
pub use report::{clamp_timings, ReportRow, ResultTable, COLUMNS};
pub use runner::{parse_timings, Runner};
pub use summary::{summarize, GroupSummary, TableSummary};
pub use sweep::{expt, sweep, ExptError, SweepPlan};
