use std::fs;
use std::path::Path;

use dod_core::errors::{DodError, ErrorInfo};
use dod_core::{BuildMode, RunConfiguration, RunResult};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::builder::{Builder, Executable};
use crate::config::HarnessConfig;
use crate::launch::Launcher;
use crate::report::ResultTable;
use crate::runner::Runner;

/// Point and component counts to sweep, in iteration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepPlan {
    #[serde(default)]
    pub points: Vec<u64>,
    #[serde(default)]
    pub components: Vec<u64>,
}

impl SweepPlan {
    pub fn new(points: impl Into<Vec<u64>>, components: impl Into<Vec<u64>>) -> Self {
        Self {
            points: points.into(),
            components: components.into(),
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, DodError> {
        serde_yaml::from_str(text).map_err(|err| {
            DodError::Config(
                ErrorInfo::new("plan-parse", "invalid sweep plan").with_hint(err.to_string()),
            )
        })
    }

    pub fn load(path: &Path) -> Result<Self, DodError> {
        let text = fs::read_to_string(path).map_err(|err| {
            DodError::Config(
                ErrorInfo::new("plan-read", "failed to read sweep plan")
                    .with_context("path", path.display().to_string())
                    .with_hint(err.to_string()),
            )
        })?;
        Self::from_yaml_str(&text)
    }

    /// Rejects empty lists and zero counts.
    pub fn validate(&self) -> Result<(), DodError> {
        for (name, values) in [("points", &self.points), ("components", &self.components)] {
            if values.is_empty() {
                return Err(DodError::Config(
                    ErrorInfo::new("plan-empty", format!("sweep plan has no {name}"))
                        .with_context("field", name),
                ));
            }
            if let Some(idx) = values.iter().position(|&value| value == 0) {
                return Err(DodError::Config(
                    ErrorInfo::new("plan-zero", format!("{name} must be positive"))
                        .with_context("field", name)
                        .with_context("index", idx.to_string()),
                ));
            }
        }
        Ok(())
    }

    /// Every trial in execution order: the dynamic phase (components outer,
    /// points inner) followed by the static phase in the same order.
    pub fn configurations(&self) -> Vec<RunConfiguration> {
        let mut configs = Vec::with_capacity(self.expected_runs());
        for is_static in [false, true] {
            for &c in &self.components {
                for &n in &self.points {
                    configs.push(RunConfiguration::new(n, c, is_static));
                }
            }
        }
        configs
    }

    pub fn expected_runs(&self) -> usize {
        2 * self.points.len() * self.components.len()
    }

    /// One dynamic compile plus one per run of equal consecutive component
    /// counts in the static phase.
    pub fn expected_compiles(&self) -> usize {
        let changes = self
            .components
            .windows(2)
            .filter(|pair| pair[0] != pair[1])
            .count();
        1 + usize::from(!self.components.is_empty()) + changes
    }
}

/// Failed experiment together with whatever table could be assembled.
///
/// For failures during the sweep `partial` holds the finalized rows collected
/// before the failure; for persistence failures it holds the full table.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct ExptError {
    #[source]
    pub error: DodError,
    pub partial: ResultTable,
}

/// Runs the full sweep, finalizes the table and writes it to `config.output`.
pub fn expt(
    launcher: &mut dyn Launcher,
    config: &HarnessConfig,
    points: &[u64],
    components: &[u64],
) -> Result<ResultTable, ExptError> {
    let plan = SweepPlan::new(points, components);
    let mut results = Vec::with_capacity(plan.expected_runs());
    if let Err(error) = sweep(launcher, config, &plan, &mut results) {
        return Err(ExptError {
            error,
            partial: ResultTable::finalize(&results),
        });
    }
    let table = ResultTable::finalize(&results);
    match table.persist(&config.output) {
        Ok(()) => Ok(table),
        Err(error) => Err(ExptError {
            error,
            partial: table,
        }),
    }
}

/// Executes every trial of `plan`, appending one row per successful run.
///
/// Stops at the first failure; rows appended before it stay in `results`.
pub fn sweep(
    launcher: &mut dyn Launcher,
    config: &HarnessConfig,
    plan: &SweepPlan,
    results: &mut Vec<RunResult>,
) -> Result<(), DodError> {
    plan.validate()?;
    let builder = Builder::new(config);
    let runner = Runner::new(config.work_dir.clone());
    info!(
        points = plan.points.len(),
        components = plan.components.len(),
        runs = plan.expected_runs(),
        compiles = plan.expected_compiles(),
        "starting sweep"
    );

    let mut executable: Option<Executable> = None;
    for trial in plan.configurations() {
        let mode = if trial.is_static {
            BuildMode::Static {
                num_components: trial.num_components,
            }
        } else {
            BuildMode::Dynamic
        };
        let current = match executable.take() {
            Some(exe) if exe.mode == Some(mode) => exe,
            _ => builder.compile(launcher, mode)?,
        };
        let timings = runner.run(launcher, &current, trial.num_points, trial.component_arg())?;
        results.push(RunResult::new(trial, timings));
        executable = Some(current);
    }

    info!(rows = results.len(), "sweep complete");
    Ok(())
}
