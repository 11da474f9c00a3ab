use std::fmt;

use serde::{Deserialize, Serialize};

/// How the benchmark executable learns its component count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum BuildMode {
    /// Component count baked in at compile time through `USE_STATIC`.
    Static {
        /// Value passed as `USE_STATIC`.
        num_components: u64,
    },
    /// Component count passed on the command line at run time.
    Dynamic,
}

impl BuildMode {
    /// Component count compiled into the executable, if any.
    pub fn baked_components(&self) -> Option<u64> {
        match self {
            BuildMode::Static { num_components } => Some(*num_components),
            BuildMode::Dynamic => None,
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildMode::Static { num_components } => write!(f, "static({num_components})"),
            BuildMode::Dynamic => write!(f, "dynamic"),
        }
    }
}

/// One (build, execution) trial of the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunConfiguration {
    /// Number of points the benchmark allocates.
    pub num_points: u64,
    /// Number of components per point.
    pub num_components: u64,
    /// Whether the executable was built with the component count baked in.
    #[serde(rename = "static")]
    pub is_static: bool,
}

impl RunConfiguration {
    /// Creates a configuration for one trial.
    pub fn new(num_points: u64, num_components: u64, is_static: bool) -> Self {
        Self {
            num_points,
            num_components,
            is_static,
        }
    }

    /// Component argument to pass on the command line; static builds get none.
    pub fn component_arg(&self) -> Option<u64> {
        if self.is_static {
            None
        } else {
            Some(self.num_components)
        }
    }
}

/// Microsecond timings reported by one execution of the benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timings {
    /// Structure-of-arrays pass.
    pub soa_us: u64,
    /// Array-of-structures pass.
    pub aos_us: u64,
}

/// Row produced by a successful run, tagged with its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunResult {
    /// Number of points of the originating configuration.
    pub num_points: u64,
    /// Number of components of the originating configuration.
    pub num_components: u64,
    /// Structure-of-arrays time in microseconds.
    pub soa_time: u64,
    /// Array-of-structures time in microseconds.
    pub aos_time: u64,
    /// Build mode of the originating configuration.
    #[serde(rename = "static")]
    pub is_static: bool,
}

impl RunResult {
    /// Combines a configuration with the timings its run produced.
    pub fn new(config: RunConfiguration, timings: Timings) -> Self {
        Self {
            num_points: config.num_points,
            num_components: config.num_components,
            soa_time: timings.soa_us,
            aos_time: timings.aos_us,
            is_static: config.is_static,
        }
    }
}
