use std::fs;
use std::path::{Path, PathBuf};

use dod_core::errors::{DodError, ErrorInfo};
use serde::{Deserialize, Serialize};

/// Command line dialect understood by the configured compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompilerFlavor {
    /// `cl` style flags (`/DUSE_STATIC=N /EHsc /O2`).
    #[default]
    Msvc,
    /// `g++`/`clang++` style flags (`-DUSE_STATIC=N -O2 ... -o exe`).
    Gnu,
}

/// Toolchain and file layout used by the builder, runner and reporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub compiler: String,
    pub flavor: CompilerFlavor,
    pub source: PathBuf,
    pub executable: PathBuf,
    pub extra_flags: Vec<String>,
    pub work_dir: PathBuf,
    pub output: PathBuf,
}

impl HarnessConfig {
    pub const DEFAULT_OUTPUT: &'static str = "last_expt.csv";

    /// Parses a YAML document; missing keys fall back to defaults.
    pub fn from_yaml_str(text: &str) -> Result<Self, DodError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|err| {
            DodError::Config(
                ErrorInfo::new("config-parse", "invalid harness configuration")
                    .with_hint(err.to_string()),
            )
        })
    }

    /// Reads and parses a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, DodError> {
        let text = fs::read_to_string(path).map_err(|err| {
            DodError::Config(
                ErrorInfo::new("config-read", "failed to read harness configuration")
                    .with_context("path", path.display().to_string())
                    .with_hint(err.to_string()),
            )
        })?;
        Self::from_yaml_str(&text)
    }

    /// Absolute path of the compiled artifact.
    ///
    /// Relative work directories are anchored at the process working directory
    /// so the path stays valid when a child is spawned inside `work_dir`.
    pub fn executable_path(&self) -> Result<PathBuf, DodError> {
        let joined = self.work_dir.join(&self.executable);
        if joined.is_absolute() {
            return Ok(joined);
        }
        let cwd = std::env::current_dir().map_err(|err| {
            DodError::Config(
                ErrorInfo::new("config-cwd", "failed to resolve working directory")
                    .with_hint(err.to_string()),
            )
        })?;
        Ok(cwd.join(joined))
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            compiler: "cl".to_string(),
            flavor: CompilerFlavor::Msvc,
            source: PathBuf::from("dod.cpp"),
            executable: PathBuf::from("dod.exe"),
            extra_flags: Vec::new(),
            work_dir: PathBuf::from("."),
            output: PathBuf::from(Self::DEFAULT_OUTPUT),
        }
    }
}
