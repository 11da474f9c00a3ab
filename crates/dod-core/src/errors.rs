//! Failure taxonomy for compiling, running, parsing and persisting benchmark
//! trials.
//!
//! Every failure carries an [`ErrorInfo`] so the CLI can print it as text or
//! serialize it next to a partially collected result table.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Diagnostic attached to a failed compile, run, parse or write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Kebab-case identifier such as `compile-exit` or `parse-missing`.
    pub code: String,
    /// One-line description of what went wrong.
    pub message: String,
    /// Details of the failing step: command line, exit status, output path.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Underlying OS/csv/yaml error text or the tail of the child's stderr.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Starts a diagnostic with no context and no hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records one detail of the failing step; a repeated key replaces the
    /// earlier value.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Attaches the lower-level error text.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the benchmark harness.
///
/// Every family is fatal to a sweep; none of them is retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum DodError {
    /// The compiler could not be launched or exited non-zero.
    #[error("compile error: {0}")]
    Compile(ErrorInfo),
    /// The benchmark executable could not be launched or exited non-zero.
    #[error("run error: {0}")]
    Run(ErrorInfo),
    /// The executable succeeded but its output lacked the expected timings.
    #[error("parse error: {0}")]
    Parse(ErrorInfo),
    /// The result table could not be written or read back.
    #[error("persist error: {0}")]
    Persist(ErrorInfo),
    /// Invalid sweep plan or harness configuration.
    #[error("config error: {0}")]
    Config(ErrorInfo),
}

// Rendered as `message (code: c) | context: [k=v, ...] | hint: h`.
impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            let pairs: Vec<String> = self
                .context
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            write!(f, " | context: [{}]", pairs.join(", "))?;
        }
        match &self.hint {
            Some(hint) => write!(f, " | hint: {hint}"),
            None => Ok(()),
        }
    }
}

impl DodError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            DodError::Compile(info)
            | DodError::Run(info)
            | DodError::Parse(info)
            | DodError::Persist(info)
            | DodError::Config(info) => info,
        }
    }

    /// Short family name, matching the serialized `family` tag.
    pub fn family(&self) -> &'static str {
        match self {
            DodError::Compile(_) => "Compile",
            DodError::Run(_) => "Run",
            DodError::Parse(_) => "Parse",
            DodError::Persist(_) => "Persist",
            DodError::Config(_) => "Config",
        }
    }
}
