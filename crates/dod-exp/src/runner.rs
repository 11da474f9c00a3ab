use std::path::PathBuf;
use std::sync::OnceLock;

use dod_core::errors::{DodError, ErrorInfo};
use dod_core::Timings;
use regex::Regex;
use tracing::{debug, info};

use crate::builder::Executable;
use crate::launch::{exit_label, tail, Invocation, Launcher};

const STDERR_TAIL_LINES: usize = 20;

fn soa_pattern() -> &'static Regex {
    static SOA_RE: OnceLock<Regex> = OnceLock::new();
    SOA_RE.get_or_init(|| Regex::new(r"soa: ([0-9]+)us").expect("soa pattern compiles"))
}

fn aos_pattern() -> &'static Regex {
    static AOS_RE: OnceLock<Regex> = OnceLock::new();
    AOS_RE.get_or_init(|| Regex::new(r"aos: ([0-9]+)us").expect("aos pattern compiles"))
}

/// Extracts the two timings from benchmark output.
///
/// Each of `soa: <digits>us` and `aos: <digits>us` must occur exactly once;
/// order and surrounding output are irrelevant.
pub fn parse_timings(stdout: &str) -> Result<Timings, DodError> {
    let soa_us = extract_single(stdout, "soa", soa_pattern())?;
    let aos_us = extract_single(stdout, "aos", aos_pattern())?;
    Ok(Timings { soa_us, aos_us })
}

fn extract_single(stdout: &str, label: &str, pattern: &Regex) -> Result<u64, DodError> {
    let matches: Vec<&str> = pattern
        .captures_iter(stdout)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();
    let [digits] = matches.as_slice() else {
        let (code, message) = if matches.is_empty() {
            ("parse-missing", format!("output has no `{label}: <n>us` line"))
        } else {
            (
                "parse-duplicate",
                format!("output has more than one `{label}: <n>us` line"),
            )
        };
        return Err(DodError::Parse(
            ErrorInfo::new(code, message)
                .with_context("pattern", pattern.as_str())
                .with_context("matches", matches.len().to_string()),
        ));
    };
    digits.parse::<u64>().map_err(|err| {
        DodError::Parse(
            ErrorInfo::new("parse-value", format!("`{label}` timing is not a valid u64"))
                .with_context("value", *digits)
                .with_hint(err.to_string()),
        )
    })
}

/// Invokes a compiled benchmark and parses its timings.
#[derive(Debug, Clone)]
pub struct Runner {
    work_dir: PathBuf,
}

impl Runner {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    /// `<exe> <num_points> [<num_components>]`.
    pub fn invocation(
        &self,
        executable: &Executable,
        num_points: u64,
        num_components: Option<u64>,
    ) -> Invocation {
        let mut args = vec![num_points.to_string()];
        if let Some(components) = num_components {
            args.push(components.to_string());
        }
        Invocation {
            program: executable.path.clone(),
            args,
            work_dir: self.work_dir.clone(),
        }
    }

    /// Runs the executable once. `num_components` is `None` for static builds,
    /// which already know their component count.
    pub fn run(
        &self,
        launcher: &mut dyn Launcher,
        executable: &Executable,
        num_points: u64,
        num_components: Option<u64>,
    ) -> Result<Timings, DodError> {
        let invocation = self.invocation(executable, num_points, num_components);
        let output = launcher.launch(&invocation).map_err(|err| {
            DodError::Run(
                ErrorInfo::new("run-spawn", "failed to launch benchmark executable")
                    .with_context("command", invocation.command_line())
                    .with_hint(err.to_string()),
            )
        })?;
        debug!(stdout = %output.stdout, "benchmark output");
        if !output.success() {
            return Err(DodError::Run(
                ErrorInfo::new("run-exit", "benchmark exited with failure")
                    .with_context("command", invocation.command_line())
                    .with_context("exit", exit_label(output.code))
                    .with_hint(tail(&output.stderr, STDERR_TAIL_LINES)),
            ));
        }
        let timings = parse_timings(&output.stdout).map_err(|err| match err {
            DodError::Parse(info) => {
                DodError::Parse(info.with_context("command", invocation.command_line()))
            }
            other => other,
        })?;
        info!(
            num_points,
            num_components = executable
                .mode
                .and_then(|mode| mode.baked_components())
                .or(num_components),
            r#static = num_components.is_none(),
            soa_us = timings.soa_us,
            aos_us = timings.aos_us,
            "benchmark run complete"
        );
        Ok(timings)
    }
}
