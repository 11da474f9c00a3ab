use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::debug;

/// One child process to spawn and wait for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub work_dir: PathBuf,
}

impl Invocation {
    /// Space separated rendering used in logs and error context.
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Captured result of a finished child process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    /// Exit code, `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Spawns child processes on behalf of the builder and runner.
///
/// Implementations must block until the child exits.
pub trait Launcher {
    fn launch(&mut self, invocation: &Invocation) -> io::Result<ProcessOutput>;
}

impl<L: Launcher + ?Sized> Launcher for &mut L {
    fn launch(&mut self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        (**self).launch(invocation)
    }
}

/// [`Launcher`] backed by [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&mut self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        debug!(command = %invocation.command_line(), work_dir = %invocation.work_dir.display(), "spawning");
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.work_dir)
            .stdin(Stdio::null())
            .output()?;
        Ok(ProcessOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Last `lines` lines of `text`, for error context.
pub(crate) fn tail(text: &str, lines: usize) -> String {
    let collected: Vec<&str> = text.lines().collect();
    let start = collected.len().saturating_sub(lines);
    collected[start..].join("\n")
}

pub(crate) fn exit_label(code: Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "signal".to_string(),
    }
}
