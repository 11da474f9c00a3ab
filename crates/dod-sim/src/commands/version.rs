use std::error::Error;
use std::process::Command;

use clap::Args;
use dod_exp::HarnessConfig;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Emit git, rustc and default toolchain details as JSON.
    #[arg(long)]
    pub long: bool,
}

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: String,
    git_commit: String,
    rustc: String,
    default_compiler: String,
    default_output: String,
}

pub fn run(args: &VersionArgs) -> Result<(), Box<dyn Error>> {
    if !args.long {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    let defaults = HarnessConfig::default();
    let info = VersionInfo {
        version: env!("CARGO_PKG_VERSION").into(),
        git_commit: probe("git", &["rev-parse", "HEAD"]).unwrap_or_else(|| "unknown".into()),
        rustc: probe("rustc", &["--version"]).unwrap_or_else(|| "rustc unavailable".into()),
        default_compiler: defaults.compiler,
        default_output: defaults.output.display().to_string(),
    };
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

fn probe(program: &str, args: &[&str]) -> Option<String> {
    let out = Command::new(program).args(args).output().ok()?;
    if out.status.success() {
        Some(String::from_utf8_lossy(&out.stdout).trim().to_string())
    } else {
        None
    }
}
