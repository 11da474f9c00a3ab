use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use dod_exp::{Executable, Runner, SystemLauncher};

use super::load_config;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Number of points to process.
    #[arg(long)]
    pub points: u64,
    /// Component count to pass on the command line. Omit it for executables
    /// built with `build --static`, which already know their count.
    #[arg(long)]
    pub components: Option<u64>,
    /// YAML harness configuration (compiler, source, paths).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &RunArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(args.config.as_ref())?;
    let executable = Executable::existing(&config)?;
    let runner = Runner::new(config.work_dir.clone());
    let timings = runner.run(
        &mut SystemLauncher,
        &executable,
        args.points,
        args.components,
    )?;
    println!("soa: {}us", timings.soa_us);
    println!("aos: {}us", timings.aos_us);
    Ok(())
}
