use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use dod_exp::{expt, summarize, SweepPlan, SystemLauncher};
use tracing::error;

use super::load_config;

#[derive(Args, Debug)]
pub struct ExptArgs {
    /// Point counts to sweep, in order.
    #[arg(long, num_args = 1..)]
    pub points: Vec<u64>,
    /// Component counts to sweep, in order.
    #[arg(long, num_args = 1..)]
    pub components: Vec<u64>,
    /// YAML sweep plan; `--points`/`--components` override its lists.
    #[arg(long)]
    pub plan: Option<PathBuf>,
    /// YAML harness configuration (compiler, source, paths).
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Output CSV, overriding the configured path.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &ExptArgs) -> Result<(), Box<dyn Error>> {
    let mut config = load_config(args.config.as_ref())?;
    if let Some(out) = &args.out {
        config.output = out.clone();
    }
    let mut plan = match &args.plan {
        Some(path) => SweepPlan::load(path)?,
        None => SweepPlan::new(Vec::new(), Vec::new()),
    };
    if !args.points.is_empty() {
        plan.points = args.points.clone();
    }
    if !args.components.is_empty() {
        plan.components = args.components.clone();
    }

    let table = match expt(&mut SystemLauncher, &config, &plan.points, &plan.components) {
        Ok(table) => table,
        Err(err) => {
            error!(
                family = err.error.family(),
                collected = err.partial.len(),
                "experiment aborted"
            );
            return Err(Box::new(err));
        }
    };

    let summary = summarize(&table);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{summary}");
        println!("written to {}", config.output.display());
    }
    Ok(())
}
