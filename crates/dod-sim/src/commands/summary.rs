use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use dod_exp::{summarize, HarnessConfig, ResultTable};

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Result table written by `dod-sim expt`.
    #[arg(long, default_value = HarnessConfig::DEFAULT_OUTPUT)]
    pub input: PathBuf,
    /// Emit JSON instead of a text table.
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &SummaryArgs) -> Result<(), Box<dyn Error>> {
    let table = ResultTable::load(&args.input)?;
    let summary = summarize(&table);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{summary}");
    }
    Ok(())
}
