use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use dod_core::BuildMode;
use dod_exp::{Builder, SystemLauncher};

use super::load_config;

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Bake this component count into the executable (`USE_STATIC`).
    #[arg(long = "static", value_name = "COMPONENTS")]
    pub static_components: Option<u64>,
    /// YAML harness configuration (compiler, source, paths).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &BuildArgs) -> Result<(), Box<dyn Error>> {
    let config = load_config(args.config.as_ref())?;
    let builder = Builder::new(&config);
    let mode = match args.static_components {
        Some(0) => return Err("--static requires a positive component count".into()),
        Some(num_components) => BuildMode::Static { num_components },
        None => BuildMode::Dynamic,
    };
    let executable = match mode {
        BuildMode::Static { num_components } => {
            builder.compile_static(&mut SystemLauncher, num_components)?
        }
        BuildMode::Dynamic => builder.compile_non_static(&mut SystemLauncher)?,
    };
    println!("{mode} {}", executable.path.display());
    Ok(())
}
