pub mod build;
pub mod expt;
pub mod run;
pub mod summary;
pub mod version;

use std::error::Error;
use std::path::PathBuf;

use dod_exp::HarnessConfig;

pub(crate) fn load_config(path: Option<&PathBuf>) -> Result<HarnessConfig, Box<dyn Error>> {
    match path {
        Some(path) => Ok(HarnessConfig::load(path)?),
        None => Ok(HarnessConfig::default()),
    }
}
