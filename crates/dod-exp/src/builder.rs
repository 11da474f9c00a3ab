use std::path::{Path, PathBuf};

use dod_core::errors::{DodError, ErrorInfo};
use dod_core::BuildMode;
use tracing::{debug, info};

use crate::config::{CompilerFlavor, HarnessConfig};
use crate::launch::{exit_label, tail, Invocation, Launcher};

const STDERR_TAIL_LINES: usize = 20;

/// Handle to a benchmark executable.
///
/// Every compile overwrites the same file, so a handle is only meaningful
/// until the next compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executable {
    pub path: PathBuf,
    /// `None` for an artifact already on disk that this process did not build.
    pub mode: Option<BuildMode>,
}

impl Executable {
    /// Refers to whatever the last compile left at the configured path.
    pub fn existing(config: &HarnessConfig) -> Result<Self, DodError> {
        Ok(Self {
            path: config.executable_path()?,
            mode: None,
        })
    }
}

/// Drives the external compiler.
#[derive(Debug, Clone, Copy)]
pub struct Builder<'a> {
    config: &'a HarnessConfig,
}

impl<'a> Builder<'a> {
    pub fn new(config: &'a HarnessConfig) -> Self {
        Self { config }
    }

    /// Compiles with the component count baked in as `USE_STATIC`.
    pub fn compile_static(
        &self,
        launcher: &mut dyn Launcher,
        num_components: u64,
    ) -> Result<Executable, DodError> {
        self.compile(launcher, BuildMode::Static { num_components })
    }

    /// Compiles without `USE_STATIC`; the executable then expects the
    /// component count on its command line.
    pub fn compile_non_static(&self, launcher: &mut dyn Launcher) -> Result<Executable, DodError> {
        self.compile(launcher, BuildMode::Dynamic)
    }

    pub fn compile(
        &self,
        launcher: &mut dyn Launcher,
        mode: BuildMode,
    ) -> Result<Executable, DodError> {
        let invocation = self.invocation(mode);
        info!(%mode, compiler = %self.config.compiler, "compiling benchmark");
        let output = launcher.launch(&invocation).map_err(|err| {
            DodError::Compile(
                ErrorInfo::new("compile-spawn", "failed to launch compiler")
                    .with_context("command", invocation.command_line())
                    .with_hint(err.to_string()),
            )
        })?;
        debug!(stdout = %output.stdout, "compiler output");
        if !output.success() {
            return Err(DodError::Compile(
                ErrorInfo::new("compile-exit", "compiler exited with failure")
                    .with_context("command", invocation.command_line())
                    .with_context("mode", mode.to_string())
                    .with_context("exit", exit_label(output.code))
                    .with_hint(tail(&output.stderr, STDERR_TAIL_LINES)),
            ));
        }
        let path = self.config.executable_path()?;
        Ok(Executable {
            path,
            mode: Some(mode),
        })
    }

    /// Command line for the given build mode.
    pub fn invocation(&self, mode: BuildMode) -> Invocation {
        let config = self.config;
        let mut args = Vec::new();
        match config.flavor {
            CompilerFlavor::Msvc => {
                if let Some(n) = mode.baked_components() {
                    args.push(format!("/DUSE_STATIC={n}"));
                }
                args.push("/EHsc".to_string());
                args.push("/O2".to_string());
                if !msvc_default_output(&config.source, &config.executable) {
                    args.push(format!("/Fe{}", config.executable.display()));
                }
                args.extend(config.extra_flags.iter().cloned());
                args.push(config.source.display().to_string());
            }
            CompilerFlavor::Gnu => {
                if let Some(n) = mode.baked_components() {
                    args.push(format!("-DUSE_STATIC={n}"));
                }
                args.push("-O2".to_string());
                args.extend(config.extra_flags.iter().cloned());
                args.push(config.source.display().to_string());
                args.push("-o".to_string());
                args.push(config.executable.display().to_string());
            }
        }
        Invocation {
            program: PathBuf::from(&config.compiler),
            args,
            work_dir: config.work_dir.clone(),
        }
    }
}

// cl names its output after the source stem unless told otherwise.
fn msvc_default_output(source: &Path, executable: &Path) -> bool {
    match (source.file_stem(), executable.file_stem()) {
        (Some(src), Some(exe)) => {
            src == exe
                && executable.extension().is_some_and(|ext| ext == "exe")
                && executable
                    .parent()
                    .map_or(true, |parent| parent.as_os_str().is_empty())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn msvc_static_flags_in_documented_order() {
        let config = HarnessConfig::default();
        let invocation = Builder::new(&config).invocation(BuildMode::Static { num_components: 7 });
        assert_eq!(invocation.command_line(), "cl /DUSE_STATIC=7 /EHsc /O2 dod.cpp");
    }

    #[test]
    fn msvc_dynamic_has_no_define() {
        let config = HarnessConfig::default();
        let invocation = Builder::new(&config).invocation(BuildMode::Dynamic);
        assert_eq!(invocation.args, vec!["/EHsc", "/O2", "dod.cpp"]);
    }

    #[test]
    fn msvc_custom_executable_gets_output_flag() {
        let config = HarnessConfig {
            executable: PathBuf::from("bench.exe"),
            ..HarnessConfig::default()
        };
        let invocation = Builder::new(&config).invocation(BuildMode::Dynamic);
        assert!(invocation.args.contains(&"/Febench.exe".to_string()));
    }

    #[test]
    fn gnu_flags_name_the_output() {
        let config = HarnessConfig {
            compiler: "g++".to_string(),
            flavor: CompilerFlavor::Gnu,
            extra_flags: vec!["-march=native".to_string()],
            ..HarnessConfig::default()
        };
        let invocation = Builder::new(&config).invocation(BuildMode::Static { num_components: 100 });
        assert_eq!(
            invocation.command_line(),
            "g++ -DUSE_STATIC=100 -O2 -march=native dod.cpp -o dod.exe"
        );
    }
}
