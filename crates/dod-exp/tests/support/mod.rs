#![allow(dead_code)]

use std::io;
use std::path::PathBuf;

use dod_exp::{HarnessConfig, Invocation, Launcher, ProcessOutput};

/// Launcher that answers compiles and runs from a script instead of spawning.
#[derive(Debug, Default)]
pub struct ScriptedLauncher {
    pub compiler: String,
    pub invocations: Vec<Invocation>,
    /// Static component count whose compile exits non-zero.
    pub fail_static_compile: Option<u64>,
    /// Zero-based run index that prints no `aos:` line.
    pub drop_aos_on_run: Option<usize>,
    /// Zero-based run index that exits non-zero.
    pub crash_on_run: Option<usize>,
    /// Zero-based run index whose program cannot be spawned.
    pub missing_on_run: Option<usize>,
    runs: usize,
}

impl ScriptedLauncher {
    pub fn new(config: &HarnessConfig) -> Self {
        Self {
            compiler: config.compiler.clone(),
            ..Self::default()
        }
    }

    pub fn compiles(&self) -> Vec<&Invocation> {
        self.invocations
            .iter()
            .filter(|inv| inv.program == PathBuf::from(&self.compiler))
            .collect()
    }

    pub fn runs(&self) -> Vec<&Invocation> {
        self.invocations
            .iter()
            .filter(|inv| inv.program != PathBuf::from(&self.compiler))
            .collect()
    }

    fn compile(&self, invocation: &Invocation) -> ProcessOutput {
        let define = invocation
            .args
            .iter()
            .find_map(|arg| arg.strip_prefix("/DUSE_STATIC="))
            .and_then(|n| n.parse::<u64>().ok());
        if define.is_some() && define == self.fail_static_compile {
            return ProcessOutput {
                code: Some(2),
                stdout: String::new(),
                stderr: "dod.cpp(12): error C2131: expression did not evaluate to a constant"
                    .to_string(),
            };
        }
        ProcessOutput {
            code: Some(0),
            stdout: "Microsoft (R) C/C++ Optimizing Compiler".to_string(),
            stderr: String::new(),
        }
    }

    fn run(&mut self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        let index = self.runs;
        self.runs += 1;
        if Some(index) == self.missing_on_run {
            return Err(io::Error::new(io::ErrorKind::NotFound, "dod.exe not found"));
        }
        if Some(index) == self.crash_on_run {
            return Ok(ProcessOutput {
                code: Some(-1073741819),
                stdout: String::new(),
                stderr: "access violation".to_string(),
            });
        }
        let points: u64 = invocation.args[0].parse().unwrap_or(0);
        let components: u64 = invocation
            .args
            .get(1)
            .and_then(|c| c.parse().ok())
            .unwrap_or(1);
        let soa = points * components / 100;
        let aos = soa * 3 + 1;
        let mut stdout = format!("totals computed\nsoa: {soa}us\n");
        if Some(index) != self.drop_aos_on_run {
            stdout.push_str(&format!("aos: {aos}us\n"));
        }
        Ok(ProcessOutput {
            code: Some(0),
            stdout,
            stderr: String::new(),
        })
    }
}

impl Launcher for ScriptedLauncher {
    fn launch(&mut self, invocation: &Invocation) -> io::Result<ProcessOutput> {
        self.invocations.push(invocation.clone());
        if invocation.program == PathBuf::from(&self.compiler) {
            Ok(self.compile(invocation))
        } else {
            self.run(invocation)
        }
    }
}

pub fn config_in(dir: &std::path::Path) -> HarnessConfig {
    HarnessConfig {
        work_dir: dir.to_path_buf(),
        output: dir.join("last_expt.csv"),
        ..HarnessConfig::default()
    }
}
