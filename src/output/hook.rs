//! Post-run hook: hand the results file to an external program
//! (typically a plotting script) once emission is complete
//!
//! The hook's outcome is logged and otherwise ignored; a missing program
//! or a non-zero exit never fails the run.
//!
//! The results path is appended as the hook's last argument. Scripts that
//! ignore their arguments (like `plot_distances.py`) read
//! [`DEFAULT_RESULTS_FILE`] from their working directory instead, so a run
//! writing elsewhere gets a warning before such a hook is started.

use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use log::{info, warn};

/// Results file name used when `--output` is not given
pub const DEFAULT_RESULTS_FILE: &str = "simulation_output.csv";

/// Whether `results` is the default results file in the current directory
pub fn is_default_results(results: &Path) -> bool {
    results == Path::new(DEFAULT_RESULTS_FILE)
        || results == Path::new(".").join(DEFAULT_RESULTS_FILE).as_path()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotHook {
    program: String,
    args: Vec<String>,
}

impl PlotHook {
    /// Parse a whitespace-separated command line, e.g. `python3 plot_distances.py`
    /// Returns `None` for a blank command
    pub fn parse(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self { program, args: parts.collect() })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Run the hook with `results` appended as the last argument and wait
    /// for it. Child output is discarded.
    pub fn run(&self, results: &Path) -> Option<ExitStatus> {
        info!("running post-run hook `{}` on {}", self.program, results.display());
        if !is_default_results(results) {
            warn!(
                "results written to {}; a hook that ignores its last argument still reads {}",
                results.display(),
                DEFAULT_RESULTS_FILE
            );
        }
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(results)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(s) if s.success() => Some(s),
            Ok(s) => {
                warn!("post-run hook `{}` exited with {}", self.program, s);
                Some(s)
            }
            Err(e) => {
                warn!("post-run hook `{}` could not be started: {}", self.program, e);
                None
            }
        }
    }
}
