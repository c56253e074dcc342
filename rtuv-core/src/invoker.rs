//! Running the TUV binary
//!
//! Each call probes the installation root. If the binary is missing, the
//! build command is run once and [`TuvOutcome::BuildTriggered`] is returned
//! without running a simulation; the caller re-invokes once the build is done.
//! Otherwise the binary is run once and its report decoded.
//!
//! The installation root is handed to the child process as its working
//! directory, and the working directory of this process is never changed.
//! Concurrent runs against an existing binary are therefore safe. Concurrent
//! calls while the binary is absent race on the build, so callers should make
//! the first call per root on its own.

use crate::config::TuvConfig;
use crate::errors::{TuvError, TuvResult};
use crate::parameters::{FloatValue, InvocationParameters};
use crate::rates::PhotolysisRates;
use crate::report::{decode_report, RawReport};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Result of a single call to [`TuvRunner::run`]
#[derive(Debug, Clone, PartialEq)]
pub enum TuvOutcome {
    /// The binary ran and its report was decoded
    Ready(PhotolysisRates),
    /// The binary was missing and has been built; call again
    BuildTriggered,
}

impl TuvOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, TuvOutcome::Ready(_))
    }

    pub fn rates(&self) -> Option<&PhotolysisRates> {
        match self {
            TuvOutcome::Ready(rates) => Some(rates),
            TuvOutcome::BuildTriggered => None,
        }
    }

    pub fn into_rates(self) -> Option<PhotolysisRates> {
        match self {
            TuvOutcome::Ready(rates) => Some(rates),
            TuvOutcome::BuildTriggered => None,
        }
    }
}

/// Invokes one TUV installation
#[derive(Debug, Clone)]
pub struct TuvRunner {
    config: TuvConfig,
}

impl TuvRunner {
    pub fn new(config: TuvConfig) -> TuvResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TuvConfig {
        &self.config
    }

    /// Whether the compiled binary is present
    pub fn is_built(&self) -> bool {
        self.config.executable_path().is_file()
    }

    /// Run TUV and decode the photolysis rates
    pub fn run(&self, parameters: &InvocationParameters) -> TuvResult<TuvOutcome> {
        match self.run_raw(parameters)? {
            Some(report) => {
                let rates = decode_report(&report, &self.config.layout)?;
                Ok(TuvOutcome::Ready(rates))
            }
            None => Ok(TuvOutcome::BuildTriggered),
        }
    }

    /// Run TUV and return its undecoded report
    ///
    /// Returns `None` if the binary was missing and a build was performed
    /// instead.
    pub fn run_raw(&self, parameters: &InvocationParameters) -> TuvResult<Option<RawReport>> {
        if !self.is_built() {
            info!(
                "{} not found, building in {}",
                self.config.executable_path().display(),
                self.config.root.display()
            );
            self.build()?;
            return Ok(None);
        }

        let stdout = self.execute(parameters)?;
        Ok(Some(RawReport::from_stdout(&stdout)))
    }

    /// Run the build command in the installation root
    pub fn build(&self) -> TuvResult<()> {
        let (program, args) = self
            .config
            .build_command
            .split_first()
            .ok_or_else(|| TuvError::Config("build_command must name a program".to_string()))?;
        let command_line = self.config.build_command.join(" ");
        debug!("Running `{}` in {}", command_line, self.config.root.display());

        let status = Command::new(program)
            .args(args)
            .current_dir(&self.config.root)
            .status()
            .map_err(|source| TuvError::Spawn {
                command: command_line.clone(),
                source,
            })?;

        if !status.success() {
            warn!("`{}` exited with {}", command_line, status);
            return Err(TuvError::BuildFailure {
                command: command_line,
                code: status.code(),
            });
        }
        Ok(())
    }

    fn execute(&self, parameters: &InvocationParameters) -> TuvResult<String> {
        let executable = self.executable_command_path()?;
        let args = parameters.command_args();
        let command_line = format!("{} {}", executable.display(), args.join(" "));
        debug!("Running `{}` in {}", command_line, self.config.root.display());

        let output = Command::new(&executable)
            .args(&args)
            .current_dir(&self.config.root)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| TuvError::Spawn {
                command: command_line.clone(),
                source,
            })?;

        if !output.status.success() {
            warn!("`{}` exited with {}", command_line, output.status);
            return Err(TuvError::RunFailure {
                command: command_line,
                code: output.status.code(),
            });
        }

        String::from_utf8(output.stdout).map_err(|e| TuvError::InvalidOutput(e.to_string()))
    }

    /// Path used to spawn the binary
    ///
    /// A relative root is resolved against this process's working directory
    /// so that the path stays valid once the child's directory is changed.
    fn executable_command_path(&self) -> TuvResult<PathBuf> {
        let path = self.config.executable_path();
        if path.is_absolute() {
            return Ok(path);
        }
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Run TUV at `root` with the default configuration
///
/// Returns `None` when the binary had to be built first.
pub fn tuv_cli(
    zenith_angle: FloatValue,
    altitude: FloatValue,
    temperature: FloatValue,
    root: impl Into<PathBuf>,
) -> TuvResult<Option<PhotolysisRates>> {
    let runner = TuvRunner::new(TuvConfig::with_root(root))?;
    let parameters = InvocationParameters::new(zenith_angle, altitude, temperature);
    Ok(runner.run(&parameters)?.into_rates())
}
