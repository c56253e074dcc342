//! Configuration of a TUV installation
//!
//! A [`TuvConfig`] describes where the binary lives, how to build it and how
//! its report is laid out. Configurations can be read from TOML; every field
//! except `root` has a default matching a stock TUV 5.3 checkout.
//!
//! ```toml
//! root = "/opt/tuv/V5.3.2"
//! executable = "tuv"
//! build_command = ["make"]
//!
//! [layout]
//! header_lines = 19
//! flux_lines = 310
//! subheader_lines = 3
//! ```

use crate::errors::{TuvError, TuvResult};
use crate::report::ReportLayout;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Location, build command and report layout of a TUV installation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuvConfig {
    /// Directory holding the TUV sources and the compiled binary.
    /// Both the build and the run execute with this as working directory.
    pub root: PathBuf,

    /// File name of the compiled binary, relative to `root`
    /// default: "tuv"
    pub executable: String,

    /// Program and arguments of the one-time build step
    /// default: ["make"]
    pub build_command: Vec<String>,

    /// Report layout produced by the binary
    pub layout: ReportLayout,
}

impl Default for TuvConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            executable: "tuv".to_string(),
            build_command: vec!["make".to_string()],
            layout: ReportLayout::default(),
        }
    }
}

impl TuvConfig {
    /// Default configuration for the installation at `root`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    pub fn from_toml_str(contents: &str) -> TuvResult<Self> {
        let config: TuvConfig =
            toml::from_str(contents).map_err(|e| TuvError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> TuvResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> TuvResult<String> {
        toml::to_string(self).map_err(|e| TuvError::Config(e.to_string()))
    }

    /// Path of the compiled binary
    pub fn executable_path(&self) -> PathBuf {
        self.root.join(&self.executable)
    }

    pub fn validate(&self) -> TuvResult<()> {
        if self.executable.is_empty() {
            return Err(TuvError::Config("executable must not be empty".to_string()));
        }
        match self.build_command.first() {
            Some(program) if !program.is_empty() => {}
            _ => return Err(TuvError::Config("build_command must name a program".to_string())),
        }
        self.layout.validate()
    }
}
