use thiserror::Error;

/// Error type for TUV invocation and report decoding.
#[derive(Error, Debug)]
pub enum TuvError {
    #[error("Build command `{command}` failed with {}", describe_code(.code))]
    BuildFailure { command: String, code: Option<i32> },
    #[error("TUV run `{command}` failed with {}", describe_code(.code))]
    RunFailure { command: String, code: Option<i32> },
    #[error("Malformed TUV report: {0}")]
    MalformedReport(String),
    #[error("TUV output is not valid UTF-8: {0}")]
    InvalidOutput(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Unknown photolysis key: {0}")]
    UnknownKey(String),
    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TuvError {
    /// Exit code of the external process, if this error came from one
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            TuvError::BuildFailure { code, .. } | TuvError::RunFailure { code, .. } => *code,
            _ => None,
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        // Killed by a signal on unix
        None => "no exit status".to_string(),
    }
}

/// Convenience type for `Result<T, TuvError>`.
pub type TuvResult<T> = Result<T, TuvError>;
