//! CLI-specific error types and exit codes.

use gembridge_gemini::GeminiError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument validation error beyond what clap checks.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (bind failure and the like).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The server stopped with an error.
    #[error("Server error: {0}")]
    Server(#[from] anyhow::Error),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h where one fits.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Server(_) => 1,
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }
}

impl From<GeminiError> for CliError {
    fn from(err: GeminiError) -> Self {
        Self::Config(format!("Gemini client: {err}"))
    }
}
