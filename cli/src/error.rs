#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use apigen_core::AppError;
use derive_more::{Display, From};

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// Load failure reported by the core library.
    #[display("{}", _0)]
    Load(AppError),

    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// Report serialization failure.
    #[display("Serialization Error: {}", _0)]
    Json(serde_json::Error),

    /// General failure message.
    #[display("Operation failed: {}", _0)]
    General(String),
}

/// `General(String)` has no `source()`, so `Error` is implemented by hand.
impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_keep_their_message() {
        let err: CliError = AppError::Transport {
            url: "http://x/a.json".into(),
            message: "404 Not Found".into(),
        }
        .into();
        assert!(err.to_string().contains("http://x/a.json"));
    }
}
