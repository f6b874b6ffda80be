//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Every variant is fatal to a load: nothing is retried and no partial graph
//! is handed to the emitter.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Only `std::io::Error` and `String` convert implicitly; the load failures
/// carry the offending URL and are always built explicitly.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// A definition declares a meta-schema URL that maps to no document kind.
    #[from(ignore)]
    #[display("Unsupported document schema '{schema_url}' for definition '{definition}'")]
    UnsupportedDocument {
        /// URL of the offending definition.
        definition: String,
        /// The unrecognized meta-schema URL.
        schema_url: String,
    },

    /// A manifest, document or schema could not be retrieved.
    #[from(ignore)]
    #[display("Failed to fetch '{url}': {message}")]
    Transport {
        /// Location that was requested.
        url: String,
        /// Underlying transport failure.
        message: String,
    },

    /// A retrieved body is not valid JSON or does not match the expected shape.
    #[from(ignore)]
    #[display("Failed to decode '{url}': {message}")]
    Decode {
        /// Location the body came from.
        url: String,
        /// Decoder message.
        message: String,
    },

    /// Disambiguation ran out of suffixes for a candidate identifier.
    #[from(ignore)]
    #[display("Could not derive a unique identifier from '{candidate}'")]
    NamingExhausted {
        /// The normalized candidate that kept colliding.
        candidate: String,
    },

    /// A post-load patch no longer matches the schema it targets.
    #[from(ignore)]
    #[display("Schema patch for '{url}' failed: {message}")]
    Patch {
        /// Canonical URL of the patched schema.
        url: String,
        /// What did not match.
        message: String,
    },

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Builds a transport error for `url`.
    pub fn transport(url: impl Into<String>, message: impl ToString) -> Self {
        AppError::Transport {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Builds a decode error for `url`.
    pub fn decode(url: impl Into<String>, message: impl ToString) -> Self {
        AppError::Decode {
            url: url.into(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;

    #[test]
    fn test_decode_patch_and_io_errors() {
        let err = AppError::decode("http://x/a.json#", "expected value at line 1 column 1");
        assert_eq!(
            err.to_string(),
            "Failed to decode 'http://x/a.json#': expected value at line 1 column 1"
        );

        let err = AppError::Patch {
            url: "http://x/a.json#".into(),
            message: "no property 'artifacts'".into(),
        };
        assert_eq!(
            err.to_string(),
            "Schema patch for 'http://x/a.json#' failed: no property 'artifacts'"
        );

        let err: AppError = std::io::Error::from(ErrorKind::NotFound).into();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn test_messages_name_the_url() {
        let err = AppError::transport("http://x/a.json", "connection refused");
        assert_eq!(
            err.to_string(),
            "Failed to fetch 'http://x/a.json': connection refused"
        );

        let err = AppError::UnsupportedDocument {
            definition: "http://x/api.json".into(),
            schema_url: "http://x/other.json".into(),
        };
        assert_eq!(
            err.to_string(),
            "Unsupported document schema 'http://x/other.json' for definition 'http://x/api.json'"
        );
    }
}
