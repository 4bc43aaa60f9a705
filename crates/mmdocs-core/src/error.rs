//! Error types and handling for mmdocs-core operations.
//!
//! Errors are categorized for easier handling and include context about
//! recoverability. Most failures in this crate are local and permanent
//! (a missing document, malformed configuration); the corpus load and the
//! oracle subprocess are the only operations that touch the outside world.

use thiserror::Error;

/// The main error type for mmdocs-core operations.
///
/// All public functions in mmdocs-core return `Result<T, Error>` for
/// consistent error handling. `Display` provides user-friendly messages;
/// the full source chain is preserved where an underlying error exists.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers file system operations like reading documentation files or the
    /// configuration file. The underlying `std::io::Error` is preserved.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or inaccessible.
    ///
    /// Occurs when the config file contains invalid values or the config
    /// directory cannot be determined.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource was not found.
    ///
    /// Used for missing documents, unknown diagram types, or a reference
    /// file that does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A caller-supplied value was rejected at the boundary.
    ///
    /// Covers empty search terms and unsupported modes; these never reach
    /// the search engine.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The documentation corpus is empty or was never loaded.
    ///
    /// Distinct from a search that matched nothing: this means there was
    /// nothing to search at all.
    #[error("Documentation corpus unavailable: {0}")]
    CorpusUnavailable(String),

    /// The external parser oracle failed to execute.
    ///
    /// This is a failure to *run* the oracle, not a verdict from it. A
    /// parser rejection is an expected validation outcome, never an error.
    #[error("Oracle error: {0}")]
    Oracle(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic error for uncategorized failures.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Check if the error might be recoverable through retry logic.
    ///
    /// Returns `true` only for temporary I/O conditions. Oracle failures are
    /// deliberately non-recoverable: the oracle is a single blocking call
    /// whose outcome is definitive.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Get the error category as a string identifier.
    ///
    /// Useful for grouping errors in logs or implementing category-specific
    /// handling at the protocol boundary.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::CorpusUnavailable(_) => "corpus",
            Self::Oracle(_) => "oracle",
            Self::Serialization(_) => "serialization",
            Self::Other(_) => "other",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io;

    #[test]
    fn test_error_display_formatting() {
        let errors = vec![
            Error::Config("missing field".to_string()),
            Error::NotFound("document".to_string()),
            Error::InvalidInput("empty term".to_string()),
            Error::CorpusUnavailable("no documents".to_string()),
            Error::Oracle("spawn failed".to_string()),
            Error::Serialization("bad json".to_string()),
        ];

        for error in errors {
            let error_string = error.to_string();
            assert!(!error_string.is_empty());
            assert!(error_string.contains(':'));
        }

        // Other passes its message through untouched
        assert_eq!(Error::Other("plain".to_string()).to_string(), "plain");
    }

    #[test]
    fn test_error_categories() {
        let cases = vec![
            (Error::Io(io::Error::other("x")), "io"),
            (Error::Config("x".to_string()), "config"),
            (Error::NotFound("x".to_string()), "not_found"),
            (Error::InvalidInput("x".to_string()), "invalid_input"),
            (Error::CorpusUnavailable("x".to_string()), "corpus"),
            (Error::Oracle("x".to_string()), "oracle"),
            (Error::Serialization("x".to_string()), "serialization"),
            (Error::Other("x".to_string()), "other"),
        ];

        for (error, expected) in cases {
            assert_eq!(error.category(), expected);
        }
    }

    #[test]
    fn test_error_recoverability() {
        assert!(Error::Io(io::Error::new(io::ErrorKind::TimedOut, "t")).is_recoverable());
        assert!(Error::Io(io::Error::new(io::ErrorKind::Interrupted, "i")).is_recoverable());

        assert!(!Error::Io(io::Error::new(io::ErrorKind::NotFound, "n")).is_recoverable());
        assert!(!Error::Oracle("browser exploded".to_string()).is_recoverable());
        assert!(!Error::InvalidInput("empty".to_string()).is_recoverable());
    }

    #[test]
    fn test_error_chain_source() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let error: Error = io_error.into();

        let source = std::error::Error::source(&error);
        assert!(source.is_some());
        assert!(source.unwrap().to_string().contains("access denied"));
    }

    proptest! {
        #[test]
        fn test_invalid_input_with_arbitrary_messages(msg in r".{0,500}") {
            let error = Error::InvalidInput(msg.clone());
            let error_string = error.to_string();

            prop_assert!(error_string.contains("Invalid input"));
            prop_assert!(error_string.contains(&msg));
            prop_assert_eq!(error.category(), "invalid_input");
            prop_assert!(!error.is_recoverable());
        }

        #[test]
        fn test_not_found_with_arbitrary_messages(msg in r".{0,500}") {
            let error = Error::NotFound(msg.clone());

            prop_assert!(error.to_string().contains(&msg));
            prop_assert_eq!(error.category(), "not_found");
        }
    }
}
