//! Custom error types with exit codes

use thiserror::Error;

/// Main error type for qmk
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum QmkError {
    /// No subcommand (or an unrecognized one) was given
    #[error("I don't do anything.")]
    NoAction,

    /// Configuration Error - unreadable or invalid config file
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Filesystem Error - config or log file operation failed
    #[error("Filesystem error: {message}")]
    Filesystem { message: String },
}

impl QmkError {
    /// Get the appropriate exit code for this error type
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::NoAction | Self::Configuration { .. } => 1,
            Self::Filesystem { .. } => 2,
        }
    }

    /// Create a configuration error
    #[inline]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a filesystem error
    #[inline]
    pub fn filesystem<S: Into<String>>(message: S) -> Self {
        Self::Filesystem {
            message: message.into(),
        }
    }
}

/// Exit code for an error coming out of the library
///
/// Errors that are not a `QmkError` exit with 1.
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<QmkError>()
        .map_or(1, QmkError::exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(QmkError::NoAction.exit_code(), 1);
        assert_eq!(QmkError::configuration("bad").exit_code(), 1);
        assert_eq!(QmkError::filesystem("gone").exit_code(), 2);
    }

    #[test]
    fn test_exit_code_through_context() {
        let err = anyhow::Error::from(QmkError::filesystem("gone")).context("saving config");
        assert_eq!(exit_code(&err), 2);
        assert_eq!(exit_code(&anyhow::anyhow!("plain")), 1);
    }

    #[test]
    fn test_no_action_message() {
        assert_eq!(QmkError::NoAction.to_string(), "I don't do anything.");
    }
}
