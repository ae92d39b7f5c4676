//! Exit codes for the MQTT analyzer CLI.
//!
//! This module defines distinct exit codes for different error types,
//! allowing scripts and CI systems to distinguish between different
//! failure modes.

use mqtt_config::ConfigError;
use mqtt_ide::ActionError;
use mqtt_syntax::ParseError;

/// Exit codes used by the CLI.
///
/// These follow standard Unix conventions where 0 indicates success
/// and non-zero values indicate different types of failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - no error-severity diagnostics
    Success = 0,
    /// Error-severity diagnostics found in at least one file
    DiagnosticsFound = 1,
    /// Configuration error (unreadable or invalid config file)
    ConfigError = 2,
    /// I/O error (file read/write failure)
    IoError = 3,
    /// Parse error (a source file could not be parsed)
    ParseError = 4,
    /// The requested code action could not be executed
    ActionError = 5,
}

impl ExitCode {
    /// Exit the process with this exit code.
    pub fn exit(self) -> ! {
        std::process::exit(self.code())
    }

    /// Get the numeric value of this exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Classify a command failure by the first recognized error in its chain.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if cause.is::<ConfigError>() {
                return Self::ConfigError;
            }
            if cause.is::<ParseError>() {
                return Self::ParseError;
            }
            if cause.is::<ActionError>() {
                return Self::ActionError;
            }
            if cause.is::<std::io::Error>() {
                return Self::IoError;
            }
        }
        Self::IoError
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::DiagnosticsFound => write!(f, "diagnostics found"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::IoError => write!(f, "I/O error"),
            Self::ParseError => write!(f, "parse error"),
            Self::ActionError => write!(f, "code action error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_codes_are_distinct() {
        let codes = [
            ExitCode::Success,
            ExitCode::DiagnosticsFound,
            ExitCode::ConfigError,
            ExitCode::IoError,
            ExitCode::ParseError,
            ExitCode::ActionError,
        ];
        for (i, code) in codes.iter().enumerate() {
            assert_eq!(code.code(), i32::try_from(i).unwrap());
        }
    }

    #[test]
    fn test_for_error_walks_context_chain() {
        let err = Err::<(), _>(ActionError::MissingLocation)
            .context("failed to fix main.bal")
            .unwrap_err();
        assert_eq!(ExitCode::for_error(&err), ExitCode::ActionError);

        let err = Err::<(), _>(std::io::Error::from(std::io::ErrorKind::NotFound))
            .context("failed to read main.bal")
            .unwrap_err();
        assert_eq!(ExitCode::for_error(&err), ExitCode::IoError);

        let err = anyhow::Error::new(ConfigError::UnsupportedFormat("a.ini".into()));
        assert_eq!(ExitCode::for_error(&err), ExitCode::ConfigError);
    }
}
