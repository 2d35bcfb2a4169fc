//! Error types for gh-automerge.
//!
//! This module defines all errors that can occur during operation.

use std::path::PathBuf;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in gh-automerge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // =========================================================================
    // Configuration errors
    // =========================================================================
    /// Configuration file not found.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path where config was expected.
        path: PathBuf,
    },

    /// Failed to parse configuration file.
    #[error("Failed to parse configuration: {message}")]
    ConfigParse {
        /// Description of the parse error.
        message: String,
        /// Optional source error.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration: {field} - {message}")]
    ConfigInvalid {
        /// Field name that is invalid.
        field: String,
        /// Description of why it's invalid.
        message: String,
    },

    // =========================================================================
    // Environment errors
    // =========================================================================
    /// Not in a Git repository.
    #[error("not in a git repository")]
    NotGitRepo,

    /// The GitHub CLI is missing or cannot be invoked.
    #[error("{program} command not found. Please install GitHub CLI")]
    HostingCliUnavailable {
        /// Program that was probed.
        program: String,
    },

    /// HEAD does not point at a branch.
    #[error("HEAD is detached; check out a branch to watch its status checks")]
    DetachedHead,

    /// Git operation failed.
    #[error("Git operation failed: {operation} - {message}")]
    GitOperation {
        /// Name of the operation that failed.
        operation: String,
        /// Error message.
        message: String,
    },

    /// Resolving part of the watch context failed.
    #[error("failed to get {what}: {source}")]
    Resolution {
        /// What was being resolved.
        what: String,
        /// Underlying failure.
        #[source]
        source: Box<Error>,
    },

    // =========================================================================
    // External command errors
    // =========================================================================
    /// Command not found.
    #[error("Command not found: {command}")]
    CommandNotFound {
        /// The command that wasn't found.
        command: String,
    },

    /// Command exited unsuccessfully.
    #[error("{command} failed: {message}")]
    CommandFailed {
        /// The command line that was run.
        command: String,
        /// Trimmed stderr, or the exit status when stderr is empty.
        message: String,
        /// Exit code if available.
        exit_code: Option<i32>,
    },

    /// JSON output from a command could not be decoded.
    #[error("Failed to parse {what}: {source}")]
    Parse {
        /// What was being parsed.
        what: String,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },

    // =========================================================================
    // I/O errors
    // =========================================================================
    /// File I/O error.
    #[error("I/O error: {message}")]
    Io {
        /// Description of what failed.
        message: String,
        /// Source error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Creates a new configuration parse error with source.
    pub fn config_parse_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new invalid configuration error.
    pub fn config_invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigInvalid {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a new I/O error with context.
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Creates a new Git operation error.
    pub fn git(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::GitOperation {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Creates a new command failed error.
    pub fn command_failed(
        command: impl Into<String>,
        message: impl Into<String>,
        exit_code: Option<i32>,
    ) -> Self {
        Self::CommandFailed {
            command: command.into(),
            message: message.into(),
            exit_code,
        }
    }

    /// Creates a new JSON parse error.
    pub fn parse(what: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Parse {
            what: what.into(),
            source,
        }
    }

    /// Wraps an error that occurred while resolving `what`.
    pub fn resolution(what: impl Into<String>, source: Self) -> Self {
        Self::Resolution {
            what: what.into(),
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{not json").expect_err("should fail")
    }

    // =========================================================================
    // Display / Error message tests for every variant
    // =========================================================================

    #[test]
    fn test_display_config_not_found() {
        let err = Error::ConfigNotFound {
            path: PathBuf::from("/my/automerge.toml"),
        };
        assert_eq!(
            err.to_string(),
            "Configuration file not found: /my/automerge.toml"
        );
    }

    #[test]
    fn test_display_config_parse() {
        let toml_err = toml::from_str::<toml::Value>("invalid [[[toml").expect_err("should fail");
        let err = Error::config_parse_with_source("Failed to parse TOML", toml_err);
        assert_eq!(
            err.to_string(),
            "Failed to parse configuration: Failed to parse TOML"
        );
    }

    #[test]
    fn test_display_config_invalid() {
        let err = Error::config_invalid("poll_interval", "Invalid duration: soon");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: poll_interval - Invalid duration: soon"
        );
    }

    #[test]
    fn test_display_not_git_repo() {
        assert_eq!(Error::NotGitRepo.to_string(), "not in a git repository");
    }

    #[test]
    fn test_display_hosting_cli_unavailable() {
        let err = Error::HostingCliUnavailable {
            program: "gh".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "gh command not found. Please install GitHub CLI"
        );
    }

    #[test]
    fn test_display_detached_head() {
        assert!(Error::DetachedHead.to_string().contains("detached"));
    }

    #[test]
    fn test_display_git_operation() {
        let err = Error::git("rev-parse", "bad revision");
        assert_eq!(
            err.to_string(),
            "Git operation failed: rev-parse - bad revision"
        );
    }

    #[test]
    fn test_display_resolution() {
        let err = Error::resolution("current branch", Error::git("rev-parse", "boom"));
        assert_eq!(
            err.to_string(),
            "failed to get current branch: Git operation failed: rev-parse - boom"
        );
    }

    #[test]
    fn test_display_command_not_found() {
        let err = Error::CommandNotFound {
            command: "gh".to_string(),
        };
        assert_eq!(err.to_string(), "Command not found: gh");
    }

    #[test]
    fn test_display_command_failed() {
        let err = Error::command_failed("gh api /user", "HTTP 401: Bad credentials", Some(1));
        assert_eq!(
            err.to_string(),
            "gh api /user failed: HTTP 401: Bad credentials"
        );
    }

    #[test]
    fn test_display_parse() {
        let err = Error::parse("repository info", json_error());
        assert!(err.to_string().starts_with("Failed to parse repository info: "));
    }

    #[test]
    fn test_display_io() {
        let err = Error::io("read config", std::io::Error::other("file not found"));
        assert_eq!(err.to_string(), "I/O error: read config");
    }

    // =========================================================================
    // Constructor tests
    // =========================================================================

    #[test]
    fn test_command_failed_constructor() {
        let err = Error::command_failed("git status", "fatal", None);
        assert!(matches!(&err, Error::CommandFailed { command, message, exit_code }
            if command == "git status" && message == "fatal" && exit_code.is_none()
        ));
    }

    #[test]
    fn test_config_invalid_constructor() {
        let err = Error::config_invalid("gh", "must not be empty");
        assert!(matches!(&err, Error::ConfigInvalid { field, message }
            if field == "gh" && message == "must not be empty"
        ));
    }

    // =========================================================================
    // Error source chain tests
    // =========================================================================

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error as StdError;
        let err = Error::io("x", std::io::Error::other("inner"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_resolution_has_source() {
        use std::error::Error as StdError;
        let err = Error::resolution("repository info", Error::NotGitRepo);
        let source = err.source().expect("source");
        assert_eq!(source.to_string(), "not in a git repository");
    }

    #[test]
    fn test_parse_has_source() {
        use std::error::Error as StdError;
        assert!(Error::parse("x", json_error()).source().is_some());
    }
}
