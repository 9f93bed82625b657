//! Error handling for wp-svn-update
//!
//! The error system follows two rules:
//! 1. **Strongly-typed errors** ([`WpSvnError`]) for every fatal failure of the
//!    update workflow, so code can match on what went wrong.
//! 2. **User-friendly messages** ([`ErrorContext`]) with a short suggestion when
//!    the error reaches the terminal.
//!
//! Per-item problems (a plugin external whose URL is neither `trunk` nor a tag, or
//! whose tags directory cannot be listed) are *not* errors in this sense: they are recorded on the item itself and the run
//! continues. Only failures that make the whole run meaningless surface as
//! [`WpSvnError`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use wp_svn_update::core::{WpSvnError, user_friendly_error};
//!
//! let error = anyhow::Error::from(WpSvnError::SvnInfoParseError {
//!     stderr: String::new(),
//! });
//! let ctx = user_friendly_error(error);
//! ctx.display(); // ERROR: Cannot parse svn repository info
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for wp-svn-update.
///
/// Messages are phrased the way they are printed after the `ERROR:` prefix.
#[derive(Error, Debug)]
pub enum WpSvnError {
    /// The target directory does not exist or is not a directory
    #[error("Cannot change to directory: {path}")]
    DirectoryNotFound {
        /// Path as given on the command line
        path: String,
    },

    /// The svn executable could not be located
    #[error("Subversion client '{command}' is not installed or not found in PATH")]
    SvnNotFound {
        /// Name or path of the svn binary that was looked up
        command: String,
    },

    /// `svn info` failed or produced no `URL:` line
    #[error("Cannot parse svn repository info")]
    SvnInfoParseError {
        /// Error output of `svn info`, empty when it succeeded without a URL
        stderr: String,
    },

    /// An svn command exited unsuccessfully
    #[error("svn {operation} failed")]
    SvnCommandError {
        /// The svn subcommand (e.g. "switch", "propset")
        operation: String,
        /// Error output captured from svn, if any
        stderr: String,
    },

    /// The user ended input before confirming
    #[error("No confirmation received, nothing was changed")]
    ConfirmationAborted,

    /// Invalid configuration file
    #[error("Invalid configuration file {file}: {reason}")]
    ConfigParseError {
        /// Path of the configuration file
        file: String,
        /// Parser message
        reason: String,
    },

    /// Anything else
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for WpSvnError {
    fn clone(&self) -> Self {
        match self {
            Self::DirectoryNotFound {
                path,
            } => Self::DirectoryNotFound {
                path: path.clone(),
            },
            Self::SvnNotFound {
                command,
            } => Self::SvnNotFound {
                command: command.clone(),
            },
            Self::SvnInfoParseError {
                stderr,
            } => Self::SvnInfoParseError {
                stderr: stderr.clone(),
            },
            Self::SvnCommandError {
                operation,
                stderr,
            } => Self::SvnCommandError {
                operation: operation.clone(),
                stderr: stderr.clone(),
            },
            Self::ConfirmationAborted => Self::ConfirmationAborted,
            Self::ConfigParseError {
                file,
                reason,
            } => Self::ConfigParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that adds user-facing details and a suggestion.
///
/// When displayed the error shows as:
/// 1. `ERROR: <message>` in red
/// 2. `details: ...` in yellow (optional)
/// 3. `suggestion: ...` in green (optional)
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: WpSvnError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: WpSvnError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{} {}", "ERROR:".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ERROR: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`].
///
/// [`WpSvnError`] variants get tailored suggestions; IO errors are mapped by kind;
/// anything else is shown with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(wp_error) = error.downcast_ref::<WpSvnError>() {
        return create_error_context(wp_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        if io_error.kind() == std::io::ErrorKind::PermissionDenied {
            return ErrorContext::new(WpSvnError::Other {
                message: format!("Permission denied: {io_error}"),
            })
            .with_suggestion(
                "Run as the user owning the WordPress working copy or check file permissions",
            );
        }
    }

    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(WpSvnError::Other {
        message,
    })
}

fn create_error_context(error: WpSvnError) -> ErrorContext {
    let (suggestion, details) = match &error {
        WpSvnError::DirectoryNotFound { .. } => (
            Some("Pass the path of the WordPress working copy, e.g. 'wp-svn-update /var/www/blog'"),
            None,
        ),
        WpSvnError::SvnNotFound { .. } => (
            Some("Install Subversion (e.g. 'apt install subversion', 'brew install subversion') or point --svn at the binary"),
            None,
        ),
        WpSvnError::SvnInfoParseError { stderr } => (
            Some("Check that the target directory is a Subversion working copy ('svn info' should print a URL line)"),
            (!stderr.trim().is_empty()).then(|| stderr.trim().to_string()),
        ),
        WpSvnError::SvnCommandError { operation, stderr } => (
            Some(match operation.as_str() {
                "ls" => "Check your network connection and that the repository URL is reachable",
                "propset" | "propget" => "Check that the plugins directory is versioned in the working copy",
                "switch" | "update" => "Run 'svn status' and 'svn cleanup' in the working copy, then retry",
                _ => "Try running the svn command manually for more details",
            }),
            (!stderr.trim().is_empty()).then(|| stderr.trim().to_string()),
        ),
        WpSvnError::ConfirmationAborted => (
            Some("Answer \"y\" when prompted, or pass -f to skip the confirmation"),
            None,
        ),
        WpSvnError::ConfigParseError { .. } => {
            (Some("Check the TOML syntax of the configuration file"), None)
        }
        WpSvnError::Other { .. } => (None, None),
    };

    let mut ctx = ErrorContext::new(error);
    if let Some(suggestion) = suggestion {
        ctx = ctx.with_suggestion(suggestion);
    }
    if let Some(details) = details {
        ctx = ctx.with_details(details);
    }
    ctx
}
