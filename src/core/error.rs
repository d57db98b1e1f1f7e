//! Error handling for autosave-render
//!
//! Two layers, mirroring how the rest of the crate reports problems:
//! - [`AutosaveError`] - typed failures raised by the library
//! - [`ErrorContext`] - wrapper adding a suggestion and details for the CLI
//!
//! The substitution engine and the serial allocator never fail. Everything
//! that can fail touches the filesystem: configuration files, state files,
//! the directory probe and the render time log.
//!
//! Use [`user_friendly_error`] to turn any [`anyhow::Error`] bubbling out of a
//! command into something worth printing.
//!
//! ```rust,no_run
//! use autosave_render::core::{AutosaveError, ErrorContext};
//!
//! let context = ErrorContext::new(AutosaveError::ProjectNotSaved)
//!     .with_suggestion("Save the .blend file before rendering")
//!     .with_details("Autosave paths are derived from the project file name");
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for autosave-render operations.
#[derive(Error, Debug, Clone)]
pub enum AutosaveError {
    /// The probe could not list the target directory
    #[error("Cannot read directory {path}: {reason}")]
    DirectoryUnreadable {
        /// Directory that was scanned
        path: String,
        /// Underlying I/O failure
        reason: String,
    },

    /// A directory could not be created or is shadowed by a file
    #[error("Cannot create directory {path}: {reason}")]
    DirectoryCreationFailed {
        /// Directory that was requested
        path: String,
        /// Underlying I/O failure
        reason: String,
    },

    /// A configuration file exists but is not valid TOML for its schema
    #[error("Invalid configuration in {file}: {reason}")]
    ConfigParseError {
        /// The offending file
        file: String,
        /// Parser message
        reason: String,
    },

    /// A scene snapshot could not be parsed
    #[error("Invalid scene snapshot {file}: {reason}")]
    SnapshotParseError {
        /// The offending file
        file: String,
        /// Parser message
        reason: String,
    },

    /// A state file holding serial counters could not be parsed
    #[error("Corrupt state file {file}: {reason}")]
    StateParseError {
        /// The offending file
        file: String,
        /// Parser message
        reason: String,
    },

    /// Another process holds the state lock and we could not wait for it
    #[error("Failed to lock state file {path}: {reason}")]
    StateLockFailed {
        /// Lock file path
        path: String,
        /// Underlying I/O failure
        reason: String,
    },

    /// A render time was negative or not in seconds or `H:MM:SS.cc` form
    #[error("Invalid render time '{value}': expected seconds or H:MM:SS.cc")]
    InvalidRenderTime {
        /// The rejected text
        value: String,
    },

    /// Operation needs a saved project file
    #[error("The project has not been saved; no project file path is available")]
    ProjectNotSaved,

    /// Home or config directory could not be determined
    #[error("Unable to determine the {kind} directory")]
    DirectoryUnavailable {
        /// Which directory was looked up
        kind: String,
    },

    /// Anything else
    #[error("{message}")]
    Other {
        /// Free-form message
        message: String,
    },
}

/// Error wrapper with a suggestion and extra details for terminal output.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: AutosaveError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a context with no suggestion or details.
    #[must_use]
    pub const fn new(error: AutosaveError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add an actionable suggestion, printed in green.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add background details, printed in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details and suggestion to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

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
        write!(f, "{}", self.error)?;

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

/// Convert any error into an [`ErrorContext`] with suggestions where we know
/// the failure mode.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    // downcast_ref sees through .context() layers; keep the outer message as details
    if let Some(autosave_error) = error.downcast_ref::<AutosaveError>() {
        let mut ctx = create_error_context(autosave_error.clone());
        let outer = error.to_string();
        if ctx.details.is_none() && outer != autosave_error.to_string() {
            ctx.details = Some(outer);
        }
        return ctx;
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(AutosaveError::Other {
                    message: format!("Permission denied: {error:#}"),
                })
                .with_suggestion("Check ownership of the output directory and state files");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(AutosaveError::Other {
                    message: format!("{error:#}"),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(AutosaveError::ConfigParseError {
            file: "unknown".to_string(),
            reason: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax: quotes, brackets and key names");
    }

    ErrorContext::new(AutosaveError::Other {
        message: format!("{error:#}"),
    })
}

fn create_error_context(error: AutosaveError) -> ErrorContext {
    match &error {
        AutosaveError::DirectoryUnreadable {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "Create the directory first; serial probing only scans existing directories",
        ),
        AutosaveError::DirectoryCreationFailed {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check permissions of the parent directory and that no file uses the same name"),
        AutosaveError::ConfigParseError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Fix the file or regenerate it with 'autosave-render config init --force'"),
        AutosaveError::SnapshotParseError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Scene snapshots are TOML or JSON files; check field names and types"),
        AutosaveError::StateParseError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Remove the state file to reset serial numbers, or repair it by hand")
            .with_details("State files store serial counters and the accumulated render time"),
        AutosaveError::StateLockFailed {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Another render may be finishing; retry once it completes"),
        AutosaveError::InvalidRenderTime {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Use seconds (12.5) or H:MM:SS.cc")
            .with_details("A render time log holds a single 'Total Render Time: H:MM:SS.cc' line"),
        AutosaveError::ProjectNotSaved => ErrorContext::new(error)
            .with_suggestion("Set 'blend_file' in the scene snapshot")
            .with_details("Autosave locations and state files live next to the project file"),
        AutosaveError::DirectoryUnavailable {
            ..
        } => ErrorContext::new(error).with_suggestion("Pass --config with an explicit path"),
        AutosaveError::Other {
            ..
        } => ErrorContext::new(error),
    }
}
