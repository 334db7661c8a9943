//! Error handling for techtree
//!
//! This module provides the error types and user-friendly error reporting for the
//! technology tree generator. The error system is designed around two core principles:
//! 1. **Strongly-typed errors** for precise error handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! The error system consists of two main types:
//! - [`TechTreeError`] - Enumerated error types for every failure case
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! # Error Categories
//!
//! Most conditions met while reading game data are *diagnostics*, not failures.
//! They are logged and the run continues:
//! - [`TechTreeError::MalformedBlock`] - unbalanced braces, the record is skipped
//! - [`TechTreeError::DuplicateIdentifier`] - first definition wins
//! - [`TechTreeError::DanglingReference`] - prerequisite names an unknown technology
//! - [`TechTreeError::UnreadableSource`] - the file contributes zero records
//! - [`TechTreeError::CyclicDependency`] - reported, rendering tolerates it
//!
//! Run-level errors end the command:
//! - **Configuration**: [`TechTreeError::ConfigNotFound`], [`TechTreeError::ConfigError`],
//!   [`TechTreeError::ConfigParseError`]
//! - **Lookup**: [`TechTreeError::TechNotFound`]
//! - **Output**: [`TechTreeError::OutputWriteError`], [`TechTreeError::IoError`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use techtree_cli::core::{ErrorContext, TechTreeError, user_friendly_error};
//!
//! let context = ErrorContext::new(TechTreeError::ConfigNotFound {
//!     path: "techtree.toml".to_string(),
//! })
//! .with_suggestion("Create techtree.toml next to the executable");
//! context.display();
//!
//! let ctx = user_friendly_error(anyhow::anyhow!("something broke"));
//! println!("{ctx}");
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for techtree operations
///
/// Each variant describes one failure mode and carries the identifiers or
/// paths needed to explain it to the operator.
#[derive(Error, Debug)]
pub enum TechTreeError {
    /// A brace-delimited block never closed before the end of the text
    #[error("Unbalanced braces in record '{name}'")]
    MalformedBlock {
        /// Identifier of the record whose body could not be extracted
        name: String,
    },

    /// A technology identifier was defined more than once
    ///
    /// The first definition wins; this is informational only.
    #[error("Technology '{id}' is already defined, later definition ignored")]
    DuplicateIdentifier {
        /// The duplicated identifier
        id: String,
    },

    /// A prerequisite names a technology that was never parsed
    #[error("Technology '{id}' requires unknown technology '{prerequisite}'")]
    DanglingReference {
        /// The technology carrying the reference
        id: String,
        /// The unknown prerequisite identifier
        prerequisite: String,
    },

    /// A script or localisation file could not be read
    #[error("Cannot read source file {path}: {reason}")]
    UnreadableSource {
        /// Path of the unreadable file
        path: String,
        /// Underlying I/O failure
        reason: String,
    },

    /// The successor graph contains a cycle
    #[error("Circular dependency detected: {cycle}")]
    CyclicDependency {
        /// Cycle rendered as `A -> B -> A`
        cycle: String,
    },

    /// Configuration file missing
    #[error("Configuration file {path} not found")]
    ConfigNotFound {
        /// Path that was looked up
        path: String,
    },

    /// Configuration is incomplete or inconsistent
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// Configuration file is not valid TOML
    #[error("Invalid configuration file syntax in {file}")]
    ConfigParseError {
        /// Path to the configuration file
        file: String,
        /// Parser message
        reason: String,
    },

    /// A technology requested on the command line does not exist
    #[error("Technology '{id}' not found")]
    TechNotFound {
        /// The requested identifier
        id: String,
    },

    /// A generated localisation file could not be written
    #[error("Failed to write output file {path}")]
    OutputWriteError {
        /// Destination path
        path: String,
        /// Underlying I/O failure
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic error for cases not covered by specific variants
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

impl Clone for TechTreeError {
    fn clone(&self) -> Self {
        match self {
            Self::MalformedBlock { name } => Self::MalformedBlock { name: name.clone() },
            Self::DuplicateIdentifier { id } => Self::DuplicateIdentifier { id: id.clone() },
            Self::DanglingReference { id, prerequisite } => Self::DanglingReference {
                id: id.clone(),
                prerequisite: prerequisite.clone(),
            },
            Self::UnreadableSource { path, reason } => Self::UnreadableSource {
                path: path.clone(),
                reason: reason.clone(),
            },
            Self::CyclicDependency { cycle } => Self::CyclicDependency { cycle: cycle.clone() },
            Self::ConfigNotFound { path } => Self::ConfigNotFound { path: path.clone() },
            Self::ConfigError { message } => Self::ConfigError { message: message.clone() },
            Self::ConfigParseError { file, reason } => Self::ConfigParseError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::TechNotFound { id } => Self::TechNotFound { id: id.clone() },
            Self::OutputWriteError { path, reason } => Self::OutputWriteError {
                path: path.clone(),
                reason: reason.clone(),
            },
            // io::Error is not Clone; keep kind and message
            Self::IoError(e) => Self::IoError(std::io::Error::new(e.kind(), e.to_string())),
            Self::Other { message } => Self::Other { message: message.clone() },
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// Combines a [`TechTreeError`] with an optional suggestion and optional
/// details. This is what the CLI prints when a command fails.
///
/// # Examples
///
/// ```rust,no_run
/// use techtree_cli::core::{ErrorContext, TechTreeError};
///
/// let context = ErrorContext::new(TechTreeError::TechNotFound { id: "tech_lasers_9".into() })
///     .with_suggestion("Run 'techtree stats' to check what was scanned")
///     .with_details("Identifiers are case-sensitive");
///
/// println!("{}", context);
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: TechTreeError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: TechTreeError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    ///
    /// Suggestions are displayed in green in the terminal.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    ///
    /// Details are displayed in yellow in the terminal.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
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

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Known [`TechTreeError`] variants get tailored suggestions; I/O and TOML
/// errors are mapped onto the closest variant; anything else is wrapped in
/// [`TechTreeError::Other`] with its full cause chain.
///
/// # Examples
///
/// ```rust,no_run
/// use techtree_cli::core::user_friendly_error;
///
/// let error = anyhow::anyhow!("Something went wrong");
/// let ctx = user_friendly_error(error);
/// ctx.display();
/// ```
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(ctx) = error.downcast_ref::<ErrorContext>() {
        return ErrorContext {
            error: ctx.error.clone(),
            suggestion: ctx.suggestion.clone(),
            details: ctx.details.clone(),
        };
    }

    if let Some(tt_error) = error.downcast_ref::<TechTreeError>() {
        return create_error_context(tt_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(TechTreeError::IoError(std::io::Error::new(
                    io_error.kind(),
                    io_error.to_string(),
                )))
                .with_suggestion("Check that the output directory is writable")
                .with_details("The generator could not access a file it needs");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(TechTreeError::IoError(std::io::Error::new(
                    io_error.kind(),
                    io_error.to_string(),
                )))
                .with_suggestion("Check the paths in techtree.toml");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return create_error_context(TechTreeError::ConfigParseError {
            file: "techtree.toml".to_string(),
            reason: toml_error.to_string(),
        });
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();
    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(TechTreeError::Other {
        message,
    })
    .with_suggestion("Run the command again with --verbose for more information")
}

fn create_error_context(error: TechTreeError) -> ErrorContext {
    match &error {
        TechTreeError::ConfigNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Create techtree.toml next to the executable or pass --config <PATH>")
            .with_details("The [paths] section must set base_game_path and mod_folder_path"),

        TechTreeError::ConfigError { .. } => ErrorContext::new(error)
            .with_suggestion("Check the [paths] section of techtree.toml"),

        TechTreeError::ConfigParseError { reason, .. } => {
            let details = reason.clone();
            ErrorContext::new(error)
                .with_suggestion("Check the TOML syntax: quotes, brackets and section headers")
                .with_details(details)
        }

        TechTreeError::TechNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Identifiers are case-sensitive; run 'techtree stats' to see how many technologies were scanned")
            .with_details("Only technologies from the base game and included mods are known"),

        TechTreeError::OutputWriteError { reason, .. } => {
            let details = reason.clone();
            ErrorContext::new(error)
                .with_suggestion("Check that the output directory is writable or choose another with --output")
                .with_details(details)
        }

        _ => ErrorContext::new(error),
    }
}
