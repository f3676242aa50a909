//! Error handling module for the console
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Pipeline failures have their own taxonomy in [`crate::pipeline::PipelineError`];
//! this type covers everything around them (terminal, configuration, fatal aborts).

use thiserror::Error;

use crate::pipeline::PipelineError;

/// Main error type for the console
#[derive(Error, Debug)]
pub enum ShellError {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors (loading, parsing)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors (config values, menu definitions)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A pipeline failure that was not handled locally
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Resource exhaustion; the console cannot continue
    #[error("Fatal error: {0}")]
    Fatal(String),
}

/// Result type alias for console operations
pub type Result<T> = std::result::Result<T, ShellError>;

impl ShellError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a fatal error
    pub fn fatal(msg: impl Into<String>) -> Self {
        Self::Fatal(msg.into())
    }
}
