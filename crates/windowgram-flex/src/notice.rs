//! Notices produced by flex commands.
//!
//! A warning means the command ran but the result may surprise (lost panes,
//! a change too small to register). An error means the command was rejected
//! and the windowgram was left untouched.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use windowgram_core::Windowgram;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

/// One message from one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlexNotice {
    pub severity: Severity,
    pub message: String,
}

impl FlexNotice {
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl fmt::Display for FlexNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A command refused its arguments or the windowgram it was given.
///
/// Commands return this through `?`; the dispatcher turns it into an error
/// notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Shorthand for an early `return ValidationError::fail(..)`.
    pub fn fail<T>(message: impl Into<String>) -> Result<T, Self> {
        Err(Self::new(message))
    }
}

impl From<ValidationError> for FlexNotice {
    fn from(err: ValidationError) -> Self {
        Self::error(err.message)
    }
}

/// The new windowgram of a successful command, plus any warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub windowgram: Windowgram,
    pub warnings: Vec<String>,
}

impl Applied {
    #[must_use]
    pub fn new(windowgram: Windowgram) -> Self {
        Self {
            windowgram,
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_warning(mut self, message: impl Into<String>) -> Self {
        self.warnings.push(message.into());
        self
    }
}

/// Result type every command handler returns.
pub type FlexResult = Result<Applied, ValidationError>;
