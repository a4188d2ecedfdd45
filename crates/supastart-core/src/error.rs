//! Unified error handling for the provisioning core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SupastartError {
    /// Errors from the domain layer (invariant violations).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (external collaborators).
    #[error("{0}")]
    Application(#[from] ApplicationError),
}

impl SupastartError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    /// A collaborator outside this process (network, child process, tty).
    External,
    Internal,
}

/// Convenient result type alias.
pub type SupastartResult<T> = Result<T, SupastartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_errors_display_without_prefix() {
        let err: SupastartError = ApplicationError::CommandFailed {
            command: "pnpm install".into(),
            code: 1,
        }
        .into();
        assert_eq!(err.to_string(), "`pnpm install` exited with status 1");
        assert_eq!(err.category(), ErrorCategory::External);
    }

    #[test]
    fn domain_validation_maps_to_validation() {
        let err: SupastartError = DomainError::InvalidProjectName {
            name: String::new(),
            reason: "empty".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.suggestions().is_empty());
    }
}
