//! Application layer errors.
//!
//! These errors represent failures talking to the outside world (registry,
//! child processes, template transport, prompts), not domain invariants.
//! Domain invariant errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while orchestrating external collaborators.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The package registry could not be reached.
    #[error("Registry unavailable: {reason}")]
    RegistryUnavailable { reason: String },

    /// The registry answered, but not with usable version metadata.
    #[error("Malformed registry response: {reason}")]
    MalformedRegistryResponse { reason: String },

    /// A child process could not be started at all.
    #[error("Could not start `{command}`: {reason}")]
    CommandSpawn { command: String, reason: String },

    /// A child process ran and exited unsuccessfully.
    #[error("`{command}` exited with status {code}")]
    CommandFailed { command: String, code: i32 },

    /// A child process was terminated by a signal.
    #[error("`{command}` was terminated before it could finish")]
    CommandTerminated { command: String },

    /// The template could not be materialized.
    #[error("Failed to fetch template from {source_url}: {reason}")]
    TemplateFetch { source_url: String, reason: String },

    /// Destination exists with content and overwriting is disabled.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// The project directory is missing after the clone.
    #[error("Project directory {path} does not exist")]
    DirectoryMissing { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// No interactive prompt channel could be used.
    #[error("Prompt unavailable: {reason}")]
    PromptUnavailable { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::RegistryUnavailable { .. } | Self::MalformedRegistryResponse { .. } => vec![
                "The update check is advisory and was skipped".into(),
                "Pass --skip-update-check to avoid the request entirely".into(),
            ],
            Self::CommandSpawn { command, .. } => vec![
                format!("Could not run: {}", command),
                "Ensure the program is installed and in your PATH".into(),
            ],
            Self::CommandFailed { command, .. } => vec![
                format!("Command failed: {}", command),
                "Check the command output above for details".into(),
            ],
            Self::CommandTerminated { .. } => vec!["The command was interrupted".into()],
            Self::TemplateFetch { source_url, .. } => vec![
                format!("Could not fetch {}", source_url),
                "Check your network connection".into(),
                "Ensure git is installed and in your PATH".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
                "Or move it aside automatically with template.force = true".into(),
            ],
            Self::DirectoryMissing { path } => vec![
                format!("Expected the clone to create {}", path.display()),
                "The template may be empty or the clone was interrupted".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::PromptUnavailable { .. } => vec![
                "Pass the project name as the first argument".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RegistryUnavailable { .. }
            | Self::MalformedRegistryResponse { .. }
            | Self::CommandSpawn { .. }
            | Self::CommandFailed { .. }
            | Self::CommandTerminated { .. }
            | Self::TemplateFetch { .. } => ErrorCategory::External,
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::DirectoryMissing { .. } | Self::FilesystemError { .. } => {
                ErrorCategory::Internal
            }
            Self::PromptUnavailable { .. } => ErrorCategory::External,
        }
    }
}
