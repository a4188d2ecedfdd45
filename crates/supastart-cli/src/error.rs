//! Error handling for the create-next-supabase binary.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use supastart_core::domain::PipelineStep;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    // ── Pipeline ───────────────────────────────────────────────────────────
    /// A fatal step stopped the provisioning run.
    #[error("Setup failed while {}: {cause}", .step.description())]
    ProvisioningFailed {
        step: PipelineStep,
        cause: String,
        project_dir: PathBuf,
        /// The project directory was created before the failure.
        partial: bool,
    },

    /// The latest version could not be started.
    #[error("Could not start the latest version: {reason}")]
    RelaunchFailed { command: String, reason: String },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read or parsed.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ProvisioningFailed {
                step,
                project_dir,
                partial,
                ..
            } => {
                let mut suggestions = match step {
                    PipelineStep::CloneTemplate => vec![
                        "Check your network connection".into(),
                        "Ensure git is installed and in your PATH".into(),
                    ],
                    PipelineStep::ChangeDirectory => {
                        vec!["The template did not produce a project directory".into()]
                    }
                    PipelineStep::InstallDependencies => vec![
                        "Ensure the package manager is installed and in your PATH".into(),
                        "Check the install output above for details".into(),
                    ],
                    _ => Vec::new(),
                };
                if *partial {
                    suggestions.push(format!(
                        "A partially set up project was left at {}",
                        project_dir.display()
                    ));
                    suggestions.push(format!(
                        "Remove it and run again: rm -rf {}",
                        project_dir.display()
                    ));
                }
                suggestions
            }

            Self::RelaunchFailed { command, .. } => vec![
                format!("Run the latest version manually: {command}"),
                "Or skip the check: --skip-update-check".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {message}"),
                format!(
                    "Check your config file at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Environment overrides use SUPASTART_<SECTION>__<KEY>".into(),
            ],

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ProvisioningFailed { .. } => ErrorCategory::Failure,
            Self::RelaunchFailed { .. } => ErrorCategory::Failure,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError { .. } => ErrorCategory::Failure,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | Failure       |  1   |
    /// | Configuration |  4   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::Failure => 1,
            ErrorCategory::Configuration => 4,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            "Error:".red().bold()
        ));
        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`].
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\n✗ Error: {self}\n"));

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Failure => tracing::error!("{}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A step, relaunch, or system call failed.
    Failure,
    Configuration,
}
