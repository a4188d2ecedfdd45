//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the workflow needs from external systems.
//! The `supastart-adapters` crate provides implementations.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::{PipelineStep, ProjectName, StepStatus};
use crate::error::SupastartResult;

/// Port for the package registry that publishes this tool.
///
/// Implemented by:
/// - `supastart_adapters::registry::HttpRegistry` (production)
/// - `supastart_adapters::registry::StaticRegistry` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait VersionRegistry: Send + Sync {
    /// Fetch the latest published version string of `package`.
    fn latest_version(&self, package: &str) -> SupastartResult<String>;
}

/// Capability for asking the user questions.
///
/// Implemented by:
/// - `supastart_adapters::prompt::DialoguerPrompter` (terminal)
/// - `supastart_adapters::prompt::DefaultsPrompter` (non-interactive, CI)
/// - `supastart_adapters::prompt::ScriptedPrompter` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Prompter: Send + Sync {
    /// Ask for free text, offering `default`.
    fn ask_text(&self, prompt: &str, default: &str) -> SupastartResult<String>;

    /// Ask a yes/no question, offering `default`.
    fn ask_confirm(&self, prompt: &str, default: bool) -> SupastartResult<bool>;
}

/// An external command to run with inherited stdio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: Vec<(String, String)>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Port for running child processes.
///
/// Output is streamed to the user, never captured. Implementations return
/// the exit code; `Err` means the process could not be started or did not
/// exit normally.
///
/// Implemented by:
/// - `supastart_adapters::process::SystemCommandRunner` (production)
/// - `supastart_adapters::process::RecordingRunner` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    fn run(&self, spec: &CommandSpec) -> SupastartResult<i32>;
}

/// Port for materializing a remote template into a fresh directory.
///
/// Implementations copy files only: no template history, no cache.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateFetcher: Send + Sync {
    fn fetch(&self, source: &str, destination: &Path) -> SupastartResult<()>;
}

/// Port for the few filesystem queries the pipeline makes itself.
///
/// Implemented by:
/// - `supastart_adapters::filesystem::LocalFilesystem` (production)
/// - `supastart_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// `true` if the directory has no entries.
    fn is_empty_dir(&self, path: &Path) -> SupastartResult<bool>;

    /// Move a file or directory to `to`. Fails if `to` exists.
    fn rename(&self, from: &Path, to: &Path) -> SupastartResult<()>;
}

/// Receives progress notifications while the pipeline runs.
///
/// The CLI renders these; the core never prints.
pub trait PipelineObserver {
    fn step_started(&self, step: PipelineStep);

    fn step_finished(&self, step: PipelineStep, status: &StepStatus);

    /// Called by the `ReportCompletion` step.
    fn completed(&self, project: &ProjectName, next_steps: &[String]);
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl PipelineObserver for SilentObserver {
    fn step_started(&self, _step: PipelineStep) {}

    fn step_finished(&self, _step: PipelineStep, _status: &StepStatus) {}

    fn completed(&self, _project: &ProjectName, _next_steps: &[String]) {}
}
