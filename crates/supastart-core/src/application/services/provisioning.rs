//! Provisioning Pipeline - the main application orchestrator.
//!
//! This service runs the fixed sequence of side effects that turns a
//! project name into a ready-to-run project:
//! 1. Clone the template into `<base>/<name>`
//! 2. Enter the project directory
//! 3. Install dependencies
//! 4. Optionally initialize git with one commit
//! 5. Report completion
//!
//! The working directory is explicit state of the run; the process-wide
//! current directory is never changed.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{CommandRunner, CommandSpec, Filesystem, PipelineObserver, TemplateFetcher},
        services::{InputResolver, StepExecutor, step_executor::StepAbort},
    },
    domain::{
        DomainValidator, PipelineOutcome, PipelineStep, ProjectName, ProvisioningReport,
        RunContext, StepStatus,
    },
    error::{SupastartError, SupastartResult},
};

/// Upper bound on `<dir>.backup-N` candidates tried before giving up.
const MAX_BACKUPS: usize = 100;

/// Knobs for one pipeline instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Remote template location.
    pub template_url: String,
    /// Move an occupied destination aside before cloning instead of refusing.
    pub overwrite_existing: bool,
    /// Program used for `install` and `dev`.
    pub package_manager: String,
    pub commit_message: String,
    /// Directory the project directory is created in.
    pub base_dir: PathBuf,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            template_url: "https://github.com/Mohamed-4rarh/next-supabase-starter.git".into(),
            overwrite_existing: true,
            package_manager: "pnpm".into(),
            commit_message: "Initial commit".into(),
            base_dir: PathBuf::from("."),
        }
    }
}

/// Working-directory context threaded through the steps.
#[derive(Debug, Clone)]
struct WorkingDirectory {
    current: PathBuf,
}

impl WorkingDirectory {
    fn enter(&mut self, dir: &Path) {
        self.current = dir.to_path_buf();
    }

    fn path(&self) -> &Path {
        &self.current
    }
}

pub struct ProvisioningPipeline {
    fetcher: Box<dyn TemplateFetcher>,
    runner: Box<dyn CommandRunner>,
    filesystem: Box<dyn Filesystem>,
    settings: PipelineSettings,
}

impl ProvisioningPipeline {
    pub fn new(
        fetcher: Box<dyn TemplateFetcher>,
        runner: Box<dyn CommandRunner>,
        filesystem: Box<dyn Filesystem>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            fetcher,
            runner,
            filesystem,
            settings,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Run every step in order and report what happened.
    ///
    /// Never returns an error: fatal step failures end up in
    /// [`ProvisioningReport::outcome`].
    #[instrument(
        skip_all,
        fields(
            project = %ctx.resolved_name(),
            requested = ctx.requested_name().unwrap_or(""),
            version = %ctx.current_version(),
            base_dir = %self.settings.base_dir.display()
        )
    )]
    pub fn run(
        &self,
        ctx: &mut RunContext,
        resolver: &InputResolver,
        observer: &dyn PipelineObserver,
    ) -> ProvisioningReport {
        let project_dir = self.settings.base_dir.join(ctx.resolved_name().as_str());
        let mut executor = StepExecutor::new(observer);

        let outcome = match self.execute(ctx, resolver, observer, &project_dir, &mut executor) {
            Ok(()) => {
                info!("Provisioning completed");
                PipelineOutcome::Completed
            }
            Err(StepAbort { step, cause }) => {
                warn!(%step, %cause, "Provisioning aborted");
                PipelineOutcome::Aborted { step, cause }
            }
        };

        let next_steps = match outcome {
            PipelineOutcome::Completed => self.next_steps(ctx),
            PipelineOutcome::Aborted { .. } => Vec::new(),
        };

        ProvisioningReport {
            project: ctx.resolved_name().clone(),
            project_dir,
            steps: executor.into_records(),
            outcome,
            next_steps,
        }
    }

    fn execute(
        &self,
        ctx: &mut RunContext,
        resolver: &InputResolver,
        observer: &dyn PipelineObserver,
        project_dir: &Path,
        executor: &mut StepExecutor<'_>,
    ) -> Result<(), StepAbort> {
        let mut workdir = WorkingDirectory {
            current: self.settings.base_dir.clone(),
        };

        executor.run(PipelineStep::CloneTemplate, || {
            self.clone_template(ctx.resolved_name(), project_dir)
        })?;

        executor.run(PipelineStep::ChangeDirectory, || {
            self.change_directory(&mut workdir, project_dir)
        })?;

        executor.run(PipelineStep::InstallDependencies, || {
            self.install_dependencies(workdir.path())
        })?;

        // Asked only now that dependencies are in place.
        let wants_vcs = ctx.record_vcs_decision(resolver.resolve_initialize_vcs());
        executor.run(PipelineStep::InitializeVcs, || {
            self.initialize_vcs(workdir.path(), wants_vcs)
        })?;

        let next_steps = self.next_steps(ctx);
        executor.run(PipelineStep::ReportCompletion, || {
            observer.completed(ctx.resolved_name(), &next_steps);
            Ok(StepStatus::Succeeded)
        })?;

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Steps
    // -------------------------------------------------------------------------

    fn clone_template(
        &self,
        name: &ProjectName,
        destination: &Path,
    ) -> SupastartResult<StepStatus> {
        DomainValidator::validate_project_location(name)?;

        if self.filesystem.exists(destination) {
            let reusable =
                self.filesystem.is_dir(destination) && self.filesystem.is_empty_dir(destination)?;
            if !reusable {
                if !self.settings.overwrite_existing {
                    return Err(ApplicationError::ProjectExists {
                        path: destination.to_path_buf(),
                    }
                    .into());
                }
                let backup = self.backup_path(destination)?;
                warn!(
                    path = %destination.display(),
                    backup = %backup.display(),
                    "Destination exists, moving it aside"
                );
                self.filesystem.rename(destination, &backup)?;
            }
        }

        self.fetcher
            .fetch(&self.settings.template_url, destination)?;
        Ok(StepStatus::Succeeded)
    }

    /// First free sibling named `<dir>.backup`, `<dir>.backup-1`, ...
    fn backup_path(&self, destination: &Path) -> SupastartResult<PathBuf> {
        let no_free_name = || -> SupastartError {
            ApplicationError::FilesystemError {
                path: destination.to_path_buf(),
                reason: "no free name to move the existing entry to".into(),
            }
            .into()
        };
        let file_name = destination.file_name().ok_or_else(no_free_name)?;

        (0..MAX_BACKUPS)
            .map(|n| {
                let mut candidate = file_name.to_os_string();
                match n {
                    0 => candidate.push(".backup"),
                    n => candidate.push(format!(".backup-{n}")),
                }
                destination.with_file_name(candidate)
            })
            .find(|candidate| !self.filesystem.exists(candidate))
            .ok_or_else(no_free_name)
    }

    fn change_directory(
        &self,
        workdir: &mut WorkingDirectory,
        project_dir: &Path,
    ) -> SupastartResult<StepStatus> {
        if !self.filesystem.is_dir(project_dir) {
            return Err(ApplicationError::DirectoryMissing {
                path: project_dir.to_path_buf(),
            }
            .into());
        }
        workdir.enter(project_dir);
        Ok(StepStatus::Succeeded)
    }

    fn install_dependencies(&self, workdir: &Path) -> SupastartResult<StepStatus> {
        let spec = CommandSpec::new(&self.settings.package_manager)
            .arg("install")
            .current_dir(workdir);
        self.run_checked(&spec)?;
        Ok(StepStatus::Succeeded)
    }

    fn initialize_vcs(&self, workdir: &Path, wanted: bool) -> SupastartResult<StepStatus> {
        if !wanted {
            return Ok(StepStatus::Skipped {
                reason: "declined by user".into(),
            });
        }

        let commands = [
            CommandSpec::new("git").arg("init"),
            CommandSpec::new("git").args(["add", "."]),
            CommandSpec::new("git").args(["commit", "-m", self.settings.commit_message.as_str()]),
        ];
        for spec in commands {
            self.run_checked(&spec.current_dir(workdir))?;
        }
        Ok(StepStatus::Succeeded)
    }

    /// Run a command and turn a non-zero exit into an error.
    fn run_checked(&self, spec: &CommandSpec) -> SupastartResult<()> {
        match self.runner.run(spec)? {
            0 => Ok(()),
            code => Err(ApplicationError::CommandFailed {
                command: spec.to_string(),
                code,
            }
            .into()),
        }
    }

    fn next_steps(&self, ctx: &RunContext) -> Vec<String> {
        vec![
            format!("cd {}", ctx.resolved_name()),
            format!("{} dev", self.settings.package_manager),
        ]
    }
}
