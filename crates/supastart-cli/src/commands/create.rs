//! The provisioning run: resolve the name, then clone, install, and commit.
//!
//! Responsibility: build the production adapters, hand them to the core
//! pipeline, and render its progress. No business logic lives here.

use std::cell::RefCell;
use std::path::PathBuf;

use indicatif::ProgressBar;
use tracing::{info, instrument};

#[cfg(feature = "interactive")]
use supastart_adapters::DialoguerPrompter;
#[cfg(not(feature = "interactive"))]
use supastart_adapters::DefaultsPrompter;
use supastart_adapters::{GitTemplateFetcher, LocalFilesystem, SystemCommandRunner};
use supastart_core::{
    VERSION,
    application::{
        InputResolver, ProvisioningPipeline,
        ports::{PipelineObserver, Prompter},
    },
    domain::{PipelineOutcome, PipelineStep, ProjectName, RunContext, StepStatus},
};

use crate::{
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute a provisioning run for `requested_name` (or a prompted one).
#[instrument(skip_all, fields(requested = requested_name.as_deref().unwrap_or("")))]
pub fn execute(
    requested_name: Option<String>,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    output.header(&format!("create-next-supabase v{VERSION}"))?;

    let resolver = InputResolver::new(prompter(), &config.project.default_name);
    let name = resolver.resolve_project_name(requested_name.as_deref());
    info!(project = %name, "Project name resolved");

    let mut ctx = RunContext::new(requested_name, name, VERSION);

    let pipeline = ProvisioningPipeline::new(
        Box::new(GitTemplateFetcher::new(Box::new(SystemCommandRunner::new()))),
        Box::new(SystemCommandRunner::new()),
        Box::new(LocalFilesystem::new()),
        config.pipeline_settings(PathBuf::from(".")),
    );

    output.print(&format!("Creating {}...", ctx.resolved_name()))?;
    let observer = ConsoleObserver::new(output);
    let report = pipeline.run(&mut ctx, &resolver, &observer);

    let partial = report.is_partial();
    match report.outcome {
        PipelineOutcome::Completed => Ok(()),
        PipelineOutcome::Aborted { step, cause } => Err(CliError::ProvisioningFailed {
            step,
            cause,
            project_dir: report.project_dir,
            partial,
        }),
    }
}

#[cfg(feature = "interactive")]
fn prompter() -> Box<dyn Prompter> {
    Box::new(DialoguerPrompter::new())
}

#[cfg(not(feature = "interactive"))]
fn prompter() -> Box<dyn Prompter> {
    Box::new(DefaultsPrompter)
}

// ── Progress rendering ────────────────────────────────────────────────────────

/// Renders pipeline progress. Output errors are ignored: a broken stdout
/// must not fail the run.
struct ConsoleObserver<'a> {
    output: &'a OutputManager,
    spinner: RefCell<Option<ProgressBar>>,
}

impl<'a> ConsoleObserver<'a> {
    fn new(output: &'a OutputManager) -> Self {
        Self {
            output,
            spinner: RefCell::new(None),
        }
    }

    fn clear_spinner(&self) {
        if let Some(spinner) = self.spinner.borrow_mut().take() {
            spinner.finish_and_clear();
        }
    }
}

impl PipelineObserver for ConsoleObserver<'_> {
    fn step_started(&self, step: PipelineStep) {
        match step {
            // `git clone --quiet` prints nothing, so a spinner fits.
            PipelineStep::CloneTemplate => {
                *self.spinner.borrow_mut() =
                    Some(self.output.spinner("Cloning the starter template..."));
            }
            // Child output is streamed; no spinner on top of it.
            PipelineStep::InstallDependencies => {
                self.output.info("Installing dependencies...").ok();
            }
            PipelineStep::InitializeVcs => {
                self.output.info("Initializing a git repository...").ok();
            }
            PipelineStep::ChangeDirectory | PipelineStep::ReportCompletion => {}
        }
    }

    fn step_finished(&self, step: PipelineStep, status: &StepStatus) {
        self.clear_spinner();

        let result = match status {
            StepStatus::Succeeded => match step {
                PipelineStep::CloneTemplate => self.output.success("Template cloned"),
                PipelineStep::InstallDependencies => self.output.success("Dependencies installed"),
                PipelineStep::InitializeVcs => self.output.success("Git repository initialized"),
                PipelineStep::ChangeDirectory | PipelineStep::ReportCompletion => Ok(()),
            },
            StepStatus::Skipped { reason } => self
                .output
                .info(&format!("Skipped {} ({reason})", step.description())),
            StepStatus::Warned { cause } => self.output.warning(&format!(
                "Failed {}: {cause}. Continuing without it.",
                step.description()
            )),
            // Reported once by the top-level error handler.
            StepStatus::Failed { .. } => Ok(()),
        };
        result.ok();
    }

    fn completed(&self, project: &ProjectName, next_steps: &[String]) {
        self.output
            .success(&format!("Setup complete! Created {project}"))
            .ok();
        self.output.print("").ok();
        self.output.print("Next steps:").ok();
        for cmd in next_steps {
            self.output.command(cmd).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::GlobalArgs;

    fn quiet_output() -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet: true,
            no_color: true,
            config: None,
            skip_update_check: true,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn spinner_is_cleared_when_step_finishes() {
        let output = quiet_output();
        let observer = ConsoleObserver::new(&output);

        observer.step_started(PipelineStep::CloneTemplate);
        assert!(observer.spinner.borrow().is_some());

        observer.step_finished(PipelineStep::CloneTemplate, &StepStatus::Succeeded);
        assert!(observer.spinner.borrow().is_none());
    }

    #[test]
    fn install_does_not_start_a_spinner() {
        let output = quiet_output();
        let observer = ConsoleObserver::new(&output);
        observer.step_started(PipelineStep::InstallDependencies);
        assert!(observer.spinner.borrow().is_none());
    }
}
