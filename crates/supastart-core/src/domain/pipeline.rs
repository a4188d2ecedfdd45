//! Provisioning pipeline vocabulary: steps, failure policies, and the report
//! a run produces.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::project::ProjectName;

/// What happens to the rest of the pipeline when a step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailurePolicy {
    /// Abort remaining steps and report failure.
    Fatal,
    /// Log a warning and continue.
    Recoverable,
}

/// The fixed, ordered steps of a provisioning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PipelineStep {
    CloneTemplate,
    ChangeDirectory,
    InstallDependencies,
    InitializeVcs,
    ReportCompletion,
}

impl PipelineStep {
    /// Execution order.
    pub const ALL: [PipelineStep; 5] = [
        Self::CloneTemplate,
        Self::ChangeDirectory,
        Self::InstallDependencies,
        Self::InitializeVcs,
        Self::ReportCompletion,
    ];

    pub fn policy(self) -> FailurePolicy {
        match self {
            Self::CloneTemplate | Self::ChangeDirectory | Self::InstallDependencies => {
                FailurePolicy::Fatal
            }
            Self::InitializeVcs | Self::ReportCompletion => FailurePolicy::Recoverable,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CloneTemplate => "clone-template",
            Self::ChangeDirectory => "change-directory",
            Self::InstallDependencies => "install-dependencies",
            Self::InitializeVcs => "initialize-vcs",
            Self::ReportCompletion => "report-completion",
        }
    }

    /// Human phrasing used in failure messages.
    pub fn description(self) -> &'static str {
        match self {
            Self::CloneTemplate => "cloning the starter template",
            Self::ChangeDirectory => "entering the project directory",
            Self::InstallDependencies => "installing dependencies",
            Self::InitializeVcs => "initializing git",
            Self::ReportCompletion => "reporting completion",
        }
    }
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a single step ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StepStatus {
    Succeeded,
    /// Deliberately not performed (e.g. the user declined).
    Skipped { reason: String },
    /// Failed under a recoverable policy.
    Warned { cause: String },
    /// Failed under a fatal policy.
    Failed { cause: String },
}

impl StepStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub step: PipelineStep,
    pub status: StepStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PipelineOutcome {
    Completed,
    Aborted { step: PipelineStep, cause: String },
}

/// Everything a provisioning run did, in order.
#[derive(Debug, Clone, Serialize)]
pub struct ProvisioningReport {
    pub project: ProjectName,
    pub project_dir: PathBuf,
    pub steps: Vec<StepRecord>,
    pub outcome: PipelineOutcome,
    /// Follow-up commands, populated only when the run completed.
    pub next_steps: Vec<String>,
}

impl ProvisioningReport {
    pub fn is_success(&self) -> bool {
        self.outcome == PipelineOutcome::Completed
    }

    pub fn status_of(&self, step: PipelineStep) -> Option<&StepStatus> {
        self.steps
            .iter()
            .find(|r| r.step == step)
            .map(|r| &r.status)
    }

    pub fn ran(&self, step: PipelineStep) -> bool {
        self.status_of(step).is_some()
    }

    /// `true` when the run aborted after the project directory was created,
    /// leaving a half-provisioned project behind.
    pub fn is_partial(&self) -> bool {
        !self.is_success()
            && matches!(
                self.status_of(PipelineStep::CloneTemplate),
                Some(StepStatus::Succeeded)
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(steps: Vec<StepRecord>, outcome: PipelineOutcome) -> ProvisioningReport {
        ProvisioningReport {
            project: ProjectName::fallback(),
            project_dir: PathBuf::from("next-supabase-starter"),
            steps,
            outcome,
            next_steps: vec![],
        }
    }

    #[test]
    fn policies_match_step_kind() {
        assert_eq!(PipelineStep::CloneTemplate.policy(), FailurePolicy::Fatal);
        assert_eq!(PipelineStep::ChangeDirectory.policy(), FailurePolicy::Fatal);
        assert_eq!(
            PipelineStep::InstallDependencies.policy(),
            FailurePolicy::Fatal
        );
        assert_eq!(
            PipelineStep::InitializeVcs.policy(),
            FailurePolicy::Recoverable
        );
    }

    #[test]
    fn steps_are_declared_in_execution_order() {
        let mut sorted = PipelineStep::ALL;
        sorted.sort();
        assert_eq!(sorted, PipelineStep::ALL);
    }

    #[test]
    fn install_failure_after_clone_is_partial() {
        let r = report(
            vec![
                StepRecord {
                    step: PipelineStep::CloneTemplate,
                    status: StepStatus::Succeeded,
                },
                StepRecord {
                    step: PipelineStep::ChangeDirectory,
                    status: StepStatus::Succeeded,
                },
                StepRecord {
                    step: PipelineStep::InstallDependencies,
                    status: StepStatus::Failed {
                        cause: "exit 1".into(),
                    },
                },
            ],
            PipelineOutcome::Aborted {
                step: PipelineStep::InstallDependencies,
                cause: "exit 1".into(),
            },
        );
        assert!(r.is_partial());
        assert!(!r.ran(PipelineStep::InitializeVcs));
    }

    #[test]
    fn clone_failure_is_not_partial() {
        let r = report(
            vec![StepRecord {
                step: PipelineStep::CloneTemplate,
                status: StepStatus::Failed {
                    cause: "network".into(),
                },
            }],
            PipelineOutcome::Aborted {
                step: PipelineStep::CloneTemplate,
                cause: "network".into(),
            },
        );
        assert!(!r.is_partial());
    }
}
