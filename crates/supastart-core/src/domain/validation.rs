use std::path::{Component, Path};

use crate::domain::{
    error::DomainError,
    pipeline::{PipelineStep, StepRecord, StepStatus},
    project::ProjectName,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    /// Enforce that `step` only runs once the step it depends on succeeded.
    ///
    /// Directory context is a precondition for installing, and the clone is a
    /// precondition for entering the directory.
    pub fn validate_step_order(
        step: PipelineStep,
        history: &[StepRecord],
    ) -> Result<(), DomainError> {
        let Some(requires) = prerequisite(step) else {
            return Ok(());
        };

        let satisfied = history
            .iter()
            .any(|r| r.step == requires && r.status == StepStatus::Succeeded);

        if satisfied {
            Ok(())
        } else {
            Err(DomainError::StepOutOfOrder {
                step: step.as_str(),
                requires: requires.as_str(),
            })
        }
    }

    /// Enforce that `name` resolves to a directory strictly below the base
    /// directory it is joined onto.
    ///
    /// `.`, `..`, absolute paths and anything climbing out through `..` would
    /// make the base directory (or one of its ancestors) the clone target.
    pub fn validate_project_location(name: &ProjectName) -> Result<(), DomainError> {
        let path: &Path = name.as_ref();
        let escapes = path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
        let names_child = matches!(path.components().next_back(), Some(Component::Normal(_)));

        if escapes || !names_child {
            return Err(DomainError::InvalidProjectName {
                name: name.to_string(),
                reason: "it must name a new directory inside the current one".into(),
            });
        }
        Ok(())
    }
}

fn prerequisite(step: PipelineStep) -> Option<PipelineStep> {
    match step {
        PipelineStep::CloneTemplate => None,
        PipelineStep::ChangeDirectory => Some(PipelineStep::CloneTemplate),
        PipelineStep::InstallDependencies => Some(PipelineStep::ChangeDirectory),
        PipelineStep::InitializeVcs | PipelineStep::ReportCompletion => {
            Some(PipelineStep::InstallDependencies)
        }
    }
}
