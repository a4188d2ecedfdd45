//! Step Executor - one failure boundary around every pipeline step.

use tracing::{error, info, warn};

use crate::{
    application::ports::PipelineObserver,
    domain::{DomainValidator, FailurePolicy, PipelineStep, StepRecord, StepStatus},
    error::SupastartResult,
};

/// A fatal step failure that stops the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepAbort {
    pub step: PipelineStep,
    pub cause: String,
}

/// Runs steps, classifies their failures by policy, and keeps the history.
pub struct StepExecutor<'o> {
    observer: &'o dyn PipelineObserver,
    records: Vec<StepRecord>,
}

impl<'o> StepExecutor<'o> {
    pub fn new(observer: &'o dyn PipelineObserver) -> Self {
        Self {
            observer,
            records: Vec::new(),
        }
    }

    /// Run `step`.
    ///
    /// Errors are converted according to the step's [`FailurePolicy`]:
    /// fatal errors are returned as [`StepAbort`], recoverable ones become a
    /// `Warned` record and the pipeline continues.
    pub fn run<F>(&mut self, step: PipelineStep, work: F) -> Result<(), StepAbort>
    where
        F: FnOnce() -> SupastartResult<StepStatus>,
    {
        let status = match DomainValidator::validate_step_order(step, &self.records) {
            Ok(()) => {
                self.observer.step_started(step);
                Self::classify(step, work())
            }
            Err(e) => StepStatus::Failed {
                cause: e.to_string(),
            },
        };

        self.observer.step_finished(step, &status);
        self.records.push(StepRecord {
            step,
            status: status.clone(),
        });

        match status {
            StepStatus::Failed { cause } => Err(StepAbort { step, cause }),
            _ => Ok(()),
        }
    }

    fn classify(step: PipelineStep, result: SupastartResult<StepStatus>) -> StepStatus {
        match result {
            Ok(status) => {
                info!(%step, "Step finished");
                status
            }
            Err(e) => match step.policy() {
                FailurePolicy::Fatal => {
                    error!(%step, error = %e, "Step failed");
                    StepStatus::Failed {
                        cause: e.to_string(),
                    }
                }
                FailurePolicy::Recoverable => {
                    warn!(%step, error = %e, "Step failed, continuing");
                    StepStatus::Warned {
                        cause: e.to_string(),
                    }
                }
            },
        }
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<StepRecord> {
        self.records
    }
}
