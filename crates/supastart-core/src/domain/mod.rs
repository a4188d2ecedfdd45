//! Domain layer: pure types describing one provisioning run.
//!
//! Nothing in here performs I/O. Network, processes, prompts, and the
//! filesystem are reached only through the ports in `crate::application`.

pub mod error;
pub mod pipeline;
pub mod project;
pub mod validation;
pub mod version;

pub use error::{DomainError, ErrorCategory};
pub use pipeline::{
    FailurePolicy, PipelineOutcome, PipelineStep, ProvisioningReport, StepRecord, StepStatus,
};
pub use project::{DEFAULT_PROJECT_NAME, ProjectName, RunContext};
pub use validation::DomainValidator;
pub use version::{VersionStatus, VersionVerdict};
