//! Application layer.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (gate, resolver, pipeline)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business rules itself. Invariants live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    GateDecision, InputResolver, PipelineSettings, ProvisioningPipeline, RELAUNCH_GUARD_ENV,
    RelaunchOutcome, SelfUpdateGate, StepExecutor, VersionOracle,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    CommandRunner, CommandSpec, Filesystem, PipelineObserver, Prompter, TemplateFetcher,
    VersionRegistry,
};

pub use error::ApplicationError;
