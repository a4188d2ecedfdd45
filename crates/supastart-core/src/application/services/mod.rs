//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the
//! high-level workflow: check for updates, resolve input, provision.

pub mod input_resolver;
pub mod provisioning;
pub mod step_executor;
pub mod update_gate;
pub mod version_oracle;

pub use input_resolver::InputResolver;
pub use provisioning::{PipelineSettings, ProvisioningPipeline};
pub use step_executor::{StepAbort, StepExecutor};
pub use update_gate::{GateDecision, RELAUNCH_GUARD_ENV, RelaunchOutcome, SelfUpdateGate};
pub use version_oracle::VersionOracle;
