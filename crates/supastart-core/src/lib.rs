//! Supastart Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for
//! `create-next-supabase`, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        supastart-cli (CLI binary)       │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (SelfUpdateGate, InputResolver,        │
//! │   ProvisioningPipeline, StepExecutor)   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Registry, Prompter, Runner, Fetcher)   │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   supastart-adapters (Infrastructure)   │
//! │ (HttpRegistry, SystemCommandRunner, ...)│
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ProjectName, VersionVerdict, Steps)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use supastart_core::prelude::*;
//!
//! // 1. Gate: may hand over to a newer published version
//! let oracle = VersionOracle::new(registry, "create-next-supabase");
//! let gate = SelfUpdateGate::new(oracle, runner, launcher);
//! if let GateDecision::RelaunchAndExit { .. } = gate.decide(VERSION) {
//!     std::process::exit(gate.relaunch(&args).exit_code());
//! }
//!
//! // 2. Resolve the name, then provision
//! let resolver = InputResolver::new(prompter, DEFAULT_PROJECT_NAME);
//! let name = resolver.resolve_project_name(None);
//! let mut ctx = RunContext::new(None, name, VERSION);
//! let report = pipeline.run(&mut ctx, &resolver, &SilentObserver);
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GateDecision, InputResolver, PipelineSettings, ProvisioningPipeline, RelaunchOutcome,
        SelfUpdateGate, VersionOracle,
        ports::{
            CommandRunner, CommandSpec, Filesystem, PipelineObserver, Prompter, SilentObserver,
            TemplateFetcher, VersionRegistry,
        },
    };
    pub use crate::domain::{
        DEFAULT_PROJECT_NAME, FailurePolicy, PipelineOutcome, PipelineStep, ProjectName,
        ProvisioningReport, RunContext, StepStatus, VersionStatus, VersionVerdict,
    };
    pub use crate::error::{SupastartError, SupastartResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
