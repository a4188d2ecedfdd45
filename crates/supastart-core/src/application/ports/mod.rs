//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `supastart-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `VersionRegistry`: published-version lookup
//!   - `Prompter`: interactive questions
//!   - `CommandRunner`: child processes (install, git, relaunch)
//!   - `TemplateFetcher`: template transport
//!   - `Filesystem`: existence checks and cleanup
//!   - `PipelineObserver`: progress rendering
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    CommandRunner, CommandSpec, Filesystem, PipelineObserver, Prompter, SilentObserver,
    TemplateFetcher, VersionRegistry,
};
