//! Infrastructure adapters for create-next-supabase.
//!
//! This crate implements the ports defined in
//! `supastart-core::application::ports`. Everything that touches the
//! network, child processes, the terminal, or the disk lives here.
//!
//! Each port has a production adapter and a test double:
//!
//! | Port              | Production              | Test double             |
//! |-------------------|-------------------------|-------------------------|
//! | `VersionRegistry` | [`HttpRegistry`]        | [`StaticRegistry`]      |
//! | `CommandRunner`   | [`SystemCommandRunner`] | [`RecordingRunner`]     |
//! | `TemplateFetcher` | [`GitTemplateFetcher`]  | [`MemoryTemplateFetcher`] |
//! | `Filesystem`      | [`LocalFilesystem`]     | [`MemoryFilesystem`]    |
//! | `Prompter`        | `DialoguerPrompter`     | [`ScriptedPrompter`]    |

pub mod filesystem;
pub mod process;
pub mod prompt;
pub mod registry;
pub mod template;

pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::{RecordingRunner, SystemCommandRunner};
#[cfg(feature = "interactive")]
pub use prompt::DialoguerPrompter;
pub use prompt::{DefaultsPrompter, ScriptedPrompter};
pub use registry::{HttpRegistry, StaticRegistry};
pub use template::{GitTemplateFetcher, MemoryTemplateFetcher};
