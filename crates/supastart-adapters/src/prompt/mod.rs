//! Prompt adapters.

mod defaults;
#[cfg(feature = "interactive")]
mod interactive;
mod scripted;

pub use defaults::DefaultsPrompter;
#[cfg(feature = "interactive")]
pub use interactive::DialoguerPrompter;
pub use scripted::ScriptedPrompter;
