//! Template transport adapters.

mod git;
mod memory;

pub use git::GitTemplateFetcher;
pub use memory::MemoryTemplateFetcher;
