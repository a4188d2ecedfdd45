//! Terminal prompts via `dialoguer`.

use std::io::IsTerminal;

use dialoguer::{Confirm, Input};

use supastart_core::{
    application::{ApplicationError, ports::Prompter},
    error::SupastartResult,
};

/// Asks on the terminal. Fails with `PromptUnavailable` when stdin is not
/// a TTY, so callers fall back to defaults instead of blocking.
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }

    fn ensure_terminal() -> SupastartResult<()> {
        if std::io::stdin().is_terminal() {
            Ok(())
        } else {
            Err(ApplicationError::PromptUnavailable {
                reason: "stdin is not a terminal".into(),
            }
            .into())
        }
    }
}

fn unavailable(e: dialoguer::Error) -> supastart_core::error::SupastartError {
    ApplicationError::PromptUnavailable {
        reason: e.to_string(),
    }
    .into()
}

impl Prompter for DialoguerPrompter {
    fn ask_text(&self, prompt: &str, default: &str) -> SupastartResult<String> {
        Self::ensure_terminal()?;
        Input::<String>::new()
            .with_prompt(prompt)
            .default(default.to_string())
            .allow_empty(true)
            .interact_text()
            .map_err(unavailable)
    }

    fn ask_confirm(&self, prompt: &str, default: bool) -> SupastartResult<bool> {
        Self::ensure_terminal()?;
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(unavailable)
    }
}
