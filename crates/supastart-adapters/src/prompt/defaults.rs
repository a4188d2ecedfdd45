use supastart_core::{application::ports::Prompter, error::SupastartResult};

/// Answers every question with its default. Used for `--yes` style runs
/// and builds without the `interactive` feature.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultsPrompter;

impl Prompter for DefaultsPrompter {
    fn ask_text(&self, _prompt: &str, default: &str) -> SupastartResult<String> {
        Ok(default.to_string())
    }

    fn ask_confirm(&self, _prompt: &str, default: bool) -> SupastartResult<bool> {
        Ok(default)
    }
}
