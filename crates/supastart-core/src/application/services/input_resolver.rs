//! Input Resolver - "argument wins; otherwise ask; otherwise default".
//!
//! Prompts are asked exactly once and never re-validated. If the prompt
//! channel fails (no TTY, closed stdin, terminal error) the default answer is
//! used, so the resolver itself never fails.

use tracing::{debug, instrument, warn};

use crate::{
    application::ports::Prompter,
    domain::{DEFAULT_PROJECT_NAME, ProjectName},
};

const NAME_PROMPT: &str = "What is your project named?";
const VCS_PROMPT: &str = "Initialize a git repository?";

pub struct InputResolver {
    prompter: Box<dyn Prompter>,
    default_name: ProjectName,
}

impl InputResolver {
    /// `default_name` falls back to `next-supabase-starter` when empty.
    pub fn new(prompter: Box<dyn Prompter>, default_name: &str) -> Self {
        let default_name = ProjectName::new(default_name).unwrap_or_else(|_| {
            warn!("Empty default project name configured, using {DEFAULT_PROJECT_NAME}");
            ProjectName::fallback()
        });
        Self {
            prompter,
            default_name,
        }
    }

    pub fn default_name(&self) -> &ProjectName {
        &self.default_name
    }

    /// Resolve the project name.
    ///
    /// A non-empty argument is used verbatim and the prompt is never shown.
    /// Interactive input is trimmed; empty input means the default.
    #[instrument(skip(self))]
    pub fn resolve_project_name(&self, requested: Option<&str>) -> ProjectName {
        if let Some(name) = requested.and_then(|raw| ProjectName::new(raw).ok()) {
            debug!("Using project name from arguments");
            return name;
        }

        let answer = match self
            .prompter
            .ask_text(NAME_PROMPT, self.default_name.as_str())
        {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "Prompt unavailable, using default project name");
                return self.default_name.clone();
            }
        };

        ProjectName::new(answer.trim()).unwrap_or_else(|_| self.default_name.clone())
    }

    /// Ask whether to initialize version control. Defaults to yes.
    #[instrument(skip(self))]
    pub fn resolve_initialize_vcs(&self) -> bool {
        match self.prompter.ask_confirm(VCS_PROMPT, true) {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "Prompt unavailable, initializing git by default");
                true
            }
        }
    }
}
