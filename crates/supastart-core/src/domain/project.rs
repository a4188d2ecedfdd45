//! Project identity and per-invocation run state.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::domain::error::DomainError;

/// Name used when neither an argument nor interactive input supplies one.
pub const DEFAULT_PROJECT_NAME: &str = "next-supabase-starter";

/// A project name that is guaranteed to be non-empty.
///
/// The name doubles as the directory the template is cloned into. Beyond
/// non-emptiness it is taken verbatim: argument-supplied names are never
/// trimmed or rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn new(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DomainError::InvalidProjectName {
                name: raw,
                reason: "name cannot be empty".into(),
            });
        }
        Ok(Self(raw))
    }

    /// The fixed fallback name.
    pub fn fallback() -> Self {
        Self(DEFAULT_PROJECT_NAME.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<Path> for ProjectName {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

/// State for one invocation of the tool.
///
/// Built once the project name is resolved. The VCS decision is recorded
/// mid-pipeline and is write-once: later attempts to change it are ignored.
#[derive(Debug, Clone, Serialize)]
pub struct RunContext {
    requested_name: Option<String>,
    resolved_name: ProjectName,
    current_version: String,
    initialize_vcs: Option<bool>,
}

impl RunContext {
    pub fn new(
        requested_name: Option<String>,
        resolved_name: ProjectName,
        current_version: impl Into<String>,
    ) -> Self {
        Self {
            requested_name,
            resolved_name,
            current_version: current_version.into(),
            initialize_vcs: None,
        }
    }

    pub fn requested_name(&self) -> Option<&str> {
        self.requested_name.as_deref()
    }

    pub fn resolved_name(&self) -> &ProjectName {
        &self.resolved_name
    }

    pub fn current_version(&self) -> &str {
        &self.current_version
    }

    /// `None` until the VCS question has been answered.
    pub fn initialize_vcs(&self) -> Option<bool> {
        self.initialize_vcs
    }

    /// Record the VCS decision. Returns the decision in force afterwards.
    pub fn record_vcs_decision(&mut self, decision: bool) -> bool {
        *self.initialize_vcs.get_or_insert(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_is_rejected() {
        assert!(matches!(
            ProjectName::new(""),
            Err(DomainError::InvalidProjectName { .. })
        ));
    }

    #[test]
    fn name_is_kept_verbatim() {
        let name = ProjectName::new("  spaced app ").unwrap();
        assert_eq!(name.as_str(), "  spaced app ");
    }

    #[test]
    fn fallback_is_the_starter_name() {
        assert_eq!(ProjectName::fallback().as_str(), "next-supabase-starter");
    }

    #[test]
    fn vcs_decision_is_write_once() {
        let mut ctx = RunContext::new(None, ProjectName::fallback(), "1.0.0");
        assert_eq!(ctx.initialize_vcs(), None);
        assert!(!ctx.record_vcs_decision(false));
        assert!(!ctx.record_vcs_decision(true));
        assert_eq!(ctx.initialize_vcs(), Some(false));
    }
}
