//! Version verdicts produced by the version oracle.

use std::fmt;

use semver::{BuildMetadata, Version};
use serde::Serialize;

/// Outcome of comparing the running version against the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VersionStatus {
    UpToDate,
    Stale,
    /// The registry could not be queried or answered with garbage.
    Unknown,
}

impl fmt::Display for VersionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UpToDate => write!(f, "up-to-date"),
            Self::Stale => write!(f, "stale"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionVerdict {
    pub current: String,
    pub latest: Option<String>,
    pub status: VersionStatus,
}

impl VersionVerdict {
    /// Compare the running version with the published one.
    ///
    /// When both sides parse as semantic versions the tool is stale only if
    /// the published version is strictly newer, so a local pre-release or a
    /// build ahead of the registry is never flagged. Anything unparsable
    /// falls back to plain string inequality.
    pub fn compare(current: impl Into<String>, latest: impl Into<String>) -> Self {
        let current = current.into();
        let latest = latest.into();

        let stale = match (parse_lenient(&current), parse_lenient(&latest)) {
            (Some(ours), Some(theirs)) => theirs > ours,
            _ => current.trim() != latest.trim(),
        };

        Self {
            current,
            latest: Some(latest),
            status: if stale {
                VersionStatus::Stale
            } else {
                VersionStatus::UpToDate
            },
        }
    }

    pub fn unknown(current: impl Into<String>) -> Self {
        Self {
            current: current.into(),
            latest: None,
            status: VersionStatus::Unknown,
        }
    }

    pub fn is_stale(&self) -> bool {
        self.status == VersionStatus::Stale
    }
}

/// Parse `1.2.3` or `v1.2.3`. Build metadata is dropped: it carries no
/// precedence, so `1.0.0+abc` and `1.0.0` are the same release.
fn parse_lenient(raw: &str) -> Option<Version> {
    let trimmed = raw.trim();
    let mut version = Version::parse(trimmed.strip_prefix('v').unwrap_or(trimmed)).ok()?;
    version.build = BuildMetadata::EMPTY;
    Some(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_versions_are_up_to_date() {
        for v in ["0.1.0", "2.10.3", "1.0.0-beta.1", "not-a-version"] {
            assert_eq!(VersionVerdict::compare(v, v).status, VersionStatus::UpToDate);
        }
    }

    #[test]
    fn newer_published_version_is_stale() {
        let verdict = VersionVerdict::compare("1.2.0", "1.10.0");
        assert!(verdict.is_stale());
        assert_eq!(verdict.latest.as_deref(), Some("1.10.0"));
    }

    #[test]
    fn local_build_ahead_of_registry_is_not_stale() {
        assert_eq!(
            VersionVerdict::compare("2.0.0", "1.9.9").status,
            VersionStatus::UpToDate
        );
    }

    #[test]
    fn prerelease_of_published_version_is_stale() {
        assert!(VersionVerdict::compare("1.0.0-rc.1", "1.0.0").is_stale());
    }

    #[test]
    fn v_prefix_is_tolerated() {
        assert_eq!(
            VersionVerdict::compare("1.0.0", "v1.0.0").status,
            VersionStatus::UpToDate
        );
    }

    #[test]
    fn build_metadata_does_not_make_a_release_stale() {
        for (current, latest) in [("1.0.0", "1.0.0+build.7"), ("1.0.0+sha.abc", "1.0.0")] {
            assert_eq!(
                VersionVerdict::compare(current, latest).status,
                VersionStatus::UpToDate,
                "{current} vs {latest}"
            );
        }
        assert!(VersionVerdict::compare("1.0.0+sha.abc", "1.0.1").is_stale());
    }

    #[test]
    fn unparsable_versions_fall_back_to_inequality() {
        assert!(VersionVerdict::compare("nightly", "1.0.0").is_stale());
        assert!(VersionVerdict::compare("1.0", "1.1").is_stale());
    }

    #[test]
    fn unknown_has_no_latest() {
        let verdict = VersionVerdict::unknown("1.0.0");
        assert_eq!(verdict.status, VersionStatus::Unknown);
        assert!(verdict.latest.is_none());
        assert!(!verdict.is_stale());
    }
}
