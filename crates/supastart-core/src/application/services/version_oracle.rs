//! Version Oracle - is the running tool the latest published one?

use tracing::{debug, instrument, warn};

use crate::{application::ports::VersionRegistry, domain::VersionVerdict};

/// Queries the registry once and turns the answer into a [`VersionVerdict`].
pub struct VersionOracle {
    registry: Box<dyn VersionRegistry>,
    package: String,
}

impl VersionOracle {
    pub fn new(registry: Box<dyn VersionRegistry>, package: impl Into<String>) -> Self {
        Self {
            registry,
            package: package.into(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Compare `current` against the latest published version.
    ///
    /// Never fails: any registry error yields an `Unknown` verdict, because
    /// the check is advisory.
    #[instrument(skip(self), fields(package = %self.package))]
    pub fn check_latest_version(&self, current: &str) -> VersionVerdict {
        match self.registry.latest_version(&self.package) {
            Ok(latest) => {
                let verdict = VersionVerdict::compare(current, latest);
                debug!(
                    latest = verdict.latest.as_deref().unwrap_or_default(),
                    status = %verdict.status,
                    "Version check finished"
                );
                verdict
            }
            Err(e) => {
                warn!(error = %e, "Version check failed, continuing");
                VersionVerdict::unknown(current)
            }
        }
    }
}
