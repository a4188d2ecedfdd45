//! Registry stand-in that answers from memory.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use supastart_core::{
    application::{ApplicationError, ports::VersionRegistry},
    error::SupastartResult,
};

/// Answers every query with a fixed version, or fails as if offline.
#[derive(Debug, Clone)]
pub struct StaticRegistry {
    latest: Option<String>,
    queries: Arc<AtomicUsize>,
}

impl StaticRegistry {
    pub fn publishing(version: impl Into<String>) -> Self {
        Self {
            latest: Some(version.into()),
            queries: Arc::default(),
        }
    }

    pub fn offline() -> Self {
        Self {
            latest: None,
            queries: Arc::default(),
        }
    }

    /// Number of `latest_version` calls seen by any clone.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl VersionRegistry for StaticRegistry {
    fn latest_version(&self, _package: &str) -> SupastartResult<String> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.latest.clone().ok_or_else(|| {
            ApplicationError::RegistryUnavailable {
                reason: "registry offline".into(),
            }
            .into()
        })
    }
}
