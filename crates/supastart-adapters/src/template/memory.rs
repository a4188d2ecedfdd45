//! Template fetcher backed by [`MemoryFilesystem`], for tests.

use std::path::Path;
use std::sync::{Arc, Mutex};

use supastart_core::{
    application::{ApplicationError, ports::TemplateFetcher},
    error::SupastartResult,
};

use crate::filesystem::MemoryFilesystem;

/// "Clones" by writing a fixed file set into a [`MemoryFilesystem`].
#[derive(Debug, Clone)]
pub struct MemoryTemplateFetcher {
    filesystem: MemoryFilesystem,
    files: Vec<(String, String)>,
    unreachable: bool,
    fetched: Arc<Mutex<Vec<String>>>,
}

impl MemoryTemplateFetcher {
    /// A fetcher that materializes a minimal Next.js starter.
    pub fn new(filesystem: MemoryFilesystem) -> Self {
        Self {
            filesystem,
            files: vec![
                ("package.json".into(), r#"{"name":"next-supabase-starter"}"#.into()),
                ("app/page.tsx".into(), "export default function Page() {}".into()),
            ],
            unreachable: false,
            fetched: Arc::default(),
        }
    }

    /// Every fetch fails as if the network were down.
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    /// Sources fetched so far.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().map(|f| f.clone()).unwrap_or_default()
    }
}

impl TemplateFetcher for MemoryTemplateFetcher {
    fn fetch(&self, source: &str, destination: &Path) -> SupastartResult<()> {
        if let Ok(mut fetched) = self.fetched.lock() {
            fetched.push(source.to_string());
        }

        if self.unreachable {
            return Err(ApplicationError::TemplateFetch {
                source_url: source.to_string(),
                reason: "could not resolve host".into(),
            }
            .into());
        }

        self.filesystem.create_dir_all(destination);
        for (path, content) in &self.files {
            self.filesystem.write_file(&destination.join(path), content);
        }
        Ok(())
    }
}
