//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use supastart_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{SupastartError, SupastartResult},
};

/// In-memory filesystem for testing.
///
/// Clones share state, so a test can hand one clone to the pipeline and
/// inspect another afterwards.
#[derive(Debug, Clone)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystemInner {
    fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.directories.contains(path)
    }
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryFilesystemInner::default())),
        }
    }

    /// Create a directory and its parents (testing helper).
    pub fn create_dir_all(&self, path: &Path) {
        if let Ok(mut inner) = self.inner.write() {
            let mut current = PathBuf::new();
            for component in path.components() {
                current.push(component);
                inner.directories.insert(current.clone());
            }
        }
    }

    /// Write a file, creating parent directories (testing helper).
    pub fn write_file(&self, path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            self.create_dir_all(parent);
        }
        if let Ok(mut inner) = self.inner.write() {
            inner.files.insert(path.to_path_buf(), content.to_string());
        }
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }
}

impl Default for MemoryFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.contains(path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn is_empty_dir(&self, path: &Path) -> SupastartResult<bool> {
        let inner = self.inner.read().map_err(|_| lock_error(path))?;
        if !inner.directories.contains(path) {
            return Err(fs_error(path, "Directory does not exist"));
        }
        let has_child = inner
            .files
            .keys()
            .chain(inner.directories.iter())
            .any(|p| p != path && p.starts_with(path));
        Ok(!has_child)
    }

    fn rename(&self, from: &Path, to: &Path) -> SupastartResult<()> {
        let mut guard = self.inner.write().map_err(|_| lock_error(from))?;
        let inner = &mut *guard;

        if !inner.contains(from) {
            return Err(fs_error(from, "Entry does not exist"));
        }
        if inner.contains(to) {
            return Err(fs_error(to, "Target already exists"));
        }

        let relocate = |p: &Path| match p.strip_prefix(from) {
            Ok(rest) if rest.as_os_str().is_empty() => to.to_path_buf(),
            Ok(rest) => to.join(rest),
            Err(_) => p.to_path_buf(),
        };
        let directories = std::mem::take(&mut inner.directories);
        inner.directories = directories.iter().map(|p| relocate(p.as_path())).collect();
        let files = std::mem::take(&mut inner.files);
        inner.files = files
            .into_iter()
            .map(|(p, content)| (relocate(p.as_path()), content))
            .collect();
        if let Some(parent) = to.parent() {
            inner.directories.insert(parent.to_path_buf());
        }

        Ok(())
    }
}

fn lock_error(path: &Path) -> SupastartError {
    fs_error(path, "memory filesystem lock poisoned")
}

fn fs_error(path: &Path, reason: &str) -> SupastartError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}
