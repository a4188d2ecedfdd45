//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use supastart_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{SupastartError, SupastartResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    /// Dangling symlinks count as existing.
    fn exists(&self, path: &Path) -> bool {
        path.symlink_metadata().is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_empty_dir(&self, path: &Path) -> SupastartResult<bool> {
        let mut entries =
            std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "read directory"))?;
        Ok(entries.next().is_none())
    }

    fn rename(&self, from: &Path, to: &Path) -> SupastartResult<()> {
        // std::fs::rename silently replaces files and empty directories.
        if self.exists(to) {
            let e = io::Error::from(io::ErrorKind::AlreadyExists);
            return Err(map_io_error(to, e, "move entry"));
        }
        std::fs::rename(from, to).map_err(|e| map_io_error(from, e, "move entry"))
    }
}

pub(crate) fn map_io_error(path: &Path, e: io::Error, operation: &str) -> SupastartError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_directory_is_detected() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();
        assert!(fs.is_dir(dir.path()));
        assert!(fs.is_empty_dir(dir.path()).unwrap());

        std::fs::write(dir.path().join("package.json"), "{}").unwrap();
        assert!(!fs.is_empty_dir(dir.path()).unwrap());
    }

    #[test]
    fn rename_moves_tree_intact() {
        let dir = tempfile::tempdir().unwrap();
        let project = dir.path().join("demo-app");
        std::fs::create_dir_all(project.join("src")).unwrap();
        std::fs::write(project.join("src/page.tsx"), "export {}").unwrap();

        let fs = LocalFilesystem::new();
        let backup = dir.path().join("demo-app.backup");
        fs.rename(&project, &backup).unwrap();

        assert!(!fs.exists(&project));
        assert_eq!(
            std::fs::read_to_string(backup.join("src/page.tsx")).unwrap(),
            "export {}"
        );
    }

    #[test]
    fn rename_never_replaces_an_existing_target() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("notes.txt");
        let to = dir.path().join("notes.txt.backup");
        std::fs::write(&from, "new").unwrap();
        std::fs::write(&to, "old").unwrap();

        let err = LocalFilesystem::new().rename(&from, &to).unwrap_err();

        assert!(matches!(
            err,
            SupastartError::Application(ApplicationError::FilesystemError { .. })
        ));
        assert_eq!(std::fs::read_to_string(&to).unwrap(), "old");
        assert_eq!(std::fs::read_to_string(&from).unwrap(), "new");
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_counts_as_existing() {
        let dir = tempfile::tempdir().unwrap();
        let link = dir.path().join("demo-app");
        std::os::unix::fs::symlink(dir.path().join("gone"), &link).unwrap();

        let fs = LocalFilesystem::new();
        assert!(fs.exists(&link));
        assert!(!fs.is_dir(&link));
    }

    #[test]
    fn reading_missing_directory_is_filesystem_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LocalFilesystem::new()
            .is_empty_dir(&dir.path().join("missing"))
            .unwrap_err();
        assert!(matches!(
            err,
            SupastartError::Application(ApplicationError::FilesystemError { .. })
        ));
    }
}
