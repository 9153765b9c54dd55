//! Storage-root resolution.
//!
//! The root is a pure function of an optional override and a working
//! directory; every accessor re-creates its directory if it has gone missing,
//! so callers never need an initialization step.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default root, relative to the working directory.
pub const STORAGE_DIR_NAME: &str = "storage";
pub const UPLOADS_DIR_NAME: &str = "uploads";
pub const SESSION_DOCUMENTS_DIR_NAME: &str = "session-documents";

/// Environment variable holding the storage-root override.
pub const STORAGE_DIR_ENV: &str = "DENTIT_STORAGE_DIR";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Resolve the storage root without touching the filesystem.
///
/// A non-empty override is used verbatim, otherwise `<cwd>/storage`.
pub fn root_path(override_dir: Option<&str>, cwd: &Path) -> PathBuf {
    match override_dir {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => cwd.join(STORAGE_DIR_NAME),
    }
}

/// Resolve the storage root and make sure it exists.
pub fn resolve_root(override_dir: Option<&str>, cwd: &Path) -> Result<PathBuf, StorageError> {
    ensure_dir(root_path(override_dir, cwd))
}

/// Create `path` (and any missing parents) unless it already exists.
pub fn ensure_dir(path: PathBuf) -> Result<PathBuf, StorageError> {
    if !path.is_dir() {
        std::fs::create_dir_all(&path).map_err(|source| StorageError::CreateDir {
            path: path.clone(),
            source,
        })?;
        tracing::debug!("Created storage directory {}", path.display());
    }
    Ok(path)
}

/// Handle on the resolved storage layout:
/// `<root>/uploads/**` and `<root>/session-documents/**`.
#[derive(Debug, Clone)]
pub struct StorageRoot {
    root: PathBuf,
}

impl StorageRoot {
    pub fn new(override_dir: Option<&str>, cwd: &Path) -> Self {
        Self {
            root: root_path(override_dir, cwd),
        }
    }

    /// Root path as resolved, without creating it.
    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn root(&self) -> Result<PathBuf, StorageError> {
        ensure_dir(self.root.clone())
    }

    pub fn uploads_dir(&self) -> Result<PathBuf, StorageError> {
        ensure_dir(self.root()?.join(UPLOADS_DIR_NAME))
    }

    pub fn session_documents_dir(&self) -> Result<PathBuf, StorageError> {
        ensure_dir(self.root()?.join(SESSION_DOCUMENTS_DIR_NAME))
    }

    /// Create the whole layout up front.
    pub fn ensure_layout(&self) -> Result<(), StorageError> {
        self.uploads_dir()?;
        self.session_documents_dir()?;
        Ok(())
    }
}
