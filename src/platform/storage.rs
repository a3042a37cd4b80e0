//! Local directory file store for exported payloads.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use super::{FileStore, PlatformError};

/// Fallback name when a document name sanitizes to nothing.
const FALLBACK_FILENAME: &str = "export.bin";

/// A file written by a [`FileStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    path: PathBuf,
    size: u64,
}

impl StoredFile {
    /// Wraps an existing file path.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }

    /// Current location on disk.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size in bytes at creation.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// File name component of the current path.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }

    /// Renames the file within its current folder.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Io`] if the rename fails.
    #[instrument(skip(self), fields(from = %self.path.display()))]
    pub async fn rename(&mut self, new_name: &str) -> Result<&mut Self, PlatformError> {
        let dir = self
            .path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        let target = resolve_unique_path(&dir, new_name);
        tokio::fs::rename(&self.path, &target)
            .await
            .map_err(|e| PlatformError::io(target.clone(), e))?;
        debug!(to = %target.display(), "renamed exported file");
        self.path = target;
        Ok(self)
    }

    /// Moves the file into `folder`, creating the folder if needed.
    ///
    /// Falls back to copy + delete when a plain rename crosses file systems.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Io`] if the folder cannot be created or the
    /// file cannot be moved.
    #[instrument(skip(self), fields(from = %self.path.display()))]
    pub async fn move_to(&mut self, folder: &Path) -> Result<&mut Self, PlatformError> {
        tokio::fs::create_dir_all(folder)
            .await
            .map_err(|e| PlatformError::io(folder, e))?;

        let name = self.name().unwrap_or(FALLBACK_FILENAME).to_string();
        let target = resolve_unique_path(folder, &name);
        if tokio::fs::rename(&self.path, &target).await.is_err() {
            tokio::fs::copy(&self.path, &target)
                .await
                .map_err(|e| PlatformError::io(target.clone(), e))?;
            tokio::fs::remove_file(&self.path)
                .await
                .map_err(|e| PlatformError::io(self.path.clone(), e))?;
        }
        debug!(to = %target.display(), "moved exported file");
        self.path = target;
        Ok(self)
    }
}

/// Writes exports into a directory on the local file system.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    /// Stores files under `root` unless a folder is given per call.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    #[instrument(skip(self, payload), fields(bytes = payload.len()))]
    async fn create_file(
        &self,
        payload: &[u8],
        name: &str,
        folder: Option<&Path>,
    ) -> Result<StoredFile, PlatformError> {
        let dir = folder.unwrap_or(self.root.as_path());
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| PlatformError::io(dir, e))?;

        let path = resolve_unique_path(dir, name);
        tokio::fs::write(&path, payload)
            .await
            .map_err(|e| PlatformError::io(path.clone(), e))?;

        let file = StoredFile::new(path, payload.len() as u64);
        info!(path = %file.path().display(), bytes = file.size(), "export saved");
        Ok(file)
    }
}

/// Replaces characters that are invalid in file names on common platforms.
pub(crate) fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.trim_matches(|c| c == '_' || c == '.').is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        sanitized
    }
}

/// Returns `dir/name`, or `dir/stem_N.ext` with the first free `N >= 1`.
pub(crate) fn resolve_unique_path(dir: &Path, name: &str) -> PathBuf {
    let filename = sanitize_filename(name);
    let base_path = dir.join(&filename);
    if !base_path.exists() {
        return base_path;
    }

    let (stem, ext) = match filename.rfind('.') {
        Some(pos) if pos > 0 => (&filename[..pos], &filename[pos..]),
        _ => (filename.as_str(), ""),
    };

    for i in 1..1000 {
        let candidate = dir.join(format!("{stem}_{i}{ext}"));
        if !candidate.exists() {
            return candidate;
        }
    }

    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    dir.join(format!("{stem}_{timestamp}{ext}"))
}
