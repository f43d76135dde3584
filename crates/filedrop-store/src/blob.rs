use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{StoreError, StoreResult};
use crate::namer::parse_storage_name;

/// A file as seen through a directory listing of the store root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StoredBlob {
    /// On-disk name, relative to the store root.
    pub filename: String,
    /// Size reported by the filesystem.
    pub size: u64,
    /// Last modification time, if the platform reports one.
    pub modified: Option<DateTime<Utc>>,
}

impl StoredBlob {
    /// Client-supplied name embedded in `filename`, if it carries a timestamp prefix.
    pub fn original_name(&self) -> Option<&str> {
        parse_storage_name(&self.filename).map(|(_, original)| original)
    }

    /// Upload time encoded in the timestamp prefix.
    pub fn uploaded_at(&self) -> Option<DateTime<Utc>> {
        parse_storage_name(&self.filename).and_then(|(ms, _)| DateTime::from_timestamp_millis(ms))
    }
}

/// Flat directory of uploaded files.
///
/// The directory listing is the index: there is no metadata beside the files
/// themselves. Writes are not locked; concurrent writers of the same name race
/// and the last one wins.
#[derive(Clone, Debug)]
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    /// Create a store rooted at `root`. Nothing touches the disk until
    /// [`ensure_ready`](Self::ensure_ready) or a write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root directory if it does not exist yet.
    pub async fn ensure_ready(&self) -> StoreResult<()> {
        fs::create_dir_all(&self.root).await?;
        tracing::debug!(root = %self.root.display(), "blob store ready");
        Ok(())
    }

    /// Resolve `name` to a path directly under the root.
    pub fn path_for(&self, name: &str) -> StoreResult<PathBuf> {
        let invalid = name.is_empty()
            || name == "."
            || name == ".."
            || name.contains(['/', '\\', '\0']);
        if invalid {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(name))
    }

    /// Write `content` under `name`, replacing any existing file.
    ///
    /// Returns the size reported by the filesystem after the write.
    pub async fn write(&self, name: &str, content: &[u8]) -> StoreResult<u64> {
        let path = self.path_for(name)?;
        fs::write(&path, content).await?;
        Ok(fs::metadata(&path).await?.len())
    }

    /// Open `name` for a streamed write, truncating any existing file.
    pub async fn create(&self, name: &str) -> StoreResult<BlobWriter> {
        let path = self.path_for(name)?;
        let file = fs::File::create(&path).await?;
        Ok(BlobWriter { path, file })
    }

    pub async fn read(&self, name: &str) -> StoreResult<Vec<u8>> {
        let path = self.path_for(name)?;
        fs::read(&path).await.map_err(|e| StoreError::from_io(name, e))
    }

    pub async fn size(&self, name: &str) -> StoreResult<u64> {
        let path = self.path_for(name)?;
        let meta = fs::metadata(&path).await.map_err(|e| StoreError::from_io(name, e))?;
        if !meta.is_file() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        Ok(meta.len())
    }

    pub async fn exists(&self, name: &str) -> StoreResult<bool> {
        match self.size(name).await {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// List regular files under the root, sorted by name.
    pub async fn list(&self) -> StoreResult<Vec<StoredBlob>> {
        let mut entries = fs::read_dir(&self.root).await?;
        let mut blobs = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let meta = entry.metadata().await?;
            if !meta.is_file() {
                continue;
            }
            let Some(filename) = entry.file_name().to_str().map(str::to_owned) else {
                tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 filename");
                continue;
            };
            blobs.push(StoredBlob {
                filename,
                size: meta.len(),
                modified: meta.modified().ok().map(DateTime::<Utc>::from),
            });
        }
        blobs.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(blobs)
    }
}

/// Streaming writer for a single blob.
///
/// Dropping a writer without calling [`finish`](Self::finish) or
/// [`abort`](Self::abort) leaves whatever was written on disk.
#[derive(Debug)]
pub struct BlobWriter {
    path: PathBuf,
    file: fs::File,
}

impl BlobWriter {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn write_chunk(&mut self, chunk: &[u8]) -> StoreResult<()> {
        self.file.write_all(chunk).await?;
        Ok(())
    }

    /// Flush to disk and return the size reported by the filesystem.
    pub async fn finish(mut self) -> StoreResult<u64> {
        self.file.flush().await?;
        self.file.sync_all().await?;
        drop(self.file);
        Ok(fs::metadata(&self.path).await?.len())
    }

    /// Discard the partially written file.
    pub async fn abort(self) {
        drop(self.file);
        if let Err(e) = fs::remove_file(&self.path).await {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to remove partial upload");
        }
    }
}
