//! Filesystem implementation of the Store trait.
//!
//! One file per entry, readable only by the owning account. Writes go to a
//! hidden temp file that is renamed over the final name, so readers see
//! either the old body or the new one.
//!
//! Keys up to [`NAME_MAX`] bytes are stored flat in the root directory. A
//! longer key is cut into segments of at most `NAME_MAX` bytes: every
//! segment but the last names a directory, the last names the file. Cuts
//! fall on character boundaries, so an inner segment is always at least
//! `NAME_MAX - 3` bytes long, and only directories of that width are
//! walked when listing.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::error::{Result, StoreError};
use crate::traits::{validate_key, StorageEntry, Store, RESERVED_PREFIX};

/// Longest file name, in bytes, most filesystems accept.
pub const NAME_MAX: usize = 255;
/// Shortest inner segment a greedy cut can produce.
const MIN_SEGMENT: usize = NAME_MAX - 3;

/// Permission bits for entry files.
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;
/// Permission bits for the store directory and segment directories.
#[cfg(unix)]
const DIR_MODE: u32 = 0o700;

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Directory-backed store.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open the store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let mut builder = std::fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(DIR_MODE);
        }
        builder.create(&root).map_err(StoreError::Open)?;
        Ok(Self { root })
    }

    /// The directory entries live in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the entry for `key` lives on disk.
    pub fn entry_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        let segments = key_segments(key);
        if segments.iter().any(|s| *s == "." || *s == "..") {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(segments
            .into_iter()
            .fold(self.root.clone(), |path, segment| path.join(segment)))
    }

    // Temp names are short and live in the root whatever the key length.
    fn temp_path(&self) -> PathBuf {
        let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
        self.root
            .join(format!("{RESERVED_PREFIX}{}.{seq}.tmp", std::process::id()))
    }

    /// Create the directories for every segment of `key` but the last.
    ///
    /// Not recursive: a missing root fails instead of being recreated.
    async fn create_segment_dirs(&self, key: &str) -> std::io::Result<()> {
        let segments = key_segments(key);
        let mut dir = self.root.clone();
        for segment in &segments[..segments.len() - 1] {
            dir.push(segment);
            let mut builder = tokio::fs::DirBuilder::new();
            #[cfg(unix)]
            builder.mode(DIR_MODE);
            if let Err(e) = builder.create(&dir).await {
                if e.kind() != ErrorKind::AlreadyExists {
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    async fn write_temp(path: &Path, body: &[u8]) -> std::io::Result<()> {
        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        options.mode(FILE_MODE);

        let mut file = options.open(path).await?;
        file.write_all(body).await?;
        file.sync_all().await?;
        Ok(())
    }

    async fn write_entry(
        &self,
        key: &str,
        final_path: &Path,
        temp_path: &Path,
        body: &[u8],
    ) -> std::io::Result<()> {
        self.create_segment_dirs(key).await?;
        Self::write_temp(temp_path, body).await?;
        tokio::fs::rename(temp_path, final_path).await
    }
}

/// Split `key` into path segments of at most [`NAME_MAX`] bytes.
fn key_segments(key: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut rest = key;
    while rest.len() > NAME_MAX {
        let mut cut = NAME_MAX;
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        let (head, tail) = rest.split_at(cut);
        segments.push(head);
        rest = tail;
    }
    segments.push(rest);
    segments
}

fn is_segment_dir(name: &str) -> bool {
    (MIN_SEGMENT..=NAME_MAX).contains(&name.len())
}

#[async_trait]
impl Store for FileStore {
    async fn store(&self, entry: &StorageEntry) -> Result<()> {
        let final_path = self.entry_path(&entry.key)?;
        let temp_path = self.temp_path();

        let written = self
            .write_entry(&entry.key, &final_path, &temp_path, &entry.body)
            .await;
        if let Err(source) = written {
            if let Err(cleanup) = tokio::fs::remove_file(&temp_path).await {
                if cleanup.kind() != ErrorKind::NotFound {
                    warn!(key = %entry.key, error = %cleanup, "failed to remove temp file");
                }
            }
            return Err(StoreError::Write {
                key: entry.key.clone(),
                source,
            });
        }

        debug!(key = %entry.key, bytes = entry.body.len(), "stored entry");
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<StorageEntry> {
        let path = self.entry_path(key)?;
        match tokio::fs::read(path).await {
            Ok(body) => {
                debug!(key, bytes = body.len(), "loaded entry");
                Ok(StorageEntry::new(key, body))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound(key.to_string())),
            Err(source) => Err(StoreError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    async fn list(&self) -> Result<Vec<StorageEntry>> {
        let mut entries = Vec::new();
        // (directory, key prefix its names extend)
        let mut pending = vec![(self.root.clone(), String::new())];

        while let Some((dir_path, prefix)) = pending.pop() {
            let at_root = prefix.is_empty();
            let mut dir = match tokio::fs::read_dir(&dir_path).await {
                Ok(dir) => dir,
                // A segment directory removed out of band.
                Err(e) if !at_root && e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(StoreError::List(e)),
            };

            while let Some(item) = dir.next_entry().await.map_err(StoreError::List)? {
                let Ok(name) = item.file_name().into_string() else {
                    warn!(name = ?item.file_name(), "skipping entry with non-UTF-8 name");
                    continue;
                };
                // Temp files only ever live in the root; deeper segments may
                // legitimately start with the reserved prefix.
                if at_root && name.starts_with(RESERVED_PREFIX) {
                    continue;
                }

                let file_type = item.file_type().await.map_err(StoreError::List)?;
                let key = format!("{prefix}{name}");
                if file_type.is_dir() {
                    if is_segment_dir(&name) {
                        pending.push((item.path(), key));
                    }
                    continue;
                }
                if !file_type.is_file() {
                    continue;
                }

                match tokio::fs::read(item.path()).await {
                    Ok(body) => entries.push(StorageEntry::new(key, body)),
                    // Removed out of band between read_dir and read.
                    Err(e) if e.kind() == ErrorKind::NotFound => continue,
                    Err(source) => return Err(StoreError::Read { key, source }),
                }
            }
        }

        debug!(count = entries.len(), "listed entries");
        Ok(entries)
    }
}
