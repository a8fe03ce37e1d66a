//! C3: a disk-spilled byte-array FIFO with index-based filenames.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::QueueError;
use crate::invariants::debug_assert_file_queue_bounds;

/// A FIFO whose live elements are files `"{name}-{k}"` for `k` in
/// `[lower_idx, upper_idx)` under `dir`. Restart-safe: `load` recovers the
/// window from whatever files are actually present, tolerating gaps or
/// out-of-band deletions below the prior finger.
#[derive(Debug, Clone)]
pub struct FileQueue {
    name: String,
    dir: PathBuf,
    lower_idx: u64,
    upper_idx: u64,
    finger: u64,
    max_count: usize,
}

impl FileQueue {
    /// Creates `dir` and opens a queue with both indices at zero.
    pub fn create(name: impl Into<String>, dir: impl Into<PathBuf>, max_count: usize) -> Result<Self, QueueError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            name: name.into(),
            dir,
            lower_idx: 0,
            upper_idx: 0,
            finger: 0,
            max_count,
        })
    }

    /// Recovers the live window from the files already present in `dir`.
    /// `lower_idx` is the smallest observed index, `upper_idx` is one past
    /// the largest, and `finger` is reset to `lower_idx`. An empty
    /// directory yields `lower_idx = upper_idx = 0`.
    pub fn load(name: impl Into<String>, dir: impl Into<PathBuf>, max_count: usize) -> Result<Self, QueueError> {
        let name = name.into();
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(QueueError::DirectoryNotFound(dir));
        }

        let prefix = format!("{name}-");
        let mut indices = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Some(suffix) = file_name.strip_prefix(&prefix) {
                if let Ok(idx) = suffix.parse::<u64>() {
                    indices.push(idx);
                }
            }
        }

        let (lower_idx, upper_idx) = match (indices.iter().min(), indices.iter().max()) {
            (Some(&min), Some(&max)) => (min, max + 1),
            _ => (0, 0),
        };

        if (upper_idx - lower_idx) as usize > max_count {
            warn!(
                queue = %name,
                window = upper_idx - lower_idx,
                max_count,
                "file queue window on disk exceeds configured max_count"
            );
        }

        Ok(Self {
            name,
            dir,
            lower_idx,
            upper_idx,
            finger: lower_idx,
            max_count,
        })
    }

    /// `load`s an existing directory, or `create`s it if it does not exist.
    pub fn initialize(name: impl Into<String>, dir: impl Into<PathBuf>, max_count: usize) -> Result<Self, QueueError> {
        let name = name.into();
        let dir = dir.into();
        if dir.is_dir() {
            Self::load(name, dir, max_count)
        } else {
            Self::create(name, dir, max_count)
        }
    }

    pub fn size(&self) -> usize {
        (self.upper_idx - self.lower_idx) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, idx: u64) -> PathBuf {
        self.dir.join(format!("{}-{idx}", self.name))
    }

    /// Writes `bytes` to a new file at `upper_idx` and advances it.
    /// Silently drops the payload if the queue is already at `max_count` —
    /// seed queues are best-effort accumulators.
    ///
    /// The write goes through a sibling temp file and an atomic rename so a
    /// crash mid-write cannot leave a half-written file at the final name;
    /// `load` tolerates a leftover temp file because it only matches the
    /// `"{name}-<decimal>"` pattern.
    pub fn enqueue(&mut self, bytes: &[u8]) -> Result<(), QueueError> {
        if self.size() >= self.max_count {
            debug!(queue = %self.name, max_count = self.max_count, "file queue full, dropping seed");
            return Ok(());
        }

        let final_path = self.path_for(self.upper_idx);
        let tmp_path = self.dir.join(format!(".{}-{}.tmp", self.name, self.upper_idx));
        fs::write(&tmp_path, bytes)?;
        fs::rename(&tmp_path, &final_path)?;
        self.upper_idx += 1;

        debug_assert_file_queue_bounds!(self.lower_idx, self.upper_idx, self.max_count as u64);
        Ok(())
    }

    /// Reads and deletes the file at `lower_idx`, advancing the lower
    /// bound. The finger is pulled forward to at least the new lower bound
    /// but is never moved backward by this call.
    pub fn dequeue(&mut self) -> Result<Vec<u8>, QueueError> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }
        if !(self.lower_idx <= self.finger && self.finger < self.upper_idx) {
            return Err(QueueError::InvalidFinger {
                finger: self.finger as usize,
                count: self.size(),
            });
        }

        let path = self.path_for(self.lower_idx);
        let bytes = fs::read(&path)?;
        fs::remove_file(&path)?;
        self.lower_idx += 1;
        self.finger = std::cmp::max(self.lower_idx, self.finger);

        debug_assert_file_queue_bounds!(self.lower_idx, self.upper_idx, self.max_count as u64);
        Ok(bytes)
    }
}
