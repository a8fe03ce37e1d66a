//! C4: the concolic loop's strict-priority two-tier queue.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec::SeedCodec;
use crate::error::QueueError;
use crate::priority::Priority;
use crate::pure_queue::PureQueue;
use crate::file_queue::FileQueue;

const NORMAL_TIER_NAME: &str = "concolic-seed";

/// Two-tier queue consumed at most once per seed, in strict priority order:
/// favored seeds are never starved by a nonempty normal tier, and the
/// normal tier is only drained once favored is dry.
pub struct ConcolicQueue<Seed, Codec> {
    favored: PureQueue<Seed>,
    normal: FileQueue,
    codec: Codec,
}

impl<Seed, Codec> ConcolicQueue<Seed, Codec>
where
    Codec: SeedCodec<Seed>,
{
    /// Loads the favored side from `favored_snapshot_path` (empty if
    /// missing) and opens or creates the normal-side directory under
    /// `queue_dir`.
    pub fn initialize(
        queue_dir: impl Into<PathBuf>,
        favored_snapshot_path: impl AsRef<Path>,
        file_queue_max_size: usize,
        codec: Codec,
    ) -> Result<Self, QueueError>
    where
        Seed: DeserializeOwned,
    {
        let favored = PureQueue::load(favored_snapshot_path.as_ref())?;
        let normal = FileQueue::initialize(NORMAL_TIER_NAME, queue_dir, file_queue_max_size)?;
        Ok(Self {
            favored,
            normal,
            codec,
        })
    }

    /// Snapshots the favored side only; the normal side is already on
    /// disk.
    pub fn save(&self, favored_snapshot_path: impl AsRef<Path>) -> Result<(), QueueError>
    where
        Seed: Serialize,
    {
        self.favored.save(favored_snapshot_path.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.favored.is_empty() && self.normal.is_empty()
    }

    pub fn enqueue(&mut self, priority: Priority, seed: Seed) -> Result<(), QueueError> {
        match priority {
            Priority::Favored => {
                self.favored.enqueue(seed);
                Ok(())
            }
            Priority::Normal => {
                let bytes = self.codec.encode(&seed);
                self.normal.enqueue(&bytes)
            }
        }
    }

    /// Selects a tier — `Favored` unless the normal tier is nonempty *and*
    /// favored is dry — and returns the seed it yielded.
    pub fn dequeue(&mut self) -> Result<(Priority, Seed), QueueError> {
        let select_normal = !self.normal.is_empty() && self.favored.is_empty();
        if select_normal {
            let bytes = self.normal.dequeue()?;
            let seed = self.codec.decode(&bytes)?;
            Ok((Priority::Normal, seed))
        } else {
            let seed = self.favored.dequeue()?;
            Ok((Priority::Favored, seed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::BincodeCodec;

    #[test]
    fn strict_favored_first_priority() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("favored.bin");
        let mut q: ConcolicQueue<u32, _> =
            ConcolicQueue::initialize(dir.path().join("queue"), &snapshot, 10, BincodeCodec)
                .unwrap();

        q.enqueue(Priority::Normal, 1).unwrap();
        q.enqueue(Priority::Favored, 2).unwrap();
        q.enqueue(Priority::Normal, 3).unwrap();
        q.enqueue(Priority::Favored, 4).unwrap();

        assert_eq!(q.dequeue().unwrap(), (Priority::Favored, 2));
        assert_eq!(q.dequeue().unwrap(), (Priority::Favored, 4));
        assert_eq!(q.dequeue().unwrap(), (Priority::Normal, 1));
        assert_eq!(q.dequeue().unwrap(), (Priority::Normal, 3));
        assert!(q.is_empty());
    }

    #[test]
    fn save_and_reload_preserves_favored_tier() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("favored.bin");
        let queue_dir = dir.path().join("queue");
        let mut q: ConcolicQueue<u32, _> =
            ConcolicQueue::initialize(&queue_dir, &snapshot, 10, BincodeCodec).unwrap();
        q.enqueue(Priority::Favored, 7).unwrap();
        q.enqueue(Priority::Favored, 8).unwrap();
        q.save(&snapshot).unwrap();

        let mut reloaded: ConcolicQueue<u32, _> =
            ConcolicQueue::initialize(&queue_dir, &snapshot, 10, BincodeCodec).unwrap();
        assert_eq!(reloaded.dequeue().unwrap(), (Priority::Favored, 7));
        assert_eq!(reloaded.dequeue().unwrap(), (Priority::Favored, 8));
    }
}
