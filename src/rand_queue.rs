//! C5: the random fuzzing loop's two-tier queue, plus periodic minimization.

use std::hash::Hash;
use std::path::{Path, PathBuf};

use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::codec::SeedCodec;
use crate::config::QueueConfig;
use crate::durable_queue::DurableQueue;
use crate::error::QueueError;
use crate::file_queue::FileQueue;
use crate::minimize::greedy_minimize;
use crate::oracle::CoverageOracle;
use crate::priority::Priority;

const NORMAL_TIER_NAME: &str = "rand-seed";

/// Two-tier queue consumed repeatedly (sampling with replacement) by the
/// random fuzzing loop, with a favored tier that is periodically culled by
/// the greedy minimizer.
pub struct RandFuzzQueue<Seed, Codec> {
    favored: DurableQueue<Seed>,
    normal: FileQueue,
    codec: Codec,
    config: QueueConfig,
    last_minimized_count: usize,
    remove_count: u64,
}

impl<Seed, Codec> RandFuzzQueue<Seed, Codec>
where
    Codec: SeedCodec<Seed>,
{
    /// Loads the favored tier from `favored_snapshot_path` if it exists,
    /// otherwise builds an empty `DurableQueue` using `dummy_seed` purely
    /// as the array sentinel (it is never returned to a caller). Opens or
    /// creates the normal-tier `FileQueue` under `queue_dir`.
    pub fn initialize(
        queue_dir: impl Into<PathBuf>,
        favored_snapshot_path: impl AsRef<Path>,
        dummy_seed: Seed,
        config: QueueConfig,
        codec: Codec,
    ) -> Result<Self, QueueError>
    where
        Seed: Clone + DeserializeOwned,
    {
        let favored = if favored_snapshot_path.as_ref().exists() {
            DurableQueue::load(favored_snapshot_path.as_ref())?
        } else {
            DurableQueue::initialize(dummy_seed, config.durable_capacity)
        };
        let normal = FileQueue::initialize(NORMAL_TIER_NAME, queue_dir, config.file_queue_max_size)?;

        Ok(Self {
            favored,
            normal,
            codec,
            config,
            last_minimized_count: 0,
            remove_count: 0,
        })
    }

    pub fn save(&self, favored_snapshot_path: impl AsRef<Path>) -> Result<(), QueueError>
    where
        Seed: Serialize,
    {
        self.favored.save(favored_snapshot_path.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.favored.is_empty() && self.normal.is_empty()
    }

    /// Cumulative number of seeds removed by `minimize` across this
    /// queue's lifetime. Telemetry only.
    pub fn remove_count(&self) -> u64 {
        self.remove_count
    }

    pub fn favored_size(&self) -> usize {
        self.favored.size()
    }

    /// Identical tier dispatch to `ConcolicQueue::enqueue`; the durable
    /// favored tier silently drops on overflow, same as the file-backed
    /// normal tier.
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

    /// Draws from the favored tier with probability `favored_seed_prob`
    /// when both tiers are nonempty; otherwise picks whichever tier has
    /// anything in it. The favored path is non-consuming (`fetch`); the
    /// normal path is consuming (`dequeue`).
    pub fn dequeue(&mut self, rng: &mut impl Rng) -> Result<(Priority, Seed), QueueError>
    where
        Seed: Clone,
    {
        let select_favored = if self.normal.is_empty() {
            true
        } else {
            rng.gen_range(0.0..1.0) < self.config.favored_seed_prob
        };

        if select_favored {
            let seed = self.favored.fetch()?.clone();
            Ok((Priority::Favored, seed))
        } else {
            let bytes = self.normal.dequeue()?;
            let seed = self.codec.decode(&bytes)?;
            Ok((Priority::Normal, seed))
        }
    }

    /// True once the favored tier has grown past `seed_culling_threshold`
    /// times its size at the last minimization. `last_minimized_count` is
    /// zero until the first `minimize`, so this fires as soon as any seed
    /// at all has been enqueued favored.
    pub fn time_to_minimize(&self) -> bool {
        (self.favored.size() as f64) > (self.last_minimized_count as f64) * self.config.seed_culling_threshold
    }

    /// Runs the greedy set-cover pass (C6) over the favored tier, applies
    /// the removals in descending index order so earlier shifts never
    /// invalidate a later index, and updates bookkeeping. Returns the
    /// number of seeds removed.
    pub fn minimize<Node, Oracle>(&mut self, oracle: &Oracle) -> usize
    where
        Seed: Clone + PartialEq,
        Node: Eq + Hash + Clone,
        Oracle: CoverageOracle<Seed, Node>,
    {
        let entries: Vec<(usize, Seed)> = self
            .favored
            .indexed_elements()
            .into_iter()
            .map(|(idx, seed)| (idx, seed.clone()))
            .collect();

        let mut redundant = greedy_minimize(&entries, oracle);
        redundant.sort_by(|a, b| b.0.cmp(&a.0));

        for (idx, seed) in &redundant {
            // A mismatch here means the favored tier changed shape between
            // building `entries` and applying the removal, which cannot
            // happen under the single-threaded-per-instance contract.
            self.favored
                .remove(*idx, seed)
                .expect("favored tier mutated during minimize");
        }

        let removed = redundant.len();
        self.remove_count += removed as u64;
        self.last_minimized_count = self.favored.size();

        info!(
            removed,
            favored_size = self.favored.size(),
            total_removed = self.remove_count,
            "ran minimization pass"
        );

        removed
    }
}
