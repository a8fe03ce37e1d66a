//! Tunables for the seed queue core.

/// Fixed capacity used by [`DurableQueue`](crate::DurableQueue) when no
/// explicit capacity is supplied by the caller.
pub const DEFAULT_DURABLE_CAPACITY: usize = 100;

/// Configuration for `ConcolicQueue` and `RandFuzzQueue`.
///
/// All four tunables are fixed at initialization; nothing in the core
/// mutates a `QueueConfig` after a queue is built from it.
#[derive(Debug, Clone, Copy)]
pub struct QueueConfig {
    /// Capacity of the favored-tier `DurableQueue` (`CAP` in the design).
    pub durable_capacity: usize,
    /// Maximum number of files the normal-tier `FileQueue` will retain.
    pub file_queue_max_size: usize,
    /// Probability, in `[0, 1]`, that `RandFuzzQueue::dequeue` draws from
    /// the favored tier when both tiers are nonempty.
    pub favored_seed_prob: f64,
    /// Growth factor, `>= 1.0`, that triggers `timeToMinimize`.
    pub seed_culling_threshold: f64,
}

impl QueueConfig {
    /// Creates a new configuration.
    ///
    /// # Panics
    ///
    /// Panics if `durable_capacity` or `file_queue_max_size` is zero, if
    /// `favored_seed_prob` is outside `[0, 1]`, or if `seed_culling_threshold`
    /// is less than `1.0`.
    pub fn new(
        durable_capacity: usize,
        file_queue_max_size: usize,
        favored_seed_prob: f64,
        seed_culling_threshold: f64,
    ) -> Self {
        assert!(durable_capacity > 0, "durable_capacity must be nonzero");
        assert!(file_queue_max_size > 0, "file_queue_max_size must be nonzero");
        assert!(
            (0.0..=1.0).contains(&favored_seed_prob),
            "favored_seed_prob must be in [0, 1]"
        );
        assert!(
            seed_culling_threshold >= 1.0,
            "seed_culling_threshold must be >= 1.0"
        );

        Self {
            durable_capacity,
            file_queue_max_size,
            favored_seed_prob,
            seed_culling_threshold,
        }
    }

    /// Sets the durable-tier capacity.
    pub fn with_durable_capacity(mut self, durable_capacity: usize) -> Self {
        assert!(durable_capacity > 0, "durable_capacity must be nonzero");
        self.durable_capacity = durable_capacity;
        self
    }

    /// Sets the file-tier maximum size.
    pub fn with_file_queue_max_size(mut self, file_queue_max_size: usize) -> Self {
        assert!(file_queue_max_size > 0, "file_queue_max_size must be nonzero");
        self.file_queue_max_size = file_queue_max_size;
        self
    }

    /// Sets the favored-tier draw probability.
    pub fn with_favored_seed_prob(mut self, favored_seed_prob: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&favored_seed_prob),
            "favored_seed_prob must be in [0, 1]"
        );
        self.favored_seed_prob = favored_seed_prob;
        self
    }

    /// Sets the culling threshold.
    pub fn with_seed_culling_threshold(mut self, seed_culling_threshold: f64) -> Self {
        assert!(
            seed_culling_threshold >= 1.0,
            "seed_culling_threshold must be >= 1.0"
        );
        self.seed_culling_threshold = seed_culling_threshold;
        self
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            durable_capacity: DEFAULT_DURABLE_CAPACITY,
            file_queue_max_size: 1_000_000,
            favored_seed_prob: 0.8,
            seed_culling_threshold: 2.0,
        }
    }
}
