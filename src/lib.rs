//! Seed queue core for a coverage-guided / concolic hybrid fuzzer.
//!
//! This crate stores, prioritizes, durably retains, and periodically
//! minimizes the seeds that drive two fuzzing loops:
//!
//! - a **concolic** loop ([`ConcolicQueue`]) that consumes each seed at
//!   most once, in strict favored-then-normal priority order;
//! - a **random** loop ([`RandFuzzQueue`]) that repeatedly re-samples
//!   surviving seeds, with a favored tier periodically culled by a greedy
//!   set-cover minimizer ([`greedy_minimize`]).
//!
//! Both tier queues are built from two lower-level primitives: a purely
//! functional FIFO ([`PureQueue`]) and a fixed-capacity round-robin array
//! that only removes on demand ([`DurableQueue`]), plus a disk-spilled
//! overflow FIFO ([`FileQueue`]) shared by both tiers' normal side.
//!
//! The crate is generic over the seed representation, the coverage oracle,
//! and the wire codec — it never re-interprets the bytes a [`SeedCodec`]
//! produces, and it never computes coverage itself, only consuming
//! [`CoverageOracle::node_set`].
//!
//! # Concurrency
//!
//! Every type here is single-threaded per instance: all operations on a
//! given queue are expected to be serialized by the owning fuzzing loop.
//! Two independent loops may run in parallel only if they own distinct
//! instances pointed at distinct directories.

mod codec;
mod concolic_queue;
mod config;
mod durable_queue;
mod error;
mod file_queue;
mod invariants;
mod minimize;
mod oracle;
mod priority;
mod pure_queue;
mod rand_queue;

pub use codec::{BincodeCodec, SeedCodec};
pub use concolic_queue::ConcolicQueue;
pub use config::{QueueConfig, DEFAULT_DURABLE_CAPACITY};
pub use durable_queue::DurableQueue;
pub use error::QueueError;
pub use file_queue::FileQueue;
pub use minimize::greedy_minimize;
pub use oracle::CoverageOracle;
pub use priority::Priority;
pub use pure_queue::PureQueue;
pub use rand_queue::RandFuzzQueue;
