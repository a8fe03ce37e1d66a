//! C2: a fixed-capacity round-robin array that only removes on demand.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::QueueError;
use crate::invariants::{debug_assert_durable_count, debug_assert_durable_finger};

/// A queue whose `fetch` never removes — elements live until an explicit
/// [`DurableQueue::remove`]. Supports sampling with replacement via
/// round-robin `fetch`, which is what the random fuzzing loop needs to
/// re-execute favored seeds many times.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurableQueue<T> {
    slots: Vec<T>,
    capacity: usize,
    count: usize,
    finger: usize,
}

impl<T: Clone> DurableQueue<T> {
    /// Allocates a `capacity`-sized array filled with `sentinel`. The
    /// sentinel is never observable through `fetch`, since `fetch` only
    /// ever reads `slots[0..count)` and `count` starts at zero.
    pub fn initialize(sentinel: T, capacity: usize) -> Self {
        Self {
            slots: vec![sentinel; capacity],
            capacity,
            count: 0,
            finger: 0,
        }
    }
}

impl<T> DurableQueue<T> {
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn size(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn finger(&self) -> usize {
        self.finger
    }

    /// Pushes `x` onto the array. Silently drops `x` if the queue is full —
    /// seed queues are best-effort accumulators, so a full durable tier is
    /// not an error.
    pub fn enqueue(&mut self, x: T) {
        if self.count == self.capacity {
            return;
        }
        self.slots[self.count] = x;
        self.count += 1;
        debug_assert_durable_count!(self.count, self.capacity);
    }

    /// Returns the element the finger currently points at and advances the
    /// finger round-robin. Does not remove the element.
    pub fn fetch(&mut self) -> Result<&T, QueueError> {
        if self.count == 0 {
            return Err(QueueError::Empty);
        }
        if self.finger >= self.count {
            return Err(QueueError::InvalidFinger {
                finger: self.finger,
                count: self.count,
            });
        }
        let idx = self.finger;
        self.finger = (self.finger + 1) % self.count;
        debug_assert_durable_finger!(self.finger, self.count);
        Ok(&self.slots[idx])
    }

    /// Removes the element at `idx`, asserting it equals `elem` first.
    /// Left-shifts everything after `idx` down by one and fixes up the
    /// finger: if `idx < finger` the finger decrements to stay pointed at
    /// the same logical successor; otherwise it is left in place, which
    /// means a removal at exactly the finger makes the next `fetch` return
    /// what used to be the following element (this is the behavior the
    /// design mandates be preserved, not accidental).
    pub fn remove(&mut self, idx: usize, elem: &T) -> Result<(), QueueError>
    where
        T: PartialEq,
    {
        if idx >= self.count || &self.slots[idx] != elem {
            return Err(QueueError::ElementMismatch { index: idx });
        }
        self.slots[idx..self.count].rotate_left(1);
        self.count -= 1;
        if idx < self.finger {
            self.finger -= 1;
        }
        if self.finger == self.count {
            self.finger = 0;
        }
        debug_assert_durable_count!(self.count, self.capacity);
        debug_assert_durable_finger!(self.finger, self.count);
        Ok(())
    }

    /// Returns the live `(index, element)` pairs in array order, as
    /// consumed by the greedy minimizer.
    pub fn indexed_elements(&self) -> Vec<(usize, &T)> {
        self.slots[..self.count].iter().enumerate().collect()
    }

    pub fn elements(&self) -> &[T] {
        &self.slots[..self.count]
    }
}

impl<T> DurableQueue<T>
where
    T: Serialize,
{
    pub fn save(&self, path: &Path) -> Result<(), QueueError> {
        let bytes = bincode::serialize(self).map_err(|e| QueueError::Codec(e.to_string()))?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

impl<T> DurableQueue<T>
where
    T: DeserializeOwned,
{
    /// Deserializes a full snapshot. Unlike `PureQueue::load`, there is no
    /// implicit "missing path means empty" fallback here: a durable queue
    /// with no snapshot needs a sentinel, which only the caller can supply
    /// (see `RandFuzzQueue::initialize`).
    pub fn load(path: &Path) -> Result<Self, QueueError> {
        let bytes = std::fs::read(path)?;
        bincode::deserialize(&bytes).map_err(|e| QueueError::Codec(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_robin_with_removal() {
        let mut q = DurableQueue::initialize('\0', 4);
        q.enqueue('a');
        q.enqueue('b');
        q.enqueue('c');

        assert_eq!(*q.fetch().unwrap(), 'a');
        assert_eq!(*q.fetch().unwrap(), 'b');
        assert_eq!(*q.fetch().unwrap(), 'c');
        assert_eq!(*q.fetch().unwrap(), 'a');

        q.remove(1, &'b').unwrap();
        assert_eq!(q.elements(), &['a', 'c']);

        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(*q.fetch().unwrap());
        }
        assert_eq!(seen, vec!['c', 'a', 'c', 'a']);
    }

    #[test]
    fn enqueue_past_capacity_is_silently_dropped() {
        let mut q = DurableQueue::initialize(0, 2);
        q.enqueue(1);
        q.enqueue(2);
        q.enqueue(3);
        assert_eq!(q.size(), 2);
        assert_eq!(q.elements(), &[1, 2]);
    }

    #[test]
    fn remove_mismatch_is_an_error() {
        let mut q = DurableQueue::initialize(0, 4);
        q.enqueue(1);
        assert!(matches!(
            q.remove(0, &2),
            Err(QueueError::ElementMismatch { index: 0 })
        ));
    }

    #[test]
    fn fetch_on_empty_is_an_error() {
        let mut q: DurableQueue<i32> = DurableQueue::initialize(0, 4);
        assert!(matches!(q.fetch(), Err(QueueError::Empty)));
    }

    #[test]
    fn remove_at_finger_leaves_finger_in_place() {
        let mut q = DurableQueue::initialize(0, 4);
        q.enqueue(1);
        q.enqueue(2);
        q.enqueue(3);
        let _ = q.fetch(); // finger now 1
        q.remove(1, &2).unwrap(); // remove element finger points at
        assert_eq!(q.elements(), &[1, 3]);
        assert_eq!(*q.fetch().unwrap(), 3); // what used to be slots[2]
    }

    #[test]
    fn removing_empty_subset_is_identity() {
        let mut q = DurableQueue::initialize(0, 4);
        q.enqueue(1);
        q.enqueue(2);
        let before = q.elements().to_vec();
        assert_eq!(before, q.elements());
    }

    #[test]
    fn save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("durable.bin");

        let mut q = DurableQueue::initialize(0, 4);
        q.enqueue(1);
        q.enqueue(2);
        let _ = q.fetch();
        q.save(&path).unwrap();

        let loaded = DurableQueue::<i32>::load(&path).unwrap();
        assert_eq!(loaded.elements(), q.elements());
        assert_eq!(loaded.finger(), q.finger());
        assert_eq!(loaded.capacity(), q.capacity());
    }

    use proptest::prelude::*;

    #[derive(Debug, Clone, Copy)]
    enum DurableOp {
        Enqueue(i32),
        Fetch,
        RemoveAt(usize),
    }

    fn durable_op_strategy() -> impl Strategy<Value = DurableOp> {
        prop_oneof![
            any::<i32>().prop_map(DurableOp::Enqueue),
            Just(DurableOp::Fetch),
            any::<usize>().prop_map(DurableOp::RemoveAt),
        ]
    }

    proptest! {
        #[test]
        fn invariants_hold_after_any_sequence(
            ops in proptest::collection::vec(durable_op_strategy(), 0..100)
        ) {
            let mut q = DurableQueue::initialize(0, 8);
            for op in ops {
                match op {
                    DurableOp::Enqueue(x) => q.enqueue(x),
                    DurableOp::Fetch => { let _ = q.fetch(); }
                    DurableOp::RemoveAt(raw) => {
                        if q.size() > 0 {
                            let idx = raw % q.size();
                            let elem = q.elements()[idx];
                            let _ = q.remove(idx, &elem);
                        }
                    }
                }
                prop_assert!(q.size() <= q.capacity());
                prop_assert!(q.finger() < std::cmp::max(q.size(), 1));
            }
        }
    }
}
