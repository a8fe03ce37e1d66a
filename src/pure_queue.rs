//! C1: a two-list purely functional FIFO.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::QueueError;

/// A FIFO built from two stacks. The logical queue is `pending` followed by
/// `pushed` reversed; `enqueue` is O(1), `dequeue` is amortized O(1) because
/// each element is moved from `pushed` to `pending` at most once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PureQueue<T> {
    pushed: Vec<T>,
    pending: Vec<T>,
}

impl<T> Default for PureQueue<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> PureQueue<T> {
    /// Returns a queue with both sides empty.
    pub fn empty() -> Self {
        Self {
            pushed: Vec::new(),
            pending: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pushed.is_empty() && self.pending.is_empty()
    }

    pub fn size(&self) -> usize {
        self.pushed.len() + self.pending.len()
    }

    /// Pushes `x` onto the queue. Never fails.
    pub fn enqueue(&mut self, x: T) {
        self.pushed.push(x);
    }

    /// Removes and returns the head of the queue, reversing `pushed` into
    /// `pending` first if `pending` is empty.
    pub fn dequeue(&mut self) -> Result<T, QueueError> {
        if self.pending.is_empty() {
            self.pushed.reverse();
            std::mem::swap(&mut self.pushed, &mut self.pending);
        }
        self.pending.pop().ok_or(QueueError::Empty)
    }

    /// Returns a reference to the head of the queue without consuming it.
    pub fn peek(&mut self) -> Result<&T, QueueError> {
        if self.pending.is_empty() {
            self.pushed.reverse();
            std::mem::swap(&mut self.pushed, &mut self.pending);
        }
        self.pending.last().ok_or(QueueError::Empty)
    }

    /// Drops the head of the queue without returning it.
    pub fn drop_head(&mut self) -> Result<(), QueueError> {
        self.dequeue().map(|_| ())
    }

    /// Returns the logical element list in dequeue order.
    pub fn elements(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = self.pending.clone();
        out.extend(self.pushed.iter().rev().cloned());
        out
    }
}

impl<T> PureQueue<T>
where
    T: Serialize,
{
    /// Serializes the full state to `path`.
    pub fn save(&self, path: &Path) -> Result<(), QueueError> {
        let bytes =
            bincode::serialize(self).map_err(|e| QueueError::Codec(e.to_string()))?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

impl<T> PureQueue<T>
where
    T: DeserializeOwned,
{
    /// Deserializes state from `path`. A missing path returns `empty()`.
    pub fn load(path: &Path) -> Result<Self, QueueError> {
        if !path.exists() {
            return Ok(Self::empty());
        }
        let bytes = std::fs::read(path)?;
        bincode::deserialize(&bytes).map_err(|e| QueueError::Codec(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_ordering_under_interleaving() {
        let mut q = PureQueue::empty();
        q.enqueue(1);
        q.enqueue(2);
        assert_eq!(q.dequeue().unwrap(), 1);
        q.enqueue(3);
        assert_eq!(q.dequeue().unwrap(), 2);
        assert_eq!(q.dequeue().unwrap(), 3);
        assert!(q.is_empty());
    }

    #[test]
    fn dequeue_on_empty_fails() {
        let mut q: PureQueue<i32> = PureQueue::empty();
        assert!(matches!(q.dequeue(), Err(QueueError::Empty)));
    }

    #[test]
    fn peek_does_not_consume() {
        let mut q = PureQueue::empty();
        q.enqueue("a");
        assert_eq!(*q.peek().unwrap(), "a");
        assert_eq!(q.size(), 1);
        assert_eq!(q.dequeue().unwrap(), "a");
    }

    #[test]
    fn elements_reflects_dequeue_order() {
        let mut q = PureQueue::empty();
        q.enqueue(1);
        q.enqueue(2);
        let _ = q.dequeue();
        q.enqueue(3);
        q.enqueue(4);
        assert_eq!(q.elements(), vec![2, 3, 4]);
    }

    #[test]
    fn save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pure.bin");

        let mut q = PureQueue::empty();
        q.enqueue(10);
        q.enqueue(20);
        let _ = q.dequeue();
        q.enqueue(30);
        q.save(&path).unwrap();

        let loaded = PureQueue::<i32>::load(&path).unwrap();
        assert_eq!(loaded.elements(), q.elements());
        assert_eq!(loaded.size(), q.size());
    }

    #[test]
    fn load_missing_path_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.bin");
        let q = PureQueue::<i32>::load(&path).unwrap();
        assert!(q.is_empty());
    }

    use proptest::prelude::*;

    #[derive(Debug, Clone, Copy)]
    enum Op {
        Enqueue(i32),
        Dequeue,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![any::<i32>().prop_map(Op::Enqueue), Just(Op::Dequeue)]
    }

    proptest! {
        #[test]
        fn fifo_order_matches_model(ops in proptest::collection::vec(op_strategy(), 0..200)) {
            let mut q = PureQueue::empty();
            let mut model: std::collections::VecDeque<i32> = std::collections::VecDeque::new();
            for op in ops {
                match op {
                    Op::Enqueue(x) => {
                        q.enqueue(x);
                        model.push_back(x);
                    }
                    Op::Dequeue => {
                        let expected = model.pop_front();
                        let actual = q.dequeue().ok();
                        prop_assert_eq!(actual, expected);
                    }
                }
            }
            prop_assert_eq!(q.size(), model.len());
        }
    }
}
