//! Debug assertion macros for queue invariants.
//!
//! These are active only in debug builds (`#[cfg(debug_assertions)]`), so
//! there is zero overhead in release builds. Each macro corresponds to an
//! invariant documented on the struct it guards.

/// `DurableQueue`: `0 <= count <= capacity`.
macro_rules! debug_assert_durable_count {
    ($count:expr, $capacity:expr) => {
        debug_assert!(
            $count <= $capacity,
            "durable queue count {} exceeds capacity {}",
            $count,
            $capacity
        )
    };
}

/// `DurableQueue`: `0 <= finger < max(count, 1)`.
macro_rules! debug_assert_durable_finger {
    ($finger:expr, $count:expr) => {
        debug_assert!(
            $finger < std::cmp::max($count, 1),
            "durable queue finger {} out of range for count {}",
            $finger,
            $count
        )
    };
}

/// `FileQueue`: `lower_idx <= upper_idx` and the window never exceeds
/// `max_count`.
macro_rules! debug_assert_file_queue_bounds {
    ($lower:expr, $upper:expr, $max_count:expr) => {
        debug_assert!(
            $lower <= $upper,
            "file queue lower_idx {} exceeds upper_idx {}",
            $lower,
            $upper
        );
        debug_assert!(
            $upper - $lower <= $max_count,
            "file queue window {}..{} exceeds max_count {}",
            $lower,
            $upper,
            $max_count
        )
    };
}

pub(crate) use debug_assert_durable_count;
pub(crate) use debug_assert_durable_finger;
pub(crate) use debug_assert_file_queue_bounds;
