//! Per-enqueue priority tag.

/// Two-valued priority assigned by the caller at `enqueue` time.
///
/// Priority is never stored alongside the seed; it only determines which
/// tier of a two-tier queue (`ConcolicQueue`, `RandFuzzQueue`) receives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    Favored,
    Normal,
}
