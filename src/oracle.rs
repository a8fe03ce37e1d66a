//! The external coverage oracle.

use std::collections::HashSet;
use std::hash::Hash;

/// `NodeSet(seed) -> set<NodeId>`, supplied by the coverage-instrumentation
/// extractor. Calls may be expensive; the minimizer calls this once per live
/// seed per `minimize` invocation.
pub trait CoverageOracle<Seed, Node: Eq + Hash + Clone> {
    fn node_set(&self, seed: &Seed) -> HashSet<Node>;
}
