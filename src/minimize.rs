//! C6: greedy set-cover minimizer over the favored tier's coverage.

use std::collections::HashSet;
use std::hash::Hash;

use tracing::info;

use crate::oracle::CoverageOracle;

/// Runs the greedy set-cover pass over `entries` (an `(index, seed)` list,
/// normally `DurableQueue::indexed_elements`) and returns the `(index,
/// seed)` pairs that are redundant — every node they reach is already
/// covered by a previously-picked, strictly-larger-or-earlier entry.
///
/// Complexity is `O(n^2 * |N|)` in the worst case: `n` is bounded by the
/// durable queue's capacity, which keeps this acceptable for a periodic
/// maintenance pass.
pub fn greedy_minimize<Seed, Node, Oracle>(
    entries: &[(usize, Seed)],
    oracle: &Oracle,
) -> Vec<(usize, Seed)>
where
    Seed: Clone,
    Node: Eq + Hash + Clone,
    Oracle: CoverageOracle<Seed, Node>,
{
    let mut working: Vec<(usize, Seed, HashSet<Node>)> = entries
        .iter()
        .map(|(idx, seed)| {
            let nodes = oracle.node_set(seed);
            (*idx, seed.clone(), nodes)
        })
        .collect();

    let mut redundant = Vec::new();

    while !working.is_empty() {
        // Stable sort descending by |N|; a stable sort preserves the
        // original relative order of ties, which is exactly the
        // "earlier in the list wins" tie-break the algorithm requires.
        working.sort_by(|a, b| b.2.len().cmp(&a.2.len()));

        let (_, _, chosen_nodes) = &working[0];
        let chosen_nodes = chosen_nodes.clone();
        let (picked_idx, picked_seed, _) = working.remove(0);
        let _ = (picked_idx, picked_seed);

        let mut next_redundant_at = Vec::new();
        for (i, (_, _, nodes)) in working.iter_mut().enumerate() {
            nodes.retain(|n| !chosen_nodes.contains(n));
            if nodes.is_empty() {
                next_redundant_at.push(i);
            }
        }

        // Remove redundant entries back-to-front so earlier indices in
        // `next_redundant_at` stay valid.
        for i in next_redundant_at.into_iter().rev() {
            let (idx, seed, _) = working.remove(i);
            redundant.push((idx, seed));
        }
    }

    info!(
        removed = redundant.len(),
        survivors = entries.len() - redundant.len(),
        "greedy minimization complete"
    );

    redundant
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapOracle(HashMap<u32, HashSet<u32>>);

    impl CoverageOracle<u32, u32> for MapOracle {
        fn node_set(&self, seed: &u32) -> HashSet<u32> {
            self.0.get(seed).cloned().unwrap_or_default()
        }
    }

    #[test]
    fn minimization_cover_matches_worked_example() {
        // seeds 0,1,2,3 with node sets {1,2}, {2,3}, {3}, {1}
        let oracle = MapOracle(HashMap::from([
            (0, HashSet::from([1, 2])),
            (1, HashSet::from([2, 3])),
            (2, HashSet::from([3])),
            (3, HashSet::from([1])),
        ]));
        let entries: Vec<(usize, u32)> = vec![(0, 0), (1, 1), (2, 2), (3, 3)];

        let mut redundant = greedy_minimize(&entries, &oracle);
        redundant.sort_by_key(|(idx, _)| *idx);

        assert_eq!(redundant, vec![(2, 2), (3, 3)]);
    }

    #[test]
    fn empty_input_yields_no_redundancy() {
        let oracle = MapOracle(HashMap::new());
        let entries: Vec<(usize, u32)> = vec![];
        assert!(greedy_minimize(&entries, &oracle).is_empty());
    }

    #[test]
    fn disjoint_coverage_has_no_redundant_entries() {
        let oracle = MapOracle(HashMap::from([
            (0, HashSet::from([1])),
            (1, HashSet::from([2])),
        ]));
        let entries: Vec<(usize, u32)> = vec![(0, 0), (1, 1)];
        assert!(greedy_minimize(&entries, &oracle).is_empty());
    }
}
