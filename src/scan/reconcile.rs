//! # Reconcile Module
//!
//! Diffs the newly scanned match set against the previously tracked set,
//! producing the added/removed deltas that drive the overlay lifecycle.

use std::collections::HashSet;

use crate::voxels::CellPosition;

/// The outcome of diffing two consecutive scans.
///
/// Both lists are sorted by (x, y, z) so the delta for a fixed input pair is
/// deterministic and tests stay reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScanDelta {
    /// Cells present in the current scan but not in the previous one.
    pub added: Vec<CellPosition>,
    /// Cells present in the previous scan but not in the current one.
    pub removed: Vec<CellPosition>,
}

impl ScanDelta {
    /// Whether this delta changes nothing.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Computes `added = current − previous` and `removed = previous − current`.
///
/// Degenerate cases fall out of the set algebra: an empty `previous` (first
/// scan) yields `added == current`; an empty `current` removes everything.
pub fn reconcile(
    previous: &HashSet<CellPosition>,
    current: &HashSet<CellPosition>,
) -> ScanDelta {
    let mut added: Vec<CellPosition> = current.difference(previous).copied().collect();
    let mut removed: Vec<CellPosition> = previous.difference(current).copied().collect();

    added.sort_unstable_by_key(|cell| (cell.x, cell.y, cell.z));
    removed.sort_unstable_by_key(|cell| (cell.x, cell.y, cell.z));

    ScanDelta { added, removed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Point3;

    fn set(cells: &[(i32, i32, i32)]) -> HashSet<CellPosition> {
        cells.iter().map(|&(x, y, z)| Point3::new(x, y, z)).collect()
    }

    #[test]
    fn diff_partitions_correctly() {
        let previous = set(&[(0, 0, 0), (1, 0, 0), (2, 0, 0)]);
        let current = set(&[(1, 0, 0), (2, 0, 0), (3, 0, 0)]);

        let delta = reconcile(&previous, &current);

        assert_eq!(delta.added, vec![Point3::new(3, 0, 0)]);
        assert_eq!(delta.removed, vec![Point3::new(0, 0, 0)]);
    }

    #[test]
    fn first_scan_adds_everything() {
        let previous = HashSet::new();
        let current = set(&[(5, 1, 2), (0, 0, 0)]);

        let delta = reconcile(&previous, &current);

        assert_eq!(delta.added.len(), 2);
        assert!(delta.removed.is_empty());
    }

    #[test]
    fn empty_current_removes_everything() {
        let previous = set(&[(5, 1, 2), (0, 0, 0)]);
        let current = HashSet::new();

        let delta = reconcile(&previous, &current);

        assert!(delta.added.is_empty());
        assert_eq!(delta.removed.len(), 2);
    }

    #[test]
    fn identical_sets_produce_an_empty_delta() {
        let cells = set(&[(1, 2, 3), (-4, 5, -6)]);
        let delta = reconcile(&cells, &cells.clone());
        assert!(delta.is_empty());
    }

    #[test]
    fn applying_the_delta_reconstructs_current() {
        let previous = set(&[(0, 0, 0), (1, 1, 1), (2, 2, 2), (-1, 0, 3)]);
        let current = set(&[(1, 1, 1), (9, 9, 9), (-1, 0, 3), (0, 5, 0)]);

        let delta = reconcile(&previous, &current);

        // (previous ∪ added) \ removed == current
        let mut reconstructed = previous.clone();
        reconstructed.extend(delta.added.iter().copied());
        for cell in &delta.removed {
            reconstructed.remove(cell);
        }
        assert_eq!(reconstructed, current);
    }

    #[test]
    fn delta_ordering_is_deterministic() {
        let previous = HashSet::new();
        let current = set(&[(2, 0, 0), (1, 5, 0), (1, 0, 9), (1, 0, 2)]);

        let delta = reconcile(&previous, &current);

        assert_eq!(
            delta.added,
            vec![
                Point3::new(1, 0, 2),
                Point3::new(1, 0, 9),
                Point3::new(1, 5, 0),
                Point3::new(2, 0, 0),
            ]
        );
    }
}
