//! # Overlay Module
//!
//! The overlay lifecycle manager: creates a visual marker for every cell
//! that enters the tracked set, destroys the marker when the cell leaves it,
//! and owns the cell → marker mapping in between.
//!
//! ## Invariant
//!
//! Outside of a reconciliation step, the set of live marker owner cells
//! equals the tracked set exactly: no orphaned markers, no cell with two
//! markers. Marker creation failures keep the cell unmarked, which drops it
//! from the diff baseline so the next cycle retries it automatically.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use crate::scan::ScanDelta;
use crate::voxels::CellPosition;

pub mod marker;

pub use marker::{
    MarkerHost, MarkerId, MarkerSpawnError, MarkerState, MarkerVisual, OutlineMarker,
};

/// Owns every live overlay marker and its mapping to a world cell.
///
/// Marker identity allocation and destruction go exclusively through this
/// type; nothing else in the crate holds a [`MarkerId`].
#[derive(Default)]
pub struct OverlayManager {
    markers: HashMap<CellPosition, OutlineMarker>,
}

impl OverlayManager {
    /// Creates an empty overlay manager.
    pub fn new() -> Self {
        OverlayManager {
            markers: HashMap::new(),
        }
    }

    /// Applies one reconciliation delta: destroys the markers of removed
    /// cells, then spawns markers for added cells.
    ///
    /// A spawn failure is logged and the cell left unmarked; since the cell
    /// then stays out of the diff baseline, the next reconciliation cycle
    /// naturally retries it as long as it keeps matching the predicate.
    pub fn sync_to_scan(
        &mut self,
        delta: &ScanDelta,
        visual: MarkerVisual,
        host: &mut impl MarkerHost,
    ) {
        for cell in &delta.removed {
            if let Some(mut marker) = self.markers.remove(cell) {
                marker.destroy();
                host.destroy_marker(marker.id);
            }
        }

        for &cell in &delta.added {
            if self.markers.contains_key(&cell) {
                // A duplicate add would break the one-marker-per-cell
                // invariant; the diff should never produce one.
                debug!("ignoring duplicate marker add at {:?}", cell);
                continue;
            }
            match host.spawn_marker(cell, visual) {
                Ok(id) => {
                    self.markers.insert(cell, OutlineMarker::new(id, cell, visual));
                }
                Err(error) => {
                    warn!("failed to spawn marker at {:?}: {}", cell, error);
                }
            }
        }
    }

    /// Advances every marker by one simulation tick and applies the safety
    /// nets: markers past their lifetime bound or outside the vertical world
    /// bounds are destroyed even without a reconciliation delta.
    pub fn tick_markers(&mut self, host: &mut impl MarkerHost) {
        let mut discarded = Vec::new();

        for (cell, marker) in self.markers.iter_mut() {
            marker.tick();
            if marker.should_discard() {
                discarded.push(*cell);
            }
        }

        for cell in discarded {
            if let Some(mut marker) = self.markers.remove(&cell) {
                debug!(
                    "safety net discarded marker at {:?} (age {} ticks)",
                    cell,
                    marker.age()
                );
                marker.destroy();
                host.destroy_marker(marker.id);
            }
        }
    }

    /// Destroys every live marker and empties the cell → marker map.
    ///
    /// This is the only bulk-teardown path; it runs on session disable, on
    /// predicate changes, and on world/session teardown. Idempotent: calling
    /// it on an already-empty manager does nothing.
    pub fn clear_all(&mut self, host: &mut impl MarkerHost) {
        for (_, mut marker) in self.markers.drain() {
            marker.destroy();
            host.destroy_marker(marker.id);
        }
    }

    /// Returns a point-in-time copy of the cells that currently own a live
    /// marker.
    pub fn active_cells(&self) -> HashSet<CellPosition> {
        self.markers.keys().copied().collect()
    }

    /// Returns the active cells sorted by (x, y, z), for publication to the
    /// render loop in a deterministic order.
    pub fn active_cells_sorted(&self) -> Vec<CellPosition> {
        let mut cells: Vec<CellPosition> = self.markers.keys().copied().collect();
        cells.sort_unstable_by_key(|cell| (cell.x, cell.y, cell.z));
        cells
    }

    /// The number of live markers.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether no markers are live.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::test_host::RecordingHost;
    use super::*;
    use crate::scan::reconcile;
    use crate::voxels::{MaterialId, WORLD_MAX_Y};
    use cgmath::Point3;

    fn delta_adding(cells: &[(i32, i32, i32)]) -> ScanDelta {
        let current = cells.iter().map(|&(x, y, z)| Point3::new(x, y, z)).collect();
        reconcile(&Default::default(), &current)
    }

    fn visual() -> MarkerVisual {
        MarkerVisual::highlight(MaterialId::DIAMOND_ORE)
    }

    #[test]
    fn sync_creates_and_destroys_markers() {
        let mut overlay = OverlayManager::new();
        let mut host = RecordingHost::default();

        overlay.sync_to_scan(&delta_adding(&[(1, 0, 0), (2, 0, 0)]), visual(), &mut host);
        assert_eq!(overlay.len(), 2);
        assert_eq!(host.spawned.len(), 2);

        // Next scan loses (1,0,0).
        let previous = overlay.active_cells();
        let current = [Point3::new(2, 0, 0)].into_iter().collect();
        overlay.sync_to_scan(&reconcile(&previous, &current), visual(), &mut host);

        assert_eq!(overlay.active_cells(), current);
        assert_eq!(host.destroyed.len(), 1);
    }

    #[test]
    fn active_cells_match_markers_after_spawn_failure() {
        let mut overlay = OverlayManager::new();
        let mut host = RecordingHost {
            fail_next_spawns: 1,
            ..Default::default()
        };

        overlay.sync_to_scan(&delta_adding(&[(1, 0, 0), (2, 0, 0)]), visual(), &mut host);

        // One spawn failed; that cell is not tracked-with-marker.
        assert_eq!(overlay.len(), 1);

        // Retry naturally: diff the marker-owner set against the unchanged
        // scan result, the failed cell reappears as added.
        let previous = overlay.active_cells();
        let current = [Point3::new(1, 0, 0), Point3::new(2, 0, 0)]
            .into_iter()
            .collect();
        let retry = reconcile(&previous, &current);
        assert_eq!(retry.added.len(), 1);

        overlay.sync_to_scan(&retry, visual(), &mut host);
        assert_eq!(overlay.active_cells(), current);
    }

    #[test]
    fn clear_all_is_idempotent() {
        let mut overlay = OverlayManager::new();
        let mut host = RecordingHost::default();

        overlay.sync_to_scan(&delta_adding(&[(0, 0, 0), (1, 1, 1)]), visual(), &mut host);
        overlay.clear_all(&mut host);
        assert!(overlay.is_empty());
        assert_eq!(host.destroyed.len(), 2);

        overlay.clear_all(&mut host);
        assert!(overlay.is_empty());
        assert_eq!(host.destroyed.len(), 2);
    }

    #[test]
    fn lifetime_safety_net_discards_stale_markers() {
        let mut overlay = OverlayManager::new();
        let mut host = RecordingHost::default();

        overlay.sync_to_scan(&delta_adding(&[(0, 0, 0)]), visual(), &mut host);

        for _ in 0..=marker::MAX_MARKER_LIFETIME_TICKS {
            overlay.tick_markers(&mut host);
        }

        assert!(overlay.is_empty());
        assert_eq!(host.destroyed.len(), 1);
    }

    #[test]
    fn vertical_bounds_safety_net_discards_mis_spawned_markers() {
        let mut overlay = OverlayManager::new();
        let mut host = RecordingHost::default();

        overlay.sync_to_scan(
            &delta_adding(&[(0, WORLD_MAX_Y + 10, 0), (0, 0, 0)]),
            visual(),
            &mut host,
        );
        assert_eq!(overlay.len(), 2);

        overlay.tick_markers(&mut host);

        assert_eq!(overlay.len(), 1);
        assert_eq!(overlay.active_cells_sorted(), vec![Point3::new(0, 0, 0)]);
    }

    #[test]
    fn sorted_view_is_deterministic() {
        let mut overlay = OverlayManager::new();
        let mut host = RecordingHost::default();

        overlay.sync_to_scan(
            &delta_adding(&[(2, 0, 0), (1, 3, 0), (1, 0, 5)]),
            visual(),
            &mut host,
        );

        assert_eq!(
            overlay.active_cells_sorted(),
            vec![
                Point3::new(1, 0, 5),
                Point3::new(1, 3, 0),
                Point3::new(2, 0, 0),
            ]
        );
    }
}
