//! # Marker Module
//!
//! Marker identity, appearance, and the per-marker state machine. Markers
//! are lightweight visual-only objects: the host engine owns their actual
//! instantiation, this module owns their bookkeeping.

use thiserror::Error;

use crate::voxels::{in_vertical_bounds, CellPosition, MaterialId};

/// Maximum marker age in simulation ticks before the safety net destroys it.
///
/// 60 seconds at 20 ticks per second. Reconciliation normally destroys
/// markers long before this; the bound only matters if reconciliation is
/// skipped, so stale markers cannot leak indefinitely.
pub const MAX_MARKER_LIFETIME_TICKS: u32 = 1200;

/// An opaque handle identifying a marker object inside the host engine.
///
/// Handles are minted by the host's object-creation API; this crate never
/// derives them from any identifier-space convention of its own.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MarkerId(u64);

impl MarkerId {
    /// Wraps a raw host identifier.
    pub fn from_raw(raw: u64) -> Self {
        MarkerId(raw)
    }

    /// The raw host identifier.
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// The appearance token carried by a marker.
///
/// `anchored` is a display-only constraint: the host must render the marker
/// exactly in place, it is not a physics property.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MarkerVisual {
    /// The material whose appearance the marker mimics.
    pub material: MaterialId,
    /// Whether the marker participates in the host's glow pass.
    pub glowing: bool,
    /// Whether the marker is pinned to its cell, ignoring host movement.
    pub anchored: bool,
}

impl MarkerVisual {
    /// The standard highlight appearance for a target material: glowing and
    /// anchored to its cell.
    pub fn highlight(material: MaterialId) -> Self {
        MarkerVisual {
            material,
            glowing: true,
            anchored: true,
        }
    }
}

/// The lifecycle state of a marker. `Destroyed` is terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkerState {
    /// Spawned this reconciliation cycle, not yet ticked.
    Created,
    /// Alive and rendered.
    Live,
    /// Torn down; the handle is no longer valid.
    Destroyed,
}

/// A per-cell visual marker tracked by the overlay manager.
#[derive(Debug)]
pub struct OutlineMarker {
    /// The host handle of the spawned marker object.
    pub id: MarkerId,
    /// The cell this marker highlights.
    pub cell: CellPosition,
    /// The marker's appearance token.
    pub visual: MarkerVisual,
    /// Age in simulation ticks since creation.
    age: u32,
    state: MarkerState,
}

impl OutlineMarker {
    /// Creates a marker in the `Created` state.
    pub fn new(id: MarkerId, cell: CellPosition, visual: MarkerVisual) -> Self {
        OutlineMarker {
            id,
            cell,
            visual,
            age: 0,
            state: MarkerState::Created,
        }
    }

    /// The marker's current lifecycle state.
    pub fn state(&self) -> MarkerState {
        self.state
    }

    /// The marker's age in ticks.
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Advances the marker by one simulation tick, promoting `Created` to
    /// `Live`.
    pub fn tick(&mut self) {
        self.age += 1;
        if self.state == MarkerState::Created {
            self.state = MarkerState::Live;
        }
    }

    /// Whether a safety net wants this marker gone: its age exceeded the
    /// lifetime bound, or its cell left the valid vertical world bounds.
    pub fn should_discard(&self) -> bool {
        self.age > MAX_MARKER_LIFETIME_TICKS || !in_vertical_bounds(self.cell)
    }

    /// Marks the marker as destroyed. Terminal.
    pub fn destroy(&mut self) {
        self.state = MarkerState::Destroyed;
    }
}

/// Error reported by a host that could not instantiate a marker object.
#[derive(Debug, Error)]
pub enum MarkerSpawnError {
    /// The host world rejected the object outright.
    #[error("host world rejected marker object: {0}")]
    Rejected(String),
    /// The host has exhausted whatever budget it allots to overlay objects.
    #[error("host marker budget exhausted")]
    BudgetExhausted,
}

/// The host-owned marker instantiation API.
///
/// The overlay manager calls this to materialize and tear down the visual
/// objects backing highlighted cells. Hosts mint the returned [`MarkerId`]s
/// themselves; destroying an id the host no longer knows must be a no-op.
pub trait MarkerHost {
    /// Instantiates a marker object for `cell` with the given appearance.
    fn spawn_marker(
        &mut self,
        cell: CellPosition,
        visual: MarkerVisual,
    ) -> Result<MarkerId, MarkerSpawnError>;

    /// Tears down a previously spawned marker object.
    fn destroy_marker(&mut self, id: MarkerId);
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Point3;
    use crate::voxels::WORLD_MAX_Y;

    #[test]
    fn marker_goes_live_on_first_tick() {
        let mut marker = OutlineMarker::new(
            MarkerId::from_raw(1),
            Point3::new(0, 0, 0),
            MarkerVisual::highlight(MaterialId::DIAMOND_ORE),
        );
        assert_eq!(marker.state(), MarkerState::Created);

        marker.tick();
        assert_eq!(marker.state(), MarkerState::Live);
        assert_eq!(marker.age(), 1);
    }

    #[test]
    fn lifetime_bound_triggers_discard() {
        let mut marker = OutlineMarker::new(
            MarkerId::from_raw(1),
            Point3::new(0, 0, 0),
            MarkerVisual::highlight(MaterialId::DIAMOND_ORE),
        );

        for _ in 0..MAX_MARKER_LIFETIME_TICKS {
            marker.tick();
            assert!(!marker.should_discard());
        }

        marker.tick();
        assert!(marker.should_discard());
    }

    #[test]
    fn out_of_bounds_cell_triggers_discard() {
        let marker = OutlineMarker::new(
            MarkerId::from_raw(2),
            Point3::new(0, WORLD_MAX_Y + 1, 0),
            MarkerVisual::highlight(MaterialId::IRON_ORE),
        );
        assert!(marker.should_discard());
    }
}
