//! # Voxels Module
//!
//! Cell addressing, material identification, renderable cell geometry, and
//! the read-only world accessor boundary. Also provides `GridWorld`, a
//! chunked in-memory world implementation used by tests and embedding demos.

use cgmath::Point3;

pub mod chunk;
pub mod geometry;
pub mod material;
pub mod world;

pub use geometry::{CellGeometry, CellSide};
pub use material::MaterialId;
pub use world::{GridWorld, WorldAccessor};

/// Identifies a unique cell of the voxel world grid.
///
/// Value type with coordinate equality and hashing; this is the key for
/// every tracked-set, marker-map, and world lookup in the crate.
pub type CellPosition = Point3<i32>;

/// The lowest valid cell Y coordinate of the world.
pub const WORLD_MIN_Y: i32 = -64;

/// The highest valid cell Y coordinate of the world.
pub const WORLD_MAX_Y: i32 = 320;

/// Checks whether a cell's vertical position lies inside the valid world
/// bounds.
pub fn in_vertical_bounds(cell: CellPosition) -> bool {
    (WORLD_MIN_Y..=WORLD_MAX_Y).contains(&cell.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_bounds_are_inclusive() {
        assert!(in_vertical_bounds(Point3::new(0, WORLD_MIN_Y, 0)));
        assert!(in_vertical_bounds(Point3::new(0, WORLD_MAX_Y, 0)));
        assert!(!in_vertical_bounds(Point3::new(0, WORLD_MIN_Y - 1, 0)));
        assert!(!in_vertical_bounds(Point3::new(0, WORLD_MAX_Y + 1, 0)));
    }
}
