//! # Scan Module
//!
//! The spatial scanner and the tracked-set reconciler.
//!
//! ## Architecture
//!
//! A scan enumerates the axis-aligned cube of cells around a reference point
//! and tests each resident cell against a match predicate; it is a pure
//! function of world state at call time. The reconciler then diffs the scan
//! result against the previously tracked set, producing the added/removed
//! deltas that drive marker creation and destruction.
//!
//! ## Performance Considerations
//!
//! A scan costs O(radius³) world lookups and runs synchronously inside one
//! simulation tick. The configuration layer clamps the radius so the
//! per-tick cost stays bounded; the tradeoff is that matches beyond the
//! clamped radius go unreported until the reference point moves closer.

use std::collections::HashSet;

use cgmath::Point3;

use crate::voxels::{CellPosition, MaterialId, WorldAccessor};

pub mod reconcile;

pub use reconcile::{reconcile, ScanDelta};

/// Enumerates the cube of side `2 * radius + 1` centered on `reference` and
/// returns every cell whose material satisfies `predicate`.
///
/// Cells whose world region is not currently resident are skipped; the
/// result may therefore under-report matches near region borders, which
/// callers accept.
///
/// # Arguments
/// * `reference` - The center cell of the scanned cube
/// * `radius` - Half the cube's side length, already clamped by the caller
/// * `predicate` - The match predicate applied to each cell's material
/// * `world` - Read-only world access
///
/// # Returns
/// The set of matching cell positions. No side effects.
pub fn scan<W, P>(
    reference: CellPosition,
    radius: i32,
    predicate: P,
    world: &W,
) -> HashSet<CellPosition>
where
    W: WorldAccessor,
    P: Fn(MaterialId) -> bool,
{
    let mut matches = HashSet::new();

    for x in -radius..=radius {
        for y in -radius..=radius {
            for z in -radius..=radius {
                let cell = Point3::new(reference.x + x, reference.y + y, reference.z + z);

                if !world.is_region_loaded(cell) {
                    continue;
                }

                if predicate(world.material_at(cell)) {
                    matches.insert(cell);
                }
            }
        }
    }

    matches
}
