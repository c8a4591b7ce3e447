//! # World Module
//!
//! The read-only boundary between this crate and the host's voxel world,
//! plus `GridWorld`, a chunked in-memory implementation of that boundary.
//!
//! ## Architecture
//!
//! The scanner and the renderer only ever need three questions answered:
//! is this cell's region resident, what material does the cell hold, and
//! what does a material look like. `WorldAccessor` captures exactly that;
//! the core never mutates the world through it.
//!
//! `GridWorld` stores chunks sparsely, keyed by chunk coordinates, so an
//! absent chunk naturally models an unloaded region.

use std::collections::HashMap;

use cgmath::Point3;

use super::chunk::{GridChunk, CHUNK_DIMENSION};
use super::geometry::{cell_geometry, CellGeometry};
use super::material::MaterialId;
use super::CellPosition;

/// Read-only access to the host's voxel world.
///
/// The core depends only on this narrow interface; it never mutates the
/// world. Implementations must be cheap to query per cell, since the scanner
/// issues O(radius³) lookups per scan.
pub trait WorldAccessor {
    /// Whether the world region containing `cell` is currently resident.
    ///
    /// The scanner silently skips cells in unresident regions; that is an
    /// incomplete-information case, not an error.
    fn is_region_loaded(&self, cell: CellPosition) -> bool;

    /// The material at `cell`.
    ///
    /// For cells in unresident regions the return value is unspecified;
    /// callers are expected to check [`WorldAccessor::is_region_loaded`]
    /// first.
    fn material_at(&self, cell: CellPosition) -> MaterialId;

    /// The renderable geometry for a material, or `None` when the material
    /// has no drawable representation (air).
    fn renderable_geometry(&self, material: MaterialId) -> Option<CellGeometry> {
        cell_geometry(material)
    }
}

/// The method used to generate chunks that `GridWorld` creates on demand.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChunkGeneration {
    /// All-air chunks. The default for tests that place cells by hand.
    Empty,
    /// Chunks completely filled with one material.
    Solid(MaterialId),
    /// Perlin-noise terrain with ore seeded into the stone.
    OreSeeded,
}

/// A chunked in-memory voxel world.
///
/// Cells live in 16³ chunks stored sparsely in a hash map; a chunk that was
/// never created models an unloaded region. Used by this crate's tests and
/// by embedding demos; real hosts implement [`WorldAccessor`] over their own
/// world state instead.
pub struct GridWorld {
    /// A mapping from chunk coordinates to chunk data.
    pub chunks: HashMap<Point3<i32>, GridChunk>,
    generation: ChunkGeneration,
}

impl GridWorld {
    /// Creates a new, empty world that generates all-air chunks.
    pub fn new() -> Self {
        Self::with_generation(ChunkGeneration::Empty)
    }

    /// Creates a new, empty world with the given chunk generation method.
    pub fn with_generation(generation: ChunkGeneration) -> Self {
        GridWorld {
            chunks: HashMap::new(),
            generation,
        }
    }

    /// Splits a cell position into its chunk coordinates and the cell's
    /// chunk-relative coordinates.
    ///
    /// Uses euclidean division so cells at negative coordinates land in the
    /// correct chunk.
    fn chunk_and_local(cell: CellPosition) -> (Point3<i32>, (usize, usize, usize)) {
        let chunk = Point3::new(
            cell.x.div_euclid(CHUNK_DIMENSION),
            cell.y.div_euclid(CHUNK_DIMENSION),
            cell.z.div_euclid(CHUNK_DIMENSION),
        );
        let local = (
            cell.x.rem_euclid(CHUNK_DIMENSION) as usize,
            cell.y.rem_euclid(CHUNK_DIMENSION) as usize,
            cell.z.rem_euclid(CHUNK_DIMENSION) as usize,
        );
        (chunk, local)
    }

    /// Adds a chunk at the specified chunk coordinates if one doesn't already
    /// exist, generated with the configured method.
    pub fn add_chunk_at(&mut self, position: Point3<i32>) {
        if self.chunks.contains_key(&position) {
            return;
        }

        let chunk = match self.generation {
            ChunkGeneration::Empty => GridChunk::empty(position),
            ChunkGeneration::Solid(material) => GridChunk::solid(position, material),
            ChunkGeneration::OreSeeded => GridChunk::perlin(position),
        };

        self.chunks.insert(position, chunk);
    }

    /// Sets the material of a single cell, creating its chunk (and thereby
    /// loading its region) if needed.
    pub fn set_material(&mut self, cell: CellPosition, material: MaterialId) {
        let (chunk_pos, (cx, cy, cz)) = Self::chunk_and_local(cell);
        self.add_chunk_at(chunk_pos);
        let chunk = self.chunks.get_mut(&chunk_pos).unwrap();
        chunk.set_material(cx, cy, cz, material);
    }

    /// Replaces the material of a single cell with air.
    ///
    /// No-op when the cell's region was never loaded.
    pub fn remove_material(&mut self, cell: CellPosition) {
        let (chunk_pos, (cx, cy, cz)) = Self::chunk_and_local(cell);
        if let Some(chunk) = self.chunks.get_mut(&chunk_pos) {
            chunk.set_material(cx, cy, cz, MaterialId::AIR);
        }
    }
}

impl Default for GridWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldAccessor for GridWorld {
    fn is_region_loaded(&self, cell: CellPosition) -> bool {
        let (chunk_pos, _) = Self::chunk_and_local(cell);
        self.chunks.contains_key(&chunk_pos)
    }

    fn material_at(&self, cell: CellPosition) -> MaterialId {
        let (chunk_pos, (cx, cy, cz)) = Self::chunk_and_local(cell);
        match self.chunks.get(&chunk_pos) {
            Some(chunk) => chunk.material_at(cx, cy, cz),
            None => MaterialId::AIR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unloaded_region_reports_not_resident() {
        let world = GridWorld::new();
        assert!(!world.is_region_loaded(Point3::new(0, 0, 0)));
        assert_eq!(world.material_at(Point3::new(0, 0, 0)), MaterialId::AIR);
    }

    #[test]
    fn set_material_loads_the_region() {
        let mut world = GridWorld::new();
        let cell = Point3::new(-1, 17, 3);

        world.set_material(cell, MaterialId::IRON_ORE);

        assert!(world.is_region_loaded(cell));
        assert_eq!(world.material_at(cell), MaterialId::IRON_ORE);

        // Cells sharing the chunk became resident air.
        assert!(world.is_region_loaded(Point3::new(-2, 18, 2)));
        assert_eq!(world.material_at(Point3::new(-2, 18, 2)), MaterialId::AIR);
    }

    #[test]
    fn negative_coordinates_map_into_chunks_correctly() {
        let mut world = GridWorld::new();
        let cell = Point3::new(-1, -1, -1);

        world.set_material(cell, MaterialId::GOLD_ORE);
        assert_eq!(world.material_at(cell), MaterialId::GOLD_ORE);
        // The neighbour across the chunk border belongs to a chunk that was
        // never created.
        assert!(!world.is_region_loaded(Point3::new(0, -1, -1)));
    }

    #[test]
    fn remove_material_leaves_air() {
        let mut world = GridWorld::new();
        let cell = Point3::new(5, 5, 5);

        world.set_material(cell, MaterialId::DIAMOND_ORE);
        world.remove_material(cell);

        assert!(world.is_region_loaded(cell));
        assert_eq!(world.material_at(cell), MaterialId::AIR);
    }

    #[test]
    fn solid_generation_fills_created_chunks() {
        let mut world = GridWorld::with_generation(ChunkGeneration::Solid(MaterialId::STONE));
        world.add_chunk_at(Point3::new(0, 0, 0));
        assert_eq!(world.material_at(Point3::new(3, 3, 3)), MaterialId::STONE);
    }
}
