//! # Chunk Module
//!
//! This module provides the `GridChunk` struct for managing 16x16x16 cells of
//! material data inside [`GridWorld`](super::world::GridWorld).
//!
//! ## Storage
//!
//! Each chunk keeps a dense `Vec<MaterialIdSize>` of cell materials plus a
//! bit vector with one occupancy bit per cell (1 = non-air). The bit vector
//! gives O(1) air checks and a cheap whole-chunk emptiness test without
//! touching the material array.

use bitvec::prelude::BitVec;
use cgmath::Point3;
use noise::NoiseFn;
use noise::Perlin;

use super::material::{MaterialId, MaterialIdSize};

/// The dimension (width, height, depth) of a chunk in cells.
pub const CHUNK_DIMENSION: i32 = 16;
/// The number of cells in a single 2D plane of a chunk (CHUNK_DIMENSION²).
pub const CHUNK_PLANE_SIZE: i32 = CHUNK_DIMENSION * CHUNK_DIMENSION;
/// The total number of cells in a chunk (CHUNK_DIMENSION³).
pub const CHUNK_SIZE: i32 = CHUNK_PLANE_SIZE * CHUNK_DIMENSION;

/// Threshold above which Perlin noise is considered solid during generation.
pub const PERLIN_POSITIVE_THRESHOLD: f64 = 0.2;
/// Threshold below which Perlin noise is considered solid during generation.
pub const PERLIN_NEGATIVE_THRESHOLD: f64 = -0.2;
/// Scaling factor applied to world coordinates when sampling Perlin noise.
pub const PERLIN_SCALE_FACTOR: f64 = 0.02;

/// Fraction of generated solid cells that carry an ore instead of stone.
const ORE_SEED_CHANCE: f64 = 0.04;

/// A 16x16x16 region of cell materials.
///
/// Chunks are the unit of residency in `GridWorld`: a cell whose chunk is
/// absent from the world map belongs to an unloaded region.
pub struct GridChunk {
    /// The position of this chunk in chunk coordinates (not cell coordinates).
    pub position: Point3<i32>,

    /// One bit per cell, set when the cell holds a non-air material.
    /// Bits are stored in row-major order (x, then y, then z).
    occupied: BitVec,

    /// Dense per-cell material ids, in the same order as `occupied`.
    materials: Vec<MaterialIdSize>,
}

impl GridChunk {
    /// Creates a new, completely empty chunk (all cells are air).
    pub fn empty(position: Point3<i32>) -> Self {
        GridChunk {
            position,
            occupied: BitVec::repeat(false, CHUNK_SIZE as usize),
            materials: vec![MaterialId::AIR as MaterialIdSize; CHUNK_SIZE as usize],
        }
    }

    /// Creates a chunk completely filled with the given material.
    pub fn solid(position: Point3<i32>, material: MaterialId) -> Self {
        GridChunk {
            position,
            occupied: BitVec::repeat(!material.is_air(), CHUNK_SIZE as usize),
            materials: vec![material as MaterialIdSize; CHUNK_SIZE as usize],
        }
    }

    /// Generates an ore-bearing chunk using Perlin noise.
    ///
    /// The noise sample decides solidity the same way the terrain of the
    /// surrounding engine does; solid cells are stone with a small random
    /// fraction replaced by ore.
    pub fn perlin(position: Point3<i32>) -> Self {
        let perlin = Perlin::new(0);
        let mut chunk = GridChunk::empty(position);

        for z in 0..CHUNK_DIMENSION {
            for y in 0..CHUNK_DIMENSION {
                for x in 0..CHUNK_DIMENSION {
                    let cell = Point3::new(
                        x + CHUNK_DIMENSION * position.x,
                        y + CHUNK_DIMENSION * position.y,
                        z + CHUNK_DIMENSION * position.z,
                    );
                    let sample = perlin.get(Self::to_perlin_pos(cell, PERLIN_SCALE_FACTOR));
                    if !(PERLIN_NEGATIVE_THRESHOLD..=PERLIN_POSITIVE_THRESHOLD).contains(&sample) {
                        let material = if fastrand::f64() < ORE_SEED_CHANCE {
                            MaterialId::random_ore()
                        } else {
                            MaterialId::STONE
                        };
                        chunk.set_material(x as usize, y as usize, z as usize, material);
                    }
                }
            }
        }

        chunk
    }

    /// Converts cell coordinates to scaled coordinates for noise sampling.
    fn to_perlin_pos(cell: Point3<i32>, scale_factor: f64) -> [f64; 3] {
        [
            (cell.x as f64 * scale_factor),
            (cell.y as f64 * scale_factor),
            (cell.z as f64 * scale_factor),
        ]
    }

    /// The storage index of a chunk-relative cell coordinate.
    fn cell_index(cx: usize, cy: usize, cz: usize) -> usize {
        cx + CHUNK_DIMENSION as usize * cy + CHUNK_PLANE_SIZE as usize * cz
    }

    /// The material at the given chunk-relative coordinates.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    pub fn material_at(&self, cx: usize, cy: usize, cz: usize) -> MaterialId {
        let index = Self::cell_index(cx, cy, cz);
        if !self.occupied[index] {
            return MaterialId::AIR;
        }
        MaterialId::from_id(self.materials[index])
    }

    /// Sets the material at the given chunk-relative coordinates, keeping the
    /// occupancy bit in sync.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    pub fn set_material(&mut self, cx: usize, cy: usize, cz: usize, material: MaterialId) {
        let index = Self::cell_index(cx, cy, cz);
        self.occupied.set(index, !material.is_air());
        self.materials[index] = material as MaterialIdSize;
    }

    /// Whether every cell of this chunk is air.
    pub fn is_empty(&self) -> bool {
        self.occupied.not_any()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_chunk_is_all_air() {
        let chunk = GridChunk::empty(Point3::new(0, 0, 0));
        assert!(chunk.is_empty());
        assert_eq!(chunk.material_at(0, 0, 0), MaterialId::AIR);
        assert_eq!(chunk.material_at(15, 15, 15), MaterialId::AIR);
    }

    #[test]
    fn set_material_updates_occupancy() {
        let mut chunk = GridChunk::empty(Point3::new(0, 0, 0));

        chunk.set_material(3, 4, 5, MaterialId::DIAMOND_ORE);
        assert!(!chunk.is_empty());
        assert_eq!(chunk.material_at(3, 4, 5), MaterialId::DIAMOND_ORE);

        chunk.set_material(3, 4, 5, MaterialId::AIR);
        assert!(chunk.is_empty());
        assert_eq!(chunk.material_at(3, 4, 5), MaterialId::AIR);
    }

    #[test]
    fn solid_chunk_holds_the_material_everywhere() {
        let chunk = GridChunk::solid(Point3::new(1, -1, 2), MaterialId::STONE);
        assert_eq!(chunk.material_at(0, 0, 0), MaterialId::STONE);
        assert_eq!(chunk.material_at(7, 8, 9), MaterialId::STONE);
    }
}
