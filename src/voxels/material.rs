//! # Material Module
//!
//! This module defines the material types a world cell can hold.
//! It provides functionality for material identification, conversion, and
//! name-based lookup for host configuration surfaces.

use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

/// The underlying integer type used to represent materials in memory.
/// This is used for compact storage of chunk data.
pub type MaterialIdSize = u8;

/// Enumerates the material types a world cell can hold.
///
/// The `FromPrimitive` derive allows conversion from the compact integer
/// representation used in chunk storage.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, Serialize, Deserialize,
)]
#[allow(non_camel_case_types)]
pub enum MaterialId {
    /// An air cell, non-solid and without renderable geometry.
    AIR,

    /// Plain stone, the bulk filler material.
    STONE,

    /// A dirt cell.
    DIRT,

    /// Coal ore embedded in stone.
    COAL_ORE,

    /// Iron ore embedded in stone.
    IRON_ORE,

    /// Gold ore embedded in stone.
    GOLD_ORE,

    /// Diamond ore, the default highlight target.
    DIAMOND_ORE,
}

/// Maps each non-air material to its face texture indices.
///
/// The outer array is indexed by `MaterialId as usize - 1` (air has no
/// textures). The inner array contains 6 texture indices, one per face in
/// `CellSide` order: [Front, Back, Bottom, Top, Left, Right].
pub static MATERIAL_FACE_TEXTURES: [[usize; 6]; 6] = [
    [0, 0, 0, 0, 0, 0], // STONE
    [1, 1, 1, 1, 1, 1], // DIRT
    [2, 2, 2, 2, 2, 2], // COAL_ORE
    [3, 3, 3, 3, 3, 3], // IRON_ORE
    [4, 4, 4, 4, 4, 4], // GOLD_ORE
    [5, 5, 5, 5, 5, 5], // DIAMOND_ORE
];

/// Compile-time map from material names to their compact ids.
///
/// Host settings surfaces address materials by name; this keeps the lookup
/// allocation-free.
static NAME_TO_MATERIAL: phf::Map<&'static str, MaterialIdSize> = phf::phf_map! {
    "air" => 0u8,
    "stone" => 1u8,
    "dirt" => 2u8,
    "coal_ore" => 3u8,
    "iron_ore" => 4u8,
    "gold_ore" => 5u8,
    "diamond_ore" => 6u8,
};

impl MaterialId {
    /// Converts a `MaterialIdSize` to a `MaterialId`.
    ///
    /// # Panics
    /// Panics if the input value doesn't correspond to a valid `MaterialId`.
    pub fn from_id(id: MaterialIdSize) -> Self {
        let material_option = num::FromPrimitive::from_u8(id);
        material_option.unwrap()
    }

    /// Looks up a material by its lowercase name (e.g. `"diamond_ore"`).
    pub fn from_name(name: &str) -> Option<Self> {
        NAME_TO_MATERIAL.get(name).map(|id| Self::from_id(*id))
    }

    /// The lowercase name of this material.
    pub fn name(self) -> &'static str {
        match self {
            MaterialId::AIR => "air",
            MaterialId::STONE => "stone",
            MaterialId::DIRT => "dirt",
            MaterialId::COAL_ORE => "coal_ore",
            MaterialId::IRON_ORE => "iron_ore",
            MaterialId::GOLD_ORE => "gold_ore",
            MaterialId::DIAMOND_ORE => "diamond_ore",
        }
    }

    /// Whether this material is air (no substance, no geometry).
    pub fn is_air(self) -> bool {
        self == MaterialId::AIR
    }

    /// Whether this material is one of the ore variants.
    pub fn is_ore(self) -> bool {
        matches!(
            self,
            MaterialId::COAL_ORE
                | MaterialId::IRON_ORE
                | MaterialId::GOLD_ORE
                | MaterialId::DIAMOND_ORE
        )
    }

    /// Picks a random ore material.
    ///
    /// Used by the terrain generators to seed ore into stone.
    pub fn random_ore() -> Self {
        num::FromPrimitive::from_u8(fastrand::u8(3..7)).unwrap()
    }

    /// The base vertex tint of this material, as linear RGBA.
    ///
    /// The alpha component is 1.0 here; the outline writer overrides it to
    /// zero at ingestion so the normal appearance stays invisible.
    pub fn base_tint(self) -> [f32; 4] {
        match self {
            MaterialId::AIR => [0.0, 0.0, 0.0, 1.0],
            MaterialId::STONE => [0.5, 0.5, 0.5, 1.0],
            MaterialId::DIRT => [0.55, 0.4, 0.25, 1.0],
            MaterialId::COAL_ORE => [0.2, 0.2, 0.2, 1.0],
            MaterialId::IRON_ORE => [0.85, 0.72, 0.6, 1.0],
            MaterialId::GOLD_ORE => [0.95, 0.85, 0.3, 1.0],
            MaterialId::DIAMOND_ORE => [0.4, 0.9, 0.9, 1.0],
        }
    }
}
