//! # Cell Geometry Module
//!
//! Renderable geometry for a single world cell. A cell renders as an
//! axis-aligned unit cube; this module describes its six faces in a form the
//! outline pass can consume without knowing anything about chunks or worlds.

use super::material::{MaterialId, MATERIAL_FACE_TEXTURES};

/// Represents the six faces of a cell's unit cube.
///
/// Each variant is assigned a unique integer value matching the order of the
/// per-face texture index tables: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT].
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum CellSide {
    /// The front face (facing positive Z)
    FRONT = 0,

    /// The back face (facing negative Z)
    BACK = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

impl CellSide {
    /// Returns all six cell faces in table order.
    pub fn all() -> [CellSide; 6] {
        [
            CellSide::FRONT,
            CellSide::BACK,
            CellSide::BOTTOM,
            CellSide::TOP,
            CellSide::LEFT,
            CellSide::RIGHT,
        ]
    }

    /// The four corners of this face on the unit cube `[0,1]³`, in the order
    /// lower-left, lower-right, upper-left, upper-right as seen from outside
    /// the cube.
    pub fn unit_corners(self) -> [[f32; 3]; 4] {
        match self {
            CellSide::FRONT => [
                [0.0, 0.0, 1.0],
                [1.0, 0.0, 1.0],
                [0.0, 1.0, 1.0],
                [1.0, 1.0, 1.0],
            ],
            CellSide::BACK => [
                [1.0, 0.0, 0.0],
                [0.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
            ],
            CellSide::BOTTOM => [
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0],
                [1.0, 0.0, 1.0],
            ],
            CellSide::TOP => [
                [0.0, 1.0, 1.0],
                [1.0, 1.0, 1.0],
                [0.0, 1.0, 0.0],
                [1.0, 1.0, 0.0],
            ],
            CellSide::LEFT => [
                [0.0, 0.0, 0.0],
                [0.0, 0.0, 1.0],
                [0.0, 1.0, 0.0],
                [0.0, 1.0, 1.0],
            ],
            CellSide::RIGHT => [
                [1.0, 0.0, 1.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 1.0],
                [1.0, 1.0, 0.0],
            ],
        }
    }
}

/// A single face of a cell's render geometry.
#[derive(Debug, Clone, Copy)]
pub struct CellFace {
    /// Face corners on the unit cube, in (ll, lr, ul, ur) order.
    pub corners: [[f32; 3]; 4],
    /// Which side of the cell this face covers.
    pub side: CellSide,
    /// Index of this face's texture in the host's atlas.
    pub texture_index: usize,
}

/// The complete render geometry of a cell: up to six unit-cube faces.
#[derive(Debug, Clone)]
pub struct CellGeometry {
    /// The drawable faces of the cell.
    pub faces: Vec<CellFace>,
}

impl CellGeometry {
    /// Whether this geometry has no drawable faces.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// Builds the renderable geometry for a material.
///
/// Returns `None` for materials without drawable geometry (air). All other
/// materials render as a full unit cube with per-face texture indices.
pub fn cell_geometry(material: MaterialId) -> Option<CellGeometry> {
    if material.is_air() {
        return None;
    }

    let textures = &MATERIAL_FACE_TEXTURES[material as usize - 1];
    let faces = CellSide::all()
        .into_iter()
        .map(|side| CellFace {
            corners: side.unit_corners(),
            side,
            texture_index: textures[side as usize],
        })
        .collect();

    Some(CellGeometry { faces })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn air_has_no_geometry() {
        assert!(cell_geometry(MaterialId::AIR).is_none());
    }

    #[test]
    fn solid_materials_render_six_faces() {
        let geometry = cell_geometry(MaterialId::DIAMOND_ORE).unwrap();
        assert_eq!(geometry.faces.len(), 6);
        assert!(!geometry.is_empty());
    }

    #[test]
    fn corners_stay_on_the_unit_cube() {
        for side in CellSide::all() {
            for corner in side.unit_corners() {
                for component in corner {
                    assert!(component == 0.0 || component == 1.0);
                }
            }
        }
    }
}
