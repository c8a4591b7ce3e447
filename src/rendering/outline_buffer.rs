//! # Outline Buffer Module
//!
//! CPU-side accumulation of outline geometry for one frame.
//!
//! The frame is populated through a [`ZeroAlphaWriter`], which forwards RGB
//! but forces every vertex alpha to zero: the cell's normal material becomes
//! invisible, yet the geometry still occupies the outline buffer, which is
//! what the silhouette extraction keys on. This is what makes the highlight
//! visible through occluders, as opposed to re-drawing the cell brighter.

use std::sync::Arc;

use cgmath::Point3;
use lru::LruCache;

use super::vertex::OutlineVertex;
use crate::session::SessionConfig;
use crate::voxels::{CellGeometry, CellPosition, MaterialId, WorldAccessor};

/// A sink for outline vertices.
pub trait VertexWriter {
    /// Appends one vertex.
    fn push_vertex(&mut self, position: [f32; 3], color: [f32; 4]);
}

/// Wraps a vertex writer and forces every written alpha to zero.
///
/// RGB passes through untouched; only the alpha is overridden, so the
/// geometry keeps its identity in the buffer while rendering fully
/// transparent.
pub struct ZeroAlphaWriter<'a, W: VertexWriter> {
    inner: &'a mut W,
}

impl<'a, W: VertexWriter> ZeroAlphaWriter<'a, W> {
    /// Wraps the given writer.
    pub fn new(inner: &'a mut W) -> Self {
        ZeroAlphaWriter { inner }
    }
}

impl<W: VertexWriter> VertexWriter for ZeroAlphaWriter<'_, W> {
    fn push_vertex(&mut self, position: [f32; 3], color: [f32; 4]) {
        self.inner
            .push_vertex(position, [color[0], color[1], color[2], 0.0]);
    }
}

/// The outline geometry accumulated for one frame.
///
/// Quad faces are stored as four vertices plus six indices each; the whole
/// frame is uploaded and drawn in a single flush.
#[derive(Default)]
pub struct OutlineFrame {
    vertices: Vec<OutlineVertex>,
    indices: Vec<u32>,
    faces: u32,
}

impl OutlineFrame {
    /// Creates an empty frame.
    pub fn new() -> Self {
        OutlineFrame::default()
    }

    /// Whether no geometry was accumulated.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The accumulated vertices.
    pub fn vertices(&self) -> &[OutlineVertex] {
        &self.vertices
    }

    /// The accumulated indices.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// The number of indices to draw.
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Appends the two triangles for the face whose four corners were just
    /// written, in (ll, lr, ul, ur) order.
    fn push_face_indices(&mut self) {
        let base = self.faces * 4;
        self.indices
            .extend_from_slice(&[base, base + 1, base + 3, base, base + 3, base + 2]);
        self.faces += 1;
    }
}

impl VertexWriter for OutlineFrame {
    fn push_vertex(&mut self, position: [f32; 3], color: [f32; 4]) {
        self.vertices.push(OutlineVertex::new(position, color));
    }
}

/// Builds the outline frame for the given active cells.
///
/// Each cell is defensively re-checked against live world state (cells may
/// have changed between the last scan and this frame) and skipped when its
/// region is gone, its material no longer matches, or its material has no
/// drawable geometry. Cell positions are translated relative to the camera;
/// no rotation is needed for axis-aligned cells.
///
/// # Arguments
/// * `cells` - The active cell snapshot published by the session
/// * `world` - Read-only world access
/// * `config` - The session configuration (predicate and color source)
/// * `camera_position` - The camera position in world space
/// * `geometry_cache` - Per-material geometry cache owned by the render
///   manager
pub fn build_outline_frame<W: WorldAccessor>(
    cells: &[CellPosition],
    world: &W,
    config: &SessionConfig,
    camera_position: Point3<f32>,
    geometry_cache: &mut LruCache<MaterialId, Arc<CellGeometry>>,
) -> OutlineFrame {
    let mut frame = OutlineFrame::new();

    for &cell in cells {
        if !world.is_region_loaded(cell) {
            continue;
        }
        let material = world.material_at(cell);
        if !config.matches(material) {
            continue;
        }

        let geometry = match geometry_cache.get(&material) {
            Some(geometry) => geometry.clone(),
            None => match world.renderable_geometry(material) {
                Some(geometry) => {
                    let geometry = Arc::new(geometry);
                    geometry_cache.put(material, geometry.clone());
                    geometry
                }
                None => continue,
            },
        };
        if geometry.is_empty() {
            continue;
        }

        let offset = [
            cell.x as f32 - camera_position.x,
            cell.y as f32 - camera_position.y,
            cell.z as f32 - camera_position.z,
        ];
        let tint = material.base_tint();

        for face in &geometry.faces {
            {
                let mut writer = ZeroAlphaWriter::new(&mut frame);
                for corner in face.corners {
                    writer.push_vertex(
                        [
                            corner[0] + offset[0],
                            corner[1] + offset[1],
                            corner[2] + offset[2],
                        ],
                        tint,
                    );
                }
            }
            frame.push_face_indices();
        }
    }

    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxels::GridWorld;
    use std::num::NonZeroUsize;

    fn cache() -> LruCache<MaterialId, Arc<CellGeometry>> {
        LruCache::new(NonZeroUsize::new(8).unwrap())
    }

    fn diamond_config() -> SessionConfig {
        SessionConfig {
            enabled: true,
            ..SessionConfig::default()
        }
    }

    #[test]
    fn zero_alpha_writer_keeps_rgb_and_drops_alpha() {
        let mut frame = OutlineFrame::new();
        let mut writer = ZeroAlphaWriter::new(&mut frame);

        writer.push_vertex([1.0, 2.0, 3.0], [0.4, 0.9, 0.9, 1.0]);

        assert_eq!(frame.vertices()[0].color, [0.4, 0.9, 0.9, 0.0]);
        assert_eq!(frame.vertices()[0].position, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn frame_geometry_is_camera_relative() {
        let mut world = GridWorld::new();
        world.set_material(Point3::new(10, 0, 0), MaterialId::DIAMOND_ORE);

        let frame = build_outline_frame(
            &[Point3::new(10, 0, 0)],
            &world,
            &diamond_config(),
            Point3::new(10.0, 0.0, 0.0),
            &mut cache(),
        );

        // A full cube: 6 faces, 4 vertices and 6 indices each.
        assert_eq!(frame.vertices().len(), 24);
        assert_eq!(frame.index_count(), 36);

        // Positions are relative to the camera, so they lie on [0,1].
        for vertex in frame.vertices() {
            for component in vertex.position {
                assert!((0.0..=1.0).contains(&component));
            }
            assert_eq!(vertex.color[3], 0.0);
        }
    }

    #[test]
    fn stale_cells_are_skipped_at_frame_time() {
        let mut world = GridWorld::new();
        world.set_material(Point3::new(1, 0, 0), MaterialId::DIAMOND_ORE);
        world.set_material(Point3::new(2, 0, 0), MaterialId::DIAMOND_ORE);

        // The second cell changed between scan and frame.
        world.set_material(Point3::new(2, 0, 0), MaterialId::STONE);

        let frame = build_outline_frame(
            &[Point3::new(1, 0, 0), Point3::new(2, 0, 0)],
            &world,
            &diamond_config(),
            Point3::new(0.0, 0.0, 0.0),
            &mut cache(),
        );

        assert_eq!(frame.vertices().len(), 24);
    }

    #[test]
    fn empty_cell_list_accumulates_nothing() {
        let world = GridWorld::new();
        let frame = build_outline_frame(
            &[],
            &world,
            &diamond_config(),
            Point3::new(0.0, 0.0, 0.0),
            &mut cache(),
        );
        assert!(frame.is_empty());
        assert_eq!(frame.index_count(), 0);
    }

    #[test]
    fn unloaded_cells_are_skipped() {
        let world = GridWorld::new();
        let frame = build_outline_frame(
            &[Point3::new(0, 0, 0)],
            &world,
            &diamond_config(),
            Point3::new(0.0, 0.0, 0.0),
            &mut cache(),
        );
        assert!(frame.is_empty());
    }

    #[test]
    fn geometry_cache_is_reused_across_cells() {
        let mut world = GridWorld::new();
        world.set_material(Point3::new(1, 0, 0), MaterialId::DIAMOND_ORE);
        world.set_material(Point3::new(2, 0, 0), MaterialId::DIAMOND_ORE);
        let mut geometry_cache = cache();

        let frame = build_outline_frame(
            &[Point3::new(1, 0, 0), Point3::new(2, 0, 0)],
            &world,
            &diamond_config(),
            Point3::new(0.0, 0.0, 0.0),
            &mut geometry_cache,
        );

        assert_eq!(frame.vertices().len(), 48);
        assert_eq!(geometry_cache.len(), 1);
    }
}
