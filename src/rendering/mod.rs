//! # Rendering Module
//!
//! The highlight rendering pipeline: a dedicated outline render pass that
//! draws each active cell's geometry with fully transparent vertex colors
//! into a separate glow buffer, so the silhouette composes over the scene
//! and stays visible through occluding geometry.
//!
//! # Architecture
//!
//! The renderer is split in two layers:
//!
//! 1. [`OutlineFrame`] / [`build_outline_frame`] - CPU-side geometry
//!    accumulation, pure and unit-testable
//! 2. [`OutlineRenderPass`] - the WGPU pipeline that uploads one frame and
//!    draws it in a single flush
//!
//! [`OutlineRenderManager`] ties both to the session's published snapshot
//! and exposes the single per-frame hook the host engine calls after its
//! normal opaque/entity passes.
//!
//! # Performance Considerations
//!
//! - An empty active set skips buffer population and the flush entirely
//! - Per-material cell geometry is cached in an LRU map
//! - Vertex and index buffers grow geometrically and are reused across
//!   frames

use std::num::NonZeroUsize;
use std::sync::Arc;

use cgmath::{Matrix4, Point3};
use lru::LruCache;
use wgpu::{BindGroup, Buffer, Device, Queue, RenderPass, RenderPipeline, TextureFormat};

use crate::core::{Shared, Snapshot};
use crate::session::{HighlightColor, HighlightSession, SessionConfig};
use crate::voxels::{CellGeometry, CellPosition, MaterialId, WorldAccessor};

pub mod outline_buffer;
pub mod vertex;

pub use outline_buffer::{build_outline_frame, OutlineFrame, VertexWriter, ZeroAlphaWriter};
pub use vertex::OutlineVertex;

/// Number of material geometries kept in the render manager's cache.
const GEOMETRY_CACHE_CAPACITY: usize = 16;

/// The camera state the host hands to the per-frame hook.
#[derive(Debug, Clone, Copy)]
pub struct CameraView {
    /// The camera position in world space.
    pub position: Point3<f32>,
    /// The combined view-projection matrix.
    pub view_proj: Matrix4<f32>,
}

impl CameraView {
    /// The view-projection matrix as a shader-ready array.
    pub fn view_proj_array(&self) -> [[f32; 4]; 4] {
        self.view_proj.into()
    }
}

/// GPU-friendly uniform data for the outline pass.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct OutlineUniform {
    view_proj: [[f32; 4]; 4],
    glow_color: [f32; 4],
}

/// The dedicated WGPU render pass for highlight silhouettes.
///
/// Owns its pipeline, uniform, and growable vertex/index buffers. One
/// [`OutlineRenderPass::prepare`] plus one [`OutlineRenderPass::render`]
/// per frame is the single flush of the outline buffer.
pub struct OutlineRenderPass {
    render_pipeline: RenderPipeline,
    uniform_buffer: Buffer,
    uniform_bind_group: BindGroup,
    vertex_buffer: Option<Buffer>,
    vertex_capacity: u64,
    index_buffer: Option<Buffer>,
    index_capacity: u64,
}

impl OutlineRenderPass {
    /// Creates the outline pipeline for the given target format.
    ///
    /// # Arguments
    /// * `device` - The WebGPU device
    /// * `target_format` - The texture format of the glow buffer this pass
    ///   renders into
    pub fn new(device: &Device, target_format: TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Outline Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("outline.wgsl").into()),
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Outline Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Outline Uniform Buffer"),
            size: std::mem::size_of::<OutlineUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Outline Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Outline Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Outline Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[OutlineVertex::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: Some(wgpu::BlendState {
                        color: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::SrcAlpha,
                            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                            operation: wgpu::BlendOperation::Add,
                        },
                        alpha: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::One,
                            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                            operation: wgpu::BlendOperation::Add,
                        },
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Silhouettes need every face the buffer holds; never cull.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        Self {
            render_pipeline,
            uniform_buffer,
            uniform_bind_group,
            vertex_buffer: None,
            vertex_capacity: 0,
            index_buffer: None,
            index_capacity: 0,
        }
    }

    /// Uploads one accumulated frame and the pass uniforms.
    ///
    /// Buffers are grown (power-of-two) when the frame outgrows them and
    /// reused otherwise.
    pub fn prepare(
        &mut self,
        device: &Device,
        queue: &Queue,
        frame: &OutlineFrame,
        camera: &CameraView,
        glow_color: HighlightColor,
    ) {
        let vertex_bytes = std::mem::size_of_val(frame.vertices()) as u64;
        if self.vertex_buffer.is_none() || self.vertex_capacity < vertex_bytes {
            let capacity = vertex_bytes.next_power_of_two();
            self.vertex_buffer = Some(device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Outline Vertex Buffer"),
                size: capacity,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.vertex_capacity = capacity;
        }

        let index_bytes = std::mem::size_of_val(frame.indices()) as u64;
        if self.index_buffer.is_none() || self.index_capacity < index_bytes {
            let capacity = index_bytes.next_power_of_two();
            self.index_buffer = Some(device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("Outline Index Buffer"),
                size: capacity,
                usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.index_capacity = capacity;
        }

        let uniform = OutlineUniform {
            view_proj: camera.view_proj_array(),
            glow_color: glow_color.as_rgba_f32(),
        };

        queue.write_buffer(
            self.vertex_buffer.as_ref().unwrap(),
            0,
            bytemuck::cast_slice(frame.vertices()),
        );
        queue.write_buffer(
            self.index_buffer.as_ref().unwrap(),
            0,
            bytemuck::cast_slice(frame.indices()),
        );
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Draws the prepared frame into the given render pass.
    ///
    /// # Arguments
    /// * `render_pass` - The glow-buffer render pass to draw with
    /// * `index_count` - The index count of the prepared frame
    pub fn render<'a, 'b>(&'a self, render_pass: &mut RenderPass<'b>, index_count: u32)
    where
        'a: 'b,
    {
        let (Some(vertex_buffer), Some(index_buffer)) =
            (self.vertex_buffer.as_ref(), self.index_buffer.as_ref())
        else {
            return;
        };

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..index_count, 0, 0..1);
    }
}

/// The per-frame entry point for highlight rendering.
///
/// Holds the outline pass, the geometry cache, and shared read views of the
/// session's active cells and configuration. The host calls
/// [`OutlineRenderManager::render_frame`] once per rendered frame, after its
/// normal passes.
pub struct OutlineRenderManager {
    pass: OutlineRenderPass,
    geometry_cache: LruCache<MaterialId, Arc<CellGeometry>>,
    active_cells: Snapshot<Vec<CellPosition>>,
    config: Shared<SessionConfig>,
}

impl OutlineRenderManager {
    /// Creates a render manager wired to the given session.
    ///
    /// # Arguments
    /// * `device` - The WebGPU device
    /// * `target_format` - The texture format of the glow buffer
    /// * `session` - The session whose active cells this manager renders
    pub fn new(device: &Device, target_format: TextureFormat, session: &HighlightSession) -> Self {
        OutlineRenderManager {
            pass: OutlineRenderPass::new(device, target_format),
            geometry_cache: LruCache::new(NonZeroUsize::new(GEOMETRY_CACHE_CAPACITY).unwrap()),
            active_cells: session.active_cells_handle(),
            config: session.shared_config(),
        }
    }

    /// Renders the highlight silhouettes for the current frame.
    ///
    /// Reads the active-cell snapshot once, re-checks each cell against live
    /// world state, accumulates the outline geometry relative to the camera,
    /// and commits it in a single upload + draw. Does nothing when the
    /// active set, or the surviving geometry, is empty.
    pub fn render_frame<'a, 'b, W: WorldAccessor>(
        &'a mut self,
        world: &W,
        camera: &CameraView,
        device: &Device,
        queue: &Queue,
        render_pass: &mut RenderPass<'b>,
    ) where
        'a: 'b,
    {
        let cells = self.active_cells.load();
        if cells.is_empty() {
            return;
        }

        // One copy under one lock: predicate and color observed together.
        let config = self.config.copied();
        if !config.enabled {
            return;
        }

        let frame = build_outline_frame(
            &cells,
            world,
            &config,
            camera.position,
            &mut self.geometry_cache,
        );
        if frame.is_empty() {
            return;
        }

        self.pass
            .prepare(device, queue, &frame, camera, config.highlight_color);
        self.pass.render(render_pass, frame.index_count());
    }
}
