//! Vertex data structures and layouts for the outline pass.

/// A vertex in the outline render pass.
///
/// Carries a camera-relative position and an RGBA color. For highlight
/// geometry the alpha component is always zero: the normal appearance must
/// stay invisible while the silhouette is extracted from buffer occupancy.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Color: [f32; 4] (16 bytes)
///
/// Total size: 28 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OutlineVertex {
    /// Position relative to the camera.
    pub position: [f32; 3],
    /// RGBA vertex color.
    pub color: [f32; 4],
}

impl OutlineVertex {
    /// Creates a new vertex.
    pub fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        OutlineVertex { position, color }
    }

    /// Returns the vertex buffer layout description for the outline
    /// pipeline.
    ///
    /// # Shader Attributes
    /// - `location = 0`: position (vec3<f32>)
    /// - `location = 1`: color (vec4<f32>)
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<OutlineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}
