// Mesh types for the revolved surface.
//
// LatheMesh is the CPU-side product of the revolution builder: shared
// vertices with smooth normals, indexed triangles, byte views ready for
// buffer upload.

use glam::Vec3;

// ============================================================================
// GPU VERTEX
// ============================================================================

/// GPU-ready vertex.
///   @location(0) position: vec3<f32>
///   @location(1) normal:   vec3<f32>
///   @location(2) uv:       vec2<f32>
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal:   [f32; 3],
    pub uv:       [f32; 2],
}

impl MeshVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
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
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

// ============================================================================
// LATHE MESH
// ============================================================================

/// GPU-ready triangulated surface of revolution.
/// Vertices are shared across triangles via the index buffer (smooth normals).
/// Upload vertex_bytes() to a VERTEX buffer, index_bytes() to an INDEX buffer.
pub struct LatheMesh {
    pub vertices: Vec<MeshVertex>,
    pub indices:  Vec<u32>,
}

impl LatheMesh {
    /// Cast vertex slice to raw bytes for wgpu buffer upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Cast index slice to raw bytes for wgpu buffer upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn index_count(&self) -> usize  { self.indices.len() }
    pub fn vertex_count(&self) -> usize { self.vertices.len() }

    /// Vertex positions as Vec3, in vertex order.
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices.iter().map(|v| Vec3::from_array(v.position))
    }
}

// ============================================================================
// SMOOTH NORMALS
// ============================================================================

/// Accumulate area-weighted triangle normals per vertex.
/// The cross product is not normalized: its magnitude encodes 2x the
/// triangle area, giving automatic area-weighting. Callers normalize after
/// any vertex-merging passes of their own.
pub fn accumulate_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut accum = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let a = positions[tri[0] as usize];
        let b = positions[tri[1] as usize];
        let c = positions[tri[2] as usize];
        let weighted = (b - a).cross(c - a);
        accum[tri[0] as usize] += weighted;
        accum[tri[1] as usize] += weighted;
        accum[tri[2] as usize] += weighted;
    }

    accum
}
