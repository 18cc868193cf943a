/// Mesh data and uploaded meshes

use std::fmt;
use glam::Vec3;
use crate::error::{Error, Result};
use crate::renderer::GraphicsDevice;

/// Vertex attribute location of the position
pub const POSITION_ATTRIBUTE: u32 = 0;

/// Floats per position
pub const POSITION_COMPONENTS: i32 = 3;

/// Byte stride between two positions
pub const VERTEX_STRIDE: i32 = POSITION_COMPONENTS * std::mem::size_of::<f32>() as i32;

/// CPU-side triangle list: positions plus `u32` indices
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
}

impl MeshData {
    /// Validate and wrap positions and indices
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` if there are no positions, the index count is
    /// not a multiple of 3, or an index points past the last position.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Result<Self> {
        if positions.is_empty() {
            return Err(Error::InvalidResource("Mesh has no vertices".to_string()));
        }
        if indices.is_empty() || indices.len() % 3 != 0 {
            return Err(Error::InvalidResource(format!(
                "Mesh index count {} is not a non-zero multiple of 3", indices.len()
            )));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(Error::InvalidResource(format!(
                "Mesh index {} out of range ({} vertices)", bad, positions.len()
            )));
        }
        Ok(Self { positions, indices })
    }

    /// The fixed demo triangle: three vertices, indices 0, 1, 2
    pub fn triangle() -> Self {
        Self {
            positions: vec![
                Vec3::new(-0.5, -0.5, 0.0),
                Vec3::new(0.5, -0.5, 0.0),
                Vec3::new(0.0, 0.5, 0.0),
            ],
            indices: vec![0, 1, 2],
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Positions as tightly packed `f32` bytes, ready for a vertex buffer
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Indices as bytes, ready for an element buffer
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn vertex_count(&self) -> u32 {
        self.positions.len() as u32
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn triangle_count(&self) -> u32 {
        self.index_count() / 3
    }
}

// ===== MESH =====

/// Mesh uploaded to the GPU, released on drop
pub struct Mesh<D: GraphicsDevice> {
    device: D,
    raw: D::Mesh,
    index_count: u32,
}

impl<D: GraphicsDevice> Mesh<D> {
    /// Upload `data` into GPU buffers
    pub fn upload(device: &D, data: &MeshData) -> Result<Self> {
        let raw = device.create_mesh(data)?;
        crate::engine_debug!("trigon::Mesh", "Uploaded mesh: {} vertices, {} indices",
            data.vertex_count(), data.index_count());
        Ok(Self {
            device: device.clone(),
            raw,
            index_count: data.index_count(),
        })
    }

    pub fn raw(&self) -> &D::Mesh {
        &self.raw
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }
}

impl<D: GraphicsDevice> fmt::Debug for Mesh<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mesh")
            .field("raw", &self.raw)
            .field("index_count", &self.index_count)
            .finish()
    }
}

impl<D: GraphicsDevice> Drop for Mesh<D> {
    fn drop(&mut self) {
        self.device.delete_mesh(&self.raw);
    }
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
