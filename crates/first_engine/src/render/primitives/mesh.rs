//! Indexed triangle geometry
//!
//! Static vertex/index data produced once by the asset loaders and handed to
//! the rendering pipeline. Nothing mutates a mesh after it is built, so it can
//! be shared read-only between consumers.

use bytemuck::{Pod, Zeroable};
use thiserror::Error;

/// Broken index buffer invariants
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// Index count is not a multiple of three
    #[error("index count {count} is not a multiple of 3")]
    IndexCount {
        /// Number of indices found
        count: usize,
    },

    /// A triangle refers past the end of the vertex list
    #[error("face #{face} references vertex {index} but only {vertex_count} vertices exist")]
    IndexOutOfRange {
        /// Zero-based triangle index
        face: usize,
        /// Offending vertex index
        index: u32,
        /// Number of vertices available
        vertex_count: usize,
    },
}

/// Vertex record uploaded as-is to vertex buffers
///
/// `#[repr(C)]` keeps the layout stable for GPU uploads: a homogeneous position
/// followed by the normal, 28 bytes with no padding.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    /// Homogeneous position, `w` is 1 for loaded geometry
    pub position: [f32; 4],

    /// Per-vertex normal, zero until a loader writes it
    pub normal: [f32; 3],
}

impl Vertex {
    /// Vertex at a point with a zero normal
    pub fn from_position(position: [f32; 3]) -> Self {
        let [x, y, z] = position;
        Self {
            position: [x, y, z, 1.0],
            normal: [0.0; 3],
        }
    }

    /// Vertex at a point with the given normal
    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self {
            normal,
            ..Self::from_position(position)
        }
    }
}

/// Triangle list sharing vertices through an index buffer
///
/// Every consecutive triple of `indices` is one triangle. A well-formed list
/// has `indices.len() % 3 == 0` and every index below `vertices.len()`; see
/// [`IndexedTriangleList::validate`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedTriangleList {
    /// Vertex data
    pub vertices: Vec<Vertex>,

    /// Triangle indices into `vertices`
    pub indices: Vec<u32>,
}

impl IndexedTriangleList {
    /// Create a triangle list from existing buffers
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Number of complete triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }

    /// Check the index invariants
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::IndexCount {
                count: self.indices.len(),
            });
        }

        let vertex_count = self.vertices.len();
        for (face, tri) in self.triangles().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::IndexOutOfRange {
                    face,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Raw vertex bytes for buffer uploads
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes for buffer uploads
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> IndexedTriangleList {
        let vertices = vec![
            Vertex::from_position([0.0, 0.0, 0.0]),
            Vertex::from_position([1.0, 0.0, 0.0]),
            Vertex::from_position([1.0, 1.0, 0.0]),
            Vertex::from_position([0.0, 1.0, 0.0]),
        ];
        IndexedTriangleList::new(vertices, vec![0, 1, 2, 0, 2, 3])
    }

    #[test]
    fn test_vertex_layout() {
        assert_eq!(std::mem::size_of::<Vertex>(), 28);

        let v = Vertex::from_position([1.0, 2.0, 3.0]);
        assert_eq!(v.position, [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(v.normal, [0.0; 3]);

        let n = Vertex::new([1.0, 2.0, 3.0], [0.0, 0.0, -1.0]);
        assert_eq!(n.position[3], 1.0);
        assert_eq!(n.normal, [0.0, 0.0, -1.0]);
    }

    #[test]
    fn test_triangles() {
        let mesh = quad();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.triangles().collect::<Vec<_>>(), vec![[0, 1, 2], [0, 2, 3]]);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_partial_triangle() {
        let mut mesh = quad();
        mesh.indices.push(1);
        assert!(matches!(mesh.validate(), Err(MeshError::IndexCount { count: 7 })));
    }

    #[test]
    fn test_validate_rejects_out_of_range_index() {
        let mut mesh = quad();
        mesh.indices[4] = 4;
        assert!(matches!(
            mesh.validate(),
            Err(MeshError::IndexOutOfRange { face: 1, index: 4, vertex_count: 4 })
        ));
    }

    #[test]
    fn test_byte_views() {
        let mesh = quad();
        assert_eq!(mesh.vertex_bytes().len(), 4 * 28);
        assert_eq!(mesh.index_bytes().len(), 6 * 4);
    }
}
