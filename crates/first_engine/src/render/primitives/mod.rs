//! Core primitive types for rendering
//!
//! The camera that produces view/projection matrices and the indexed
//! triangle geometry the loaders build.

pub mod camera;
pub mod mesh;

pub use camera::{Camera, CameraConfig, ViewUpdate};
pub use mesh::{IndexedTriangleList, MeshError, Vertex};
