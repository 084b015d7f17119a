//! # Rendering core
//!
//! The pieces of the renderer that the rasterization pipeline consumes: the
//! [`Camera`] producing per-frame view and projection matrices, and the
//! [`IndexedTriangleList`] static geometry built at scene construction.
//! Window, device and shading stages live outside this crate.

pub mod primitives;

pub use primitives::{Camera, CameraConfig, IndexedTriangleList, MeshError, Vertex, ViewUpdate};
