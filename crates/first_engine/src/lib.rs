//! # First Engine
//!
//! Camera and mesh-ingestion core of a small real-time renderer.
//!
//! - **Camera**: position, orientation basis and frustum, producing the view and
//!   projection matrices for every draw call.
//! - **Mesh loading**: OBJ files turned into indexed triangle lists, with the
//!   engine's `ccw` winding convention and optional per-vertex normals.
//!
//! Windowing, rasterization, textures and scene scheduling are outside this
//! crate; they consume only the matrices and buffers produced here.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use first_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     first_engine::foundation::logging::init();
//!
//!     let mesh = ObjLoader::load_normals("assets/models/suzanne.obj")?;
//!
//!     let mut camera = Camera::new();
//!     camera.set_lens(std::f32::consts::FRAC_PI_4, 4.0 / 3.0, 1.0, 1000.0);
//!     camera.look_at(Vec3::new(0.0, 1.0, -4.0), Vec3::zeros(), Vec3::y());
//!
//!     // once per frame
//!     camera.walk(0.1);
//!     camera.refresh();
//!     let view_projection = camera.view_projection_matrix();
//!
//!     println!("{} triangles, clip transform {:?}", mesh.triangle_count(), view_projection);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod assets;
pub mod render;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{ObjError, ObjLoader, ObjParser, WavefrontParser},
        config::{Config, ConfigError},
        foundation::math::{Mat4, Point3, Vec3},
        render::{Camera, CameraConfig, IndexedTriangleList, Vertex, ViewUpdate},
    };
}
