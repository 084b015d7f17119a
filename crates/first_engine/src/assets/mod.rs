//! Asset loading
//!
//! Mesh files are read once, synchronously, while a scene is being built.
//! The result is immutable geometry; any load error aborts scene construction.

pub mod obj_loader;
pub mod obj_parser;

pub use obj_loader::{
    has_ccw_marker, FaceCorner, ObjError, ObjLoader, ObjParser, ParsedObj, ParsedShape,
};
pub use obj_parser::WavefrontParser;
