//! OBJ file loader for triangulated meshes
//!
//! Parsing is delegated to an [`ObjParser`]; the default is
//! [`WavefrontParser`], which keeps the file's own vertex numbering. On top of
//! the parsed data the loader enforces triangle-only faces and applies the
//! engine's winding convention: when the first line of the file contains `ccw`
//! (any case), the last two indices of every triangle are swapped.
//!
//! Only the first shape in a file produces triangles. Later shapes are ignored,
//! but every position in the file is copied into the vertex list.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::obj_parser::WavefrontParser;
use crate::render::{IndexedTriangleList, MeshError, Vertex};

/// Prefix marking a parser diagnostic as a warning rather than an error
const WARNING_PREFIX: &str = "WARN";

/// Header token that requests reversed winding
const CCW_MARKER: &str = "ccw";

/// Errors produced while loading an OBJ file
#[derive(Error, Debug)]
pub enum ObjError {
    /// The parser failed or reported an error diagnostic
    #[error("Parse error in {}: {message}", .path.display())]
    Parse {
        /// File being loaded
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// The file parsed but contains no shapes
    #[error("No shapes in {}", .path.display())]
    NoShapes {
        /// File being loaded
        path: PathBuf,
    },

    /// A face of the first shape is not a triangle
    #[error("Face #{face} has {vertex_count} vertices in {}", .path.display())]
    NonTriangularFace {
        /// File being loaded
        path: PathBuf,
        /// Zero-based face index within the shape
        face: usize,
        /// Number of vertices the face has
        vertex_count: u32,
    },

    /// A face corner has no normal, or its normal index is out of range
    #[error("Face #{face} corner {corner} has no usable normal in {}", .path.display())]
    MissingNormal {
        /// File being loaded
        path: PathBuf,
        /// Zero-based face index within the shape
        face: usize,
        /// Corner within the face, 0..3
        corner: usize,
    },

    /// The faces refer to vertices that do not exist
    #[error("Invalid mesh in {}: {source}", .path.display())]
    InvalidMesh {
        /// File being loaded
        path: PathBuf,
        /// Violated invariant
        source: MeshError,
    },
}

impl ObjError {
    /// Whether the file parsed but its content does not form a triangle mesh
    pub fn is_structural(&self) -> bool {
        !matches!(self, Self::Parse { .. })
    }

    /// File the error refers to
    pub fn path(&self) -> &Path {
        match self {
            Self::Parse { path, .. }
            | Self::NoShapes { path }
            | Self::NonTriangularFace { path, .. }
            | Self::MissingNormal { path, .. }
            | Self::InvalidMesh { path, .. } => path,
        }
    }
}

/// One face corner as parsed: a position index and an optional normal index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceCorner {
    /// Index into [`ParsedObj::positions`]
    pub vertex: u32,
    /// Index into [`ParsedObj::normals`]
    pub normal: Option<u32>,
}

impl FaceCorner {
    /// Corner with a position only
    pub fn new(vertex: u32) -> Self {
        Self { vertex, normal: None }
    }

    /// Corner with a position and a normal
    pub fn with_normal(vertex: u32, normal: u32) -> Self {
        Self {
            vertex,
            normal: Some(normal),
        }
    }
}

/// A named group of faces
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedShape {
    /// Object or group name from the file
    pub name: String,
    /// Vertex count of each face, in file order
    pub face_arities: Vec<u32>,
    /// Corners of all faces, flattened in file order
    pub corners: Vec<FaceCorner>,
}

/// Everything the loader needs from a parsed file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedObj {
    /// All vertex positions, in file order
    pub positions: Vec<[f32; 3]>,
    /// All vertex normals, in file order
    pub normals: Vec<[f32; 3]>,
    /// Shapes with at least one face, in file order
    pub shapes: Vec<ParsedShape>,
    /// Parser diagnostics; messages starting with `WARN` are non-fatal
    pub diagnostics: String,
}

/// Source of parsed OBJ data
pub trait ObjParser {
    /// Parse the file at `path`, returning the parser's message on failure
    fn parse(&self, path: &Path) -> Result<ParsedObj, String>;
}

/// Loader producing [`IndexedTriangleList`]s from OBJ files
pub struct ObjLoader;

impl ObjLoader {
    /// Load positions and triangles with the default parser
    pub fn load<P: AsRef<Path>>(path: P) -> Result<IndexedTriangleList, ObjError> {
        Self::load_with(&WavefrontParser, path)
    }

    /// Load positions, triangles and per-vertex normals with the default parser
    ///
    /// A vertex used by several faces keeps the normal of the last corner that
    /// referenced it, in file order. Normals are not averaged.
    pub fn load_normals<P: AsRef<Path>>(path: P) -> Result<IndexedTriangleList, ObjError> {
        Self::load_normals_with(&WavefrontParser, path)
    }

    /// [`ObjLoader::load`] with a caller-supplied parser
    pub fn load_with<P: AsRef<Path>>(
        parser: &impl ObjParser,
        path: P,
    ) -> Result<IndexedTriangleList, ObjError> {
        Self::build(parser, path.as_ref(), false)
    }

    /// [`ObjLoader::load_normals`] with a caller-supplied parser
    pub fn load_normals_with<P: AsRef<Path>>(
        parser: &impl ObjParser,
        path: P,
    ) -> Result<IndexedTriangleList, ObjError> {
        Self::build(parser, path.as_ref(), true)
    }

    fn build(
        parser: &impl ObjParser,
        path: &Path,
        with_normals: bool,
    ) -> Result<IndexedTriangleList, ObjError> {
        let reverse_winding = has_ccw_marker(path);

        let parsed = parser.parse(path).map_err(|message| ObjError::Parse {
            path: path.to_path_buf(),
            message,
        })?;

        if !parsed.diagnostics.is_empty() {
            if parsed.diagnostics.starts_with(WARNING_PREFIX) {
                log::warn!("{}: {}", path.display(), parsed.diagnostics.trim_end());
            } else {
                return Err(ObjError::Parse {
                    path: path.to_path_buf(),
                    message: parsed.diagnostics,
                });
            }
        }

        let Some(shape) = parsed.shapes.first() else {
            return Err(ObjError::NoShapes {
                path: path.to_path_buf(),
            });
        };
        if parsed.shapes.len() > 1 {
            log::debug!(
                "{}: using shape '{}', ignoring {} more",
                path.display(),
                shape.name,
                parsed.shapes.len() - 1
            );
        }

        let mut vertices: Vec<Vertex> = parsed
            .positions
            .iter()
            .map(|&p| Vertex::from_position(p))
            .collect();
        let vertex_count = vertices.len();
        let mut indices = Vec::with_capacity(shape.corners.len());

        for (face, &arity) in shape.face_arities.iter().enumerate() {
            if arity != 3 {
                return Err(ObjError::NonTriangularFace {
                    path: path.to_path_buf(),
                    face,
                    vertex_count: arity,
                });
            }

            // every earlier face had three corners
            let corners = shape
                .corners
                .get(face * 3..face * 3 + 3)
                .ok_or_else(|| ObjError::Parse {
                    path: path.to_path_buf(),
                    message: format!("face #{face} is missing corner indices"),
                })?;

            for (corner_index, corner) in corners.iter().enumerate() {
                let vertex = vertices.get_mut(corner.vertex as usize).ok_or_else(|| {
                    ObjError::InvalidMesh {
                        path: path.to_path_buf(),
                        source: MeshError::IndexOutOfRange {
                            face,
                            index: corner.vertex,
                            vertex_count,
                        },
                    }
                })?;

                if with_normals {
                    let normal = corner
                        .normal
                        .and_then(|n| parsed.normals.get(n as usize))
                        .ok_or_else(|| ObjError::MissingNormal {
                            path: path.to_path_buf(),
                            face,
                            corner: corner_index,
                        })?;
                    vertex.normal = *normal;
                }

                indices.push(corner.vertex);
            }

            if reverse_winding {
                let n = indices.len();
                indices.swap(n - 2, n - 1);
            }
        }

        log::debug!(
            "Loaded {}: {} vertices, {} triangles{}",
            path.display(),
            vertices.len(),
            indices.len() / 3,
            if reverse_winding { " (ccw, winding reversed)" } else { "" }
        );

        Ok(IndexedTriangleList::new(vertices, indices))
    }
}

/// Whether the first line of the file asks for reversed winding
///
/// An unreadable file counts as unmarked; the parser reports the real error.
pub fn has_ccw_marker<P: AsRef<Path>>(path: P) -> bool {
    let Ok(file) = File::open(path.as_ref()) else {
        return false;
    };

    let mut first_line = Vec::new();
    if BufReader::new(file).read_until(b'\n', &mut first_line).is_err() {
        return false;
    }

    String::from_utf8_lossy(&first_line)
        .to_lowercase()
        .contains(CCW_MARKER)
}
