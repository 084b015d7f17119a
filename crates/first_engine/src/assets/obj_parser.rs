//! Line-based Wavefront OBJ reader
//!
//! Keeps the file's own numbering: every `v` and `vn` line lands in the global
//! lists in file order, and face corners are stored as raw 0-based indices into
//! those lists. Nothing is renumbered, deduplicated or triangulated.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::obj_loader::{FaceCorner, ObjParser, ParsedObj, ParsedShape};

/// Default [`ObjParser`] reading `v`, `vn` and `f` statements
///
/// `o` and `g` start a new shape; a shape that ends up with no faces is
/// dropped. Line (`l`) and point (`p`) elements are not faces and are skipped,
/// as are texture coordinates, materials and smoothing groups.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavefrontParser;

impl ObjParser for WavefrontParser {
    fn parse(&self, path: &Path) -> Result<ParsedObj, String> {
        let file = File::open(path).map_err(|e| e.to_string())?;
        self.parse_reader(BufReader::new(file))
    }
}

impl WavefrontParser {
    /// Parse OBJ text from any buffered reader
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<ParsedObj, String> {
        let mut parsed = ParsedObj::default();
        let mut shape = ParsedShape::default();

        for (line_index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| e.to_string())?;
            let line_number = line_index + 1;

            let content = line.split('#').next().unwrap_or_default();
            let mut parts = content.split_whitespace();
            let Some(keyword) = parts.next() else {
                continue;
            };

            match keyword {
                "v" => {
                    let position = parse_vec3(&mut parts)
                        .map_err(|e| format!("line {line_number}: vertex {e}"))?;
                    parsed.positions.push(position);
                }
                "vn" => {
                    let normal = parse_vec3(&mut parts)
                        .map_err(|e| format!("line {line_number}: normal {e}"))?;
                    parsed.normals.push(normal);
                }
                "f" => {
                    let mut arity = 0u32;
                    for token in parts {
                        let corner =
                            parse_corner(token, parsed.positions.len(), parsed.normals.len())
                                .map_err(|e| format!("line {line_number}: {e}"))?;
                        shape.corners.push(corner);
                        arity += 1;
                    }
                    if arity == 0 {
                        return Err(format!("line {line_number}: face without vertices"));
                    }
                    shape.face_arities.push(arity);
                }
                "o" | "g" => {
                    let name = parts.collect::<Vec<_>>().join(" ");
                    if shape.face_arities.is_empty() {
                        shape.name = name;
                    } else {
                        let finished = std::mem::replace(
                            &mut shape,
                            ParsedShape {
                                name,
                                ..ParsedShape::default()
                            },
                        );
                        parsed.shapes.push(finished);
                    }
                }
                _ => {
                    // vt, l, p, s, usemtl, mtllib and the rest carry no face geometry
                }
            }
        }

        if !shape.face_arities.is_empty() {
            parsed.shapes.push(shape);
        }

        log::trace!(
            "Parsed OBJ: {} positions, {} normals, {} shapes",
            parsed.positions.len(),
            parsed.normals.len(),
            parsed.shapes.len()
        );

        Ok(parsed)
    }
}

fn parse_vec3<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Result<[f32; 3], String> {
    let mut out = [0.0; 3];
    for component in &mut out {
        let token = parts.next().ok_or("needs three components")?;
        *component = token
            .parse()
            .map_err(|_| format!("component '{token}' is not a number"))?;
    }
    Ok(out)
}

/// Parse one `v`, `v/t`, `v//n` or `v/t/n` face token
fn parse_corner(
    token: &str,
    position_count: usize,
    normal_count: usize,
) -> Result<FaceCorner, String> {
    let mut fields = token.split('/');
    let vertex = resolve_index(fields.next().unwrap_or_default(), position_count)?;
    let _texcoord = fields.next();
    let normal = match fields.next() {
        Some(field) if !field.is_empty() => Some(resolve_index(field, normal_count)?),
        _ => None,
    };

    Ok(FaceCorner { vertex, normal })
}

/// Turn a 1-based (or negative, relative to `count`) index into a 0-based one
///
/// Positive indices past the end are kept; the loader reports them against the
/// final vertex list.
fn resolve_index(field: &str, count: usize) -> Result<u32, String> {
    let raw: i64 = field
        .parse()
        .map_err(|_| format!("index '{field}' is not an integer"))?;

    let resolved = match raw {
        0 => return Err("index 0 is not valid, OBJ indices start at 1".to_string()),
        r if r > 0 => r - 1,
        r => i64::try_from(count).map_err(|e| e.to_string())? + r,
    };

    u32::try_from(resolved).map_err(|_| format!("index '{field}' is out of range"))
}
