//! OBJ file loader for 3D models
//!
//! Produces a de-indexed triangle list: every face corner becomes its own
//! vertex, so positions, uvs and normals line up one-to-one and the mesh can
//! be drawn with a plain `DrawArrays`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::assets::AssetError;

/// Flat mesh arrays ready for upload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// One position per drawn vertex
    pub vertices: Vec<[f32; 3]>,
    /// One texture coordinate per drawn vertex
    pub uvs: Vec<[f32; 2]>,
    /// One normal per drawn vertex
    pub normals: Vec<[f32; 3]>,
}

impl MeshData {
    /// Number of vertices to draw
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles in the list
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

/// Wavefront OBJ parser (`v`, `vt`, `vn` and `f` records)
pub struct ObjLoader;

impl ObjLoader {
    /// Load an OBJ file and return its de-indexed mesh
    pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<MeshData, AssetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AssetError::NotFound(path.display().to_string()),
            _ => AssetError::Io(e),
        })?;

        let mesh = Self::parse(BufReader::new(file), &path.display().to_string())?;
        log::info!("Loaded mesh {} ({} triangles)", path.display(), mesh.triangle_count());
        Ok(mesh)
    }

    /// Parse OBJ text from any buffered reader; `name` is used in errors
    pub fn parse<R: BufRead>(reader: R, name: &str) -> Result<MeshData, AssetError> {
        let mut positions: Vec<[f32; 3]> = Vec::new();
        let mut tex_coords: Vec<[f32; 2]> = Vec::new();
        let mut normals: Vec<[f32; 3]> = Vec::new();
        let mut mesh = MeshData::default();

        for (line_index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let error = |message: String| AssetError::Parse {
                path: name.to_string(),
                line: line_index + 1,
                message,
            };

            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts[0] {
                "v" => positions.push(parse_floats::<3>(&parts[1..]).map_err(error)?),
                "vn" => normals.push(parse_floats::<3>(&parts[1..]).map_err(error)?),
                "vt" => {
                    let [u, v] = parse_floats::<2>(&parts[1..]).map_err(error)?;
                    // OBJ puts v = 0 at the bottom, textures start at the top row
                    tex_coords.push([u, 1.0 - v]);
                }
                "f" => {
                    if parts.len() < 4 {
                        return Err(error(format!("face needs at least 3 corners, got {}", parts.len() - 1)));
                    }

                    let mut corners = Vec::with_capacity(parts.len() - 1);
                    for corner in &parts[1..] {
                        let (position, uv, normal) = resolve_corner(corner, &positions, &tex_coords, &normals)
                            .map_err(error)?;
                        corners.push((position, uv, normal));
                    }

                    // Fan triangulation
                    for i in 1..corners.len() - 1 {
                        for &(position, uv, normal) in [&corners[0], &corners[i], &corners[i + 1]] {
                            mesh.vertices.push(position);
                            mesh.uvs.push(uv);
                            mesh.normals.push(normal);
                        }
                    }
                }
                _ => {}
            }
        }

        if mesh.vertices.is_empty() {
            return Err(AssetError::EmptyMesh(name.to_string()));
        }
        Ok(mesh)
    }
}

fn parse_floats<const N: usize>(values: &[&str]) -> Result<[f32; N], String> {
    if values.len() < N {
        return Err(format!("expected {} values, got {}", N, values.len()));
    }
    let mut out = [0.0; N];
    for (slot, value) in out.iter_mut().zip(values) {
        *slot = value.parse().map_err(|_| format!("invalid number {value:?}"))?;
    }
    Ok(out)
}

/// Resolve a 1-based (or negative, relative) OBJ index into `len` elements
fn resolve_index(raw: &str, len: usize) -> Result<usize, String> {
    let index: i64 = raw.parse().map_err(|_| format!("invalid index {raw:?}"))?;
    let len_i64 = i64::try_from(len).map_err(|_| "too many elements".to_string())?;
    let resolved = match index {
        i if i > 0 => i - 1,
        i if i < 0 => len_i64 + i,
        _ => return Err("index 0 is not valid in OBJ".to_string()),
    };
    usize::try_from(resolved)
        .ok()
        .filter(|&i| i < len)
        .ok_or_else(|| format!("index {index} out of bounds ({len} available)"))
}

fn resolve_corner(
    corner: &str,
    positions: &[[f32; 3]],
    tex_coords: &[[f32; 2]],
    normals: &[[f32; 3]],
) -> Result<([f32; 3], [f32; 2], [f32; 3]), String> {
    let mut fields = corner.split('/');
    let position_field = fields.next().unwrap_or_default();
    let uv_field = fields.next().filter(|s| !s.is_empty());
    let normal_field = fields.next().filter(|s| !s.is_empty());

    let position = positions[resolve_index(position_field, positions.len())?];
    let uv = match uv_field {
        Some(raw) => tex_coords[resolve_index(raw, tex_coords.len())?],
        None => [0.0, 0.0],
    };
    let normal = match normal_field {
        Some(raw) => normals[resolve_index(raw, normals.len())?],
        None => [0.0, 1.0, 0.0],
    };
    Ok((position, uv, normal))
}
