use glam::Vec3;
use miplab_common::{MeshData, MeshVertex};
use obj::raw::object::Polygon;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::AssetError;

/// Load a Wavefront OBJ file.
pub fn load_obj(path: impl AsRef<Path>) -> Result<MeshData, AssetError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mesh".into());
    parse_obj(BufReader::new(file), &name)
}

/// One face corner as indices into the raw attribute lists.
#[derive(Debug, Clone, Copy)]
struct Corner {
    position: usize,
    uv: Option<usize>,
    normal: Option<usize>,
}

fn corners(polygon: &Polygon) -> Vec<Corner> {
    match polygon {
        Polygon::P(ps) => ps
            .iter()
            .map(|&p| Corner { position: p, uv: None, normal: None })
            .collect(),
        Polygon::PT(pts) => pts
            .iter()
            .map(|&(p, t)| Corner { position: p, uv: Some(t), normal: None })
            .collect(),
        Polygon::PN(pns) => pns
            .iter()
            .map(|&(p, n)| Corner { position: p, uv: None, normal: Some(n) })
            .collect(),
        Polygon::PTN(ptns) => ptns
            .iter()
            .map(|&(p, t, n)| Corner { position: p, uv: Some(t), normal: Some(n) })
            .collect(),
    }
}

/// Newell normal of a polygon; works for non-planar and concave n-gons.
/// Degenerate faces get +Y.
fn face_normal(points: &[Vec3]) -> Vec3 {
    let mut n = Vec3::ZERO;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        n.x += (a.y - b.y) * (a.z + b.z);
        n.y += (a.z - b.z) * (a.x + b.x);
        n.z += (a.x - b.x) * (a.y + b.y);
    }
    let n = n.normalize_or_zero();
    if n == Vec3::ZERO { Vec3::Y } else { n }
}

/// Parse OBJ text from any reader.
///
/// Polygons are fan-triangulated. A corner without a normal takes its face
/// normal; a corner without a texture coordinate gets `[0, 0]`.
pub fn parse_obj(reader: impl BufRead, name: &str) -> Result<MeshData, AssetError> {
    let parse_error = |message: String| AssetError::ObjParse {
        name: name.to_string(),
        message,
    };
    let raw = obj::raw::parse_obj(reader).map_err(|e| parse_error(e.to_string()))?;

    let position = |i: usize| {
        raw.positions
            .get(i)
            .map(|&(x, y, z, _)| Vec3::new(x, y, z))
            .ok_or_else(|| parse_error(format!("position index {} out of range", i + 1)))
    };
    let uv = |i: usize| {
        raw.tex_coords
            .get(i)
            // OBJ puts v = 0 at the bottom of the image.
            .map(|&(u, v, _)| [u, 1.0 - v])
            .ok_or_else(|| parse_error(format!("texture index {} out of range", i + 1)))
    };
    let normal = |i: usize| {
        raw.normals
            .get(i)
            .map(|&(x, y, z)| [x, y, z])
            .ok_or_else(|| parse_error(format!("normal index {} out of range", i + 1)))
    };

    let mut vertices: Vec<MeshVertex> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();
    let mut shared: HashMap<(usize, Option<usize>, usize), u32> = HashMap::new();
    let mut skipped = 0usize;

    for polygon in &raw.polygons {
        let face = corners(polygon);
        if face.len() < 3 {
            skipped += 1;
            continue;
        }
        let points = face
            .iter()
            .map(|c| position(c.position))
            .collect::<Result<Vec<_>, _>>()?;
        let flat_normal = face
            .iter()
            .any(|c| c.normal.is_none())
            .then(|| face_normal(&points).to_array());

        let mut face_indices = Vec::with_capacity(face.len());
        for (corner, point) in face.iter().zip(&points) {
            let texture = corner.uv.map(uv).transpose()?.unwrap_or([0.0, 0.0]);
            let index = match (corner.normal, flat_normal) {
                (Some(n), _) => {
                    let key = (corner.position, corner.uv, n);
                    match shared.get(&key) {
                        Some(&index) => index,
                        None => {
                            let index = vertices.len() as u32;
                            vertices.push(MeshVertex {
                                position: point.to_array(),
                                normal: normal(n)?,
                                uv: texture,
                            });
                            shared.insert(key, index);
                            index
                        }
                    }
                }
                (None, flat) => {
                    let index = vertices.len() as u32;
                    vertices.push(MeshVertex {
                        position: point.to_array(),
                        normal: flat.unwrap_or([0.0, 1.0, 0.0]),
                        uv: texture,
                    });
                    index
                }
            };
            face_indices.push(index);
        }

        for i in 1..face_indices.len() - 1 {
            indices.extend([face_indices[0], face_indices[i], face_indices[i + 1]]);
        }
    }

    if skipped > 0 {
        tracing::warn!(mesh = name, skipped, "ignored faces with fewer than three corners");
    }

    let mesh = MeshData {
        name: raw.name.clone().unwrap_or_else(|| name.to_string()),
        vertices,
        indices,
    };
    if mesh.is_empty() {
        return Err(AssetError::EmptyMesh(name.to_string()));
    }

    tracing::debug!(
        mesh = %mesh.name,
        vertices = mesh.vertices.len(),
        triangles = mesh.triangle_count(),
        "parsed OBJ"
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const QUAD: &str = "\
o quad
v -1.0 0.0 -2.0
v 3.0 0.0 -2.0
v 3.0 0.0 2.0
v -1.0 0.0 2.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vt 0.0 1.0
vn 0.0 1.0 0.0
f 1/1/1 2/2/1 3/3/1
f 1/1/1 3/3/1 4/4/1
";

    const TRIANGLE_POSITIONS: &str = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
";

    #[test]
    fn parses_quad_with_bounds() {
        let mesh = parse_obj(Cursor::new(QUAD), "fallback").unwrap();
        assert_eq!(mesh.name, "quad");
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertices.len(), 4);
        let bb = mesh.bounds();
        assert_eq!(bb.min, Vec3::new(-1.0, 0.0, -2.0));
        assert_eq!(bb.max, Vec3::new(3.0, 0.0, 2.0));
        assert_eq!(bb.max_dim(), 4.0);
    }

    #[test]
    fn flips_v_coordinate() {
        let mesh = parse_obj(Cursor::new(QUAD), "quad").unwrap();
        let first = mesh
            .vertices
            .iter()
            .find(|v| v.position == [-1.0, 0.0, -2.0])
            .unwrap();
        assert_eq!(first.uv, [0.0, 1.0]);
    }

    #[test]
    fn quad_face_is_fan_triangulated() {
        let src = "\
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vt 0.0 1.0
vn 0.0 0.0 1.0
f 1/1/1 2/2/1 3/3/1 4/4/1
";
        let mesh = parse_obj(Cursor::new(src), "square").unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn pentagon_becomes_three_triangles() {
        let src = "\
v 0.0 0.0 0.0
v 2.0 0.0 0.0
v 3.0 1.0 0.0
v 1.0 2.0 0.0
v -1.0 1.0 0.0
f 1 2 3 4 5
";
        let mesh = parse_obj(Cursor::new(src), "pentagon").unwrap();
        assert_eq!(mesh.triangle_count(), 3);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn face_without_normals_uses_face_normal() {
        let src = format!("{TRIANGLE_POSITIONS}vt 0.5 0.25\nf 1/1 2/1 3/1\n");
        let mesh = parse_obj(Cursor::new(src), "no_normals").unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        for v in &mesh.vertices {
            assert_eq!(v.normal, [0.0, 0.0, 1.0]);
            assert_eq!(v.uv, [0.5, 0.75]);
        }
    }

    #[test]
    fn face_without_uvs_gets_zero_uv() {
        let src = format!("{TRIANGLE_POSITIONS}vn 0.0 0.0 -1.0\nf 1//1 2//1 3//1\n");
        let mesh = parse_obj(Cursor::new(src), "no_uvs").unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        for v in &mesh.vertices {
            assert_eq!(v.uv, [0.0, 0.0]);
            assert_eq!(v.normal, [0.0, 0.0, -1.0]);
        }
    }

    #[test]
    fn position_only_faces_load() {
        let src = format!("{TRIANGLE_POSITIONS}f 1 2 3\n");
        let mesh = parse_obj(Cursor::new(src), "bare").unwrap();
        assert_eq!(mesh.name, "bare");
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.vertices[0].normal, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn newell_normal_of_degenerate_face_is_up() {
        let line = [Vec3::ZERO, Vec3::X, Vec3::X * 2.0];
        assert_eq!(face_normal(&line), Vec3::Y);
    }

    #[test]
    fn empty_obj_is_rejected() {
        let err = parse_obj(Cursor::new("# nothing here\n"), "empty").unwrap_err();
        assert!(matches!(err, AssetError::EmptyMesh(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_obj("/definitely/not/here/Cube.obj").unwrap_err();
        assert!(err.to_string().contains("Cube.obj"));
    }
}
