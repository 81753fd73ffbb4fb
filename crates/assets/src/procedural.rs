//! Procedural stand-ins for the lab's meshes and textures.
//!
//! The generated files use the same names the desktop app loads, so a fresh
//! checkout can run after `miplab-cli generate assets`.

use image::{Rgba, RgbaImage};
use miplab_kernel::{ObjectKind, TextureFamily};
use std::f32::consts::PI;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::AssetError;

const TEXTURE_SIZE: u32 = 512;

/// Accumulates OBJ text. Faces are always triangles.
#[derive(Default)]
struct ObjWriter {
    out: String,
    positions: usize,
    uvs: usize,
    normals: usize,
}

impl ObjWriter {
    fn new(name: &str) -> Self {
        let mut w = Self::default();
        let _ = writeln!(w.out, "# generated by miplab");
        let _ = writeln!(w.out, "o {name}");
        w
    }

    fn v(&mut self, p: [f32; 3]) -> usize {
        let _ = writeln!(self.out, "v {:.6} {:.6} {:.6}", p[0], p[1], p[2]);
        self.positions += 1;
        self.positions
    }

    fn vt(&mut self, t: [f32; 2]) -> usize {
        let _ = writeln!(self.out, "vt {:.6} {:.6}", t[0], t[1]);
        self.uvs += 1;
        self.uvs
    }

    fn vn(&mut self, n: [f32; 3]) -> usize {
        let _ = writeln!(self.out, "vn {:.6} {:.6} {:.6}", n[0], n[1], n[2]);
        self.normals += 1;
        self.normals
    }

    /// Triangle from (position, uv, normal) 1-based index triples.
    fn tri(&mut self, a: [usize; 3], b: [usize; 3], c: [usize; 3]) {
        let _ = writeln!(
            self.out,
            "f {}/{}/{} {}/{}/{} {}/{}/{}",
            a[0], a[1], a[2], b[0], b[1], b[2], c[0], c[1], c[2]
        );
    }

    /// Counter-clockwise quad split into two triangles.
    fn quad(&mut self, corners: [[usize; 3]; 4]) {
        self.tri(corners[0], corners[1], corners[2]);
        self.tri(corners[0], corners[2], corners[3]);
    }

    fn finish(self) -> String {
        self.out
    }
}

/// 2×2 plane on XZ facing +Y.
pub fn plane_obj() -> String {
    let mut w = ObjWriter::new("Plane");
    let n = w.vn([0.0, 1.0, 0.0]);
    let corners = [
        ([-1.0, 0.0, 1.0], [0.0, 0.0]),
        ([1.0, 0.0, 1.0], [1.0, 0.0]),
        ([1.0, 0.0, -1.0], [1.0, 1.0]),
        ([-1.0, 0.0, -1.0], [0.0, 1.0]),
    ];
    let idx = corners.map(|(p, t)| [w.v(p), w.vt(t), n]);
    w.quad(idx);
    w.finish()
}

/// 2×2×2 cube with one full texture per face.
pub fn cube_obj() -> String {
    let mut w = ObjWriter::new("Cube");
    // (normal, tangent u, tangent v); corners are n ± u ± v.
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ];
    let uv_ids = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]].map(|t| w.vt(t));
    for (n, u, v) in faces {
        let ni = w.vn(n);
        let corner = |su: f32, sv: f32| {
            [
                n[0] + su * u[0] + sv * v[0],
                n[1] + su * u[1] + sv * v[1],
                n[2] + su * u[2] + sv * v[2],
            ]
        };
        let p = [
            w.v(corner(-1.0, -1.0)),
            w.v(corner(1.0, -1.0)),
            w.v(corner(1.0, 1.0)),
            w.v(corner(-1.0, 1.0)),
        ];
        w.quad([
            [p[0], uv_ids[0], ni],
            [p[1], uv_ids[1], ni],
            [p[2], uv_ids[2], ni],
            [p[3], uv_ids[3], ni],
        ]);
    }
    w.finish()
}

/// Unit-radius UV sphere.
pub fn sphere_obj(segments: u32, rings: u32) -> String {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let mut w = ObjWriter::new("Sphere");

    // One (position, uv, normal) triple per grid point; the seam column is
    // duplicated so texture coordinates wrap cleanly.
    let mut grid = Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);
    for r in 0..=rings {
        let v = r as f32 / rings as f32;
        let theta = v * PI;
        for s in 0..=segments {
            let u = s as f32 / segments as f32;
            let phi = u * 2.0 * PI;
            let n = [theta.sin() * phi.cos(), theta.cos(), -theta.sin() * phi.sin()];
            grid.push([w.v(n), w.vt([u, 1.0 - v]), w.vn(n)]);
        }
    }

    let row = (segments + 1) as usize;
    for r in 0..rings as usize {
        for s in 0..segments as usize {
            let top_left = grid[r * row + s];
            let top_right = grid[r * row + s + 1];
            let bottom_left = grid[(r + 1) * row + s];
            let bottom_right = grid[(r + 1) * row + s + 1];
            w.tri(top_left, bottom_left, bottom_right);
            w.tri(top_left, bottom_right, top_right);
        }
    }
    w.finish()
}

/// Black and white 8×8 chessboard.
pub fn chess_image(size: u32) -> RgbaImage {
    let cell = (size / 8).max(1);
    RgbaImage::from_fn(size, size, |x, y| {
        if ((x / cell) + (y / cell)) % 2 == 0 {
            Rgba([240, 240, 240, 255])
        } else {
            Rgba([20, 20, 20, 255])
        }
    })
}

/// Smooth hue sweep across, fading to white downwards, with thin dark lines
/// every 1/16th so aliasing is visible.
pub fn colours_image(size: u32) -> RgbaImage {
    let line = (size / 16).max(1);
    RgbaImage::from_fn(size, size, |x, y| {
        if x % line == 0 || y % line == 0 {
            return Rgba([30, 30, 30, 255]);
        }
        let hue = x as f32 / size as f32 * 6.0;
        let fade = y as f32 / size as f32;
        let channel = |offset: f32| {
            let h = (hue + offset).rem_euclid(6.0);
            let c = (1.0 - (h - 3.0).abs().min(3.0) / 1.5).clamp(0.0, 1.0);
            ((c + (1.0 - c) * fade * 0.6) * 255.0) as u8
        };
        Rgba([channel(3.0), channel(1.0), channel(5.0), 255])
    })
}

/// Running-bond terracotta tiles with light grout.
pub fn tiles_image(size: u32) -> RgbaImage {
    let tile_h = (size / 8).max(2);
    let tile_w = tile_h * 2;
    let grout = (tile_h / 10).max(1);
    RgbaImage::from_fn(size, size, |x, y| {
        let row = y / tile_h;
        let shifted = x + if row % 2 == 1 { tile_w / 2 } else { 0 };
        let (tx, ty) = (shifted % tile_w, y % tile_h);
        if tx < grout || ty < grout {
            return Rgba([210, 205, 195, 255]);
        }
        let shade = ((shifted / tile_w + row) % 3) as u8 * 12;
        Rgba([170 + shade, 80 + shade / 2, 50, 255])
    })
}

/// OBJ source for a selectable object.
pub fn mesh_source(kind: ObjectKind) -> String {
    match kind {
        ObjectKind::Plane => plane_obj(),
        ObjectKind::Cube => cube_obj(),
        ObjectKind::Sphere => sphere_obj(32, 16),
    }
}

pub fn texture_source(family: TextureFamily) -> RgbaImage {
    match family {
        TextureFamily::Chess => chess_image(TEXTURE_SIZE),
        TextureFamily::Colours => colours_image(TEXTURE_SIZE),
        TextureFamily::Tiles => tiles_image(TEXTURE_SIZE),
    }
}

/// Write every mesh and texture the lab loads into `dir`, creating it if
/// needed. Existing files are overwritten.
pub fn write_default_assets(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, AssetError> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir).map_err(|source| AssetError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::new();
    for kind in ObjectKind::ALL {
        let path = dir.join(kind.file_name());
        std::fs::write(&path, mesh_source(kind)).map_err(|source| AssetError::Io {
            path: path.clone(),
            source,
        })?;
        written.push(path);
    }
    for family in TextureFamily::ALL {
        let path = dir.join(family.file_name());
        texture_source(family)
            .save(&path)
            .map_err(|source| AssetError::Image {
                path: path.clone(),
                source,
            })?;
        written.push(path);
    }

    tracing::info!(dir = %dir.display(), files = written.len(), "wrote procedural assets");
    Ok(written)
}
