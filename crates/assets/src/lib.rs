//! Asset loading: Wavefront OBJ meshes and PNG textures.
//!
//! All assets are loaded once at startup from a single directory. Textures
//! are decoded to RGBA and their mip chain is computed on the CPU so the
//! renderer only uploads levels.
//!
//! # Layout
//! The asset directory holds `Plane.obj`, `Cube.obj`, `Sphere.obj`,
//! `chess.png`, `colors.png` and `tiles.png`.

pub mod mesh;
pub mod procedural;
pub mod texture;

pub use mesh::{load_obj, parse_obj};
pub use procedural::write_default_assets;
pub use texture::{TextureImage, load_texture, mip_level_count};

use miplab_common::MeshData;
use miplab_kernel::{ObjectKind, TextureFamily, normalization_scale};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("OBJ parse error in {name}: {message}")]
    ObjParse { name: String, message: String },
    #[error("image error on {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("mesh {0} has no triangles")]
    EmptyMesh(String),
    #[error("image {0} has zero size")]
    EmptyImage(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Every mesh and texture the lab needs, indexed by selection enums.
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    root: PathBuf,
    meshes: [MeshData; 3],
    textures: [TextureImage; 3],
}

impl AssetCatalog {
    /// Load all assets from `dir`. The first missing or corrupt file aborts.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, AssetError> {
        let root = dir.as_ref().to_path_buf();
        let [plane, cube, sphere] = ObjectKind::ALL.map(|kind| root.join(kind.file_name()));
        let meshes = [load_obj(plane)?, load_obj(cube)?, load_obj(sphere)?];

        let [chess, colours, tiles] = TextureFamily::ALL.map(|f| root.join(f.file_name()));
        let textures = [load_texture(chess)?, load_texture(colours)?, load_texture(tiles)?];

        tracing::info!(
            dir = %root.display(),
            meshes = meshes.len(),
            textures = textures.len(),
            "assets loaded"
        );
        Ok(Self {
            root,
            meshes,
            textures,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn mesh(&self, kind: ObjectKind) -> &MeshData {
        &self.meshes[kind.index()]
    }

    pub fn texture(&self, family: TextureFamily) -> &TextureImage {
        &self.textures[family.index()]
    }

    /// Split into meshes and textures, each in selection-enum order.
    pub fn into_parts(self) -> ([MeshData; 3], [TextureImage; 3]) {
        (self.meshes, self.textures)
    }

    /// Summary of what was loaded.
    pub fn report(&self) -> CatalogReport {
        let meshes = ObjectKind::ALL
            .iter()
            .map(|&kind| {
                let mesh = self.mesh(kind);
                let bounds = mesh.bounds();
                MeshReport {
                    object: kind.label().to_string(),
                    file: kind.file_name().to_string(),
                    vertices: mesh.vertices.len(),
                    triangles: mesh.triangle_count(),
                    min: bounds.min.to_array(),
                    max: bounds.max.to_array(),
                    normalization_scale: normalization_scale(&bounds),
                }
            })
            .collect();
        let textures = TextureFamily::ALL
            .iter()
            .map(|&family| {
                let tex = self.texture(family);
                TextureReport {
                    family: family.label().to_string(),
                    file: family.file_name().to_string(),
                    width: tex.width(),
                    height: tex.height(),
                    mip_levels: tex.mip_count(),
                }
            })
            .collect();
        CatalogReport {
            root: self.root.display().to_string(),
            meshes,
            textures,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MeshReport {
    pub object: String,
    pub file: String,
    pub vertices: usize,
    pub triangles: usize,
    pub min: [f32; 3],
    pub max: [f32; 3],
    pub normalization_scale: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextureReport {
    pub family: String,
    pub file: String,
    pub width: u32,
    pub height: u32,
    pub mip_levels: u32,
}

/// Serializable summary of an [`AssetCatalog`].
#[derive(Debug, Clone, Serialize)]
pub struct CatalogReport {
    pub root: String,
    pub meshes: Vec<MeshReport>,
    pub textures: Vec<TextureReport>,
}

impl CatalogReport {
    pub fn to_json(&self) -> Result<String, AssetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_assets_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let written = write_default_assets(dir.path()).unwrap();
        assert_eq!(written.len(), 6);

        let catalog = AssetCatalog::load(dir.path()).unwrap();
        assert_eq!(catalog.mesh(ObjectKind::Cube).triangle_count(), 12);
        let chess = catalog.texture(TextureFamily::Chess);
        assert_eq!(chess.mip_count(), mip_level_count(chess.width(), chess.height()));

        let report = catalog.report();
        assert_eq!(report.meshes.len(), 3);
        assert_eq!(report.textures[1].file, "colors.png");
        assert!((report.meshes[1].normalization_scale - 0.5).abs() < 1e-6);
        let json = report.to_json().unwrap();
        assert!(json.contains("\"mip_levels\""));
    }

    #[test]
    fn missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = AssetCatalog::load(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
    }

    #[test]
    fn corrupt_texture_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_default_assets(dir.path()).unwrap();
        std::fs::write(dir.path().join("tiles.png"), b"not a png").unwrap();
        let err = AssetCatalog::load(dir.path()).unwrap_err();
        assert!(matches!(err, AssetError::Image { .. }));
    }
}
