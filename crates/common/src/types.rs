use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in an object's local space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            min: Vec3::ZERO,
            max: Vec3::ZERO,
        }
    }
}

impl BoundingBox {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box enclosing every point. Returns `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) / 2.0
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Largest extent along any axis.
    pub fn max_dim(&self) -> f32 {
        self.size().max_element()
    }
}

/// One vertex of a loaded mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    /// Texture coordinates with the origin at the top-left of the image.
    pub uv: [f32; 2],
}

/// Indexed triangle mesh as produced by the asset loader.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeshData {
    pub name: String,
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_points(self.vertices.iter().map(|v| Vec3::from_array(v.position)))
            .unwrap_or_default()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(x: f32, y: f32, z: f32) -> MeshVertex {
        MeshVertex {
            position: [x, y, z],
            normal: [0.0, 1.0, 0.0],
            uv: [0.0, 0.0],
        }
    }

    #[test]
    fn bounds_from_points() {
        let bb = BoundingBox::from_points([
            Vec3::new(-1.0, 0.0, 2.0),
            Vec3::new(3.0, -2.0, 0.0),
            Vec3::new(0.0, 4.0, 1.0),
        ])
        .unwrap();
        assert_eq!(bb.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(bb.max, Vec3::new(3.0, 4.0, 2.0));
        assert_eq!(bb.center(), Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(bb.max_dim(), 6.0);
    }

    #[test]
    fn bounds_of_nothing() {
        assert!(BoundingBox::from_points(std::iter::empty()).is_none());
        let mesh = MeshData::default();
        assert!(mesh.is_empty());
        assert_eq!(mesh.bounds(), BoundingBox::default());
    }

    #[test]
    fn mesh_bounds_and_triangles() {
        let mesh = MeshData {
            name: "tri".into(),
            vertices: vec![vertex(0.0, 0.0, 0.0), vertex(2.0, 0.0, 0.0), vertex(0.0, 1.0, 0.0)],
            indices: vec![0, 1, 2],
        };
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.bounds().size(), Vec3::new(2.0, 1.0, 0.0));
    }
}
