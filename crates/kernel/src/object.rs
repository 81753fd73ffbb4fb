use glam::{Mat4, Quat, Vec3};
use miplab_common::{BoundingBox, MeshData};

/// Target size of the largest bounding-box extent after normalization.
pub const NORM_SIZE: f32 = 1.0;

/// Turntable speed of the displayed object.
pub const SPIN_DEGREES_PER_SECOND: f32 = 5.0;

/// Extra placement applied before normalization, e.g. to lay out a ground plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasePlacement {
    pub translation: Vec3,
    pub scale: f32,
}

/// Uniform scale that brings the largest extent of `bounds` to [`NORM_SIZE`].
///
/// A zero-extent or non-finite box falls back to `1.0`.
pub fn normalization_scale(bounds: &BoundingBox) -> f32 {
    let max_dim = bounds.max_dim();
    if !max_dim.is_finite() || max_dim <= f32::EPSILON {
        return 1.0;
    }
    NORM_SIZE / max_dim
}

/// A loaded mesh with its local bounds and current model transform.
///
/// Transform mutators post-multiply onto the current matrix, so the last
/// call is applied to the vertices first.
#[derive(Debug, Clone)]
pub struct Object {
    mesh: MeshData,
    bounds: BoundingBox,
    transform: Mat4,
}

impl Object {
    pub fn new(mesh: MeshData) -> Self {
        let bounds = mesh.bounds();
        Self {
            mesh,
            bounds,
            transform: Mat4::IDENTITY,
        }
    }

    pub fn name(&self) -> &str {
        &self.mesh.name
    }

    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bounds
    }

    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    pub fn reset_transforms(&mut self) {
        self.transform = Mat4::IDENTITY;
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.transform *= Mat4::from_translation(offset);
    }

    /// Rotate about `axis` by `degrees`. A zero axis is ignored.
    pub fn rotate(&mut self, axis: Vec3, degrees: f32) {
        if let Some(axis) = axis.try_normalize() {
            self.transform *= Mat4::from_quat(Quat::from_axis_angle(axis, degrees.to_radians()));
        }
    }

    pub fn scale(&mut self, factors: Vec3) {
        self.transform *= Mat4::from_scale(factors);
    }

    /// Rebuild the model matrix for one frame.
    ///
    /// Order: base placement, spin about +Y by `elapsed_secs`, normalization
    /// scale, then recentring on the bounding-box center.
    pub fn apply_frame_transform(&mut self, base: Option<BasePlacement>, elapsed_secs: f32) {
        let centre = self.bounds.center();
        let scale = normalization_scale(&self.bounds);

        self.reset_transforms();
        if let Some(base) = base {
            self.translate(base.translation);
            self.scale(Vec3::splat(base.scale));
        }
        self.rotate(Vec3::Y, elapsed_secs * SPIN_DEGREES_PER_SECOND);
        self.scale(Vec3::splat(scale));
        self.translate(-centre);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miplab_common::MeshVertex;

    const EPS: f32 = 1e-4;

    fn box_mesh(min: Vec3, max: Vec3) -> MeshData {
        let v = |p: Vec3| MeshVertex {
            position: p.to_array(),
            normal: [0.0, 1.0, 0.0],
            uv: [0.0, 0.0],
        };
        MeshData {
            name: "box".into(),
            vertices: vec![v(min), v(max), v(Vec3::new(min.x, max.y, min.z))],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn centre_maps_to_origin_for_any_angle() {
        let mut obj = Object::new(box_mesh(Vec3::new(2.0, 3.0, -4.0), Vec3::new(6.0, 5.0, 0.0)));
        for t in [0.0, 1.0, 17.5, 72.0, 1000.0] {
            obj.apply_frame_transform(None, t);
            let c = obj.transform().transform_point3(obj.bounding_box().center());
            assert!(c.length() < EPS, "t={t} centre={c}");
        }
    }

    #[test]
    fn base_placement_moves_centre_to_translation() {
        let base = BasePlacement {
            translation: Vec3::new(0.0, 0.0, -5.0),
            scale: 15.0,
        };
        let mut obj = Object::new(box_mesh(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(3.0, 0.0, 1.0)));
        obj.apply_frame_transform(Some(base), 12.0);
        let c = obj.transform().transform_point3(obj.bounding_box().center());
        assert!(c.distance(base.translation) < EPS);
    }

    #[test]
    fn largest_extent_is_normalized() {
        let mut obj = Object::new(box_mesh(Vec3::ZERO, Vec3::new(10.0, 2.0, 4.0)));
        obj.apply_frame_transform(None, 0.0);
        let m = obj.transform();
        let a = m.transform_point3(Vec3::ZERO);
        let b = m.transform_point3(Vec3::new(10.0, 0.0, 0.0));
        assert!((a.distance(b) - NORM_SIZE).abs() < EPS);
    }

    #[test]
    fn degenerate_box_falls_back_to_unit_scale() {
        let point = BoundingBox::new(Vec3::ONE, Vec3::ONE);
        assert_eq!(normalization_scale(&point), 1.0);
        let nan = BoundingBox::new(Vec3::ZERO, Vec3::splat(f32::NAN));
        assert_eq!(normalization_scale(&nan), 1.0);

        let mut obj = Object::new(box_mesh(Vec3::ONE, Vec3::ONE));
        obj.apply_frame_transform(None, 3.0);
        assert!(obj.transform().is_finite());
    }

    #[test]
    fn spin_rate_is_five_degrees_per_second() {
        let mut obj = Object::new(box_mesh(Vec3::splat(-0.5), Vec3::splat(0.5)));
        obj.apply_frame_transform(None, 18.0);
        let x = obj.transform().transform_vector3(Vec3::X);
        let angle = x.z.atan2(x.x).to_degrees();
        // +90 degrees about Y takes +X to -Z.
        assert!((angle + 90.0).abs() < 1e-2, "angle={angle}");
    }

    #[test]
    fn reset_clears_transform() {
        let mut obj = Object::new(box_mesh(Vec3::ZERO, Vec3::ONE));
        obj.translate(Vec3::X);
        obj.rotate(Vec3::ZERO, 45.0);
        obj.reset_transforms();
        assert_eq!(obj.transform(), Mat4::IDENTITY);
    }
}
