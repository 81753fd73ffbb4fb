use glam::{Mat4, Vec3};

use crate::camera::Camera;
use crate::filter::FilterMode;
use crate::light::Light;
use crate::object::Object;
use crate::selection::{ObjectKind, Selection};

/// Clear color of every frame.
pub const DEFAULT_BACKGROUND: [f64; 4] = [0.1, 0.1, 0.15, 1.0];

/// Everything the renderer needs to draw the selected object for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    pub object: ObjectKind,
    pub model: Mat4,
    pub view_proj: Mat4,
    pub camera_position: Vec3,
    pub light: Light,
    pub coord_multiplier: f32,
    pub texture_index: usize,
    pub filter: FilterMode,
}

/// Scene state owned by the frame loop.
#[derive(Debug, Clone)]
pub struct Scene {
    pub camera: Camera,
    pub light: Light,
    pub selection: Selection,
    objects: [Object; 3],
}

impl Scene {
    /// `objects` must be in [`ObjectKind::ALL`] order.
    pub fn new(objects: [Object; 3]) -> Self {
        Self {
            camera: Camera::default(),
            light: Light::default(),
            selection: Selection::default(),
            objects,
        }
    }

    pub fn object(&self, kind: ObjectKind) -> &Object {
        &self.objects[kind.index()]
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn selected_object(&self) -> &Object {
        self.object(self.selection.object)
    }

    /// Rebuild the selected object's transform for `elapsed_secs` and collect
    /// the per-frame draw parameters.
    pub fn prepare_frame(&mut self, elapsed_secs: f32) -> FrameParams {
        let kind = self.selection.object;
        let object = &mut self.objects[kind.index()];
        object.apply_frame_transform(kind.base_placement(), elapsed_secs);

        FrameParams {
            object: kind,
            model: object.transform(),
            view_proj: self.camera.view_projection(),
            camera_position: self.camera.position,
            light: self.light,
            coord_multiplier: self.selection.coord_multiplier(),
            texture_index: self.selection.texture_index(),
            filter: self.selection.filter_mode(),
        }
    }
}
