use miplab_input::{HeldKeys, Key, KeyBindings, StepMode};
use miplab_kernel::{FrameClock, FrameParams, FrameTime, Object, Scene, Selection};
use miplab_common::MeshData;
use winit::keyboard::KeyCode;

use crate::ui::{self, FrameStats};

/// Map a physical key onto a lab key. Unbound keys return `None`.
pub fn key_from_code(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::KeyW => Key::W,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyG => Key::G,
        _ => return None,
    };
    Some(key)
}

/// Everything the frame loop mutates apart from GPU resources.
pub struct AppState {
    pub scene: Scene,
    held: HeldKeys,
    bindings: KeyBindings,
    step_mode: StepMode,
    clock: FrameClock,
    last_time: Option<FrameTime>,
}

impl AppState {
    /// `meshes` are in `ObjectKind::ALL` order.
    pub fn new(meshes: [MeshData; 3], step_mode: StepMode) -> Self {
        Self {
            scene: Scene::new(meshes.map(Object::new)),
            held: HeldKeys::new(),
            bindings: KeyBindings::default(),
            step_mode,
            clock: FrameClock::new(),
            last_time: None,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, pressed: bool) {
        if let Some(key) = key_from_code(code) {
            self.held.set(key, pressed);
        }
    }

    /// Forget held keys, e.g. when the window loses focus and release events
    /// will not arrive.
    pub fn release_keys(&mut self) {
        self.held.clear();
    }

    /// Advance one frame: viewport, clock, camera input, object transform.
    pub fn update(&mut self, viewport: (u32, u32)) -> FrameParams {
        self.scene.camera.set_viewport(viewport.0, viewport.1);
        let time = self.clock.tick();
        self.bindings
            .apply(&self.held, &mut self.scene.camera, self.step_mode, time.dt);
        self.last_time = Some(time);
        self.scene.prepare_frame(time.elapsed)
    }

    pub fn draw_ui(&mut self, ctx: &egui::Context) {
        let stats = FrameStats {
            elapsed: self.last_time.map_or(0.0, |t| t.elapsed),
            frame_ms: self.last_time.map_or(0.0, |t| t.dt * 1000.0),
            camera_position: self.scene.camera.position,
            filter: self.scene.selection.filter_mode(),
            texture_index: self.scene.selection.texture_index(),
        };

        let before = self.scene.selection;
        ui::parameters_window(ctx, &mut self.scene.selection, &stats);
        log_selection_change(&before, &self.scene.selection);
    }
}

fn log_selection_change(before: &Selection, after: &Selection) {
    if before.object != after.object {
        tracing::debug!(object = after.object.label(), "object selected");
    }
    if before.texture_index() != after.texture_index() {
        tracing::debug!(
            texture = after.texture.label(),
            filter = %after.filter_mode(),
            index = after.texture_index(),
            "texture variant selected"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miplab_common::MeshVertex;
    use miplab_kernel::ObjectKind;

    fn triangle(name: &str) -> MeshData {
        let vertex = |position: [f32; 3]| MeshVertex {
            position,
            normal: [0.0, 0.0, 1.0],
            uv: [0.0, 0.0],
        };
        MeshData {
            name: name.into(),
            vertices: vec![
                vertex([0.0, 0.0, 0.0]),
                vertex([2.0, 0.0, 0.0]),
                vertex([0.0, 2.0, 0.0]),
            ],
            indices: vec![0, 1, 2],
        }
    }

    fn state() -> AppState {
        AppState::new(
            [triangle("plane"), triangle("cube"), triangle("sphere")],
            StepMode::PerFrame,
        )
    }

    #[test]
    fn all_lab_keys_are_mapped() {
        let codes = [
            KeyCode::KeyW,
            KeyCode::KeyS,
            KeyCode::KeyA,
            KeyCode::KeyD,
            KeyCode::KeyR,
            KeyCode::KeyF,
            KeyCode::KeyE,
            KeyCode::KeyQ,
            KeyCode::KeyT,
            KeyCode::KeyG,
        ];
        let bindings = KeyBindings::default();
        for code in codes {
            let key = key_from_code(code).unwrap();
            assert!(bindings.command(key).is_some(), "{code:?} has no command");
        }
        assert_eq!(key_from_code(KeyCode::Space), None);
    }

    #[test]
    fn held_key_moves_camera_each_frame() {
        let mut state = state();
        let start = state.scene.camera.position;
        state.handle_key(KeyCode::KeyR, true);
        state.update((800, 600));
        let after_one = state.scene.camera.position;
        assert!(after_one.y > start.y);

        state.handle_key(KeyCode::KeyR, false);
        state.update((800, 600));
        assert_eq!(state.scene.camera.position, after_one);
    }

    #[test]
    fn focus_loss_releases_keys() {
        let mut state = state();
        state.handle_key(KeyCode::KeyW, true);
        state.release_keys();
        let start = state.scene.camera.position;
        state.update((800, 600));
        assert_eq!(state.scene.camera.position, start);
    }

    #[test]
    fn update_tracks_viewport_and_selection() {
        let mut state = state();
        state.scene.selection.object = ObjectKind::Sphere;
        let params = state.update((1024, 512));
        assert_eq!(state.scene.camera.viewport(), (1024, 512));
        assert_eq!(params.object, ObjectKind::Sphere);
        assert_eq!(params.texture_index, 0);
    }
}
