use miplab_kernel::{Camera, CameraCommand};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Frame rate the fixed step sizes were tuned for.
const REFERENCE_FPS: f32 = 60.0;

/// Keys the lab reacts to, independent of the windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    W,
    S,
    A,
    D,
    R,
    F,
    E,
    Q,
    T,
    G,
}

/// How a held key turns into movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StepMode {
    /// One fixed step per rendered frame; speed follows the frame rate.
    #[default]
    PerFrame,
    /// Step scaled by frame time so speed matches `PerFrame` at 60 fps.
    TimeScaled,
}

impl StepMode {
    /// Multiplier passed to the camera for a frame lasting `dt` seconds.
    pub fn factor(self, dt: f32) -> f32 {
        match self {
            StepMode::PerFrame => 1.0,
            StepMode::TimeScaled => dt * REFERENCE_FPS,
        }
    }
}

/// Keys currently held down.
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    keys: BTreeSet<Key>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: Key, pressed: bool) {
        if pressed {
            self.keys.insert(key);
        } else {
            self.keys.remove(&key);
        }
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    /// Forget everything, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// One-to-one key to camera command table.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: Vec<(Key, CameraCommand)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            bindings: vec![
                (Key::W, CameraCommand::MoveFront),
                (Key::S, CameraCommand::MoveBack),
                (Key::D, CameraCommand::MoveRight),
                (Key::A, CameraCommand::MoveLeft),
                (Key::R, CameraCommand::MoveUp),
                (Key::F, CameraCommand::MoveDown),
                (Key::E, CameraCommand::RotateLeft),
                (Key::Q, CameraCommand::RotateRight),
                (Key::T, CameraCommand::RotateUp),
                (Key::G, CameraCommand::RotateDown),
            ],
        }
    }
}

impl KeyBindings {
    pub fn command(&self, key: Key) -> Option<CameraCommand> {
        self.bindings
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, cmd)| *cmd)
    }

    pub fn bindings(&self) -> &[(Key, CameraCommand)] {
        &self.bindings
    }

    /// Commands for every held key, in binding order.
    pub fn commands<'a>(&'a self, held: &'a HeldKeys) -> impl Iterator<Item = CameraCommand> + 'a {
        self.bindings
            .iter()
            .filter(|(key, _)| held.is_down(*key))
            .map(|(_, cmd)| *cmd)
    }

    /// Apply this frame's commands to `camera`. Returns how many were applied.
    pub fn apply(&self, held: &HeldKeys, camera: &mut Camera, mode: StepMode, dt: f32) -> usize {
        let factor = mode.factor(dt);
        let mut applied = 0;
        for cmd in self.commands(held) {
            camera.apply(cmd, factor);
            applied += 1;
        }
        if applied > 0 {
            tracing::trace!(applied, factor, "camera input");
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ALL_KEYS: [Key; 10] = [
        Key::W,
        Key::S,
        Key::A,
        Key::D,
        Key::R,
        Key::F,
        Key::E,
        Key::Q,
        Key::T,
        Key::G,
    ];

    #[test]
    fn every_key_has_a_distinct_command() {
        let bindings = KeyBindings::default();
        let commands: HashSet<_> = ALL_KEYS
            .iter()
            .map(|k| bindings.command(*k).expect("bound"))
            .collect();
        assert_eq!(commands.len(), ALL_KEYS.len());
    }

    #[test]
    fn held_key_fires_every_frame() {
        let bindings = KeyBindings::default();
        let mut held = HeldKeys::new();
        let mut camera = Camera::default();
        let start = camera.position;

        held.set(Key::W, true);
        for _ in 0..3 {
            assert_eq!(bindings.apply(&held, &mut camera, StepMode::PerFrame, 0.016), 1);
        }
        let travelled = camera.position.distance(start);
        assert!((travelled - 3.0 * camera.move_step).abs() < 1e-5);

        held.set(Key::W, false);
        assert_eq!(bindings.apply(&held, &mut camera, StepMode::PerFrame, 0.016), 0);
        assert!(held.is_empty());
    }

    #[test]
    fn opposite_keys_cancel() {
        let bindings = KeyBindings::default();
        let mut held = HeldKeys::new();
        let mut camera = Camera::default();
        let start = camera.position;
        held.set(Key::W, true);
        held.set(Key::S, true);
        bindings.apply(&held, &mut camera, StepMode::PerFrame, 0.016);
        assert!(camera.position.distance(start) < 1e-5);
    }

    #[test]
    fn time_scaled_matches_per_frame_at_reference_rate() {
        assert_eq!(StepMode::PerFrame.factor(0.5), 1.0);
        assert!((StepMode::TimeScaled.factor(1.0 / 60.0) - 1.0).abs() < 1e-5);
        assert!((StepMode::TimeScaled.factor(1.0 / 30.0) - 2.0).abs() < 1e-5);
    }

    #[test]
    fn clear_releases_everything() {
        let mut held = HeldKeys::new();
        held.set(Key::E, true);
        held.set(Key::T, true);
        assert!(held.is_down(Key::E));
        held.clear();
        assert!(!held.is_down(Key::T));
    }
}
