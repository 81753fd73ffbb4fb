use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Pitch is clamped short of the poles so the view matrix never degenerates.
const MAX_PITCH_DEGREES: f32 = 89.0;

/// A single discrete camera command, as produced by a key binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CameraCommand {
    MoveFront,
    MoveBack,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    RotateLeft,
    RotateRight,
    RotateUp,
    RotateDown,
}

/// Perspective camera with a position, a view direction and viewport size.
///
/// The direction is stored as yaw/pitch so vertical rotation can be clamped.
/// Every movement takes a `factor` that multiplies the fixed step: `1.0` means
/// one step, a frame-time-scaled value makes motion independent of frame rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    yaw: f32,
    pitch: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    width: u32,
    height: u32,
    /// Distance travelled per step.
    pub move_step: f32,
    /// Degrees turned per step.
    pub rotate_step_degrees: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Vec3::new(0.0, 0.5, 2.0),
            Vec3::new(0.0, -0.25, -1.0),
            45.0,
            0.1,
            300.0,
            1280,
            720,
        )
    }
}

impl Camera {
    pub fn new(
        position: Vec3,
        direction: Vec3,
        fov_degrees: f32,
        near: f32,
        far: f32,
        width: u32,
        height: u32,
    ) -> Self {
        let dir = direction.try_normalize().unwrap_or(Vec3::NEG_Z);
        let max_pitch = MAX_PITCH_DEGREES.to_radians();
        Self {
            position,
            yaw: dir.z.atan2(dir.x),
            pitch: dir.y.clamp(-1.0, 1.0).asin().clamp(-max_pitch, max_pitch),
            fov_degrees,
            near,
            far,
            width: width.max(1),
            height: height.max(1),
            move_step: 0.05,
            rotate_step_degrees: 1.0,
        }
    }

    /// Unit view direction.
    pub fn orientation(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.orientation().cross(Vec3::Y).normalize()
    }

    pub fn viewport(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn pitch_degrees(&self) -> f32 {
        self.pitch.to_degrees()
    }

    pub fn yaw_degrees(&self) -> f32 {
        self.yaw.to_degrees()
    }

    pub fn move_front(&mut self, factor: f32) {
        self.position += self.orientation() * self.move_step * factor;
    }

    pub fn move_back(&mut self, factor: f32) {
        self.position -= self.orientation() * self.move_step * factor;
    }

    pub fn move_left(&mut self, factor: f32) {
        self.position -= self.right() * self.move_step * factor;
    }

    pub fn move_right(&mut self, factor: f32) {
        self.position += self.right() * self.move_step * factor;
    }

    pub fn move_up(&mut self, factor: f32) {
        self.position.y += self.move_step * factor;
    }

    pub fn move_down(&mut self, factor: f32) {
        self.position.y -= self.move_step * factor;
    }

    pub fn rotate_left(&mut self, factor: f32) {
        self.yaw -= self.rotate_step_degrees.to_radians() * factor;
    }

    pub fn rotate_right(&mut self, factor: f32) {
        self.yaw += self.rotate_step_degrees.to_radians() * factor;
    }

    pub fn rotate_up(&mut self, factor: f32) {
        self.add_pitch(self.rotate_step_degrees.to_radians() * factor);
    }

    pub fn rotate_down(&mut self, factor: f32) {
        self.add_pitch(-self.rotate_step_degrees.to_radians() * factor);
    }

    fn add_pitch(&mut self, delta: f32) {
        let max_pitch = MAX_PITCH_DEGREES.to_radians();
        self.pitch = (self.pitch + delta).clamp(-max_pitch, max_pitch);
    }

    /// Dispatch a command to the matching movement.
    pub fn apply(&mut self, command: CameraCommand, factor: f32) {
        match command {
            CameraCommand::MoveFront => self.move_front(factor),
            CameraCommand::MoveBack => self.move_back(factor),
            CameraCommand::MoveLeft => self.move_left(factor),
            CameraCommand::MoveRight => self.move_right(factor),
            CameraCommand::MoveUp => self.move_up(factor),
            CameraCommand::MoveDown => self.move_down(factor),
            CameraCommand::RotateLeft => self.rotate_left(factor),
            CameraCommand::RotateRight => self.rotate_right(factor),
            CameraCommand::RotateUp => self.rotate_up(factor),
            CameraCommand::RotateDown => self.rotate_down(factor),
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.orientation(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect(), self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn default_camera_looks_down_negative_z() {
        let cam = Camera::default();
        let dir = cam.orientation();
        assert!(dir.z < -0.9);
        assert!(dir.y < 0.0);
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn front_then_back_is_identity() {
        let mut cam = Camera::default();
        let start = cam.position;
        cam.move_front(1.0);
        assert!(cam.position.distance(start) > 0.0);
        cam.move_back(1.0);
        assert!(cam.position.distance(start) < EPS);
    }

    #[test]
    fn left_right_and_up_down_cancel() {
        let mut cam = Camera::default();
        let start = cam.position;
        cam.move_left(3.0);
        cam.move_up(2.0);
        cam.move_right(3.0);
        cam.move_down(2.0);
        assert!(cam.position.distance(start) < EPS);
    }

    #[test]
    fn rotate_left_turns_toward_negative_x() {
        let mut cam = Camera::new(Vec3::ZERO, Vec3::NEG_Z, 45.0, 0.1, 100.0, 800, 600);
        cam.rotate_left(10.0);
        assert!(cam.orientation().x < 0.0);
        cam.rotate_right(20.0);
        assert!(cam.orientation().x > 0.0);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = Camera::default();
        cam.rotate_up(1000.0);
        assert!((cam.pitch_degrees() - MAX_PITCH_DEGREES).abs() < 1e-3);
        cam.rotate_down(1000.0);
        assert!((cam.pitch_degrees() + MAX_PITCH_DEGREES).abs() < 1e-3);
        assert!(!cam.view_matrix().col(0).x.is_nan());
    }

    #[test]
    fn apply_dispatches_commands() {
        let mut a = Camera::default();
        let mut b = Camera::default();
        a.apply(CameraCommand::MoveUp, 2.0);
        b.move_up(2.0);
        assert_eq!(a.position, b.position);
    }

    #[test]
    fn viewport_never_zero() {
        let mut cam = Camera::default();
        cam.set_viewport(0, 0);
        assert_eq!(cam.viewport(), (1, 1));
        assert_eq!(cam.aspect(), 1.0);
        cam.set_viewport(1920, 1080);
        assert!((cam.aspect() - 16.0 / 9.0).abs() < EPS);
    }
}
