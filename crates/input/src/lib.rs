//! Keyboard input mapped to camera commands.
//!
//! # Invariants
//! - Bindings are level-triggered: a held key yields its command every frame.
//! - Input never touches the scene directly; it produces [`CameraCommand`]s.
//!
//! [`CameraCommand`]: miplab_kernel::CameraCommand

pub mod bindings;

pub use bindings::{HeldKeys, Key, KeyBindings, StepMode};
