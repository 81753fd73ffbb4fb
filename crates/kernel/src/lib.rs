//! Scene kernel: camera, light, objects and the GUI-editable selection.
//!
//! Nothing here touches the GPU; the renderer reads [`FrameParams`] produced
//! by [`Scene::prepare_frame`] and never mutates the scene.
//!
//! # Invariants
//! - Exactly one object and one texture variant are active; both are stored
//!   as closed enums so they cannot go out of range.
//! - The model transform is rebuilt from scratch every frame.
//! - Teardown runs at most once.

pub mod camera;
pub mod clock;
pub mod filter;
pub mod lifecycle;
pub mod light;
pub mod object;
pub mod scene;
pub mod selection;

pub use camera::{Camera, CameraCommand};
pub use clock::{FrameClock, FrameTime};
pub use filter::{
    FilterMode, FilterSelection, Interpolation, SamplerSpec, VARIANTS_PER_FAMILY, texture_index,
    variant_at,
};
pub use lifecycle::{Lifecycle, LifecycleError, Phase, Teardown};
pub use light::Light;
pub use object::{BasePlacement, NORM_SIZE, Object, normalization_scale};
pub use scene::{DEFAULT_BACKGROUND, FrameParams, Scene};
pub use selection::{ObjectKind, Selection, TextureFamily};
