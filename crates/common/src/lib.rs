//! Shared types used by the asset loader, the scene kernel and the renderer.

pub mod types;

pub use types::{BoundingBox, MeshData, MeshVertex};
