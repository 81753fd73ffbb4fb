//! wgpu render backend for the mipmapping lab.
//!
//! Draws one textured, lit mesh per frame. Each texture is uploaded once with
//! its full mip chain and bound through five samplers, one per filter mode.
//!
//! # Invariants
//! - Renderer never mutates scene state; it only reads `FrameParams`.
//! - Shader setters stage uniforms on the CPU; they reach the GPU on draw.

mod context;
mod mesh;
mod renderer;
mod shader;
mod shaders;
mod texture;

pub use context::GpuContext;
pub use mesh::GpuMesh;
pub use renderer::LabRenderer;
pub use shader::{FloatUniform, Shader};
pub use texture::{TextureBank, TextureVariant, sampler_descriptor};

use miplab_kernel::ObjectKind;

/// Errors from GPU setup and frame submission.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    UnsupportedSurface,
    #[error("texture variant {0} was not loaded")]
    MissingTextureVariant(usize),
    #[error("mesh for {0:?} was not loaded")]
    MissingMesh(ObjectKind),
}
