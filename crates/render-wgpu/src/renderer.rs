use miplab_assets::TextureImage;
use miplab_common::MeshData;
use miplab_kernel::FrameParams;

use crate::RenderError;
use crate::mesh::GpuMesh;
use crate::shader::{DEPTH_FORMAT, FloatUniform, Shader};
use crate::texture::TextureBank;

/// Draws the selected object with the selected texture variant.
pub struct LabRenderer {
    shader: Shader,
    meshes: Vec<GpuMesh>,
    textures: TextureBank,
    depth_texture: wgpu::TextureView,
    last_variant: Option<usize>,
}

impl LabRenderer {
    /// Compile the shader and upload every mesh and texture variant.
    /// `meshes` and `textures` are in selection-enum order.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        (width, height): (u32, u32),
        meshes: &[MeshData; 3],
        textures: &[TextureImage; 3],
    ) -> Self {
        let shader = Shader::new(device, surface_format);
        let meshes = meshes.iter().map(|m| GpuMesh::upload(device, m)).collect();
        let textures = TextureBank::new(device, queue, shader.texture_layout(), textures);
        tracing::info!(variants = textures.len(), "texture variants ready");

        Self {
            shader,
            meshes,
            textures,
            depth_texture: Self::create_depth_texture(device, width, height),
            last_variant: None,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    /// Clear to `background`, then draw the object described by `params`.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        params: &FrameParams,
        background: [f64; 4],
    ) -> Result<(), RenderError> {
        let variant = self
            .textures
            .variant(params.texture_index)
            .ok_or(RenderError::MissingTextureVariant(params.texture_index))?;
        let mesh = self
            .meshes
            .get(params.object.index())
            .ok_or(RenderError::MissingMesh(params.object))?;

        if self.last_variant != Some(params.texture_index) {
            tracing::debug!(
                index = params.texture_index,
                family = variant.family().label(),
                mode = %variant.mode(),
                mesh = mesh.name(),
                "switched texture variant"
            );
            self.last_variant = Some(params.texture_index);
        }

        self.shader.pass_light(&params.light);
        self.shader.pass_camera(params.view_proj, params.camera_position);
        self.shader.pass_model(params.model);
        self.shader
            .pass_float(FloatUniform::CoordMultiplier, params.coord_multiplier);

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let [r, g, b, a] = background;
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            self.shader.activate(&mut pass);
            self.shader.pass_texture(&mut pass, variant);
            mesh.draw(&mut pass, &self.shader, queue);
        }

        queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }

    /// Release the shader program and every GPU resource it draws with.
    pub fn release(self) {
        tracing::debug!(meshes = self.meshes.len(), "releasing shader resources");
        drop(self);
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}
