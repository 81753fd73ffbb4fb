use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use miplab_kernel::Light;

use crate::shaders;
use crate::texture::TextureVariant;

pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub(crate) struct Uniforms {
    model: [[f32; 4]; 4],
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    light_pos: [f32; 4],
    light_color: [f32; 4],
    params: [f32; 4],
}

impl Default for Uniforms {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            camera_pos: [0.0, 0.0, 0.0, 1.0],
            light_pos: [0.0, 0.0, 0.0, 1.0],
            light_color: [1.0; 4],
            params: [1.0, 0.0, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub(crate) struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Scalar uniforms the program understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatUniform {
    /// Multiplier applied to texture coordinates.
    CoordMultiplier,
}

/// The compiled textured-mesh program and its uniform state.
///
/// Setters only stage values on the CPU; [`Shader::upload`] writes them to
/// the GPU before the frame is submitted.
pub struct Shader {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
    uniforms: Uniforms,
}

impl Shader {
    /// Compile the program and build its pipeline for `surface_format`.
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        use wgpu::util::DeviceExt;

        let uniforms = Uniforms::default();
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&uniform_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mipmap_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::MIPMAP_SHADER.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mipmap_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x3,
                        2 => Float32x2,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // The plane must be visible from both sides.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        tracing::debug!(format = ?surface_format, "shader compiled");

        Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            texture_layout,
            uniforms,
        }
    }

    /// Layout texture variants must be created against.
    pub fn texture_layout(&self) -> &wgpu::BindGroupLayout {
        &self.texture_layout
    }

    /// Make this program current on `pass`.
    pub fn activate(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.uniform_bind_group, &[]);
    }

    pub fn pass_float(&mut self, uniform: FloatUniform, value: f32) {
        match uniform {
            FloatUniform::CoordMultiplier => self.uniforms.params[0] = value,
        }
    }

    pub fn pass_light(&mut self, light: &Light) {
        self.uniforms.light_pos = light.position.extend(1.0).to_array();
        self.uniforms.light_color = light.color.to_array();
    }

    pub fn pass_camera(&mut self, view_proj: Mat4, position: Vec3) {
        self.uniforms.view_proj = view_proj.to_cols_array_2d();
        self.uniforms.camera_pos = position.extend(1.0).to_array();
    }

    pub fn pass_model(&mut self, model: Mat4) {
        self.uniforms.model = model.to_cols_array_2d();
    }

    /// Bind `variant` as the sampled texture for subsequent draws.
    pub fn pass_texture(&self, pass: &mut wgpu::RenderPass<'_>, variant: &TextureVariant) {
        pass.set_bind_group(1, variant.bind_group(), &[]);
    }

    /// Write staged uniforms to the GPU buffer.
    pub fn upload(&self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniforms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_block_matches_wgsl_layout() {
        // 2 mat4 + 4 vec4, no padding.
        assert_eq!(std::mem::size_of::<Uniforms>(), 2 * 64 + 4 * 16);
        assert_eq!(bytemuck::bytes_of(&Uniforms::default()).len() % 16, 0);
    }

    #[test]
    fn vertex_stride() {
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
    }

    #[test]
    fn default_multiplier_is_one() {
        assert_eq!(Uniforms::default().params[0], 1.0);
    }
}
