use miplab_assets::TextureImage;
use miplab_kernel::{FilterMode, Interpolation, SamplerSpec, TextureFamily, VARIANTS_PER_FAMILY};

fn filter_mode(interp: Interpolation) -> wgpu::FilterMode {
    match interp {
        Interpolation::Nearest => wgpu::FilterMode::Nearest,
        Interpolation::Linear => wgpu::FilterMode::Linear,
    }
}

/// Sampler descriptor for one filter configuration. Coordinates repeat so the
/// texture multiplier tiles the image.
pub fn sampler_descriptor(spec: &SamplerSpec) -> wgpu::SamplerDescriptor<'static> {
    wgpu::SamplerDescriptor {
        label: Some("filter_variant_sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: filter_mode(spec.mag),
        min_filter: filter_mode(spec.min),
        mipmap_filter: filter_mode(spec.mipmap),
        lod_min_clamp: 0.0,
        lod_max_clamp: spec.lod_max_clamp,
        ..Default::default()
    }
}

/// One image uploaded with its full mip chain.
struct GpuTexture {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl GpuTexture {
    fn upload(device: &wgpu::Device, queue: &wgpu::Queue, image: &TextureImage) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(image.name.as_str()),
            size: wgpu::Extent3d {
                width: image.width(),
                height: image.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: image.mip_count(),
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (level, pixels) in image.levels().iter().enumerate() {
            let (width, height) = pixels.dimensions();
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                pixels.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * width),
                    rows_per_image: Some(height),
                },
                wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            _texture: texture,
            view,
        }
    }
}

/// A texture family sampled through one filter configuration.
pub struct TextureVariant {
    family: TextureFamily,
    mode: FilterMode,
    bind_group: wgpu::BindGroup,
}

impl TextureVariant {
    pub fn family(&self) -> TextureFamily {
        self.family
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub(crate) fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

/// All texture variants in flat order: five filter modes per family.
pub struct TextureBank {
    _textures: Vec<GpuTexture>,
    variants: Vec<TextureVariant>,
}

impl TextureBank {
    /// Upload each family once and create its five sampler variants.
    /// `images` must be in [`TextureFamily::ALL`] order.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        images: &[TextureImage; 3],
    ) -> Self {
        let samplers: Vec<wgpu::Sampler> = FilterMode::ALL
            .iter()
            .map(|mode| device.create_sampler(&sampler_descriptor(&mode.sampler_spec())))
            .collect();

        let mut textures = Vec::with_capacity(images.len());
        let mut variants = Vec::with_capacity(images.len() * VARIANTS_PER_FAMILY);
        for (family, image) in TextureFamily::ALL.into_iter().zip(images) {
            let gpu = GpuTexture::upload(device, queue, image);
            for (mode, sampler) in FilterMode::ALL.into_iter().zip(&samplers) {
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("texture_variant_bind_group"),
                    layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: wgpu::BindingResource::TextureView(&gpu.view),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::Sampler(sampler),
                        },
                    ],
                });
                variants.push(TextureVariant {
                    family,
                    mode,
                    bind_group,
                });
            }
            tracing::debug!(
                texture = %image.name,
                family = family.label(),
                levels = image.mip_count(),
                "uploaded texture"
            );
            textures.push(gpu);
        }

        Self {
            _textures: textures,
            variants,
        }
    }

    pub fn variant(&self, index: usize) -> Option<&TextureVariant> {
        self.variants.get(index)
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}
