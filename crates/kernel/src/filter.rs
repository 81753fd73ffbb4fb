//! Texture filter modes and their flat variant indexing.
//!
//! Each texture family is uploaded once and sampled through five precomputed
//! filter configurations. Variants are stored family-major, so the variant for
//! a selection lives at `VARIANTS_PER_FAMILY * family + mode.offset()`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::selection::TextureFamily;

/// Filter configurations precomputed per texture family.
pub const VARIANTS_PER_FAMILY: usize = 5;

/// Interpolation choice for texels or between mip levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Interpolation {
    #[default]
    Nearest,
    Linear,
}

impl Interpolation {
    pub const ALL: [Interpolation; 2] = [Interpolation::Nearest, Interpolation::Linear];

    /// GUI label.
    pub fn label(self) -> &'static str {
        match self {
            Interpolation::Nearest => "Nearest",
            Interpolation::Linear => "Interpolate",
        }
    }

    fn bit(self) -> usize {
        match self {
            Interpolation::Nearest => 0,
            Interpolation::Linear => 1,
        }
    }
}

/// Minification filter of one texture variant, named after the GL enums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterMode {
    /// Base level only, nearest texel.
    Nearest,
    NearestMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapNearest,
    LinearMipmapLinear,
}

impl FilterMode {
    /// Variant order within a family.
    pub const ALL: [FilterMode; VARIANTS_PER_FAMILY] = [
        FilterMode::Nearest,
        FilterMode::NearestMipmapNearest,
        FilterMode::NearestMipmapLinear,
        FilterMode::LinearMipmapNearest,
        FilterMode::LinearMipmapLinear,
    ];

    /// Position of this mode within its family's variants.
    pub fn offset(self) -> usize {
        match self {
            FilterMode::Nearest => 0,
            FilterMode::NearestMipmapNearest => 1,
            FilterMode::NearestMipmapLinear => 2,
            FilterMode::LinearMipmapNearest => 3,
            FilterMode::LinearMipmapLinear => 4,
        }
    }

    pub fn is_mipmapped(self) -> bool {
        self != FilterMode::Nearest
    }

    pub fn gl_name(self) -> &'static str {
        match self {
            FilterMode::Nearest => "NEAREST",
            FilterMode::NearestMipmapNearest => "NEAREST_MIPMAP_NEAREST",
            FilterMode::NearestMipmapLinear => "NEAREST_MIPMAP_LINEAR",
            FilterMode::LinearMipmapNearest => "LINEAR_MIPMAP_NEAREST",
            FilterMode::LinearMipmapLinear => "LINEAR_MIPMAP_LINEAR",
        }
    }

    /// Sampler configuration implementing this mode.
    ///
    /// A mipmapped mode is not a valid magnification filter, so mipmapped
    /// variants magnify linearly, the GL default. The base-only variant
    /// magnifies with nearest.
    pub fn sampler_spec(self) -> SamplerSpec {
        let (texel, mipmap) = match self {
            FilterMode::Nearest => {
                return SamplerSpec {
                    min: Interpolation::Nearest,
                    mag: Interpolation::Nearest,
                    mipmap: Interpolation::Nearest,
                    lod_max_clamp: 0.0,
                };
            }
            FilterMode::NearestMipmapNearest => (Interpolation::Nearest, Interpolation::Nearest),
            FilterMode::NearestMipmapLinear => (Interpolation::Nearest, Interpolation::Linear),
            FilterMode::LinearMipmapNearest => (Interpolation::Linear, Interpolation::Nearest),
            FilterMode::LinearMipmapLinear => (Interpolation::Linear, Interpolation::Linear),
        };
        SamplerSpec {
            min: texel,
            mag: Interpolation::Linear,
            mipmap,
            lod_max_clamp: SamplerSpec::UNCLAMPED_LOD,
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.gl_name())
    }
}

/// Backend-neutral sampler description.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplerSpec {
    pub min: Interpolation,
    pub mag: Interpolation,
    pub mipmap: Interpolation,
    /// Highest mip level the sampler may read. `0.0` pins it to the base level.
    pub lod_max_clamp: f32,
}

impl SamplerSpec {
    pub const UNCLAMPED_LOD: f32 = 32.0;
}

/// The three filter toggles exposed in the GUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSelection {
    pub mipmapping: bool,
    /// Texel minification.
    pub texel: Interpolation,
    /// Interpolation between mip levels.
    pub mipmap: Interpolation,
}

impl FilterSelection {
    /// Mode picked by the toggles. The texel and mipmap choices are ignored
    /// while mipmapping is off.
    pub fn mode(&self) -> FilterMode {
        if !self.mipmapping {
            return FilterMode::Nearest;
        }
        match (self.texel, self.mipmap) {
            (Interpolation::Nearest, Interpolation::Nearest) => FilterMode::NearestMipmapNearest,
            (Interpolation::Nearest, Interpolation::Linear) => FilterMode::NearestMipmapLinear,
            (Interpolation::Linear, Interpolation::Nearest) => FilterMode::LinearMipmapNearest,
            (Interpolation::Linear, Interpolation::Linear) => FilterMode::LinearMipmapLinear,
        }
    }
}

/// Flat variant index: `5*family + m*(2*texel + mipmap) + m` with `m` the
/// mipmapping bit.
pub fn texture_index(family: TextureFamily, filter: &FilterSelection) -> usize {
    let m = usize::from(filter.mipmapping);
    VARIANTS_PER_FAMILY * family.index() + m * (2 * filter.texel.bit() + filter.mipmap.bit()) + m
}

/// Inverse of [`texture_index`] for the declared layout.
pub fn variant_at(index: usize) -> Option<(TextureFamily, FilterMode)> {
    let family = TextureFamily::from_index(index / VARIANTS_PER_FAMILY)?;
    Some((family, FilterMode::ALL[index % VARIANTS_PER_FAMILY]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_family_linear_mipmap_nearest_is_eight() {
        let sel = FilterSelection {
            mipmapping: true,
            texel: Interpolation::Linear,
            mipmap: Interpolation::Nearest,
        };
        let index = texture_index(TextureFamily::Colours, &sel);
        assert_eq!(index, 8);
        assert_eq!(
            variant_at(index),
            Some((TextureFamily::Colours, FilterMode::LinearMipmapNearest))
        );
        assert_eq!(sel.mode(), FilterMode::LinearMipmapNearest);
    }

    #[test]
    fn choices_ignored_without_mipmapping() {
        for family in TextureFamily::ALL {
            for texel in Interpolation::ALL {
                for mipmap in Interpolation::ALL {
                    let sel = FilterSelection {
                        mipmapping: false,
                        texel,
                        mipmap,
                    };
                    assert_eq!(texture_index(family, &sel), 5 * family.index());
                    assert_eq!(sel.mode(), FilterMode::Nearest);
                }
            }
        }
    }

    #[test]
    fn index_agrees_with_mode_offset() {
        for family in TextureFamily::ALL {
            for mipmapping in [false, true] {
                for texel in Interpolation::ALL {
                    for mipmap in Interpolation::ALL {
                        let sel = FilterSelection {
                            mipmapping,
                            texel,
                            mipmap,
                        };
                        let index = texture_index(family, &sel);
                        assert_eq!(index, VARIANTS_PER_FAMILY * family.index() + sel.mode().offset());
                        assert_eq!(variant_at(index), Some((family, sel.mode())));
                    }
                }
            }
        }
    }

    #[test]
    fn all_is_ordered_by_offset() {
        for (i, mode) in FilterMode::ALL.iter().enumerate() {
            assert_eq!(mode.offset(), i);
        }
        assert!(variant_at(TextureFamily::ALL.len() * VARIANTS_PER_FAMILY).is_none());
    }

    #[test]
    fn sampler_specs() {
        let base = FilterMode::Nearest.sampler_spec();
        assert_eq!(base.lod_max_clamp, 0.0);
        assert!(!FilterMode::Nearest.is_mipmapped());

        let spec = FilterMode::NearestMipmapLinear.sampler_spec();
        assert_eq!(spec.min, Interpolation::Nearest);
        assert_eq!(spec.mag, Interpolation::Linear);
        assert_eq!(spec.mipmap, Interpolation::Linear);
        assert!(spec.lod_max_clamp > 0.0);

        let spec = FilterMode::LinearMipmapNearest.sampler_spec();
        assert_eq!(spec.min, Interpolation::Linear);
        assert_eq!(spec.mipmap, Interpolation::Nearest);
    }

    #[test]
    fn mipmapped_variants_magnify_linearly() {
        assert_eq!(FilterMode::Nearest.sampler_spec().mag, Interpolation::Nearest);
        for mode in FilterMode::ALL.into_iter().filter(|m| m.is_mipmapped()) {
            assert_eq!(mode.sampler_spec().mag, Interpolation::Linear, "{mode}");
        }
    }
}
