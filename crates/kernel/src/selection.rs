use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::filter::{FilterMode, FilterSelection, texture_index};
use crate::object::BasePlacement;

/// Selectable objects, in load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ObjectKind {
    #[default]
    Plane,
    Cube,
    Sphere,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 3] = [ObjectKind::Plane, ObjectKind::Cube, ObjectKind::Sphere];

    pub fn index(self) -> usize {
        match self {
            ObjectKind::Plane => 0,
            ObjectKind::Cube => 1,
            ObjectKind::Sphere => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ObjectKind::Plane => "Plane",
            ObjectKind::Cube => "Cube",
            ObjectKind::Sphere => "Sphere",
        }
    }

    /// Mesh file loaded for this object.
    pub fn file_name(self) -> &'static str {
        match self {
            ObjectKind::Plane => "Plane.obj",
            ObjectKind::Cube => "Cube.obj",
            ObjectKind::Sphere => "Sphere.obj",
        }
    }

    /// The plane is pushed back and enlarged so it reads as a ground plane.
    pub fn base_placement(self) -> Option<BasePlacement> {
        match self {
            ObjectKind::Plane => Some(BasePlacement {
                translation: Vec3::new(0.0, 0.0, -5.0),
                scale: 15.0,
            }),
            ObjectKind::Cube | ObjectKind::Sphere => None,
        }
    }
}

/// Texture images, each uploaded with every filter variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TextureFamily {
    #[default]
    Chess,
    Colours,
    Tiles,
}

impl TextureFamily {
    pub const ALL: [TextureFamily; 3] = [
        TextureFamily::Chess,
        TextureFamily::Colours,
        TextureFamily::Tiles,
    ];

    pub fn index(self) -> usize {
        match self {
            TextureFamily::Chess => 0,
            TextureFamily::Colours => 1,
            TextureFamily::Tiles => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            TextureFamily::Chess => "Chess",
            TextureFamily::Colours => "Colours",
            TextureFamily::Tiles => "Tiles",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            TextureFamily::Chess => "chess.png",
            TextureFamily::Colours => "colors.png",
            TextureFamily::Tiles => "tiles.png",
        }
    }
}

/// Everything the GUI can change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub object: ObjectKind,
    pub texture: TextureFamily,
    pub filter: FilterSelection,
    coord_multiplier: f32,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            object: ObjectKind::default(),
            texture: TextureFamily::default(),
            filter: FilterSelection::default(),
            coord_multiplier: 1.0,
        }
    }
}

impl Selection {
    pub const MIN_COORD_MULTIPLIER: f32 = 0.01;
    pub const MAX_COORD_MULTIPLIER: f32 = 100.0;

    /// Scale applied to texture coordinates in the shader.
    pub fn coord_multiplier(&self) -> f32 {
        self.coord_multiplier
    }

    /// Clamp into the slider range. Non-finite values are ignored.
    pub fn set_coord_multiplier(&mut self, value: f32) {
        if value.is_finite() {
            self.coord_multiplier =
                value.clamp(Self::MIN_COORD_MULTIPLIER, Self::MAX_COORD_MULTIPLIER);
        } else {
            tracing::warn!("ignoring non-finite texture coordinate multiplier");
        }
    }

    pub fn texture_index(&self) -> usize {
        texture_index(self.texture, &self.filter)
    }

    pub fn filter_mode(&self) -> FilterMode {
        self.filter.mode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Interpolation;

    #[test]
    fn indices_follow_load_order() {
        for (i, kind) in ObjectKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
        for (i, family) in TextureFamily::ALL.iter().enumerate() {
            assert_eq!(family.index(), i);
            assert_eq!(TextureFamily::from_index(i), Some(*family));
        }
        assert_eq!(TextureFamily::from_index(3), None);
    }

    #[test]
    fn only_plane_has_base_placement() {
        assert!(ObjectKind::Plane.base_placement().is_some());
        assert!(ObjectKind::Cube.base_placement().is_none());
        assert!(ObjectKind::Sphere.base_placement().is_none());
    }

    #[test]
    fn coord_multiplier_is_clamped() {
        let mut sel = Selection::default();
        assert_eq!(sel.coord_multiplier(), 1.0);
        sel.set_coord_multiplier(500.0);
        assert_eq!(sel.coord_multiplier(), Selection::MAX_COORD_MULTIPLIER);
        sel.set_coord_multiplier(0.0);
        assert_eq!(sel.coord_multiplier(), Selection::MIN_COORD_MULTIPLIER);
        sel.set_coord_multiplier(f32::NAN);
        assert_eq!(sel.coord_multiplier(), Selection::MIN_COORD_MULTIPLIER);
    }

    #[test]
    fn selection_resolves_texture_variant() {
        let mut sel = Selection::default();
        assert_eq!(sel.texture_index(), 0);
        sel.texture = TextureFamily::Tiles;
        sel.filter = FilterSelection {
            mipmapping: true,
            texel: Interpolation::Linear,
            mipmap: Interpolation::Linear,
        };
        assert_eq!(sel.texture_index(), 14);
        assert_eq!(sel.filter_mode(), FilterMode::LinearMipmapLinear);
    }
}
