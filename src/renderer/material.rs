// renderer/material.rs
use bitflags::bitflags;
use glam::{Vec3, Vec4};

use crate::asset::Handle;
use crate::renderer::objects::ColorBlock;

/// How a material's output combines with what is already in the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// No blend state at all; the material goes through the masked/opaque path.
    #[default]
    Opaque,
    /// Explicit blend state with blending switched off.
    Disabled,
    Additive,
    Subtractive,
    Multiplicative,
    Transparency,
    AlphaToCoverage,
    /// Color writes masked off (depth-only style materials).
    NoColorWrite,
}

impl BlendMode {
    /// Every explicit blend state other than transparency.
    pub fn is_blended(self) -> bool {
        matches!(
            self,
            Self::Disabled
                | Self::Additive
                | Self::Subtractive
                | Self::Multiplicative
                | Self::AlphaToCoverage
                | Self::NoColorWrite
        )
    }

    pub fn is_transparency(self) -> bool {
        matches!(self, Self::Transparency)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CullMode {
    #[default]
    Back,
    Front,
    None,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MaterialFlags: u32 {
        const ALPHA_CLIP = 1 << 0;
        const UNLIT = 1 << 1;
        const CAST_SHADOW = 1 << 2;
    }
}

/// Pipeline-relevant state copied into every batch drawn with a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RenderState {
    pub blend: BlendMode,
    pub cull: CullMode,
    pub flags: MaterialFlags,
}

impl RenderState {
    pub fn is_alpha_clipped(&self) -> bool {
        self.flags.contains(MaterialFlags::ALPHA_CLIP)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ShaderId(pub u32);

/// Texture indices bound together for one material.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextureSet {
    pub base_color: Option<u32>,
    pub metallic_roughness: Option<u32>,
    pub normal: Option<u32>,
    pub emissive: Option<u32>,
    pub occlusion: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub shader: ShaderId,
    pub texture_set: Handle<TextureSet>,
    pub state: RenderState,
    pub ambient: Vec3,
    pub diffuse: Vec4,
    pub specular: Vec3,
    pub glossiness: f32,
    pub reflectance: Vec3,
}

impl Material {
    /// Neutral grey opaque material used when a lookup fails.
    pub const FALLBACK: Material = Material {
        name: String::new(),
        shader: ShaderId(0),
        texture_set: Handle::INVALID,
        state: RenderState {
            blend: BlendMode::Opaque,
            cull: CullMode::Back,
            flags: MaterialFlags::empty(),
        },
        ambient: Vec3::new(0.1, 0.1, 0.1),
        diffuse: Vec4::new(0.5, 0.5, 0.5, 1.0),
        specular: Vec3::ZERO,
        glossiness: 0.0,
        reflectance: Vec3::ZERO,
    };

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::FALLBACK
        }
    }

    pub fn with_shader(mut self, shader: ShaderId) -> Self {
        self.shader = shader;
        self
    }

    pub fn with_texture_set(mut self, texture_set: Handle<TextureSet>) -> Self {
        self.texture_set = texture_set;
        self
    }

    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.state.blend = blend;
        self
    }

    pub fn with_cull(mut self, cull: CullMode) -> Self {
        self.state.cull = cull;
        self
    }

    pub fn with_alpha_clip(mut self) -> Self {
        self.state.flags |= MaterialFlags::ALPHA_CLIP;
        self
    }

    pub fn with_flags(mut self, flags: MaterialFlags) -> Self {
        self.state.flags |= flags;
        self
    }

    pub fn with_ambient(mut self, ambient: Vec3) -> Self {
        self.ambient = ambient;
        self
    }

    pub fn with_diffuse(mut self, diffuse: Vec4) -> Self {
        self.diffuse = diffuse;
        self
    }

    pub fn with_specular(mut self, specular: Vec3, glossiness: f32) -> Self {
        self.specular = specular;
        self.glossiness = glossiness.max(0.0);
        self
    }

    pub fn with_reflectance(mut self, reflectance: Vec3) -> Self {
        self.reflectance = reflectance;
        self
    }

    pub fn render_state(&self) -> RenderState {
        self.state
    }

    pub fn color_block(&self) -> ColorBlock {
        ColorBlock::from_material(self)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::FALLBACK
    }
}
