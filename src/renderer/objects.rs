// renderer/objects.rs
use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::error::PrepareError;
use crate::renderer::Material;

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable, Debug, PartialEq)]
pub struct InstanceTransform {
    pub model: [[f32; 4]; 4], // 64 bytes
}

impl InstanceTransform {
    pub fn from_matrix(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable, Debug, PartialEq)]
pub struct ColorBlock {
    pub ambient: [f32; 4],     // 16 bytes, w = 1
    pub diffuse: [f32; 4],     // 16 bytes
    pub specular: [f32; 4],    // 16 bytes, w = glossiness
    pub reflectance: [f32; 4], // 16 bytes, w unused
}

impl ColorBlock {
    pub fn from_material(material: &Material) -> Self {
        Self {
            ambient: material.ambient.extend(1.0).to_array(),
            diffuse: material.diffuse.to_array(),
            specular: material.specular.extend(material.glossiness).to_array(),
            reflectance: material.reflectance.extend(0.0).to_array(),
        }
    }
}

/// Per-instance data for one frame, in final emission order.
///
/// Slot `i` of both arrays belongs to the same instance.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct InstancesBuffer {
    matrices: Vec<InstanceTransform>,
    colors: Vec<ColorBlock>,
}

impl InstancesBuffer {
    pub fn clear(&mut self) {
        self.matrices.clear();
        self.colors.clear();
    }

    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }

    pub fn matrices(&self) -> &[InstanceTransform] {
        &self.matrices
    }

    pub fn colors(&self) -> &[ColorBlock] {
        &self.colors
    }

    pub fn matrices_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.matrices)
    }

    pub fn colors_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<(), PrepareError> {
        self.matrices
            .try_reserve(additional)
            .map_err(|source| PrepareError::scratch("instances", source))?;
        self.colors
            .try_reserve(additional)
            .map_err(|source| PrepareError::scratch("instances", source))
    }

    pub(crate) fn push(&mut self, matrix: Mat4, color: ColorBlock) {
        self.matrices.push(InstanceTransform::from_matrix(matrix));
        self.colors.push(color);
    }
}
