// scene/components.rs
// hecs components read by the preparer

use crate::renderer::{MaterialId, ModelId};
use crate::scene::Transform;

/// Model drawn for the entity.
#[derive(Debug, Clone, Copy)]
pub struct ModelComponent(pub ModelId);

/// One material per model subset, in subset order.
#[derive(Debug, Clone)]
pub struct SubsetMaterials(pub Vec<MaterialId>);

/// World-space transform, produced by whatever evaluates the hierarchy.
#[derive(Debug, Clone, Copy)]
pub struct WorldTransform(pub Transform);

/// Name component for debugging
#[derive(Debug, Clone)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}
