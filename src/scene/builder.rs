// scene/builder.rs
// Optional helper for spawning renderable entities

use hecs::World;

use super::components::*;
use crate::renderer::{MaterialId, ModelId};
use crate::scene::Transform;

/// Helper for building entities with a fluent API
/// This is optional - you can also use world.spawn() directly
pub struct EntityBuilder<'w> {
    world: &'w mut World,
    builder: hecs::EntityBuilder,
}

impl<'w> EntityBuilder<'w> {
    pub fn new(world: &'w mut World) -> Self {
        Self {
            world,
            builder: hecs::EntityBuilder::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.builder.add(Name::new(name));
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.builder.add(WorldTransform(transform));
        self
    }

    pub fn with_model(mut self, model: ModelId) -> Self {
        self.builder.add(ModelComponent(model));
        self
    }

    /// Material ids in subset order.
    pub fn with_materials(mut self, materials: impl IntoIterator<Item = MaterialId>) -> Self {
        self.builder
            .add(SubsetMaterials(materials.into_iter().collect()));
        self
    }

    pub fn spawn(&mut self) -> hecs::Entity {
        self.world.spawn(self.builder.build())
    }
}
