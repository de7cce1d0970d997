// Shared world/asset setup for the stage unit tests.

use glam::Vec3;
use hecs::World;

use crate::asset::Assets;
use crate::renderer::{GeometryHandle, Material, MaterialId, Model, ModelId, Subset};
use crate::scene::{EntityBuilder, Transform};

pub(crate) struct Fixture {
    pub world: World,
    pub assets: Assets,
}

impl Fixture {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self {
            world: World::new(),
            assets: Assets::default(),
        }
    }

    pub fn material(&mut self, material: Material) -> MaterialId {
        self.assets.materials.insert(material)
    }

    /// Model with one subset per material, each with its own geometry.
    pub fn model(&mut self, name: &str, materials: &[MaterialId]) -> ModelId {
        let geometry_base = self.assets.models.len() as u32 * 16;
        let mut model = Model::new(name);
        for (i, &material) in materials.iter().enumerate() {
            model = model.with_subset(
                Subset::new(material, GeometryHandle(geometry_base + i as u32 + 1))
                    .with_vertices(i as u32 * 100, 100, 32)
                    .with_indices(i as u32 * 300, 300),
            );
        }
        self.assets.models.insert(model)
    }

    pub fn spawn(&mut self, model: ModelId, materials: &[MaterialId], position: Vec3) -> hecs::Entity {
        EntityBuilder::new(&mut self.world)
            .with_model(model)
            .with_materials(materials.iter().copied())
            .with_transform(Transform::from_translation(position))
            .spawn()
    }
}
