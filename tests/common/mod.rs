#![allow(dead_code)]

use glam::Vec3;
use hecs::{Entity, World};
use instance_prep::asset::Assets;
use instance_prep::renderer::{
    GeometryHandle, InstanceBatch, Material, MaterialId, Model, ModelId, RenderDataStorage,
    RenderGroup, Subset,
};
use instance_prep::scene::{EntityBuilder, Transform};

pub struct TestScene {
    pub world: World,
    pub assets: Assets,
}

impl TestScene {
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

    /// Registers materials until `target` is the next id handed out.
    pub fn pad_materials_to(&mut self, target: u32) {
        while (self.assets.materials.len() as u32) + 1 < target {
            self.assets.materials.insert(Material::new("padding"));
        }
    }

    pub fn pad_models_to(&mut self, target: u32) {
        while (self.assets.models.len() as u32) + 1 < target {
            self.assets.models.insert(Model::new("padding"));
        }
    }

    pub fn model(&mut self, name: &str, materials: &[MaterialId]) -> ModelId {
        self.assets.models.insert(model_with_subsets(name, materials))
    }

    pub fn spawn(&mut self, model: ModelId, materials: &[MaterialId], position: Vec3) -> Entity {
        EntityBuilder::new(&mut self.world)
            .with_model(model)
            .with_materials(materials.iter().copied())
            .with_transform(Transform::from_translation(position))
            .spawn()
    }

    /// Spawns an entity using every subset material of `model`.
    pub fn spawn_model(&mut self, model: ModelId, position: Vec3) -> Entity {
        let materials: Vec<_> = self
            .assets
            .models
            .get(model)
            .map(|m| m.subsets().iter().map(|s| s.material).collect())
            .unwrap_or_default();
        self.spawn(model, &materials, position)
    }
}

pub fn model_with_subsets(name: &str, materials: &[MaterialId]) -> Model {
    let mut model = Model::new(name);
    for (i, &material) in materials.iter().enumerate() {
        model = model.with_subset(
            Subset::new(material, GeometryHandle(i as u32 + 1))
                .with_vertices(0, 24, 32)
                .with_indices(0, 36),
        );
    }
    model
}

/// Checks every structural invariant of a prepared frame.
pub fn assert_storage_invariants(storage: &RenderDataStorage, camera: Vec3) {
    let mut expected_first = 0u32;
    for (_, batch) in storage.batches() {
        assert_eq!(batch.first_instance, expected_first, "batch {}", batch.name);
        expected_first += batch.instance_count;
    }
    assert_eq!(expected_first as usize, storage.instance_count());
    assert_eq!(storage.instances().colors().len(), storage.instance_count());

    for group in RenderGroup::ORDER {
        for pair in storage.group(group).windows(2) {
            assert_ne!(pair[0].key(), pair[1].key(), "missed merge in {:?}", group);
        }
        if group.requires_back_to_front_sort() {
            let distances = instance_distances(storage, group, camera);
            for pair in distances.windows(2) {
                assert!(pair[0] >= pair[1], "{:?} not back to front: {:?}", group, distances);
            }
        }
    }
}

/// Squared camera distance of each packed instance of `group`, taken from
/// the translation column of its world matrix.
pub fn instance_distances(storage: &RenderDataStorage, group: RenderGroup, camera: Vec3) -> Vec<f32> {
    let matrices = storage.instances().matrices();
    storage
        .group(group)
        .iter()
        .flat_map(|batch: &InstanceBatch| batch.instance_range())
        .map(|slot| {
            let column = matrices[slot as usize].model[3];
            Vec3::new(column[0], column[1], column[2]).distance_squared(camera)
        })
        .collect()
}
