// scene/view.rs
// EntitySource over a hecs World

use glam::{Mat4, Vec3};
use hecs::World;

use super::components::{ModelComponent, SubsetMaterials, WorldTransform};
use crate::renderer::{EntityId, EntitySource, MaterialId, ModelId};

impl EntitySource for World {
    fn model_id(&self, entity: EntityId) -> Option<ModelId> {
        self.get::<&ModelComponent>(entity).ok().map(|model| model.0)
    }

    fn material_ids(&self, entity: EntityId, out: &mut Vec<MaterialId>) {
        if let Ok(materials) = self.get::<&SubsetMaterials>(entity) {
            out.extend_from_slice(&materials.0);
        }
    }

    fn world_position(&self, entity: EntityId) -> Option<Vec3> {
        self.get::<&WorldTransform>(entity)
            .ok()
            .map(|transform| transform.0.translation)
    }

    fn world_matrix(&self, entity: EntityId) -> Option<Mat4> {
        self.get::<&WorldTransform>(entity)
            .ok()
            .map(|transform| transform.0.matrix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::Handle;
    use crate::scene::{EntityBuilder, Transform};

    #[test]
    fn reads_components_spawned_by_builder() {
        let mut world = World::new();
        let entity = EntityBuilder::new(&mut world)
            .with_name("lamp")
            .with_model(Handle::new(3))
            .with_materials([Handle::new(1), Handle::new(2)])
            .with_transform(Transform::from_translation(Vec3::new(1.0, 2.0, 3.0)))
            .spawn();

        let mut materials = Vec::new();
        world.material_ids(entity, &mut materials);

        assert_eq!(world.model_id(entity), Some(Handle::new(3)));
        assert_eq!(materials, vec![Handle::new(1), Handle::new(2)]);
        assert_eq!(world.world_position(entity), Some(Vec3::new(1.0, 2.0, 3.0)));
        let matrix = world.world_matrix(entity).unwrap();
        assert!(matrix.abs_diff_eq(Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)), 1e-6));
    }

    #[test]
    fn missing_components_are_none() {
        let mut world = World::new();
        let entity = world.spawn((ModelComponent(Handle::new(1)),));
        let despawned = world.spawn(());
        world.despawn(despawned).unwrap();

        let mut materials = Vec::new();
        world.material_ids(entity, &mut materials);

        assert!(materials.is_empty());
        assert!(world.world_position(entity).is_none());
        assert!(world.model_id(despawned).is_none());
    }

    #[test]
    fn world_matrix_applies_scale_then_rotation_then_translation() {
        let mut world = World::new();
        let entity = EntityBuilder::new(&mut world)
            .with_transform(Transform {
                translation: Vec3::new(1.0, 2.0, 3.0),
                rotation: glam::Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
                scale: Vec3::splat(2.0),
            })
            .spawn();

        let matrix = world.world_matrix(entity).unwrap();
        // (1,0,0) -> (2,0,0) -> (0,2,0) -> (1,4,3)
        let point = matrix.transform_point3(Vec3::X);

        assert!(point.abs_diff_eq(Vec3::new(1.0, 4.0, 3.0), 1e-5));
        assert_eq!(world.world_position(entity), Some(Vec3::new(1.0, 2.0, 3.0)));
    }
}
