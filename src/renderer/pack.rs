use glam::Mat4;

use crate::error::PrepareError;
use crate::renderer::batch::InstanceBatch;
use crate::renderer::objects::InstancesBuffer;
use crate::renderer::record::InstanceRecord;
use crate::renderer::source::{material_or_fallback, AssetSource, EntitySource};

/// Appends the world matrix and color block of every instance of `batches`.
///
/// `records` must be the sequence the batches were built from; each batch
/// consumes the next `instance_count` records. Writes are append-only, so
/// calling this once per group in emission order lays the buffer out in
/// final order.
pub fn pack_instances<E, A>(
    records: &[InstanceRecord],
    batches: &[InstanceBatch],
    entities: &E,
    assets: &A,
    buffer: &mut InstancesBuffer,
) -> Result<(), PrepareError>
where
    E: EntitySource + ?Sized,
    A: AssetSource + ?Sized,
{
    buffer.try_reserve(records.len())?;

    let mut start = 0;
    for batch in batches {
        debug_assert_eq!(batch.first_instance as usize, buffer.len());

        let end = start + batch.instance_count as usize;
        let color = material_or_fallback(assets, batch.material).color_block();

        for record in &records[start..end] {
            let matrix = entities.world_matrix(record.entity).unwrap_or_else(|| {
                log::warn!(
                    "Entity {:?} has no world transform, using identity",
                    record.entity
                );
                Mat4::IDENTITY
            });
            buffer.push(matrix, color);
        }

        start = end;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::batch::build_batches;
    use crate::renderer::fixtures::Fixture;
    use crate::renderer::objects::{ColorBlock, InstanceTransform};
    use crate::renderer::Material;
    use glam::{Vec3, Vec4};

    #[test]
    fn instances_follow_batch_order() {
        let mut fx = Fixture::new();
        let red = fx.material(Material::new("red").with_diffuse(Vec4::new(1.0, 0.0, 0.0, 1.0)));
        let blue = fx.material(Material::new("blue").with_diffuse(Vec4::new(0.0, 0.0, 1.0, 1.0)));
        let model = fx.model("cube", &[red]);

        let positions = [Vec3::X, Vec3::Y, Vec3::Z];
        let materials = [red, red, blue];
        let records: Vec<_> = positions
            .iter()
            .zip(materials)
            .map(|(&position, material)| InstanceRecord {
                entity: fx.spawn(model, &[material], position),
                material,
                model,
                subset: 0,
            })
            .collect();

        let mut next = 0;
        let mut batches = Vec::new();
        build_batches(&records, &mut next, &mut batches).unwrap();

        let mut buffer = InstancesBuffer::default();
        pack_instances(&records, &batches, &fx.world, &fx.assets, &mut buffer).unwrap();

        assert_eq!(buffer.len(), 3);
        for (slot, &position) in buffer.matrices().iter().zip(&positions) {
            let expected = InstanceTransform::from_matrix(Mat4::from_translation(position));
            assert_eq!(slot, &expected);
        }
        let red_block = ColorBlock::from_material(fx.assets.materials.get(red).unwrap());
        let blue_block = ColorBlock::from_material(fx.assets.materials.get(blue).unwrap());
        assert_eq!(buffer.colors(), &[red_block, red_block, blue_block]);
    }

    #[test]
    fn missing_transform_packs_identity() {
        let mut fx = Fixture::new();
        let grey = fx.material(Material::new("grey"));
        let model = fx.model("cube", &[grey]);
        let entity = fx.world.spawn(());
        let records = vec![InstanceRecord { entity, material: grey, model, subset: 0 }];

        let mut next = 0;
        let mut batches = Vec::new();
        build_batches(&records, &mut next, &mut batches).unwrap();

        let mut buffer = InstancesBuffer::default();
        pack_instances(&records, &batches, &fx.world, &fx.assets, &mut buffer).unwrap();

        assert_eq!(buffer.matrices()[0], InstanceTransform::from_matrix(Mat4::IDENTITY));
    }
}
