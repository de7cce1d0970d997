use glam::Vec3;

use crate::renderer::model::{LodLevel, Model};
use crate::renderer::record::InstanceRecord;
use crate::renderer::source::{AssetSource, EntitySource, MaterialId};

/// Most aggressive LOD level whose scaled threshold is within `distance_sq`.
///
/// Levels are walked in ascending order and the last match wins.
pub fn select_lod(model: &Model, distance_sq: f32, threshold_factor: f32) -> Option<&LodLevel> {
    let mut selected = None;
    for level in model.lods() {
        if level.distance_sq * threshold_factor <= distance_sq {
            selected = Some(level);
        }
    }
    selected
}

/// Replaces the records of every entity far enough for a LOD level with a
/// single record for the substitute model, compacting `records` in place.
///
/// Records of one entity must be contiguous and each entity must appear in
/// one run only, as produced by gathering.
/// Returns the number of entities that were substituted.
pub fn resolve_lods<E, A>(
    records: &mut Vec<InstanceRecord>,
    camera: Vec3,
    threshold_factor: f32,
    entities: &E,
    assets: &A,
) -> usize
where
    E: EntitySource + ?Sized,
    A: AssetSource + ?Sized,
{
    let mut substituted = 0;
    let mut write = 0;
    let mut read = 0;

    while read < records.len() {
        let first = records[read];
        let end = read
            + records[read..]
                .iter()
                .take_while(|record| record.entity == first.entity)
                .count();

        match substitute_record(&first, camera, threshold_factor, entities, assets) {
            Some(record) => {
                records[write] = record;
                write += 1;
                substituted += 1;
            }
            None => {
                records.copy_within(read..end, write);
                write += end - read;
            }
        }

        read = end;
    }

    records.truncate(write);
    substituted
}

fn substitute_record<E, A>(
    record: &InstanceRecord,
    camera: Vec3,
    threshold_factor: f32,
    entities: &E,
    assets: &A,
) -> Option<InstanceRecord>
where
    E: EntitySource + ?Sized,
    A: AssetSource + ?Sized,
{
    let model = assets.model(record.model)?;
    if !model.has_lods() {
        return None;
    }

    let Some(position) = entities.world_position(record.entity) else {
        log::warn!(
            "Entity {:?} has no world position, LOD selection skipped",
            record.entity
        );
        return None;
    };

    let level = select_lod(model, camera.distance_squared(position), threshold_factor)?;

    let material = match assets.model(level.model).and_then(|lod| lod.subset(0)) {
        Some(subset) if assets.material(subset.material).is_some() => subset.material,
        Some(subset) => {
            log::warn!(
                "LOD model {:?} references unknown material {:?}",
                level.model,
                subset.material
            );
            MaterialId::INVALID
        }
        None => {
            log::warn!(
                "LOD model {:?} of {:?} has no resolvable subsets",
                level.model,
                record.model
            );
            MaterialId::INVALID
        }
    };

    Some(InstanceRecord {
        entity: record.entity,
        material,
        model: level.model,
        subset: 0,
    })
}
