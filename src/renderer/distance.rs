use glam::Vec3;

use crate::error::PrepareError;
use crate::renderer::record::InstanceRecord;
use crate::renderer::source::{EntityId, EntitySource};

/// Reorders `records` farthest first by squared distance to `camera`.
///
/// The sort is stable so equal distances keep their incoming order. Entities
/// without a world position are treated as sitting on the camera and drawn
/// last. `keyed` is scratch space reused between calls.
pub fn sort_back_to_front<E: EntitySource + ?Sized>(
    records: &mut [InstanceRecord],
    camera: Vec3,
    entities: &E,
    keyed: &mut Vec<(f32, InstanceRecord)>,
) -> Result<(), PrepareError> {
    keyed.clear();
    keyed
        .try_reserve(records.len())
        .map_err(|source| PrepareError::scratch("distance sort", source))?;

    // Subsets of one entity are usually adjacent; reuse the last position.
    let mut last: Option<(EntityId, f32)> = None;
    for record in records.iter() {
        let distance_sq = match last {
            Some((entity, distance_sq)) if entity == record.entity => distance_sq,
            _ => {
                let distance_sq = match entities.world_position(record.entity) {
                    Some(position) => camera.distance_squared(position),
                    None => {
                        log::warn!(
                            "Entity {:?} has no world position, sorting it nearest",
                            record.entity
                        );
                        0.0
                    }
                };
                last = Some((record.entity, distance_sq));
                distance_sq
            }
        };
        keyed.push((distance_sq, *record));
    }

    keyed.sort_by(|a, b| b.0.total_cmp(&a.0));

    for (slot, (_, record)) in records.iter_mut().zip(keyed.iter()) {
        *slot = *record;
    }

    Ok(())
}
