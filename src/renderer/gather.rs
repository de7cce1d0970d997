use std::collections::HashSet;

use crate::error::PrepareError;
use crate::renderer::record::InstanceRecord;
use crate::renderer::source::{AssetSource, EntityId, EntitySource, MaterialId, ModelId};

/// Expands every visible entity into one record per mesh subset.
///
/// An entity listed more than once in `visible` is gathered at its first
/// listing only, so the records of one entity are always contiguous.
///
/// `materials` and `seen` are scratch space for the per-entity material query
/// and the duplicate check. Returns the number of entities that produced no
/// records.
pub fn gather_records<E, A>(
    visible: &[EntityId],
    entities: &E,
    assets: &A,
    materials: &mut Vec<MaterialId>,
    seen: &mut HashSet<EntityId>,
    records: &mut Vec<InstanceRecord>,
) -> Result<usize, PrepareError>
where
    E: EntitySource + ?Sized,
    A: AssetSource + ?Sized,
{
    records.clear();
    records
        .try_reserve(visible.len())
        .map_err(|source| PrepareError::scratch("gather", source))?;
    seen.clear();
    seen.try_reserve(visible.len())
        .map_err(|source| PrepareError::scratch("gather", source))?;

    let mut skipped = 0;
    for &entity in visible {
        if !seen.insert(entity) {
            log::debug!("Entity {:?} listed more than once, ignoring repeat", entity);
            continue;
        }

        materials.clear();
        entities.material_ids(entity, materials);
        if materials.is_empty() {
            log::warn!("Entity {:?} has no materials, skipping", entity);
            skipped += 1;
            continue;
        }

        let (model, subset_count) = resolve_model(entity, entities, assets, materials.len());
        if subset_count == 0 {
            skipped += 1;
            continue;
        }

        records
            .try_reserve(subset_count)
            .map_err(|source| PrepareError::scratch("gather", source))?;

        for (subset, &material) in materials[..subset_count].iter().enumerate() {
            let material = if assets.material(material).is_some() {
                material
            } else {
                log::warn!(
                    "Entity {:?} subset {} references unknown material {:?}",
                    entity,
                    subset,
                    material
                );
                MaterialId::INVALID
            };

            records.push(InstanceRecord {
                entity,
                material,
                model,
                subset: subset as u32,
            });
        }
    }

    Ok(skipped)
}

/// Picks the model id to record and how many subsets to emit.
///
/// A resolvable model emits `min(subsets, materials)` records. A missing or
/// invalid model falls back to [`ModelId::INVALID`] with one record per
/// material, so the entity still shows up with fallback geometry.
fn resolve_model<E, A>(
    entity: EntityId,
    entities: &E,
    assets: &A,
    material_count: usize,
) -> (ModelId, usize)
where
    E: EntitySource + ?Sized,
    A: AssetSource + ?Sized,
{
    let Some(id) = entities.model_id(entity) else {
        log::warn!("Entity {:?} has no model, using fallback", entity);
        return (ModelId::INVALID, material_count);
    };

    match assets.model(id) {
        Some(model) if !id.is_invalid() => {
            let subset_count = model.subsets().len();
            if subset_count != material_count {
                log::error!(
                    "Entity {:?}: model {:?} has {} subsets but {} materials, drawing {}",
                    entity,
                    id,
                    subset_count,
                    material_count,
                    subset_count.min(material_count)
                );
            }
            (id, subset_count.min(material_count))
        }
        Some(_) => (ModelId::INVALID, material_count),
        None => {
            log::warn!(
                "Entity {:?} references unknown model {:?}, using fallback",
                entity,
                id
            );
            (ModelId::INVALID, material_count)
        }
    }
}
