// renderer/batch.rs
use std::ops::Range;

use crate::error::PrepareError;
use crate::renderer::material::{RenderState, ShaderId};
use crate::renderer::model::{GeometryHandle, Subset};
use crate::renderer::record::{BatchKey, InstanceRecord};
use crate::renderer::source::{
    material_or_fallback, model_or_fallback, AssetSource, MaterialId, ModelId, TextureSetId,
};
use crate::renderer::{Material, Model};

/// A run of instances sharing (material, model, subset); one instanced draw.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceBatch {
    pub material: MaterialId,
    pub model: ModelId,
    pub subset: u32,
    pub shader: ShaderId,
    pub state: RenderState,
    pub texture_set: TextureSetId,
    pub geometry: GeometryHandle,
    pub vertex_stride: u32,
    pub vertex_start: u32,
    pub vertex_count: u32,
    pub index_start: u32,
    pub index_count: u32,
    pub instance_count: u32,
    /// Offset of this batch's first slot in the instance buffer.
    pub first_instance: u32,
    pub name: String,
}

impl InstanceBatch {
    fn open(record: &InstanceRecord, first_instance: u32) -> Self {
        Self {
            material: record.material,
            model: record.model,
            subset: record.subset,
            shader: ShaderId::default(),
            state: RenderState::default(),
            texture_set: TextureSetId::INVALID,
            geometry: GeometryHandle::INVALID,
            vertex_stride: 0,
            vertex_start: 0,
            vertex_count: 0,
            index_start: 0,
            index_count: 0,
            instance_count: 1,
            first_instance,
            name: String::new(),
        }
    }

    pub fn key(&self) -> BatchKey {
        (self.material, self.model, self.subset)
    }

    pub fn instance_range(&self) -> Range<u32> {
        self.first_instance..self.first_instance + self.instance_count
    }
}

/// Merges consecutive records with the same identity into batches.
///
/// `next_instance` is the instance buffer offset the first batch starts at;
/// it is advanced past every instance appended here so consecutive groups
/// can be chained. Batches are left unresolved, see [`resolve_batches`].
pub fn build_batches(
    records: &[InstanceRecord],
    next_instance: &mut u32,
    batches: &mut Vec<InstanceBatch>,
) -> Result<(), PrepareError> {
    batches.clear();

    for record in records {
        match batches.last_mut() {
            Some(batch) if batch.key() == record.batch_key() => batch.instance_count += 1,
            _ => {
                batches
                    .try_reserve(1)
                    .map_err(|source| PrepareError::scratch("batch", source))?;
                batches.push(InstanceBatch::open(record, *next_instance));
            }
        }
        *next_instance += 1;
    }

    Ok(())
}

/// Last model/material looked up, carried across consecutive batches.
#[derive(Default)]
pub struct ResolveCursor<'a> {
    model: Option<(ModelId, &'a Model)>,
    material: Option<(MaterialId, &'a Material)>,
}

/// Fills geometry, shader and state data for batches whose identity is final.
pub fn resolve_batches<A: AssetSource + ?Sized>(batches: &mut [InstanceBatch], assets: &A) {
    let mut cursor = ResolveCursor::default();
    for batch in batches {
        resolve_batch(batch, assets, &mut cursor);
    }
}

pub fn resolve_batch<'a, A: AssetSource + ?Sized>(
    batch: &mut InstanceBatch,
    assets: &'a A,
    cursor: &mut ResolveCursor<'a>,
) {
    let model = match cursor.model {
        Some((id, model)) if id == batch.model => model,
        _ => {
            let model = model_or_fallback(assets, batch.model);
            cursor.model = Some((batch.model, model));
            model
        }
    };

    let material = match cursor.material {
        Some((id, material)) if id == batch.material => material,
        _ => {
            let material = material_or_fallback(assets, batch.material);
            cursor.material = Some((batch.material, material));
            material
        }
    };

    let subset = match model.subset(batch.subset) {
        Some(subset) => *subset,
        None => {
            if !batch.model.is_invalid() {
                log::warn!(
                    "Model {:?} has no subset {}, drawing nothing for this batch",
                    batch.model,
                    batch.subset
                );
            }
            Subset::EMPTY
        }
    };

    let texture_set = if assets.texture_set(material.texture_set).is_some() {
        material.texture_set
    } else {
        log::warn!(
            "Material {:?} references unknown texture set {:?}",
            batch.material,
            material.texture_set
        );
        TextureSetId::INVALID
    };

    batch.shader = material.shader;
    batch.state = material.render_state();
    batch.texture_set = texture_set;
    batch.geometry = subset.geometry;
    batch.vertex_stride = subset.vertex_stride;
    batch.vertex_start = subset.vertex_start;
    batch.vertex_count = subset.vertex_count;
    batch.index_start = subset.index_start;
    batch.index_count = subset.index_count;
    batch.name = format!("{}[{}] {}", model.name, batch.subset, material.name);
}
