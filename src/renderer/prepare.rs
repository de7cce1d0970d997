//! Per-frame preparation entry point.
//!
//! [`PrepareContext::prepare`] runs the stages in order:
//!
//! 1. gather one record per visible (entity, subset),
//! 2. replace distant entities by their LOD substitute,
//! 3. sort by material and split into the four render groups,
//! 4. sort the two blending groups back to front,
//! 5. merge runs into batches and resolve their geometry,
//! 6. pack matrices and color blocks into the instance buffer.
//!
//! The context owns every intermediate list so repeated calls reuse their
//! allocations. It is `&mut self` throughout, so one context can only ever
//! serve one call at a time.

use std::collections::HashSet;

use glam::Vec3;

use crate::error::PrepareError;
use crate::renderer::batch::{build_batches, resolve_batches};
use crate::renderer::classify::{partition_records, sort_by_material, RenderGroup};
use crate::renderer::distance::sort_back_to_front;
use crate::renderer::gather::gather_records;
use crate::renderer::lod::resolve_lods;
use crate::renderer::pack::pack_instances;
use crate::renderer::record::InstanceRecord;
use crate::renderer::source::{AssetSource, EntityId, EntitySource, MaterialId};
use crate::renderer::storage::RenderDataStorage;
use crate::settings::PrepareSettings;

/// Counters describing one preparation call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrepareStats {
    pub visible_entities: usize,
    pub skipped_entities: usize,
    pub records: usize,
    pub lod_substitutions: usize,
    /// Indexed by [`RenderGroup::index`].
    pub batches: [usize; 4],
    pub instances: usize,
}

impl PrepareStats {
    pub fn batch_count(&self) -> usize {
        self.batches.iter().sum()
    }
}

pub struct PrepareContext {
    settings: PrepareSettings,
    records: Vec<InstanceRecord>,
    groups: [Vec<InstanceRecord>; 4],
    material_ids: Vec<MaterialId>,
    seen: HashSet<EntityId>,
    distance_keys: Vec<(f32, InstanceRecord)>,
}

impl PrepareContext {
    pub fn new(settings: PrepareSettings) -> Self {
        Self {
            settings,
            records: Vec::new(),
            groups: Default::default(),
            material_ids: Vec::new(),
            seen: HashSet::new(),
            distance_keys: Vec::new(),
        }
    }

    pub fn settings(&self) -> &PrepareSettings {
        &self.settings
    }

    /// Records of `group` in final emission order, as left by the last call.
    pub fn group_records(&self, group: RenderGroup) -> &[InstanceRecord] {
        &self.groups[group.index()]
    }

    /// Rebuilds `storage` for the given visible set and camera position.
    ///
    /// On error `storage` is left cleared.
    pub fn prepare<E, A>(
        &mut self,
        visible: &[EntityId],
        camera: Vec3,
        entities: &E,
        assets: &A,
        storage: &mut RenderDataStorage,
    ) -> Result<PrepareStats, PrepareError>
    where
        E: EntitySource + ?Sized,
        A: AssetSource + ?Sized,
    {
        storage.clear();

        let result = self.run(visible, camera, entities, assets, storage);
        match &result {
            Ok(stats) => {
                log::debug!(
                    "Prepared {} instances in {} batches ({} entities, {} skipped, {} LOD)",
                    stats.instances,
                    stats.batch_count(),
                    stats.visible_entities,
                    stats.skipped_entities,
                    stats.lod_substitutions
                );
            }
            Err(err) => {
                log::error!("Frame preparation failed: {}", err);
                storage.clear();
            }
        }
        result
    }

    fn run<E, A>(
        &mut self,
        visible: &[EntityId],
        camera: Vec3,
        entities: &E,
        assets: &A,
        storage: &mut RenderDataStorage,
    ) -> Result<PrepareStats, PrepareError>
    where
        E: EntitySource + ?Sized,
        A: AssetSource + ?Sized,
    {
        let mut stats = PrepareStats {
            visible_entities: visible.len(),
            ..PrepareStats::default()
        };
        self.reserve_scratch(storage)?;

        stats.skipped_entities = gather_records(
            visible,
            entities,
            assets,
            &mut self.material_ids,
            &mut self.seen,
            &mut self.records,
        )?;

        if self.settings.lod_enabled {
            stats.lod_substitutions = resolve_lods(
                &mut self.records,
                camera,
                self.settings.lod_threshold_factor(),
                entities,
                assets,
            );
        }
        stats.records = self.records.len();

        sort_by_material(&mut self.records);
        partition_records(&self.records, assets, &mut self.groups)?;

        let mut next_instance = 0u32;
        for group in RenderGroup::ORDER {
            let records = &mut self.groups[group.index()];
            if group.requires_back_to_front_sort() {
                sort_back_to_front(records, camera, entities, &mut self.distance_keys)?;
            }

            let batches = &mut storage.groups[group.index()];
            build_batches(records, &mut next_instance, batches)?;
            resolve_batches(batches, assets);
            pack_instances(records, batches, entities, assets, &mut storage.instances)?;

            stats.batches[group.index()] = batches.len();
        }

        stats.instances = storage.instances.len();
        debug_assert_eq!(stats.instances, stats.records);
        debug_assert_eq!(next_instance as usize, stats.records);

        Ok(stats)
    }

    fn reserve_scratch(&mut self, storage: &mut RenderDataStorage) -> Result<(), PrepareError> {
        let settings = &self.settings;
        self.records
            .try_reserve(settings.record_capacity)
            .map_err(|source| PrepareError::scratch("records", source))?;
        for batches in &mut storage.groups {
            batches
                .try_reserve(settings.batch_capacity)
                .map_err(|source| PrepareError::scratch("batches", source))?;
        }
        storage.instances.try_reserve(settings.instance_capacity)
    }
}

impl Default for PrepareContext {
    fn default() -> Self {
        Self::new(PrepareSettings::default())
    }
}
