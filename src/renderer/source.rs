//! Read-only query interfaces the preparer pulls its inputs through.
//!
//! Entity data (models, materials, transforms) and asset tables are owned by
//! other systems; the preparer only reads them for the duration of one call.
//! Every query returns `None` when the entity, component or asset is missing.

use glam::{Mat4, Vec3};

use crate::asset::Handle;
use crate::renderer::{Material, Model, TextureSet};

pub type EntityId = hecs::Entity;
pub type ModelId = Handle<Model>;
pub type MaterialId = Handle<Material>;
pub type TextureSetId = Handle<TextureSet>;

pub trait EntitySource {
    fn model_id(&self, entity: EntityId) -> Option<ModelId>;

    /// Appends one material id per mesh subset to `out`, in subset order.
    /// Appends nothing when the entity has no material assignment.
    fn material_ids(&self, entity: EntityId, out: &mut Vec<MaterialId>);

    fn world_position(&self, entity: EntityId) -> Option<Vec3>;

    fn world_matrix(&self, entity: EntityId) -> Option<Mat4>;
}

pub trait AssetSource {
    fn model(&self, id: ModelId) -> Option<&Model>;

    fn material(&self, id: MaterialId) -> Option<&Material>;

    fn texture_set(&self, id: TextureSetId) -> Option<&TextureSet>;
}

static FALLBACK_MODEL: Model = Model::EMPTY;
static FALLBACK_MATERIAL: Material = Material::FALLBACK;

/// Resolves `id`, substituting the empty fallback model when it is missing.
pub(crate) fn model_or_fallback<A: AssetSource + ?Sized>(assets: &A, id: ModelId) -> &Model {
    match assets.model(id) {
        Some(model) => model,
        None => {
            if !id.is_invalid() {
                log::warn!("Model {:?} could not be resolved, using fallback", id);
            }
            &FALLBACK_MODEL
        }
    }
}

/// Resolves `id`, substituting the grey opaque fallback material when it is missing.
pub(crate) fn material_or_fallback<A: AssetSource + ?Sized>(
    assets: &A,
    id: MaterialId,
) -> &Material {
    match assets.material(id) {
        Some(material) => material,
        None => {
            if !id.is_invalid() {
                log::warn!("Material {:?} could not be resolved, using fallback", id);
            }
            &FALLBACK_MATERIAL
        }
    }
}
