pub mod cache;
pub mod handle;

pub use cache::AssetCache;
pub use handle::Handle;

use crate::renderer::{AssetSource, Material, MaterialId, Model, ModelId, TextureSet, TextureSetId};

/// Owning tables for everything the preparer looks up by id.
pub struct Assets {
    pub models: AssetCache<Model>,
    pub materials: AssetCache<Material>,
    pub texture_sets: AssetCache<TextureSet>,
}

impl Default for Assets {
    fn default() -> Self {
        Self {
            models: AssetCache::with_fallback(Model::EMPTY),
            materials: AssetCache::with_fallback(Material::FALLBACK),
            texture_sets: AssetCache::default(),
        }
    }
}

impl AssetSource for Assets {
    fn model(&self, id: ModelId) -> Option<&Model> {
        self.models.get(id)
    }

    fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id)
    }

    fn texture_set(&self, id: TextureSetId) -> Option<&TextureSet> {
        self.texture_sets.get(id)
    }
}
