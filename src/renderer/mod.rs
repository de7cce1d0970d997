pub mod batch;
pub mod classify;
pub mod distance;
pub mod gather;
pub mod lod;
pub mod material;
pub mod model;
pub mod objects;
pub mod pack;
pub mod prepare;
pub mod record;
pub mod source;
pub mod storage;

#[cfg(test)]
pub(crate) mod fixtures;

pub use batch::InstanceBatch;
pub use classify::RenderGroup;
pub use material::{
    BlendMode, CullMode, Material, MaterialFlags, RenderState, ShaderId, TextureSet,
};
pub use model::{GeometryHandle, LodLevel, Model, Subset};
pub use objects::{ColorBlock, InstanceTransform, InstancesBuffer};
pub use prepare::{PrepareContext, PrepareStats};
pub use record::InstanceRecord;
pub use source::{
    AssetSource, EntityId, EntitySource, MaterialId, ModelId, TextureSetId,
};
pub use storage::{DrawCommand, RenderDataStorage};
