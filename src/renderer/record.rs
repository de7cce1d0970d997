use crate::renderer::source::{EntityId, MaterialId, ModelId};

/// One (entity, subset) pairing scheduled for drawing this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceRecord {
    pub entity: EntityId,
    pub material: MaterialId,
    pub model: ModelId,
    pub subset: u32,
}

/// Identity shared by every instance of one batch.
pub type BatchKey = (MaterialId, ModelId, u32);

impl InstanceRecord {
    pub fn batch_key(&self) -> BatchKey {
        (self.material, self.model, self.subset)
    }

    /// Material first, then model and subset so equal identities end up
    /// adjacent, then entity bits so the order never depends on input order.
    pub(crate) fn sort_key(&self) -> (MaterialId, ModelId, u32, u64) {
        (
            self.material,
            self.model,
            self.subset,
            self.entity.to_bits().get(),
        )
    }
}
