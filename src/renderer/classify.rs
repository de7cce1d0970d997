use crate::error::PrepareError;
use crate::renderer::material::RenderState;
use crate::renderer::record::InstanceRecord;
use crate::renderer::source::{material_or_fallback, AssetSource, MaterialId};

/// The four mutually exclusive groups, emitted in [`RenderGroup::ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderGroup {
    Masked,
    Opaque,
    /// Any explicit blend state other than transparency.
    Blended,
    BlendedTransparent,
}

impl RenderGroup {
    /// Emission order. Transparent geometry always goes last.
    pub const ORDER: [RenderGroup; 4] = [
        RenderGroup::Masked,
        RenderGroup::Opaque,
        RenderGroup::Blended,
        RenderGroup::BlendedTransparent,
    ];

    pub const fn index(self) -> usize {
        match self {
            RenderGroup::Masked => 0,
            RenderGroup::Opaque => 1,
            RenderGroup::Blended => 2,
            RenderGroup::BlendedTransparent => 3,
        }
    }

    /// Blending groups are drawn back to front.
    pub fn requires_back_to_front_sort(self) -> bool {
        matches!(self, Self::Blended | Self::BlendedTransparent)
    }

    /// Fixed precedence: non-transparent blending, then transparency, then
    /// alpha clip, then opaque.
    pub fn classify(state: &RenderState) -> Self {
        if state.blend.is_blended() {
            RenderGroup::Blended
        } else if state.blend.is_transparency() {
            RenderGroup::BlendedTransparent
        } else if state.is_alpha_clipped() {
            RenderGroup::Masked
        } else {
            RenderGroup::Opaque
        }
    }
}

/// Stable sort by material, with model, subset and entity as explicit
/// tie-breaks.
pub fn sort_by_material(records: &mut [InstanceRecord]) {
    records.sort_by_key(InstanceRecord::sort_key);
}

/// Distributes `records` into `groups` (indexed by [`RenderGroup::index`])
/// keeping their relative order.
pub fn partition_records<A: AssetSource + ?Sized>(
    records: &[InstanceRecord],
    assets: &A,
    groups: &mut [Vec<InstanceRecord>; 4],
) -> Result<(), PrepareError> {
    for group in groups.iter_mut() {
        group.clear();
    }

    // Records arrive sorted by material, so one lookup per run suffices.
    let mut current: Option<(MaterialId, RenderGroup)> = None;
    for record in records {
        let group = match current {
            Some((material, group)) if material == record.material => group,
            _ => {
                let material = material_or_fallback(assets, record.material);
                let group = RenderGroup::classify(&material.render_state());
                current = Some((record.material, group));
                group
            }
        };

        let target = &mut groups[group.index()];
        target
            .try_reserve(1)
            .map_err(|source| PrepareError::scratch("classify", source))?;
        target.push(*record);
    }

    Ok(())
}
