use std::ops::Range;

use crate::renderer::batch::InstanceBatch;
use crate::renderer::classify::RenderGroup;
use crate::renderer::material::{RenderState, ShaderId};
use crate::renderer::model::GeometryHandle;
use crate::renderer::objects::InstancesBuffer;
use crate::renderer::source::TextureSetId;

/// Everything the renderer needs to submit one frame.
///
/// Rebuilt from scratch by every preparation call.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderDataStorage {
    pub(crate) groups: [Vec<InstanceBatch>; 4],
    pub(crate) instances: InstancesBuffer,
}

/// One instanced draw, in submission order.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand<'a> {
    pub group: RenderGroup,
    pub name: &'a str,
    pub shader: ShaderId,
    pub state: RenderState,
    pub texture_set: TextureSetId,
    pub geometry: GeometryHandle,
    pub vertex_stride: u32,
    pub vertices: Range<u32>,
    pub indices: Range<u32>,
    /// Slots in the instance buffer.
    pub instances: Range<u32>,
}

impl RenderDataStorage {
    pub fn clear(&mut self) {
        for group in &mut self.groups {
            group.clear();
        }
        self.instances.clear();
    }

    pub fn group(&self, group: RenderGroup) -> &[InstanceBatch] {
        &self.groups[group.index()]
    }

    pub fn masked(&self) -> &[InstanceBatch] {
        self.group(RenderGroup::Masked)
    }

    pub fn opaque(&self) -> &[InstanceBatch] {
        self.group(RenderGroup::Opaque)
    }

    pub fn blended(&self) -> &[InstanceBatch] {
        self.group(RenderGroup::Blended)
    }

    pub fn blended_transparent(&self) -> &[InstanceBatch] {
        self.group(RenderGroup::BlendedTransparent)
    }

    pub fn instances(&self) -> &InstancesBuffer {
        &self.instances
    }

    /// All batches in emission order, tagged with their group.
    pub fn batches(&self) -> impl Iterator<Item = (RenderGroup, &InstanceBatch)> {
        RenderGroup::ORDER
            .into_iter()
            .flat_map(move |group| self.group(group).iter().map(move |batch| (group, batch)))
    }

    pub fn draw_commands(&self) -> impl Iterator<Item = DrawCommand<'_>> {
        self.batches().map(|(group, batch)| DrawCommand {
            group,
            name: &batch.name,
            shader: batch.shader,
            state: batch.state,
            texture_set: batch.texture_set,
            geometry: batch.geometry,
            vertex_stride: batch.vertex_stride,
            vertices: batch.vertex_start..batch.vertex_start + batch.vertex_count,
            indices: batch.index_start..batch.index_start + batch.index_count,
            instances: batch.instance_range(),
        })
    }

    pub fn batch_count(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batch_count() == 0 && self.instances.is_empty()
    }
}
