use crate::asset::Handle;
use crate::renderer::Material;

/// Opaque reference to a vertex/index buffer pair owned by the GPU layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GeometryHandle(pub u32);

impl GeometryHandle {
    pub const INVALID: Self = Self(0);
}

/// A contiguous mesh segment with its own material assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Subset {
    pub material: Handle<Material>,
    pub geometry: GeometryHandle,
    pub vertex_stride: u32,
    pub vertex_start: u32,
    pub vertex_count: u32,
    pub index_start: u32,
    pub index_count: u32,
}

impl Subset {
    /// Zero-sized range; draws nothing.
    pub const EMPTY: Subset = Subset {
        material: Handle::INVALID,
        geometry: GeometryHandle::INVALID,
        vertex_stride: 0,
        vertex_start: 0,
        vertex_count: 0,
        index_start: 0,
        index_count: 0,
    };

    pub fn new(material: Handle<Material>, geometry: GeometryHandle) -> Self {
        Self {
            material,
            geometry,
            ..Self::EMPTY
        }
    }

    pub fn with_vertices(mut self, start: u32, count: u32, stride: u32) -> Self {
        self.vertex_start = start;
        self.vertex_count = count;
        self.vertex_stride = stride;
        self
    }

    pub fn with_indices(mut self, start: u32, count: u32) -> Self {
        self.index_start = start;
        self.index_count = count;
        self
    }
}

/// Substitute model used once the squared camera distance reaches `distance_sq`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LodLevel {
    pub distance_sq: f32,
    pub model: Handle<Model>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    pub name: String,
    subsets: Vec<Subset>,
    lods: Vec<LodLevel>,
}

impl Model {
    pub const EMPTY: Model = Model {
        name: String::new(),
        subsets: Vec::new(),
        lods: Vec::new(),
    };

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subsets: Vec::new(),
            lods: Vec::new(),
        }
    }

    pub fn with_subset(mut self, subset: Subset) -> Self {
        self.subsets.push(subset);
        self
    }

    /// Adds a LOD level. Levels stay ordered by ascending threshold whatever
    /// the insertion order.
    pub fn with_lod(mut self, distance_sq: f32, model: Handle<Model>) -> Self {
        let at = self
            .lods
            .partition_point(|level| level.distance_sq <= distance_sq);
        self.lods.insert(at, LodLevel { distance_sq, model });
        self
    }

    pub fn subsets(&self) -> &[Subset] {
        &self.subsets
    }

    pub fn subset(&self, index: u32) -> Option<&Subset> {
        self.subsets.get(index as usize)
    }

    pub fn lods(&self) -> &[LodLevel] {
        &self.lods
    }

    pub fn has_lods(&self) -> bool {
        !self.lods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lod_levels_are_kept_ascending() {
        let model = Model::new("tree")
            .with_lod(900.0, Handle::new(3))
            .with_lod(100.0, Handle::new(2))
            .with_lod(400.0, Handle::new(4));

        let thresholds: Vec<f32> = model.lods().iter().map(|l| l.distance_sq).collect();
        assert_eq!(thresholds, vec![100.0, 400.0, 900.0]);
        assert_eq!(model.lods()[0].model, Handle::new(2));
    }

    #[test]
    fn subset_lookup_is_bounds_checked() {
        let model = Model::new("crate").with_subset(
            Subset::new(Handle::new(1), GeometryHandle(4))
                .with_vertices(0, 24, 32)
                .with_indices(0, 36),
        );

        assert_eq!(model.subset(0).map(|s| s.index_count), Some(36));
        assert!(model.subset(1).is_none());
        assert!(!model.has_lods());
    }
}
