// scene/mod.rs

pub mod builder;
pub mod components;
pub mod transform;
mod view;

pub use builder::EntityBuilder;
pub use components::{ModelComponent, Name, SubsetMaterials, WorldTransform};
pub use transform::Transform;
