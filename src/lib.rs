//! Per-frame render submission preparation.
//!
//! Turns a list of visible entities into four ordered lists of instanced
//! draw batches (masked, opaque, blended, blended-transparent) plus one
//! packed per-instance buffer laid out in the same order.
//!
//! ```no_run
//! use glam::Vec3;
//! use hecs::World;
//! use instance_prep::asset::Assets;
//! use instance_prep::renderer::{PrepareContext, RenderDataStorage};
//!
//! # fn visible_entities(_: &World) -> Vec<hecs::Entity> { Vec::new() }
//! let world = World::new();
//! let assets = Assets::default();
//! let mut context = PrepareContext::default();
//! let mut storage = RenderDataStorage::default();
//!
//! let visible = visible_entities(&world);
//! context.prepare(&visible, Vec3::ZERO, &world, &assets, &mut storage)?;
//! for draw in storage.draw_commands() {
//!     // bind draw.geometry / draw.shader, then draw draw.indices x draw.instances
//! }
//! # Ok::<(), instance_prep::error::PrepareError>(())
//! ```

pub mod asset;
pub mod error;
pub mod renderer;
pub mod scene;
pub mod settings;

pub use error::PrepareError;
pub use settings::PrepareSettings;
