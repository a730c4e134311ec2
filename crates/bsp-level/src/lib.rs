//! Procedural interior levels built on binary space partitioning.
//!
//! A [`Generator`] turns a [`GenerationConfig`] and a [`ContentCatalog`]
//! into a [`Level`]: a tree of rooms partitioning the configured volume,
//! the openings between neighbouring rooms, a role for every room and the
//! content items placed inside them.
//!
//! ```
//! use bsp_level::{
//!     BoundingVolume, ContentCatalog, ContentPool, GenerationConfig, Generator, RoomRole,
//! };
//!
//! let config = GenerationConfig {
//!     bounds: BoundingVolume::from_arrays([0.0; 3], [40.0, 9.0, 40.0]).unwrap(),
//!     seed: 42,
//!     ..GenerationConfig::default()
//! };
//! let catalog = ContentCatalog::new()
//!     .with_pool(RoomRole::KeyRoom, ContentPool::gated("key", vec!["table"]))
//!     .with_pool(RoomRole::LockedRoom, ContentPool::gated("chest", vec![]));
//!
//! let level = Generator::new(config).generate(&catalog).unwrap();
//! let key_room = level.room_with_role(RoomRole::KeyRoom).unwrap();
//! assert_eq!(level.placements(key_room)[0].content, "key");
//! ```
//!
//! The stages are usable on their own:
//!
//! - [`bsp`]: partitioning a volume into a [`RoomTree`]
//! - [`connect_rooms`] / [`shrink_rooms`]: openings and walls
//! - [`assign_roles`]: entrance, exit, locked and key rooms
//! - [`place_content`]: furnishing a single room
//!
//! All randomness is drawn from an explicit [`rand::Rng`], so a seed
//! reproduces a level. The crate logs through the [`log`] facade and never
//! installs a logger.

mod bounds;
mod config;
mod connect;
mod error;
mod generator;
mod interval;
mod placement;
mod roles;
mod room;

pub mod bsp;
pub mod tree;

pub use bounds::{Axis, BoundingVolume};
pub use config::{GenerationConfig, RoomSizeRange};
pub use connect::{
    Connection, ConnectionSet, OpeningSize, can_connect, connect_rooms, connected, shared_border,
    shrink_rooms,
};
pub use error::{ConfigError, GenerationError};
pub use generator::{Generator, Level};
pub use interval::Interval;
pub use placement::{
    Cell, ContentCatalog, ContentPool, ContentSettings, MAX_GRID_CELLS, MIN_CELL_SPACING, Placement,
    PlacementGrid, cell_distance, grid_resolution, place_content,
};
pub use roles::{RolePlan, assign_roles, plan_roles};
pub use room::{Room, RoomRole, RoomTree, SplitSide};
