//! Binary space partitioning of a volume into rooms.
//!
//! The partitioner recursively splits a bounding volume into two halves
//! along an axis chosen by an [`AxisSelector`], until no axis can be split
//! without violating the minimum room size. Every leaf of the resulting
//! [`RoomTree`](crate::RoomTree) is one room.
//!
//! # Example
//!
//! ```
//! use bsp_level::bsp::partition;
//! use bsp_level::{BoundingVolume, tree};
//! use nalgebra::Vector3;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let bounds = BoundingVolume::from_arrays([0.0; 3], [20.0, 6.0, 20.0]).unwrap();
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let rooms = partition(bounds, Vector3::new(4.0, 3.0, 4.0), &mut rng).unwrap();
//!
//! assert!(tree::leaves(&rooms, rooms.root()).count() > 1);
//! ```
//!
//! # Architecture
//!
//! - [`partition`] / [`partition_with`]: build a whole tree
//! - [`split_recursive`] / [`try_split`]: split an existing leaf
//! - [`AxisSelector`]: strategy trait for choosing split axes
//! - [`SplitRanges`]: legal split coordinates per axis

mod partition;
mod selector;

pub use partition::{partition, partition_with, split_recursive, try_split};
pub use selector::{AxisSelector, FloorsFirst, SplitRanges};
