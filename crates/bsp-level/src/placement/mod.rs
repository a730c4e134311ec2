//! Grid-based placement of content items inside rooms.
//!
//! Each room's interior, minus a margin along the walls, is covered by a
//! [`PlacementGrid`]. Items are dropped on random cells that keep a minimum
//! distance from each other; small rooms relax that distance rather than
//! stay empty.
//!
//! What is placed comes from a [`ContentCatalog`], which holds one
//! [`ContentPool`] of opaque handles per [`RoomRole`](crate::RoomRole).

mod catalog;
mod grid;
mod place;

pub use catalog::{ContentCatalog, ContentPool};
pub use grid::{
    Cell, MAX_GRID_CELLS, MIN_CELL_SPACING, PlacementGrid, cell_distance, grid_resolution,
};
pub use place::{ContentSettings, Placement, place_content};
