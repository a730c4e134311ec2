//! Placing content items inside a single room.

use nalgebra::{Point3, UnitQuaternion, Vector3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ConfigError;
use crate::room::Room;

use super::catalog::ContentPool;
use super::grid::{Cell, MAX_GRID_CELLS, PlacementGrid};

/// Knobs of the per-room placement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSettings {
    /// Items to place per room. Fewer are placed if the room runs out of
    /// space.
    pub target_count: usize,
    /// Nominal distance between items.
    pub min_separation: f32,
    /// Grid cell size as a fraction of `min_separation`. Lower values give
    /// more, smaller cells.
    pub density_factor: f32,
    /// Fraction of the interior's horizontal extents kept clear along each
    /// wall.
    pub inset: f32,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            target_count: 5,
            min_separation: 3.0,
            density_factor: 0.2,
            inset: 0.2,
        }
    }
}

impl ContentSettings {
    /// Checks every knob on its own. Whether the grid fits a given room is
    /// decided by [`grid_resolution`](super::grid_resolution).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_count == 0 {
            return Err(ConfigError::InvalidContentSettings(
                "target count must be at least 1",
            ));
        }
        if self.target_count > MAX_GRID_CELLS {
            return Err(ConfigError::InvalidContentSettings(
                "target count exceeds the placement grid capacity",
            ));
        }
        if !(self.min_separation > 0.0) {
            return Err(ConfigError::InvalidContentSettings(
                "minimum separation must be positive",
            ));
        }
        if !(self.density_factor > 0.0) {
            return Err(ConfigError::InvalidContentSettings(
                "density factor must be positive",
            ));
        }
        if !(0.0..0.5).contains(&self.inset) {
            return Err(ConfigError::InvalidContentSettings(
                "inset must be within [0, 0.5)",
            ));
        }
        Ok(())
    }

    /// Edge length of a placement grid cell.
    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.min_separation * self.density_factor
    }
}

/// One content item placed in a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement<H> {
    /// Grid cell the item occupies.
    pub cell: Cell,
    /// Cell center on the room floor.
    pub position: Point3<f32>,
    /// Rotation about +Y, in `[0, 360)`.
    pub yaw_degrees: f32,
    pub content: H,
}

impl<H> Placement<H> {
    /// The yaw as a rotation about the vertical axis.
    pub fn rotation(&self) -> UnitQuaternion<f32> {
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), self.yaw_degrees.to_radians())
    }
}

/// Places up to `settings.target_count` items from `pool` in the interior
/// of `room`, keeping them apart on a grid.
///
/// Each item takes a random free cell with no occupied cell within two
/// cells of it. Rooms too small to hold twice the target count of cells
/// fall back to any free cell once no such cell is left. Placement stops
/// early when no cell qualifies.
///
/// Rooms of a gated role receive the pool's mandatory item first and draw
/// the rest from its tail; with an empty tail only the mandatory item is
/// placed. Other rooms draw from the whole pool.
///
/// Per item, randomness is consumed in a fixed order: cell, content, yaw.
///
/// Returns [`ConfigError::MissingMandatoryContent`] if the room has a gated
/// role and the pool has no mandatory item, and
/// [`ConfigError::InvalidContentSettings`] if the room is too large for the
/// cell size. A missing or empty pool for any other role places nothing.
pub fn place_content<H: Clone, R: Rng + ?Sized>(
    room: &Room,
    pool: Option<&ContentPool<H>>,
    settings: &ContentSettings,
    rng: &mut R,
) -> Result<Vec<Placement<H>>, ConfigError> {
    let role = room.role();
    let gated = role.is_gated();
    if gated && pool.and_then(ContentPool::mandatory).is_none() {
        return Err(ConfigError::MissingMandatoryContent { role });
    }
    let Some(pool) = pool.filter(|pool| !pool.is_empty()) else {
        log::warn!("no content for {role} room, leaving it empty");
        return Ok(Vec::new());
    };

    let footprint = room.interior().inset_horizontal(settings.inset);
    let mut grid = PlacementGrid::new(footprint, settings.cell_size())?;
    // Fewer than two cells per item.
    let relax = grid.cell_count() / 2 < settings.target_count;

    let mut placements = Vec::with_capacity(settings.target_count.min(grid.cell_count()));
    for index in 0..settings.target_count {
        if gated && index > 0 && pool.tail().is_empty() {
            break;
        }

        let mut cells = grid.valid_cells();
        if cells.is_empty() && relax {
            cells = grid.free_cells();
        }
        if cells.is_empty() {
            break;
        }
        let cell = cells[rng.random_range(0..cells.len())];
        grid.occupy(cell);

        let content = match (gated, index) {
            (true, 0) => pool.mandatory(),
            (true, _) => pool.draw_tail(rng),
            (false, _) => pool.draw(rng),
        };
        let Some(content) = content.cloned() else {
            break;
        };

        placements.push(Placement {
            cell,
            position: grid.cell_center(cell),
            yaw_degrees: rng.random_range(0.0..360.0),
            content,
        });
    }
    Ok(placements)
}
