//! Generation settings.
//!
//! A [`GenerationConfig`] can be built in code or deserialized, e.g. from
//! JSON. Every field has a default:
//!
//! ```
//! use bsp_level::GenerationConfig;
//!
//! let config: GenerationConfig = serde_json::from_str(
//!     r#"{ "bounds": { "min": [0, 0, 0], "max": [30, 6, 30] }, "seed": 7 }"#,
//! )
//! .unwrap();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.max_attempts, 1);
//! ```

use nalgebra::{Point3, Vector3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::connect::OpeningSize;
use crate::placement::{ContentSettings, grid_resolution};
use crate::{BoundingVolume, ConfigError};

/// The accepted extents of a leaf room.
///
/// Only `min` drives the partitioner. Leaves larger than `max` are reported
/// but kept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomSizeRange {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl Default for RoomSizeRange {
    fn default() -> Self {
        Self {
            min: Vector3::new(4.0, 3.0, 4.0),
            max: Vector3::new(16.0, 6.0, 16.0),
        }
    }
}

impl RoomSizeRange {
    /// Checks that `min` is positive and finite and that `max` is not
    /// smaller than `min`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min.iter().any(|&size| !(size > 0.0 && size.is_finite())) {
            return Err(ConfigError::NonPositiveRoomSize(self.min));
        }
        if self.max.iter().zip(self.min.iter()).any(|(max, min)| max < min) {
            return Err(ConfigError::InvertedRoomSizeRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Returns `true` if `extents` do not exceed `max` on any axis.
    pub fn fits(&self, extents: &Vector3<f32>) -> bool {
        extents.iter().zip(self.max.iter()).all(|(extent, max)| extent <= max)
    }
}

/// Everything the generator needs besides the content catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// The volume to partition.
    pub bounds: BoundingVolume,
    pub room_size: RoomSizeRange,
    /// Minimum opening between connected rooms.
    pub opening: OpeningSize,
    /// Distance between the interiors of neighbouring rooms.
    pub wall_thickness: f32,
    pub content: ContentSettings,
    /// Seed of the random stream. `0` picks a fresh seed per run.
    pub seed: u64,
    /// Runs allowed before giving up on layouts that cannot hold all roles.
    /// `0` behaves as `1`.
    pub max_attempts: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            bounds: BoundingVolume::from_ordered(
                Point3::origin(),
                Point3::new(40.0, 9.0, 40.0),
            ),
            room_size: RoomSizeRange::default(),
            opening: OpeningSize::default(),
            wall_thickness: 0.0,
            content: ContentSettings::default(),
            seed: 0,
            max_attempts: 1,
        }
    }
}

impl GenerationConfig {
    /// Checks every setting that does not depend on the random layout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bounds.check()?;
        self.room_size.validate()?;
        let thickness = self.wall_thickness;
        if !(thickness >= 0.0) || self.room_size.min.iter().any(|&size| thickness > size) {
            return Err(ConfigError::WallTooThick {
                thickness,
                min_room: self.room_size.min,
            });
        }
        self.content.validate()?;
        // No room is larger than the bounds, so this grid is the finest any
        // room can need.
        let widest = self.bounds.inset_horizontal(self.content.inset);
        grid_resolution(&widest, self.content.cell_size()).map(|_| ())
    }

    /// Returns the configured seed, or a fresh non-zero one if it is `0`.
    pub fn resolve_seed(&self) -> u64 {
        if self.seed == 0 {
            rand::rng().random_range(1..=u64::MAX)
        } else {
            self.seed
        }
    }

    /// The attempt budget, at least `1`.
    #[inline]
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}
