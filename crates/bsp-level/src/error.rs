//! Error types for level generation.

use nalgebra::{Point3, Vector3};

use crate::RoomRole;

/// A configuration the generator cannot satisfy.
///
/// These are never retried by the caller as-is: the input (or, for the
/// shape-dependent variants, the seed) has to change.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A bounding volume has `min > max` on some axis.
    #[error("bounding volume is inverted: min {min} exceeds max {max}")]
    InvertedVolume { min: Point3<f32>, max: Point3<f32> },

    /// A bounding volume corner is NaN or infinite.
    #[error("bounding volume has non-finite corners: min {min}, max {max}")]
    NonFiniteVolume { min: Point3<f32>, max: Point3<f32> },

    /// The minimum room size is zero, negative or not finite on some axis.
    #[error("minimum room size must be positive and finite on every axis, got {0}")]
    NonPositiveRoomSize(Vector3<f32>),

    /// The maximum room size is smaller than the minimum on some axis.
    #[error("maximum room size {max} is smaller than minimum room size {min}")]
    InvertedRoomSizeRange { min: Vector3<f32>, max: Vector3<f32> },

    /// Walls are so thick that the smallest possible room has no interior.
    #[error("wall thickness {thickness} leaves no interior in a room of size {min_room}")]
    WallTooThick { thickness: f32, min_room: Vector3<f32> },

    /// A content placement knob is out of range.
    #[error("invalid content settings: {0}")]
    InvalidContentSettings(&'static str),

    /// Too few leaves to hold the entrance, exit, locked and key rooms.
    #[error("{leaves} rooms cannot hold the structural roles, at least {required} are needed")]
    InsufficientLeaves { leaves: usize, required: usize },

    /// No leaf is deep enough to host a locked room with a reachable key.
    #[error("no room is deep enough to host a locked room with a reachable key room")]
    NoEligibleLockedRoom,

    /// A gated role has no mandatory content item.
    #[error("content pool for {role} rooms has no mandatory item")]
    MissingMandatoryContent { role: RoomRole },
}

impl ConfigError {
    /// Returns `true` if the error depends on the randomly generated tree
    /// shape, so a different seed may succeed.
    pub fn depends_on_layout(&self) -> bool {
        matches!(
            self,
            ConfigError::InsufficientLeaves { .. } | ConfigError::NoEligibleLockedRoom
        )
    }
}

/// Any failure of a full generation run.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    /// The configuration or content catalog cannot be satisfied.
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// Every attempt allowed by the retry budget failed.
    #[error("gave up after {attempts} generation attempts: {last}")]
    RetryExhausted { attempts: u32, last: ConfigError },
}
