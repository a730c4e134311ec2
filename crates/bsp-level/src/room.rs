//! Per-room data stored in the partition tree.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tree::{BinaryTree, NodeId};
use crate::{Axis, BoundingVolume};

/// The room hierarchy produced by the partitioner.
pub type RoomTree = BinaryTree<Room>;

/// Structural or flavor role of a room.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum RoomRole {
    #[default]
    None,
    Entrance,
    Exit,
    KeyRoom,
    LockedRoom,
    TreasureRoom,
    EnemyRoom,
    PuzzleRoom,
}

impl RoomRole {
    /// Roles handed out to rooms without a structural role.
    pub const FLAVORS: [RoomRole; 3] = [
        RoomRole::TreasureRoom,
        RoomRole::EnemyRoom,
        RoomRole::PuzzleRoom,
    ];

    /// Every role, in declaration order.
    pub const ALL: [RoomRole; 8] = [
        RoomRole::None,
        RoomRole::Entrance,
        RoomRole::Exit,
        RoomRole::KeyRoom,
        RoomRole::LockedRoom,
        RoomRole::TreasureRoom,
        RoomRole::EnemyRoom,
        RoomRole::PuzzleRoom,
    ];

    /// Entrance, exit, key room or locked room. Exactly one leaf holds each.
    #[inline]
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            RoomRole::Entrance | RoomRole::Exit | RoomRole::KeyRoom | RoomRole::LockedRoom
        )
    }

    /// Roles whose room must receive the mandatory item of its content pool.
    #[inline]
    pub fn is_gated(self) -> bool {
        matches!(self, RoomRole::KeyRoom | RoomRole::LockedRoom)
    }

    /// Roles handed out to rooms left over after the structural ones.
    #[inline]
    pub fn is_flavor(self) -> bool {
        Self::FLAVORS.contains(&self)
    }

    /// Lowercase name, as used by `Display`.
    pub fn name(self) -> &'static str {
        match self {
            RoomRole::None => "none",
            RoomRole::Entrance => "entrance",
            RoomRole::Exit => "exit",
            RoomRole::KeyRoom => "key room",
            RoomRole::LockedRoom => "locked room",
            RoomRole::TreasureRoom => "treasure room",
            RoomRole::EnemyRoom => "enemy room",
            RoomRole::PuzzleRoom => "puzzle room",
        }
    }
}

impl fmt::Display for RoomRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which half of its parent's split a room occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SplitSide {
    /// Lower half of a vertical split.
    Down,
    /// Upper half of a vertical split.
    Up,
    /// Lower half of an X split.
    Left,
    /// Upper half of an X split.
    Right,
    /// Lower half of a Z split.
    Back,
    /// Upper half of a Z split.
    Forward,
}

impl SplitSide {
    /// Returns the `(lower, upper)` sides produced by splitting along `axis`.
    pub fn pair(axis: Axis) -> (SplitSide, SplitSide) {
        match axis {
            Axis::Y => (SplitSide::Down, SplitSide::Up),
            Axis::X => (SplitSide::Left, SplitSide::Right),
            Axis::Z => (SplitSide::Back, SplitSide::Forward),
        }
    }

    /// Returns the axis of the split that produced this side.
    pub fn axis(self) -> Axis {
        match self {
            SplitSide::Down | SplitSide::Up => Axis::Y,
            SplitSide::Left | SplitSide::Right => Axis::X,
            SplitSide::Back | SplitSide::Forward => Axis::Z,
        }
    }
}

/// A node of the room tree: a partition cell, and a room if it is a leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    bounds: BoundingVolume,
    interior: BoundingVolume,
    side: Option<SplitSide>,
    pub(crate) role: RoomRole,
    pub(crate) connections: BTreeSet<NodeId>,
}

impl Room {
    /// Creates a room occupying `bounds`, with an interior equal to its
    /// bounds, no role and no connections.
    pub fn new(bounds: BoundingVolume, side: Option<SplitSide>) -> Self {
        Self {
            bounds,
            interior: bounds,
            side,
            role: RoomRole::None,
            connections: BTreeSet::new(),
        }
    }

    /// The partition cell of this node.
    #[inline]
    pub fn bounds(&self) -> &BoundingVolume {
        &self.bounds
    }

    /// The usable space inside the walls. Equal to [`Room::bounds`] until
    /// walls are carved out by [`crate::shrink_rooms`].
    #[inline]
    pub fn interior(&self) -> &BoundingVolume {
        &self.interior
    }

    /// Which half of its parent this room is. `None` for the root.
    #[inline]
    pub fn side(&self) -> Option<SplitSide> {
        self.side
    }

    /// Only meaningful on leaves.
    #[inline]
    pub fn role(&self) -> RoomRole {
        self.role
    }

    /// Leaves this room has an opening to. Only meaningful on leaves.
    #[inline]
    pub fn connections(&self) -> &BTreeSet<NodeId> {
        &self.connections
    }

    pub(crate) fn set_interior(&mut self, interior: BoundingVolume) {
        self.interior = interior;
    }
}
