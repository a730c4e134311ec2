//! Recursive partitioning of a volume into a room tree.

use nalgebra::Vector3;
use rand::Rng;

use crate::room::{Room, RoomTree, SplitSide};
use crate::tree::NodeId;
use crate::{BoundingVolume, ConfigError};

use super::selector::{AxisSelector, FloorsFirst, SplitRanges};

/// Partitions `bounds` into a room tree using the default [`FloorsFirst`]
/// axis selector.
///
/// See [`partition_with`].
pub fn partition<R: Rng + ?Sized>(
    bounds: BoundingVolume,
    min_room_size: Vector3<f32>,
    rng: &mut R,
) -> Result<RoomTree, ConfigError> {
    partition_with(bounds, min_room_size, &FloorsFirst, rng)
}

/// Partitions `bounds` into a room tree, splitting until no axis can be
/// split without producing a room smaller than `min_room_size`.
///
/// A volume smaller than twice the minimum size on every axis yields a
/// single-leaf tree.
///
/// Returns an error if `bounds` is inverted or not finite, or if
/// `min_room_size` is not positive and finite on every axis.
pub fn partition_with<S: AxisSelector, R: Rng + ?Sized>(
    bounds: BoundingVolume,
    min_room_size: Vector3<f32>,
    selector: &S,
    rng: &mut R,
) -> Result<RoomTree, ConfigError> {
    bounds.check()?;
    if min_room_size.iter().any(|&size| !(size > 0.0 && size.is_finite())) {
        return Err(ConfigError::NonPositiveRoomSize(min_room_size));
    }

    let mut tree = RoomTree::new(Room::new(bounds, None));
    let root = tree.root();
    split_recursive(&mut tree, root, &min_room_size, selector, rng);
    Ok(tree)
}

/// Splits the leaf `id`, then each of its children, depth-first.
///
/// Randomness is consumed in a fixed order: axis, coordinate, left subtree,
/// right subtree.
pub fn split_recursive<S: AxisSelector, R: Rng + ?Sized>(
    tree: &mut RoomTree,
    id: NodeId,
    min_room_size: &Vector3<f32>,
    selector: &S,
    rng: &mut R,
) {
    let Some([left, right]) = try_split(tree, id, min_room_size, selector, rng) else {
        return;
    };
    split_recursive(tree, left, min_room_size, selector, rng);
    split_recursive(tree, right, min_room_size, selector, rng);
}

/// Splits the leaf `id` once, if any axis allows it.
///
/// Returns the new `[left, right]` children, where `left` is the half below
/// the split coordinate.
pub fn try_split<S: AxisSelector, R: Rng + ?Sized>(
    tree: &mut RoomTree,
    id: NodeId,
    min_room_size: &Vector3<f32>,
    selector: &S,
    rng: &mut R,
) -> Option<[NodeId; 2]> {
    let bounds = *tree.get(id)?.bounds();
    let ranges = SplitRanges::new(&bounds, min_room_size);
    let axis = selector.select(&ranges, rng)?;
    let coordinate = ranges.interval(axis).sample(rng)?;

    let (lower, upper) = bounds.split_at(axis, coordinate);
    let (lower_side, upper_side) = SplitSide::pair(axis);
    Some(tree.split(
        id,
        Room::new(lower, Some(lower_side)),
        Room::new(upper, Some(upper_side)),
    ))
}
