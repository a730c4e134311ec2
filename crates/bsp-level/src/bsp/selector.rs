//! Split axis selection strategies for the partitioner.
//!
//! The choice of axis shapes the generated building: splitting vertically
//! first stacks floors before dividing them into rooms.

use nalgebra::Vector3;
use rand::Rng;

use crate::{Axis, BoundingVolume, Interval};

/// The range of legal split coordinates on each axis of a volume.
///
/// A coordinate `c` on an axis is legal if both halves keep at least the
/// minimum room size: `min + min_room_size <= c <= max - min_room_size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitRanges {
    ranges: [Interval; 3],
}

impl SplitRanges {
    /// Computes the split ranges of `bounds` for the given minimum room size.
    pub fn new(bounds: &BoundingVolume, min_room_size: &Vector3<f32>) -> Self {
        let lower = bounds.min() + *min_room_size;
        let upper = bounds.max() - *min_room_size;
        Self {
            ranges: Axis::ALL.map(|axis| Interval::new(lower[axis.index()], upper[axis.index()])),
        }
    }

    /// Returns the legal split coordinates along `axis`.
    #[inline]
    pub fn interval(&self, axis: Axis) -> Interval {
        self.ranges[axis.index()]
    }

    /// Returns `true` if the volume can be split along `axis`.
    #[inline]
    pub fn is_splittable(&self, axis: Axis) -> bool {
        !self.interval(axis).is_empty()
    }

    /// Returns `true` if the volume can be split along any axis.
    pub fn any_splittable(&self) -> bool {
        Axis::ALL.iter().any(|&axis| self.is_splittable(axis))
    }
}

/// Strategy for choosing which axis to split a volume along.
///
/// Implementations must only return splittable axes, and must consume
/// randomness deterministically so that a seed reproduces a layout.
pub trait AxisSelector {
    /// Select the split axis, or `None` if the volume must stay a leaf.
    fn select<R: Rng + ?Sized>(&self, ranges: &SplitRanges, rng: &mut R) -> Option<Axis>;
}

/// Splits vertically whenever possible, then horizontally.
///
/// When both horizontal axes are splittable one boolean is drawn (`true`
/// picks X); otherwise no randomness is consumed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloorsFirst;

impl AxisSelector for FloorsFirst {
    fn select<R: Rng + ?Sized>(&self, ranges: &SplitRanges, rng: &mut R) -> Option<Axis> {
        if ranges.is_splittable(Axis::Y) {
            return Some(Axis::Y);
        }
        match (ranges.is_splittable(Axis::X), ranges.is_splittable(Axis::Z)) {
            (true, true) => Some(if rng.random_bool(0.5) { Axis::X } else { Axis::Z }),
            (true, false) => Some(Axis::X),
            (false, true) => Some(Axis::Z),
            (false, false) => None,
        }
    }
}
