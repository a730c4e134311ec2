//! Axis-aligned bounding volumes for rooms and room borders.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::{ConfigError, Interval};

/// One of the three coordinate axes. `Y` is vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in index order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the component index of this axis (`X = 0`, `Y = 1`, `Z = 2`).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Returns `true` for the vertical axis.
    #[inline]
    pub fn is_vertical(self) -> bool {
        self == Axis::Y
    }
}

/// An axis-aligned box defined by its `min` and `max` corners.
///
/// The invariant `min <= max` holds componentwise for every volume built
/// through [`BoundingVolume::try_new`], [`BoundingVolume::shrink`] or
/// [`BoundingVolume::split_at`]. A volume may be flat (zero extent on some
/// axis), which is how shared borders between rooms are represented.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingVolume {
    min: Point3<f32>,
    max: Point3<f32>,
}

impl BoundingVolume {
    /// Creates a volume from its corners.
    ///
    /// Returns [`ConfigError::NonFiniteVolume`] if a coordinate is NaN or
    /// infinite and [`ConfigError::InvertedVolume`] if `min > max` on any
    /// axis.
    pub fn try_new(min: Point3<f32>, max: Point3<f32>) -> Result<Self, ConfigError> {
        let volume = Self { min, max };
        volume.check()?;
        Ok(volume)
    }

    /// Creates a volume from corners known to be ordered.
    pub(crate) fn from_ordered(min: Point3<f32>, max: Point3<f32>) -> Self {
        let volume = Self { min, max };
        debug_assert!(volume.is_valid(), "corners must be ordered");
        volume
    }

    /// Creates a volume from its corners given as arrays.
    pub fn from_arrays(min: [f32; 3], max: [f32; 3]) -> Result<Self, ConfigError> {
        Self::try_new(Point3::from(min), Point3::from(max))
    }

    /// Returns the minimum corner.
    #[inline]
    pub fn min(&self) -> Point3<f32> {
        self.min
    }

    /// Returns the maximum corner.
    #[inline]
    pub fn max(&self) -> Point3<f32> {
        self.max
    }

    /// Returns the size of the volume along each axis.
    #[inline]
    pub fn extents(&self) -> Vector3<f32> {
        self.max - self.min
    }

    /// Returns the size of the volume along one axis.
    #[inline]
    pub fn extent(&self, axis: Axis) -> f32 {
        self.max[axis.index()] - self.min[axis.index()]
    }

    /// Returns the center point of the volume.
    #[inline]
    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Returns the `[min, max]` range covered along one axis.
    #[inline]
    pub fn interval(&self, axis: Axis) -> Interval {
        Interval::new(self.min[axis.index()], self.max[axis.index()])
    }

    /// Returns `true` if every corner coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.min
            .coords
            .iter()
            .chain(self.max.coords.iter())
            .all(|coord| coord.is_finite())
    }

    /// Returns `true` if the corners are finite and `min <= max` on every
    /// axis.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && Axis::ALL.iter().all(|&axis| !self.interval(axis).is_empty())
    }

    /// Like [`BoundingVolume::is_valid`], but reports what is wrong.
    ///
    /// Deserialized volumes skip [`BoundingVolume::try_new`], so everything
    /// consuming a configured volume checks it first.
    pub fn check(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.min, self.max);
        if !self.is_finite() {
            return Err(ConfigError::NonFiniteVolume { min, max });
        }
        if !self.is_valid() {
            return Err(ConfigError::InvertedVolume { min, max });
        }
        Ok(())
    }

    /// Returns `true` if the point lies inside the closed volume.
    pub fn contains_point(&self, point: Point3<f32>) -> bool {
        Axis::ALL
            .iter()
            .all(|&axis| self.interval(axis).contains(point[axis.index()]))
    }

    /// Returns `true` if `other` lies entirely inside this volume.
    pub fn contains(&self, other: &BoundingVolume) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    /// Closed overlap test: volumes that only touch on a face, edge or
    /// corner still overlap.
    pub fn overlaps(&self, other: &BoundingVolume) -> bool {
        Axis::ALL
            .iter()
            .all(|&axis| self.interval(axis).overlaps(&other.interval(axis)))
    }

    /// Returns the shared region `[max(min1, min2), min(max1, max2)]`, or
    /// `None` if the volumes do not overlap.
    ///
    /// For rooms that only touch, the result is a flat volume lying on the
    /// touching face.
    pub fn intersection(&self, other: &BoundingVolume) -> Option<BoundingVolume> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Self {
            min: self.min.sup(&other.min),
            max: self.max.inf(&other.max),
        })
    }

    /// Moves every face inward by `by`.
    ///
    /// Returns [`ConfigError::InvertedVolume`] if the volume would turn
    /// inside out.
    pub fn shrink(&self, by: f32) -> Result<BoundingVolume, ConfigError> {
        let offset = Vector3::repeat(by);
        Self::try_new(self.min + offset, self.max - offset)
    }

    /// Moves the four side faces inward by `fraction` of the horizontal
    /// extents, leaving floor and ceiling in place.
    ///
    /// # Panics
    /// Panics in debug builds if `fraction` is outside `[0, 0.5]`.
    pub fn inset_horizontal(&self, fraction: f32) -> BoundingVolume {
        debug_assert!(
            (0.0..=0.5).contains(&fraction),
            "inset fraction must be within [0, 0.5]"
        );
        let extents = self.extents();
        let offset = Vector3::new(extents.x * fraction, 0.0, extents.z * fraction);
        Self {
            min: self.min + offset,
            max: self.max - offset,
        }
    }

    /// Splits the volume into a lower and an upper half at `coordinate`
    /// along `axis`. Both halves share the splitting plane.
    ///
    /// # Panics
    /// Panics in debug builds if `coordinate` lies outside the volume.
    pub fn split_at(&self, axis: Axis, coordinate: f32) -> (BoundingVolume, BoundingVolume) {
        debug_assert!(
            self.interval(axis).contains(coordinate),
            "split coordinate must lie inside the volume"
        );
        let mut lower = *self;
        let mut upper = *self;
        lower.max[axis.index()] = coordinate;
        upper.min[axis.index()] = coordinate;
        (lower, upper)
    }
}
