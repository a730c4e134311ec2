//! Closed scalar intervals.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A closed range `[min, max]` along one axis.
///
/// An interval with `min > max` is empty. Empty intervals show up naturally
/// when computing split ranges for volumes that are too small to split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Creates a new interval. No ordering is enforced.
    #[inline]
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns `max - min`. Negative for empty intervals.
    #[inline]
    pub fn length(&self) -> f32 {
        self.max - self.min
    }

    /// Returns `true` if the interval contains no value. NaN ends make the
    /// interval empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.is_nan() || self.max.is_nan() || self.min > self.max
    }

    /// Returns `true` if both ends are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Returns `true` if `value` lies within the closed interval.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        self.min <= value && value <= self.max
    }

    /// Returns `true` if the two closed intervals share at least one value.
    ///
    /// Touching endpoints count as overlapping.
    #[inline]
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.min <= other.max && other.min <= self.max
    }

    /// Returns the intersection of the two intervals, which may be empty.
    pub fn intersection(&self, other: &Interval) -> Interval {
        Interval::new(self.min.max(other.min), self.max.min(other.max))
    }

    /// Draws a value uniformly from the closed interval.
    ///
    /// Returns `None` for an empty or unbounded interval. A single-point
    /// interval always yields that point.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<f32> {
        if self.is_empty() || !self.is_finite() {
            return None;
        }
        Some(rng.random_range(self.min..=self.max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn empty_when_inverted() {
        assert!(Interval::new(2.0, 1.0).is_empty());
        assert!(!Interval::new(1.0, 1.0).is_empty());
        assert!(!Interval::new(1.0, 2.0).is_empty());
    }

    #[test]
    fn touching_intervals_overlap() {
        let a = Interval::new(0.0, 4.0);
        let b = Interval::new(4.0, 8.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert_eq!(a.intersection(&b), Interval::new(4.0, 4.0));
    }

    #[test]
    fn disjoint_intervals_do_not_overlap() {
        let a = Interval::new(0.0, 3.9);
        let b = Interval::new(4.0, 8.0);
        assert!(!a.overlaps(&b));
        assert!(a.intersection(&b).is_empty());
    }

    #[test]
    fn sample_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let range = Interval::new(-2.0, 3.0);
        for _ in 0..100 {
            let value = range.sample(&mut rng).unwrap();
            assert!(range.contains(value));
        }
    }

    #[test]
    fn sample_single_point_and_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(Interval::new(4.0, 4.0).sample(&mut rng), Some(4.0));
        assert_eq!(Interval::new(5.0, 4.0).sample(&mut rng), None);
    }

    #[test]
    fn non_finite_intervals_cannot_be_sampled() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert!(Interval::new(f32::NAN, 1.0).is_empty());
        assert!(Interval::new(0.0, f32::NAN).is_empty());
        assert_eq!(Interval::new(0.0, f32::INFINITY).sample(&mut rng), None);
        assert_eq!(Interval::new(f32::NEG_INFINITY, 0.0).sample(&mut rng), None);
        assert_eq!(Interval::new(f32::NAN, f32::NAN).sample(&mut rng), None);
    }
}
