use nalgebra::Vector3;

use crate::error::LayoutError;

/// A single sampled particle position, in the units of the producing service.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RawSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RawSample {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn position(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<Vector3<f64>> for RawSample {
    fn from(value: Vector3<f64>) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

/// A validated point cloud. Every sample has finite coordinates; the set may be empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SampleSet {
    samples: Vec<RawSample>,
}

impl SampleSet {
    /// Builds a sample set from three parallel coordinate sequences.
    pub fn from_coordinates(x: &[f64], y: &[f64], z: &[f64]) -> Result<Self, LayoutError> {
        if x.len() != y.len() || y.len() != z.len() {
            return Err(LayoutError::MismatchedLength {
                x: x.len(),
                y: y.len(),
                z: z.len(),
            });
        }

        let samples = itertools::izip!(x, y, z)
            .map(|(&x, &y, &z)| RawSample::new(x, y, z))
            .collect();

        Self::new(samples)
    }

    /// Wraps already paired samples, rejecting non-finite coordinates.
    pub fn new(samples: Vec<RawSample>) -> Result<Self, LayoutError> {
        if let Some(index) = samples.iter().position(|sample| !sample.is_finite()) {
            return Err(LayoutError::NonFiniteCoordinate { index });
        }

        Ok(Self { samples })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[RawSample] {
        &self.samples
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &RawSample> {
        self.samples.iter()
    }
}

impl<'a> IntoIterator for &'a SampleSet {
    type Item = &'a RawSample;
    type IntoIter = std::slice::Iter<'a, RawSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{RawSample, SampleSet};
    use crate::error::LayoutError;

    #[test]
    fn pairs_coordinates_in_order() {
        let set = SampleSet::from_coordinates(&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]).unwrap();

        assert_eq!(
            set.samples(),
            &[RawSample::new(1.0, 3.0, 5.0), RawSample::new(2.0, 4.0, 6.0)]
        );
    }

    #[test]
    fn empty_coordinates_are_a_valid_set() {
        let set = SampleSet::from_coordinates(&[], &[], &[]).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn rejects_mismatched_lengths() {
        assert_eq!(
            SampleSet::from_coordinates(&[0.0, 1.0], &[0.0], &[0.0, 1.0]),
            Err(LayoutError::MismatchedLength { x: 2, y: 1, z: 2 })
        );
        assert_eq!(
            SampleSet::from_coordinates(&[0.0], &[0.0], &[]),
            Err(LayoutError::MismatchedLength { x: 1, y: 1, z: 0 })
        );
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        assert_eq!(
            SampleSet::from_coordinates(&[0.0, 1.0, 2.0], &[0.0, f64::NAN, 0.0], &[0.0; 3]),
            Err(LayoutError::NonFiniteCoordinate { index: 1 })
        );
    }
}
