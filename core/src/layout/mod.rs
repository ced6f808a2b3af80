mod bounds;

pub use bounds::BoundingBox;

use nalgebra::Vector3;
use serde::Deserialize;

use crate::{
    error::LayoutError,
    marker::{ColorToken, NormalizedMarker},
    sample::{RawSample, SampleSet},
};

/// How a point cloud is moved to the origin before scaling.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CenteringPolicy {
    /// Translate by the center of the bounding box, so the cloud spans
    /// `-target/2..target/2` along its longest axis.
    #[default]
    BoundingBox,
    /// Translate by the arithmetic mean of the samples. Skewed clouds end up off-center.
    Centroid,
}

/// Parameters of [`normalize`].
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    /// every raw coordinate is divided by this before anything else happens
    pub space_divisor: f64,
    /// the longest side of the output bounding box
    pub target_max_extent: f64,
    pub marker_radius: f64,
    pub centering: CenteringPolicy,
}

impl LayoutConfig {
    pub const DEFAULT_SPACE_DIVISOR: f64 = 15.0;
    pub const DEFAULT_TARGET_MAX_EXTENT: f64 = 2.0;
    pub const DEFAULT_MARKER_RADIUS: f64 = 0.02;

    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.space_divisor.is_finite() && self.space_divisor > 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "space divisor must be positive and finite, got {}",
                self.space_divisor
            )));
        }
        if !(self.target_max_extent.is_finite() && self.target_max_extent > 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "target extent must be positive and finite, got {}",
                self.target_max_extent
            )));
        }
        if !(self.marker_radius.is_finite() && self.marker_radius >= 0.0) {
            return Err(LayoutError::InvalidConfig(format!(
                "marker radius must be non-negative and finite, got {}",
                self.marker_radius
            )));
        }
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            space_divisor: Self::DEFAULT_SPACE_DIVISOR,
            target_max_extent: Self::DEFAULT_TARGET_MAX_EXTENT,
            marker_radius: Self::DEFAULT_MARKER_RADIUS,
            centering: CenteringPolicy::default(),
        }
    }
}

/// The translation and scale derived from one sample set.
///
/// All vectors are in divided space, i.e. after the raw coordinates were divided by
/// `space_divisor`.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutTransform {
    pub space_divisor: f64,
    /// Mean of the divided samples. Only used for translation under
    /// [`CenteringPolicy::Centroid`].
    pub centroid: Vector3<f64>,
    pub bounds: BoundingBox,
    /// the point moved to the origin
    pub center: Vector3<f64>,
    pub max_dimension: f64,
    pub scale_factor: f64,
}

impl LayoutTransform {
    /// Maps a raw sample to its render position.
    pub fn apply(&self, sample: &RawSample) -> Vector3<f64> {
        self.place(sample.position() / self.space_divisor)
    }

    fn place(&self, divided: Vector3<f64>) -> Vector3<f64> {
        (divided - self.center) * self.scale_factor
    }
}

/// Returns the arithmetic mean of the samples, per axis.
pub fn compute_centroid(samples: &SampleSet) -> Result<Vector3<f64>, LayoutError> {
    if samples.is_empty() {
        return Err(LayoutError::EmptyInput);
    }

    // divide before summing so large coordinates cannot overflow
    let n = samples.len() as f64;
    Ok(samples
        .iter()
        .fold(Vector3::zeros(), |mean, sample| mean + sample.position() / n))
}

/// Centers and scales a point cloud into render space.
///
/// Produces one marker per sample, in input order. Every marker shares `color` and the
/// configured radius. The output is a pure function of the input.
pub fn normalize(
    samples: &SampleSet,
    config: &LayoutConfig,
    color: ColorToken,
) -> Result<(LayoutTransform, Vec<NormalizedMarker>), LayoutError> {
    config.validate()?;
    if samples.is_empty() {
        return Err(LayoutError::EmptyInput);
    }

    let divided = map_points(samples.samples(), |sample| {
        sample.position() / config.space_divisor
    });

    let bounds =
        BoundingBox::from_points(divided.iter().copied()).ok_or(LayoutError::EmptyInput)?;
    let centroid = compute_centroid(samples)? / config.space_divisor;

    let center = match config.centering {
        CenteringPolicy::BoundingBox => bounds.center(),
        CenteringPolicy::Centroid => centroid,
    };

    let max_dimension = bounds.max_dimension();
    let scale_factor = match config.target_max_extent / max_dimension {
        scale if max_dimension > 0.0 && scale.is_finite() => scale,
        _ => {
            // coincident, or so close that scaling them up overflows
            log::debug!(
                "{} samples span only {max_dimension:e}, skipping scaling",
                samples.len()
            );
            1.0
        }
    };

    let transform = LayoutTransform {
        space_divisor: config.space_divisor,
        centroid,
        bounds,
        center,
        max_dimension,
        scale_factor,
    };

    log::debug!(
        "{} samples: center {:1.4?}, max dimension {max_dimension:1.4}, scale {scale_factor:1.4}",
        samples.len(),
        center.as_slice(),
    );

    let markers = map_points(&divided, |&point| transform.place(point))
        .into_iter()
        .map(|position| NormalizedMarker {
            position,
            radius: config.marker_radius,
            color: color.clone(),
        })
        .collect();

    Ok((transform, markers))
}

#[cfg(feature = "rayon")]
fn map_points<T, F>(items: &[T], func: F) -> Vec<Vector3<f64>>
where
    T: Sync,
    F: Fn(&T) -> Vector3<f64> + Sync + Send,
{
    use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

    items.par_iter().map(func).collect()
}

#[cfg(not(feature = "rayon"))]
fn map_points<T, F>(items: &[T], func: F) -> Vec<Vector3<f64>>
where
    F: Fn(&T) -> Vector3<f64>,
{
    items.iter().map(func).collect()
}
