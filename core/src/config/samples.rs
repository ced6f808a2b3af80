use serde::Deserialize;

use crate::{error::LayoutError, sample::SampleSet};

/// A point cloud as returned by the sampling service: three parallel coordinate arrays,
/// one entry per sampled particle.
#[derive(Deserialize)]
pub struct ConfigSampleSet {
    x_coords: Vec<f64>,
    y_coords: Vec<f64>,
    z_coords: Vec<f64>,
}

impl TryFrom<ConfigSampleSet> for SampleSet {
    type Error = LayoutError;

    fn try_from(value: ConfigSampleSet) -> Result<Self, Self::Error> {
        SampleSet::from_coordinates(&value.x_coords, &value.y_coords, &value.z_coords)
    }
}
