use thiserror::Error;

/// Errors raised while validating or laying out a point cloud.
///
/// All of these are input-validation errors. Retrying the same call cannot succeed, the
/// caller has to fetch new samples or fix its settings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("no samples to lay out")]
    EmptyInput,

    #[error("coordinate sequences differ in length (x: {x}, y: {y}, z: {z})")]
    MismatchedLength { x: usize, y: usize, z: usize },

    #[error("sample {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
