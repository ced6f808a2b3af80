use std::{fmt, sync::Arc};

use nalgebra::Vector3;
use serde::{Serialize, Serializer};

/// Names the colour a marker set is drawn with. The render layer resolves the name.
///
/// A token is shared by every marker of one element or orbital, cloning it only bumps a
/// reference count.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColorToken(Arc<str>);

impl ColorToken {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether two tokens point to the same allocation.
    pub fn shares_allocation(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for ColorToken {
    fn default() -> Self {
        Self::new("default")
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ColorToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// A positioned marker, ready to be instantiated by the render layer.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedMarker {
    /// position in render units
    pub position: Vector3<f64>,
    /// same for every marker of a set
    pub radius: f64,
    pub color: ColorToken,
}
