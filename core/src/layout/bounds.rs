use nalgebra::Vector3;

/// Axis-aligned bounding box of a point cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vector3<f64>,
    pub max: Vector3<f64>,
}

impl BoundingBox {
    /// Returns `None` if there are no points to bound.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vector3<f64>>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;

        Some(points.fold(Self::new(first, first), |bounds, point| Self {
            min: bounds.min.inf(&point),
            max: bounds.max.sup(&point),
        }))
    }

    pub fn new(min: Vector3<f64>, max: Vector3<f64>) -> Self {
        debug_assert!(
            min.x <= max.x && min.y <= max.y && min.z <= max.z,
            "minimum corner must not exceed maximum corner"
        );
        Self { min, max }
    }

    /// Side lengths along x, y and z
    pub fn extent(&self) -> Vector3<f64> {
        self.max - self.min
    }

    pub fn center(&self) -> Vector3<f64> {
        self.min + self.extent() / 2.0
    }

    /// Length of the longest side. Zero when every bounded point coincides.
    pub fn max_dimension(&self) -> f64 {
        self.extent().max()
    }
}
