use serde::{Deserialize, Serialize};

/// A single position on the plane with an optional elevation.
///
/// Coordinates are plain values: they are copied freely and never shared by
/// reference. Every parser produces them and every geometry constructor
/// consumes them.
#[derive(Debug, Copy, Clone, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Coordinate {
    /// Easting or longitude.
    pub x: f64,
    /// Northing or latitude.
    pub y: f64,
    /// Elevation. `None` for strictly planar coordinates.
    pub z: Option<f64>,
}

impl Coordinate {
    /// Creates a planar coordinate.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// Creates a coordinate with an elevation.
    pub fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// Returns true if the coordinate carries an elevation.
    pub fn has_z(&self) -> bool {
        self.z.is_some()
    }

    /// Planar equality. Elevation is ignored.
    pub fn equal_2d(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Squared planar distance to `other`.
    pub fn distance_sq(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Planar distance to `other`.
    pub fn distance(&self, other: &Self) -> f64 {
        self.distance_sq(other).sqrt()
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from(value: (f64, f64)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<(f64, f64, f64)> for Coordinate {
    fn from(value: (f64, f64, f64)) -> Self {
        Self::new_3d(value.0, value.1, value.2)
    }
}
