use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::envelope::Envelope;
use crate::geometry::Geometry;

/// A single location.
///
/// The empty point carries no coordinate. It is the canonical fallback result
/// of lenient parsing and the representation of `POINT EMPTY`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    coordinate: Option<Coordinate>,
    srid: i32,
}

impl Point {
    /// Creates a point at the given coordinate.
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate: Some(coordinate),
            srid: 0,
        }
    }

    /// Creates a planar point.
    pub fn from_xy(x: f64, y: f64) -> Self {
        Self::new(Coordinate::new(x, y))
    }

    /// Creates a point with an elevation.
    pub fn from_xyz(x: f64, y: f64, z: f64) -> Self {
        Self::new(Coordinate::new_3d(x, y, z))
    }

    /// The canonical empty point.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The point's coordinate, `None` for the empty point.
    pub fn coordinate(&self) -> Option<&Coordinate> {
        self.coordinate.as_ref()
    }

    /// Returns true if the point carries no coordinate.
    pub fn is_empty(&self) -> bool {
        self.coordinate.is_none()
    }

    /// A point is always structurally valid.
    pub fn is_valid(&self) -> bool {
        true
    }

    /// Degenerate envelope covering the point, empty for the empty point.
    pub fn envelope(&self) -> Envelope {
        match &self.coordinate {
            Some(c) => Envelope::from_point(c.x, c.y),
            None => Envelope::empty(),
        }
    }

    /// Spatial reference identifier, 0 when unset.
    pub fn srid(&self) -> i32 {
        self.srid
    }

    /// Sets the spatial reference identifier.
    pub fn set_srid(&mut self, srid: i32) {
        self.srid = srid;
    }
}

impl From<Coordinate> for Point {
    fn from(value: Coordinate) -> Self {
        Self::new(value)
    }
}

impl From<Point> for Geometry {
    fn from(value: Point) -> Self {
        Geometry::Point(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_point_has_empty_envelope() {
        assert!(Point::empty().is_empty());
        assert!(Point::empty().envelope().is_empty());
        assert!(!Point::from_xy(1.0, 2.0).is_empty());
    }

    #[test]
    fn envelope_is_degenerate() {
        let point = Point::from_xyz(3.0, 4.0, 5.0);
        assert_eq!(point.envelope(), Envelope::from_point(3.0, 4.0));
    }
}
