use serde::{Deserialize, Serialize};

use crate::envelope::Envelope;
use crate::geometry::Geometry;
use crate::point::Point;

/// An ordered collection of points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiPoint {
    points: Vec<Point>,
    srid: i32,
}

impl MultiPoint {
    /// Creates a multi point from its members.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points, srid: 0 }
    }

    /// The canonical empty multi point.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The member points.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns true if all members are empty, or there are none.
    pub fn is_empty(&self) -> bool {
        self.points.iter().all(Point::is_empty)
    }

    /// Valid iff every member is valid.
    pub fn is_valid(&self) -> bool {
        self.points.iter().all(Point::is_valid)
    }

    /// Smallest envelope covering all members.
    pub fn envelope(&self) -> Envelope {
        self.points.iter().map(Point::envelope).collect()
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

impl From<Vec<Point>> for MultiPoint {
    fn from(value: Vec<Point>) -> Self {
        Self::new(value)
    }
}

impl From<MultiPoint> for Geometry {
    fn from(value: MultiPoint) -> Self {
        Geometry::MultiPoint(value)
    }
}
