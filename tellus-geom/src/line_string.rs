use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::envelope::Envelope;
use crate::geometry::Geometry;

/// An open or closed sequence of straight line segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineString {
    coordinates: Vec<Coordinate>,
    srid: i32,
}

impl LineString {
    /// Creates a line string from its vertices.
    pub fn new(coordinates: Vec<Coordinate>) -> Self {
        Self {
            coordinates,
            srid: 0,
        }
    }

    /// The canonical empty line string.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The vertices of the line.
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    /// Returns true if the line has no vertices.
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// A non-empty line string must have at least two vertices.
    pub fn is_valid(&self) -> bool {
        self.coordinates.is_empty() || self.coordinates.len() >= 2
    }

    /// Returns true if the first and last vertices coincide.
    pub fn is_closed(&self) -> bool {
        match (self.coordinates.first(), self.coordinates.last()) {
            (Some(first), Some(last)) => first.equal_2d(last),
            _ => false,
        }
    }

    /// Planar length of the line.
    pub fn length(&self) -> f64 {
        self.coordinates
            .windows(2)
            .map(|w| w[0].distance(&w[1]))
            .sum()
    }

    /// Smallest envelope covering all vertices.
    pub fn envelope(&self) -> Envelope {
        Envelope::from_coordinates(&self.coordinates)
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

impl From<Vec<Coordinate>> for LineString {
    fn from(value: Vec<Coordinate>) -> Self {
        Self::new(value)
    }
}

impl From<LineString> for Geometry {
    fn from(value: LineString) -> Self {
        Geometry::LineString(value)
    }
}

/// A closed line string used as a polygon boundary.
///
/// A valid non-empty ring has at least four coordinates with the first one
/// repeated at the end. Construction does not enforce this: parsers may
/// produce degenerate rings, and [`LinearRing::is_valid`] reports them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearRing {
    coordinates: Vec<Coordinate>,
    srid: i32,
}

impl LinearRing {
    /// Creates a ring from its vertices.
    pub fn new(coordinates: Vec<Coordinate>) -> Self {
        Self {
            coordinates,
            srid: 0,
        }
    }

    /// The canonical empty ring.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The vertices of the ring.
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    /// Returns true if the ring has no vertices.
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// A non-empty ring must be closed and have at least four coordinates.
    pub fn is_valid(&self) -> bool {
        if self.coordinates.is_empty() {
            return true;
        }

        self.coordinates.len() >= 4
            && match (self.coordinates.first(), self.coordinates.last()) {
                (Some(first), Some(last)) => first.equal_2d(last),
                _ => false,
            }
    }

    /// Smallest envelope covering all vertices.
    pub fn envelope(&self) -> Envelope {
        Envelope::from_coordinates(&self.coordinates)
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

impl From<Vec<Coordinate>> for LinearRing {
    fn from(value: Vec<Coordinate>) -> Self {
        Self::new(value)
    }
}

impl From<LinearRing> for LineString {
    fn from(value: LinearRing) -> Self {
        LineString {
            coordinates: value.coordinates,
            srid: value.srid,
        }
    }
}

impl From<LinearRing> for Geometry {
    fn from(value: LinearRing) -> Self {
        Geometry::LinearRing(value)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn validity() {
        assert!(LineString::empty().is_valid());
        assert!(!LineString::new(vec![Coordinate::new(0.0, 0.0)]).is_valid());
        assert!(
            LineString::new(vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)]).is_valid()
        );

        let closed = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 0.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(0.0, 0.0),
        ];
        assert!(LinearRing::empty().is_valid());
        assert!(LinearRing::new(closed.clone()).is_valid());
        assert!(!LinearRing::new(closed[..3].to_vec()).is_valid());
    }

    #[test]
    fn length_sums_segments() {
        let line = LineString::new(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(3.0, 4.0),
            Coordinate::new(3.0, 14.0),
        ]);
        assert_abs_diff_eq!(line.length(), 15.0);
    }

    #[test]
    fn envelope_covers_vertices() {
        let line = LineString::new(vec![
            Coordinate::new(-1.0, 2.0),
            Coordinate::new(5.0, -3.0),
        ]);
        assert_eq!(line.envelope(), Envelope::new(-1.0, 5.0, -3.0, 2.0));
        assert!(LineString::empty().envelope().is_empty());
    }
}
