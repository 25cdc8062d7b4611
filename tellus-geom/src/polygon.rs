use serde::{Deserialize, Serialize};

use crate::envelope::Envelope;
use crate::geometry::Geometry;
use crate::line_string::LinearRing;

/// An area bounded by one exterior ring, with zero or more holes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    exterior: LinearRing,
    interiors: Vec<LinearRing>,
    srid: i32,
}

impl Polygon {
    /// Creates a polygon from its exterior ring and holes.
    pub fn new(exterior: LinearRing, interiors: Vec<LinearRing>) -> Self {
        Self {
            exterior,
            interiors,
            srid: 0,
        }
    }

    /// The canonical empty polygon.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The outer boundary.
    pub fn exterior(&self) -> &LinearRing {
        &self.exterior
    }

    /// The holes.
    pub fn interiors(&self) -> &[LinearRing] {
        &self.interiors
    }

    /// Iterates over the exterior ring followed by the holes.
    pub fn rings(&self) -> impl Iterator<Item = &LinearRing> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }

    /// A polygon is empty iff its exterior ring is empty.
    pub fn is_empty(&self) -> bool {
        self.exterior.is_empty()
    }

    /// A non-empty polygon must have a valid exterior ring and valid,
    /// non-empty holes.
    pub fn is_valid(&self) -> bool {
        if self.is_empty() {
            return true;
        }

        self.exterior.is_valid() && self.interiors.iter().all(|r| !r.is_empty() && r.is_valid())
    }

    /// Smallest envelope covering the polygon.
    ///
    /// Holes lie inside the exterior ring, so only the exterior contributes.
    pub fn envelope(&self) -> Envelope {
        self.exterior.envelope()
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

impl From<LinearRing> for Polygon {
    fn from(value: LinearRing) -> Self {
        Self::new(value, vec![])
    }
}

impl From<Polygon> for Geometry {
    fn from(value: Polygon) -> Self {
        Geometry::Polygon(value)
    }
}

#[cfg(test)]
mod tests {
    use crate::coordinate::Coordinate;

    use super::*;

    fn unit_square() -> LinearRing {
        LinearRing::new(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 0.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(0.0, 0.0),
        ])
    }

    #[test]
    fn emptiness_follows_exterior() {
        assert!(Polygon::empty().is_empty());
        assert!(Polygon::empty().is_valid());
        assert!(!Polygon::from(unit_square()).is_empty());
    }

    #[test]
    fn validity_requires_valid_rings() {
        let open_ring = LinearRing::new(vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 0.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(0.0, 1.0),
        ]);
        assert!(!Polygon::from(open_ring).is_valid());

        let with_empty_hole = Polygon::new(unit_square(), vec![LinearRing::empty()]);
        assert!(!with_empty_hole.is_valid());
    }

    #[test]
    fn envelope_comes_from_exterior() {
        let polygon = Polygon::from(unit_square());
        assert_eq!(polygon.envelope(), Envelope::new(0.0, 1.0, 0.0, 1.0));
    }
}
