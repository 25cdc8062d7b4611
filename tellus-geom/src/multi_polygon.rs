use serde::{Deserialize, Serialize};

use crate::envelope::Envelope;
use crate::geometry::Geometry;
use crate::polygon::Polygon;

/// An ordered collection of polygons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiPolygon {
    polygons: Vec<Polygon>,
    srid: i32,
}

impl MultiPolygon {
    /// Creates a multi polygon from its members.
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self { polygons, srid: 0 }
    }

    /// The canonical empty multi polygon.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The member polygons.
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Returns true if all members are empty, or there are none.
    pub fn is_empty(&self) -> bool {
        self.polygons.iter().all(Polygon::is_empty)
    }

    /// Valid iff every member is valid.
    pub fn is_valid(&self) -> bool {
        self.polygons.iter().all(Polygon::is_valid)
    }

    /// Smallest envelope covering all members.
    pub fn envelope(&self) -> Envelope {
        self.polygons.iter().map(Polygon::envelope).collect()
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

impl From<Vec<Polygon>> for MultiPolygon {
    fn from(value: Vec<Polygon>) -> Self {
        Self::new(value)
    }
}

impl From<MultiPolygon> for Geometry {
    fn from(value: MultiPolygon) -> Self {
        Geometry::MultiPolygon(value)
    }
}
