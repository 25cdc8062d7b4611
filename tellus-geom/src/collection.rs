use serde::{Deserialize, Serialize};

use crate::envelope::Envelope;
use crate::geometry::Geometry;

/// A heterogeneous collection of geometries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometryCollection {
    geometries: Vec<Geometry>,
    srid: i32,
}

impl GeometryCollection {
    /// Creates a collection from its members.
    pub fn new(geometries: Vec<Geometry>) -> Self {
        Self {
            geometries,
            srid: 0,
        }
    }

    /// The canonical empty collection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The member geometries.
    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    /// Returns true if all members are empty, or there are none.
    pub fn is_empty(&self) -> bool {
        self.geometries.iter().all(Geometry::is_empty)
    }

    /// Valid iff every member is valid.
    pub fn is_valid(&self) -> bool {
        self.geometries.iter().all(Geometry::is_valid)
    }

    /// Smallest envelope covering all members.
    pub fn envelope(&self) -> Envelope {
        self.geometries.iter().map(Geometry::envelope).collect()
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

impl From<Vec<Geometry>> for GeometryCollection {
    fn from(value: Vec<Geometry>) -> Self {
        Self::new(value)
    }
}

impl From<GeometryCollection> for Geometry {
    fn from(value: GeometryCollection) -> Self {
        Geometry::GeometryCollection(value)
    }
}
