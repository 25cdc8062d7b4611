use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::collection::GeometryCollection;
use crate::envelope::Envelope;
use crate::line_string::{LineString, LinearRing};
use crate::multi_line_string::MultiLineString;
use crate::multi_point::MultiPoint;
use crate::multi_polygon::MultiPolygon;
use crate::point::Point;
use crate::polygon::Polygon;

/// Topological dimension of a geometry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dimension {
    /// Dimension 0: points.
    Point,
    /// Dimension 1: lines and rings.
    Line,
    /// Dimension 2: areas.
    Area,
}

impl Dimension {
    /// Numeric value of the dimension (0, 1 or 2).
    pub fn value(&self) -> u8 {
        match self {
            Dimension::Point => 0,
            Dimension::Line => 1,
            Dimension::Area => 2,
        }
    }
}

/// Discriminant of the geometry family, one per OGC Simple Features type.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    /// A single location.
    Point,
    /// A sequence of line segments.
    LineString,
    /// A closed line used as a polygon boundary.
    LinearRing,
    /// An area with optional holes.
    Polygon,
    /// A collection of points.
    MultiPoint,
    /// A collection of line strings.
    MultiLineString,
    /// A collection of polygons.
    MultiPolygon,
    /// A heterogeneous collection.
    GeometryCollection,
}

impl Display for GeometryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GeometryKind::Point => "Point",
            GeometryKind::LineString => "LineString",
            GeometryKind::LinearRing => "LinearRing",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::MultiPolygon => "MultiPolygon",
            GeometryKind::GeometryCollection => "GeometryCollection",
        };
        write!(f, "{name}")
    }
}

/// A vector shape, one variant per OGC Simple Features type.
///
/// The family is a closed sum type: every operation over it matches
/// exhaustively, so adding a variant is a compile-time event for all the
/// predicates, set operations and codecs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// A single location.
    Point(Point),
    /// A sequence of line segments.
    LineString(LineString),
    /// A closed line used as a polygon boundary.
    LinearRing(LinearRing),
    /// An area with optional holes.
    Polygon(Polygon),
    /// A collection of points.
    MultiPoint(MultiPoint),
    /// A collection of line strings.
    MultiLineString(MultiLineString),
    /// A collection of polygons.
    MultiPolygon(MultiPolygon),
    /// A heterogeneous collection.
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    /// The variant discriminant.
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::LinearRing(_) => GeometryKind::LinearRing,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::MultiPoint(_) => GeometryKind::MultiPoint,
            Geometry::MultiLineString(_) => GeometryKind::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryKind::GeometryCollection,
        }
    }

    /// The canonical empty instance of the given variant.
    pub fn empty_of(kind: GeometryKind) -> Geometry {
        match kind {
            GeometryKind::Point => Point::empty().into(),
            GeometryKind::LineString => LineString::empty().into(),
            GeometryKind::LinearRing => LinearRing::empty().into(),
            GeometryKind::Polygon => Polygon::empty().into(),
            GeometryKind::MultiPoint => MultiPoint::empty().into(),
            GeometryKind::MultiLineString => MultiLineString::empty().into(),
            GeometryKind::MultiPolygon => MultiPolygon::empty().into(),
            GeometryKind::GeometryCollection => GeometryCollection::empty().into(),
        }
    }

    /// Topological dimension.
    ///
    /// A collection reports the highest dimension of its members; an empty
    /// collection reports [`Dimension::Point`].
    pub fn dimension(&self) -> Dimension {
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => Dimension::Point,
            Geometry::LineString(_) | Geometry::LinearRing(_) | Geometry::MultiLineString(_) => {
                Dimension::Line
            }
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => Dimension::Area,
            Geometry::GeometryCollection(c) => c
                .geometries()
                .iter()
                .map(Geometry::dimension)
                .max()
                .unwrap_or(Dimension::Point),
        }
    }

    /// Returns true if the geometry carries no coordinates.
    ///
    /// Emptiness is always derived from the coordinate content, never stored.
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(g) => g.is_empty(),
            Geometry::LineString(g) => g.is_empty(),
            Geometry::LinearRing(g) => g.is_empty(),
            Geometry::Polygon(g) => g.is_empty(),
            Geometry::MultiPoint(g) => g.is_empty(),
            Geometry::MultiLineString(g) => g.is_empty(),
            Geometry::MultiPolygon(g) => g.is_empty(),
            Geometry::GeometryCollection(g) => g.is_empty(),
        }
    }

    /// Checks the structural invariants of the variant.
    pub fn is_valid(&self) -> bool {
        match self {
            Geometry::Point(g) => g.is_valid(),
            Geometry::LineString(g) => g.is_valid(),
            Geometry::LinearRing(g) => g.is_valid(),
            Geometry::Polygon(g) => g.is_valid(),
            Geometry::MultiPoint(g) => g.is_valid(),
            Geometry::MultiLineString(g) => g.is_valid(),
            Geometry::MultiPolygon(g) => g.is_valid(),
            Geometry::GeometryCollection(g) => g.is_valid(),
        }
    }

    /// Smallest envelope covering the geometry, computed from the coordinates.
    pub fn envelope(&self) -> Envelope {
        match self {
            Geometry::Point(g) => g.envelope(),
            Geometry::LineString(g) => g.envelope(),
            Geometry::LinearRing(g) => g.envelope(),
            Geometry::Polygon(g) => g.envelope(),
            Geometry::MultiPoint(g) => g.envelope(),
            Geometry::MultiLineString(g) => g.envelope(),
            Geometry::MultiPolygon(g) => g.envelope(),
            Geometry::GeometryCollection(g) => g.envelope(),
        }
    }

    /// Spatial reference identifier, 0 when unset.
    pub fn srid(&self) -> i32 {
        match self {
            Geometry::Point(g) => g.srid(),
            Geometry::LineString(g) => g.srid(),
            Geometry::LinearRing(g) => g.srid(),
            Geometry::Polygon(g) => g.srid(),
            Geometry::MultiPoint(g) => g.srid(),
            Geometry::MultiLineString(g) => g.srid(),
            Geometry::MultiPolygon(g) => g.srid(),
            Geometry::GeometryCollection(g) => g.srid(),
        }
    }

    /// Sets the spatial reference identifier.
    pub fn set_srid(&mut self, srid: i32) {
        match self {
            Geometry::Point(g) => g.set_srid(srid),
            Geometry::LineString(g) => g.set_srid(srid),
            Geometry::LinearRing(g) => g.set_srid(srid),
            Geometry::Polygon(g) => g.set_srid(srid),
            Geometry::MultiPoint(g) => g.set_srid(srid),
            Geometry::MultiLineString(g) => g.set_srid(srid),
            Geometry::MultiPolygon(g) => g.set_srid(srid),
            Geometry::GeometryCollection(g) => g.set_srid(srid),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::coordinate::Coordinate;

    use super::*;

    #[test]
    fn collection_dimension_is_max_of_members() {
        let collection = GeometryCollection::new(vec![
            Point::from_xy(0.0, 0.0).into(),
            LineString::new(vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0)]).into(),
        ]);
        assert_eq!(Geometry::from(collection).dimension(), Dimension::Line);

        let empty = Geometry::from(GeometryCollection::empty());
        assert_eq!(empty.dimension(), Dimension::Point);
        assert!(empty.is_empty());
    }

    #[test]
    fn empty_of_matches_kind() {
        for kind in [
            GeometryKind::Point,
            GeometryKind::LineString,
            GeometryKind::LinearRing,
            GeometryKind::Polygon,
            GeometryKind::MultiPoint,
            GeometryKind::MultiLineString,
            GeometryKind::MultiPolygon,
            GeometryKind::GeometryCollection,
        ] {
            let geometry = Geometry::empty_of(kind);
            assert_eq!(geometry.kind(), kind);
            assert!(geometry.is_empty());
            assert!(geometry.envelope().is_empty());
        }
    }
}
