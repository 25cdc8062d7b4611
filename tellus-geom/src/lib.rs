//! Geometry kernel for the Tellus GIS viewer.
//!
//! The crate provides the in-memory model of 2D/2.5D vector shapes:
//! coordinates, envelopes (axis-aligned bounding boxes), the OGC Simple
//! Features geometry family, the spatial predicates over it and the
//! point-dimension set operations. All computations are pure and free of
//! shared mutable state, so values can be used from any number of threads
//! over disjoint inputs.
//!
//! Interchange codecs (WKT, WKB, GeoJSON) live in the `tellus-formats` crate.

mod collection;
pub use collection::GeometryCollection;

mod coordinate;
pub use coordinate::Coordinate;

mod envelope;
pub use envelope::Envelope;

mod error;
pub use error::GeometryError;

mod geometry;
pub use geometry::{Dimension, Geometry, GeometryKind};

mod line_string;
pub use line_string::{LineString, LinearRing};

mod multi_line_string;
pub use multi_line_string::MultiLineString;

mod multi_point;
pub use multi_point::MultiPoint;

mod multi_polygon;
pub use multi_polygon::MultiPolygon;

mod ops;

mod point;
pub use point::Point;

mod polygon;
pub use polygon::Polygon;

mod relate;
