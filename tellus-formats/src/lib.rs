//! Interchange codecs for the Tellus geometry kernel.
//!
//! Three stateless converters map between `tellus-geom` values and the OGC
//! Simple Features interchange formats:
//!
//! * [`wkt`] — Well-Known Text,
//! * [`wkb`] — Well-Known Binary, also as hex text,
//! * [`geojson`] — GeoJSON per RFC 7946.
//!
//! Each parser returns a typed error describing what failed and where. The
//! `parse_or_empty` entry points wrap them for callers that prefer the
//! classic degrade-to-empty behavior of desktop GIS loaders: the error is
//! logged and an empty geometry comes back.

mod error;
pub use error::{GeoJsonError, WkbError, WktError};

pub mod geojson;
pub mod wkb;
pub mod wkt;
