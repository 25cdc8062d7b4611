use serde::{Deserialize, Serialize};

use crate::envelope::Envelope;
use crate::geometry::Geometry;
use crate::line_string::LineString;

/// An ordered collection of line strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiLineString {
    line_strings: Vec<LineString>,
    srid: i32,
}

impl MultiLineString {
    /// Creates a multi line string from its members.
    pub fn new(line_strings: Vec<LineString>) -> Self {
        Self {
            line_strings,
            srid: 0,
        }
    }

    /// The canonical empty multi line string.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The member lines.
    pub fn line_strings(&self) -> &[LineString] {
        &self.line_strings
    }

    /// Returns true if all members are empty, or there are none.
    pub fn is_empty(&self) -> bool {
        self.line_strings.iter().all(LineString::is_empty)
    }

    /// Valid iff every member is valid.
    pub fn is_valid(&self) -> bool {
        self.line_strings.iter().all(LineString::is_valid)
    }

    /// Smallest envelope covering all members.
    pub fn envelope(&self) -> Envelope {
        self.line_strings.iter().map(LineString::envelope).collect()
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

impl From<Vec<LineString>> for MultiLineString {
    fn from(value: Vec<LineString>) -> Self {
        Self::new(value)
    }
}

impl From<MultiLineString> for Geometry {
    fn from(value: MultiLineString) -> Self {
        Geometry::MultiLineString(value)
    }
}
