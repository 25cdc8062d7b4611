//! Error types used by the codecs.
//!
//! Parse errors are structured: they carry the location of the failure so the
//! caller can decide whether to degrade or abort. The lenient
//! `parse_or_empty` entry points log these errors and fall back to an empty
//! geometry instead.

use thiserror::Error;

/// Errors of the Well-Known Text codec.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WktError {
    /// The text does not follow the WKT grammar.
    #[error("syntax error at offset {offset}: {message}")]
    Syntax {
        /// Byte offset into the input where the problem was found.
        offset: usize,
        /// What was expected.
        message: String,
    },

    /// An ordinate field is not a valid number.
    #[error("invalid number {text:?} at offset {offset}")]
    InvalidNumber {
        /// Byte offset into the input where the field starts.
        offset: usize,
        /// The offending field.
        text: String,
    },

    /// The geometry keyword is not one of the supported types.
    #[error("unknown geometry type {0:?}")]
    UnknownType(String),
}

/// Errors of the Well-Known Binary codec.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WkbError {
    /// The buffer ended in the middle of a field.
    #[error("unexpected end of buffer at position {position}")]
    UnexpectedEof {
        /// Byte position of the truncated field.
        position: usize,
    },

    /// The byte-order flag is neither 0x00 nor 0x01.
    #[error("invalid byte order flag {flag:#04x} at position {position}")]
    InvalidByteOrder {
        /// The offending flag value.
        flag: u8,
        /// Byte position of the flag.
        position: usize,
    },

    /// The geometry type code is outside 1-7 / 1001-1007.
    #[error("invalid geometry type code {code} at position {position}")]
    InvalidGeometryType {
        /// The offending code.
        code: u32,
        /// Byte position of the code.
        position: usize,
    },

    /// A typed collection contained an element of a different type.
    #[error("expected a {expected} element at position {position}")]
    UnexpectedElementType {
        /// Type the collection requires.
        expected: &'static str,
        /// Byte position of the element's type code.
        position: usize,
    },

    /// A declared count cannot fit in the remaining buffer.
    #[error("declared element count {count} exceeds the remaining buffer at position {position}")]
    CountOutOfBounds {
        /// The declared count.
        count: u32,
        /// Byte position of the count field.
        position: usize,
    },

    /// The hex string is malformed.
    #[error("invalid hex input: {0}")]
    InvalidHex(String),
}

/// Errors of the GeoJSON codec.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeoJsonError {
    /// The document is not valid GeoJSON.
    #[error("invalid GeoJSON document: {0}")]
    Document(String),

    /// A coordinate position has fewer than two numbers.
    #[error("coordinate position must have 2 or 3 numbers, got {0}")]
    InvalidPosition(usize),

    /// The feature carries no geometry object.
    #[error("feature does not contain a geometry")]
    MissingGeometry,

    /// GeoJSON has no representation for an empty point.
    #[error("an empty point cannot be represented in GeoJSON")]
    EmptyPoint,
}
