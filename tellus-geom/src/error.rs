//! Error type used by the crate.

use thiserror::Error;

use crate::geometry::GeometryKind;

/// Error enum.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeometryError {
    /// The operation has no implementation for this pair of variants.
    #[error("{operation} is not supported between {left} and {right} geometries")]
    UnsupportedOperation {
        /// Name of the operation.
        operation: &'static str,
        /// Variant of the left operand.
        left: GeometryKind,
        /// Variant of the right operand.
        right: GeometryKind,
    },

    /// The operation has no implementation for this variant.
    #[error("{operation} is not supported for {kind} geometries")]
    Unsupported {
        /// Name of the operation.
        operation: &'static str,
        /// Variant of the operand.
        kind: GeometryKind,
    },
}
