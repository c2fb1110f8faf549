//! Error Types
//!
//! The core is pure computation, so every error here is local and
//! non-retryable. Degenerate marching-cubes edges and rotator bound
//! violations are not errors at all and never show up in these enums.

use thiserror::Error;

use crate::mesh::AttributeSlot;

/// Invalid inputs detected while constructing a field, schema or lattice.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstructionError {
    /// A noise axis was declared with no grid cells.
    #[error("noise axis {axis} has zero grid size")]
    EmptyNoiseAxis { axis: usize },
    /// A noise axis period is negative, NaN or infinite.
    #[error("noise axis {axis} has invalid period {period}")]
    InvalidPeriod { axis: usize, period: f32 },
    /// The noise amplitude is NaN or infinite.
    #[error("noise amplitude must be finite, got {0}")]
    InvalidAmplitude(f32),
    /// The config listed a different number of axes than the field needs.
    #[error("expected {expected} noise axes, got {got}")]
    AxisCount { expected: usize, got: usize },
    /// A vertex schema with no attributes.
    #[error("vertex schema declares no attributes")]
    EmptySchema,
    /// An attribute with a component count of zero.
    #[error("attribute {slot:?} declares zero components")]
    ZeroComponents { slot: AttributeSlot },
    /// The same attribute slot appears twice in a schema.
    #[error("attribute {slot:?} declared twice")]
    DuplicateAttribute { slot: AttributeSlot },
    /// Lattice step must be strictly positive and finite.
    #[error("lattice step must be positive and finite, got {0}")]
    InvalidStep(f32),
    /// Lattice max corner lies below the min corner on some axis.
    #[error("lattice max {max:?} lies below min {min:?}")]
    InvertedLattice { min: [f32; 3], max: [f32; 3] },
}

/// Errors raised while filling or finalizing a geometry buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// A vertex append supplied the wrong number of floats.
    #[error("vertex has {got} values but the schema stride is {expected}")]
    SchemaMismatch { expected: usize, got: usize },
    /// An index points past the last appended vertex.
    #[error("index {index} references a vertex past the end ({vertex_count} vertices)")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}

/// Errors raised while loading generator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be decoded.
    #[error("invalid generator config: {0}")]
    Json(#[from] serde_json::Error),
    /// The config decoded but describes an invalid field or lattice.
    #[error(transparent)]
    Construction(#[from] ConstructionError),
}
