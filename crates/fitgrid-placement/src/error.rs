//! Placement error types.

use thiserror::Error;

/// Input that violates the data model and is rejected before any scoring.
///
/// An infeasible service is not an error: it is recorded as
/// [`Assignment::Unplaced`](crate::Assignment::Unplaced).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    #[error("{owner}: negative quantity {value} for resource '{resource}'")]
    NegativeQuantity {
        owner: String,
        resource: String,
        value: f64,
    },

    #[error("{owner}: non-finite quantity for resource '{resource}'")]
    NonFiniteQuantity { owner: String, resource: String },

    #[error("{owner}: expected {expected} resource dimensions, found {found}")]
    DimensionMismatch {
        owner: String,
        expected: usize,
        found: usize,
    },

    #[error("server pool has no resource dimensions")]
    NoDimensions,

    #[error("duplicate service id: {0}")]
    DuplicateService(String),

    #[error("duplicate server id: {0}")]
    DuplicateServer(String),
}
