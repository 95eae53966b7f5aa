//! Similarity scoring for placement decisions.
//!
//! A candidate server is scored by the cosine similarity between the
//! service's demand vector and the server's *remaining* capacity. The
//! score rewards servers whose spare capacity has the same shape as the
//! demand, independent of magnitude, so a large server does not win
//! every placement just by being large.

use crate::types::ResourceVector;

/// Score assigned to a candidate before any has been scored. Lower than
/// any attainable cosine similarity.
pub const SCORE_SENTINEL: f64 = -1.0;

/// Cosine similarity between `demand` and `available`, in `[-1.0, 1.0]`
/// (in `[0.0, 1.0]` for non-negative vectors).
///
/// Returns `0.0` if either vector has zero length.
pub fn score(demand: &ResourceVector, available: &ResourceVector) -> f64 {
    let (Some(demand), Some(available)) = (rescaled(demand), rescaled(available)) else {
        return 0.0;
    };
    demand.dot(&available) / (demand.norm() * available.norm())
}

/// `vector` divided by its largest component, so dot products and norms
/// stay finite for any finite input. `None` for the zero vector.
fn rescaled(vector: &ResourceVector) -> Option<ResourceVector> {
    let largest = vector
        .components()
        .iter()
        .fold(0.0_f64, |max, c| max.max(c.abs()));
    if largest == 0.0 {
        return None;
    }
    Some(ResourceVector::new(
        vector.components().iter().map(|c| c / largest).collect(),
    ))
}
