//! Trait similarity between agents.
//!
//! Similarity averages two scores:
//!
//! - **structural**: Jaccard index of the two trait key sets
//! - **value**: share of the shared keys whose values match
//!
//! Agents with no shared keys get a value score of 1, so two agents with
//! completely disjoint traits score 0.5 overall, not 0.

use crate::schema::{Agent, TraitValue, Traits};

/// Numeric traits match when their relative difference is below this.
pub const NUMERIC_TOLERANCE: f64 = 0.2;

/// Combined trait similarity in `[0, 1]`.
pub fn trait_similarity(a: &Agent, b: &Agent) -> f64 {
    traits_similarity(&a.traits, &b.traits)
}

/// Combined similarity of two trait maps.
pub fn traits_similarity(a: &Traits, b: &Traits) -> f64 {
    let shared: Vec<&String> = a.keys().filter(|k| b.contains_key(*k)).collect();
    let union = a.len() + b.len() - shared.len();

    let structural = if union == 0 {
        1.0
    } else {
        shared.len() as f64 / union as f64
    };

    let value = if shared.is_empty() {
        1.0
    } else {
        let matches = shared
            .iter()
            .filter(|k| values_match(&a[k.as_str()], &b[k.as_str()]))
            .count();
        matches as f64 / shared.len() as f64
    };

    (structural + value) / 2.0
}

/// Whether two trait values count as matching.
///
/// Numbers match within [`NUMERIC_TOLERANCE`] relative difference, measured
/// against the larger magnitude. Everything else matches on equality, and
/// values of different kinds never match.
pub fn values_match(a: &TraitValue, b: &TraitValue) -> bool {
    match (a, b) {
        (TraitValue::Number(x), TraitValue::Number(y)) => {
            // Equal infinities would otherwise divide NaN by infinity.
            if x == y {
                return true;
            }
            let scale = x.abs().max(y.abs());
            if scale == 0.0 {
                return true;
            }
            (x - y).abs() / scale < NUMERIC_TOLERANCE
        }
        (TraitValue::Text(x), TraitValue::Text(y)) => x == y,
        (TraitValue::Bool(x), TraitValue::Bool(y)) => x == y,
        _ => false,
    }
}
