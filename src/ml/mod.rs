/*!
 * # Machine Learning Module
 *
 * Backorder risk scoring used by the analytics endpoints. Scores written by
 * the upstream model are preferred; a coverage heuristic fills the gaps.
 */

/// Backorder probability, priority and feature ranking
pub mod backorder;

pub use backorder::{estimate_probability, feature_importance, pearson, Priority};
