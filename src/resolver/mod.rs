//! Severity resolution: model probabilities → selected class → override rules → final label.

mod engine;
pub mod rules;
mod strategy;

pub use engine::{PredictionResult, SeverityResolver};
pub use rules::{OverrideRule, Verdict, CANONICAL_RULES};
pub use strategy::SelectionStrategy;
