//! Form validation.
//!
//! Rules are declared per resource as a [`RuleSet`] and evaluated
//! synchronously against the serialized edit model before anything is sent to
//! a data collaborator. The result is a field → message mapping; an empty
//! mapping means the model may be submitted.

pub mod evaluator;
pub mod rules;

pub use evaluator::{evaluate, evaluate_model};
pub use rules::{FieldErrors, FieldRule, RuleKind, RuleSet};
