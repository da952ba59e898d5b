//! Conditional visibility for guided form screens and fields.
//!
//! A [`ConditionGroup`] combines [`ConditionRule`]s with AND/OR; each rule
//! compares a (possibly nested) answer against a literal. Evaluation never
//! fails: missing conditions, empty groups, unparseable JSON and unknown
//! operators all leave the element visible.

mod diagnostics;
mod error;
mod evaluate;
mod lint;
mod serial;
mod types;
mod visibility;

pub use diagnostics::{
    CollectingDiagnostics, Diagnostic, Diagnostics, LogDiagnostics, NoopDiagnostics,
};
pub use error::FormgateError;
pub use lint::lint;
pub use types::{
    Answers, ConditionGroup, ConditionNode, ConditionRule, EvaluationReport, Evaluator,
    FieldCondition, GroupOperator, LintIssue, Operator, RuleOutcome, Value, field,
};
pub use visibility::{ConditionSource, Gated};

static DEFAULT_EVALUATOR: Evaluator = Evaluator::new();

/// Evaluate optional conditions with the default (logging) evaluator.
#[must_use]
pub fn evaluate_conditions(conditions: Option<&ConditionGroup>, answers: &Answers) -> bool {
    DEFAULT_EVALUATOR.evaluate(conditions, answers)
}

/// Evaluate conditions stored as JSON text with the default evaluator.
/// Unparseable text is logged and evaluates to `true`.
#[must_use]
pub fn evaluate_serialized(conditions: Option<&str>, answers: &Answers) -> bool {
    DEFAULT_EVALUATOR.evaluate_serialized(conditions, answers)
}

/// Parse stored conditions; `None` for empty or unparseable text (the latter is logged).
#[must_use]
pub fn parse_conditions(text: &str) -> Option<ConditionGroup> {
    DEFAULT_EVALUATOR.parse(text)
}

/// Serialize conditions for storage; `None` in, `None` out.
#[must_use]
pub fn serialize_conditions(conditions: Option<&ConditionGroup>) -> Option<String> {
    DEFAULT_EVALUATOR.serialize(conditions)
}
