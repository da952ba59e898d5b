use std::fmt;
use std::time::Duration;

use super::operator::Operator;
use super::value::Value;

/// How one rule fared during a detailed evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    field: String,
    operator: Operator,
    field_value: Option<Value>,
    matched: bool,
}

impl RuleOutcome {
    pub(crate) fn new(
        field: String,
        operator: Operator,
        field_value: Option<Value>,
        matched: bool,
    ) -> Self {
        Self {
            field,
            operator,
            field_value,
            matched,
        }
    }

    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    /// The answer the rule's field path resolved to, `None` when missing.
    #[must_use]
    pub fn field_value(&self) -> Option<&Value> {
        self.field_value.as_ref()
    }

    #[must_use]
    pub fn matched(&self) -> bool {
        self.matched
    }
}

impl fmt::Display for RuleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.matched { "pass" } else { "fail" };
        match &self.field_value {
            Some(v) => write!(f, "{} {} [{v}]: {mark}", self.field, self.operator),
            None => write!(f, "{} {} [missing]: {mark}", self.field, self.operator),
        }
    }
}

/// Detailed evaluation report returned by
/// [`Evaluator::evaluate_detailed()`](crate::Evaluator::evaluate_detailed).
///
/// Contains the visibility decision, the outcome of every rule in document
/// order (depth-first through nested groups), and the wall-clock duration.
#[derive(Debug, Clone)]
#[must_use]
pub struct EvaluationReport {
    visible: bool,
    outcomes: Vec<RuleOutcome>,
    duration: Duration,
}

impl EvaluationReport {
    pub(crate) fn new(visible: bool, outcomes: Vec<RuleOutcome>, duration: Duration) -> Self {
        Self {
            visible,
            outcomes,
            duration,
        }
    }

    /// The visibility decision, same as [`Evaluator::evaluate()`](crate::Evaluator::evaluate).
    #[must_use]
    pub fn visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn outcomes(&self) -> &[RuleOutcome] {
        &self.outcomes
    }

    /// Rules that did not match, in evaluation order.
    pub fn failed(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.outcomes.iter().filter(|o| !o.matched)
    }

    /// Wall-clock duration of the evaluation.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "visible: {}", self.visible)?;
        let failed: Vec<String> = self.failed().map(ToString::to_string).collect();
        write!(f, ", failed: [{}]", failed.join(", "))?;
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}
