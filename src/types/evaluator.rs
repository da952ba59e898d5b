use std::fmt;

use super::answers::Answers;
use super::condition::{ConditionGroup, ConditionRule};
use super::evaluation_report::EvaluationReport;
use crate::diagnostics::{Diagnostics, LogDiagnostics};

/// Decides whether a form screen or field is visible.
///
/// Holds nothing but the [`Diagnostics`] sink that hears about recovered
/// problems (unknown operators, unparseable conditions). Evaluation is pure
/// otherwise, so one evaluator can be shared across threads behind `Arc` or
/// kept in a `static`.
///
/// Every entry point leans towards "visible": no conditions, an empty rule
/// list, unparseable text and unknown operators all evaluate to `true`.
///
/// # Example
///
/// ```
/// use formgate::{Answers, ConditionGroup, Evaluator, field};
///
/// let conditions = ConditionGroup::any([
///     field("salary").greater_than(50_000),
///     field("hasEquity").equals(true),
/// ]);
///
/// let evaluator = Evaluator::new();
/// let answers = Answers::new().set("salary", 40_000).set("hasEquity", "true");
/// assert!(evaluator.evaluate(Some(&conditions), &answers));
/// ```
#[derive(Clone, Default)]
pub struct Evaluator<D = LogDiagnostics> {
    diagnostics: D,
}

impl Evaluator {
    /// An evaluator that reports through the `log` facade.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            diagnostics: LogDiagnostics,
        }
    }
}

impl<D: Diagnostics> Evaluator<D> {
    #[must_use]
    pub fn with_diagnostics(diagnostics: D) -> Self {
        Self { diagnostics }
    }

    #[must_use]
    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    /// Evaluate optional structured conditions. `None` means no gating.
    #[must_use]
    pub fn evaluate(&self, conditions: Option<&ConditionGroup>, answers: &Answers) -> bool {
        conditions.map_or(true, |group| self.evaluate_group(group, answers))
    }

    /// Evaluate a group. An empty group is always visible.
    #[must_use]
    pub fn evaluate_group(&self, group: &ConditionGroup, answers: &Answers) -> bool {
        crate::evaluate::eval_group(group, answers, &self.diagnostics)
    }

    /// Evaluate a single rule on its own.
    #[must_use]
    pub fn evaluate_rule(&self, rule: &ConditionRule, answers: &Answers) -> bool {
        crate::evaluate::eval_rule(rule, answers, &self.diagnostics)
    }

    /// Evaluate conditions stored as JSON text.
    ///
    /// `None` or an empty string means no gating. Text that does not parse
    /// is reported to the diagnostics sink and evaluates to `true`.
    #[must_use]
    pub fn evaluate_serialized(&self, conditions: Option<&str>, answers: &Answers) -> bool {
        match conditions {
            None => true,
            Some(text) => self
                .parse(text)
                .map_or(true, |group| self.evaluate_group(&group, answers)),
        }
    }

    /// Evaluate with per-rule diagnostics.
    ///
    /// Every rule is evaluated (no short circuit), so the report explains the
    /// decision in full. [`EvaluationReport::visible()`] always agrees with
    /// [`evaluate()`](Self::evaluate).
    pub fn evaluate_detailed(
        &self,
        conditions: Option<&ConditionGroup>,
        answers: &Answers,
    ) -> EvaluationReport {
        crate::evaluate::evaluate_detailed(conditions, answers, &self.diagnostics)
    }
}

impl<D> fmt::Debug for Evaluator<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator").finish_non_exhaustive()
    }
}
