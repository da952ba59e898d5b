use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Something the evaluator recovered from and wants an operator to know about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A rule used an operator tag this version does not know. The rule passed.
    UnknownOperator { field: String, operator: String },
    /// Serialized conditions could not be parsed. The element stays visible.
    MalformedConditions { error: String },
    /// Conditions could not be serialized.
    SerializationFailed { error: String },
    /// Groups nested deeper than `max_depth` were not evaluated and passed.
    NestingTooDeep { max_depth: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownOperator { field, operator } => {
                write!(f, "unknown condition operator '{operator}' on field '{field}'")
            }
            Diagnostic::MalformedConditions { error } => {
                write!(f, "failed to parse conditions: {error}")
            }
            Diagnostic::SerializationFailed { error } => {
                write!(f, "failed to serialize conditions: {error}")
            }
            Diagnostic::NestingTooDeep { max_depth } => {
                write!(f, "condition groups nested deeper than {max_depth} levels were skipped")
            }
        }
    }
}

/// Sink for [`Diagnostic`]s, injected into an [`Evaluator`](crate::Evaluator).
pub trait Diagnostics: Send + Sync {
    fn warn(&self, diagnostic: &Diagnostic);
}

/// Forwards diagnostics to the `log` facade at `warn` level, target `formgate`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn warn(&self, diagnostic: &Diagnostic) {
        log::warn!(target: "formgate", "{diagnostic}");
    }
}

/// Discards every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnostics;

impl Diagnostics for NoopDiagnostics {
    fn warn(&self, _diagnostic: &Diagnostic) {}
}

/// Keeps every diagnostic in memory, in the order they were emitted.
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    recorded: Mutex<Vec<Diagnostic>>,
}

impl CollectingDiagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of everything recorded so far.
    #[must_use]
    pub fn recorded(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    /// Drain everything recorded so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Diagnostic>> {
        self.recorded.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn warn(&self, diagnostic: &Diagnostic) {
        self.lock().push(diagnostic.clone());
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for &D {
    fn warn(&self, diagnostic: &Diagnostic) {
        (**self).warn(diagnostic);
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for Arc<D> {
    fn warn(&self, diagnostic: &Diagnostic) {
        (**self).warn(diagnostic);
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for Box<D> {
    fn warn(&self, diagnostic: &Diagnostic) {
        (**self).warn(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unknown(op: &str) -> Diagnostic {
        Diagnostic::UnknownOperator {
            field: "salary".into(),
            operator: op.into(),
        }
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            unknown("betweenInclusive").to_string(),
            "unknown condition operator 'betweenInclusive' on field 'salary'"
        );
        assert_eq!(
            Diagnostic::MalformedConditions {
                error: "EOF while parsing".into()
            }
            .to_string(),
            "failed to parse conditions: EOF while parsing"
        );
    }

    #[test]
    fn collecting_records_in_order() {
        let sink = CollectingDiagnostics::new();
        sink.warn(&unknown("a"));
        sink.warn(&unknown("b"));
        assert_eq!(sink.recorded(), vec![unknown("a"), unknown("b")]);
        assert_eq!(sink.take().len(), 2);
        assert!(sink.is_empty());
    }

    #[test]
    fn forwarding_impls() {
        let sink = Arc::new(CollectingDiagnostics::new());
        let by_ref: &dyn Diagnostics = &*sink;
        by_ref.warn(&unknown("a"));
        Arc::clone(&sink).warn(&unknown("b"));
        let boxed: Box<dyn Diagnostics> = Box::new(Arc::clone(&sink));
        boxed.warn(&unknown("c"));
        assert_eq!(sink.recorded().len(), 3);
    }

    #[test]
    fn noop_and_log_do_not_panic() {
        NoopDiagnostics.warn(&unknown("a"));
        LogDiagnostics.warn(&unknown("a"));
    }

    #[test]
    fn nesting_too_deep_message() {
        let diagnostic = Diagnostic::NestingTooDeep { max_depth: 64 };
        assert_eq!(
            diagnostic.to_string(),
            "condition groups nested deeper than 64 levels were skipped"
        );
    }
}
