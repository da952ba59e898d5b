use thiserror::Error;

/// Errors from the strict (non fail-open) parsing and serialization APIs,
/// such as [`ConditionGroup::from_json()`](crate::ConditionGroup::from_json).
///
/// The lenient entry points never return this; they report through
/// [`Diagnostics`](crate::Diagnostics) and fall back to "visible".
#[derive(Debug, Error)]
pub enum FormgateError {
    #[error("condition text is empty")]
    Empty,

    #[error("invalid condition JSON: {0}")]
    Json(#[from] serde_json::Error),
}
