use thiserror::Error;

/// A configuration problem found by [`lint`](crate::lint).
///
/// None of these stop evaluation: the evaluator tolerates all of them and
/// leans towards "visible". They exist so the admin layer can warn editors
/// before saving a condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LintIssue {
    #[error("unknown operator '{operator}' on field '{field}'; the rule always passes")]
    UnknownOperator { field: String, operator: String },

    #[error("operator '{operator}' on field '{field}' has no value to compare against")]
    MissingValue { field: String, operator: String },

    #[error("rule has an empty field path")]
    EmptyFieldPath,

    #[error("field path '{field}' contains an empty segment")]
    EmptyPathSegment { field: String },

    #[error("operator '{operator}' on field '{field}' expects an array value")]
    ExpectedArray { field: String, operator: String },

    #[error("operator '{operator}' on field '{field}' expects a numeric value")]
    ExpectedNumber { field: String, operator: String },

    #[error("nested group has no rules; it always passes")]
    EmptyGroup,

    #[error("groups are nested deeper than {max_depth} levels; the deeper ones always pass")]
    TooDeep { max_depth: usize },
}
