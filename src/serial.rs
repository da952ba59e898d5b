//! JSON form of condition groups, as stored alongside form definitions.
//!
//! ```json
//! { "operator": "and", "rules": [ { "field": "employer.address.country", "operator": "equals", "value": "CH" } ] }
//! ```
//!
//! A rule entry that itself carries a `rules` key is a nested group.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::FormgateError;
use crate::{Answers, ConditionGroup, Evaluator};

impl ConditionGroup {
    /// Parse a condition group from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`FormgateError::Empty`] for empty input and
    /// [`FormgateError::Json`] when the text is not a valid condition group.
    pub fn from_json(text: &str) -> Result<Self, FormgateError> {
        if text.is_empty() {
            return Err(FormgateError::Empty);
        }
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize this group to compact JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`FormgateError::Json`] if encoding fails.
    pub fn to_json(&self) -> Result<String, FormgateError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Answers {
    /// Parse an answer mapping from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`FormgateError::Json`] when the text is not a JSON object.
    pub fn from_json(text: &str) -> Result<Self, FormgateError> {
        Ok(serde_json::from_str(text)?)
    }
}

impl<D: Diagnostics> Evaluator<D> {
    /// Parse stored conditions, reporting failures instead of returning them.
    ///
    /// Empty input is "no conditions" and is not reported.
    #[must_use]
    pub fn parse(&self, text: &str) -> Option<ConditionGroup> {
        match ConditionGroup::from_json(text) {
            Ok(group) => Some(group),
            Err(FormgateError::Empty) => None,
            Err(err) => {
                self.diagnostics().warn(&Diagnostic::MalformedConditions {
                    error: err.to_string(),
                });
                None
            }
        }
    }

    /// Serialize conditions for storage. `None` in, `None` out.
    #[must_use]
    pub fn serialize(&self, conditions: Option<&ConditionGroup>) -> Option<String> {
        match conditions?.to_json() {
            Ok(text) => Some(text),
            Err(err) => {
                self.diagnostics().warn(&Diagnostic::SerializationFailed {
                    error: err.to_string(),
                });
                None
            }
        }
    }
}
