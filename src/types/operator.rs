use std::fmt;

use serde::{Deserialize, Serialize};

/// Comparison applied by a [`ConditionRule`](super::ConditionRule).
///
/// Serialized as its camelCase tag (`"equals"`, `"greaterThanOrEqual"`, ...).
/// Tags this version does not know deserialize to [`Operator::Unknown`] so
/// conditions written by newer versions still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    IsEmpty,
    IsNotEmpty,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    In,
    NotIn,
    StartsWith,
    EndsWith,
    Unknown(String),
}

impl Operator {
    /// Every operator this version evaluates.
    pub const KNOWN: [Operator; 14] = [
        Operator::Equals,
        Operator::NotEquals,
        Operator::Contains,
        Operator::NotContains,
        Operator::IsEmpty,
        Operator::IsNotEmpty,
        Operator::GreaterThan,
        Operator::LessThan,
        Operator::GreaterThanOrEqual,
        Operator::LessThanOrEqual,
        Operator::In,
        Operator::NotIn,
        Operator::StartsWith,
        Operator::EndsWith,
    ];

    /// Look up an operator by its serialized tag. Matching is exact.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "equals" => Operator::Equals,
            "notEquals" => Operator::NotEquals,
            "contains" => Operator::Contains,
            "notContains" => Operator::NotContains,
            "isEmpty" => Operator::IsEmpty,
            "isNotEmpty" => Operator::IsNotEmpty,
            "greaterThan" => Operator::GreaterThan,
            "lessThan" => Operator::LessThan,
            "greaterThanOrEqual" => Operator::GreaterThanOrEqual,
            "lessThanOrEqual" => Operator::LessThanOrEqual,
            "in" => Operator::In,
            "notIn" => Operator::NotIn,
            "startsWith" => Operator::StartsWith,
            "endsWith" => Operator::EndsWith,
            other => Operator::Unknown(other.to_owned()),
        }
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Operator::Equals => "equals",
            Operator::NotEquals => "notEquals",
            Operator::Contains => "contains",
            Operator::NotContains => "notContains",
            Operator::IsEmpty => "isEmpty",
            Operator::IsNotEmpty => "isNotEmpty",
            Operator::GreaterThan => "greaterThan",
            Operator::LessThan => "lessThan",
            Operator::GreaterThanOrEqual => "greaterThanOrEqual",
            Operator::LessThanOrEqual => "lessThanOrEqual",
            Operator::In => "in",
            Operator::NotIn => "notIn",
            Operator::StartsWith => "startsWith",
            Operator::EndsWith => "endsWith",
            Operator::Unknown(tag) => tag,
        }
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Operator::Unknown(_))
    }

    /// Whether a rule using this operator needs a `value` to compare against.
    /// Only the emptiness checks and unknown operators do without one.
    #[must_use]
    pub fn takes_value(&self) -> bool {
        !matches!(
            self,
            Operator::IsEmpty | Operator::IsNotEmpty | Operator::Unknown(_)
        )
    }

    /// The four numeric ordering operators.
    #[must_use]
    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            Operator::GreaterThan
                | Operator::LessThan
                | Operator::GreaterThanOrEqual
                | Operator::LessThanOrEqual
        )
    }
}

impl From<&str> for Operator {
    fn from(tag: &str) -> Self {
        Operator::from_tag(tag)
    }
}

impl From<String> for Operator {
    fn from(tag: String) -> Self {
        match Operator::from_tag(&tag) {
            Operator::Unknown(_) => Operator::Unknown(tag),
            known => known,
        }
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        match op {
            Operator::Unknown(tag) => tag,
            known => known.tag().to_owned(),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
