use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::operator::Operator;
use super::value::Value;

/// A single comparison between an answer and a literal.
///
/// `value` distinguishes absent (`None`) from an explicit JSON `null`
/// (`Some(Value::Null)`); the two compare differently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionRule {
    pub field: String,
    pub operator: Operator,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub value: Option<Value>,
}

/// How a group combines the results of its rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupOperator {
    #[default]
    And,
    Or,
}

/// A list of rules combined with a single boolean operator.
///
/// An empty group is always satisfied, whatever its operator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionGroup {
    #[serde(default)]
    pub operator: GroupOperator,
    pub rules: Vec<ConditionNode>,
}

/// An entry of a [`ConditionGroup`]: a rule, or a nested group.
///
/// In JSON an entry is a group exactly when it carries a `rules` key.
///
/// Evaluation, display and linting stop descending at
/// [`ConditionGroup::MAX_DEPTH`]; deeper groups pass. Cloning, comparing,
/// serializing and dropping still recurse, so trees built in code should stay
/// within the limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionNode {
    Group(ConditionGroup),
    Rule(ConditionRule),
}

// Only called when the key is present, so `null` becomes `Some(Value::Null)`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl ConditionRule {
    #[must_use]
    pub fn new(field: &str, operator: impl Into<Operator>, value: Option<Value>) -> Self {
        Self {
            field: field.to_owned(),
            operator: operator.into(),
            value,
        }
    }
}

impl ConditionGroup {
    /// Deepest nesting level that is evaluated; the top-level group is level 1.
    pub const MAX_DEPTH: usize = 64;

    #[must_use]
    pub fn new(operator: GroupOperator, rules: Vec<ConditionNode>) -> Self {
        Self { operator, rules }
    }

    /// A group satisfied when every entry is.
    #[must_use]
    pub fn all<I, N>(rules: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<ConditionNode>,
    {
        Self::new(GroupOperator::And, rules.into_iter().map(Into::into).collect())
    }

    /// A group satisfied when at least one entry is.
    #[must_use]
    pub fn any<I, N>(rules: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<ConditionNode>,
    {
        Self::new(GroupOperator::Or, rules.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// All rules in the group, depth-first in document order.
    pub fn iter_rules(&self) -> impl Iterator<Item = &ConditionRule> {
        let mut stack: Vec<&ConditionNode> = self.rules.iter().rev().collect();
        std::iter::from_fn(move || {
            while let Some(node) = stack.pop() {
                match node {
                    ConditionNode::Rule(rule) => return Some(rule),
                    ConditionNode::Group(group) => stack.extend(group.rules.iter().rev()),
                }
            }
            None
        })
    }
}

impl From<ConditionRule> for ConditionNode {
    fn from(rule: ConditionRule) -> Self {
        ConditionNode::Rule(rule)
    }
}

impl From<ConditionGroup> for ConditionNode {
    fn from(group: ConditionGroup) -> Self {
        ConditionNode::Group(group)
    }
}

impl fmt::Display for GroupOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupOperator::And => write!(f, "AND"),
            GroupOperator::Or => write!(f, "OR"),
        }
    }
}

impl fmt::Display for ConditionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "({} {} {value})", self.field, self.operator),
            None => write!(f, "({} {})", self.field, self.operator),
        }
    }
}

impl fmt::Display for ConditionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionNode::Rule(rule) => write!(f, "{rule}"),
            ConditionNode::Group(group) => group.fmt_at(f, 1),
        }
    }
}

impl fmt::Display for ConditionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_at(f, 1)
    }
}

impl ConditionGroup {
    fn fmt_at(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        if depth > Self::MAX_DEPTH {
            return write!(f, "(..)");
        }
        if self.rules.is_empty() {
            return write!(f, "(always)");
        }
        write!(f, "(")?;
        for (i, node) in self.rules.iter().enumerate() {
            if i > 0 {
                write!(f, " {} ", self.operator)?;
            }
            match node {
                ConditionNode::Rule(rule) => write!(f, "{rule}")?,
                ConditionNode::Group(group) => group.fmt_at(f, depth + 1)?,
            }
        }
        write!(f, ")")
    }
}

/// Intermediate builder for rules on one field.
/// Created by [`field()`]; each method produces a [`ConditionRule`].
#[derive(Debug, Clone)]
pub struct FieldCondition {
    path: String,
}

impl FieldCondition {
    fn with(self, operator: Operator, value: Option<Value>) -> ConditionRule {
        ConditionRule {
            field: self.path,
            operator,
            value,
        }
    }

    #[must_use]
    pub fn equals(self, value: impl Into<Value>) -> ConditionRule {
        self.with(Operator::Equals, Some(value.into()))
    }

    #[must_use]
    pub fn not_equals(self, value: impl Into<Value>) -> ConditionRule {
        self.with(Operator::NotEquals, Some(value.into()))
    }

    #[must_use]
    pub fn contains(self, value: impl Into<Value>) -> ConditionRule {
        self.with(Operator::Contains, Some(value.into()))
    }

    #[must_use]
    pub fn not_contains(self, value: impl Into<Value>) -> ConditionRule {
        self.with(Operator::NotContains, Some(value.into()))
    }

    #[must_use]
    pub fn empty(self) -> ConditionRule {
        self.with(Operator::IsEmpty, None)
    }

    #[must_use]
    pub fn not_empty(self) -> ConditionRule {
        self.with(Operator::IsNotEmpty, None)
    }

    #[must_use]
    pub fn greater_than(self, value: impl Into<Value>) -> ConditionRule {
        self.with(Operator::GreaterThan, Some(value.into()))
    }

    #[must_use]
    pub fn less_than(self, value: impl Into<Value>) -> ConditionRule {
        self.with(Operator::LessThan, Some(value.into()))
    }

    #[must_use]
    pub fn greater_than_or_equal(self, value: impl Into<Value>) -> ConditionRule {
        self.with(Operator::GreaterThanOrEqual, Some(value.into()))
    }

    #[must_use]
    pub fn less_than_or_equal(self, value: impl Into<Value>) -> ConditionRule {
        self.with(Operator::LessThanOrEqual, Some(value.into()))
    }

    /// `in`: the answer is one of `values`.
    #[must_use]
    pub fn one_of<V: Into<Value>>(self, values: Vec<V>) -> ConditionRule {
        self.with(Operator::In, Some(Value::from(values)))
    }

    /// `notIn`: the answer is none of `values`.
    #[must_use]
    pub fn none_of<V: Into<Value>>(self, values: Vec<V>) -> ConditionRule {
        self.with(Operator::NotIn, Some(Value::from(values)))
    }

    #[must_use]
    pub fn starts_with(self, value: impl Into<Value>) -> ConditionRule {
        self.with(Operator::StartsWith, Some(value.into()))
    }

    #[must_use]
    pub fn ends_with(self, value: impl Into<Value>) -> ConditionRule {
        self.with(Operator::EndsWith, Some(value.into()))
    }
}

#[must_use]
pub fn field(path: &str) -> FieldCondition {
    FieldCondition {
        path: path.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_equals_str() {
        let rule = field("employmentType").equals("full-time");
        assert_eq!(
            rule,
            ConditionRule {
                field: "employmentType".to_owned(),
                operator: Operator::Equals,
                value: Some(Value::from("full-time")),
            }
        );
    }

    #[test]
    fn emptiness_rules_have_no_value() {
        assert_eq!(field("x").empty().value, None);
        assert_eq!(field("x").not_empty().operator, Operator::IsNotEmpty);
    }

    #[test]
    fn one_of_builds_array() {
        let rule = field("country").one_of(vec!["CH", "DE"]);
        assert_eq!(rule.operator, Operator::In);
        assert_eq!(rule.value, Some(Value::from(vec!["CH", "DE"])));
    }

    #[test]
    fn all_and_any_set_operator() {
        let all = ConditionGroup::all([field("a").equals(1_i64)]);
        assert_eq!(all.operator, GroupOperator::And);
        let any = ConditionGroup::any([field("a").equals(1_i64)]);
        assert_eq!(any.operator, GroupOperator::Or);
        assert_eq!(any.rules.len(), 1);
    }

    #[test]
    fn nested_group_display() {
        let group = ConditionGroup::any([
            ConditionNode::from(ConditionGroup::all([
                field("a").equals(1_i64),
                field("b").empty(),
            ])),
            ConditionNode::from(field("c").greater_than(2_i64)),
        ]);
        assert_eq!(
            group.to_string(),
            "(((a equals 1) AND (b isEmpty)) OR (c greaterThan 2))"
        );
        assert_eq!(ConditionGroup::default().to_string(), "(always)");
    }

    #[test]
    fn iter_rules_is_depth_first() {
        let group = ConditionGroup::all([
            ConditionNode::from(field("a").empty()),
            ConditionNode::from(ConditionGroup::any([field("b").empty(), field("c").empty()])),
            ConditionNode::from(field("d").empty()),
        ]);
        let fields: Vec<&str> = group.iter_rules().map(|r| r.field.as_str()).collect();
        assert_eq!(fields, ["a", "b", "c", "d"]);
    }

    #[test]
    fn missing_value_differs_from_null() {
        let absent: ConditionRule =
            serde_json::from_str(r#"{"field": "x", "operator": "isEmpty"}"#).unwrap();
        assert_eq!(absent.value, None);

        let null: ConditionRule =
            serde_json::from_str(r#"{"field": "x", "operator": "equals", "value": null}"#).unwrap();
        assert_eq!(null.value, Some(Value::Null));
    }

    #[test]
    fn absent_value_is_not_serialized() {
        let json = serde_json::to_string(&field("x").empty()).unwrap();
        assert_eq!(json, r#"{"field":"x","operator":"isEmpty"}"#);
    }

    #[test]
    fn group_operator_defaults_to_and() {
        let group: ConditionGroup = serde_json::from_str(r#"{"rules": []}"#).unwrap();
        assert_eq!(group.operator, GroupOperator::And);
    }

    #[test]
    fn unknown_group_operator_is_rejected() {
        let result = serde_json::from_str::<ConditionGroup>(r#"{"operator": "xor", "rules": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn entry_with_rules_key_is_a_group() {
        let group: ConditionGroup = serde_json::from_str(
            r#"{"operator": "or", "rules": [
                {"operator": "and", "rules": [{"field": "a", "operator": "equals", "value": 1}]},
                {"field": "b", "operator": "isEmpty"}
            ]}"#,
        )
        .unwrap();
        assert!(matches!(group.rules[0], ConditionNode::Group(_)));
        assert!(matches!(group.rules[1], ConditionNode::Rule(_)));
    }

    #[test]
    fn display_stops_at_max_depth() {
        let mut group = ConditionGroup::all([field("x").empty()]);
        for _ in 0..ConditionGroup::MAX_DEPTH {
            group = ConditionGroup::any([group]);
        }
        let text = group.to_string();
        let tail = format!("(..){}", ")".repeat(ConditionGroup::MAX_DEPTH));
        assert!(text.ends_with(&tail));
        assert!(!text.contains("isEmpty"));
    }
}
