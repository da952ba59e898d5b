use std::cmp::Ordering;
use std::time::Instant;

use crate::types::{EvaluationReport, RuleOutcome};
use crate::{
    Answers, ConditionGroup, ConditionNode, ConditionRule, Diagnostic, Diagnostics, GroupOperator,
    Operator, Value,
};

pub(crate) fn eval_group<D: Diagnostics + ?Sized>(
    group: &ConditionGroup,
    answers: &Answers,
    diagnostics: &D,
) -> bool {
    eval_group_at(group, answers, diagnostics, 1)
}

// Every node is evaluated, so each unknown operator is reported even when the
// group's result is already decided.
fn eval_group_at<D: Diagnostics + ?Sized>(
    group: &ConditionGroup,
    answers: &Answers,
    diagnostics: &D,
    depth: usize,
) -> bool {
    if too_deep(depth, diagnostics) || group.rules.is_empty() {
        return true;
    }
    let results = group
        .rules
        .iter()
        .map(|node| eval_node(node, answers, diagnostics, depth));
    match group.operator {
        GroupOperator::And => results.fold(true, |acc, r| acc & r),
        GroupOperator::Or => results.fold(false, |acc, r| acc | r),
    }
}

fn eval_node<D: Diagnostics + ?Sized>(
    node: &ConditionNode,
    answers: &Answers,
    diagnostics: &D,
    depth: usize,
) -> bool {
    match node {
        ConditionNode::Rule(rule) => eval_rule(rule, answers, diagnostics),
        ConditionNode::Group(group) => eval_group_at(group, answers, diagnostics, depth + 1),
    }
}

/// Groups nested past [`ConditionGroup::MAX_DEPTH`] are reported and pass.
fn too_deep<D: Diagnostics + ?Sized>(depth: usize, diagnostics: &D) -> bool {
    if depth <= ConditionGroup::MAX_DEPTH {
        return false;
    }
    diagnostics.warn(&Diagnostic::NestingTooDeep {
        max_depth: ConditionGroup::MAX_DEPTH,
    });
    true
}

pub(crate) fn eval_rule<D: Diagnostics + ?Sized>(
    rule: &ConditionRule,
    answers: &Answers,
    diagnostics: &D,
) -> bool {
    let field_value = answers.get(&rule.field);
    apply_operator(&rule.operator, field_value, rule.value.as_ref()).unwrap_or_else(|| {
        diagnostics.warn(&Diagnostic::UnknownOperator {
            field: rule.field.clone(),
            operator: rule.operator.tag().to_owned(),
        });
        true
    })
}

/// Evaluate every rule, recording outcomes, without short-circuiting.
pub(crate) fn evaluate_detailed<D: Diagnostics + ?Sized>(
    group: Option<&ConditionGroup>,
    answers: &Answers,
    diagnostics: &D,
) -> EvaluationReport {
    let start = Instant::now();
    let mut outcomes = Vec::new();
    let visible = group.map_or(true, |g| {
        detailed_group(g, answers, diagnostics, &mut outcomes, 1)
    });
    EvaluationReport::new(visible, outcomes, start.elapsed())
}

fn detailed_group<D: Diagnostics + ?Sized>(
    group: &ConditionGroup,
    answers: &Answers,
    diagnostics: &D,
    outcomes: &mut Vec<RuleOutcome>,
    depth: usize,
) -> bool {
    if too_deep(depth, diagnostics) || group.rules.is_empty() {
        return true;
    }
    let results = group.rules.iter().map(|node| match node {
        ConditionNode::Rule(rule) => {
            let matched = eval_rule(rule, answers, diagnostics);
            outcomes.push(RuleOutcome::new(
                rule.field.clone(),
                rule.operator.clone(),
                answers.get(&rule.field).cloned(),
                matched,
            ));
            matched
        }
        ConditionNode::Group(nested) => {
            detailed_group(nested, answers, diagnostics, outcomes, depth + 1)
        }
    });
    match group.operator {
        GroupOperator::And => results.fold(true, |acc, r| acc & r),
        GroupOperator::Or => results.fold(false, |acc, r| acc | r),
    }
}

/// Apply one operator. `None` means the operator is not one this version knows.
fn apply_operator(op: &Operator, field: Option<&Value>, compare: Option<&Value>) -> Option<bool> {
    let result = match op {
        Operator::Equals => loose_equals(field, compare),
        Operator::NotEquals => !loose_equals(field, compare),
        Operator::Contains => contains(field, compare).unwrap_or(false),
        Operator::NotContains => contains(field, compare).map_or(true, |found| !found),
        Operator::IsEmpty => is_empty(field),
        Operator::IsNotEmpty => !is_empty(field),
        Operator::GreaterThan => ordering(field, compare) == Some(Ordering::Greater),
        Operator::LessThan => ordering(field, compare) == Some(Ordering::Less),
        Operator::GreaterThanOrEqual => {
            matches!(ordering(field, compare), Some(Ordering::Greater | Ordering::Equal))
        }
        Operator::LessThanOrEqual => {
            matches!(ordering(field, compare), Some(Ordering::Less | Ordering::Equal))
        }
        Operator::In => membership(field, compare).unwrap_or(false),
        Operator::NotIn => membership(field, compare).map_or(true, |found| !found),
        Operator::StartsWith => {
            both_strings(field, compare).is_some_and(|(s, prefix)| starts_with_ignore_case(s, prefix))
        }
        Operator::EndsWith => {
            both_strings(field, compare).is_some_and(|(s, suffix)| ends_with_ignore_case(s, suffix))
        }
        Operator::Unknown(_) => return None,
    };
    Some(result)
}

/// Strict equality where a missing value equals only another missing value.
fn strict_eq(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.strict_eq(b),
        _ => false,
    }
}

// A boolean (or "true"/"false") on the compare side makes both sides compare
// as truth values.
fn loose_equals(field: Option<&Value>, compare: Option<&Value>) -> bool {
    match compare.and_then(Value::truth_literal) {
        Some(expected) => field.and_then(Value::truth_literal) == Some(expected),
        None => strict_eq(field, compare),
    }
}

/// `None` when neither supported shape (string/string, array field) applies.
fn contains(field: Option<&Value>, compare: Option<&Value>) -> Option<bool> {
    match (field?, compare) {
        (Value::String(haystack), Some(Value::String(needle))) => {
            Some(contains_ignore_case(haystack, needle))
        }
        (Value::Array(items), _) => Some(items.iter().any(|item| strict_eq(Some(item), compare))),
        _ => None,
    }
}

/// `None` when the compare side is not an array.
fn membership(field: Option<&Value>, compare: Option<&Value>) -> Option<bool> {
    let items = compare?.as_array()?;
    Some(items.iter().any(|item| strict_eq(Some(item), field)))
}

fn is_empty(field: Option<&Value>) -> bool {
    match field {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

fn ordering(field: Option<&Value>, compare: Option<&Value>) -> Option<Ordering> {
    field?.numeric_cmp(compare?)
}

fn both_strings<'a>(
    field: Option<&'a Value>,
    compare: Option<&'a Value>,
) -> Option<(&'a str, &'a str)> {
    Some((field?.as_str()?, compare?.as_str()?))
}

// Case-insensitive matching. ASCII input is compared in place; anything else
// goes through full Unicode lowercasing.

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if haystack.is_ascii() && needle.is_ascii() {
        needle.is_empty()
            || haystack
                .as_bytes()
                .windows(needle.len())
                .any(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
    } else {
        haystack.to_lowercase().contains(&needle.to_lowercase())
    }
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    if s.is_ascii() && prefix.is_ascii() {
        s.as_bytes()
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix.as_bytes()))
    } else {
        s.to_lowercase().starts_with(&prefix.to_lowercase())
    }
}

fn ends_with_ignore_case(s: &str, suffix: &str) -> bool {
    if s.is_ascii() && suffix.is_ascii() {
        s.len() >= suffix.len()
            && s.as_bytes()[s.len() - suffix.len()..].eq_ignore_ascii_case(suffix.as_bytes())
    } else {
        s.to_lowercase().ends_with(&suffix.to_lowercase())
    }
}
