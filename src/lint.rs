use crate::{ConditionGroup, ConditionNode, ConditionRule, LintIssue, Operator, Value};

/// Check a condition group for configuration mistakes.
///
/// The evaluator tolerates every issue reported here, usually by letting the
/// rule pass, so a saved condition with issues never hides a step it should
/// not. Linting is for the admin layer to warn editors before saving.
///
/// An empty top-level group is "no gating" and is not reported; an empty
/// nested group is.
#[must_use]
pub fn lint(group: &ConditionGroup) -> Vec<LintIssue> {
    let mut issues = Vec::new();
    for node in &group.rules {
        lint_node(node, &mut issues, 1);
    }
    issues
}

impl ConditionGroup {
    /// See [`lint()`].
    #[must_use]
    pub fn lint(&self) -> Vec<LintIssue> {
        lint(self)
    }
}

// `depth` is the nesting level of the group holding `node`.
fn lint_node(node: &ConditionNode, issues: &mut Vec<LintIssue>, depth: usize) {
    match node {
        ConditionNode::Rule(rule) => lint_rule(rule, issues),
        ConditionNode::Group(_) if depth >= ConditionGroup::MAX_DEPTH => {
            issues.push(LintIssue::TooDeep {
                max_depth: ConditionGroup::MAX_DEPTH,
            });
        }
        ConditionNode::Group(group) => {
            if group.rules.is_empty() {
                issues.push(LintIssue::EmptyGroup);
            }
            for nested in &group.rules {
                lint_node(nested, issues, depth + 1);
            }
        }
    }
}

fn lint_rule(rule: &ConditionRule, issues: &mut Vec<LintIssue>) {
    check_field_path(&rule.field, issues);

    let operator = &rule.operator;
    if let Operator::Unknown(tag) = operator {
        issues.push(LintIssue::UnknownOperator {
            field: rule.field.clone(),
            operator: tag.clone(),
        });
        return;
    }

    match &rule.value {
        None if operator.takes_value() => issues.push(LintIssue::MissingValue {
            field: rule.field.clone(),
            operator: operator.tag().to_owned(),
        }),
        Some(value) if matches!(operator, Operator::In | Operator::NotIn) => {
            if !matches!(value, Value::Array(_)) {
                issues.push(LintIssue::ExpectedArray {
                    field: rule.field.clone(),
                    operator: operator.tag().to_owned(),
                });
            }
        }
        Some(value) if operator.is_ordering() && !value.is_number() => {
            issues.push(LintIssue::ExpectedNumber {
                field: rule.field.clone(),
                operator: operator.tag().to_owned(),
            });
        }
        _ => {}
    }
}

fn check_field_path(field: &str, issues: &mut Vec<LintIssue>) {
    if field.is_empty() {
        issues.push(LintIssue::EmptyFieldPath);
    } else if field.split('.').any(str::is_empty) {
        issues.push(LintIssue::EmptyPathSegment {
            field: field.to_owned(),
        });
    }
}
