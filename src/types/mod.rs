mod answers;
mod condition;
mod error;
mod evaluation_report;
mod evaluator;
mod operator;
mod value;

pub use answers::Answers;
pub use condition::{
    ConditionGroup, ConditionNode, ConditionRule, FieldCondition, GroupOperator, field,
};
pub use error::LintIssue;
pub use evaluation_report::{EvaluationReport, RuleOutcome};
pub use evaluator::Evaluator;
pub use operator::Operator;
pub use value::Value;
