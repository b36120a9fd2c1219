//! Discriminant tags for rule nodes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a rule node for configuration writers
///
/// `Expression` and `DateExpression` are reserved for leaf kinds the parser
/// does not produce yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleExprKind {
    Rule,
    Expression,
    DateExpression,
    OpExpression,
    RscExpression,
}

impl RuleExprKind {
    /// Tag name
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleExprKind::Rule => "RULE",
            RuleExprKind::Expression => "EXPRESSION",
            RuleExprKind::DateExpression => "DATE_EXPRESSION",
            RuleExprKind::OpExpression => "OP_EXPRESSION",
            RuleExprKind::RscExpression => "RSC_EXPRESSION",
        }
    }

    /// Name of the configuration element written for this kind
    pub fn element_name(&self) -> &'static str {
        match self {
            RuleExprKind::Rule => "rule",
            RuleExprKind::Expression => "expression",
            RuleExprKind::DateExpression => "date_expression",
            RuleExprKind::OpExpression => "op_expression",
            RuleExprKind::RscExpression => "rsc_expression",
        }
    }
}

impl fmt::Display for RuleExprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
