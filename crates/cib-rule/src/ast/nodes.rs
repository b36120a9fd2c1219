//! AST node definitions

use super::kind::RuleExprKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A node of a parsed rule
///
/// New leaf kinds (attribute and date expressions) are added as new variants;
/// the boolean layer only ever sees `RuleExpr` operands.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum RuleExpr {
    /// Boolean connective over sub-expressions
    #[serde(rename = "RULE")]
    Bool(BoolExpr),
    /// Operation selector
    #[serde(rename = "OP_EXPRESSION")]
    Op(OpExpr),
    /// Resource agent selector
    #[serde(rename = "RSC_EXPRESSION")]
    Rsc(RscExpr),
}

impl RuleExpr {
    /// Discriminant tag of this node
    pub fn kind(&self) -> RuleExprKind {
        match self {
            RuleExpr::Bool(_) => RuleExprKind::Rule,
            RuleExpr::Op(_) => RuleExprKind::OpExpression,
            RuleExpr::Rsc(_) => RuleExprKind::RscExpression,
        }
    }

    /// Get the boolean node, if this is one
    pub fn as_bool(&self) -> Option<&BoolExpr> {
        match self {
            RuleExpr::Bool(expr) => Some(expr),
            _ => None,
        }
    }

    /// Wrap into a root `BoolExpr`
    ///
    /// A bare leaf becomes the single operand of an AND node.
    pub fn into_root(self) -> BoolExpr {
        match self {
            RuleExpr::Bool(expr) => expr,
            leaf => BoolExpr::and(vec![leaf]),
        }
    }
}

impl From<BoolExpr> for RuleExpr {
    fn from(expr: BoolExpr) -> Self {
        RuleExpr::Bool(expr)
    }
}

impl From<OpExpr> for RuleExpr {
    fn from(expr: OpExpr) -> Self {
        RuleExpr::Op(expr)
    }
}

impl From<RscExpr> for RuleExpr {
    fn from(expr: RscExpr) -> Self {
        RuleExpr::Rsc(expr)
    }
}

impl fmt::Display for RuleExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleExpr::Bool(expr) => write!(f, "{}", expr),
            RuleExpr::Op(expr) => write!(f, "{}", expr),
            RuleExpr::Rsc(expr) => write!(f, "{}", expr),
        }
    }
}

/// Boolean connective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BoolOperator {
    And,
    Or,
}

impl BoolOperator {
    /// Keyword as written in rules and in the `boolean-op` attribute
    pub fn keyword(&self) -> &'static str {
        match self {
            BoolOperator::And => "and",
            BoolOperator::Or => "or",
        }
    }
}

impl fmt::Display for BoolOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoolOperator::And => write!(f, "AND"),
            BoolOperator::Or => write!(f, "OR"),
        }
    }
}

/// Boolean node joining its operands with one connective
///
/// Operands keep the left-to-right order in which they appear in the rule.
/// `BoolExpr::and(vec![])` is the empty rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoolExpr {
    pub operator: BoolOperator,
    pub operands: Vec<RuleExpr>,
}

impl BoolExpr {
    /// Create a new boolean node
    pub fn new(operator: BoolOperator, operands: Vec<RuleExpr>) -> Self {
        Self { operator, operands }
    }

    /// Create an AND node
    pub fn and(operands: Vec<RuleExpr>) -> Self {
        Self::new(BoolOperator::And, operands)
    }

    /// Create an OR node
    pub fn or(operands: Vec<RuleExpr>) -> Self {
        Self::new(BoolOperator::Or, operands)
    }

    /// The canonical empty rule
    pub fn empty() -> Self {
        Self::and(Vec::new())
    }

    /// Check if this node has no operands
    pub fn is_empty(&self) -> bool {
        self.operands.is_empty()
    }
}

impl fmt::Display for BoolExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, operand) in self.operands.iter().enumerate() {
            if i > 0 {
                write!(f, " {} ", self.operator.keyword())?;
            }
            write!(f, "{}", operand)?;
        }
        write!(f, ")")
    }
}

/// Operation selector: `op <name> [interval=<value>]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpExpr {
    pub name: String,
    pub interval: Option<String>,
}

impl OpExpr {
    /// Create a new operation expression
    pub fn new(name: impl Into<String>, interval: Option<String>) -> Self {
        Self { name: name.into(), interval }
    }
}

impl fmt::Display for OpExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "op {}", self.name)?;
        if let Some(interval) = &self.interval {
            write!(f, " interval={}", interval)?;
        }
        Ok(())
    }
}

/// Resource agent selector: `resource [standard]:[provider]:[type]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RscExpr {
    pub standard: Option<String>,
    pub provider: Option<String>,
    #[serde(rename = "type")]
    pub rsc_type: Option<String>,
}

impl RscExpr {
    /// Create a new resource expression
    pub fn new(
        standard: Option<String>,
        provider: Option<String>,
        rsc_type: Option<String>,
    ) -> Self {
        Self { standard, provider, rsc_type }
    }

    /// Present parts in `standard`, `provider`, `type` order
    pub fn parts(&self) -> impl Iterator<Item = &str> {
        [&self.standard, &self.provider, &self.rsc_type]
            .into_iter()
            .filter_map(|part| part.as_deref())
    }
}

impl fmt::Display for RscExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "resource {}:{}:{}",
            self.standard.as_deref().unwrap_or(""),
            self.provider.as_deref().unwrap_or(""),
            self.rsc_type.as_deref().unwrap_or("")
        )
    }
}
