//! Abstract Syntax Tree (AST) for cluster rules
//!
//! The AST represents a parsed rule before it is written into a cluster
//! configuration document.

pub mod kind;
pub mod nodes;

pub use kind::RuleExprKind;
pub use nodes::{BoolExpr, BoolOperator, OpExpr, RscExpr, RuleExpr};
