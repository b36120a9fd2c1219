pub mod ast;
pub mod config;
pub mod export;
pub mod parser;

pub use ast::{BoolExpr, BoolOperator, OpExpr, RscExpr, RuleExpr, RuleExprKind};
pub use config::RuleParserConfig;
pub use export::{export_rule, CibElement};
pub use parser::{parse, parse_with, RuleSyntaxError};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Rule syntax error: {0}")]
    Syntax(#[from] RuleSyntaxError),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
