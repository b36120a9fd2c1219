//! Parse entry point for rules

use super::grammar::{self, GrammarFailure};
use crate::ast::BoolExpr;
use crate::config::RuleParserConfig;
use thiserror::Error;

/// A rule that does not match the grammar
///
/// Positions point where the matched prefix of the rule ends, or at a
/// required element that did not match.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (line {line_number}, column {column_number})")]
pub struct RuleSyntaxError {
    rule_string: String,
    rule_line: String,
    line_number: usize,
    column_number: usize,
    absolute_offset: usize,
    message: String,
}

impl RuleSyntaxError {
    fn from_failure(rule_string: &str, failure: GrammarFailure) -> Self {
        Self {
            rule_string: rule_string.to_string(),
            message: failure.message(),
            rule_line: failure.line,
            line_number: failure.position.line,
            column_number: failure.position.column,
            absolute_offset: failure.position.offset,
        }
    }

    /// The whole rule as given
    pub fn rule_string(&self) -> &str {
        &self.rule_string
    }

    /// The line of the rule containing the failure
    pub fn rule_line(&self) -> &str {
        &self.rule_line
    }

    /// Line number (1-indexed)
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Column number (1-indexed)
    pub fn column_number(&self) -> usize {
        self.column_number
    }

    /// Character offset into the whole rule (0-indexed)
    pub fn absolute_offset(&self) -> usize {
        self.absolute_offset
    }

    /// What the grammar expected at the failure
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Render the failing line, a caret under the failure and the message
    ///
    /// Tabs before the failure are kept so the caret lines up in a terminal.
    pub fn render(&self) -> String {
        let pad: String = self
            .rule_line
            .chars()
            .take(self.column_number.saturating_sub(1))
            .map(|ch| if ch == '\t' { '\t' } else { ' ' })
            .collect();
        let missing = self.column_number.saturating_sub(1) - pad.chars().count();
        format!(
            "{}\n{}{}^\n{}",
            self.rule_line,
            pad,
            " ".repeat(missing),
            self.message
        )
    }
}

pub type ParseResult<T> = Result<T, RuleSyntaxError>;

/// Parse a rule into its boolean tree
///
/// An empty rule is `BoolExpr::and(vec![])`. A rule made of a single leaf
/// is wrapped into an AND node, so the root is always a `BoolExpr`.
pub fn parse(
    rule_string: &str,
    allow_rsc_expr: bool,
    allow_op_expr: bool,
) -> ParseResult<BoolExpr> {
    parse_with(rule_string, &RuleParserConfig::new(allow_rsc_expr, allow_op_expr))
}

/// Parse a rule with the leaf kinds allowed by `config`
pub fn parse_with(rule_string: &str, config: &RuleParserConfig) -> ParseResult<BoolExpr> {
    if rule_string.is_empty() {
        return Ok(BoolExpr::empty());
    }

    let grammar = grammar::cached(config);
    let expr = grammar
        .parse(rule_string)
        .map_err(|failure| RuleSyntaxError::from_failure(rule_string, failure))?;
    let root = expr.into_root();
    tracing::trace!(rule = rule_string, operands = root.operands.len(), "parsed rule");
    Ok(root)
}
