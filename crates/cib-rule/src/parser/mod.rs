//! Rule expression parser
//!
//! This module turns rule strings into boolean trees over resource and
//! operation expressions.

pub mod builders;
pub mod fold;
pub mod grammar;
pub mod parse;
pub mod scanner;

pub use grammar::{build_grammar, Grammar, GrammarFailure, LeafKind, MAX_GROUP_DEPTH};
pub use parse::{parse, parse_with, ParseResult, RuleSyntaxError};
pub use scanner::SourcePosition;
