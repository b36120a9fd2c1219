//! Rule grammar
//!
//! ```text
//! rule      := bool_expr END
//! bool_expr := operand (("and" | "or") operand)*
//! operand   := leaf | "(" bool_expr ")"
//! leaf      := rsc_expr | op_expr          (only the allowed ones)
//! rsc_expr  := "resource" [std]:[provider]:[type]
//! op_expr   := "op" name ["interval=" digits [letters]]
//! ```
//!
//! Keywords ignore case. Optional parts that do not match are left
//! unconsumed, so a failure is reported where the longest matching prefix
//! ends; only a required element (a resource name, a closing parenthesis)
//! reports its own position. A `Grammar` is immutable once built and parsing
//! borrows it, so one grammar can serve any number of concurrent parses.

use super::builders::{build_op_expr, build_rsc_expr};
use super::fold::fold_bool_chain;
use super::scanner::{Scanner, SourcePosition};
use crate::ast::{BoolOperator, RuleExpr};
use crate::config::RuleParserConfig;
use parking_lot::RwLock;
use std::sync::Arc;

/// Deepest allowed nesting of parenthesized groups
pub const MAX_GROUP_DEPTH: usize = 256;

const EXPECTED_END: &str = "end of text";
const EXPECTED_LPAREN: &str = "'('";
const EXPECTED_RPAREN: &str = "')'";
const EXPECTED_RSC_NAME: &str = "<resource name>";
const EXPECTED_OP_NAME: &str = "<operation name>";
const EXPECTED_SHALLOWER: &str = "at most 256 nested groups";

/// A leaf expression kind the grammar may accept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafKind {
    /// `resource standard:provider:type`
    Resource,
    /// `op name [interval=value]`
    Operation,
}

impl LeafKind {
    /// Introducing keyword
    pub fn keyword(&self) -> &'static str {
        match self {
            LeafKind::Resource => "resource",
            LeafKind::Operation => "op",
        }
    }

    fn expected(&self) -> &'static str {
        match self {
            LeafKind::Resource => "'resource'",
            LeafKind::Operation => "'op'",
        }
    }
}

/// Assembled rule grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    leaves: Vec<LeafKind>,
}

/// Build a grammar accepting the given leaf kinds
///
/// With both flags off no leaf is allowed and every non-empty rule fails.
pub fn build_grammar(allow_rsc_expr: bool, allow_op_expr: bool) -> Grammar {
    let mut leaves = Vec::with_capacity(2);
    if allow_rsc_expr {
        leaves.push(LeafKind::Resource);
    }
    if allow_op_expr {
        leaves.push(LeafKind::Operation);
    }
    tracing::debug!(allow_rsc_expr, allow_op_expr, "assembled rule grammar");
    Grammar { leaves }
}

static GRAMMARS: RwLock<[Option<Arc<Grammar>>; 4]> =
    parking_lot::const_rwlock([None, None, None, None]);

/// Get the shared grammar for a configuration, building it on first use
pub fn cached(config: &RuleParserConfig) -> Arc<Grammar> {
    let slot = config.cache_slot();
    if let Some(grammar) = &GRAMMARS.read()[slot] {
        return Arc::clone(grammar);
    }

    let mut grammars = GRAMMARS.write();
    if let Some(grammar) = &grammars[slot] {
        return Arc::clone(grammar);
    }
    let grammar = Arc::new(build_grammar(config.allow_rsc_expr, config.allow_op_expr));
    grammars[slot] = Some(Arc::clone(&grammar));
    tracing::debug!(slot, "cached rule grammar");
    grammar
}

/// Where and why the grammar stopped matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarFailure {
    /// Position where matching stopped
    pub position: SourcePosition,
    /// Text of the line containing `position`
    pub line: String,
    /// Alternatives expected at `position`, in the order they were tried
    pub expected: Vec<&'static str>,
}

impl GrammarFailure {
    /// Human readable description of what was expected
    pub fn message(&self) -> String {
        format!("Expected {}", self.expected.join(" or "))
    }
}

impl Grammar {
    /// Leaf kinds accepted by this grammar
    pub fn leaves(&self) -> &[LeafKind] {
        &self.leaves
    }

    /// Check if a leaf kind is accepted
    pub fn allows(&self, kind: LeafKind) -> bool {
        self.leaves.contains(&kind)
    }

    /// Match the whole text
    ///
    /// Returns the bare leaf when the rule has no connective. Trailing text
    /// that does not match is a failure reported where the matched prefix
    /// ends.
    pub fn parse(&self, text: &str) -> Result<RuleExpr, GrammarFailure> {
        let mut matcher = Matcher::new(self, text);
        matcher.rule().map_err(|miss| matcher.failure(miss))
    }
}

/// A required element that did not match
///
/// Misses inside optional parts (an `interval=` clause, a trailing
/// `and <operand>`) are dropped; only required elements report one.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Miss {
    offset: usize,
    expected: Vec<&'static str>,
}

impl Miss {
    fn new(offset: usize, what: &'static str) -> Self {
        Self { offset, expected: vec![what] }
    }

    /// Combine misses of alternatives: the one that got further wins
    fn or(self, other: Miss) -> Miss {
        match self.offset.cmp(&other.offset) {
            std::cmp::Ordering::Greater => self,
            std::cmp::Ordering::Less => other,
            std::cmp::Ordering::Equal => {
                let mut merged = self;
                for what in other.expected {
                    if !merged.expected.contains(&what) {
                        merged.expected.push(what);
                    }
                }
                merged
            }
        }
    }
}

type Match<T> = Result<T, Miss>;

/// One parse run over one text
struct Matcher<'g> {
    grammar: &'g Grammar,
    scanner: Scanner,
    depth: usize,
}

impl<'g> Matcher<'g> {
    fn new(grammar: &'g Grammar, text: &str) -> Self {
        Self { grammar, scanner: Scanner::new(text), depth: 0 }
    }

    fn failure(&self, miss: Miss) -> GrammarFailure {
        GrammarFailure {
            position: self.scanner.locate(miss.offset),
            line: self.scanner.line_text(miss.offset),
            expected: miss.expected,
        }
    }

    fn miss(&self, what: &'static str) -> Miss {
        Miss::new(self.scanner.position(), what)
    }

    fn rule(&mut self) -> Match<RuleExpr> {
        let expr = self.bool_expr()?;
        self.scanner.skip_whitespace();
        if self.scanner.is_at_end() {
            Ok(expr)
        } else {
            Err(self.miss(EXPECTED_END))
        }
    }

    fn bool_expr(&mut self) -> Match<RuleExpr> {
        let first = self.operand()?;
        let mut rest = Vec::new();

        loop {
            let save = self.scanner.position();
            let Some(op) = self.bool_operator() else {
                break;
            };
            match self.operand() {
                Ok(operand) => rest.push((op, operand)),
                Err(_) => {
                    self.scanner.reset(save);
                    break;
                }
            }
        }

        Ok(fold_bool_chain(first, rest))
    }

    fn bool_operator(&mut self) -> Option<BoolOperator> {
        let save = self.scanner.position();
        self.scanner.skip_whitespace();
        for op in [BoolOperator::And, BoolOperator::Or] {
            if self.scanner.eat_keyword(op.keyword()) {
                return Some(op);
            }
        }
        self.scanner.reset(save);
        None
    }

    fn operand(&mut self) -> Match<RuleExpr> {
        let start = self.scanner.position();
        self.scanner.skip_whitespace();

        let grammar = self.grammar;
        let mut missed: Option<Miss> = None;
        for &kind in grammar.leaves() {
            match self.leaf(kind) {
                Ok(leaf) => return Ok(leaf),
                Err(miss) => missed = Some(merge(missed, miss)),
            }
        }
        match self.group() {
            Ok(group) => return Ok(group),
            Err(miss) => missed = Some(merge(missed, miss)),
        }

        self.scanner.reset(start);
        Err(missed.unwrap_or_else(|| self.miss(EXPECTED_LPAREN)))
    }

    fn group(&mut self) -> Match<RuleExpr> {
        let start = self.scanner.position();
        if !self.scanner.eat_char('(') {
            return Err(self.miss(EXPECTED_LPAREN));
        }
        if self.depth >= MAX_GROUP_DEPTH {
            self.scanner.reset(start);
            return Err(Miss::new(start, EXPECTED_SHALLOWER));
        }

        self.depth += 1;
        let inner = self.bool_expr();
        self.depth -= 1;

        let inner = match inner {
            Ok(inner) => inner,
            Err(miss) => {
                self.scanner.reset(start);
                return Err(miss);
            }
        };
        self.scanner.skip_whitespace();
        if !self.scanner.eat_char(')') {
            let miss = self.miss(EXPECTED_RPAREN);
            self.scanner.reset(start);
            return Err(miss);
        }
        Ok(inner)
    }

    fn leaf(&mut self, kind: LeafKind) -> Match<RuleExpr> {
        let start = self.scanner.position();
        if !self.scanner.eat_keyword(kind.keyword()) {
            return Err(self.miss(kind.expected()));
        }
        self.scanner.skip_whitespace();

        let leaf = match kind {
            LeafKind::Resource => self.rsc_expr(),
            LeafKind::Operation => self.op_expr(),
        };
        if leaf.is_err() {
            self.scanner.reset(start);
        }
        leaf
    }

    fn rsc_expr(&mut self) -> Match<RuleExpr> {
        let start = self.scanner.position();
        self.scanner.take_while(is_rsc_part_char);
        for _ in 0..2 {
            if !self.scanner.eat_char(':') {
                return Err(Miss::new(start, EXPECTED_RSC_NAME));
            }
            self.scanner.take_while(is_rsc_part_char);
        }
        let resource_name = self.scanner.text(start, self.scanner.position());
        Ok(build_rsc_expr(&resource_name))
    }

    fn op_expr(&mut self) -> Match<RuleExpr> {
        let name = self.scanner.take_while(is_op_name_char);
        if name.is_empty() {
            return Err(self.miss(EXPECTED_OP_NAME));
        }
        let interval = self.op_interval();
        Ok(build_op_expr(&name, interval.as_deref()))
    }

    /// Optional `interval=<digits>[<letters>]`, no whitespace inside
    fn op_interval(&mut self) -> Option<String> {
        let save = self.scanner.position();
        self.scanner.skip_whitespace();
        if !self.scanner.eat_keyword("interval") || !self.scanner.eat_char('=') {
            self.scanner.reset(save);
            return None;
        }
        let mut value = self.scanner.take_while(|ch| ch.is_ascii_digit());
        if value.is_empty() {
            self.scanner.reset(save);
            return None;
        }
        value.push_str(&self.scanner.take_while(|ch| ch.is_ascii_alphabetic()));
        Some(value)
    }
}

fn merge(missed: Option<Miss>, miss: Miss) -> Miss {
    match missed {
        Some(previous) => previous.or(miss),
        None => miss,
    }
}

fn is_rsc_part_char(ch: char) -> bool {
    !ch.is_whitespace() && !matches!(ch, ':' | '(' | ')')
}

fn is_op_name_char(ch: char) -> bool {
    !ch.is_whitespace() && !matches!(ch, '(' | ')')
}
