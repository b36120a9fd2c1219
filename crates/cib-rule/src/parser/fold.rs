//! Folding of flat `and` / `or` chains into a boolean tree
//!
//! `and` and `or` have the same priority. A maximal run of one connective
//! becomes a single n-ary node; when the connective changes, the run built so
//! far becomes the left operand of the next one:
//!
//! ```text
//! a or b and c or d   =>   OR(AND(OR(a, b), c), d)
//! ```
//!
//! This is not AND-over-OR precedence. Existing cluster configurations rely
//! on this grouping.

use crate::ast::{BoolExpr, BoolOperator, RuleExpr};

/// Fold `first (op operand)*` left to right by connective runs
pub fn fold_bool_chain(
    first: RuleExpr,
    rest: impl IntoIterator<Item = (BoolOperator, RuleExpr)>,
) -> RuleExpr {
    let mut left = first;
    let mut pending: Vec<RuleExpr> = Vec::new();
    let mut last_op: Option<BoolOperator> = None;

    for (op, operand) in rest {
        match last_op {
            Some(last) if last != op => {
                left = close_run(last, left, std::mem::take(&mut pending));
                pending.push(operand);
            }
            _ => pending.push(operand),
        }
        last_op = Some(op);
    }

    match last_op {
        Some(last) if !pending.is_empty() => close_run(last, left, pending),
        _ => left,
    }
}

fn close_run(op: BoolOperator, left: RuleExpr, pending: Vec<RuleExpr>) -> RuleExpr {
    let mut operands = Vec::with_capacity(pending.len() + 1);
    operands.push(left);
    operands.extend(pending);
    BoolExpr::new(op, operands).into()
}
