//! Leaf builders
//!
//! Turn the text matched for one leaf kind into an AST node. The grammar has
//! already checked the shape of the text; nothing here validates names
//! against resource agent metadata.

use crate::ast::{OpExpr, RscExpr, RuleExpr};

/// Build a resource expression from `standard:provider:type`
///
/// Empty parts become `None`. Parts past the second colon are kept in the
/// type, which the grammar never produces.
pub fn build_rsc_expr(resource_name: &str) -> RuleExpr {
    let mut parts = resource_name.splitn(3, ':').map(non_empty);
    let standard = parts.next().flatten();
    let provider = parts.next().flatten();
    let rsc_type = parts.next().flatten();
    RscExpr::new(standard, provider, rsc_type).into()
}

/// Build an operation expression from its name and interval value
pub fn build_op_expr(name: &str, interval: Option<&str>) -> RuleExpr {
    OpExpr::new(name, interval.and_then(non_empty)).into()
}

fn non_empty(part: &str) -> Option<String> {
    if part.is_empty() {
        None
    } else {
        Some(part.to_string())
    }
}
