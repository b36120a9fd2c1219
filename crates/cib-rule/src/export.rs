//! Configuration document elements for parsed rules
//!
//! Each node kind maps to exactly one element:
//!
//! | kind             | element          | attributes                          |
//! |------------------|------------------|-------------------------------------|
//! | `RULE`           | `rule`           | `id`, `boolean-op`                  |
//! | `OP_EXPRESSION`  | `op_expression`  | `id`, `name`, `interval`?           |
//! | `RSC_EXPRESSION` | `rsc_expression` | `id`, `class`?, `provider`?, `type`? |
//!
//! Ids are derived from the parent id and made unique within one export.

use crate::ast::{BoolExpr, OpExpr, RscExpr, RuleExpr, RuleExprKind};
use crate::{Error, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt::Write;

/// One element of the exported rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CibElement {
    pub kind: RuleExprKind,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<CibElement>,
}

impl CibElement {
    fn new(kind: RuleExprKind) -> Self {
        Self { kind, attributes: Vec::new(), children: Vec::new() }
    }

    fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.push((name.to_string(), value.into()));
        self
    }

    fn with_optional(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.with_attribute(name, value),
            None => self,
        }
    }

    /// Element name
    pub fn name(&self) -> &'static str {
        self.kind.element_name()
    }

    /// Value of an attribute
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Element id
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// Render as indented XML
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write_xml(&mut out, 0);
        out
    }

    fn write_xml(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{}<{}", indent, self.name());
        for (key, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", key, escape_attribute(value));
        }
        if self.children.is_empty() {
            out.push_str("/>\n");
            return;
        }
        out.push_str(">\n");
        for child in &self.children {
            child.write_xml(out, depth + 1);
        }
        let _ = writeln!(out, "{}</{}>", indent, self.name());
    }
}

/// Build the element tree for a parsed rule
///
/// The root `rule` element gets the id `<id_base>-rule`.
pub fn export_rule(rule: &BoolExpr, id_base: &str) -> Result<CibElement> {
    if id_base.is_empty() {
        return Err(Error::Export("id base must not be empty".to_string()));
    }
    let mut ids = IdAllocator::default();
    Ok(export_bool(rule, id_base, &mut ids))
}

/// Serialize a parsed rule as pretty-printed JSON
pub fn rule_to_json(rule: &BoolExpr) -> Result<String> {
    Ok(serde_json::to_string_pretty(rule)?)
}

fn export_expr(expr: &RuleExpr, parent_id: &str, ids: &mut IdAllocator) -> CibElement {
    match expr {
        RuleExpr::Bool(bool_expr) => export_bool(bool_expr, parent_id, ids),
        RuleExpr::Op(op_expr) => export_op(op_expr, parent_id, ids),
        RuleExpr::Rsc(rsc_expr) => export_rsc(rsc_expr, parent_id, ids),
    }
}

fn export_bool(expr: &BoolExpr, parent_id: &str, ids: &mut IdAllocator) -> CibElement {
    let id = ids.allocate(&format!("{}-rule", parent_id));
    let mut element = CibElement::new(RuleExprKind::Rule)
        .with_attribute("id", id.clone())
        .with_attribute("boolean-op", expr.operator.keyword());
    element.children = expr
        .operands
        .iter()
        .map(|operand| export_expr(operand, &id, ids))
        .collect();
    element
}

fn export_op(expr: &OpExpr, parent_id: &str, ids: &mut IdAllocator) -> CibElement {
    let id = ids.allocate(&format!("{}-op-{}", parent_id, expr.name));
    CibElement::new(RuleExprKind::OpExpression)
        .with_attribute("id", id)
        .with_attribute("name", expr.name.as_str())
        .with_optional("interval", expr.interval.as_deref())
}

fn export_rsc(expr: &RscExpr, parent_id: &str, ids: &mut IdAllocator) -> CibElement {
    let parts: Vec<&str> = expr.parts().collect();
    let candidate = if parts.is_empty() {
        format!("{}-rsc", parent_id)
    } else {
        format!("{}-rsc-{}", parent_id, parts.join("-"))
    };
    CibElement::new(RuleExprKind::RscExpression)
        .with_attribute("id", ids.allocate(&candidate))
        .with_optional("class", expr.standard.as_deref())
        .with_optional("provider", expr.provider.as_deref())
        .with_optional("type", expr.rsc_type.as_deref())
}

/// Hands out ids not used before in the same export
#[derive(Debug, Default)]
struct IdAllocator {
    used: HashSet<String>,
}

impl IdAllocator {
    fn allocate(&mut self, candidate: &str) -> String {
        let base = sanitize_id(candidate);
        let mut id = base.clone();
        let mut counter = 1;
        while self.used.contains(&id) {
            id = format!("{}-{}", base, counter);
            counter += 1;
        }
        self.used.insert(id.clone());
        id
    }
}

/// Make a string usable as an XML id
pub fn sanitize_id(candidate: &str) -> String {
    let mut id: String = candidate
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '-') {
                ch
            } else {
                '_'
            }
        })
        .collect();
    if !id.starts_with(|ch: char| ch.is_ascii_alphabetic() || ch == '_') {
        id.insert(0, '_');
    }
    id
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
