//! Parsing rules as the resource and operation defaults commands do

use cib_rule::parser::{build_grammar, LeafKind, MAX_GROUP_DEPTH};
use cib_rule::{
    parse, parse_with, BoolExpr, BoolOperator, OpExpr, RscExpr, RuleExpr, RuleExprKind,
    RuleParserConfig,
};

fn op(name: &str, interval: Option<&str>) -> RuleExpr {
    OpExpr::new(name, interval.map(String::from)).into()
}

fn rsc(standard: Option<&str>, provider: Option<&str>, rsc_type: Option<&str>) -> RuleExpr {
    RscExpr::new(
        standard.map(String::from),
        provider.map(String::from),
        rsc_type.map(String::from),
    )
    .into()
}

fn kinds(expr: &RuleExpr, out: &mut Vec<RuleExprKind>) {
    out.push(expr.kind());
    if let Some(bool_expr) = expr.as_bool() {
        for operand in &bool_expr.operands {
            kinds(operand, out);
        }
    }
}

#[test]
fn test_empty_rule_for_every_config() {
    for config in [
        RuleParserConfig::default(),
        RuleParserConfig::resource_defaults(),
        RuleParserConfig::operation_defaults(),
    ] {
        assert_eq!(parse_with("", &config).unwrap(), BoolExpr::empty());
    }
}

#[test]
fn test_resource_defaults_rule() {
    let rule = parse(
        "resource ocf:pacemaker:Dummy or resource systemd::",
        true,
        false,
    )
    .unwrap();
    assert_eq!(
        rule,
        BoolExpr::or(vec![
            rsc(Some("ocf"), Some("pacemaker"), Some("Dummy")),
            rsc(Some("systemd"), None, None),
        ])
    );
}

#[test]
fn test_operation_defaults_rule() {
    let rule = parse(
        "resource ::Dummy and (op monitor interval=30s or op start)",
        true,
        true,
    )
    .unwrap();
    assert_eq!(
        rule,
        BoolExpr::and(vec![
            rsc(None, None, Some("Dummy")),
            BoolExpr::or(vec![op("monitor", Some("30s")), op("start", None)]).into(),
        ])
    );
}

#[test]
fn test_mixed_chain_folds_by_runs() {
    let rule = parse("op a and op b or op c or op d and op e", false, true).unwrap();
    let expected = BoolExpr::and(vec![
        BoolExpr::or(vec![
            BoolExpr::and(vec![op("a", None), op("b", None)]).into(),
            op("c", None),
            op("d", None),
        ])
        .into(),
        op("e", None),
    ]);
    assert_eq!(rule, expected);
}

#[test]
fn test_root_is_always_bool() {
    let rule = parse("(op a)", false, true).unwrap();
    assert_eq!(rule, BoolExpr::and(vec![op("a", None)]));
    assert_eq!(rule.operator, BoolOperator::And);
}

#[test]
fn test_multiline_rule() {
    let rule = parse("op monitor interval=10s\nor\nop stop", false, true).unwrap();
    assert_eq!(
        rule,
        BoolExpr::or(vec![op("monitor", Some("10s")), op("stop", None)])
    );
}

#[test]
fn test_error_on_second_line() {
    let text = "op monitor\nand op start interval=x";
    let err = parse(text, false, true).unwrap_err();
    assert_eq!(err.rule_string(), text);
    assert_eq!(err.rule_line(), "and op start interval=x");
    assert_eq!(err.line_number(), 2);
    assert_eq!(err.column_number(), 14);
    assert_eq!(err.absolute_offset(), 24);
    assert_eq!(err.message(), "Expected end of text");
}

#[test]
fn test_incomplete_continuation_is_trailing_text() {
    let text = "op a\nand resource x";
    let err = parse(text, true, true).unwrap_err();
    assert_eq!(err.rule_line(), "and resource x");
    assert_eq!(err.line_number(), 2);
    assert_eq!(err.column_number(), 1);
    assert_eq!(err.absolute_offset(), 5);
    assert_eq!(err.message(), "Expected end of text");
}

#[test]
fn test_group_nesting_limit_is_reported() {
    let depth = MAX_GROUP_DEPTH + 1;
    let text = format!("{}op a{}", "(".repeat(depth), ")".repeat(depth));
    let err = parse(&text, false, true).unwrap_err();
    assert_eq!(err.absolute_offset(), depth - 1);
    assert!(err.message().contains("256 nested groups"));
}

#[test]
fn test_trailing_text_is_rejected() {
    let err = parse("op start op stop", false, true).unwrap_err();
    assert_eq!(err.absolute_offset(), 9);
    assert!(err.message().contains("end of text"));
}

#[test]
fn test_unmatched_close_paren() {
    let err = parse("op start)", false, true).unwrap_err();
    assert_eq!(err.absolute_offset(), 8);
    assert!(err.message().contains("end of text"));
}

#[test]
fn test_flags_restrict_leaves() {
    assert!(parse("resource ocf:pacemaker:Dummy", false, false).is_err());
    assert!(parse("resource ocf:pacemaker:Dummy", false, true).is_err());
    assert!(parse("op start", true, false).is_err());
    assert!(parse("op start and resource ::x", false, true).is_err());
    assert!(parse("op start and resource ::x", true, true).is_ok());
}

#[test]
fn test_resource_without_colons_points_past_keyword() {
    let err = parse("resource abc", true, false).unwrap_err();
    assert_eq!(err.column_number(), "resource ".len() + 1);
}

#[test]
fn test_parse_twice_gives_equal_trees() {
    let text = "op a or (resource ocf:heartbeat:IPaddr2 and op monitor interval=5min) or op b";
    assert_eq!(parse(text, true, true).unwrap(), parse(text, true, true).unwrap());
}

#[test]
fn test_every_node_has_one_kind() {
    let rule = parse("resource ::x and (op a or op b)", true, true).unwrap();
    let mut seen = Vec::new();
    kinds(&RuleExpr::from(rule), &mut seen);
    assert_eq!(
        seen,
        vec![
            RuleExprKind::Rule,
            RuleExprKind::RscExpression,
            RuleExprKind::Rule,
            RuleExprKind::OpExpression,
            RuleExprKind::OpExpression,
        ]
    );
}

#[test]
fn test_grammar_can_be_built_directly() {
    let grammar = build_grammar(true, false);
    assert!(grammar.allows(LeafKind::Resource));
    assert!(!grammar.allows(LeafKind::Operation));
    assert!(grammar.parse("resource ::x").is_ok());
}
