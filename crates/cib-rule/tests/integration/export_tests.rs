//! Writing parsed rules as configuration elements

use cib_rule::ast::RuleExprKind;
use cib_rule::{export_rule, parse, CibElement};

fn walk<'a>(element: &'a CibElement, out: &mut Vec<&'a CibElement>) {
    out.push(element);
    for child in &element.children {
        walk(child, out);
    }
}

#[test]
fn test_each_kind_maps_to_one_element() {
    let rule = parse(
        "resource ocf:pacemaker:Dummy or (op monitor interval=10s and op start)",
        true,
        true,
    )
    .unwrap();
    let root = export_rule(&rule, "op-defaults-meta").unwrap();

    let mut elements = Vec::new();
    walk(&root, &mut elements);
    assert_eq!(elements.len(), 5);
    for element in elements {
        let expected = match element.kind {
            RuleExprKind::Rule => "rule",
            RuleExprKind::OpExpression => "op_expression",
            RuleExprKind::RscExpression => "rsc_expression",
            other => panic!("unexpected kind {}", other),
        };
        assert_eq!(element.name(), expected);
        assert!(element.id().is_some());
    }
}

#[test]
fn test_ids_are_unique() {
    let rule = parse("op start or op start or (op start and op start)", false, true).unwrap();
    let root = export_rule(&rule, "dup").unwrap();

    let mut elements = Vec::new();
    walk(&root, &mut elements);
    let mut ids: Vec<_> = elements.iter().filter_map(|e| e.id()).collect();
    let total = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), total);
}

#[test]
fn test_xml_for_resource_defaults() {
    let rule = parse("resource ocf:pacemaker:", true, false).unwrap();
    let xml = export_rule(&rule, "rsc_defaults-meta_attributes").unwrap().to_xml();
    assert_eq!(
        xml,
        concat!(
            "<rule id=\"rsc_defaults-meta_attributes-rule\" boolean-op=\"and\">\n",
            "  <rsc_expression id=\"rsc_defaults-meta_attributes-rule-rsc-ocf-pacemaker\" ",
            "class=\"ocf\" provider=\"pacemaker\"/>\n",
            "</rule>\n",
        )
    );
}
