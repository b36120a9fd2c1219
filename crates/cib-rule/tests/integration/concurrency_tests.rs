//! Parsing from several threads at once

use cib_rule::{parse, BoolExpr, OpExpr, RuleExpr};
use std::sync::Arc;
use std::thread;

#[test]
fn test_concurrent_parses_do_not_interfere() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let allow_rsc = i % 2 == 0;
                let text = format!("op check{} interval={}s or op stop", i, i);
                for _ in 0..50 {
                    let rule = parse(&text, allow_rsc, true).unwrap();
                    let expected = BoolExpr::or(vec![
                        OpExpr::new(format!("check{}", i), Some(format!("{}s", i))).into(),
                        RuleExpr::from(OpExpr::new("stop", None)),
                    ]);
                    assert_eq!(rule, expected);
                    assert!(parse(&text, allow_rsc, false).is_err());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_trees_are_shareable() {
    let rule = Arc::new(parse("resource ::Dummy and op start", true, true).unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let rule = Arc::clone(&rule);
            thread::spawn(move || rule.operands.len())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 2);
    }
}
