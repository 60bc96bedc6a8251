// crates/accessctl-logic/tests/evaluator.rs
// ============================================================================
// Module: Evaluator Tree Tests
// Description: Tests for leaf/all/any evaluation, display, and serde forms.
// Purpose: Validate identity semantics and purity of evaluator trees.
// Dependencies: accessctl-logic, serde_json
// ============================================================================
//! ## Overview
//! Integration tests for the domain-agnostic evaluator tree.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::collections::BTreeSet;
use std::fmt;

use accessctl_logic::Evaluator;
use accessctl_logic::LeafEval;
use accessctl_logic::convenience;
use accessctl_logic::evaluator;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Test Leaf
// ============================================================================

/// Flag leaf satisfied when the flag is present in the index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
struct Flag(String);

impl Flag {
    fn new(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl LeafEval for Flag {
    type Index<'a> = BTreeSet<String>;

    fn eval_leaf(&self, index: &Self::Index<'_>) -> bool {
        index.contains(&self.0)
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "flag({})", self.0)
    }
}

fn index(flags: &[&str]) -> BTreeSet<String> {
    flags.iter().map(|flag| (*flag).to_string()).collect()
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

#[test]
fn leaf_matches_present_flag() {
    let eval = Evaluator::leaf(Flag::new("a"));
    assert!(eval.evaluate(&index(&["a"])));
    assert!(!eval.evaluate(&index(&["b"])));
}

#[test]
fn all_requires_every_child() {
    let eval = Evaluator::all(vec![Evaluator::leaf(Flag::new("a")), Evaluator::leaf(Flag::new("b"))]);
    assert!(eval.evaluate(&index(&["a", "b"])));
    assert!(!eval.evaluate(&index(&["a"])));
}

#[test]
fn any_requires_one_child() {
    let eval = Evaluator::any(vec![Evaluator::leaf(Flag::new("a")), Evaluator::leaf(Flag::new("b"))]);
    assert!(eval.evaluate(&index(&["b"])));
    assert!(!eval.evaluate(&index(&["c"])));
}

#[test]
fn empty_composites_follow_identities() {
    let empty_all: Evaluator<Flag> = Evaluator::all(Vec::new());
    let empty_any: Evaluator<Flag> = Evaluator::any(Vec::new());
    assert!(empty_all.evaluate(&index(&[])));
    assert!(!empty_any.evaluate(&index(&["a"])));
}

#[test]
fn nested_trees_evaluate_bottom_up() {
    let eval = evaluator! {
        all [
            leaf(Flag::new("a")),
            any [
                leaf(Flag::new("b")),
                leaf(Flag::new("c"))
            ]
        ]
    };
    assert!(eval.evaluate(&index(&["a", "c"])));
    assert!(!eval.evaluate(&index(&["b", "c"])));
    assert!(!eval.evaluate(&index(&["a"])));
}

#[test]
fn evaluation_is_repeatable() {
    let eval = convenience::any(vec![convenience::leaf(Flag::new("a"))]);
    let idx = index(&["a"]);
    let first = eval.evaluate(&idx);
    let second = eval.evaluate(&idx);
    assert_eq!(first, second);
    assert_eq!(idx, index(&["a"]));
}

// ============================================================================
// SECTION: Introspection
// ============================================================================

#[test]
fn leaves_are_listed_depth_first() {
    let eval = convenience::all(vec![
        convenience::leaf(Flag::new("a")),
        convenience::any(vec![convenience::leaf(Flag::new("b")), convenience::leaf(Flag::new("c"))]),
    ]);
    let names: Vec<&str> = eval.leaves().iter().map(|flag| flag.0.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn display_renders_combinators() {
    let eval = evaluator! {
        any [
            leaf(Flag::new("a")),
            all [leaf(Flag::new("b")), leaf(Flag::new("c"))]
        ]
    };
    assert_eq!(eval.to_string(), "any(flag(a), all(flag(b), flag(c)))");
}

#[test]
fn serde_uses_snake_case_tags() {
    let eval = Evaluator::all(vec![Evaluator::leaf(Flag::new("a"))]);
    let value = serde_json::to_value(&eval).unwrap();
    assert_eq!(value, serde_json::json!({"all": [{"leaf": "a"}]}));
    let parsed: Evaluator<Flag> = serde_json::from_value(value).unwrap();
    assert_eq!(parsed, eval);
}
