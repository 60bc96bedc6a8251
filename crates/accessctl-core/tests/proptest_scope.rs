// crates/accessctl-core/tests/proptest_scope.rs
// ============================================================================
// Module: Scope Matching Property-Based Tests
// Description: Property tests for wildcard scope matching.
// Purpose: Check wildcard and segment-boundary rules across generated scopes.
// ============================================================================

//! Property-based tests for scope matching invariants.

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

use accessctl_core::Permission;
use accessctl_core::PermissionIndex;
use accessctl_core::eval_permission;
use accessctl_core::scope;
use accessctl_core::scope_matches;
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = String> {
    "[a-z0-9-]{1,8}"
}

proptest! {
    #[test]
    fn universal_wildcard_matches_any_scope(required in "[a-z0-9:*-]{0,24}") {
        prop_assert!(scope_matches("*", &required));
    }

    #[test]
    fn exact_scope_matches_itself(required in "[a-z0-9:-]{1,24}") {
        prop_assert!(scope_matches(&required, &required));
    }

    #[test]
    fn prefix_wildcard_matches_descendants(
        prefix in prop::collection::vec(segment(), 1 .. 3),
        rest in prop::collection::vec(segment(), 1 .. 3),
    ) {
        let prefix_parts: Vec<&str> = prefix.iter().map(String::as_str).collect();
        let mut granted_parts = prefix_parts.clone();
        granted_parts.push("*");
        let mut required_parts = prefix_parts;
        required_parts.extend(rest.iter().map(String::as_str));
        prop_assert!(scope_matches(&scope(&granted_parts), &scope(&required_parts)));
    }

    #[test]
    fn prefix_wildcard_never_matches_partial_segment(
        resource in segment(),
        suffix in "[a-z0-9]{1,6}",
        id in segment(),
    ) {
        let granted = scope(&[resource.as_str(), "*"]);
        let sibling = format!("{resource}-{suffix}");
        let required = scope(&[sibling.as_str(), id.as_str()]);
        prop_assert!(!scope_matches(&granted, &required));
    }

    #[test]
    fn evaluation_is_deterministic(
        scopes in prop::collection::vec("[a-z]{1,4}(:[a-z0-9]{1,4}){0,2}(:\\*)?", 0 .. 6),
        required in "[a-z]{1,4}(:[a-z0-9]{1,4}){0,3}",
    ) {
        let permissions: Vec<Permission> =
            scopes.iter().map(|granted| Permission::new("a", granted.clone())).collect();
        let index = PermissionIndex::new(&permissions);
        let evaluator = eval_permission("a", Some(&required));
        let expected = scopes.iter().any(|granted| scope_matches(granted, &required));
        prop_assert_eq!(evaluator.evaluate(&index), expected);
        prop_assert_eq!(evaluator.evaluate(&index), expected);
    }
}
