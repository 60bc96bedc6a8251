// crates/accessctl-core/tests/registry.rs
// ============================================================================
// Module: Fixed Role Registry Tests
// Description: Version gating, grant monotonicity, and declaration batches.
// ============================================================================
//! ## Overview
//! Exercises the registry directly, without the service wrapper.

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

use std::sync::Arc;
use std::sync::Mutex;

use accessctl_core::AccessAuditEvent;
use accessctl_core::AccessAuditSink;
use accessctl_core::AccessControlError;
use accessctl_core::AuditDetail;
use accessctl_core::BuiltInRole;
use accessctl_core::FixedRoleRegistry;
use accessctl_core::Permission;
use accessctl_core::Role;
use accessctl_core::RoleRegistration;
use accessctl_core::ValidationError;

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<AccessAuditEvent>>,
}

impl AccessAuditSink for RecordingSink {
    fn record(&self, event: &AccessAuditEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

fn role(name: &str, version: u64, action: &str) -> Role {
    Role::new(name, version).with_permissions(vec![Permission::new(action, "*")])
}

#[test]
fn greater_version_replaces_body() {
    let registry = FixedRoleRegistry::enabled();
    registry.register(role("fixed:a", 1, "old"), &[BuiltInRole::Viewer]).unwrap();
    registry.register(role("fixed:a", 2, "new"), &[BuiltInRole::Viewer]).unwrap();

    let stored = registry.role("fixed:a").unwrap().unwrap();
    assert_eq!(stored.version, 2);
    assert_eq!(stored.permissions[0].action, "new");
}

#[test]
fn lower_or_equal_version_keeps_body_but_applies_grants() {
    let sink = Arc::new(RecordingSink::default());
    let registry = FixedRoleRegistry::new(true, sink.clone());
    registry.register(role("fixed:a", 2, "first"), &[BuiltInRole::Viewer]).unwrap();
    registry.register(role("fixed:a", 2, "tie"), &[BuiltInRole::Editor]).unwrap();
    registry.register(role("fixed:a", 1, "older"), &[BuiltInRole::Admin]).unwrap();

    let stored = registry.role("fixed:a").unwrap().unwrap();
    assert_eq!(stored.permissions[0].action, "first");
    assert_eq!(registry.grants(BuiltInRole::Editor).unwrap(), vec!["fixed:a".to_string()]);
    assert_eq!(registry.grants(BuiltInRole::Admin).unwrap(), vec!["fixed:a".to_string()]);

    let skipped = sink
        .events
        .lock()
        .unwrap()
        .iter()
        .filter(|event| matches!(event.detail, AuditDetail::RoleVersionSkipped { .. }))
        .count();
    assert_eq!(skipped, 2);
}

#[test]
fn duplicate_grants_are_not_readded() {
    let registry = FixedRoleRegistry::enabled();
    registry.register(role("fixed:a", 1, "x"), &[BuiltInRole::Viewer, BuiltInRole::Viewer]).unwrap();
    registry.register(role("fixed:a", 1, "x"), &[BuiltInRole::Viewer]).unwrap();
    assert_eq!(registry.grants(BuiltInRole::Viewer).unwrap().len(), 1);
}

#[test]
fn grant_pairs_only_grow() {
    let registry = FixedRoleRegistry::enabled();
    let steps: Vec<(Role, Vec<BuiltInRole>)> = vec![
        (role("fixed:a", 1, "x"), vec![BuiltInRole::Viewer]),
        (role("fixed:b", 1, "y"), vec![BuiltInRole::Admin, BuiltInRole::ServerAdmin]),
        (role("fixed:a", 0, "z"), vec![BuiltInRole::Editor]),
        (role("fixed:b", 3, "w"), vec![]),
    ];
    let mut previous = registry.grant_pairs().unwrap();
    for (role, grants) in steps {
        registry.register(role, &grants).unwrap();
        let current = registry.grant_pairs().unwrap();
        for pair in &previous {
            assert!(current.contains(pair), "lost grant {pair:?}");
        }
        previous = current;
    }
    assert_eq!(previous.len(), 4);
}

#[test]
fn declare_rejects_missing_prefix_without_queueing_batch() {
    let registry = FixedRoleRegistry::enabled();
    let batch = vec![
        RoleRegistration::new(role("fixed:ok", 1, "x"), &["Viewer"]),
        RoleRegistration::new(role("custom:bad", 1, "y"), &["Viewer"]),
    ];
    let err = registry.declare(&batch).unwrap_err();
    assert_eq!(
        err,
        AccessControlError::Validation(ValidationError::FixedRolePrefixMissing {
            name: "custom:bad".to_string(),
        })
    );
    assert_eq!(registry.pending_len().unwrap(), 0);
}

#[test]
fn declare_rejects_unknown_built_in_role() {
    let sink = Arc::new(RecordingSink::default());
    let registry = FixedRoleRegistry::new(true, sink.clone());
    let batch = vec![RoleRegistration::new(role("fixed:a", 1, "x"), &["Owner"])];
    let err = registry.declare(&batch).unwrap_err();
    assert!(matches!(
        err,
        AccessControlError::Validation(ValidationError::InvalidBuiltInRole { ref name }) if name == "Owner"
    ));
    let events = sink.events.lock().unwrap();
    assert!(matches!(events[0].detail, AuditDetail::DeclarationRejected { .. }));
}

#[test]
fn apply_registers_declarations_and_is_replayable() {
    let registry = FixedRoleRegistry::enabled();
    let batch = vec![RoleRegistration::new(role("fixed:a", 1, "x"), &["Viewer", "Server Admin"])];
    registry.declare(&batch).unwrap();
    assert!(registry.role("fixed:a").unwrap().is_none());

    registry.apply().unwrap();
    registry.apply().unwrap();
    assert_eq!(registry.grants(BuiltInRole::Viewer).unwrap().len(), 1);
    assert_eq!(registry.grants(BuiltInRole::ServerAdmin).unwrap().len(), 1);
}

#[test]
fn disabled_registry_ignores_everything() {
    let registry = FixedRoleRegistry::new(false, Arc::new(RecordingSink::default()));
    let batch = vec![RoleRegistration::new(role("bad", 1, "x"), &["Nobody"])];
    registry.declare(&batch).unwrap();
    registry.apply().unwrap();
    registry.register(role("fixed:a", 1, "x"), &[BuiltInRole::Viewer]).unwrap();
    assert!(registry.grant_pairs().unwrap().is_empty());
    assert!(registry.role("fixed:a").unwrap().is_none());
}

#[test]
fn fixed_permissions_follow_grants_and_skip_missing_bodies() {
    let registry = FixedRoleRegistry::enabled();
    registry.register(role("fixed:a", 1, "a:read"), &[BuiltInRole::Viewer]).unwrap();
    registry.register(role("fixed:b", 1, "b:write"), &[BuiltInRole::Editor]).unwrap();

    let viewer = registry.fixed_permissions(&[BuiltInRole::Viewer]).unwrap();
    assert_eq!(viewer, vec![Permission::new("a:read", "*")]);

    let both = registry.fixed_permissions(&[BuiltInRole::Viewer, BuiltInRole::Editor]).unwrap();
    assert_eq!(both.len(), 2);
    assert!(registry.fixed_permissions(&[BuiltInRole::Admin]).unwrap().is_empty());
}
