// crates/accessctl-core/src/lib.rs
// ============================================================================
// Module: Access Control Core Library
// Description: Public API surface for the access control core.
// Purpose: Expose core types, interfaces, and runtime entry points.
// Dependencies: crate::{audit, core, interfaces, runtime, telemetry}
// ============================================================================

//! ## Overview
//! The access control core decides whether a signed-in principal may perform
//! an action on a scoped resource. Fixed roles are declared by feature modules
//! and granted to built-in organizational roles; stored per-resource grants
//! come from an external [`PermissionStore`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod core;
pub mod interfaces;
pub mod runtime;
pub mod telemetry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use audit::AccessAuditEvent;
pub use audit::AccessAuditSink;
pub use audit::AuditDetail;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use interfaces::PermissionStore;
pub use interfaces::SetResourcePermissions;
pub use interfaces::StoreError;
pub use interfaces::UsageMetricsFn;
pub use interfaces::UsageStats;
pub use interfaces::UserResourcePermissionsQuery;
pub use runtime::*;
pub use telemetry::ACCESS_LATENCY_BUCKETS_MS;
pub use telemetry::AccessMetrics;
pub use telemetry::EvaluationOutcome;
pub use telemetry::NoopMetrics;
