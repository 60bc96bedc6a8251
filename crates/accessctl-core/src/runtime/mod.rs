// crates/accessctl-core/src/runtime/mod.rs
// ============================================================================
// Module: Access Control Runtime
// Description: Registry, hierarchy, resolution, evaluation, and aggregation.
// Purpose: Answer authorization questions for signed-in principals.
// Dependencies: crate::{audit, core, interfaces, telemetry}, accessctl-logic
// ============================================================================

//! ## Overview
//! Runtime modules hold the only mutable state of the crate (the fixed role
//! registry) and the request-scoped decision logic built on top of it.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod error;
pub mod hierarchy;
pub mod permissions;
pub mod registry;
pub mod resolver;
pub mod service;
pub mod store;
pub mod usage;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::AccessControlError;
pub use hierarchy::built_in_roles;
pub use permissions::PermissionEvaluator;
pub use permissions::PermissionIndex;
pub use permissions::PermissionLeaf;
pub use permissions::eval_all;
pub use permissions::eval_any;
pub use permissions::eval_permission;
pub use permissions::eval_permission_scopes;
pub use permissions::group_scopes_by_action;
pub use registry::FixedRoleRegistry;
pub use resolver::KeywordScope;
pub use resolver::ResolutionError;
pub use resolver::ScopeResolver;
pub use service::AccessControlService;
pub use service::AccessControlSettings;
pub use service::DEFAULT_STORE_TIMEOUT;
pub use service::ResourcesMetadata;
pub use service::USAGE_METRIC_ENABLED;
pub use store::InMemoryPermissionStore;
pub use usage::InMemoryUsageStats;
