// crates/accessctl-core/src/interfaces/mod.rs
// ============================================================================
// Module: Access Control Interfaces
// Description: Collaborator contracts consumed by the access control core.
// Purpose: Define the stored-permission and usage-stats seams.
// Dependencies: crate::core, async-trait, thiserror
// ============================================================================

//! ## Overview
//! Interfaces define how the core integrates with persistence and usage
//! reporting without embedding backend details. The stored-permission schema
//! belongs to the implementation; the core only sees [`Permission`] values.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::BuiltInRole;
use crate::core::OrgId;
use crate::core::Permission;
use crate::core::TeamId;
use crate::core::UserId;

// ============================================================================
// SECTION: Permission Store
// ============================================================================

/// Lookup of stored permissions for one user on one resource type.
///
/// # Invariants
/// - Only permissions scoped to `resource_ids` of `resource` are returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResourcePermissionsQuery {
    /// Built-in roles held by the user.
    pub built_in_roles: Vec<BuiltInRole>,
    /// Resource type, e.g. `dashboards`.
    pub resource: String,
    /// Resource identifiers of interest.
    pub resource_ids: Vec<String>,
}

/// Command granting actions on a single resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetResourcePermissions {
    /// Actions to grant; replaces any earlier actions for the same target.
    pub actions: Vec<String>,
    /// Resource type.
    pub resource: String,
    /// Resource identifier.
    pub resource_id: String,
}

/// Permission store errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Store reported an error.
    #[error("permission store error: {0}")]
    Store(String),
    /// Store did not answer within the configured bound.
    #[error("permission store timed out after {timeout_ms} ms")]
    Timeout {
        /// Bound that elapsed, in milliseconds.
        timeout_ms: u64,
    },
}

/// Externally persisted per-resource permissions.
///
/// Implementations own their transactional semantics; the core never retries.
#[async_trait]
pub trait PermissionStore: Send + Sync {
    /// Returns the stored permissions of a user, including team and built-in
    /// role grants, restricted to the queried resources.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    async fn get_user_resource_permissions(
        &self,
        org_id: OrgId,
        user_id: UserId,
        query: &UserResourcePermissionsQuery,
    ) -> Result<Vec<Permission>, StoreError>;

    /// Sets the permissions a user holds on one resource.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the write fails.
    async fn set_user_resource_permissions(
        &self,
        org_id: OrgId,
        user_id: UserId,
        command: &SetResourcePermissions,
    ) -> Result<Vec<Permission>, StoreError>;

    /// Sets the permissions a team holds on one resource.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the write fails.
    async fn set_team_resource_permissions(
        &self,
        org_id: OrgId,
        team_id: TeamId,
        command: &SetResourcePermissions,
    ) -> Result<Vec<Permission>, StoreError>;

    /// Sets the permissions a built-in role holds on one resource.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the write fails.
    async fn set_builtin_resource_permissions(
        &self,
        org_id: OrgId,
        built_in_role: BuiltInRole,
        command: &SetResourcePermissions,
    ) -> Result<Vec<Permission>, StoreError>;
}

// ============================================================================
// SECTION: Usage Stats
// ============================================================================

/// Provider invoked on demand to contribute usage metrics.
pub type UsageMetricsFn = Box<dyn Fn() -> BTreeMap<String, i64> + Send + Sync>;

/// Usage reporting collaborator.
pub trait UsageStats: Send + Sync {
    /// Registers a metrics provider evaluated at report time.
    fn register_metrics_fn(&self, provider: UsageMetricsFn);
}
