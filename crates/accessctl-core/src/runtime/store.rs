// crates/accessctl-core/src/runtime/store.rs
// ============================================================================
// Module: In-Memory Permission Store
// Description: Process-local implementation of the permission store contract.
// Purpose: Back tests and embedded deployments without a database.
// Dependencies: crate::{core, interfaces}, async-trait
// ============================================================================

//! ## Overview
//! Stored grants are keyed by organization, subject, and resource. Setting
//! permissions for a subject replaces its earlier actions on that resource.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::BuiltInRole;
use crate::core::OrgId;
use crate::core::Permission;
use crate::core::TeamId;
use crate::core::UserId;
use crate::core::resource_scope;
use crate::interfaces::PermissionStore;
use crate::interfaces::SetResourcePermissions;
use crate::interfaces::StoreError;
use crate::interfaces::UserResourcePermissionsQuery;

// ============================================================================
// SECTION: State
// ============================================================================

/// Grant holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Subject {
    /// Individual user.
    User(UserId),
    /// Team.
    Team(TeamId),
    /// Built-in role.
    BuiltIn(BuiltInRole),
}

/// Storage key for one subject on one resource.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct GrantKey {
    /// Owning organization.
    org_id: OrgId,
    /// Grant holder.
    subject: Subject,
    /// Resource type.
    resource: String,
    /// Resource identifier.
    resource_id: String,
}

/// Store contents.
#[derive(Debug, Default)]
struct StoreState {
    /// Granted actions per key.
    grants: BTreeMap<GrantKey, BTreeSet<String>>,
    /// Team memberships per organization.
    members: BTreeMap<(OrgId, TeamId), BTreeSet<UserId>>,
}

/// In-memory permission store for tests and embedded use.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPermissionStore {
    /// Store state protected by a mutex.
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryPermissionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a user to a team.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Store`] when the store mutex is poisoned.
    pub fn add_team_member(
        &self,
        org_id: OrgId,
        team_id: TeamId,
        user_id: UserId,
    ) -> Result<(), StoreError> {
        self.state
            .lock()
            .map_err(|_| poisoned())?
            .members
            .entry((org_id, team_id))
            .or_default()
            .insert(user_id);
        Ok(())
    }

    /// Replaces the actions a subject holds on one resource.
    fn set(
        &self,
        org_id: OrgId,
        subject: Subject,
        command: &SetResourcePermissions,
    ) -> Result<Vec<Permission>, StoreError> {
        let key = GrantKey {
            org_id,
            subject,
            resource: command.resource.clone(),
            resource_id: command.resource_id.clone(),
        };
        let actions: BTreeSet<String> = command.actions.iter().cloned().collect();
        let scope = resource_scope(&command.resource, &command.resource_id);
        let permissions =
            actions.iter().map(|action| Permission::new(action.clone(), scope.clone())).collect();
        let mut state = self.state.lock().map_err(|_| poisoned())?;
        if actions.is_empty() {
            state.grants.remove(&key);
        } else {
            state.grants.insert(key, actions);
        }
        Ok(permissions)
    }
}

#[async_trait]
impl PermissionStore for InMemoryPermissionStore {
    async fn get_user_resource_permissions(
        &self,
        org_id: OrgId,
        user_id: UserId,
        query: &UserResourcePermissionsQuery,
    ) -> Result<Vec<Permission>, StoreError> {
        let state = self.state.lock().map_err(|_| poisoned())?;
        let mut subjects: BTreeSet<Subject> = BTreeSet::new();
        subjects.insert(Subject::User(user_id));
        for ((member_org, team_id), users) in &state.members {
            if *member_org == org_id && users.contains(&user_id) {
                subjects.insert(Subject::Team(*team_id));
            }
        }
        subjects.extend(query.built_in_roles.iter().copied().map(Subject::BuiltIn));
        let ids: BTreeSet<&str> = query.resource_ids.iter().map(String::as_str).collect();

        let mut permissions = Vec::new();
        for (key, actions) in &state.grants {
            if key.org_id != org_id
                || key.resource != query.resource
                || !ids.contains(key.resource_id.as_str())
                || !subjects.contains(&key.subject)
            {
                continue;
            }
            let scope = resource_scope(&key.resource, &key.resource_id);
            permissions
                .extend(actions.iter().map(|action| Permission::new(action.clone(), scope.clone())));
        }
        Ok(permissions)
    }

    async fn set_user_resource_permissions(
        &self,
        org_id: OrgId,
        user_id: UserId,
        command: &SetResourcePermissions,
    ) -> Result<Vec<Permission>, StoreError> {
        self.set(org_id, Subject::User(user_id), command)
    }

    async fn set_team_resource_permissions(
        &self,
        org_id: OrgId,
        team_id: TeamId,
        command: &SetResourcePermissions,
    ) -> Result<Vec<Permission>, StoreError> {
        self.set(org_id, Subject::Team(team_id), command)
    }

    async fn set_builtin_resource_permissions(
        &self,
        org_id: OrgId,
        built_in_role: BuiltInRole,
        command: &SetResourcePermissions,
    ) -> Result<Vec<Permission>, StoreError> {
        self.set(org_id, Subject::BuiltIn(built_in_role), command)
    }
}

/// Builds the poisoned-mutex error.
fn poisoned() -> StoreError {
    StoreError::Store("permission store mutex poisoned".to_string())
}
