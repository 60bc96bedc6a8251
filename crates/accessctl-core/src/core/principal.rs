// crates/accessctl-core/src/core/principal.rs
// ============================================================================
// Module: Principal
// Description: Signed-in subject presented for evaluation.
// Purpose: Carry the attributes authorization decisions depend on.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A principal is supplied by the caller per request; this crate never owns or
//! persists it.

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::OrgId;
use crate::core::identifiers::TeamId;
use crate::core::identifiers::UserId;
use crate::core::role::OrgRole;

/// Evaluation subject.
///
/// # Invariants
/// - Values are request snapshots; evaluation never mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// User identifier.
    pub user_id: UserId,
    /// Active organization.
    pub org_id: OrgId,
    /// Declared organizational role.
    pub org_role: OrgRole,
    /// Server-wide super-admin flag.
    #[serde(default)]
    pub is_super_admin: bool,
    /// Team context when the request carries one.
    #[serde(default)]
    pub team_id: Option<TeamId>,
    /// Login name, for audit labeling only.
    #[serde(default)]
    pub login: String,
}

impl Principal {
    /// Creates a principal without team context or super-admin rights.
    #[must_use]
    pub const fn new(user_id: UserId, org_id: OrgId, org_role: OrgRole) -> Self {
        Self {
            user_id,
            org_id,
            org_role,
            is_super_admin: false,
            team_id: None,
            login: String::new(),
        }
    }

    /// Sets the super-admin flag.
    #[must_use]
    pub fn with_super_admin(mut self, is_super_admin: bool) -> Self {
        self.is_super_admin = is_super_admin;
        self
    }

    /// Sets the team context.
    #[must_use]
    pub fn with_team(mut self, team_id: TeamId) -> Self {
        self.team_id = Some(team_id);
        self
    }

    /// Sets the login name.
    #[must_use]
    pub fn with_login(mut self, login: impl Into<String>) -> Self {
        self.login = login.into();
        self
    }
}
