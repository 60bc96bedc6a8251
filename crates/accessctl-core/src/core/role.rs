// crates/accessctl-core/src/core/role.rs
// ============================================================================
// Module: Roles and Permissions
// Description: Fixed roles, permissions, organizational and built-in roles.
// Purpose: Define the role data model and registration validation rules.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Fixed roles are versioned permission bundles declared by feature modules
//! and granted to built-in roles. Built-in roles are the organizational tiers
//! plus the server-admin sentinel.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::OrgId;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Reserved prefix every fixed role name must carry.
pub const FIXED_ROLE_PREFIX: &str = "fixed:";

/// Wire name of the server-admin sentinel role.
pub const SERVER_ADMIN_ROLE: &str = "Server Admin";

// ============================================================================
// SECTION: Permission
// ============================================================================

/// Single action granted on a scope.
///
/// # Invariants
/// - Immutable once attached to a registered role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Permission {
    /// Action identifier, e.g. `users:read`.
    pub action: String,
    /// Scope string; may be templated or wildcarded.
    pub scope: String,
}

impl Permission {
    /// Creates a permission.
    #[must_use]
    pub fn new(action: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            scope: scope.into(),
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.action, self.scope)
    }
}

/// Per-resource action metadata: action name mapped to `true`.
pub type Metadata = BTreeMap<String, bool>;

// ============================================================================
// SECTION: Roles
// ============================================================================

/// Versioned fixed role definition.
///
/// # Invariants
/// - `name` identifies the role in the registry.
/// - Higher `version` wins when the same name is registered twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Stable role UID.
    pub uid: String,
    /// Namespaced role name, e.g. `fixed:users:reader`.
    pub name: String,
    /// Monotonic role version.
    pub version: u64,
    /// Human-readable name.
    #[serde(default)]
    pub display_name: String,
    /// Role description.
    #[serde(default)]
    pub description: String,
    /// Owning organization (`OrgId::GLOBAL` for every org).
    #[serde(default)]
    pub org_id: OrgId,
    /// Permissions in declaration order.
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl Role {
    /// Creates a global role with no permissions; the UID defaults to the name.
    #[must_use]
    pub fn new(name: impl Into<String>, version: u64) -> Self {
        let name = name.into();
        Self {
            uid: name.clone(),
            name,
            version,
            display_name: String::new(),
            description: String::new(),
            org_id: OrgId::GLOBAL,
            permissions: Vec::new(),
        }
    }

    /// Replaces the permission list.
    #[must_use]
    pub fn with_permissions(mut self, permissions: Vec<Permission>) -> Self {
        self.permissions = permissions;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Returns true when the name carries the fixed-role prefix.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.name.starts_with(FIXED_ROLE_PREFIX)
    }
}

/// Declaration of a fixed role and the built-in roles it is granted to.
///
/// # Invariants
/// - `grants` are unvalidated wire names until the registration is declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRegistration {
    /// Role body.
    pub role: Role,
    /// Built-in role names receiving the role.
    #[serde(default)]
    pub grants: Vec<String>,
}

impl RoleRegistration {
    /// Creates a registration from a role and grant names.
    #[must_use]
    pub fn new(role: Role, grants: &[&str]) -> Self {
        Self {
            role,
            grants: grants.iter().map(|grant| (*grant).to_string()).collect(),
        }
    }
}

// ============================================================================
// SECTION: Organizational Roles
// ============================================================================

/// Organizational role declared on a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrgRole {
    /// Read-only tier.
    Viewer,
    /// Read/write tier.
    Editor,
    /// Organization administrator.
    Admin,
}

impl OrgRole {
    /// Returns every role strictly below this one in the ladder.
    #[must_use]
    pub const fn children(self) -> &'static [Self] {
        match self {
            Self::Admin => &[Self::Editor, Self::Viewer],
            Self::Editor => &[Self::Viewer],
            Self::Viewer => &[],
        }
    }

    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Viewer => "Viewer",
            Self::Editor => "Editor",
            Self::Admin => "Admin",
        }
    }
}

impl fmt::Display for OrgRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grant target: an organizational tier or the server-admin sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BuiltInRole {
    /// Viewer tier.
    Viewer,
    /// Editor tier.
    Editor,
    /// Admin tier.
    Admin,
    /// Server-wide super-admin sentinel.
    #[serde(rename = "Server Admin")]
    ServerAdmin,
}

impl BuiltInRole {
    /// Every recognized built-in role.
    pub const ALL: [Self; 4] = [Self::Viewer, Self::Editor, Self::Admin, Self::ServerAdmin];

    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Viewer => "Viewer",
            Self::Editor => "Editor",
            Self::Admin => "Admin",
            Self::ServerAdmin => SERVER_ADMIN_ROLE,
        }
    }

    /// Parses a wire name; unknown names return `None`.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == name)
    }
}

impl From<OrgRole> for BuiltInRole {
    fn from(role: OrgRole) -> Self {
        match role {
            OrgRole::Viewer => Self::Viewer,
            OrgRole::Editor => Self::Editor,
            OrgRole::Admin => Self::Admin,
        }
    }
}

impl fmt::Display for BuiltInRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Registration validation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Role name lacks the fixed-role prefix.
    #[error("fixed role name must start with '{FIXED_ROLE_PREFIX}': {name}")]
    FixedRolePrefixMissing {
        /// Offending role name.
        name: String,
    },
    /// Grant target is not a recognized built-in role.
    #[error("invalid built-in role: {name}")]
    InvalidBuiltInRole {
        /// Offending grant name.
        name: String,
    },
}

/// Checks that a role is a fixed role.
///
/// # Errors
///
/// Returns [`ValidationError::FixedRolePrefixMissing`] when the prefix is absent.
pub fn validate_fixed_role(role: &Role) -> Result<(), ValidationError> {
    if role.is_fixed() {
        Ok(())
    } else {
        Err(ValidationError::FixedRolePrefixMissing {
            name: role.name.clone(),
        })
    }
}

/// Parses grant names into built-in roles, rejecting unknown names.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidBuiltInRole`] for the first unknown name.
pub fn validate_built_in_roles(grants: &[String]) -> Result<Vec<BuiltInRole>, ValidationError> {
    grants
        .iter()
        .map(|name| {
            BuiltInRole::parse(name).ok_or_else(|| ValidationError::InvalidBuiltInRole {
                name: name.clone(),
            })
        })
        .collect()
}
