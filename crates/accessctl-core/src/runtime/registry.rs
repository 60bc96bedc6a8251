// crates/accessctl-core/src/runtime/registry.rs
// ============================================================================
// Module: Fixed Role Registry
// Description: Versioned fixed roles and their built-in role grants.
// Purpose: Hold process-scoped role state behind an explicit owner.
// Dependencies: crate::{audit, core, runtime::error}
// ============================================================================

//! ## Overview
//! Feature modules declare fixed roles at startup; [`FixedRoleRegistry::apply`]
//! moves the validated queue into the role and grant maps. Late registrations
//! are allowed, so reads and writes go through a reader-writer lock.
//!
//! ## Invariants
//! - A stored role body is replaced only by a strictly greater version.
//! - Grants are append-only and never duplicated per built-in role.
//! - A disabled registry accepts every call and changes nothing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::RwLock;

use crate::audit::AccessAuditEvent;
use crate::audit::AccessAuditSink;
use crate::audit::AuditDetail;
use crate::audit::NoopAuditSink;
use crate::core::BuiltInRole;
use crate::core::Permission;
use crate::core::Role;
use crate::core::RoleRegistration;
use crate::core::validate_built_in_roles;
use crate::core::validate_fixed_role;
use crate::runtime::error::AccessControlError;

// ============================================================================
// SECTION: State
// ============================================================================

/// Validated declaration awaiting `apply`.
#[derive(Debug, Clone)]
struct PendingRegistration {
    /// Role body.
    role: Role,
    /// Parsed grant targets.
    grants: Vec<BuiltInRole>,
}

/// Role and grant maps.
#[derive(Debug, Default)]
struct RegistryState {
    /// Role name to role body.
    roles: BTreeMap<String, Role>,
    /// Built-in role to granted role names, in grant order.
    grants: BTreeMap<BuiltInRole, Vec<String>>,
}

/// Fixed role registry.
pub struct FixedRoleRegistry {
    /// Whether access control is enabled.
    enabled: bool,
    /// Role and grant maps.
    state: RwLock<RegistryState>,
    /// Declarations queued for `apply`.
    pending: Mutex<Vec<PendingRegistration>>,
    /// Audit sink for registration events.
    audit: Arc<dyn AccessAuditSink>,
}

impl FixedRoleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new(enabled: bool, audit: Arc<dyn AccessAuditSink>) -> Self {
        Self {
            enabled,
            state: RwLock::new(RegistryState::default()),
            pending: Mutex::new(Vec::new()),
            audit,
        }
    }

    /// Creates an enabled registry without audit output.
    #[must_use]
    pub fn enabled() -> Self {
        Self::new(true, Arc::new(NoopAuditSink))
    }

    /// Returns true when registration calls take effect.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    // ------------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------------

    /// Stores a role and grants it to the given built-in roles.
    ///
    /// # Errors
    ///
    /// Returns [`AccessControlError::Registry`] when the lock is poisoned.
    pub fn register(&self, role: Role, grants: &[BuiltInRole]) -> Result<(), AccessControlError> {
        if !self.enabled {
            return Ok(());
        }
        let mut state = self.state.write().map_err(|_| poisoned("role state"))?;
        let name = role.name.clone();
        let stored_version = state.roles.get(&name).map(|stored| stored.version);
        match stored_version {
            Some(stored_version) if stored_version >= role.version => {
                self.audit.record(&AccessAuditEvent::new(AuditDetail::RoleVersionSkipped {
                    role: name.clone(),
                    stored_version,
                    incoming_version: role.version,
                }));
            }
            _ => {
                state.roles.insert(name.clone(), role);
            }
        }
        for built_in_role in grants {
            let assigned = state.grants.entry(*built_in_role).or_default();
            if assigned.contains(&name) {
                self.audit.record(&AccessAuditEvent::new(AuditDetail::GrantAlreadyAssigned {
                    role: name.clone(),
                    built_in_role: *built_in_role,
                }));
            } else {
                assigned.push(name.clone());
            }
        }
        Ok(())
    }

    /// Validates a batch of declarations and queues them for `apply`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessControlError::Validation`] for the first invalid entry;
    /// nothing from the batch is queued in that case.
    pub fn declare(&self, registrations: &[RoleRegistration]) -> Result<(), AccessControlError> {
        if !self.enabled {
            return Ok(());
        }
        let mut validated = Vec::with_capacity(registrations.len());
        for registration in registrations {
            let checked = validate_fixed_role(&registration.role)
                .and_then(|()| validate_built_in_roles(&registration.grants));
            match checked {
                Ok(grants) => validated.push(PendingRegistration {
                    role: registration.role.clone(),
                    grants,
                }),
                Err(err) => {
                    self.audit.record(&AccessAuditEvent::new(AuditDetail::DeclarationRejected {
                        role: registration.role.name.clone(),
                        reason: err.to_string(),
                    }));
                    return Err(err.into());
                }
            }
        }
        self.pending.lock().map_err(|_| poisoned("declaration queue"))?.extend(validated);
        Ok(())
    }

    /// Registers every queued declaration. Safe to call repeatedly.
    ///
    /// # Errors
    ///
    /// Returns [`AccessControlError::Registry`] when a lock is poisoned.
    pub fn apply(&self) -> Result<(), AccessControlError> {
        if !self.enabled {
            return Ok(());
        }
        let pending = self.pending.lock().map_err(|_| poisoned("declaration queue"))?.clone();
        for registration in pending {
            self.register(registration.role, &registration.grants)?;
        }
        Ok(())
    }

    /// Returns the number of queued declarations.
    ///
    /// # Errors
    ///
    /// Returns [`AccessControlError::Registry`] when the queue lock is poisoned.
    pub fn pending_len(&self) -> Result<usize, AccessControlError> {
        Ok(self.pending.lock().map_err(|_| poisoned("declaration queue"))?.len())
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    /// Returns the stored body of a role.
    ///
    /// # Errors
    ///
    /// Returns [`AccessControlError::Registry`] when the lock is poisoned.
    pub fn role(&self, name: &str) -> Result<Option<Role>, AccessControlError> {
        let state = self.state.read().map_err(|_| poisoned("role state"))?;
        Ok(state.roles.get(name).cloned())
    }

    /// Returns the role names granted to a built-in role, in grant order.
    ///
    /// # Errors
    ///
    /// Returns [`AccessControlError::Registry`] when the lock is poisoned.
    pub fn grants(&self, built_in_role: BuiltInRole) -> Result<Vec<String>, AccessControlError> {
        let state = self.state.read().map_err(|_| poisoned("role state"))?;
        Ok(state.grants.get(&built_in_role).cloned().unwrap_or_default())
    }

    /// Returns every (built-in role, role name) grant pair.
    ///
    /// # Errors
    ///
    /// Returns [`AccessControlError::Registry`] when the lock is poisoned.
    pub fn grant_pairs(&self) -> Result<Vec<(BuiltInRole, String)>, AccessControlError> {
        let state = self.state.read().map_err(|_| poisoned("role state"))?;
        Ok(state
            .grants
            .iter()
            .flat_map(|(built_in_role, names)| {
                names.iter().map(move |name| (*built_in_role, name.clone()))
            })
            .collect())
    }

    /// Returns the permissions of every role granted to the given built-in
    /// roles. Grants whose role body is missing are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AccessControlError::Registry`] when the lock is poisoned.
    pub fn fixed_permissions<'a>(
        &self,
        built_in_roles: impl IntoIterator<Item = &'a BuiltInRole>,
    ) -> Result<Vec<Permission>, AccessControlError> {
        let state = self.state.read().map_err(|_| poisoned("role state"))?;
        let mut permissions = Vec::new();
        for built_in_role in built_in_roles {
            let Some(names) = state.grants.get(built_in_role) else {
                continue;
            };
            for name in names {
                if let Some(role) = state.roles.get(name) {
                    permissions.extend(role.permissions.iter().cloned());
                }
            }
        }
        Ok(permissions)
    }
}

/// Builds the poisoned-lock error for a registry component.
fn poisoned(component: &str) -> AccessControlError {
    AccessControlError::Registry(format!("{component} lock poisoned"))
}
