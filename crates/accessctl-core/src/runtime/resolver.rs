// crates/accessctl-core/src/runtime/resolver.rs
// ============================================================================
// Module: Scope Resolver
// Description: Rewrites keyword scopes into concrete, principal-bound scopes.
// Purpose: Resolve self-referential grants before evaluation.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! Keyword scopes such as `users:self` are templates shared by every principal.
//! The resolver maps each keyword to an explicit strategy keyed by resource
//! type and produces a new [`Permission`]; the input is never mutated.
//!
//! ## Invariants
//! - A scope is a keyword only when it equals the keyword text exactly.
//! - Unsatisfiable keywords fail with a typed [`ResolutionError`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::Permission;
use crate::core::Principal;
use crate::core::UserId;
use crate::core::resource_scope;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Keyword resolution errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// `teams:self` requested without team context.
    #[error("cannot resolve teams:self for user {user_id}: no team context")]
    MissingTeam {
        /// User identifier of the principal.
        user_id: UserId,
    },
    /// `orgs:current` requested for a principal outside any organization.
    #[error("cannot resolve orgs:current for user {user_id}: no active organization")]
    MissingOrg {
        /// User identifier of the principal.
        user_id: UserId,
    },
}

// ============================================================================
// SECTION: Keywords
// ============================================================================

/// Keyword scope resolution strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordScope {
    /// `users:self` resolves to the principal's user id.
    UserSelf,
    /// `teams:self` resolves to the principal's team id.
    TeamSelf,
    /// `orgs:current` resolves to the principal's organization id.
    OrgCurrent,
}

impl KeywordScope {
    /// Every recognized keyword.
    pub const ALL: [Self; 3] = [Self::UserSelf, Self::TeamSelf, Self::OrgCurrent];

    /// Returns the keyword scope text.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::UserSelf => "users:self",
            Self::TeamSelf => "teams:self",
            Self::OrgCurrent => "orgs:current",
        }
    }

    /// Returns the resource type the keyword resolves into.
    #[must_use]
    pub const fn resource(self) -> &'static str {
        match self {
            Self::UserSelf => "users",
            Self::TeamSelf => "teams",
            Self::OrgCurrent => "orgs",
        }
    }

    /// Returns the keyword a scope spells, if any.
    #[must_use]
    pub fn parse(scope: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|keyword| keyword.keyword() == scope)
    }

    /// Produces the concrete scope for a principal.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError`] when the principal lacks the attribute.
    pub fn resolve(self, principal: &Principal) -> Result<String, ResolutionError> {
        let id = match self {
            Self::UserSelf => principal.user_id.to_string(),
            Self::TeamSelf => principal
                .team_id
                .ok_or(ResolutionError::MissingTeam {
                    user_id: principal.user_id,
                })?
                .to_string(),
            Self::OrgCurrent => {
                if principal.org_id.is_global() {
                    return Err(ResolutionError::MissingOrg {
                        user_id: principal.user_id,
                    });
                }
                principal.org_id.to_string()
            }
        };
        Ok(resource_scope(self.resource(), &id))
    }
}

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Stateless keyword resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScopeResolver;

impl ScopeResolver {
    /// Creates a resolver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Resolves a single permission for a principal.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError`] when a keyword cannot be satisfied.
    pub fn resolve(
        &self,
        principal: &Principal,
        permission: &Permission,
    ) -> Result<Permission, ResolutionError> {
        match KeywordScope::parse(&permission.scope) {
            Some(keyword) => {
                Ok(Permission::new(permission.action.clone(), keyword.resolve(principal)?))
            }
            None => Ok(permission.clone()),
        }
    }

    /// Resolves every permission, failing on the first unsatisfiable keyword.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError`]; no partial result is produced.
    pub fn resolve_all<'a>(
        &self,
        principal: &Principal,
        permissions: impl IntoIterator<Item = &'a Permission>,
    ) -> Result<Vec<Permission>, ResolutionError> {
        permissions.into_iter().map(|permission| self.resolve(principal, permission)).collect()
    }
}
