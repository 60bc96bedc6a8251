// crates/accessctl-core/src/runtime/hierarchy.rs
// ============================================================================
// Module: Built-in Role Hierarchy
// Description: Expansion of a principal's declared role into built-in roles.
// Purpose: Compute the grant targets whose fixed roles apply to a principal.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Each organizational role implies every lower role; the super-admin flag adds
//! the server-admin sentinel on top of the organizational ladder.

use std::collections::BTreeSet;

use crate::core::BuiltInRole;
use crate::core::Principal;

/// Returns the built-in roles held by a principal.
#[must_use]
pub fn built_in_roles(principal: &Principal) -> BTreeSet<BuiltInRole> {
    let mut roles = BTreeSet::new();
    roles.insert(BuiltInRole::from(principal.org_role));
    for child in principal.org_role.children() {
        roles.insert(BuiltInRole::from(*child));
    }
    if principal.is_super_admin {
        roles.insert(BuiltInRole::ServerAdmin);
    }
    roles
}
