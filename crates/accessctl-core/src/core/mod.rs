// crates/accessctl-core/src/core/mod.rs
// ============================================================================
// Module: Access Control Core Types
// Description: Canonical role, permission, principal, and scope types.
// Purpose: Provide stable, serializable types shared by the runtime.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Core types carry no behavior beyond construction, validation, and scope
//! grammar. Registry state and evaluation live in [`crate::runtime`].

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod identifiers;
pub mod principal;
pub mod role;
pub mod scope;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use identifiers::OrgId;
pub use identifiers::TeamId;
pub use identifiers::UserId;
pub use principal::Principal;
pub use role::BuiltInRole;
pub use role::FIXED_ROLE_PREFIX;
pub use role::Metadata;
pub use role::OrgRole;
pub use role::Permission;
pub use role::Role;
pub use role::RoleRegistration;
pub use role::SERVER_ADMIN_ROLE;
pub use role::ValidationError;
pub use role::validate_built_in_roles;
pub use role::validate_fixed_role;
pub use scope::SCOPE_SEPARATOR;
pub use scope::WILDCARD;
pub use scope::resource_all_id_scope;
pub use scope::resource_all_scope;
pub use scope::resource_scope;
pub use scope::scope;
pub use scope::scope_matches;
