// crates/accessctl-config/src/lib.rs
// ============================================================================
// Module: Access Control Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for accessctl.toml semantics.
// Dependencies: accessctl-core, serde, toml
// ============================================================================

//! ## Overview
//! `accessctl-config` loads and validates the access control configuration
//! and turns it into core runtime settings and an audit sink. Loading fails
//! closed: anything unreadable or out of range is an error.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
