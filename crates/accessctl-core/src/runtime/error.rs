// crates/accessctl-core/src/runtime/error.rs
// ============================================================================
// Module: Access Control Errors
// Description: Umbrella error for registry, resolution, and store failures.
// Purpose: Give every public runtime operation one typed failure surface.
// Dependencies: crate::{core, interfaces, runtime::resolver}, thiserror
// ============================================================================

//! ## Overview
//! A denied request is never an error; it is a `false` evaluation result.

use thiserror::Error;

use crate::core::ValidationError;
use crate::interfaces::StoreError;
use crate::runtime::resolver::ResolutionError;

/// Access control runtime errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessControlError {
    /// Declaration batch failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A scope keyword could not be satisfied for the principal.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    /// The permission store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Registry state is unavailable (poisoned lock).
    #[error("fixed role registry error: {0}")]
    Registry(String),
}
