// crates/accessctl-core/src/core/scope.rs
// ============================================================================
// Module: Scopes
// Description: Scope construction helpers and hierarchical wildcard matching.
// Purpose: Keep scope string grammar in one place.
// Dependencies: none
// ============================================================================

//! ## Overview
//! A scope is a colon-delimited string such as `dashboards:id:7`. Grants may use
//! the universal wildcard `*` or a prefix wildcard such as `dashboards:*`,
//! which stands for one or more trailing full segments.

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Segment separator inside a scope.
pub const SCOPE_SEPARATOR: char = ':';

/// Universal wildcard scope (and wildcard marker for prefix scopes).
pub const WILDCARD: &str = "*";

// ============================================================================
// SECTION: Builders
// ============================================================================

/// Joins scope segments with the separator.
#[must_use]
pub fn scope(parts: &[&str]) -> String {
    let mut out = String::new();
    for (idx, part) in parts.iter().enumerate() {
        if idx > 0 {
            out.push(SCOPE_SEPARATOR);
        }
        out.push_str(part);
    }
    out
}

/// Returns the concrete scope of one resource, e.g. `dashboards:id:7`.
#[must_use]
pub fn resource_scope(resource: &str, resource_id: &str) -> String {
    scope(&[resource, "id", resource_id])
}

/// Returns the scope covering every object of a resource type, e.g. `dashboards:*`.
#[must_use]
pub fn resource_all_scope(resource: &str) -> String {
    scope(&[resource, WILDCARD])
}

/// Returns the scope covering every id of a resource type, e.g. `dashboards:id:*`.
#[must_use]
pub fn resource_all_id_scope(resource: &str) -> String {
    scope(&[resource, "id", WILDCARD])
}

// ============================================================================
// SECTION: Matching
// ============================================================================

/// Returns true when a granted scope covers a required scope.
///
/// A prefix wildcard only matches at a segment boundary: `dashboards:*` covers
/// `dashboards:1` but not `dashboards-special:1`, and a wildcard that does not
/// follow a separator (e.g. `dash*`) is treated literally.
#[must_use]
pub fn scope_matches(granted: &str, required: &str) -> bool {
    if granted == required || granted == WILDCARD {
        return true;
    }
    let Some(prefix) = granted.strip_suffix(WILDCARD) else {
        return false;
    };
    if !prefix.ends_with(SCOPE_SEPARATOR) {
        return false;
    }
    required.len() > prefix.len() && required.starts_with(prefix)
}
