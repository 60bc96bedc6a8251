// crates/accessctl-core/src/runtime/permissions.rs
// ============================================================================
// Module: Permission Evaluator
// Description: Permission leaves and the grouped permission index.
// Purpose: Match required (action, scope) pairs against a principal's grants.
// Dependencies: accessctl-logic, crate::core
// ============================================================================

//! ## Overview
//! A [`PermissionLeaf`] names an action and the scopes a caller needs. It is
//! checked against a [`PermissionIndex`], the principal's resolved permissions
//! grouped by action. Trees of leaves are plain
//! [`accessctl_logic::Evaluator`] values.
//!
//! ## Invariants
//! - Evaluation is pure; neither the leaf nor the index is mutated.
//! - A leaf without scopes only requires the action to be present.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;

use accessctl_logic::Evaluator;
use accessctl_logic::LeafEval;
use serde::Deserialize;
use serde::Serialize;

use crate::core::Permission;
use crate::core::scope_matches;

// ============================================================================
// SECTION: Index
// ============================================================================

/// Granted scopes grouped by action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionIndex {
    /// Action to granted scopes.
    scopes: BTreeMap<String, BTreeSet<String>>,
}

impl PermissionIndex {
    /// Builds an index from resolved permissions.
    #[must_use]
    pub fn new<'a>(permissions: impl IntoIterator<Item = &'a Permission>) -> Self {
        Self {
            scopes: group_scopes_by_action(permissions),
        }
    }

    /// Returns the scopes granted for an action.
    #[must_use]
    pub fn scopes(&self, action: &str) -> Option<&BTreeSet<String>> {
        self.scopes.get(action)
    }

    /// Returns true when the action is granted with any scope.
    #[must_use]
    pub fn has_action(&self, action: &str) -> bool {
        self.scopes.contains_key(action)
    }

    /// Returns true when some granted scope for `action` covers `scope`.
    #[must_use]
    pub fn allows(&self, action: &str, scope: &str) -> bool {
        self.scopes(action)
            .is_some_and(|granted| granted.iter().any(|candidate| scope_matches(candidate, scope)))
    }

    /// Returns true when no permission is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

/// Groups permission scopes by action, deduplicating scopes.
#[must_use]
pub fn group_scopes_by_action<'a>(
    permissions: impl IntoIterator<Item = &'a Permission>,
) -> BTreeMap<String, BTreeSet<String>> {
    let mut grouped: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for permission in permissions {
        grouped.entry(permission.action.clone()).or_default().insert(permission.scope.clone());
    }
    grouped
}

// ============================================================================
// SECTION: Leaf
// ============================================================================

/// Required action with the scopes it must cover.
///
/// # Invariants
/// - Every listed scope must be covered by some granted scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionLeaf {
    /// Required action.
    pub action: String,
    /// Required scopes; empty means any scope.
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl PermissionLeaf {
    /// Creates a leaf requiring an action on the given scopes.
    #[must_use]
    pub fn new(action: impl Into<String>, scopes: Vec<String>) -> Self {
        Self {
            action: action.into(),
            scopes,
        }
    }
}

impl LeafEval for PermissionLeaf {
    type Index<'a> = PermissionIndex;

    fn eval_leaf(&self, index: &Self::Index<'_>) -> bool {
        if !index.has_action(&self.action) {
            return false;
        }
        self.scopes.iter().all(|scope| index.allows(&self.action, scope))
    }
}

impl fmt::Display for PermissionLeaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scopes.is_empty() {
            write!(f, "permission({})", self.action)
        } else {
            write!(f, "permission({}, [{}])", self.action, self.scopes.join(", "))
        }
    }
}

// ============================================================================
// SECTION: Evaluators
// ============================================================================

/// Evaluator tree over permission leaves.
pub type PermissionEvaluator = Evaluator<PermissionLeaf>;

/// Requires `action`, and `scope` when one is given.
#[must_use]
pub fn eval_permission(action: impl Into<String>, scope: Option<&str>) -> PermissionEvaluator {
    let scopes = scope.map(|scope| vec![scope.to_string()]).unwrap_or_default();
    Evaluator::leaf(PermissionLeaf::new(action, scopes))
}

/// Requires `action` on every listed scope.
#[must_use]
pub fn eval_permission_scopes(
    action: impl Into<String>,
    scopes: &[&str],
) -> PermissionEvaluator {
    Evaluator::leaf(PermissionLeaf::new(
        action,
        scopes.iter().map(|scope| (*scope).to_string()).collect(),
    ))
}

/// Requires every child evaluator.
#[must_use]
pub fn eval_all(children: Vec<PermissionEvaluator>) -> PermissionEvaluator {
    Evaluator::all(children)
}

/// Requires at least one child evaluator.
#[must_use]
pub fn eval_any(children: Vec<PermissionEvaluator>) -> PermissionEvaluator {
    Evaluator::any(children)
}
