// crates/accessctl-logic/src/traits.rs
// ============================================================================
// Module: Evaluator Traits
// Description: Leaf evaluation contract for evaluator trees.
// Purpose: Let domains plug their own leaf semantics into the boolean tree.
// Dependencies: none
// ============================================================================

//! ## Overview
//! The tree in [`crate::evaluator`] is domain-agnostic. Domains describe how a
//! single leaf is checked against an index they own by implementing
//! [`LeafEval`].

// ============================================================================
// SECTION: Leaf Trait
// ============================================================================

/// Core trait for leaf evaluation against a domain index.
///
/// Implementations must be pure: the same leaf and index always produce the
/// same answer and neither value is mutated.
pub trait LeafEval {
    /// Domain-specific index the leaf is checked against.
    type Index<'a>;

    /// Returns `true` when the leaf is satisfied by the index.
    fn eval_leaf(&self, index: &Self::Index<'_>) -> bool;
}
