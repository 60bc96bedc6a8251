// crates/accessctl-logic/src/lib.rs
// ============================================================================
// Module: Access Logic Root
// Description: Public API surface for evaluator trees.
// Purpose: Wire together the evaluator tree, leaf trait, and DSL macro.
// Dependencies: crate::{evaluator, traits}
// ============================================================================

//! ## Overview
//! `accessctl-logic` exposes a small boolean algebra (leaf, all, any) over
//! domain-defined leaves. It knows nothing about permissions; the core crate
//! supplies the leaf semantics.

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod evaluator;
pub mod traits;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use evaluator::Children;
pub use evaluator::Evaluator;
pub use traits::LeafEval;

// ============================================================================
// SECTION: Convenience DSL
// ============================================================================

/// Convenience functions for creating evaluators without the enum paths.
pub mod convenience {
    use super::Evaluator;

    /// Creates an evaluator requiring all of the given evaluators.
    #[must_use]
    pub fn all<L>(children: Vec<Evaluator<L>>) -> Evaluator<L> {
        Evaluator::all(children)
    }

    /// Creates an evaluator requiring any of the given evaluators.
    #[must_use]
    pub fn any<L>(children: Vec<Evaluator<L>>) -> Evaluator<L> {
        Evaluator::any(children)
    }

    /// Creates an evaluator from a single leaf.
    #[must_use]
    pub const fn leaf<L>(leaf: L) -> Evaluator<L> {
        Evaluator::leaf(leaf)
    }
}

// ============================================================================
// SECTION: Evaluator Macro
// ============================================================================

/// Macro for ergonomic evaluator construction.
///
/// ```ignore
/// let eval = evaluator! {
///     all [
///         leaf(read_users),
///         any [
///             leaf(write_users),
///             leaf(admin_users)
///         ]
///     ]
/// };
/// ```
#[macro_export]
macro_rules! evaluator {
    (leaf($leaf:expr)) => {
        $crate::evaluator::Evaluator::leaf($leaf)
    };

    (all [$($kind:ident $body:tt),* $(,)?]) => {
        $crate::evaluator::Evaluator::all(vec![$($crate::evaluator!($kind $body)),*])
    };

    (any [$($kind:ident $body:tt),* $(,)?]) => {
        $crate::evaluator::Evaluator::any(vec![$($crate::evaluator!($kind $body)),*])
    };
}
