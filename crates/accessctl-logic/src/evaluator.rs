// crates/accessctl-logic/src/evaluator.rs
// ============================================================================
// Module: Evaluator Tree
// Description: Boolean algebra over domain-specific leaves.
// Purpose: Define `Evaluator` and its pure, total evaluation semantics.
// Dependencies: serde::{Deserialize, Serialize}, smallvec::SmallVec
// ============================================================================

//! ## Overview
//! An [`Evaluator`] is a tagged tree: leaves carry domain predicates, while
//! [`Evaluator::All`] and [`Evaluator::Any`] combine children. Evaluation is
//! pure and total; there is no partial-failure state, only a boolean outcome.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use smallvec::SmallVec;

use crate::traits::LeafEval;

// ============================================================================
// SECTION: Evaluator Definition
// ============================================================================

/// Children storage for composite nodes.
pub type Children<L> = SmallVec<[Box<Evaluator<L>>; 4]>;

/// Boolean evaluator tree with domain-specific leaves.
///
/// # Invariants
/// - Empty `All` is satisfied (identity); empty `Any` is unsatisfiable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Evaluator<L> {
    /// Domain-specific atomic check.
    Leaf(L),

    /// Every child must be satisfied.
    All(Children<L>),

    /// At least one child must be satisfied.
    Any(Children<L>),
}

// ============================================================================
// SECTION: Constructors
// ============================================================================

impl<L> Evaluator<L> {
    /// Creates a leaf evaluator.
    #[must_use]
    pub const fn leaf(leaf: L) -> Self {
        Self::Leaf(leaf)
    }

    /// Creates an evaluator requiring all children.
    #[must_use]
    pub fn all(children: Vec<Self>) -> Self {
        Self::All(children.into_iter().map(Box::new).collect())
    }

    /// Creates an evaluator requiring any child.
    #[must_use]
    pub fn any(children: Vec<Self>) -> Self {
        Self::Any(children.into_iter().map(Box::new).collect())
    }

    /// Returns every leaf in depth-first order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&L> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    /// Pushes leaves into `out` depth-first.
    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a L>) {
        match self {
            Self::Leaf(leaf) => out.push(leaf),
            Self::All(children) | Self::Any(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

impl<L: LeafEval> Evaluator<L> {
    /// Evaluates the tree against a domain index.
    ///
    /// Short-circuits are safe because leaf evaluation has no side effects.
    #[must_use]
    pub fn evaluate(&self, index: &L::Index<'_>) -> bool {
        match self {
            Self::Leaf(leaf) => leaf.eval_leaf(index),
            Self::All(children) => children.iter().all(|child| child.evaluate(index)),
            Self::Any(children) => children.iter().any(|child| child.evaluate(index)),
        }
    }
}

// ============================================================================
// SECTION: Display
// ============================================================================

impl<L: fmt::Display> fmt::Display for Evaluator<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (label, children) = match self {
            Self::Leaf(leaf) => return write!(f, "{leaf}"),
            Self::All(children) => ("all", children),
            Self::Any(children) => ("any", children),
        };
        write!(f, "{label}(")?;
        for (idx, child) in children.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{child}")?;
        }
        write!(f, ")")
    }
}
