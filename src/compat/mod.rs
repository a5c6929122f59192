//! Compatibility engine deciding whether a matrix admits a perfect phylogeny.
//!
//! Data flows strictly leaf-first:
//!
//! ```text
//! matrix ──→ ColumnOrder (sort by weight) ──→ CompatibilityTreeBuilder ──→ BinaryTree
//!   │                                               ↑
//!   └──→ ModelAssignments ──→ encode ──→ two-state decision per model ──→ MultistateTree
//! ```
//!
//! # Two-state
//! [`two_state::decide`] sorts the characters by descending weight
//! ([ColumnOrder]) and extends a tree taxon by taxon
//! ([CompatibilityTreeBuilder]). A character needed on a second edge is a
//! [Conflict] and proves incompatibility.
//!
//! # Three-state
//! [ThreeStateSolver] enumerates all [ModelAssignment]s, encodes each as a
//! binary matrix and runs the two-state decision; the first accepted model
//! wins.
//!
//! Each decision owns its tree and its set of used characters; nothing is
//! shared between decisions.

pub mod column_order;
pub mod evolution_model;
pub mod three_state;
pub mod tree_builder;
pub mod two_state;

pub use column_order::{ColumnOrder, sort_by_weight};
pub use evolution_model::{EvolutionModel, ModelAssignment, ModelAssignments};
pub use three_state::{MultistatePhylogeny, SearchStrategy, ThreeStateSolver};
pub use tree_builder::CompatibilityTreeBuilder;

use crate::model::character::{CharacterIndex, TaxonIndex};
use std::fmt;

// =#========================================================================#=
// VERDICT
// =#========================================================================#=
/// Answer of a compatibility decision.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict<T> {
    /// A perfect phylogeny exists; holds one witness
    Compatible(T),
    /// No perfect phylogeny exists
    Incompatible(Incompatibility),
}

impl<T> Verdict<T> {
    /// Returns `true` if a perfect phylogeny exists.
    pub fn is_compatible(&self) -> bool {
        matches!(self, Verdict::Compatible(_))
    }

    /// Returns the witness, if compatible.
    pub fn compatible(&self) -> Option<&T> {
        match self {
            Verdict::Compatible(witness) => Some(witness),
            Verdict::Incompatible(_) => None,
        }
    }

    /// Consumes the verdict and returns the witness, if compatible.
    pub fn into_compatible(self) -> Option<T> {
        match self {
            Verdict::Compatible(witness) => Some(witness),
            Verdict::Incompatible(_) => None,
        }
    }

    /// Returns the reason, if incompatible.
    pub fn incompatibility(&self) -> Option<&Incompatibility> {
        match self {
            Verdict::Compatible(_) => None,
            Verdict::Incompatible(reason) => Some(reason),
        }
    }
}

// =#========================================================================#=
// INCOMPATIBILITY
// =#========================================================================#=
/// Why a matrix admits no perfect phylogeny.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Incompatibility {
    /// Two-state: a character would have to change state on a second edge
    Conflict(Conflict),
    /// Three-state: every model assignment was rejected
    NoCompatibleModel {
        /// Number of model assignments tried
        models_tried: usize,
    },
}

impl fmt::Display for Incompatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Incompatibility::Conflict(conflict) => write!(f, "{conflict}"),
            Incompatibility::NoCompatibleModel { models_tried } => {
                write!(f, "none of {models_tried} model assignments admits a perfect phylogeny")
            }
        }
    }
}

/// A character that taxon `taxon` needs on a new edge, although it already
/// labels another edge of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict {
    /// Taxon whose extension failed
    pub taxon: TaxonIndex,
    /// Character that would change state twice
    pub character: CharacterIndex,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "character c{} of taxon t{} already changes state on another edge",
            self.character + 1,
            self.taxon + 1
        )
    }
}
