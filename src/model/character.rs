//! Characters, states and edge labels of compatibility trees.
//!
//! - [State]: a character state of a taxon (0 is the ancestral/root state)
//! - [CharacterIndex] / [TaxonIndex]: column / row indices of a matrix
//! - [EdgeLabel]: label of an edge, either a character or the [terminal](EdgeLabel::Terminal) sentinel
//! - [StateTransition]: label of a three-state edge (character, source and target state)
//! - [StateChange]: how a label changes the genotype of every taxon below it

use std::fmt;

/// Character state of a taxon; `0` is the ancestral (root) state.
pub type State = u8;

/// Ancestral state every character has at the root.
pub const ROOT_STATE: State = 0;

/// Index of a character (column) in a matrix.
pub type CharacterIndex = usize;

/// Index of a taxon (row) in a matrix.
pub type TaxonIndex = usize;

// =#========================================================================#=
// EDGE LABEL
// =#========================================================================#=
/// Label of an edge in a compatibility tree.
///
/// Every edge into an internal vertex introduces exactly one character,
/// every edge into a leaf is a terminal edge and introduces nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeLabel<C> {
    /// Edge on which the character changes state
    Character(C),
    /// Sentinel of an edge ending in a taxon
    Terminal,
}

impl<C> EdgeLabel<C> {
    /// Returns the character if this is not a terminal edge.
    pub fn character(&self) -> Option<&C> {
        match self {
            EdgeLabel::Character(c) => Some(c),
            EdgeLabel::Terminal => None,
        }
    }

    /// Returns `true` if this is the terminal sentinel.
    pub fn is_terminal(&self) -> bool {
        matches!(self, EdgeLabel::Terminal)
    }
}

impl<C: fmt::Display> fmt::Display for EdgeLabel<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeLabel::Character(c) => write!(f, "{c}"),
            EdgeLabel::Terminal => write!(f, "-"),
        }
    }
}

// =#========================================================================#=
// STATE CHANGE (trait)
// =#========================================================================#=
/// A character label that changes the genotype of all taxa below its edge.
///
/// Replaying the labels on the path from the root to a leaf reconstructs the
/// row of the taxon at that leaf, see
/// [`GenTree::genotype`](crate::model::GenTree::genotype).
pub trait StateChange {
    /// Applies this change to a genotype `row` (indexed by original character).
    fn apply(&self, row: &mut [State]);

    /// Formats the label the way it is shown in drawings and Newick strings.
    fn display_label(&self) -> String;
}

impl StateChange for CharacterIndex {
    fn apply(&self, row: &mut [State]) {
        row[*self] = 1;
    }

    fn display_label(&self) -> String {
        format!("c{}", self + 1)
    }
}

// =#========================================================================#=
// STATE TRANSITION
// =#========================================================================#=
/// Transition of a three-state character from one state to another.
///
/// Displayed as `c<k>:<from>><to>` with 1-based character number `k`,
/// e.g. `c2:0>1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateTransition {
    /// Original character index
    pub character: CharacterIndex,
    /// State before the transition
    pub from: State,
    /// State after the transition
    pub to: State,
}

impl StateTransition {
    /// Creates a new transition of `character` from `from` to `to`.
    pub fn new(character: CharacterIndex, from: State, to: State) -> Self {
        StateTransition { character, from, to }
    }

    /// Returns `true` if this transition starts from the root state.
    pub fn is_from_root(&self) -> bool {
        self.from == ROOT_STATE
    }
}

impl StateChange for StateTransition {
    /// The second step of a linear model (`from != 0`) decides the final
    /// state, no matter in which order the two steps lie on the path.
    fn apply(&self, row: &mut [State]) {
        let current = &mut row[self.character];
        if !self.is_from_root() || *current == ROOT_STATE {
            *current = self.to;
        }
    }

    fn display_label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StateTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}:{}>{}", self.character + 1, self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_label_sets_derived_state() {
        let mut row = vec![0, 0, 0];
        StateChange::apply(&2usize, &mut row);
        assert_eq!(row, vec![0, 0, 1]);
        assert_eq!(StateChange::display_label(&2usize), "c3");
    }

    #[test]
    fn test_second_step_wins_in_either_order() {
        // 0 -> 2 -> 1
        let first = StateTransition::new(0, 0, 2);
        let second = StateTransition::new(0, 2, 1);

        let mut row = vec![0];
        first.apply(&mut row);
        second.apply(&mut row);
        assert_eq!(row, vec![1]);

        let mut row = vec![0];
        second.apply(&mut row);
        first.apply(&mut row);
        assert_eq!(row, vec![1]);
    }

    #[test]
    fn test_transition_display() {
        assert_eq!(StateTransition::new(1, 0, 2).to_string(), "c2:0>2");
        assert_eq!(EdgeLabel::<StateTransition>::Terminal.to_string(), "-");
    }
}
