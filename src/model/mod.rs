//! Data model for character matrices and compatibility trees.
//!
//! # Matrices
//! A [CharacterMatrix] holds one row per taxon and one column per character.
//! State `0` is the ancestral state found at the root, states `1` and `2`
//! are derived states. Matrices are validated against a [StateCount] before
//! any tree is built.
//!
//! # Tree representation
//! Trees are represented by [GenTree], which uses the arena pattern to store
//! [Vertex] nodes. Each vertex is either the `Root`, an `Internal` vertex
//! introducing one character on its incoming edge, or a `Leaf` for one
//! taxon, referenced by [VertexIndex].
//!
//! Two concrete tree types are provided:
//!
//! | Type | Edge label | Produced by |
//! |------|------------|-------------|
//! | [BinaryTree] | [CharacterIndex] | two-state engine |
//! | [MultistateTree] | [StateTransition] | three-state reducer |
//!
//! Taxon names live outside the tree in a [TaxonLabelMap].

pub mod character;
pub mod leaf_label_map;
pub mod matrix;
pub mod tree;
pub mod vertex;

pub use character::{CharacterIndex, EdgeLabel, State, StateChange, StateTransition, TaxonIndex};
pub use leaf_label_map::TaxonLabelMap;
pub use matrix::{CharacterMatrix, MatrixError, StateCount};
pub use tree::{BinaryTree, GenTree, MultistateTree, VertexIndex};
pub use vertex::Vertex;
