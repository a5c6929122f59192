//! Vertex module for compatibility tree representation.

use crate::model::character::{EdgeLabel, TaxonIndex};
use crate::model::tree::VertexIndex;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex in a compatibility tree.
///
/// Generic over `C`, the label type of the character introduced on the
/// incoming edge of an internal vertex.
///
/// A vertex can be either:
/// - **Root**: The all-ancestral genotype; no parent, any number of children
/// - **Internal**: Introduces exactly one character on its incoming edge
/// - **Leaf**: One taxon; its incoming edge is the [terminal](EdgeLabel::Terminal) edge
///
/// # Invariants
/// - `index` is index in arena
/// - Internal vertices and leaves have `parent` set to the arena index of their parent
/// - Leaves have no children
#[derive(PartialEq, Debug, Clone)]
pub enum Vertex<C> {
    /// Root vertex of the tree
    Root {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Indices of the child vertices, in insertion order
        children: Vec<VertexIndex>,
    },
    /// Internal vertex, introducing one character
    Internal {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Index of the parent vertex
        parent: VertexIndex,
        /// Indices of the child vertices, in insertion order
        children: Vec<VertexIndex>,
        /// Character changing state on the incoming edge
        character: C,
    },
    /// Leaf vertex representing one taxon
    Leaf {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Index of the parent vertex
        parent: VertexIndex,
        /// Row of the taxon in the matrix
        taxon: TaxonIndex,
    },
}

impl<C> Vertex<C> {
    /// Creates a new root vertex without children.
    pub fn new_root(index: VertexIndex) -> Self {
        Vertex::Root {
            index,
            children: Vec::new(),
        }
    }

    /// Creates a new internal vertex without children.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `parent` - Index of the parent vertex
    /// * `character` - Character introduced on the incoming edge
    pub fn new_internal(index: VertexIndex, parent: VertexIndex, character: C) -> Self {
        Vertex::Internal {
            index,
            parent,
            children: Vec::new(),
            character,
        }
    }

    /// Creates a new leaf vertex.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `parent` - Index of the parent vertex
    /// * `taxon` - Taxon represented by the leaf
    pub fn new_leaf(index: VertexIndex, parent: VertexIndex, taxon: TaxonIndex) -> Self {
        Vertex::Leaf {
            index,
            parent,
            taxon,
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        match self {
            Vertex::Root { index, .. } => *index,
            Vertex::Internal { index, .. } => *index,
            Vertex::Leaf { index, .. } => *index,
        }
    }

    /// Returns the index of the parent, or `None` for the root.
    pub fn parent_index(&self) -> Option<VertexIndex> {
        match self {
            Vertex::Root { .. } => None,
            Vertex::Internal { parent, .. } | Vertex::Leaf { parent, .. } => Some(*parent),
        }
    }

    /// Returns the children, empty for leaves.
    pub fn children(&self) -> &[VertexIndex] {
        match self {
            Vertex::Root { children, .. } | Vertex::Internal { children, .. } => children,
            Vertex::Leaf { .. } => &[],
        }
    }

    /// Registers `child` as the last child of this vertex.
    ///
    /// # Panics
    /// Panics if called on a leaf.
    pub(crate) fn push_child(&mut self, child: VertexIndex) {
        match self {
            Vertex::Root { children, .. } | Vertex::Internal { children, .. } => children.push(child),
            Vertex::Leaf { .. } => panic!("Cannot add child to leaf vertex"),
        }
    }

    /// Returns the character if this is an internal vertex, else `None`.
    pub fn character(&self) -> Option<&C> {
        match self {
            Vertex::Internal { character, .. } => Some(character),
            _ => None,
        }
    }

    /// Returns the taxon if this is a leaf, else `None`.
    pub fn taxon(&self) -> Option<TaxonIndex> {
        match self {
            Vertex::Leaf { taxon, .. } => Some(*taxon),
            _ => None,
        }
    }

    /// Returns the label of the incoming edge, or `None` for the root.
    pub fn incoming_label(&self) -> Option<EdgeLabel<&C>> {
        match self {
            Vertex::Root { .. } => None,
            Vertex::Internal { character, .. } => Some(EdgeLabel::Character(character)),
            Vertex::Leaf { .. } => Some(EdgeLabel::Terminal),
        }
    }

    /// Returns `true` if this vertex is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Vertex::Leaf { .. })
    }

    /// Returns `true` if this vertex is an internal vertex.
    pub fn is_internal(&self) -> bool {
        matches!(self, Vertex::Internal { .. })
    }

    /// Returns `true` if this vertex is a root.
    pub fn is_root(&self) -> bool {
        matches!(self, Vertex::Root { .. })
    }

    /// Converts the character label, keeping structure and indices.
    pub(crate) fn map_character<D>(self, f: &mut impl FnMut(C) -> D) -> Vertex<D> {
        match self {
            Vertex::Root { index, children } => Vertex::Root { index, children },
            Vertex::Internal {
                index,
                parent,
                children,
                character,
            } => Vertex::Internal {
                index,
                parent,
                children,
                character: f(character),
            },
            Vertex::Leaf {
                index,
                parent,
                taxon,
            } => Vertex::Leaf {
                index,
                parent,
                taxon,
            },
        }
    }
}
