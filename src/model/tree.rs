//! Provides the compatibility tree representation.
//!
//! Provides core data structures for representing perfect phylogenies:
//! * [`GenTree<C>`] - Main tree structure using the arena pattern,
//!   generic over the label of the characters on its edges.
//! * [BinaryTree] as realization with [CharacterIndex] (two-state)
//! * [MultistateTree] as realization with [StateTransition] (three-state)
//! * [VertexIndex] as type used to index vertices in tree

use crate::model::character::{CharacterIndex, EdgeLabel, State, StateChange, StateTransition, TaxonIndex};
use crate::model::leaf_label_map::TaxonLabelMap;
use crate::model::matrix::CharacterMatrix;
use crate::model::vertex::Vertex;
use std::collections::HashSet;
use std::hash::Hash;

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

/// Index of the root, which is always the first vertex in the arena.
pub const ROOT_INDEX: VertexIndex = 0;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A rooted compatibility tree represented using the arena pattern
/// on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by
/// [VertexIndex]. The root is created with the tree and always has index
/// [ROOT_INDEX]; every further vertex is appended below an existing one, so
/// parents always precede their children in the arena.
///
/// Generic over `C`, the label of the character introduced by the incoming
/// edge of an internal vertex (e.g. [CharacterIndex] or [StateTransition]).
///
/// # Structure
/// - The root represents the all-ancestral genotype.
/// - Each internal vertex introduces exactly one character.
/// - Each leaf represents one taxon and hangs below the vertex matching its
///   genotype via a [terminal](EdgeLabel::Terminal) edge.
/// - In a perfect phylogeny, no character labels more than one edge
///   (see [`GenTree::has_single_use_characters()`]).
///
/// # Example
/// ```
/// use perfphylo::model::BinaryTree;
///
/// // Taxon 0 has character 0, taxon 1 has characters 0 and 1
/// let mut tree = BinaryTree::new(2);
/// let c0 = tree.add_internal(tree.root_index(), 0);
/// tree.add_leaf(c0, 0);
/// let c1 = tree.add_internal(c0, 1);
/// tree.add_leaf(c1, 1);
///
/// assert!(tree.is_valid());
/// assert_eq!(tree.genotype(1, 2), Some(vec![1, 1]));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GenTree<C> {
    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex<C>>,

    /// Leaf of each taxon, once attached
    leaves: Vec<Option<VertexIndex>>,
}

// Convenient type aliases
/// Tree of a two-state matrix, edges labeled by character index.
pub type BinaryTree = GenTree<CharacterIndex>;

/// Tree of a three-state matrix, edges labeled by state transitions.
pub type MultistateTree = GenTree<StateTransition>;

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl<C> GenTree<C> {
    /// Creates a tree consisting only of the root, ready to hold `num_taxa` taxa.
    pub fn new(num_taxa: usize) -> Self {
        let mut vertices = Vec::with_capacity(2 * num_taxa + 1);
        vertices.push(Vertex::new_root(ROOT_INDEX));
        GenTree {
            vertices,
            leaves: vec![None; num_taxa],
        }
    }

    /// Adds an internal vertex below `parent`, introducing `character` on the new edge.
    ///
    /// # Returns
    /// The index of the newly created internal vertex.
    ///
    /// # Panics
    /// Panics if `parent` is out of bounds or a leaf.
    pub fn add_internal(&mut self, parent: VertexIndex, character: C) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices[parent].push_child(index);
        self.vertices.push(Vertex::new_internal(index, parent, character));
        index
    }

    /// Attaches the leaf of `taxon` below `parent` via a terminal edge.
    ///
    /// # Returns
    /// The index of the newly created leaf.
    ///
    /// # Panics
    /// Panics if `parent` is out of bounds or a leaf, if `taxon` is out of
    /// bounds, or if `taxon` already has a leaf.
    pub fn add_leaf(&mut self, parent: VertexIndex, taxon: TaxonIndex) -> VertexIndex {
        assert!(self.leaves[taxon].is_none(), "Taxon {taxon} already attached");
        let index = self.vertices.len();
        self.vertices[parent].push_child(index);
        self.vertices.push(Vertex::new_leaf(index, parent, taxon));
        self.leaves[taxon] = Some(index);
        index
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> VertexIndex {
        ROOT_INDEX
    }

    /// Returns a reference to the root vertex.
    pub fn root(&self) -> &Vertex<C> {
        &self.vertices[ROOT_INDEX]
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex<C> {
        &self[index]
    }

    /// Returns the children of the vertex at `index`.
    pub fn children(&self, index: VertexIndex) -> &[VertexIndex] {
        self[index].children()
    }

    /// Returns the first child of `index` whose incoming edge carries a
    /// character satisfying `predicate`.
    pub fn child_with_character(
        &self,
        index: VertexIndex,
        mut predicate: impl FnMut(&C) -> bool,
    ) -> Option<VertexIndex> {
        self.children(index)
            .iter()
            .copied()
            .find(|&child| self[child].character().is_some_and(&mut predicate))
    }

    /// Returns the leaf of `taxon`, or `None` if not attached (yet).
    pub fn leaf_of(&self, taxon: TaxonIndex) -> Option<VertexIndex> {
        self.leaves.get(taxon).copied().flatten()
    }

    /// Returns the number of taxa this tree was created for.
    pub fn num_taxa(&self) -> usize {
        self.leaves.len()
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.vertices.iter().filter(|&v| v.is_leaf()).count()
    }

    /// Returns the number of internal vertices, i.e. of character edges.
    pub fn num_internal(&self) -> usize {
        self.vertices.iter().filter(|&v| v.is_internal()).count()
    }

    /// Returns the number of vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the vertex indices from `index` up to and including the root.
    pub fn path_to_root(&self, index: VertexIndex) -> Vec<VertexIndex> {
        let mut path = vec![index];
        let mut current = index;
        while let Some(parent) = self[current].parent_index() {
            path.push(parent);
            current = parent;
        }
        path
    }

    /// Returns an iterator over all edges as `(parent, child, label)`.
    pub fn edges(&self) -> impl Iterator<Item = (VertexIndex, VertexIndex, EdgeLabel<&C>)> {
        self.vertices.iter().filter_map(|v| {
            let parent = v.parent_index()?;
            let label = v.incoming_label()?;
            Some((parent, v.index(), label))
        })
    }

    /// Returns an iterator over the characters of all non-terminal edges.
    pub fn characters(&self) -> impl Iterator<Item = &C> {
        self.vertices.iter().filter_map(|v| v.character())
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - The first vertex is the only root
    /// - All vertex indices match their position in the arena
    /// - All child indices are valid and point back to correct parent
    /// - Parents precede their children in the arena (so there are no cycles)
    /// - Each attached taxon has exactly the leaf recorded for it
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        if !self.vertices.first().is_some_and(|v| v.is_root()) {
            return false;
        }

        let mut num_leaves = 0;
        for (index, vertex) in self.vertices.iter().enumerate() {
            if vertex.index() != index {
                return false;
            }

            if vertex.is_root() != (index == ROOT_INDEX) {
                return false;
            }

            for &child in vertex.children() {
                if child <= index || child >= self.vertices.len() {
                    return false;
                }
                if self.vertices[child].parent_index() != Some(index) {
                    return false;
                }
            }

            if let Some(parent) = vertex.parent_index() {
                if parent >= index || !self.vertices[parent].children().contains(&index) {
                    return false;
                }
            }

            if let Some(taxon) = vertex.taxon() {
                num_leaves += 1;
                if self.leaf_of(taxon) != Some(index) {
                    return false;
                }
            }
        }

        num_leaves == self.leaves.iter().filter(|leaf| leaf.is_some()).count()
    }

    /// Converts every character label with `f`, keeping the tree structure.
    pub fn map_characters<D>(self, mut f: impl FnMut(C) -> D) -> GenTree<D> {
        GenTree {
            vertices: self
                .vertices
                .into_iter()
                .map(|v| v.map_character(&mut f))
                .collect(),
            leaves: self.leaves,
        }
    }

    /// Returns an iterator over the tree in pre-order (parents before children).
    ///
    /// Children are visited in insertion order.
    pub fn pre_order_iter(&self) -> PreOrderIter<'_, C> {
        PreOrderIter::new(self)
    }

    /// Returns an iterator over the tree in post-order (children before parents).
    pub fn post_order_iter(&self) -> PostOrderIter<'_, C> {
        PostOrderIter::new(self)
    }
}

impl<C: Eq + Hash> GenTree<C> {
    /// Returns `true` if no character labels more than one edge,
    /// the defining property of a perfect phylogeny.
    pub fn has_single_use_characters(&self) -> bool {
        let mut seen = HashSet::new();
        self.characters().all(|c| seen.insert(c))
    }
}

impl<C: StateChange> GenTree<C> {
    /// Replays the path from the root to the leaf of `taxon` and returns the
    /// reconstructed row of `num_characters` states.
    ///
    /// # Returns
    /// `None` if `taxon` has no leaf.
    pub fn genotype(&self, taxon: TaxonIndex, num_characters: usize) -> Option<Vec<State>> {
        let leaf = self.leaf_of(taxon)?;
        let mut row = vec![0; num_characters];
        for index in self.path_to_root(leaf).into_iter().rev() {
            if let Some(character) = self[index].character() {
                character.apply(&mut row);
            }
        }
        Some(row)
    }

    /// Reconstructs the full matrix from the root-to-leaf paths of all taxa.
    ///
    /// # Returns
    /// `None` if some taxon has no leaf.
    pub fn reconstruct_matrix(&self, num_characters: usize) -> Option<CharacterMatrix> {
        let rows = (0..self.num_taxa())
            .map(|taxon| self.genotype(taxon, num_characters))
            .collect::<Option<Vec<_>>>()?;
        let mut matrix = CharacterMatrix::zeros(rows.len(), num_characters);
        for (taxon, row) in rows.iter().enumerate() {
            for (character, &state) in row.iter().enumerate() {
                matrix.set(taxon, character, state);
            }
        }
        Some(matrix)
    }
}

impl<C> std::ops::Index<VertexIndex> for GenTree<C> {
    type Output = Vertex<C>;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

// ============================================================================
// Printing (pub)
// ============================================================================
impl<C: StateChange> GenTree<C> {
    /// Returns a visual representation of the tree.
    ///
    /// # Arguments
    /// * `label_map` - Optional label map to show taxon names
    ///
    /// # Example Output
    /// ```text
    /// Compatibility tree with 3 taxa (7 vertices total):
    /// [0] Root
    ///   ├─ c1 ─ [1] Internal
    ///   │   └─ c2 ─ [2] Internal
    ///   │       └─ [3] Leaf "t1"
    ///   ├─ c3 ─ [4] Internal
    ///   │   └─ [5] Leaf "t2"
    ///   └─ [6] Leaf "t3"
    /// ```
    pub fn format_tree(&self, label_map: Option<&TaxonLabelMap>) -> String {
        let mut out = format!(
            "Compatibility tree with {} taxa ({} vertices total):\n",
            self.num_taxa(),
            self.vertices.len()
        );
        out.push_str("[0] Root\n");

        let children = self.children(ROOT_INDEX);
        for (i, &child) in children.iter().enumerate() {
            self.format_vertex(&mut out, child, "  ", i + 1 == children.len(), label_map);
        }
        out
    }

    /// Prints a visual representation of the tree to the console.
    ///
    /// See [`GenTree::format_tree`].
    pub fn print_tree(&self, label_map: Option<&TaxonLabelMap>) {
        print!("{}", self.format_tree(label_map));
    }

    fn format_vertex(
        &self,
        out: &mut String,
        index: VertexIndex,
        prefix: &str,
        is_last: bool,
        label_map: Option<&TaxonLabelMap>,
    ) {
        let connector = if is_last { "└─ " } else { "├─ " };
        match &self[index] {
            Vertex::Leaf { taxon, .. } => {
                let name = label_map
                    .and_then(|map| map.get_label(*taxon))
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("t{}", taxon + 1));
                out.push_str(&format!("{prefix}{connector}[{index}] Leaf \"{name}\"\n"));
            }
            vertex => {
                let label = vertex.character().map(|c| c.display_label()).unwrap_or_default();
                out.push_str(&format!("{prefix}{connector}{label} ─ [{index}] Internal\n"));

                let new_prefix = format!("{prefix}{}   ", if is_last { " " } else { "│" });
                let children = vertex.children();
                for (i, &child) in children.iter().enumerate() {
                    self.format_vertex(out, child, &new_prefix, i + 1 == children.len(), label_map);
                }
            }
        }
    }
}

// =#========================================================================#=
// ITERATORS
// =#========================================================================#=
/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
pub struct PreOrderIter<'a, C> {
    tree: &'a GenTree<C>,
    stack: Vec<VertexIndex>,
}

impl<'a, C> PreOrderIter<'a, C> {
    fn new(tree: &'a GenTree<C>) -> Self {
        PreOrderIter {
            tree,
            stack: vec![ROOT_INDEX],
        }
    }
}

impl<'a, C> Iterator for PreOrderIter<'a, C> {
    type Item = &'a Vertex<C>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree[index];

        // Reverse, so first child is processed first
        self.stack.extend(vertex.children().iter().rev());

        Some(vertex)
    }
}

/// Iterator for post-order traversal (children before parents).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
pub struct PostOrderIter<'a, C> {
    tree: &'a GenTree<C>,
    stack: Vec<(VertexIndex, bool)>, // (index, children_visited)
}

impl<'a, C> PostOrderIter<'a, C> {
    fn new(tree: &'a GenTree<C>) -> Self {
        PostOrderIter {
            tree,
            stack: vec![(ROOT_INDEX, false)],
        }
    }
}

impl<'a, C> Iterator for PostOrderIter<'a, C> {
    type Item = &'a Vertex<C>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let vertex = &self.tree[index];

            if children_visited || vertex.children().is_empty() {
                return Some(vertex);
            }

            self.stack.push((index, true));
            self.stack
                .extend(vertex.children().iter().rev().map(|&child| (child, false)));
        }
        None
    }
}
