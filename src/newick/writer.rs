//! Newick format writing of compatibility trees.

use crate::model::character::StateChange;
use crate::model::leaf_label_map::TaxonLabelMap;
use crate::model::tree::{GenTree, VertexIndex};
use crate::newick::label::escape_label;
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Extra buffer in Newick string length/capacity estimate
const BUFFER_CHARS: usize = 10;

/// Style for serializing a tree to Newick format,
/// controlling how leaves are named in the output string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewickStyle {
    /// Use taxon names from the [TaxonLabelMap] (`t1, t2, ...` without one)
    #[default]
    Label,
    /// Use 0-based taxon indices (0, 1, 2, ...)
    ZeroIndexed,
    /// Use 1-based taxon indices (1, 2, 3, ...)
    OneIndexed,
}

/// Writes the given trees to a file in Newick format, one tree per line.
///
/// # Arguments
/// * `file` - The file to write to
/// * `trees` - Trees to write
/// * `style` - How leaves are named
/// * `label_map` - Taxon names, used with [NewickStyle::Label]
///
/// # Errors
/// Returns an I/O error if writing fails.
pub fn write_newick_file<C: StateChange>(
    file: File,
    trees: &[GenTree<C>],
    style: NewickStyle,
    label_map: Option<&TaxonLabelMap>,
) -> io::Result<()> {
    let mut writer = BufWriter::new(file);
    for tree in trees {
        writer.write_all(to_newick(tree, style, label_map).as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Returns the Newick representation of a compatibility tree with closing
/// semicolon.
///
/// Leaves are named per `style`. Every internal vertex is named by the
/// label of the character on its incoming edge; the root stays unnamed.
/// Children appear in insertion order.
///
/// # Arguments
/// * `tree` - The tree to convert
/// * `style` - The [NewickStyle] used to name leaves
/// * `label_map` - Taxon names, used with [NewickStyle::Label]
///
/// # Example
/// ```
/// use perfphylo::model::BinaryTree;
/// use perfphylo::newick::{NewickStyle, to_newick};
///
/// let mut tree = BinaryTree::new(2);
/// let root = tree.root_index();
/// let c0 = tree.add_internal(root, 0);
/// tree.add_leaf(c0, 0);
/// tree.add_leaf(root, 1);
///
/// assert_eq!(to_newick(&tree, NewickStyle::OneIndexed, None), "((1)c1,2);");
/// ```
pub fn to_newick<C: StateChange>(
    tree: &GenTree<C>,
    style: NewickStyle,
    label_map: Option<&TaxonLabelMap>,
) -> String {
    // Recursive helper for building the Newick string
    fn build_newick<C: StateChange>(
        tree: &GenTree<C>,
        newick: &mut String,
        index: VertexIndex,
        style: NewickStyle,
        label_map: Option<&TaxonLabelMap>,
    ) {
        let vertex = &tree[index];

        if let Some(taxon) = vertex.taxon() {
            match style {
                NewickStyle::Label => match label_map.and_then(|map| map.get_label(taxon)) {
                    Some(label) => newick.push_str(&escape_label(label)),
                    None => newick.push_str(&format!("t{}", taxon + 1)),
                },
                NewickStyle::ZeroIndexed => newick.push_str(&taxon.to_string()),
                NewickStyle::OneIndexed => newick.push_str(&(taxon + 1).to_string()),
            }
            return;
        }

        newick.push('(');
        for (i, &child) in vertex.children().iter().enumerate() {
            if i > 0 {
                newick.push(',');
            }
            build_newick(tree, newick, child, style, label_map);
        }
        newick.push(')');

        if let Some(character) = vertex.character() {
            newick.push_str(&escape_label(&character.display_label()));
        }
    }

    let mut newick = String::with_capacity(estimate_newick_len(tree, style, label_map));
    build_newick(tree, &mut newick, tree.root_index(), style, label_map);
    newick.push(';');
    newick
}

/// Estimates the length of the Newick string of `tree`, to pre-allocate.
fn estimate_newick_len<C>(tree: &GenTree<C>, style: NewickStyle, label_map: Option<&TaxonLabelMap>) -> usize {
    // "(" ")" and a label of a few characters per internal vertex
    const INTERNAL_VERTEX_CHARS: usize = 8;

    let structure = (tree.num_internal() + 1) * INTERNAL_VERTEX_CHARS;
    let digits = tree.num_taxa().max(1).to_string().len();
    let leaves = match (style, label_map) {
        (NewickStyle::Label, Some(map)) => map.labels().iter().map(|l| l.len() + 3).sum(),
        _ => tree.num_leaves() * (digits + 2),
    };
    structure + leaves + BUFFER_CHARS
}
