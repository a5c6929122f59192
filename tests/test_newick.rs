use perfphylo::compat::{ThreeStateSolver, two_state};
use perfphylo::newick::{NewickStyle, escape_label, to_newick, write_newick_file};
use perfphylo::parser::parse_str;
use std::fs::{self, File};

// --- TREES FROM MATRICES ---
#[test]
fn test_binary_tree_styles() {
    let (matrix, labels) = parse_str("kiwi 1 1 0\ntakahe 0 0 1\nkea 0 0 0\n").unwrap();
    let tree = two_state::decide(&matrix).unwrap().into_compatible().unwrap();

    assert_eq!(
        to_newick(&tree, NewickStyle::Label, Some(&labels)),
        "(((kiwi)c2)c1,(takahe)c3,kea);"
    );
    assert_eq!(to_newick(&tree, NewickStyle::ZeroIndexed, None), "(((0)c2)c1,(1)c3,2);");
    assert_eq!(to_newick(&tree, NewickStyle::OneIndexed, None), "(((1)c2)c1,(2)c3,3);");
}

#[test]
fn test_multistate_tree_labels() {
    let (matrix, labels) = parse_str("a 1 0\nb 2 2\nc 2 1\nd 1 1\n").unwrap();
    let phylogeny = ThreeStateSolver::new()
        .solve(&matrix)
        .unwrap()
        .into_compatible()
        .unwrap();

    assert_eq!(
        to_newick(&phylogeny.tree, NewickStyle::Label, Some(&labels)),
        "((a,(((b)'c2:1>2',c)'c1:1>2',d)'c2:0>1')'c1:0>1');"
    );
}

#[test]
fn test_single_taxon() {
    let (matrix, _) = parse_str("1 1\n").unwrap();
    let tree = two_state::decide(&matrix).unwrap().into_compatible().unwrap();
    assert_eq!(to_newick(&tree, NewickStyle::OneIndexed, None), "(((1)c2)c1);");
}

// --- LABEL ESCAPING ---
#[test]
fn test_escape_label() {
    assert_eq!(escape_label("Pukeko"), "Pukeko");
    assert_eq!(escape_label("Pu[ke]ko"), "'Pu[ke]ko'");
    assert_eq!(escape_label("Australasian Swamphen"), "Australasian_Swamphen");
    assert_eq!(escape_label("'Australasian Swamphen'"), "'Australasian Swamphen'");
    assert_eq!(escape_label("c1:0>2"), "'c1:0>2'");
}

#[test]
fn test_quoted_taxon_names() {
    let (matrix, labels) = parse_str("Baillon's_crake 1\nweka 0\n").unwrap();
    let tree = two_state::decide(&matrix).unwrap().into_compatible().unwrap();
    assert_eq!(
        to_newick(&tree, NewickStyle::Label, Some(&labels)),
        "(('Baillon''s_crake')c1,weka);"
    );
}

// --- FILES ---
#[test]
fn test_write_newick_file() {
    let (first, _) = parse_str("1 0\n0 1\n").unwrap();
    let (second, _) = parse_str("1 1\n0 0\n").unwrap();
    let trees = vec![
        two_state::decide(&first).unwrap().into_compatible().unwrap(),
        two_state::decide(&second).unwrap().into_compatible().unwrap(),
    ];

    let path = std::env::temp_dir().join(format!("perfphylo_newick_{}.nwk", std::process::id()));
    write_newick_file(File::create(&path).unwrap(), &trees, NewickStyle::OneIndexed, None).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(written, "((1)c1,(2)c2);\n(((1)c2)c1,2);\n");
}
