//! Perfphylo decides whether a character matrix admits a perfect phylogeny.
//!
//! A perfect phylogeny is a rooted tree in which every taxon (matrix row) is
//! a leaf and every derived state of a character (matrix column) arises on
//! exactly one edge. Characters never revert and never arise twice.
//! Core functionality provided:
//! - Two-state matrices (states {0, 1}): Decided directly by growing a
//!   compatibility tree one taxon at a time. See [compat::two_state].
//! - Three-state matrices (states {0, 1, 2}): Each character evolves under
//!   one of three models (`0→1→2`, `0→2→1`, `0→1, 0→2`); every assignment of
//!   models reduces the matrix to a two-state one. The first assignment that
//!   admits a perfect phylogeny wins. See [compat::ThreeStateSolver].
//! - Witness trees: A compatible verdict carries the tree, with characters
//!   (or state transitions) on its edges, and the reason otherwise.
//!   See [crate::model] for the tree model and [crate::newick] for output.
//! - Matrix files: Whitespace-delimited text, one taxon per line, with
//!   optional taxon names. See [crate::parser].
//! - Synthetic matrices with known answer for tests and benchmarks. See
//!   [crate::synthetic].
//!
//! Limitations:
//! - At most three states per character
//! - Three-state search tries up to `3^c` model assignments for `c` characters
//!
//! # Usage patterns
//! 1. The quick API below decides a matrix file or string with default settings.
//! 2. Configure a [ThreeStateSolver](compat::ThreeStateSolver) for parallel
//!    model search, or call [compat::two_state::decide] on a
//!    [CharacterMatrix](model::CharacterMatrix) directly.
//!
//! ## Example
//! ```
//! use perfphylo::compat::Incompatibility;
//! use perfphylo::decide_two_state_str;
//!
//! let verdict = decide_two_state_str("1 1 0\n0 0 1\n0 0 0\n").unwrap();
//! assert!(verdict.is_compatible());
//!
//! let verdict = decide_two_state_str("1 0\n0 1\n1 1\n").unwrap();
//! assert!(matches!(verdict.incompatibility(), Some(Incompatibility::Conflict(_))));
//! ```
//!
//! ## Example Solver Configuration
//! ```
//! use perfphylo::compat::ThreeStateSolver;
//! use perfphylo::newick::{NewickStyle, to_newick};
//! use perfphylo::parser::parse_str;
//!
//! let (matrix, labels) = parse_str("a 1 0\nb 2 2\nc 2 1\nd 1 1\n")?;
//! let verdict = ThreeStateSolver::new().with_parallel_search().solve(&matrix)?;
//!
//! if let Some(phylogeny) = verdict.compatible() {
//!     println!("{}", to_newick(&phylogeny.tree, NewickStyle::Label, Some(&labels)));
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod compat;
pub mod model;
pub mod newick;
pub mod parser;
pub mod synthetic;

use crate::compat::{MultistatePhylogeny, Verdict};
use crate::model::BinaryTree;
use crate::parser::ParsingError;
use std::path::Path;
use thiserror::Error;

pub use crate::compat::ThreeStateSolver;
pub use crate::model::{CharacterMatrix, MatrixError, StateCount, TaxonLabelMap};

/// Error of the quick API: the input could not be read or is not a valid
/// matrix for the requested number of states.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Parsing(#[from] ParsingError),
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

// ============================================================================
// QUICK API (pub)
// ============================================================================
/// Parses the two-state matrix file at `path` and decides it.
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
///
/// # Errors
/// [Error::Parsing] if reading or parsing fails, [Error::Matrix] if the
/// matrix has states other than 0 and 1.
///
/// # Example
/// ```no_run
/// use perfphylo::decide_two_state_file;
///
/// let verdict = decide_two_state_file("matrix.txt")?;
/// println!("Perfect phylogeny: {}", verdict.is_compatible());
/// # Ok::<(), perfphylo::Error>(())
/// ```
pub fn decide_two_state_file<P: AsRef<Path>>(path: P) -> Result<Verdict<BinaryTree>, Error> {
    let (matrix, _) = parser::parse_file(path)?;
    Ok(compat::two_state::decide(&matrix)?)
}

/// Parses a two-state matrix from a string and decides it.
///
/// See [decide_two_state_file].
pub fn decide_two_state_str(input: &str) -> Result<Verdict<BinaryTree>, Error> {
    let (matrix, _) = parser::parse_str(input)?;
    Ok(compat::two_state::decide(&matrix)?)
}

/// Parses the three-state matrix file at `path` and decides it with a
/// sequential model search.
///
/// # Errors
/// [Error::Parsing] if reading or parsing fails, [Error::Matrix] if the
/// matrix has states above 2.
pub fn decide_three_state_file<P: AsRef<Path>>(path: P) -> Result<Verdict<MultistatePhylogeny>, Error> {
    let (matrix, _) = parser::parse_file(path)?;
    Ok(compat::three_state::decide(&matrix)?)
}

/// Parses a three-state matrix from a string and decides it with a
/// sequential model search.
///
/// See [decide_three_state_file].
pub fn decide_three_state_str(input: &str) -> Result<Verdict<MultistatePhylogeny>, Error> {
    let (matrix, _) = parser::parse_str(input)?;
    Ok(compat::three_state::decide(&matrix)?)
}
