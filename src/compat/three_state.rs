//! Three-state reducer.
//!
//! Reduces a matrix with states {0, 1, 2} to two-state decisions, one per
//! [ModelAssignment], and accepts the first assignment whose encoded matrix
//! admits a perfect phylogeny. The search is exponential in the number of
//! characters.

use crate::compat::evolution_model::{ModelAssignment, ModelAssignments, count_assignments};
use crate::compat::two_state::decide_unchecked;
use crate::compat::{Incompatibility, Verdict};
use crate::model::matrix::{CharacterMatrix, MatrixError, StateCount};
use crate::model::tree::MultistateTree;
use rayon::prelude::*;
use tracing::{debug, info, warn};

// =#========================================================================#=
// SEARCH STRATEGY
// =#========================================================================#=
/// How the model assignments are searched.
///
/// Both strategies return the same result: the first accepted assignment
/// in enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    /// Try assignments one after another on the current thread (default)
    #[default]
    Sequential,
    /// Try assignments on the rayon thread pool, stopping once the first
    /// accepted assignment is known
    Parallel,
}

// =#========================================================================#=
// MULTISTATE PHYLOGENY
// =#========================================================================#=
/// Perfect phylogeny of a three-state matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct MultistatePhylogeny {
    /// Tree whose edges carry state transitions of original characters
    pub tree: MultistateTree,
    /// Accepted model of each character
    pub models: ModelAssignment,
}

// =#========================================================================#=
// THREE-STATE SOLVER
// =#========================================================================#=
/// Configurable solver for three-state matrices.
///
/// # Configuration Options
/// * **Search strategy**:
///   - [`with_parallel_search()`](Self::with_parallel_search) - Fan out over
///     the rayon thread pool
///   - [`with_search()`](Self::with_search) - Set a [SearchStrategy] explicitly
///
/// # Example
/// ```
/// use perfphylo::compat::ThreeStateSolver;
/// use perfphylo::model::CharacterMatrix;
///
/// let matrix = CharacterMatrix::from_rows(vec![
///     vec![1, 0],
///     vec![2, 2],
///     vec![2, 1],
///     vec![1, 1],
/// ])?;
///
/// let verdict = ThreeStateSolver::new().with_parallel_search().solve(&matrix)?;
/// let phylogeny = verdict.into_compatible().unwrap();
/// println!("Accepted models: {}", phylogeny.models);
/// # Ok::<(), perfphylo::model::MatrixError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreeStateSolver {
    search: SearchStrategy,
}

impl ThreeStateSolver {
    /// Creates a solver with sequential search.
    pub fn new() -> Self {
        Self::default()
    }

    /// Searches model assignments in parallel.
    pub fn with_parallel_search(self) -> Self {
        self.with_search(SearchStrategy::Parallel)
    }

    /// Sets the [SearchStrategy].
    pub fn with_search(mut self, search: SearchStrategy) -> Self {
        self.search = search;
        self
    }

    /// Returns the configured [SearchStrategy].
    pub fn search(&self) -> SearchStrategy {
        self.search
    }

    /// Decides whether a three-state `matrix` admits a perfect phylogeny.
    ///
    /// # Returns
    /// * [Verdict::Compatible] with the tree of the first accepted model
    ///   assignment, edges labeled by state transitions
    /// * [Verdict::Incompatible] with
    ///   [NoCompatibleModel](Incompatibility::NoCompatibleModel) otherwise
    ///
    /// # Errors
    /// [MatrixError::StateOutOfRange] if the matrix contains states above 2.
    pub fn solve(&self, matrix: &CharacterMatrix) -> Result<Verdict<MultistatePhylogeny>, MatrixError> {
        matrix.validate(StateCount::Three)?;

        let num_characters = matrix.num_characters();
        let found = match (self.search, count_assignments(num_characters)) {
            (SearchStrategy::Parallel, Some(total)) => (0..total)
                .into_par_iter()
                .find_map_first(|rank| try_model(matrix, ModelAssignment::from_rank(rank, num_characters))),
            (SearchStrategy::Parallel, None) => {
                warn!(num_characters, "too many model assignments to rank, searching sequentially");
                search_sequential(matrix)
            }
            (SearchStrategy::Sequential, _) => search_sequential(matrix),
        };

        Ok(match found {
            Some(phylogeny) => {
                info!(models = %phylogeny.models, "accepted model assignment");
                Verdict::Compatible(phylogeny)
            }
            None => {
                // Only reached after the whole enumeration, so the count fits
                let models_tried = count_assignments(num_characters).unwrap_or(usize::MAX);
                Verdict::Incompatible(Incompatibility::NoCompatibleModel { models_tried })
            }
        })
    }
}

/// Decides whether a three-state `matrix` admits a perfect phylogeny,
/// searching model assignments sequentially.
///
/// See [`ThreeStateSolver::solve`].
pub fn decide(matrix: &CharacterMatrix) -> Result<Verdict<MultistatePhylogeny>, MatrixError> {
    ThreeStateSolver::new().solve(matrix)
}

fn search_sequential(matrix: &CharacterMatrix) -> Option<MultistatePhylogeny> {
    ModelAssignments::new(matrix.num_characters()).find_map(|models| try_model(matrix, models))
}

/// Runs the two-state decision on `matrix` encoded under `models`.
fn try_model(matrix: &CharacterMatrix, models: ModelAssignment) -> Option<MultistatePhylogeny> {
    let binary = models.encode(matrix);
    match decide_unchecked(&binary) {
        Verdict::Compatible(tree) => {
            let tree = tree.map_characters(|column| models.transition(column));
            Some(MultistatePhylogeny { tree, models })
        }
        Verdict::Incompatible(reason) => {
            debug!(models = %models, %reason, "model assignment rejected");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::EvolutionModel::*;

    fn matrix(rows: Vec<Vec<u8>>) -> CharacterMatrix {
        CharacterMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_first_model_accepted() {
        let m = matrix(vec![vec![1, 0], vec![2, 2], vec![2, 1], vec![1, 1]]);
        let phylogeny = decide(&m).unwrap().into_compatible().unwrap();
        assert_eq!(phylogeny.models.models(), &[Linear12, Linear12]);
    }

    #[test]
    fn test_no_model_fits_crossing_characters() {
        let m = matrix(vec![vec![0, 1], vec![1, 0], vec![1, 1]]);
        let verdict = decide(&m).unwrap();
        assert_eq!(
            verdict.incompatibility(),
            Some(&Incompatibility::NoCompatibleModel { models_tried: 9 })
        );
    }

    #[test]
    fn test_rejects_out_of_range_state() {
        let m = matrix(vec![vec![3]]);
        assert!(decide(&m).is_err());
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let m = matrix(vec![vec![1, 2, 0], vec![2, 1, 1], vec![0, 1, 2], vec![2, 0, 1]]);
        let sequential = ThreeStateSolver::new().solve(&m).unwrap();
        let parallel = ThreeStateSolver::new().with_parallel_search().solve(&m).unwrap();
        assert_eq!(sequential, parallel);
    }
}
