//! Seeded randomized checks of the decision procedures on synthetic matrices.

use perfphylo::compat::{Incompatibility, ThreeStateSolver, three_state, two_state};
use perfphylo::model::{CharacterMatrix, StateCount};
use perfphylo::synthetic::SyntheticMatrixBuilder;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const SEEDS: u64 = 60;

fn random_size(rng: &mut StdRng, max_characters: usize) -> (usize, usize) {
    (rng.random_range(3..=12), rng.random_range(2..=max_characters))
}

fn shuffled(rng: &mut StdRng, len: usize) -> Vec<usize> {
    let mut permutation: Vec<usize> = (0..len).collect();
    permutation.shuffle(rng);
    permutation
}

// --- TWO STATES ---
#[test]
fn test_two_state_compatible_matrices_are_accepted() {
    let mut rng = StdRng::seed_from_u64(11);
    for seed in 0..SEEDS {
        let (taxa, characters) = random_size(&mut rng, 10);
        let matrix = SyntheticMatrixBuilder::new(taxa, characters).with_seed(seed).build();

        let tree = two_state::decide(&matrix).unwrap().into_compatible().unwrap();
        assert!(tree.is_valid());
        assert!(tree.has_single_use_characters());
        assert_eq!(tree.num_leaves(), taxa);
        assert_eq!(tree.reconstruct_matrix(characters).unwrap(), matrix);
    }
}

#[test]
fn test_two_state_incompatible_matrices_are_rejected() {
    let mut rng = StdRng::seed_from_u64(12);
    for seed in 0..SEEDS {
        let (taxa, characters) = random_size(&mut rng, 10);
        let matrix = SyntheticMatrixBuilder::new(taxa, characters)
            .with_seed(seed)
            .incompatible()
            .build();

        let verdict = two_state::decide(&matrix).unwrap();
        let Some(Incompatibility::Conflict(conflict)) = verdict.incompatibility() else {
            panic!("matrix with planted crossing accepted:\n{matrix}");
        };
        assert!(conflict.taxon < taxa);
        assert!(conflict.character < characters);
    }
}

#[test]
fn test_verdict_ignores_row_and_column_order() {
    let mut rng = StdRng::seed_from_u64(13);
    for seed in 0..SEEDS {
        let (taxa, characters) = random_size(&mut rng, 8);
        let mut builder = SyntheticMatrixBuilder::new(taxa, characters).with_seed(seed);
        if seed % 2 == 1 {
            builder = builder.incompatible();
        }
        let matrix = builder.build();
        let expected = two_state::decide(&matrix).unwrap().is_compatible();

        let rows = matrix.with_rows_permuted(&shuffled(&mut rng, taxa)).unwrap();
        assert_eq!(two_state::decide(&rows).unwrap().is_compatible(), expected);

        let columns = matrix.with_columns_permuted(&shuffled(&mut rng, characters)).unwrap();
        assert_eq!(two_state::decide(&columns).unwrap().is_compatible(), expected);
    }
}

#[test]
fn test_more_taxa_never_restore_compatibility() {
    let mut rng = StdRng::seed_from_u64(14);
    for seed in 0..SEEDS {
        let (taxa, characters) = random_size(&mut rng, 8);
        let mut matrix = SyntheticMatrixBuilder::new(taxa, characters)
            .with_seed(seed)
            .incompatible()
            .build();
        let extra = SyntheticMatrixBuilder::new(rng.random_range(1..5), characters)
            .with_seed(seed + 1000)
            .build();

        matrix.append_rows(&extra).unwrap();
        assert!(!two_state::decide(&matrix).unwrap().is_compatible());
    }
}

#[test]
fn test_decisions_are_deterministic() {
    for seed in 0..SEEDS {
        let matrix = SyntheticMatrixBuilder::new(9, 7).with_seed(seed).build();
        assert_eq!(
            two_state::decide(&matrix).unwrap(),
            two_state::decide(&matrix).unwrap()
        );
    }
}

// --- THREE STATES ---
fn three_state_matrix(rng: &mut StdRng, seed: u64, incompatible: bool) -> CharacterMatrix {
    let (taxa, characters) = random_size(rng, 5);
    let builder = SyntheticMatrixBuilder::new(taxa, characters)
        .with_states(StateCount::Three)
        .with_seed(seed);
    if incompatible {
        builder.incompatible().build()
    } else {
        builder.build()
    }
}

#[test]
fn test_three_state_compatible_matrices_are_accepted() {
    let mut rng = StdRng::seed_from_u64(21);
    for seed in 0..SEEDS {
        let matrix = three_state_matrix(&mut rng, seed, false);

        let phylogeny = three_state::decide(&matrix).unwrap().into_compatible().unwrap();
        assert_eq!(phylogeny.models.len(), matrix.num_characters());
        assert!(phylogeny.tree.is_valid());
        assert!(phylogeny.tree.has_single_use_characters());
        assert_eq!(
            phylogeny.tree.reconstruct_matrix(matrix.num_characters()).unwrap(),
            matrix
        );
    }
}

#[test]
fn test_three_state_incompatible_matrices_are_rejected() {
    let mut rng = StdRng::seed_from_u64(22);
    for seed in 0..SEEDS {
        let matrix = three_state_matrix(&mut rng, seed, true);
        let expected_models = 3usize.pow(matrix.num_characters() as u32);

        assert_eq!(
            three_state::decide(&matrix).unwrap().incompatibility(),
            Some(&Incompatibility::NoCompatibleModel {
                models_tried: expected_models
            })
        );
    }
}

#[test]
fn test_parallel_search_matches_sequential() {
    let mut rng = StdRng::seed_from_u64(23);
    let parallel = ThreeStateSolver::new().with_parallel_search();
    for seed in 0..SEEDS {
        let matrix = three_state_matrix(&mut rng, seed, seed % 3 == 0);
        assert_eq!(
            parallel.solve(&matrix).unwrap(),
            three_state::decide(&matrix).unwrap()
        );
    }
}
