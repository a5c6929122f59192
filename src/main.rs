use anyhow::{Context, Result};
use clap::Parser;
use perfphylo::compat::{Incompatibility, ThreeStateSolver, two_state};
use perfphylo::model::TaxonLabelMap;
use perfphylo::newick::{NewickStyle, to_newick};
use perfphylo::parser::parse_file;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "perfphylo",
    version,
    about = "Decide whether character matrices admit a perfect phylogeny"
)]
struct Cli {
    /// Matrix files; a directory stands for all files in it
    #[arg(required = true, value_name = "PATH")]
    paths: Vec<PathBuf>,
    /// Number of states per character
    #[arg(short = 'n', long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(2..=3))]
    states: u8,
    /// Draw the tree of every compatible matrix
    #[arg(short, long)]
    draw: bool,
    /// Print the tree of every compatible matrix in Newick format
    #[arg(long)]
    newick: bool,
    /// Search three-state model assignments in parallel
    #[arg(long)]
    parallel: bool,
    /// Number of threads for the parallel search (default: all cores)
    #[arg(short = 'j', long, value_name = "N")]
    jobs: Option<usize>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Decides every matrix; returns `false` if some file could not be decided.
fn run(cli: &Cli) -> Result<bool> {
    if let Some(jobs) = cli.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .context("Failed to set up thread pool")?;
    }

    let files = expand_paths(&cli.paths)?;
    info!(num_files = files.len(), "deciding matrices");

    let mut all_ok = true;
    for file in &files {
        if let Err(err) = decide_file(cli, file) {
            error!("{err:#}");
            all_ok = false;
        }
    }
    Ok(all_ok)
}

/// Replaces each directory by the files in it, sorted by name.
fn expand_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut entries = fs::read_dir(path)
                .with_context(|| format!("Failed to read directory {}", path.display()))?
                .map(|entry| entry.map(|e| e.path()))
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("Failed to read directory {}", path.display()))?;
            entries.retain(|p| p.is_file());
            entries.sort();
            files.extend(entries);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

fn decide_file(cli: &Cli, file: &Path) -> Result<()> {
    let (matrix, labels) =
        parse_file(file).with_context(|| format!("Failed to parse {}", file.display()))?;
    let invalid = || format!("Invalid {}-state matrix {}", cli.states, file.display());

    if cli.states == 2 {
        let verdict = two_state::decide(&matrix).with_context(invalid)?;
        report(file, verdict.is_compatible());
        match verdict.compatible() {
            Some(tree) => {
                if cli.draw {
                    tree.print_tree(Some(&labels));
                }
                if cli.newick {
                    println!("{}", to_newick(tree, NewickStyle::Label, Some(&labels)));
                }
            }
            None => report_reason(cli, verdict.incompatibility(), &labels),
        }
    } else {
        let solver = if cli.parallel {
            ThreeStateSolver::new().with_parallel_search()
        } else {
            ThreeStateSolver::new()
        };
        let verdict = solver.solve(&matrix).with_context(invalid)?;
        report(file, verdict.is_compatible());
        match verdict.compatible() {
            Some(phylogeny) => {
                if cli.draw {
                    println!("Models: {}", phylogeny.models);
                    phylogeny.tree.print_tree(Some(&labels));
                }
                if cli.newick {
                    println!("{}", to_newick(&phylogeny.tree, NewickStyle::Label, Some(&labels)));
                }
            }
            None => report_reason(cli, verdict.incompatibility(), &labels),
        }
    }
    Ok(())
}

fn report(file: &Path, compatible: bool) {
    if compatible {
        println!("Matrix \"{}\" has a perfect phylogeny", file.display());
    } else {
        println!("Matrix \"{}\" does not have a perfect phylogeny", file.display());
    }
}

fn report_reason(cli: &Cli, reason: Option<&Incompatibility>, labels: &TaxonLabelMap) {
    if !cli.draw {
        return;
    }
    match reason {
        Some(Incompatibility::Conflict(conflict)) => println!(
            "Taxon {} needs character c{} on a second edge",
            labels.get_label(conflict.taxon).unwrap_or("?"),
            conflict.character + 1
        ),
        Some(reason) => println!("{reason}"),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_three_states() {
        let cli = Cli::try_parse_from(["perfphylo", "matrix.txt"]).unwrap();
        assert_eq!(cli.states, 3);
        assert!(!cli.parallel);
        assert_eq!(cli.jobs, None);
    }

    #[test]
    fn test_state_count_range() {
        let cli = Cli::try_parse_from(["perfphylo", "-n", "2", "a.txt", "b.txt"]).unwrap();
        assert_eq!(cli.states, 2);
        assert_eq!(cli.paths.len(), 2);

        assert!(Cli::try_parse_from(["perfphylo", "-n", "4", "a.txt"]).is_err());
        assert!(Cli::try_parse_from(["perfphylo", "-n", "3"]).is_err());
    }
}
