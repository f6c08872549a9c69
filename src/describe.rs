//! Pedigree descriptors as labeled tables.
//!
//! Except for the generational depth variance, the numbers come from a
//! `PedigreeEngine`; these functions resolve default probands and ancestors,
//! check the shape of what the engine returns and label it.

use crate::error::{GenealogyError, Result};
use crate::generations::GenerationalVariance;
use crate::prelude::*;
use crate::table::labels;
use ndarray::{Array2, Axis};
use tracing::debug;

/// A descriptor averaged over probands, or one row per proband.
#[derive(Debug, Clone, PartialEq)]
pub enum Summary {
    Mean(f64),
    PerIndividual(Table),
}

fn check_len<T>(values: Vec<T>, expected: usize, what: &str) -> Result<Vec<T>> {
    if values.len() != expected {
        return Err(GenealogyError::Engine(format!(
            "{} values returned for {} {}",
            values.len(),
            expected,
            what
        )));
    }
    Ok(values)
}

fn check_dim<T>(data: &Array2<T>, expected: (Option<usize>, usize), what: &str) -> Result<()> {
    let (rows, cols) = data.dim();
    if expected.0.map_or(false, |x| x != rows) || cols != expected.1 {
        return Err(GenealogyError::Engine(format!(
            "{}x{} matrix returned for {} {}",
            rows, cols, expected.1, what
        )));
    }
    Ok(())
}

fn generation_labels(generations: usize) -> Vec<String> {
    (0..generations).map(|g| g.to_string()).collect()
}

fn keep_generations(table: Table, generations: &Option<Vec<usize>>) -> Result<Table> {
    match generations {
        Some(generations) => table.select_rows(generations),
        None => Ok(table),
    }
}

fn by_proband(data: Array2<f64>, probands: &[IndividualId]) -> Result<Table> {
    check_dim(&data, (None, probands.len()), "probands")?;
    Table::new(generation_labels(data.nrows()), labels(probands), data)
}

fn sample_variance(data: Array2<f64>, probands: &[IndividualId], column: &str) -> Result<Table> {
    if probands.len() < 2 {
        return Err(GenealogyError::InvalidInput(format!(
            "sample variance needs at least two probands, got {}",
            probands.len()
        )));
    }
    check_dim(&data, (None, probands.len()), "probands")?;
    let variances = data.var_axis(Axis(1), 1.0);
    Table::from_column(generation_labels(variances.len()), column, variances.to_vec())
}

pub fn min_path_lengths<E: PedigreeEngine + ?Sized>(
    engine: &E,
    pedigree: &Pedigree,
    individuals: &[IndividualId],
) -> Result<Table> {
    let minima = engine.min_ancestor_path_lengths(pedigree, individuals)?;
    let minima = check_len(minima, individuals.len(), "individuals")?;
    Table::from_row(
        "min",
        labels(individuals),
        minima.into_iter().map(f64::from).collect(),
    )
}

pub fn mean_path_lengths<E: PedigreeEngine + ?Sized>(
    engine: &E,
    pedigree: &Pedigree,
    individuals: &[IndividualId],
) -> Result<Table> {
    let means = engine.mean_ancestor_path_lengths(pedigree, individuals)?;
    let means = check_len(means, individuals.len(), "individuals")?;
    Table::from_row("mean", labels(individuals), means)
}

pub fn max_path_lengths<E: PedigreeEngine + ?Sized>(
    engine: &E,
    pedigree: &Pedigree,
    individuals: &[IndividualId],
) -> Result<Table> {
    let maxima = engine.max_ancestor_path_lengths(pedigree, individuals)?;
    let maxima = check_len(maxima, individuals.len(), "individuals")?;
    Table::from_row(
        "max",
        labels(individuals),
        maxima.into_iter().map(f64::from).collect(),
    )
}

/// Expected genealogical depth of the probands.
pub fn mean_gen_depth<E: PedigreeEngine + ?Sized>(
    engine: &E,
    pedigree: &Pedigree,
    options: &DescribeOptions,
) -> Result<Summary> {
    let probands = options.resolve_probands(pedigree);
    let depths = engine.mean_pedigree_depths(pedigree, &probands)?;
    let depths = check_len(depths, probands.len(), "probands")?;

    match options.mode {
        ResultMode::Mean => {
            if depths.is_empty() {
                return Err(GenealogyError::InvalidInput(
                    "no probands to average over".into(),
                ));
            }
            Ok(Summary::Mean(
                depths.iter().sum::<f64>() / depths.len() as f64,
            ))
        }
        ResultMode::PerIndividual => Ok(Summary::PerIndividual(Table::from_column(
            labels(&probands),
            "Exp.Gen.Depth",
            depths,
        )?)),
    }
}

/// Variance of genealogical depth, see `generations`.
///
/// Needs no engine: the pedigree is walked directly.
pub fn mean_gen_depth_var(pedigree: &Pedigree, options: &DescribeOptions) -> Result<Summary> {
    let probands = options.resolve_probands(pedigree);
    debug!(probands = probands.len(), mode = ?options.mode, "depth variance");

    match options.mode {
        ResultMode::Mean => Ok(Summary::Mean(
            pedigree.generational_variance(Some(&probands))?,
        )),
        ResultMode::PerIndividual => {
            let (index, variances): (Vec<IndividualId>, Vec<f64>) = pedigree
                .generational_variance_by_individual(&probands)?
                .into_iter()
                .unzip();
            Ok(Summary::PerIndividual(Table::from_column(
                labels(&index),
                "Mean.Gen.Depth",
                variances,
            )?))
        }
    }
}

/// Completeness per generation, as a `mean` column or one column per proband.
pub fn completeness<E: PedigreeEngine + ?Sized>(
    engine: &E,
    pedigree: &Pedigree,
    options: &DescribeOptions,
) -> Result<Table> {
    let probands = options.resolve_probands(pedigree);
    let table = match options.mode {
        ResultMode::Mean => {
            let values = engine.mean_completeness(pedigree, &probands)?;
            Table::from_column(generation_labels(values.len()), "mean", values)?
        }
        ResultMode::PerIndividual => {
            by_proband(engine.individual_completeness(pedigree, &probands)?, &probands)?
        }
    };
    keep_generations(table, &options.generations)
}

/// Sample variance (ddof 1) of completeness across probands, per generation.
pub fn completeness_var<E: PedigreeEngine + ?Sized>(
    engine: &E,
    pedigree: &Pedigree,
    options: &DescribeOptions,
) -> Result<Table> {
    let probands = options.resolve_probands(pedigree);
    let data = engine.individual_completeness(pedigree, &probands)?;
    let table = sample_variance(data, &probands, "completeness.var")?;
    keep_generations(table, &options.generations)
}

pub fn implex<E: PedigreeEngine + ?Sized>(
    engine: &E,
    pedigree: &Pedigree,
    options: &DescribeOptions,
) -> Result<Table> {
    let probands = options.resolve_probands(pedigree);
    let table = match options.mode {
        ResultMode::Mean => {
            let values = engine.mean_implex(pedigree, &probands, options.only_new_ancestors)?;
            Table::from_column(generation_labels(values.len()), "mean", values)?
        }
        ResultMode::PerIndividual => by_proband(
            engine.individual_implex(pedigree, &probands, options.only_new_ancestors)?,
            &probands,
        )?,
    };
    keep_generations(table, &options.generations)
}

/// Sample variance (ddof 1) of implex across probands, per generation.
pub fn implex_var<E: PedigreeEngine + ?Sized>(
    engine: &E,
    pedigree: &Pedigree,
    options: &DescribeOptions,
) -> Result<Table> {
    let probands = options.resolve_probands(pedigree);
    let data = engine.individual_implex(pedigree, &probands, options.only_new_ancestors)?;
    let table = sample_variance(data, &probands, "implex.var")?;
    keep_generations(table, &options.generations)
}

/// Occurrences of each ancestor in the probands' ancestries.
pub fn occurrences<E: PedigreeEngine + ?Sized>(
    engine: &E,
    pedigree: &Pedigree,
    options: &DescribeOptions,
) -> Result<Table> {
    let probands = options.resolve_probands(pedigree);
    let ancestors = options.resolve_ancestors(pedigree);
    debug!(
        probands = probands.len(),
        ancestors = ancestors.len(),
        "ancestor occurrences"
    );

    match options.occurrence {
        OccurrenceMode::Total => {
            let totals = engine.total_occurrences(pedigree, &ancestors, &probands)?;
            let totals = check_len(totals, ancestors.len(), "ancestors")?;
            Table::from_column(
                labels(&ancestors),
                "total",
                totals.into_iter().map(|x| x as f64).collect(),
            )
        }
        OccurrenceMode::PerIndividual => {
            let data = engine.individual_occurrences(pedigree, &ancestors, &probands)?;
            check_dim(&data, (Some(ancestors.len()), probands.len()), "probands")?;
            Table::new(
                labels(&ancestors),
                labels(&probands),
                data.mapv(|x| x as f64),
            )
        }
    }
}

/// Number of probands descending from each ancestor.
pub fn coverage<E: PedigreeEngine + ?Sized>(
    engine: &E,
    pedigree: &Pedigree,
    options: &DescribeOptions,
) -> Result<Table> {
    let probands = options.resolve_probands(pedigree);
    let ancestors = options.resolve_ancestors(pedigree);
    let counts = engine.coverage(pedigree, &probands, &ancestors)?;
    let counts = check_len(counts, ancestors.len(), "ancestors")?;
    Table::from_column(
        labels(&ancestors),
        "coverage",
        counts.into_iter().map(|x| x as f64).collect(),
    )
}

/// Shortest genealogical distance between two individuals through `ancestor`.
pub fn find_distance<E: PedigreeEngine + ?Sized>(
    engine: &E,
    pedigree: &Pedigree,
    individuals: [IndividualId; 2],
    ancestor: IndividualId,
) -> Result<u32> {
    for &id in individuals.iter().chain(std::iter::once(&ancestor)) {
        pedigree.get(id)?;
    }
    engine.min_common_ancestor_path_length(pedigree, individuals[0], individuals[1], ancestor)
}
