//! Variability of genealogical depth.
//!
//! The estimator walks the pedigree upwards one generation at a time from a
//! set of probands and records, per generation, how many of the visited
//! individuals are founders (no recorded parent) and semi-founders (exactly
//! one recorded parent). An ancestor reached through several lineages is
//! visited once per lineage. Each lineage that ends at generation `g`
//! accounts for `1 / 2^g` of a proband's ancestry, half of that for a
//! semi-founder, which turns the counts into a distribution of lineage depth
//! whose variance is returned.

use crate::error::{GenealogyError, Result};
use crate::prelude::*;
use tracing::{debug, trace};

/// Founder and semi-founder counts, indexed by generation.
///
/// Generation 0 holds the probands themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationalCounts {
    pub founders: Vec<usize>,
    pub semi_founders: Vec<usize>,
}

impl GenerationalCounts {
    /// Number of generations walked.
    pub fn levels(&self) -> usize {
        self.founders.len()
    }
}

/// Walks up from `probands` one generation at a time.
///
/// Duplicated probands and ancestors shared between lineages are counted
/// once per occurrence. An acyclic pedigree never yields more generations
/// than it has individuals, so going past `pedigree.len()` is reported as
/// `MalformedPedigree`.
pub fn generational_counts<P>(pedigree: &P, probands: &[IndividualId]) -> Result<GenerationalCounts>
where
    P: ParentLookup + ?Sized,
{
    let mut counts = GenerationalCounts::default();
    let mut current: Vec<IndividualId> = probands.to_vec();
    let max_levels = pedigree.len().max(1);

    while !current.is_empty() {
        if counts.levels() >= max_levels {
            return Err(GenealogyError::MalformedPedigree(format!(
                "ancestry runs deeper than the {} individuals of the pedigree",
                pedigree.len()
            )));
        }

        let mut founders = 0;
        let mut semi_founders = 0;
        let mut next = Vec::with_capacity(current.len() * 2);

        for &ind in &current {
            let father = pedigree.father(ind)?;
            let mother = pedigree.mother(ind)?;

            if father == NO_PARENT && mother == NO_PARENT {
                founders += 1;
            } else if (father == NO_PARENT) != (mother == NO_PARENT) {
                semi_founders += 1;
            }

            if father != NO_PARENT {
                next.push(father);
            }
            if mother != NO_PARENT {
                next.push(mother);
            }
        }

        trace!(
            generation = counts.levels(),
            individuals = current.len(),
            founders,
            semi_founders,
            "generation walked"
        );
        counts.founders.push(founders);
        counts.semi_founders.push(semi_founders);
        current = next;
    }

    Ok(counts)
}

/// Second moment minus squared first moment of lineage depth.
///
/// `probands` is the size of the proband set the counts were walked from.
/// Generation `g` is weighted by `probands * 2^g`; semi-founders count for
/// half a founder.
pub fn depth_variance(counts: &GenerationalCounts, probands: usize) -> f64 {
    let n = probands as f64;
    let mut first = 0.0;
    let mut second = 0.0;

    for (level, (&founders, &semi_founders)) in counts
        .founders
        .iter()
        .zip(counts.semi_founders.iter())
        .enumerate()
    {
        let weight = n * 2f64.powi(level as i32);
        if weight == 0.0 {
            continue;
        }
        let g = level as f64;
        let founders = founders as f64;
        let semi_founders = semi_founders as f64;

        first += g * founders / weight;
        second += g * g * founders / weight;

        first += g * semi_founders * 0.5 / weight;
        second += g * g * semi_founders * 0.5 / weight;
    }

    second - first * first
}

/// Walks `probands` and reduces the counts to a variance.
///
/// An empty proband set has variance 0.
pub fn variance_from<P>(pedigree: &P, probands: &[IndividualId]) -> Result<f64>
where
    P: ParentLookup + ?Sized,
{
    if probands.is_empty() {
        return Ok(0.0);
    }
    let counts = generational_counts(pedigree, probands)?;
    let variance = depth_variance(&counts, probands.len());
    debug!(
        probands = probands.len(),
        levels = counts.levels(),
        variance,
        "generational depth variance"
    );
    Ok(variance)
}

pub trait GenerationalVariance {
    /// Variance over `probands`, or over every proband of the pedigree
    /// when `None`.
    fn generational_variance(&self, probands: Option<&[IndividualId]>) -> Result<f64>;

    /// One variance per individual, each computed on the individual's own
    /// ancestry. Rows follow the order of `individuals`.
    fn generational_variance_by_individual(
        &self,
        individuals: &[IndividualId],
    ) -> Result<Vec<(IndividualId, f64)>>;
}

impl GenerationalVariance for Pedigree {
    fn generational_variance(&self, probands: Option<&[IndividualId]>) -> Result<f64> {
        match probands {
            Some(probands) => variance_from(self, probands),
            None => variance_from(self, &self.proband_ids()),
        }
    }

    fn generational_variance_by_individual(
        &self,
        individuals: &[IndividualId],
    ) -> Result<Vec<(IndividualId, f64)>> {
        individuals
            .iter()
            .map(|&id| {
                let branch = self.branch(&[id])?;
                Ok((id, branch.generational_variance(None)?))
            })
            .collect()
    }
}
