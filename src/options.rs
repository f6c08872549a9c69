//! Options shared by the pedigree descriptors.
//!
//! Unset fields fall back to the pedigree itself: every proband (individuals
//! without children) and every founder.

use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// Whether a descriptor is averaged over probands or reported per proband.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResultMode {
    #[default]
    Mean,
    #[serde(rename = "IND")]
    PerIndividual,
}

/// Whether ancestor occurrences are summed over probands or kept apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum OccurrenceMode {
    Total,
    #[default]
    #[serde(rename = "IND")]
    PerIndividual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DescribeOptions {
    /// Individuals the statistics are computed for.
    pub probands: Option<Vec<IndividualId>>,
    /// Ancestors whose occurrence or coverage is counted.
    pub ancestors: Option<Vec<IndividualId>>,
    pub mode: ResultMode,
    pub occurrence: OccurrenceMode,
    /// Generations kept in per-generation tables.
    pub generations: Option<Vec<usize>>,
    /// Count an ancestor only in the first generation it appears in.
    pub only_new_ancestors: bool,
}

impl DescribeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn probands(&mut self, probands: Vec<IndividualId>) -> &mut Self {
        self.probands = Some(probands);
        self
    }

    pub fn ancestors(&mut self, ancestors: Vec<IndividualId>) -> &mut Self {
        self.ancestors = Some(ancestors);
        self
    }

    pub fn mode(&mut self, mode: ResultMode) -> &mut Self {
        self.mode = mode;
        self
    }

    pub fn occurrence(&mut self, occurrence: OccurrenceMode) -> &mut Self {
        self.occurrence = occurrence;
        self
    }

    pub fn generations(&mut self, generations: Vec<usize>) -> &mut Self {
        self.generations = Some(generations);
        self
    }

    pub fn only_new_ancestors(&mut self, only_new_ancestors: bool) -> &mut Self {
        self.only_new_ancestors = only_new_ancestors;
        self
    }

    pub fn resolve_probands(&self, pedigree: &Pedigree) -> Vec<IndividualId> {
        match &self.probands {
            Some(probands) => probands.clone(),
            None => pedigree.proband_ids(),
        }
    }

    pub fn resolve_ancestors(&self, pedigree: &Pedigree) -> Vec<IndividualId> {
        match &self.ancestors {
            Some(ancestors) => ancestors.clone(),
            None => pedigree.founder_ids(),
        }
    }
}
