//! The pedigree engine interface.
//!
//! Ancestor path lengths, completeness, implex and occurrence counting are
//! computed by an engine that walks the pedigree on its own. This crate only
//! chooses the inputs and labels the outputs, see `describe`.

use crate::prelude::*;
use ndarray::Array2;

pub trait PedigreeEngine {
    /// Shortest number of generations between each individual and a founder.
    fn min_ancestor_path_lengths(
        &self,
        pedigree: &Pedigree,
        individuals: &[IndividualId],
    ) -> Result<Vec<u32>>;

    fn mean_ancestor_path_lengths(
        &self,
        pedigree: &Pedigree,
        individuals: &[IndividualId],
    ) -> Result<Vec<f64>>;

    fn max_ancestor_path_lengths(
        &self,
        pedigree: &Pedigree,
        individuals: &[IndividualId],
    ) -> Result<Vec<u32>>;

    /// Expected genealogical depth of each proband.
    fn mean_pedigree_depths(&self, pedigree: &Pedigree, probands: &[IndividualId])
        -> Result<Vec<f64>>;

    /// Completeness per generation, averaged over probands.
    fn mean_completeness(&self, pedigree: &Pedigree, probands: &[IndividualId])
        -> Result<Vec<f64>>;

    /// Completeness as a generations by probands matrix.
    fn individual_completeness(
        &self,
        pedigree: &Pedigree,
        probands: &[IndividualId],
    ) -> Result<Array2<f64>>;

    fn mean_implex(
        &self,
        pedigree: &Pedigree,
        probands: &[IndividualId],
        only_new_ancestors: bool,
    ) -> Result<Vec<f64>>;

    /// Implex as a generations by probands matrix.
    fn individual_implex(
        &self,
        pedigree: &Pedigree,
        probands: &[IndividualId],
        only_new_ancestors: bool,
    ) -> Result<Array2<f64>>;

    /// Number of times each ancestor appears in the ancestry of all probands.
    fn total_occurrences(
        &self,
        pedigree: &Pedigree,
        ancestors: &[IndividualId],
        probands: &[IndividualId],
    ) -> Result<Vec<u64>>;

    /// Occurrences as an ancestors by probands matrix.
    fn individual_occurrences(
        &self,
        pedigree: &Pedigree,
        ancestors: &[IndividualId],
        probands: &[IndividualId],
    ) -> Result<Array2<u64>>;

    /// Number of probands descending from each ancestor.
    fn coverage(
        &self,
        pedigree: &Pedigree,
        probands: &[IndividualId],
        ancestors: &[IndividualId],
    ) -> Result<Vec<u64>>;

    /// Shortest path from `first` up to `ancestor` and down to `second`.
    fn min_common_ancestor_path_length(
        &self,
        pedigree: &Pedigree,
        first: IndividualId,
        second: IndividualId,
        ancestor: IndividualId,
    ) -> Result<u32>;
}
