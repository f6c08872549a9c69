//! Error types for pedigree construction, I/O and statistics.

use crate::IndividualId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenealogyError {
    /// An identifier that is not part of the pedigree.
    #[error("unknown individual: {0}")]
    UnknownIndividual(IndividualId),

    /// Cyclic ancestry or an individual listed as its own parent.
    #[error("malformed pedigree: {0}")]
    MalformedPedigree(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Malformed pedigree record.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// Failure reported by a pedigree engine.
    #[error("engine error: {0}")]
    Engine(String),
}

pub type Result<T, E = GenealogyError> = std::result::Result<T, E>;
