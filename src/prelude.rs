pub use crate::describe::Summary;
pub use crate::engine::PedigreeEngine;
pub use crate::error::{GenealogyError, Result};
pub use crate::generations::{GenerationalCounts, GenerationalVariance};
pub use crate::observable::{PedigreeCsv, PedigreeCsvBuilder};
pub use crate::options::{DescribeOptions, OccurrenceMode, ResultMode};
pub use crate::table::Table;
pub use crate::{Individual, IndividualId, ParentLookup, Pedigree, Record, Sex, NO_PARENT};
