#![crate_name = "genealogy"]
use ndarray::ShapeBuilder;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

pub mod prelude;

pub mod describe;
pub mod engine;
pub mod error;
pub mod generations;
pub mod observable;
pub mod options;
pub mod table;

use crate::error::{GenealogyError, Result};

pub type IndividualId = u32;
pub type Individuals = BTreeMap<IndividualId, Individual>;
pub type Children = BTreeMap<IndividualId, Vec<IndividualId>>;

/// Parent identifier meaning "no recorded parent".
pub const NO_PARENT: IndividualId = 0;

/// Read-only access to the parent links of a pedigree.
///
/// `NO_PARENT` is returned for a missing father or mother. Identifiers
/// outside the pedigree are an error.
pub trait ParentLookup {
    fn father(&self, id: IndividualId) -> Result<IndividualId>;
    fn mother(&self, id: IndividualId) -> Result<IndividualId>;

    /// Number of individuals in the pedigree.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Sex {
    Unknown,
    Male,
    Female,
}

impl Sex {
    /// Decodes the usual pedigree file convention: 1 is male, 2 is female.
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => Sex::Male,
            2 => Sex::Female,
            _ => Sex::Unknown,
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            Sex::Unknown => 0,
            Sex::Male => 1,
            Sex::Female => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    id: IndividualId,
    father: IndividualId,
    mother: IndividualId,
    sex: Sex,
}

impl Individual {
    pub fn new(id: IndividualId, father: IndividualId, mother: IndividualId, sex: Sex) -> Self {
        Self {
            id,
            father,
            mother,
            sex,
        }
    }

    pub fn id(&self) -> IndividualId {
        self.id
    }

    pub fn father(&self) -> IndividualId {
        self.father
    }

    pub fn mother(&self) -> IndividualId {
        self.mother
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    /// True when neither parent is recorded.
    pub fn is_founder(&self) -> bool {
        self.father == NO_PARENT && self.mother == NO_PARENT
    }

    /// Recorded parents, father first.
    pub fn parents(&self) -> impl Iterator<Item = IndividualId> {
        std::iter::once(self.father)
            .chain(std::iter::once(self.mother))
            .filter(|&parent| parent != NO_PARENT)
    }
}

/// One line of a pedigree file: an individual, its parents and its sex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: IndividualId,
    pub father: IndividualId,
    pub mother: IndividualId,
    pub sex: Sex,
}

impl From<Record> for Individual {
    fn from(record: Record) -> Individual {
        Individual::new(record.id, record.father, record.mother, record.sex)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Pedigree {
    individuals: Individuals,
    children: Children,
}

impl Pedigree {
    /// Constructs a new empty `Pedigree`
    ///
    /// The `Pedigree` can be filled up iteratively by calling
    /// `insert()` or in bulk with `observe()`.
    pub fn new() -> Self {
        Self {
            individuals: Individuals::new(),
            children: Children::new(),
        }
    }

    /// Adds a single individual.
    ///
    /// Parents do not have to be present yet, so a pedigree can be built
    /// in any order. `observe()` checks that every parent was eventually
    /// listed.
    pub fn insert(&mut self, individual: Individual) -> Result<()> {
        let id = individual.id;
        if id == NO_PARENT {
            return Err(GenealogyError::InvalidInput(format!(
                "identifier {} is reserved for missing parents",
                NO_PARENT
            )));
        }
        if individual.father == id || individual.mother == id {
            return Err(GenealogyError::MalformedPedigree(format!(
                "individual {} is listed as its own parent",
                id
            )));
        }
        if self.individuals.contains_key(&id) {
            return Err(GenealogyError::InvalidInput(format!(
                "individual {} is listed twice",
                id
            )));
        }
        for parent in individual.parents() {
            self.children.entry(parent).or_insert_with(Vec::new).push(id);
        }
        self.individuals.insert(id, individual);
        Ok(())
    }

    /// Observe all the records in the argument.
    ///
    /// Fails if a record references a parent that no record lists. On
    /// failure the pedigree is left as it was before the call.
    pub fn observe<I>(&mut self, records: I) -> Result<()>
    where
        I: Iterator<Item = Result<Record>>,
    {
        let mut staged = self.clone();
        for record in records {
            staged.insert(record?.into())?;
        }
        staged.check_parents()?;
        *self = staged;
        Ok(())
    }

    fn check_parents(&self) -> Result<()> {
        for individual in self.individuals.values() {
            if let Some(missing) = individual
                .parents()
                .find(|parent| !self.individuals.contains_key(parent))
            {
                return Err(GenealogyError::UnknownIndividual(missing));
            }
        }
        Ok(())
    }

    pub fn get(&self, id: IndividualId) -> Result<&Individual> {
        self.individuals
            .get(&id)
            .ok_or(GenealogyError::UnknownIndividual(id))
    }

    pub fn contains(&self, id: IndividualId) -> bool {
        self.individuals.contains_key(&id)
    }

    pub fn individuals(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.values()
    }

    pub fn number_of_individuals(&self) -> usize {
        self.individuals.len()
    }

    pub fn number_of_men(&self) -> usize {
        self.count_sex(Sex::Male)
    }

    pub fn number_of_women(&self) -> usize {
        self.count_sex(Sex::Female)
    }

    fn count_sex(&self, sex: Sex) -> usize {
        self.individuals.values().filter(|x| x.sex == sex).count()
    }

    /// Individuals without children, in ascending order.
    pub fn proband_ids(&self) -> Vec<IndividualId> {
        self.individuals
            .keys()
            .filter(|id| self.children.get(*id).map_or(true, |c| c.is_empty()))
            .copied()
            .collect()
    }

    /// Individuals with neither parent recorded, in ascending order.
    pub fn founder_ids(&self) -> Vec<IndividualId> {
        self.individuals
            .values()
            .filter(|x| x.is_founder())
            .map(|x| x.id)
            .collect()
    }

    pub fn children_of(&self, id: IndividualId) -> Result<&[IndividualId]> {
        self.get(id)?;
        Ok(self
            .children
            .get(&id)
            .map(|c| c.as_slice())
            .unwrap_or(&[]))
    }

    pub fn number_of_children(&self, individuals: &[IndividualId]) -> Result<Vec<usize>> {
        individuals
            .iter()
            .map(|&id| self.children_of(id).map(|c| c.len()))
            .collect()
    }

    /// Number of generations spanned by the longest lineage.
    ///
    /// A lone founder has depth 1 and an empty pedigree depth 0.
    pub fn depth(&self) -> Result<usize> {
        let mut depths: HashMap<IndividualId, usize> = HashMap::new();
        let mut in_progress: HashSet<IndividualId> = HashSet::new();
        let mut deepest = 0;

        for &start in self.individuals.keys() {
            let mut stack = vec![start];
            while let Some(&id) = stack.last() {
                if depths.contains_key(&id) {
                    stack.pop();
                    continue;
                }
                let individual = self.get(id)?;
                let pending: Vec<IndividualId> = individual
                    .parents()
                    .filter(|parent| !depths.contains_key(parent))
                    .collect();

                if pending.is_empty() {
                    let depth = 1 + individual
                        .parents()
                        .filter_map(|parent| depths.get(&parent).copied())
                        .max()
                        .unwrap_or(0);
                    deepest = deepest.max(depth);
                    depths.insert(id, depth);
                    in_progress.remove(&id);
                    stack.pop();
                } else {
                    if let Some(parent) = pending.iter().find(|p| in_progress.contains(*p)) {
                        return Err(GenealogyError::MalformedPedigree(format!(
                            "individual {} is its own ancestor",
                            parent
                        )));
                    }
                    in_progress.insert(id);
                    stack.extend(pending);
                }
            }
        }
        Ok(deepest)
    }

    /// Restricts the pedigree to `individuals` and all of their ancestors.
    pub fn branch(&self, individuals: &[IndividualId]) -> Result<Pedigree> {
        let mut kept: BTreeSet<IndividualId> = BTreeSet::new();
        let mut queue: VecDeque<IndividualId> = individuals.iter().copied().collect();

        while let Some(id) = queue.pop_front() {
            if !kept.insert(id) {
                continue;
            }
            queue.extend(self.get(id)?.parents());
        }

        let mut branch = Pedigree::new();
        for id in kept {
            branch.insert(self.get(id)?.clone())?;
        }
        Ok(branch)
    }

    /// The pedigree as one `[id, father, mother, sex]` row per individual.
    pub fn to_matrix(&self) -> Result<ndarray::Array2<u32>> {
        let data: Vec<u32> = self
            .individuals
            .values()
            .flat_map(|x| vec![x.id, x.father, x.mother, x.sex.code()])
            .collect();
        Ok(ndarray::Array::from_shape_vec(
            (self.individuals.len(), 4).strides((4, 1)),
            data,
        )?)
    }
}

impl ParentLookup for Pedigree {
    fn father(&self, id: IndividualId) -> Result<IndividualId> {
        Ok(self.get(id)?.father)
    }

    fn mother(&self, id: IndividualId) -> Result<IndividualId> {
        Ok(self.get(id)?.mother)
    }

    fn len(&self) -> usize {
        self.individuals.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    // 1 x 2 -> 3, 3 x 4 -> 5 and 6
    fn family() -> Result<Pedigree, Box<dyn Error>> {
        let mut pedigree = Pedigree::new();
        pedigree.insert(Individual::new(5, 3, 4, Sex::Female))?;
        pedigree.insert(Individual::new(6, 3, 4, Sex::Male))?;
        pedigree.insert(Individual::new(3, 1, 2, Sex::Male))?;
        pedigree.insert(Individual::new(4, 0, 0, Sex::Female))?;
        pedigree.insert(Individual::new(1, 0, 0, Sex::Male))?;
        pedigree.insert(Individual::new(2, 0, 0, Sex::Unknown))?;
        Ok(pedigree)
    }

    #[test]
    fn test_counts_by_sex() -> Result<(), Box<dyn Error>> {
        let pedigree = family()?;
        assert_eq!(pedigree.number_of_individuals(), 6);
        assert_eq!(pedigree.number_of_men(), 3);
        assert_eq!(pedigree.number_of_women(), 2);
        Ok(())
    }

    #[test]
    fn test_probands_and_founders() -> Result<(), Box<dyn Error>> {
        let pedigree = family()?;
        assert_eq!(pedigree.proband_ids(), vec![5, 6]);
        assert_eq!(pedigree.founder_ids(), vec![1, 2, 4]);
        assert_eq!(pedigree.number_of_children(&[3, 4, 5])?, vec![2, 2, 0]);
        Ok(())
    }

    #[test]
    fn test_depth_follows_longest_lineage() -> Result<(), Box<dyn Error>> {
        assert_eq!(family()?.depth()?, 3);
        assert_eq!(Pedigree::new().depth()?, 0);
        Ok(())
    }

    #[test]
    fn test_depth_rejects_cycles() -> Result<(), Box<dyn Error>> {
        let mut pedigree = Pedigree::new();
        pedigree.insert(Individual::new(1, 2, 0, Sex::Male))?;
        pedigree.insert(Individual::new(2, 1, 0, Sex::Male))?;
        assert!(matches!(
            pedigree.depth(),
            Err(GenealogyError::MalformedPedigree(_))
        ));
        Ok(())
    }

    #[test]
    fn test_branch_keeps_only_ancestors() -> Result<(), Box<dyn Error>> {
        let branch = family()?.branch(&[3])?;
        assert_eq!(branch.number_of_individuals(), 3);
        assert_eq!(branch.proband_ids(), vec![3]);
        assert!(!branch.contains(4));
        Ok(())
    }

    #[test]
    fn test_insert_rejects_bad_identifiers() {
        let mut pedigree = Pedigree::new();
        assert!(pedigree.insert(Individual::new(0, 0, 0, Sex::Male)).is_err());
        assert!(pedigree.insert(Individual::new(7, 7, 0, Sex::Male)).is_err());
        assert!(pedigree.insert(Individual::new(7, 0, 0, Sex::Male)).is_ok());
        assert!(pedigree.insert(Individual::new(7, 0, 0, Sex::Male)).is_err());
    }

    #[test]
    fn test_unknown_individual_is_reported() -> Result<(), Box<dyn Error>> {
        let pedigree = family()?;
        assert!(matches!(
            pedigree.father(42),
            Err(GenealogyError::UnknownIndividual(42))
        ));
        Ok(())
    }

    #[test]
    fn test_matrix_rows() -> Result<(), Box<dyn Error>> {
        let matrix = family()?.to_matrix()?;
        assert_eq!(matrix.dim(), (6, 4));
        assert_eq!(matrix.row(2).to_vec(), vec![3, 1, 2, 1]);
        Ok(())
    }
}
