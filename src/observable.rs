use crate::error::{GenealogyError, Result};
use crate::prelude::*;
use std::io::{Read, Write};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Field {
    Id,
    Father,
    Mother,
    Sex,
    Ignored,
}

/// Produces `Record`s from u8 delimited pedigree data
///
/// `PedigreeCsv` implements Iterator so it can be passed
/// directly to `Pedigree::observe()`
pub struct PedigreeCsv {
    records: std::iter::Enumerate<csv::StringRecordsIntoIter<Box<dyn Read>>>,
    fields: Vec<Field>,
}

impl PedigreeCsv {
    fn new(records: csv::StringRecordsIntoIter<Box<dyn Read>>, fields: Vec<Field>) -> Self {
        Self {
            records: records.enumerate(),
            fields,
        }
    }

    fn parse(&self, idx: usize, row: &csv::StringRecord) -> Result<Record> {
        let mut record = Record {
            id: NO_PARENT,
            father: NO_PARENT,
            mother: NO_PARENT,
            sex: Sex::Unknown,
        };
        let mut has_id = false;

        for (field, value) in self.fields.iter().zip(row.iter()) {
            let value = value.trim();
            match field {
                Field::Id => {
                    record.id = parse_id(idx, "individual", value)?;
                    has_id = true;
                }
                Field::Father => record.father = parse_id(idx, "father", value)?,
                Field::Mother => record.mother = parse_id(idx, "mother", value)?,
                Field::Sex => {
                    record.sex = value.parse::<u32>().map_or(Sex::Unknown, Sex::from_code)
                }
                Field::Ignored => {}
            }
        }

        if !has_id {
            return Err(GenealogyError::Parse(format!(
                "record {}: missing individual identifier",
                idx + 1
            )));
        }
        Ok(record)
    }
}

fn parse_id(idx: usize, column: &str, value: &str) -> Result<u32> {
    value.parse::<u32>().map_err(|e| {
        GenealogyError::Parse(format!(
            "record {}: bad {} value {:?}: {}",
            idx + 1,
            column,
            value,
            e
        ))
    })
}

impl Iterator for PedigreeCsv {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Result<Record>> {
        match self.records.next()? {
            (idx, Ok(row)) => Some(self.parse(idx, &row)),
            (_, Err(e)) => Some(Err(e.into())),
        }
    }
}

pub struct PedigreeCsvBuilder {
    headers: bool,
    delimiter: u8,
    id_field: String,
    father_field: String,
    mother_field: String,
    sex_field: String,
}

impl PedigreeCsvBuilder {
    /// Construct a new pedigree reader builder
    ///
    /// Defaults to a comma separated file with an `ind,father,mother,sex`
    /// header.
    pub fn new() -> Self {
        Self {
            headers: true,
            delimiter: b',',
            id_field: "ind".to_owned(),
            father_field: "father".to_owned(),
            mother_field: "mother".to_owned(),
            sex_field: "sex".to_owned(),
        }
    }

    /// Without headers the columns are read as id, father, mother, sex.
    pub fn headers(&mut self, headers: bool) -> &mut Self {
        self.headers = headers;
        self
    }

    pub fn delimiter(&mut self, delimiter: u8) -> &mut Self {
        self.delimiter = delimiter;
        self
    }

    pub fn id_field(&mut self, id_field: &str) -> &mut Self {
        self.id_field = id_field.to_owned();
        self
    }

    pub fn father_field(&mut self, father_field: &str) -> &mut Self {
        self.father_field = father_field.to_owned();
        self
    }

    pub fn mother_field(&mut self, mother_field: &str) -> &mut Self {
        self.mother_field = mother_field.to_owned();
        self
    }

    pub fn sex_field(&mut self, sex_field: &str) -> &mut Self {
        self.sex_field = sex_field.to_owned();
        self
    }

    pub fn from_reader(&self, reader: Box<dyn Read>) -> Result<PedigreeCsv> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(self.headers)
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(reader);

        let fields = if self.headers {
            let fields: Vec<Field> = rdr
                .headers()?
                .iter()
                .map(|s| {
                    let s = s.trim();
                    if s == self.id_field {
                        Field::Id
                    } else if s == self.father_field {
                        Field::Father
                    } else if s == self.mother_field {
                        Field::Mother
                    } else if s == self.sex_field {
                        Field::Sex
                    } else {
                        Field::Ignored
                    }
                })
                .collect();
            if !fields.contains(&Field::Id) {
                return Err(GenealogyError::Parse(format!(
                    "no {:?} column in header",
                    self.id_field
                )));
            }
            fields
        } else {
            vec![Field::Id, Field::Father, Field::Mother, Field::Sex]
        };

        Ok(PedigreeCsv::new(rdr.into_records(), fields))
    }
}

impl Default for PedigreeCsvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Pedigree {
    /// Writes the pedigree as `ind,father,mother,sex` rows.
    pub fn save<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&["ind", "father", "mother", "sex"])?;
        for individual in self.individuals() {
            wtr.write_record(&[
                individual.id().to_string(),
                individual.father().to_string(),
                individual.mother().to_string(),
                individual.sex().code().to_string(),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_csv_with_header_builds_pedigree() -> Result<(), Box<dyn Error>> {
        let mut pedigree = Pedigree::new();
        pedigree.observe(PedigreeCsvBuilder::new().from_reader(Box::new(
            "ind,father,mother,sex\n1,0,0,1\n2,0,0,2\n3,1,2,2".as_bytes(),
        ))?)?;
        assert_eq!(pedigree.number_of_individuals(), 3);
        assert_eq!(pedigree.number_of_women(), 2);
        assert_eq!(pedigree.proband_ids(), vec![3]);
        Ok(())
    }

    #[test]
    fn test_csv_columns_are_found_by_name() -> Result<(), Box<dyn Error>> {
        let mut pedigree = Pedigree::new();
        pedigree.observe(
            PedigreeCsvBuilder::new()
                .delimiter(b'\t')
                .id_field("id")
                .from_reader(Box::new("sex\tmother\tfather\tid\n1\t0\t0\t7".as_bytes()))?,
        )?;
        assert_eq!(pedigree.get(7)?.sex(), Sex::Male);
        Ok(())
    }

    #[test]
    fn test_csv_without_header_is_positional() -> Result<(), Box<dyn Error>> {
        let records: Vec<Record> = PedigreeCsvBuilder::new()
            .headers(false)
            .from_reader(Box::new("4,2,3,1".as_bytes()))?
            .collect::<Result<_>>()?;
        assert_eq!(
            records,
            vec![Record {
                id: 4,
                father: 2,
                mother: 3,
                sex: Sex::Male
            }]
        );
        Ok(())
    }

    #[test]
    fn test_bad_number_reports_record() -> Result<(), Box<dyn Error>> {
        let mut csv = PedigreeCsvBuilder::new()
            .from_reader(Box::new("ind,father,mother,sex\n1,0,0,1\n2,x,0,1".as_bytes()))?;
        assert!(csv.next().unwrap().is_ok());
        match csv.next() {
            Some(Err(GenealogyError::Parse(message))) => assert!(message.contains("record 2")),
            _ => panic!("expected a parse error"),
        }
        Ok(())
    }

    #[test]
    fn test_missing_parent_is_rejected() -> Result<(), Box<dyn Error>> {
        let mut pedigree = Pedigree::new();
        let result = pedigree.observe(
            PedigreeCsvBuilder::new()
                .from_reader(Box::new("ind,father,mother,sex\n3,1,0,2".as_bytes()))?,
        );
        assert!(matches!(result, Err(GenealogyError::UnknownIndividual(1))));
        Ok(())
    }

    #[test]
    fn test_failed_observe_keeps_pedigree() -> Result<(), Box<dyn Error>> {
        let mut pedigree = Pedigree::new();
        pedigree.insert(Individual::new(5, 0, 0, Sex::Male))?;
        let result = pedigree.observe(
            PedigreeCsvBuilder::new()
                .from_reader(Box::new("ind,father,mother,sex\n1,0,0,1\n3,9,0,2".as_bytes()))?,
        );
        assert!(matches!(result, Err(GenealogyError::UnknownIndividual(9))));
        assert_eq!(pedigree.number_of_individuals(), 1);
        assert_eq!(pedigree.proband_ids(), vec![5]);
        assert_eq!(pedigree.generational_variance(None)?, 0.0);

        // Later records may name parents that are already in the pedigree.
        pedigree.observe(
            PedigreeCsvBuilder::new()
                .from_reader(Box::new("ind,father,mother,sex\n6,5,0,2".as_bytes()))?,
        )?;
        assert_eq!(pedigree.number_of_individuals(), 2);
        Ok(())
    }

    #[test]
    fn test_unreadable_sex_is_unknown() -> Result<(), Box<dyn Error>> {
        let records: Vec<Record> = PedigreeCsvBuilder::new()
            .from_reader(Box::new(
                "ind,father,mother,sex\n1,0,0,\n2,0,0,-9\n3,0,0,F\n4,0,0,2".as_bytes(),
            ))?
            .collect::<Result<_>>()?;
        let sexes: Vec<Sex> = records.iter().map(|x| x.sex).collect();
        assert_eq!(sexes, vec![Sex::Unknown, Sex::Unknown, Sex::Unknown, Sex::Female]);
        Ok(())
    }

    #[test]
    fn test_save_writes_rows() -> Result<(), Box<dyn Error>> {
        let mut pedigree = Pedigree::new();
        pedigree.insert(Individual::new(1, 0, 0, Sex::Male))?;
        pedigree.insert(Individual::new(2, 1, 0, Sex::Female))?;
        let mut out = vec![];
        pedigree.save(&mut out)?;
        assert_eq!(
            String::from_utf8(out)?,
            "ind,father,mother,sex\n1,0,0,1\n2,1,0,2\n"
        );
        Ok(())
    }
}
