use crate::error::{GenealogyError, Result};
use std::io::Write;

/// A matrix of values with labeled rows and columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    index: Vec<String>,
    columns: Vec<String>,
    data: ndarray::Array2<f64>,
}

/// Turns identifiers or generation numbers into table labels.
pub fn labels<T: ToString>(items: &[T]) -> Vec<String> {
    items.iter().map(|x| x.to_string()).collect()
}

impl Table {
    pub fn new(index: Vec<String>, columns: Vec<String>, data: ndarray::Array2<f64>) -> Result<Self> {
        if data.dim() != (index.len(), columns.len()) {
            return Err(GenealogyError::InvalidInput(format!(
                "{}x{} labels for a {}x{} table",
                index.len(),
                columns.len(),
                data.nrows(),
                data.ncols()
            )));
        }
        Ok(Self {
            index,
            columns,
            data,
        })
    }

    /// A single labeled row.
    pub fn from_row(label: &str, columns: Vec<String>, values: Vec<f64>) -> Result<Self> {
        let data = ndarray::Array::from_shape_vec((1, values.len()), values)?;
        Self::new(vec![label.to_owned()], columns, data)
    }

    /// A single labeled column.
    pub fn from_column(index: Vec<String>, label: &str, values: Vec<f64>) -> Result<Self> {
        let data = ndarray::Array::from_shape_vec((values.len(), 1), values)?;
        Self::new(index, vec![label.to_owned()], data)
    }

    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn data(&self) -> &ndarray::Array2<f64> {
        &self.data
    }

    pub fn get(&self, row: &str, column: &str) -> Option<f64> {
        let i = self.index.iter().position(|x| x == row)?;
        let j = self.columns.iter().position(|x| x == column)?;
        Some(self.data[[i, j]])
    }

    pub fn column(&self, column: &str) -> Option<ndarray::ArrayView1<'_, f64>> {
        let j = self.columns.iter().position(|x| x == column)?;
        Some(self.data.column(j))
    }

    /// Keeps the rows at the given positions, in the given order.
    pub fn select_rows(&self, rows: &[usize]) -> Result<Table> {
        if let Some(&row) = rows.iter().find(|&&row| row >= self.index.len()) {
            return Err(GenealogyError::InvalidInput(format!(
                "row {} out of a table of {} rows",
                row,
                self.index.len()
            )));
        }
        Ok(Self {
            index: rows.iter().map(|&row| self.index[row].clone()).collect(),
            columns: self.columns.clone(),
            data: self.data.select(ndarray::Axis(0), rows),
        })
    }

    /// Writes the table as CSV, row labels first.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(std::iter::once("").chain(self.columns.iter().map(|x| x.as_str())))?;
        for (label, row) in self.index.iter().zip(self.data.rows()) {
            wtr.write_record(
                std::iter::once(label.clone()).chain(row.iter().map(|x| x.to_string())),
            )?;
        }
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn sample() -> Result<Table, Box<dyn Error>> {
        Ok(Table::new(
            labels(&[0, 1, 2]),
            labels(&["a", "b"]),
            ndarray::arr2(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.5]]),
        )?)
    }

    #[test]
    fn test_lookup_by_label() -> Result<(), Box<dyn Error>> {
        let table = sample()?;
        assert_eq!(table.get("2", "b"), Some(6.5));
        assert_eq!(table.get("3", "b"), None);
        assert_eq!(table.column("a").map(|x| x.to_vec()), Some(vec![1.0, 3.0, 5.0]));
        Ok(())
    }

    #[test]
    fn test_labels_must_match_shape() {
        assert!(Table::new(labels(&[0]), labels(&[0]), ndarray::Array2::zeros((2, 1))).is_err());
    }

    #[test]
    fn test_select_rows() -> Result<(), Box<dyn Error>> {
        let table = sample()?.select_rows(&[2, 0])?;
        assert_eq!(table.index(), &["2".to_string(), "0".to_string()][..]);
        assert_eq!(table.data(), &ndarray::arr2(&[[5.0, 6.5], [1.0, 2.0]]));
        assert!(sample()?.select_rows(&[3]).is_err());
        Ok(())
    }

    #[test]
    fn test_write_csv() -> Result<(), Box<dyn Error>> {
        let table = Table::from_column(labels(&[7, 8]), "total", vec![2.0, 0.5])?;
        let mut out = vec![];
        table.write_csv(&mut out)?;
        assert_eq!(String::from_utf8(out)?, ",total\n7,2\n8,0.5\n");
        Ok(())
    }
}
