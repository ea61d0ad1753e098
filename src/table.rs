use std::collections::HashMap;

use serde::Serialize;

use crate::error::ScrapeError;

/// A rectangular block of cell text with named columns.
///
/// Column names are ordered and may repeat (the advanced table carries the
/// same four-factor names for offense and defense). Every row holds exactly
/// one cell per column.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl StatTable {
    /// Builds a table, checking every row against the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<StatTable, ScrapeError> {
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(ScrapeError::ColumnMismatch {
                    context: format!("table row {}", i + 1),
                    expected: columns.len(),
                    found: row.len(),
                });
            }
        }
        Ok(StatTable { columns, rows })
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first column with the given name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell text at (row, column name), using the first column of that name.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|r| r[col].as_str())
    }

    /// Renames every column called `from` to `to`. Missing names are a no-op.
    pub fn rename_column(&mut self, from: &str, to: &str) {
        for column in &mut self.columns {
            if column == from {
                *column = to.to_string();
            }
        }
    }

    /// Removes every column whose name appears in `names`, wherever present.
    pub fn drop_columns(&mut self, names: &[&str]) {
        self.retain_columns(|name| !names.contains(&name));
    }

    /// Removes columns with a blank name. The source page fills these
    /// spacer headers with non-breaking spaces.
    pub fn drop_blank_columns(&mut self) {
        self.retain_columns(|name| !name.trim().is_empty());
    }

    fn retain_columns<F: Fn(&str) -> bool>(&mut self, keep: F) {
        let kept: Vec<usize> = (0..self.columns.len())
            .filter(|&i| keep(&self.columns[i]))
            .collect();
        if kept.len() == self.columns.len() {
            return;
        }
        self.columns = kept.iter().map(|&i| self.columns[i].clone()).collect();
        for row in &mut self.rows {
            *row = kept.iter().map(|&i| row[i].clone()).collect();
        }
    }

    /// Keeps only the first `len` rows.
    pub fn truncate(&mut self, len: usize) {
        self.rows.truncate(len);
    }

    /// Inserts a column at `pos` with one value per existing row.
    pub fn insert_column(
        &mut self,
        pos: usize,
        name: &str,
        values: Vec<String>,
    ) -> Result<(), ScrapeError> {
        if values.len() != self.rows.len() {
            return Err(ScrapeError::ColumnMismatch {
                context: format!("column '{}' values", name),
                expected: self.rows.len(),
                found: values.len(),
            });
        }
        self.columns.insert(pos, name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.insert(pos, value);
        }
        Ok(())
    }

    /// Appends a column after the existing ones.
    pub fn push_column(&mut self, name: &str, values: Vec<String>) -> Result<(), ScrapeError> {
        self.insert_column(self.columns.len(), name, values)
    }

    /// Inner join on every column name the two tables share.
    ///
    /// Keeps this table's columns in order, then the other table's non-key
    /// columns. Each left row pairs with every right row matching on all
    /// shared columns; rows without a match on either side are dropped.
    pub fn inner_join(&self, other: &StatTable) -> Result<StatTable, ScrapeError> {
        let shared: Vec<(usize, usize)> = self
            .columns
            .iter()
            .enumerate()
            .filter_map(|(i, name)| other.column_index(name).map(|j| (i, j)))
            .collect();
        if shared.is_empty() {
            return Err(ScrapeError::ColumnMismatch {
                context: "joined tables share no key columns".to_string(),
                expected: 1,
                found: 0,
            });
        }

        let key_cols: Vec<usize> = shared.iter().map(|&(_, j)| j).collect();
        let mut by_key: HashMap<Vec<&str>, Vec<usize>> = HashMap::new();
        for (r, row) in other.rows.iter().enumerate() {
            let key: Vec<&str> = key_cols.iter().map(|&j| row[j].as_str()).collect();
            by_key.entry(key).or_default().push(r);
        }

        let carried: Vec<usize> = (0..other.columns.len())
            .filter(|j| !key_cols.contains(j))
            .collect();

        let mut columns = self.columns.clone();
        columns.extend(carried.iter().map(|&j| other.columns[j].clone()));

        let mut rows = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let key: Vec<&str> = shared.iter().map(|&(i, _)| row[i].as_str()).collect();
            if let Some(matches) = by_key.get(&key) {
                for &r in matches {
                    let mut joined = row.clone();
                    joined.extend(carried.iter().map(|&j| other.rows[r][j].clone()));
                    rows.push(joined);
                }
            }
        }

        Ok(StatTable { columns, rows })
    }
}
