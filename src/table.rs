//! In-memory tabular data with an ordered header and all-string cells.
//!
//! Every marketplace export, whatever its source format, is loaded into a
//! `Table` before normalization. Cells are kept as the original strings; the
//! empty string is the only missing-value marker. Column order matters: the
//! final cleaning step projects a table onto an exact canonical column list.

use std::collections::HashMap;

/// A rectangular table of string cells with named, ordered columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows (the header is not a row).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Appends a row, padding or truncating it to the current column count.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    /// Removes a single row by index; out-of-range indices are ignored.
    pub fn remove_row(&mut self, index: usize) {
        if index < self.rows.len() {
            self.rows.remove(index);
        }
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| r[idx].as_str())
    }

    pub fn set(&mut self, row: usize, column: &str, value: String) {
        if let Some(idx) = self.column_index(column) {
            if let Some(r) = self.rows.get_mut(row) {
                r[idx] = value;
            }
        }
    }

    /// Returns the index of `name`, appending an empty column if absent.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column_index(name) {
            return idx;
        }
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(String::new());
        }
        self.columns.len() - 1
    }

    /// Adds (or overwrites) a column whose every cell is `value`.
    pub fn set_column_constant(&mut self, name: &str, value: &str) {
        let idx = self.ensure_column(name);
        for row in &mut self.rows {
            row[idx] = value.to_string();
        }
    }

    pub fn rename_column(&mut self, from: &str, to: &str) {
        if let Some(idx) = self.column_index(from) {
            self.columns[idx] = to.to_string();
        }
    }

    /// Drops a column and its cells; a no-op when the column is absent.
    pub fn drop_column(&mut self, name: &str) {
        if let Some(idx) = self.column_index(name) {
            self.columns.remove(idx);
            for row in &mut self.rows {
                row.remove(idx);
            }
        }
    }

    /// Rewrites every cell of a column through `f`; a no-op when absent.
    pub fn map_column<F: FnMut(&str) -> String>(&mut self, name: &str, mut f: F) {
        if let Some(idx) = self.column_index(name) {
            for row in &mut self.rows {
                row[idx] = f(&row[idx]);
            }
        }
    }

    /// Replaces whole-cell values in a column from a substitution table.
    /// These are total replacements, not partial matches.
    pub fn replace_values(&mut self, name: &str, substitutions: &[(&str, &str)]) {
        self.map_column(name, |cell| {
            for (from, to) in substitutions {
                if cell == *from {
                    return (*to).to_string();
                }
            }
            cell.to_string()
        });
    }

    /// Keeps only rows for which the predicate returns true. The predicate
    /// receives a lookup closure over the row's cells by column name; cells
    /// of absent columns read as empty.
    pub fn retain_rows<F: FnMut(&dyn Fn(&str) -> String) -> bool>(&mut self, mut pred: F) {
        let index: HashMap<String, usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        self.rows.retain(|row| {
            let lookup = |name: &str| -> String {
                index.get(name).map(|&i| row[i].clone()).unwrap_or_default()
            };
            pred(&lookup)
        });
    }

    /// Stable-sorts rows by the given column using a key extraction function.
    pub fn sort_rows_by_column<K, F>(&mut self, name: &str, mut key: F)
    where
        K: Ord,
        F: FnMut(&str) -> K,
    {
        if let Some(idx) = self.column_index(name) {
            self.rows.sort_by_key(|row| key(&row[idx]));
        }
    }

    /// Projects onto an exact ordered column list. Columns the table lacks
    /// come out as empty strings; columns not listed are discarded.
    pub fn project(&self, columns: &[&str]) -> Table {
        let indices: Vec<Option<usize>> =
            columns.iter().map(|c| self.column_index(c)).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                indices
                    .iter()
                    .map(|idx| match idx {
                        Some(i) => row[*i].clone(),
                        None => String::new(),
                    })
                    .collect()
            })
            .collect();
        Table {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    /// Appends all rows of `other`, unioning columns. Cells for columns one
    /// side lacks are filled with empty strings.
    pub fn append(&mut self, other: Table) {
        for column in other.columns() {
            self.ensure_column(column);
        }
        let mapping: Vec<usize> = other
            .columns
            .iter()
            .map(|c| self.column_index(c).expect("column just ensured"))
            .collect();
        for row in other.rows {
            let mut new_row = vec![String::new(); self.columns.len()];
            for (src_idx, dst_idx) in mapping.iter().enumerate() {
                new_row[*dst_idx] = row[src_idx].clone();
            }
            self.rows.push(new_row);
        }
    }
}
