//! Table edits.
//!
//! A table is a header row (`columns`) plus body `rows`. Every operation here
//! keeps the shape invariant: each row has exactly `columns.len()` cells, and
//! there is always at least one column.

use crate::model::TableData;

impl TableData {
    /// Pads short rows with empty cells and truncates long ones. A table without
    /// columns gets the default ones.
    pub fn normalized(self) -> TableData {
        let columns = if self.columns.is_empty() {
            TableData::default().columns
        } else {
            self.columns
        };
        let width = columns.len();
        let rows = self
            .rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        TableData { columns, rows }
    }

    pub fn set_header(&self, column: usize, text: &str) -> TableData {
        if column >= self.columns.len() {
            return self.clone();
        }
        let mut columns = self.columns.clone();
        columns[column] = text.to_string();
        TableData {
            columns,
            rows: self.rows.clone(),
        }
    }

    pub fn set_cell(&self, row: usize, column: usize, text: &str) -> TableData {
        if row >= self.rows.len() || column >= self.columns.len() {
            return self.clone();
        }
        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, cells)| {
                if i != row {
                    return cells.clone();
                }
                cells
                    .iter()
                    .enumerate()
                    .map(|(j, cell)| if j == column { text.to_string() } else { cell.clone() })
                    .collect()
            })
            .collect();
        TableData {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Appends a row with one empty cell per column.
    pub fn add_row(&self) -> TableData {
        let mut rows = self.rows.clone();
        rows.push(vec![String::new(); self.columns.len()]);
        TableData {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Appends a column named `Column {n+1}` and an empty cell to every row.
    pub fn add_column(&self) -> TableData {
        let mut columns = self.columns.clone();
        columns.push(format!("Column {}", self.columns.len() + 1));
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row.push(String::new());
                row
            })
            .collect();
        TableData { columns, rows }
    }

    pub fn delete_row(&self, row: usize) -> TableData {
        TableData {
            columns: self.columns.clone(),
            rows: without(&self.rows, row),
        }
    }

    /// Removes a column and its cell in every row. The last column cannot be removed.
    pub fn delete_column(&self, column: usize) -> TableData {
        if self.columns.len() <= 1 || column >= self.columns.len() {
            return self.clone();
        }
        TableData {
            columns: without(&self.columns, column),
            rows: self.rows.iter().map(|row| without(row, column)).collect(),
        }
    }

    pub fn is_well_formed(&self) -> bool {
        !self.columns.is_empty() && self.rows.iter().all(|row| row.len() == self.columns.len())
    }
}

fn without<T: Clone>(items: &[T], index: usize) -> Vec<T> {
    items
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, item)| item.clone())
        .collect()
}
