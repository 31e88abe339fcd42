// src/table.rs
//
// Typed, indexed table built from a `RawTable`.
//
// - Column: either numeric or text, with `None` as the explicit missing value.
// - Frame:  named columns over a string row index (team code, game number, …).
//
// A column is numeric iff every non-empty cell parses as a number. Nothing is
// coerced silently: callers that want numbers out of a text column ask for
// them with `Frame::numeric`, and unparsable cells come back as `None`.

use crate::core::sanitize::parse_number;
use crate::specs::tables::RawTable;

#[derive(Clone, Debug, PartialEq)]
pub enum Column {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl Column {
    fn from_cells<'a>(cells: impl Iterator<Item = &'a str>) -> Self {
        let cells: Vec<&str> = cells.collect();
        let numeric = cells
            .iter()
            .all(|c| c.trim().is_empty() || parse_number(c).is_some());
        if numeric {
            Column::Numeric(cells.iter().map(|c| parse_number(c)).collect())
        } else {
            Column::Text(
                cells
                    .iter()
                    .map(|c| if c.trim().is_empty() { None } else { Some(s!(c.trim())) })
                    .collect(),
            )
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_missing(&self, row: usize) -> bool {
        match self {
            Column::Numeric(v) => v.get(row).is_none_or(Option::is_none),
            Column::Text(v) => v.get(row).is_none_or(Option::is_none),
        }
    }

    /// Numeric view of one cell; text cells are parsed, failures are `None`.
    pub fn f64_at(&self, row: usize) -> Option<f64> {
        match self {
            Column::Numeric(v) => v.get(row).copied().flatten(),
            Column::Text(v) => v.get(row).and_then(|c| c.as_deref()).and_then(parse_number),
        }
    }

    fn take(&self, rows: &[usize]) -> Column {
        match self {
            Column::Numeric(v) => Column::Numeric(rows.iter().map(|&r| v.get(r).copied().flatten()).collect()),
            Column::Text(v) => Column::Text(rows.iter().map(|&r| v.get(r).cloned().flatten()).collect()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    index_name: String,
    index: Vec<String>,
    names: Vec<String>,
    columns: Vec<Column>,
}

impl Frame {
    pub fn new(index_name: &str, index: Vec<String>) -> Self {
        Self { index_name: s!(index_name), index, names: Vec::new(), columns: Vec::new() }
    }

    /// Build from a raw table, indexing rows by `index_col`. `None` if the
    /// table has no such column.
    pub fn from_raw(raw: &RawTable, index_col: &str) -> Option<Self> {
        let idx = raw.col(index_col)?;
        let index = raw
            .rows
            .iter()
            .map(|r| r.get(idx).cloned().unwrap_or_default())
            .collect();
        let mut frame = Frame::new(index_col, index);
        for (i, name) in raw.headers.iter().enumerate() {
            if i == idx {
                continue;
            }
            let cells = raw.rows.iter().map(|r| r.get(i).map(String::as_str).unwrap_or(""));
            frame.push_column(name, Column::from_cells(cells));
        }
        Some(frame)
    }

    /// Add or replace a column. Short columns are padded with missing values.
    pub fn push_column(&mut self, name: &str, column: Column) {
        let n = self.index.len();
        let column = match column {
            Column::Numeric(mut v) => { v.resize(n, None); Column::Numeric(v) }
            Column::Text(mut v) => { v.resize(n, None); Column::Text(v) }
        };
        match self.names.iter().position(|c| c == name) {
            Some(pos) => self.columns[pos] = column,
            None => {
                self.names.push(s!(name));
                self.columns.push(column);
            }
        }
    }

    pub fn len(&self) -> usize { self.index.len() }
    pub fn is_empty(&self) -> bool { self.index.is_empty() }
    pub fn index_name(&self) -> &str { &self.index_name }
    pub fn index(&self) -> &[String] { &self.index }
    pub fn names(&self) -> &[String] { &self.names }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.names.iter().position(|c| c == name).map(|i| &self.columns[i])
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.index.iter().position(|k| k == key)
    }

    /// Whole column as numbers (text cells parsed). `None` if the column is absent.
    pub fn numeric(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let col = self.column(name)?;
        Some((0..self.len()).map(|r| col.f64_at(r)).collect())
    }

    pub fn value(&self, key: &str, name: &str) -> Option<f64> {
        let row = self.position(key)?;
        self.column(name)?.f64_at(row)
    }

    /// Rewrite every index label.
    pub fn map_index(&mut self, f: impl FnMut(&str) -> String) {
        self.index = self.index.iter().map(|k| k.as_str()).map(f).collect();
    }

    /// Keep only `cols`, in that order. Columns the table lacks come back as
    /// all-missing so that downstream missing-value checks catch them.
    pub fn select(&self, cols: &[&str]) -> Frame {
        let mut out = Frame::new(&self.index_name, self.index.clone());
        for &name in cols {
            let col = self.column(name).cloned().unwrap_or(Column::Numeric(Vec::new()));
            out.push_column(name, col);
        }
        out
    }

    /// Rows for `keys`, in the order of `keys`; unknown keys are skipped.
    pub fn reorder(&self, keys: &[&str]) -> Frame {
        let rows: Vec<usize> = keys.iter().filter_map(|k| self.position(k)).collect();
        self.take(&rows)
    }

    pub fn take(&self, rows: &[usize]) -> Frame {
        Frame {
            index_name: self.index_name.clone(),
            index: rows.iter().map(|&r| self.index[r].clone()).collect(),
            names: self.names.clone(),
            columns: self.columns.iter().map(|c| c.take(rows)).collect(),
        }
    }

    /// Names of the columns with a missing value in `row`.
    pub fn missing_in_row(&self, row: usize) -> Vec<&str> {
        self.names
            .iter()
            .zip(&self.columns)
            .filter(|(_, c)| c.is_missing(row))
            .map(|(n, _)| n.as_str())
            .collect()
    }

    /// All numeric values in the frame, row-major, missing skipped.
    pub fn values(&self) -> Vec<f64> {
        (0..self.len())
            .flat_map(|r| self.columns.iter().filter_map(move |c| c.f64_at(r)))
            .collect()
    }
}
