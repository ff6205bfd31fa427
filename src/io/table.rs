//! Generic CSV table ingest for the distribution inspector.
//!
//! Any CSV with a header row is accepted. Cells are kept as strings; numeric
//! interpretation happens per column so mixed files (labels, dates, numbers)
//! load without a schema.

use std::fs::File;
use std::path::Path;

use crate::error::AppError;

/// Cell spellings treated as missing values.
const MISSING_MARKERS: [&str; 6] = ["", "NA", "NaN", "nan", "null", "None"];

/// One named column of raw cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub cells: Vec<String>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<String>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Parse every cell as `f64`, mapping missing markers (and non-finite
    /// parses) to `None`. Returns `None` when any other cell fails to parse.
    pub fn numeric_values(&self) -> Option<Vec<Option<f64>>> {
        self.cells.iter().map(|c| parse_cell(c)).collect()
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric_values().is_some()
    }
}

fn parse_cell(cell: &str) -> Option<Option<f64>> {
    let cell = cell.trim();
    if MISSING_MARKERS.contains(&cell) {
        return Some(None);
    }
    let v: f64 = cell.parse().ok()?;
    Some(v.is_finite().then_some(v))
}

/// Column-oriented table of raw cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map(|c| c.cells.len()).unwrap_or(0)
    }

    /// Names of every column whose cells all parse as numbers or are missing.
    pub fn numeric_column_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.is_numeric())
            .map(|c| c.name.clone())
            .collect()
    }
}

/// Read a CSV file into a [`Table`]. Short rows are padded with missing cells.
pub fn read_table_csv(path: &Path) -> Result<Table, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let mut columns: Vec<Column> = headers.iter().map(|h| Column::new(h, Vec::new())).collect();

    for (idx, result) in reader.records().enumerate() {
        // +2: 1-based lines, header on line 1.
        let line = idx + 2;
        let record = result.map_err(|e| AppError::input(format!("CSV parse error on line {line}: {e}")))?;
        for (i, column) in columns.iter_mut().enumerate() {
            column.cells.push(record.get(i).unwrap_or("").to_string());
        }
    }

    log::debug!(
        "read {} rows x {} columns from {}",
        columns.first().map(|c| c.cells.len()).unwrap_or(0),
        columns.len(),
        path.display()
    );
    Ok(Table::new(columns))
}
