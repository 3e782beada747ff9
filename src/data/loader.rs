use std::path::Path;

use crate::data::parser::{self, HEADER_SCAN_ROWS};
use crate::error::LoadError;

/// Result of loading a data file: column names and column data as strings
#[derive(Debug, Clone, Default)]
pub struct LoadedData {
    pub columns: Vec<String>,
    pub column_data: Vec<Vec<String>>,  // column-major: column_data[col_idx][row_idx]
    pub row_count: usize,
}

impl LoadedData {
    /// Cells of the named column, if present.
    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|idx| self.column_data[idx].as_slice())
    }
}

/// Load a CSV or spreadsheet file. The header is the first row naming all of
/// `required`; everything below it is data.
pub fn load_file(path: &Path, sheet: Option<&str>, required: &[&str]) -> Result<LoadedData, LoadError> {
    let ext = path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let rows = match ext.as_str() {
        "csv" => read_csv_rows(path)?,
        "xls" | "xlsx" | "xlsm" | "xlsb" | "ods" => read_sheet_rows(path, sheet)?,
        _ => return Err(LoadError::UnsupportedFormat(ext)),
    };

    let data = from_rows(rows, required)?;
    tracing::info!(
        "Loaded {} rows x {} columns from {:?}",
        data.row_count,
        data.columns.len(),
        path
    );
    Ok(data)
}

fn read_csv_rows(path: &Path) -> Result<Vec<Vec<String>>, LoadError> {
    let content = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    // Fallback: treat as latin1 (each byte maps to same Unicode code point)
    let text = match String::from_utf8(content) {
        Ok(text) => text,
        Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }
    Ok(rows)
}

fn read_sheet_rows(path: &Path, sheet: Option<&str>) -> Result<Vec<Vec<String>>, LoadError> {
    use calamine::{open_workbook_auto, Reader};

    let mut workbook = open_workbook_auto(path)?;

    let sheet_name = match sheet {
        Some(name) => {
            if !workbook.sheet_names().iter().any(|s| s == name) {
                return Err(LoadError::SheetNotFound(name.to_string()));
            }
            name.to_string()
        }
        None => workbook.sheet_names().first()
            .ok_or(LoadError::NoSheets)?
            .clone(),
    };

    let range = workbook.worksheet_range(&sheet_name)?;
    Ok(range
        .rows()
        .map(|row| row.iter().map(parser::cell_to_string).collect())
        .collect())
}

fn from_rows(all_rows: Vec<Vec<String>>, required: &[&str]) -> Result<LoadedData, LoadError> {
    let header_row = parser::find_header_row(&all_rows, required, HEADER_SCAN_ROWS)
        .map_err(|column| LoadError::MissingColumn {
            column: column.to_string(),
            scanned: all_rows.len().min(HEADER_SCAN_ROWS),
        })?;

    let columns: Vec<String> = all_rows[header_row].iter()
        .map(|s| s.trim().to_string())
        .collect();

    // Data starts after header row
    let data_rows = &all_rows[header_row + 1..];
    let num_cols = columns.len();
    let mut column_data: Vec<Vec<String>> = vec![Vec::with_capacity(data_rows.len()); num_cols];

    for row in data_rows {
        for (col_idx, col_data) in column_data.iter_mut().enumerate() {
            col_data.push(row.get(col_idx).cloned().unwrap_or_default());
        }
    }

    Ok(LoadedData { columns, column_data, row_count: data_rows.len() })
}
