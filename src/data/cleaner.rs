use serde::Serialize;

use crate::data::loader::LoadedData;

/// One historical draft selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Record {
    pub pick: u32,
    pub drav: f64,
}

impl Record {
    pub fn new(pick: u32, drav: f64) -> Self {
        Self { pick, drav }
    }
}

/// Records that survived numeric coercion.
#[derive(Debug, Clone, Default)]
pub struct CleanedData {
    pub records: Vec<Record>,
    pub dropped: usize,
}

/// Parse a cell as a finite number. Blank and non-numeric cells give `None`.
pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Coerce a numeric value to a draft position: whole numbers from 1 up.
pub fn parse_pick(s: &str) -> Option<u32> {
    let v = parse_number(s)?;
    if v >= 1.0 && v.fract() == 0.0 && v <= u32::MAX as f64 {
        Some(v as u32)
    } else {
        None
    }
}

/// Keep every row whose pick and value both coerce; drop the rest.
///
/// A missing column means no row can qualify, so the result is empty.
pub fn clean(data: &LoadedData, pick_column: &str, value_column: &str) -> CleanedData {
    let (Some(picks), Some(values)) = (data.column(pick_column), data.column(value_column)) else {
        tracing::warn!("Columns {pick_column:?}/{value_column:?} not present; no records kept");
        return CleanedData { records: Vec::new(), dropped: data.row_count };
    };

    let records: Vec<Record> = picks
        .iter()
        .zip(values.iter())
        .filter_map(|(p, v)| Some(Record::new(parse_pick(p)?, parse_number(v)?)))
        .collect();
    let dropped = data.row_count - records.len();

    if dropped > 0 {
        tracing::warn!("Dropped {dropped} of {} rows with a missing or non-numeric {pick_column}/{value_column}", data.row_count);
    }
    tracing::info!("Kept {} records", records.len());

    CleanedData { records, dropped }
}
