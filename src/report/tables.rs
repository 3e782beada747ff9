use crate::processing::aggregate::Aggregates;
use crate::processing::statistics::round2;

pub const MEAN_SHEET: &str = "Mean DrAV";
pub const MEDIAN_SHEET: &str = "Median DrAV";
pub const FILTERED_SHEET: &str = "Filtered Mean DrAV";
pub const WEIGHTED_SHEET: &str = "Weighted DrAV";
pub const SUMMARY_SHEET: &str = "Summary Stats";
pub const RANGE_SHEET: &str = "Range Summary";

/// A single output cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Blank,
}

impl Cell {
    /// NaN becomes a blank cell.
    pub fn number(v: f64) -> Self {
        if v.is_finite() { Cell::Number(v) } else { Cell::Blank }
    }

    pub fn text(s: Option<&str>) -> Self {
        s.map_or(Cell::Blank, |s| Cell::Text(s.to_string()))
    }
}

/// One named sheet: header row plus data rows, in output order.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: &'static str,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    fn new(name: &'static str, headers: &[&'static str]) -> Self {
        Self { name, headers: headers.to_vec(), rows: Vec::new() }
    }
}

#[cfg(test)]
impl Table {
    /// Column values by header name.
    pub fn column(&self, header: &str) -> Option<Vec<&Cell>> {
        let idx = self.headers.iter().position(|h| *h == header)?;
        Some(self.rows.iter().map(|r| &r[idx]).collect())
    }
}

/// Lay the aggregates out as the six report sheets. Values are copied as
/// computed apart from the summary sheet, which is rounded to 2 decimals.
pub fn build_tables(agg: &Aggregates) -> Vec<Table> {
    let mut mean = Table::new(MEAN_SHEET, &["Pick", "Expected_DrAV", "Pick_Range", "Trendline_DrAV"]);
    let mut median = Table::new(MEDIAN_SHEET, &["Pick", "Median_DrAV"]);
    let mut filtered = Table::new(FILTERED_SHEET, &["Pick", "Filtered_Expected_DrAV"]);
    let mut weighted = Table::new(WEIGHTED_SHEET, &["Pick", "Weighted_Expected_DrAV"]);
    let mut summary = Table::new(SUMMARY_SHEET, &["Pick", "Mean_DrAV", "Median_DrAV", "Std_Dev"]);
    let mut range = Table::new(RANGE_SHEET, &["Pick_Range", "Mean_DrAV", "Std_Dev", "Count"]);

    for p in &agg.picks {
        let pick = Cell::Number(p.pick as f64);
        mean.rows.push(vec![
            pick.clone(),
            Cell::number(p.mean),
            Cell::text(p.range),
            p.trendline.map_or(Cell::Blank, Cell::number),
        ]);
        median.rows.push(vec![pick.clone(), Cell::number(p.median)]);
        filtered.rows.push(vec![pick.clone(), Cell::number(p.filtered_mean)]);
        weighted.rows.push(vec![pick.clone(), Cell::number(p.weighted_mean)]);
        summary.rows.push(vec![
            pick,
            Cell::number(p.mean),
            Cell::number(round2(p.median)),
            Cell::number(round2(p.std_dev)),
        ]);
    }

    for r in &agg.ranges {
        range.rows.push(vec![
            Cell::Text(r.label.to_string()),
            Cell::number(r.mean),
            Cell::number(r.std_dev),
            Cell::Number(r.count as f64),
        ]);
    }

    vec![mean, median, filtered, weighted, summary, range]
}
