use calamine::Data;

/// How many leading rows are searched for the header.
pub const HEADER_SCAN_ROWS: usize = 50;

/// Find the header row: the first row among the first `max_rows` that holds
/// every required column name. Names are compared after trimming.
///
/// Returns the row index, or the first required name that never appeared.
pub fn find_header_row<'a>(
    rows: &[Vec<String>],
    required: &[&'a str],
    max_rows: usize,
) -> Result<usize, &'a str> {
    for (i, row) in rows.iter().take(max_rows).enumerate() {
        let has_all = required
            .iter()
            .all(|name| row.iter().any(|cell| cell.trim() == *name));
        if has_all {
            return Ok(i);
        }
    }

    // Report the first column missing from every scanned row.
    let missing = required
        .iter()
        .find(|name| {
            !rows
                .iter()
                .take(max_rows)
                .any(|row| row.iter().any(|cell| cell.trim() == **name))
        })
        .or_else(|| required.first())
        .copied()
        .unwrap_or_default();
    Err(missing)
}

/// Render a spreadsheet cell as text so it goes through the same numeric
/// coercion as CSV input.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        // Formula errors such as #N/A are treated as missing.
        Data::Error(_) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn header_below_title_rows() {
        let rows = vec![
            row(&["Every NFL Draft from 2000 to 2020"]),
            row(&[""]),
            row(&["Rnd", " Pick ", "Player", "DrAV"]),
            row(&["1", "1", "Courtney Brown", "28"]),
        ];
        assert_eq!(find_header_row(&rows, &["Pick", "DrAV"], 50), Ok(2));
    }

    #[test]
    fn reports_missing_column() {
        let rows = vec![row(&["Pick", "CarAV"]), row(&["1", "30"])];
        assert_eq!(find_header_row(&rows, &["Pick", "DrAV"], 50), Err("DrAV"));
    }

    #[test]
    fn header_beyond_scan_limit_is_missed() {
        let mut rows = vec![row(&["x"]); 5];
        rows.push(row(&["Pick", "DrAV"]));
        assert!(find_header_row(&rows, &["Pick", "DrAV"], 5).is_err());
    }

    #[test]
    fn cells_render_as_text() {
        assert_eq!(cell_to_string(&Data::Float(12.5)), "12.5");
        assert_eq!(cell_to_string(&Data::Int(7)), "7");
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String("n/a".into())), "n/a");
    }
}
