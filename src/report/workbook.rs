use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use crate::error::WriteError;
use crate::report::tables::{Cell, Table};

/// Write each table to its own sheet: bold frozen header row, then the rows
/// in order. Blank cells are left empty.
pub fn write_workbook(path: &Path, tables: &[Table]) -> Result<(), WriteError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    for table in tables {
        let sheet = workbook.add_worksheet();
        sheet.set_name(table.name)?;

        for (col, name) in table.headers.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *name, &header)?;
            sheet.set_column_width(col as u16, (name.len() + 4) as f64)?;
        }
        sheet.set_freeze_panes(1, 0)?;

        for (i, row) in table.rows.iter().enumerate() {
            let r = (i + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                match cell {
                    Cell::Number(v) => {
                        sheet.write_number(r, col as u16, *v)?;
                    }
                    Cell::Text(s) => {
                        sheet.write_string(r, col as u16, s)?;
                    }
                    Cell::Blank => {}
                }
            }
        }
    }

    workbook.save(path)?;
    tracing::info!("Wrote {} sheets to {:?}", tables.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::cleaner::Record;
    use crate::processing::aggregate::aggregate;
    use crate::report::tables::build_tables;
    use calamine::{open_workbook_auto, Data, Reader};

    #[test]
    fn sheets_round_trip_through_calamine() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");
        let agg = aggregate(&[Record::new(1, 10.0), Record::new(1, 20.0), Record::new(2, 5.0)]);
        write_workbook(&path, &build_tables(&agg)).unwrap();

        let mut book = open_workbook_auto(&path).unwrap();
        assert_eq!(
            book.sheet_names(),
            vec![
                "Mean DrAV",
                "Median DrAV",
                "Filtered Mean DrAV",
                "Weighted DrAV",
                "Summary Stats",
                "Range Summary"
            ]
        );

        let summary = book.worksheet_range("Summary Stats").unwrap();
        assert_eq!(summary.get_value((0, 3)), Some(&Data::String("Std_Dev".into())));
        assert_eq!(summary.get_value((1, 3)), Some(&Data::Float(7.07)));
        assert!(matches!(summary.get_value((2, 3)), None | Some(Data::Empty)));

        let ranges = book.worksheet_range("Range Summary").unwrap();
        assert_eq!(ranges.get_value((1, 0)), Some(&Data::String("Top 1".into())));
        assert_eq!(ranges.get_value((1, 3)), Some(&Data::Float(2.0)));
    }

    #[test]
    fn unwritable_destination_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.xlsx");
        let err = write_workbook(&path, &build_tables(&Default::default())).unwrap_err();
        assert!(matches!(err, WriteError::Xlsx(_)));
    }
}
