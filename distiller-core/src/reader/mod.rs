//! Excel/ODS file reader using calamine

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use std::fs;
use std::io::Cursor;
use std::path::Path;

use crate::error::ParseFailure;

pub mod workbook;

pub use workbook::{CellValue, Grid};

/// Read the first worksheet of a workbook file into a grid
pub fn read_grid<P: AsRef<Path>>(path: P) -> Result<Grid, ParseFailure> {
    let bytes = fs::read(path.as_ref())?;
    read_grid_from_bytes(&bytes)
}

/// Read the first worksheet of an in-memory workbook into a grid.
///
/// The container format is sniffed from the bytes, so a misnamed upload
/// still decodes as long as its contents are a spreadsheet.
pub fn read_grid_from_bytes(bytes: &[u8]) -> Result<Grid, ParseFailure> {
    let mut excel = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let range = match excel.worksheet_range_at(0) {
        Some(range) => range?,
        None => return Err(ParseFailure::EmptyWorkbook),
    };

    let grid = parse_range(&range);
    if grid.is_empty() {
        return Err(ParseFailure::EmptyWorkbook);
    }

    log::debug!("Read first worksheet: {} rows", grid.rows.len());
    Ok(grid)
}

fn parse_range(range: &Range<Data>) -> Grid {
    let rows = range
        .rows()
        .map(|row| row.iter().map(parse_cell_value).collect())
        .collect();
    Grid::new(rows)
}

fn parse_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::Empty => CellValue::Empty,
        // Keep the serial so date normalization sees what the sheet stores
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let result = read_grid_from_bytes(b"definitely not a spreadsheet");
        assert!(matches!(result, Err(ParseFailure::Decode(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = read_grid("/nonexistent/dir/proposals.xlsx");
        assert!(matches!(result, Err(ParseFailure::Io(_))));
    }

    #[test]
    fn test_cell_conversion() {
        assert_eq!(parse_cell_value(&Data::Int(1703)), CellValue::Number(1703.0));
        assert_eq!(
            parse_cell_value(&Data::String("Jane Doe".to_string())),
            CellValue::Text("Jane Doe".to_string())
        );
        assert_eq!(parse_cell_value(&Data::Empty), CellValue::Empty);
    }
}
