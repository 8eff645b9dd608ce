//! Grid data structures for the first worksheet of a workbook

/// Rows of raw cell values, in sheet order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    pub rows: Vec<Vec<CellValue>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header row (row 0) if the grid has any rows
    pub fn header_row(&self) -> Option<&[CellValue]> {
        self.rows.first().map(|r| r.as_slice())
    }

    /// Rows after the header
    pub fn data_rows(&self) -> impl Iterator<Item = &[CellValue]> {
        self.rows.iter().skip(1).map(|r| r.as_slice())
    }
}

/// Cell value types
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
    Error(String),
}

impl CellValue {
    /// Check if the cell is empty (no value, or an empty string)
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Stringify the raw value the way a spreadsheet user would read it.
    ///
    /// Integral numbers drop the fractional part, so serial dates come out
    /// as `45000` rather than `45000.0`.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.clone(),
            CellValue::Boolean(b) => b.to_string(),
            CellValue::Error(e) => e.clone(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_text() {
        assert_eq!(CellValue::Number(45000.0).to_text(), "45000");
        assert_eq!(CellValue::Number(-3.0).to_text(), "-3");
        assert_eq!(CellValue::Number(45000.25).to_text(), "45000.25");
        assert_eq!(CellValue::Boolean(true).to_text(), "true");
        assert_eq!(CellValue::Empty.to_text(), "");
    }

    #[test]
    fn test_emptiness() {
        assert!(CellValue::Empty.is_empty());
        assert!(CellValue::Text(String::new()).is_empty());
        // Whitespace is a value at the row level; trimming happens per field
        assert!(!CellValue::Text("  ".to_string()).is_empty());
        assert!(!CellValue::Number(0.0).is_empty());
    }

    #[test]
    fn test_grid_split() {
        let grid = Grid::new(vec![
            vec!["Status".into()],
            vec!["Completed".into()],
            vec!["Out for Review".into()],
        ]);
        assert_eq!(grid.header_row().unwrap(), &[CellValue::from("Status")]);
        assert_eq!(grid.data_rows().count(), 2);
        assert!(Grid::default().header_row().is_none());
    }
}
