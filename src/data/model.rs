use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// CellValue – a single raw spreadsheet cell
// ---------------------------------------------------------------------------

/// A raw cell as read from the source sheet, before any column typing.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Empty,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            // Whole numbers print without a trailing ".0" so numeric names
            // such as "2024" read the way they do in the sheet.
            CellValue::Number(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => {
                write!(f, "{}", *v as i64)
            }
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Empty => Ok(()),
        }
    }
}

impl CellValue {
    /// Whether the cell holds nothing (or only whitespace).
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Trimmed text of the cell, `None` when blank.
    pub fn as_label(&self) -> Option<String> {
        if self.is_blank() {
            return None;
        }
        Some(self.to_string().trim().to_string())
    }
}

// ---------------------------------------------------------------------------
// RawGrid – one sheet, positionally
// ---------------------------------------------------------------------------

/// Untyped rows × columns of one sheet.
///
/// Row 0 is a banner, row 1 the header, rows ≥ 2 data. Rows may be ragged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawGrid {
    /// Sheet (month) name the grid was read from.
    pub sheet: String,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawGrid {
    pub fn new(sheet: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        RawGrid {
            sheet: sheet.into(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `(row, col)`; out-of-range positions read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        const EMPTY: &CellValue = &CellValue::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(EMPTY)
    }
}

// ---------------------------------------------------------------------------
// Amount – numeric or explicitly missing
// ---------------------------------------------------------------------------

/// The `Amount` column after coercion. Non-numeric cells become `Missing`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Amount {
    Present(f64),
    Missing,
}

impl Amount {
    pub fn value(self) -> Option<f64> {
        match self {
            Amount::Present(v) => Some(v),
            Amount::Missing => None,
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, Amount::Missing)
    }
}

impl From<Option<f64>> for Amount {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Amount::Missing, Amount::Present)
    }
}

impl From<f64> for Amount {
    fn from(v: f64) -> Self {
        Amount::Present(v)
    }
}

// ---------------------------------------------------------------------------
// Record / Table
// ---------------------------------------------------------------------------

/// One normalized expense row.
///
/// Blank `Name` / `Payment Mode` cells are `None`: they are never offered
/// as filter options and never match a selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: Option<String>,
    pub payment_mode: Option<String>,
    pub amount: Amount,
}

impl Record {
    pub fn new(name: &str, payment_mode: &str, amount: impl Into<Amount>) -> Self {
        Record {
            name: Some(name.to_string()),
            payment_mode: Some(payment_mode.to_string()),
            amount: amount.into(),
        }
    }
}

/// Records in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub records: Vec<Record>,
}

impl Table {
    pub fn new(records: Vec<Record>) -> Self {
        Table { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct payment modes in first-seen order.
    pub fn payment_modes(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.payment_mode.as_deref()))
    }

    /// Distinct expense names in first-seen order.
    pub fn names(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.name.as_deref()))
    }

    /// Number of records whose amount could not be read as a number.
    pub fn missing_amounts(&self) -> usize {
        self.records.iter().filter(|r| r.amount.is_missing()).count()
    }
}

fn distinct<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .flatten()
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_display() {
        assert_eq!(CellValue::Number(2024.0).to_string(), "2024");
        assert_eq!(CellValue::Number(12.5).to_string(), "12.5");
        assert_eq!(CellValue::Text("Food".into()).to_string(), "Food");
        assert_eq!(CellValue::Empty.to_string(), "");
    }

    #[test]
    fn test_as_label_trims_and_blanks() {
        assert_eq!(CellValue::Text("  Rent ".into()).as_label().as_deref(), Some("Rent"));
        assert_eq!(CellValue::Text("   ".into()).as_label(), None);
        assert_eq!(CellValue::Empty.as_label(), None);
    }

    #[test]
    fn test_grid_cell_out_of_range_is_empty() {
        let grid = RawGrid::new("Jul", vec![vec![CellValue::Bool(true)]]);
        assert_eq!(grid.cell(0, 0), &CellValue::Bool(true));
        assert_eq!(grid.cell(0, 5), &CellValue::Empty);
        assert_eq!(grid.cell(9, 0), &CellValue::Empty);
    }

    #[test]
    fn test_distinct_first_seen_order() {
        let table = Table::new(vec![
            Record::new("Rent", "UPI", 100.0),
            Record::new("Food", "Cash", 20.0),
            Record::new("Rent", "Cash", 5.0),
            Record {
                name: None,
                payment_mode: None,
                amount: Amount::Missing,
            },
        ]);
        assert_eq!(table.names(), vec!["Rent", "Food"]);
        assert_eq!(table.payment_modes(), vec!["UPI", "Cash"]);
        assert_eq!(table.missing_amounts(), 1);
    }
}
