use std::sync::LazyLock;

use regex::Regex;

use super::model::{Amount, CellValue, RawGrid, Record, Table};
use crate::error::DashboardError;

pub const NAME_COLUMN: &str = "Name";
pub const PAYMENT_MODE_COLUMN: &str = "Payment Mode";
pub const AMOUNT_COLUMN: &str = "Amount";

/// `1,234,567.89`: commas only as thousands separators.
static GROUPED_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?\d{1,3}(,\d{3})+(\.\d+)?$").unwrap());

/// Where the header sits inside a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Row index of the column headers; everything above is banner.
    pub header_row: usize,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        NormalizeOptions { header_row: 1 }
    }
}

/// Turn a raw sheet into typed records using the default layout
/// (banner at row 0, header at row 1).
pub fn normalize(grid: &RawGrid) -> Result<Table, DashboardError> {
    normalize_with(grid, &NormalizeOptions::default())
}

/// Promote `header_row` to field names and type every row below it.
///
/// Every data row yields a record, so the table has
/// `grid.len() - header_row - 1` entries.
pub fn normalize_with(grid: &RawGrid, options: &NormalizeOptions) -> Result<Table, DashboardError> {
    let header_row = options.header_row;
    let Some(header) = grid.rows.get(header_row) else {
        return Err(DashboardError::SheetTooShort {
            sheet: grid.sheet.clone(),
            rows: grid.len(),
            header_row,
        });
    };

    let locate = |column: &'static str| {
        header
            .iter()
            .position(|cell| cell.as_label().as_deref() == Some(column))
            .ok_or_else(|| DashboardError::MissingColumn {
                sheet: grid.sheet.clone(),
                column,
                header_row,
            })
    };
    let name_idx = locate(NAME_COLUMN)?;
    let mode_idx = locate(PAYMENT_MODE_COLUMN)?;
    let amount_idx = locate(AMOUNT_COLUMN)?;

    let records: Vec<Record> = (header_row + 1..grid.len())
        .map(|row| Record {
            name: grid.cell(row, name_idx).as_label(),
            payment_mode: grid.cell(row, mode_idx).as_label(),
            amount: coerce_amount(grid.cell(row, amount_idx)),
        })
        .collect();

    let table = Table::new(records);
    let missing = table.missing_amounts();
    if missing > 0 {
        log::debug!(
            "Sheet '{}': {missing} of {} amount(s) are not numeric",
            grid.sheet,
            table.len()
        );
    }
    Ok(table)
}

/// Numeric cells pass through; text is parsed leniently; anything else is
/// missing. Never fails.
pub fn coerce_amount(cell: &CellValue) -> Amount {
    match cell {
        CellValue::Number(v) if v.is_finite() => Amount::Present(*v),
        CellValue::Text(s) => {
            let s = s.trim();
            let plain = if GROUPED_NUMBER.is_match(s) {
                s.replace(',', "")
            } else {
                s.to_string()
            };
            plain.parse::<f64>().ok().filter(|v| v.is_finite()).into()
        }
        _ => Amount::Missing,
    }
}
