use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader, Sheets};

use super::model::{CellValue, RawGrid};
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

enum Source {
    Spreadsheet(Sheets<BufReader<File>>),
    /// A CSV file is a workbook with exactly one sheet.
    Csv(RawGrid),
}

/// A read-only workbook whose sheets are months of expense data.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – every sheet is a month
/// * `.csv` – a single sheet named after the file stem
pub struct Workbook {
    sheet_names: Vec<String>,
    source: Source,
}

impl Workbook {
    /// Open a workbook.  Dispatch by extension.
    pub fn open(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        let (sheet_names, source) = match ext.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => {
                let sheets = open_workbook_auto(path)
                    .with_context(|| format!("opening workbook {}", path.display()))?;
                (sheets.sheet_names(), Source::Spreadsheet(sheets))
            }
            "csv" => {
                let name = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("Sheet1")
                    .to_string();
                let grid = load_csv(path, &name)?;
                (vec![name], Source::Csv(grid))
            }
            other => return Err(DashboardError::UnsupportedExtension(other.to_string()).into()),
        };

        log::debug!(
            "Opened {} with {} sheet(s): {:?}",
            path.display(),
            sheet_names.len(),
            sheet_names
        );

        Ok(Workbook {
            sheet_names,
            source,
        })
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    /// Read one sheet as a positional grid.
    pub fn read_sheet(&mut self, name: &str) -> Result<RawGrid> {
        if !self.sheet_names.iter().any(|s| s == name) {
            return Err(DashboardError::UnknownSheet(name.to_string()).into());
        }

        let grid = match &mut self.source {
            Source::Csv(grid) => grid.clone(),
            Source::Spreadsheet(sheets) => {
                let range = sheets
                    .worksheet_range(name)
                    .with_context(|| format!("reading sheet '{name}'"))?;

                // calamine ranges begin at the first used cell; pad back to A1
                // so that row indices match the physical sheet.
                let (row_offset, col_offset) = range
                    .start()
                    .map(|(r, c)| (r as usize, c as usize))
                    .unwrap_or((0, 0));

                let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); row_offset];
                rows.extend(range.rows().map(|row| {
                    std::iter::repeat(CellValue::Empty)
                        .take(col_offset)
                        .chain(row.iter().map(cell_value))
                        .collect::<Vec<_>>()
                }));
                RawGrid::new(name, rows)
            }
        };

        log::debug!("Read sheet '{name}': {} row(s)", grid.len());
        Ok(grid)
    }
}

// ---------------------------------------------------------------------------
// calamine cell conversion
// ---------------------------------------------------------------------------

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(v) => CellValue::Number(*v),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(_) | Data::Empty => CellValue::Empty,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout mirrors a sheet: banner row, header row, data rows.
/// No header handling here; the normalizer promotes the header row.
fn load_csv(path: &Path, sheet: &str) -> Result<RawGrid> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(RawGrid::new(sheet, rows))
}
