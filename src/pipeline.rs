use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::chart::{build_with, ChartOptions, ChartSpec, ChartStyle};
use crate::data::filter::{filter_table, FilterSelection};
use crate::data::loader::Workbook;
use crate::data::model::Table;
use crate::data::normalize::{normalize_with, NormalizeOptions};
use crate::data::series::flatten;

/// Everything needed to draw one chart. No state outlives a request.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub path: PathBuf,
    pub sheet: String,
    pub selection: FilterSelection,
    pub style: ChartStyle,
    pub exclude_sentinel: bool,
    pub normalize: NormalizeOptions,
    pub options: ChartOptions,
}

/// Title shown above a month's chart.
pub fn chart_title(sheet: &str) -> String {
    format!("Expenses for {sheet}")
}

/// Run loader → normalizer → filter → flatten → builder for one request.
pub fn render_request(request: &RenderRequest) -> Result<ChartSpec> {
    let table = load_table(&request.path, &request.sheet, &request.normalize)?;
    Ok(render_table(
        &table,
        &request.selection,
        request.style,
        &chart_title(&request.sheet),
        request.exclude_sentinel,
        &request.options,
    ))
}

/// Open the workbook and normalize one of its sheets.
pub fn load_table(path: &Path, sheet: &str, normalize: &NormalizeOptions) -> Result<Table> {
    let mut workbook = Workbook::open(path)?;
    let grid = workbook.read_sheet(sheet)?;
    normalize_with(&grid, normalize).with_context(|| format!("normalizing sheet '{sheet}'"))
}

/// The pure tail of the pipeline, from an already normalized table.
pub fn render_table(
    table: &Table,
    selection: &FilterSelection,
    style: ChartStyle,
    title: &str,
    exclude_sentinel: bool,
    options: &ChartOptions,
) -> ChartSpec {
    let filtered = filter_table(table, selection);
    let series = flatten(&filtered, exclude_sentinel);
    log::debug!(
        "{title}: {} of {} record(s) selected, {} point(s) as {style}",
        filtered.len(),
        table.len(),
        series.len()
    );
    build_with(&series, style, title, options)
}
