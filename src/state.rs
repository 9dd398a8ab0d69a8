use std::path::{Path, PathBuf};

use crate::chart::{ChartOptions, ChartSpec, ChartStyle};
use crate::color::CategoryColors;
use crate::config::Config;
use crate::data::filter::FilterSelection;
use crate::data::loader::Workbook;
use crate::data::model::Table;
use crate::data::normalize::NormalizeOptions;
use crate::pipeline::{chart_title, load_table, render_table};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Workbook file (None until a file is loaded).
    pub path: Option<PathBuf>,

    /// Sheet names of the open workbook, in workbook order.
    pub months: Vec<String>,

    /// Selected month (sheet name).
    pub month: Option<String>,

    /// Table read for the last chart; source of the checklist values.
    pub table: Option<Table>,

    /// Payment mode / name selections; reset on every month change.
    pub selection: FilterSelection,

    pub style: ChartStyle,

    /// Drop the "Total Amount" summary row from the chart.
    pub exclude_sentinel: bool,

    pub normalize: NormalizeOptions,
    pub chart_options: ChartOptions,

    /// Chart for the current selections (rebuilt, never patched).
    pub chart: Option<ChartSpec>,

    /// Colour per plotted category.
    pub colors: CategoryColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            path: None,
            months: Vec::new(),
            month: None,
            table: None,
            selection: FilterSelection::default(),
            style: ChartStyle::default(),
            exclude_sentinel: true,
            normalize: NormalizeOptions::default(),
            chart_options: ChartOptions::default(),
            chart: None,
            colors: CategoryColors::default(),
            status_message: None,
        }
    }
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        AppState {
            style: config.style,
            exclude_sentinel: !config.include_total,
            normalize: config.normalize_options(),
            chart_options: config.chart_options(),
            ..Default::default()
        }
    }

    /// Open a workbook and show `month`, or its first sheet.
    pub fn open_path(&mut self, path: &Path, month: Option<&str>) {
        match Workbook::open(path) {
            Ok(workbook) => {
                self.months = workbook.sheet_names().to_vec();
                let first = month
                    .map(str::to_string)
                    .or_else(|| self.months.first().cloned());
                self.path = Some(path.to_path_buf());
                self.month = None;
                self.table = None;
                self.chart = None;
                self.status_message = None;
                match first {
                    Some(m) => self.select_month(&m),
                    None => self.status_message = Some("Workbook has no sheets".to_string()),
                }
            }
            Err(e) => {
                log::error!("Failed to open {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Show a month; selections start with every value selected.
    pub fn select_month(&mut self, month: &str) {
        if self.path.is_none() {
            return;
        }
        self.month = Some(month.to_string());
        self.reload(true);
    }

    /// Re-run the pipeline for the current selections.
    pub fn rebuild(&mut self) {
        self.reload(false);
    }

    /// Read the month's sheet from disk again and rebuild the chart, so
    /// edits to the file show up on the next interaction.
    fn reload(&mut self, reset_selection: bool) {
        let (Some(path), Some(month)) = (self.path.clone(), self.month.clone()) else {
            self.chart = None;
            return;
        };

        match load_table(&path, &month, &self.normalize) {
            Ok(table) => {
                if reset_selection {
                    log::info!(
                        "Loaded {} record(s) for {month} ({} non-numeric amount(s))",
                        table.len(),
                        table.missing_amounts()
                    );
                    self.selection = FilterSelection::all(&table);
                }
                let chart = render_table(
                    &table,
                    &self.selection,
                    self.style,
                    &chart_title(&month),
                    self.exclude_sentinel,
                    &self.chart_options,
                );
                self.colors = CategoryColors::for_chart(&chart);
                self.chart = Some(chart);
                self.table = Some(table);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load sheet '{month}': {e:#}");
                self.table = None;
                self.chart = None;
                if reset_selection {
                    self.selection = FilterSelection::default();
                }
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Sum of the plotted values.
    pub fn plotted_total(&self) -> f64 {
        self.chart
            .iter()
            .flat_map(|c| c.points.iter())
            .filter_map(|p| p.value)
            .sum()
    }

    pub fn set_style(&mut self, style: ChartStyle) {
        self.style = style;
        self.rebuild();
    }

    pub fn set_exclude_sentinel(&mut self, exclude: bool) {
        self.exclude_sentinel = exclude;
        self.rebuild();
    }

    pub fn toggle_payment_mode(&mut self, mode: &str) {
        self.selection.toggle_payment_mode(mode);
        self.rebuild();
    }

    pub fn toggle_name(&mut self, name: &str) {
        self.selection.toggle_name(name);
        self.rebuild();
    }

    /// Select every payment mode (`true`) or none (`false`).
    pub fn select_all_modes(&mut self, all: bool) {
        self.selection.payment_modes = match (&self.table, all) {
            (Some(table), true) => table.payment_modes().into_iter().collect(),
            _ => Default::default(),
        };
        self.rebuild();
    }

    /// Select every expense name (`true`) or none (`false`).
    pub fn select_all_names(&mut self, all: bool) {
        self.selection.names = match (&self.table, all) {
            (Some(table), true) => table.names().into_iter().collect(),
            _ => Default::default(),
        };
        self.rebuild();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_csv(body: &str) -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Jul.csv");
        std::fs::write(&path, body).unwrap();
        let mut state = AppState::default();
        state.open_path(&path, None);
        (dir, state)
    }

    const JULY: &str = "HAI TIDE,,\n\
                        Name,Payment Mode,Amount\n\
                        Food,Cash,50\n\
                        Food,Card,30\n\
                        Rent,UPI,abc\n\
                        Total Amount,Cash,80\n";

    #[test]
    fn test_open_selects_first_month_with_everything_selected() {
        let (_dir, state) = state_with_csv(JULY);
        assert_eq!(state.month.as_deref(), Some("Jul"));
        assert_eq!(state.selection.payment_modes.len(), 3);
        assert_eq!(state.selection.names.len(), 3);

        let chart = state.chart.as_ref().unwrap();
        assert_eq!(chart.title, "Expenses for Jul");
        assert_eq!(chart.points.len(), 3);
        assert_eq!(state.plotted_total(), 80.0);
    }

    #[test]
    fn test_interactions_rebuild_chart() {
        let (_dir, mut state) = state_with_csv(JULY);

        state.toggle_payment_mode("Card");
        assert_eq!(state.chart.as_ref().unwrap().points.len(), 2);

        state.set_exclude_sentinel(false);
        assert_eq!(state.chart.as_ref().unwrap().points.len(), 3);

        state.set_style(ChartStyle::Scatter);
        assert_eq!(state.chart.as_ref().unwrap().style, ChartStyle::Scatter);

        state.select_all_modes(false);
        assert!(state.chart.as_ref().unwrap().is_empty());

        state.select_all_modes(true);
        state.select_all_names(false);
        assert!(state.chart.as_ref().unwrap().is_empty());
    }

    #[test]
    fn test_missing_column_reported_in_status() {
        let (_dir, state) = state_with_csv("banner\nName,Payment Mode,Cost\nFood,Cash,1\n");
        assert!(state.table.is_none());
        assert!(state.chart.is_none());
        assert!(state.status_message.unwrap().contains("'Amount'"));
    }

    #[test]
    fn test_open_missing_file_reports_error() {
        let mut state = AppState::default();
        state.open_path(Path::new("/nonexistent/report.xlsx"), None);
        assert!(state.path.is_none());
        assert!(state.status_message.is_some());
    }

    #[test]
    fn test_interactions_read_the_file_again() {
        let (dir, mut state) = state_with_csv(JULY);
        assert_eq!(state.chart.as_ref().unwrap().points[0].value, Some(50.0));

        std::fs::write(dir.path().join("Jul.csv"), JULY.replace("Food,Cash,50", "Food,Cash,75"))
            .unwrap();
        state.toggle_payment_mode("Card");
        state.toggle_payment_mode("Card");
        let chart = state.chart.as_ref().unwrap();
        assert_eq!(chart.points[0].value, Some(75.0));
        assert_eq!(chart.points.len(), 3);

        std::fs::write(dir.path().join("Jul.csv"), JULY.replace("Food,Card,30", "Food,Card,35"))
            .unwrap();
        state.set_style(ChartStyle::Line);
        assert_eq!(state.chart.as_ref().unwrap().points[1].value, Some(35.0));
    }

    #[test]
    fn test_default_excludes_total_row() {
        assert!(AppState::default().exclude_sentinel);
    }
}
