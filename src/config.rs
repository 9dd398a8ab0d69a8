use std::path::PathBuf;

use clap::Parser;

use crate::chart::{ChartOptions, ChartStyle};
use crate::data::filter::FilterSelection;
use crate::data::model::Table;
use crate::data::normalize::NormalizeOptions;

pub const DEFAULT_WORKBOOK: &str = "Expense_Report_Jul_Dec_2024.xlsx";

/// Command line / environment configuration.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "expense-dashboard",
    version,
    about = "Monthly expense analysis dashboard",
    long_about = "Reads a workbook with one sheet per month (banner row, header row \
                  with Name / Payment Mode / Amount, then expense rows) and charts \
                  the selected expenses."
)]
pub struct Config {
    /// Workbook to open (.xlsx, .xls, .ods or .csv)
    #[arg(env = "EXPENSE_DASHBOARD_FILE", default_value = DEFAULT_WORKBOOK)]
    pub file: PathBuf,

    /// Month (sheet name) to show first; defaults to the first sheet
    #[arg(long)]
    pub month: Option<String>,

    /// Chart style: bar, line, area or scatter
    #[arg(long, default_value = "bar")]
    pub style: ChartStyle,

    /// Keep the "Total Amount" summary row in the chart
    #[arg(long)]
    pub include_total: bool,

    /// Zero-based row index of the column headers
    #[arg(long, default_value_t = 1)]
    pub header_row: usize,

    /// Currency symbol used in labels and hover text
    #[arg(long, default_value = "$")]
    pub currency: String,

    /// Print the chart as JSON instead of opening a window
    #[arg(long)]
    pub headless: bool,

    /// Payment mode to select with --headless (repeatable; default: all)
    #[arg(long = "mode", value_name = "MODE")]
    pub modes: Vec<String>,

    /// Expense name to select with --headless (repeatable; default: all)
    #[arg(long = "name", value_name = "NAME")]
    pub names: Vec<String>,
}

impl Config {
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            header_row: self.header_row,
        }
    }

    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions {
            currency_symbol: self.currency.clone(),
            ..ChartOptions::default()
        }
    }

    /// Headless selections over `table`. A dimension with no `--mode` /
    /// `--name` given selects every value the table has.
    pub fn selection(&self, table: &Table) -> FilterSelection {
        let all = FilterSelection::all(table);
        FilterSelection {
            payment_modes: if self.modes.is_empty() {
                all.payment_modes
            } else {
                self.modes.iter().cloned().collect()
            },
            names: if self.names.is_empty() {
                all.names
            } else {
                self.names.iter().cloned().collect()
            },
        }
    }
}
