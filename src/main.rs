use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;

use expense_dashboard::app::ExpenseDashboardApp;
use expense_dashboard::config::Config;
use expense_dashboard::data::loader::Workbook;
use expense_dashboard::data::normalize::normalize_with;
use expense_dashboard::pipeline::{chart_title, render_table};

fn main() -> Result<()> {
    env_logger::init();
    let config = Config::parse();

    if config.headless {
        return run_headless(&config);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Expense Dashboard – Monthly Expense Analysis",
        options,
        Box::new(move |_cc| Ok(Box::new(ExpenseDashboardApp::new(&config)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}

/// Print the chart for one month as JSON.
fn run_headless(config: &Config) -> Result<()> {
    let mut workbook = Workbook::open(&config.file)?;
    let sheet = match &config.month {
        Some(month) => month.clone(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .context("workbook has no sheets")?,
    };

    let grid = workbook.read_sheet(&sheet)?;
    let table = normalize_with(&grid, &config.normalize_options())
        .with_context(|| format!("normalizing sheet '{sheet}'"))?;
    let chart = render_table(
        &table,
        &config.selection(&table),
        config.style,
        &chart_title(&sheet),
        !config.include_total,
        &config.chart_options(),
    );

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &chart).context("writing chart JSON")?;
    writeln!(stdout)?;
    Ok(())
}
