use eframe::egui;

use crate::config::Config;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ExpenseDashboardApp {
    pub state: AppState,
}

impl ExpenseDashboardApp {
    /// Start with the configured workbook already open (if it exists).
    pub fn new(config: &Config) -> Self {
        let mut state = AppState::from_config(config);
        if config.file.exists() {
            state.open_path(&config.file, config.month.as_deref());
        } else {
            log::warn!("{} not found; waiting for File → Open", config.file.display());
        }
        Self { state }
    }
}

impl eframe::App for ExpenseDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: month, filters, style ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::expense_plot(ui, &self.state);
        });
    }
}
