use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::chart::{format_currency, ChartStyle};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – month, filters, chart style
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.path.is_none() {
        ui.label("No workbook loaded.");
        return;
    }

    // Clone what we need so we can mutate state inside the closures.
    let months = state.months.clone();
    let (modes, names) = state
        .table
        .as_ref()
        .map(|t| (t.payment_modes(), t.names()))
        .unwrap_or_default();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Month selector ----
            ui.strong("Month");
            let current = state.month.clone().unwrap_or_default();
            egui::ComboBox::from_id_salt("month")
                .selected_text(&current)
                .show_ui(ui, |ui: &mut Ui| {
                    for month in &months {
                        if ui.selectable_label(current == *month, month).clicked()
                            && current != *month
                        {
                            state.select_month(month);
                        }
                    }
                });
            ui.separator();

            // ---- Payment modes ----
            checklist(
                ui,
                "Payment Modes",
                &modes,
                |s, v| s.selection.payment_modes.contains(v),
                state,
                AppState::toggle_payment_mode,
                AppState::select_all_modes,
            );

            // ---- Expense names ----
            checklist(
                ui,
                "Expense Types",
                &names,
                |s, v| s.selection.names.contains(v),
                state,
                AppState::toggle_name,
                AppState::select_all_names,
            );
            ui.separator();

            // ---- Chart style ----
            ui.strong("Chart Style");
            for style in ChartStyle::ALL {
                if ui.radio(state.style == style, style.to_string()).clicked() {
                    state.set_style(style);
                }
            }
            ui.separator();

            let mut exclude = state.exclude_sentinel;
            if ui.checkbox(&mut exclude, "Exclude Total Amount").changed() {
                state.set_exclude_sentinel(exclude);
            }
        });
}

/// A collapsible checkbox list with All / None buttons.
fn checklist(
    ui: &mut Ui,
    title: &str,
    values: &[String],
    is_selected: impl Fn(&AppState, &String) -> bool,
    state: &mut AppState,
    toggle: fn(&mut AppState, &str),
    select_all: fn(&mut AppState, bool),
) {
    let n_selected = values.iter().filter(|v| is_selected(state, v)).count();
    let header_text = format!("{title}  ({n_selected}/{})", values.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    select_all(state, true);
                }
                if ui.small_button("None").clicked() {
                    select_all(state, false);
                }
            });

            for value in values {
                let mut checked = is_selected(state, value);
                if ui.checkbox(&mut checked, value.as_str()).changed() {
                    toggle(state, value);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            let plotted = state.chart.as_ref().map_or(0, |c| c.points.len());
            ui.label(format!("{} records, {plotted} plotted", table.len()));
            ui.separator();
            ui.label(format!(
                "Total: {}",
                format_currency(state.plotted_total(), &state.chart_options.currency_symbol)
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open expense report")
        .add_filter("Supported files", &["xlsx", "xlsm", "xlsb", "xls", "ods", "csv"])
        .add_filter("Excel", &["xlsx", "xlsm", "xlsb", "xls"])
        .add_filter("OpenDocument", &["ods"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path, None);
    }
}
