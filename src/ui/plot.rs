use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{
    Bar, BarChart, Legend, Line, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Text,
};

use crate::chart::ChartSpec;
use crate::state::AppState;

const LINE_COLOR: Color32 = Color32::LIGHT_BLUE;

// ---------------------------------------------------------------------------
// Expense chart (central panel)
// ---------------------------------------------------------------------------

/// Render the current chart in the central panel.
pub fn expense_plot(ui: &mut Ui, state: &AppState) {
    let Some(chart) = &state.chart else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open an expense report to get started  (File → Open…)");
        });
        return;
    };

    ui.heading(&chart.title);
    if chart.is_empty() {
        ui.label("Nothing selected for this month.");
    }

    let categories: Vec<&str> = chart.points.iter().map(|p| p.category.as_str()).collect();
    let hovers: Vec<&str> = chart
        .points
        .iter()
        .map(|p| p.hover.as_deref().unwrap_or(""))
        .collect();

    Plot::new("expense_plot")
        .legend(Legend::default())
        .x_axis_label(chart.x_axis_label.as_str())
        .y_axis_label(chart.y_axis_label.as_str())
        .x_axis_formatter(move |mark, _range| {
            category_at(&categories, mark.value)
                .map(str::to_string)
                .unwrap_or_default()
        })
        .label_formatter(move |_name, point: &PlotPoint| {
            match nearest_index(hovers.len(), point.x) {
                Some(i) if !hovers[i].is_empty() => hovers[i].to_string(),
                _ => String::new(),
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let encoding = chart.encoding;

            if encoding.bars {
                for (category, bars) in bars_by_category(chart, state) {
                    let color = state.colors.color_for(&category);
                    plot_ui.bar_chart(BarChart::new(bars).name(&category).color(color));
                }
                for (i, p) in chart.points.iter().enumerate() {
                    if let (Some(label), Some(v)) = (&p.label, p.value) {
                        let text = RichText::new(label).size(11.0);
                        plot_ui.text(Text::new(PlotPoint::new(i as f64, v), text));
                    }
                }
            }

            if encoding.lines {
                for segment in segments(chart) {
                    let points: PlotPoints = segment.into_iter().collect();
                    let mut line = Line::new(points).color(LINE_COLOR).width(2.0);
                    if encoding.fill_to_zero {
                        line = line.fill(0.0_f32);
                    }
                    plot_ui.line(line);
                }
            }

            if encoding.markers {
                for (i, p) in chart.points.iter().enumerate() {
                    let Some(v) = p.value else { continue };
                    let points = Points::new(vec![[i as f64, v]])
                        .shape(MarkerShape::Circle)
                        .radius(4.0)
                        .color(state.colors.color_for(&p.category))
                        .name(&p.category);
                    plot_ui.points(points);
                }
            }
        });
}

/// Category shown under an integer grid mark.
fn category_at<'a>(categories: &[&'a str], x: f64) -> Option<&'a str> {
    if (x - x.round()).abs() > 1e-6 {
        return None;
    }
    nearest_index(categories.len(), x).map(|i| categories[i])
}

fn nearest_index(len: usize, x: f64) -> Option<usize> {
    let i = x.round();
    (i >= 0.0 && (i as usize) < len).then_some(i as usize)
}

/// One bar per point, grouped by category so each category gets a legend
/// entry. Missing values have no bar.
fn bars_by_category(chart: &ChartSpec, state: &AppState) -> Vec<(String, Vec<Bar>)> {
    let mut groups: Vec<(String, Vec<Bar>)> = Vec::new();
    for (i, p) in chart.points.iter().enumerate() {
        let Some(v) = p.value else { continue };
        let bar = Bar::new(i as f64, v)
            .width(0.6)
            .fill(state.colors.color_for(&p.category))
            .name(p.hover.as_deref().unwrap_or(&p.category));
        match groups.iter_mut().find(|(c, _)| *c == p.category) {
            Some((_, bars)) => bars.push(bar),
            None => groups.push((p.category.clone(), vec![bar])),
        }
    }
    groups
}

/// Runs of consecutive present values; a missing value breaks the line.
fn segments(chart: &ChartSpec) -> Vec<Vec<[f64; 2]>> {
    let mut out: Vec<Vec<[f64; 2]>> = vec![Vec::new()];
    for (i, p) in chart.points.iter().enumerate() {
        match p.value {
            Some(v) => {
                if let Some(run) = out.last_mut() {
                    run.push([i as f64, v]);
                }
            }
            None => out.push(Vec::new()),
        }
    }
    out.retain(|run| !run.is_empty());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_at_integer_marks_only() {
        let cats = ["Food", "Rent"];
        assert_eq!(category_at(&cats, 0.0), Some("Food"));
        assert_eq!(category_at(&cats, 1.0), Some("Rent"));
        assert_eq!(category_at(&cats, 0.5), None);
        assert_eq!(category_at(&cats, 2.0), None);
        assert_eq!(category_at(&cats, -1.0), None);
    }

    #[test]
    fn test_missing_values_split_lines() {
        use crate::chart::{build, ChartStyle};
        use crate::data::model::Amount;
        use crate::data::series::{Series, SeriesPoint};

        let values = [
            Amount::Present(1.0),
            Amount::Missing,
            Amount::Present(2.0),
            Amount::Present(3.0),
        ];
        let series = Series {
            points: values
                .iter()
                .map(|v| SeriesPoint {
                    category: "Food".to_string(),
                    value: *v,
                })
                .collect(),
        };
        let runs = segments(&build(&series, ChartStyle::Line, "t"));
        assert_eq!(runs, vec![vec![[0.0, 1.0]], vec![[2.0, 2.0], [3.0, 3.0]]]);
    }

    #[test]
    fn test_nearest_index() {
        assert_eq!(nearest_index(3, 1.4), Some(1));
        assert_eq!(nearest_index(3, 2.6), None);
        assert_eq!(nearest_index(0, 0.0), None);
    }
}
