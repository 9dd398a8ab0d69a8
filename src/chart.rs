use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::data::series::Series;
use crate::error::DashboardError;

// ---------------------------------------------------------------------------
// Chart style
// ---------------------------------------------------------------------------

/// The four visual encodings. Closed set: there is no fallback style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartStyle {
    #[default]
    Bar,
    Line,
    Area,
    Scatter,
}

impl ChartStyle {
    pub const ALL: [ChartStyle; 4] = [
        ChartStyle::Bar,
        ChartStyle::Line,
        ChartStyle::Area,
        ChartStyle::Scatter,
    ];
}

impl fmt::Display for ChartStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChartStyle::Bar => "Bar",
            ChartStyle::Line => "Line",
            ChartStyle::Area => "Area",
            ChartStyle::Scatter => "Scatter",
        };
        f.write_str(s)
    }
}

impl FromStr for ChartStyle {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" => Ok(ChartStyle::Bar),
            "line" => Ok(ChartStyle::Line),
            "area" => Ok(ChartStyle::Area),
            "scatter" => Ok(ChartStyle::Scatter),
            _ => Err(DashboardError::UnknownChartStyle(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Options and output
// ---------------------------------------------------------------------------

/// Display toggles shared by every style.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    /// Attach a currency text label to each bar.
    pub value_labels: bool,
    /// Attach hover annotations to each point.
    pub hover_text: bool,
    pub currency_symbol: String,
    pub x_axis_label: String,
    pub y_axis_label: String,
}

impl Default for ChartOptions {
    fn default() -> Self {
        ChartOptions {
            value_labels: true,
            hover_text: true,
            currency_symbol: "$".to_string(),
            x_axis_label: "Expense Type".to_string(),
            y_axis_label: "Amount".to_string(),
        }
    }
}

/// How the points are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Encoding {
    pub bars: bool,
    pub lines: bool,
    pub markers: bool,
    pub fill_to_zero: bool,
}

impl Encoding {
    pub fn for_style(style: ChartStyle) -> Self {
        let none = Encoding {
            bars: false,
            lines: false,
            markers: false,
            fill_to_zero: false,
        };
        match style {
            ChartStyle::Bar => Encoding { bars: true, ..none },
            ChartStyle::Line => Encoding {
                lines: true,
                markers: true,
                ..none
            },
            ChartStyle::Area => Encoding {
                lines: true,
                markers: true,
                fill_to_zero: true,
                ..none
            },
            ChartStyle::Scatter => Encoding {
                markers: true,
                ..none
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub category: String,
    /// `None` renders as a gap.
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover: Option<String>,
}

/// A render-ready chart, rebuilt on every interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub style: ChartStyle,
    pub title: String,
    pub x_axis_label: String,
    pub y_axis_label: String,
    pub encoding: Encoding,
    pub points: Vec<ChartPoint>,
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Build a chart with the default options.
pub fn build(series: &Series, style: ChartStyle, title: &str) -> ChartSpec {
    build_with(series, style, title, &ChartOptions::default())
}

/// Map a series onto `style`. An empty series gives an empty chart.
pub fn build_with(
    series: &Series,
    style: ChartStyle,
    title: &str,
    options: &ChartOptions,
) -> ChartSpec {
    let encoding = Encoding::for_style(style);
    let symbol = options.currency_symbol.as_str();

    let points = series
        .points
        .iter()
        .map(|p| {
            let value = p.value.value();
            let formatted = value.map(|v| format_currency(v, symbol));
            ChartPoint {
                category: p.category.clone(),
                value,
                label: formatted.clone().filter(|_| encoding.bars && options.value_labels),
                hover: options.hover_text.then(|| {
                    format!(
                        "{} — {}",
                        p.category,
                        formatted.as_deref().unwrap_or("n/a")
                    )
                }),
            }
        })
        .collect();

    ChartSpec {
        style,
        title: title.to_string(),
        x_axis_label: options.x_axis_label.clone(),
        y_axis_label: options.y_axis_label.clone(),
        encoding,
        points,
    }
}

/// `-$1,234.50` style: two decimals, comma-grouped thousands.
/// Non-finite values print as `n/a`.
pub fn format_currency(value: f64, symbol: &str) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    let fixed = format!("{:.2}", value.abs());
    let (digits, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{symbol}{grouped}.{frac}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Amount;
    use crate::data::series::SeriesPoint;

    fn series(points: &[(&str, Amount)]) -> Series {
        Series {
            points: points
                .iter()
                .map(|(c, v)| SeriesPoint {
                    category: c.to_string(),
                    value: *v,
                })
                .collect(),
        }
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0, "$"), "$0.00");
        assert_eq!(format_currency(50.0, "$"), "$50.00");
        assert_eq!(format_currency(1234.5, "$"), "$1,234.50");
        assert_eq!(format_currency(1_000_000.0, "₹"), "₹1,000,000.00");
        assert_eq!(format_currency(-999.999, "$"), "-$1,000.00");
        assert_eq!(format_currency(-0.001, "$"), "$0.00");
    }

    #[test]
    fn test_format_currency_beyond_integer_range() {
        assert_eq!(format_currency(1e20, "$"), "$100,000,000,000,000,000,000.00");
        assert_eq!(format_currency(-2e19, "$"), "-$20,000,000,000,000,000,000.00");
        assert_eq!(format_currency(f64::NAN, "$"), "n/a");
        assert_eq!(format_currency(f64::INFINITY, "$"), "n/a");
    }

    #[test]
    fn test_style_parsing_rejects_unknown() {
        assert_eq!("Bar".parse::<ChartStyle>(), Ok(ChartStyle::Bar));
        assert_eq!(" scatter ".parse::<ChartStyle>(), Ok(ChartStyle::Scatter));
        assert_eq!(
            "pie".parse::<ChartStyle>(),
            Err(DashboardError::UnknownChartStyle("pie".into()))
        );
        for style in ChartStyle::ALL {
            assert_eq!(style.to_string().parse::<ChartStyle>(), Ok(style));
        }
    }

    #[test]
    fn test_bar_chart_two_food_bars() {
        let s = series(&[("Food", Amount::Present(50.0)), ("Food", Amount::Present(30.0))]);
        let chart = build(&s, ChartStyle::Bar, "Expenses for Jul");

        assert!(chart.encoding.bars);
        assert_eq!(chart.points.len(), 2);
        assert!(chart.points.iter().all(|p| p.category == "Food"));
        assert_eq!(chart.points[0].value, Some(50.0));
        assert_eq!(chart.points[1].value, Some(30.0));
        assert_eq!(chart.points[0].label.as_deref(), Some("$50.00"));
        assert_eq!(chart.points[1].hover.as_deref(), Some("Food — $30.00"));
        assert_eq!(chart.x_axis_label, "Expense Type");
        assert_eq!(chart.y_axis_label, "Amount");
    }

    #[test]
    fn test_encodings_are_distinct() {
        let line = Encoding::for_style(ChartStyle::Line);
        let area = Encoding::for_style(ChartStyle::Area);
        let scatter = Encoding::for_style(ChartStyle::Scatter);
        assert!(line.lines && line.markers && !line.fill_to_zero);
        assert_eq!(area, Encoding { fill_to_zero: true, ..line });
        assert!(scatter.markers && !scatter.lines && !scatter.bars);
    }

    #[test]
    fn test_hover_identical_across_styles() {
        let s = series(&[("Rent", Amount::Present(1200.0)), ("Gym", Amount::Missing)]);
        let hovers: Vec<Vec<Option<String>>> = ChartStyle::ALL
            .iter()
            .map(|&style| build(&s, style, "t").points.into_iter().map(|p| p.hover).collect())
            .collect();
        assert!(hovers.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(hovers[0][1].as_deref(), Some("Gym — n/a"));
    }

    #[test]
    fn test_labels_only_on_bars() {
        let s = series(&[("Rent", Amount::Present(1.0))]);
        assert!(build(&s, ChartStyle::Line, "t").points[0].label.is_none());
        let plain = ChartOptions {
            value_labels: false,
            hover_text: false,
            ..ChartOptions::default()
        };
        let p = &build_with(&s, ChartStyle::Bar, "t", &plain).points[0];
        assert!(p.label.is_none() && p.hover.is_none());
    }

    #[test]
    fn test_empty_series_is_renderable() {
        let chart = build(&Series::default(), ChartStyle::Area, "Expenses for Dec");
        assert!(chart.is_empty());
        assert_eq!(chart.title, "Expenses for Dec");
    }

    #[test]
    fn test_build_is_deterministic() {
        let s = series(&[("Food", Amount::Present(12.0))]);
        assert_eq!(build(&s, ChartStyle::Line, "t"), build(&s, ChartStyle::Line, "t"));
    }
}
