use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::chart::ChartSpec;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// `n` distinct category colours: evenly spaced hues, fixed saturation
/// and lightness.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.55);
            let rgb: Srgb = hsl.into_color();
            let (r, g, b) = rgb.into_format::<u8>().into_components();
            Color32::from_rgb(r, g, b)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: expense category → Color32
// ---------------------------------------------------------------------------

/// Gives every category of a chart its own colour, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct CategoryColors {
    mapping: BTreeMap<String, Color32>,
}

impl CategoryColors {
    pub fn for_chart(chart: &ChartSpec) -> Self {
        let mut categories: Vec<&str> = Vec::new();
        for p in &chart.points {
            if !categories.contains(&p.category.as_str()) {
                categories.push(&p.category);
            }
        }
        let palette = generate_palette(categories.len());
        let mapping = categories
            .into_iter()
            .zip(palette)
            .map(|(c, color)| (c.to_string(), color))
            .collect();
        CategoryColors { mapping }
    }

    /// Colour for a category; grey for anything not in the chart.
    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping.get(category).copied().unwrap_or(Color32::GRAY)
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}
