use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

fn linear(r: u8, g: u8, b: u8) -> LinSrgb {
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}

/// Piecewise-linear blend through evenly spaced stops, `t` in [0,1].
fn blend(stops: &[(u8, u8, u8)], t: f64) -> Color32 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.5 };
    let segments = stops.len().saturating_sub(1).max(1);
    let pos = t as f32 * segments as f32;
    let idx = (pos.floor() as usize).min(segments - 1);
    let local = pos - idx as f32;

    let (r0, g0, b0) = stops[idx];
    let (r1, g1, b1) = stops[(idx + 1).min(stops.len() - 1)];
    let mixed = linear(r0, g0, b0).mix(linear(r1, g1, b1), local);
    to_color32(Srgb::from_linear(mixed))
}

// ---------------------------------------------------------------------------
// Continuous scales
// ---------------------------------------------------------------------------

const RDBU_REVERSED: [(u8, u8, u8); 5] = [
    (5, 48, 97),
    (67, 147, 195),
    (247, 247, 247),
    (214, 96, 77),
    (103, 0, 31),
];

const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

/// Diverging blue → white → red over [-1, 1], white at 0.
pub fn diverging(value: f64) -> Color32 {
    blend(&RDBU_REVERSED, (value + 1.0) / 2.0)
}

/// Sequential colour for `value` placed within `[min, max]`.
pub fn sequential(value: f64, min: f64, max: f64) -> Color32 {
    let span = max - min;
    let t = if span.abs() < f64::EPSILON { 0.5 } else { (value - min) / span };
    blend(&VIRIDIS, t)
}

// ---------------------------------------------------------------------------
// Color mapping: category → Color32
// ---------------------------------------------------------------------------

/// Maps the categories of a column (genders) to distinct colours.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    pub column: String,
    mapping: BTreeMap<String, Color32>,
    order: Vec<String>,
}

impl ColorMap {
    /// Build a colour map, in the given order, from the column's distinct values.
    pub fn new(column: &str, categories: &[String]) -> Self {
        let palette = generate_palette(categories.len());
        let mapping: BTreeMap<String, Color32> = categories
            .iter()
            .cloned()
            .zip(palette)
            .collect();

        ColorMap {
            column: column.to_string(),
            mapping,
            order: categories.to_vec(),
        }
    }

    /// Look up the colour for a category; unknown values are grey.
    pub fn color_for(&self, value: &str) -> Color32 {
        self.mapping.get(value).copied().unwrap_or(Color32::GRAY)
    }

    /// Legend entries (label → colour) in category order.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.order
            .iter()
            .map(|v| (v.clone(), self.color_for(v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let colours = generate_palette(3);
        assert_eq!(colours.len(), 3);
        assert_ne!(colours[0], colours[1]);
        assert_ne!(colours[1], colours[2]);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn diverging_scale_is_white_at_zero() {
        assert_eq!(diverging(0.0), Color32::from_rgb(247, 247, 247));
        assert_eq!(diverging(-1.0), Color32::from_rgb(5, 48, 97));
        assert_eq!(diverging(1.0), Color32::from_rgb(103, 0, 31));
        // out-of-range input saturates
        assert_eq!(diverging(3.0), diverging(1.0));
    }

    #[test]
    fn sequential_scale_spans_the_range() {
        assert_eq!(sequential(0.0, 0.0, 10.0), Color32::from_rgb(68, 1, 84));
        assert_eq!(sequential(10.0, 0.0, 10.0), Color32::from_rgb(253, 231, 37));
        assert_eq!(sequential(4.0, 4.0, 4.0), sequential(5.0, 0.0, 10.0));
    }

    #[test]
    fn unknown_category_is_grey() {
        let genders = vec!["Male".to_string(), "Female".to_string()];
        let map = ColorMap::new("Gender", &genders);
        assert_ne!(map.color_for("Male"), map.color_for("Female"));
        assert_eq!(map.color_for("Other"), Color32::GRAY);
        let labels: Vec<_> = map.legend_entries().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, genders);
    }
}
