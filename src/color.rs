use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::config::ColorScheme;

// ---------------------------------------------------------------------------
// Colour palettes
// ---------------------------------------------------------------------------

/// Tableau's ten categorical colours.
pub const TABLEAU10: [Color32; 10] = [
    Color32::from_rgb(0x4e, 0x79, 0xa7),
    Color32::from_rgb(0xf2, 0x8e, 0x2c),
    Color32::from_rgb(0xe1, 0x57, 0x59),
    Color32::from_rgb(0x76, 0xb7, 0xb2),
    Color32::from_rgb(0x59, 0xa1, 0x4f),
    Color32::from_rgb(0xed, 0xc9, 0x49),
    Color32::from_rgb(0xaf, 0x7a, 0xa1),
    Color32::from_rgb(0xff, 0x9d, 0xa7),
    Color32::from_rgb(0x9c, 0x75, 0x5f),
    Color32::from_rgb(0xba, 0xb0, 0xab),
];

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
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// `n` colours from `scheme`. Tableau10 repeats after ten entries, the way
/// an ordinal scale recycles its range.
pub fn scheme_colors(scheme: ColorScheme, n: usize) -> Vec<Color32> {
    match scheme {
        ColorScheme::Tableau10 => TABLEAU10.iter().copied().cycle().take(n).collect(),
        ColorScheme::Hues => generate_palette(n),
    }
}

// ---------------------------------------------------------------------------
// Colour mapping: region → Color32
// ---------------------------------------------------------------------------

/// Maps every region of the dataset to a fixed colour.
///
/// Built once over the full region list, so a region keeps its colour no
/// matter which other regions are selected alongside it.
#[derive(Debug, Clone)]
pub struct ColorMap {
    order: Vec<String>,
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Assign colours to `regions` in the given order.
    pub fn new(regions: &[String], scheme: ColorScheme) -> Self {
        let palette = scheme_colors(scheme, regions.len());
        let mapping: BTreeMap<String, Color32> = regions
            .iter()
            .zip(palette)
            .map(|(r, c)| (r.clone(), c))
            .collect();

        ColorMap {
            order: regions.to_vec(),
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a region.
    pub fn color_for(&self, region: &str) -> Color32 {
        self.mapping
            .get(region)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (region → colour) in dataset order.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.order
            .iter()
            .map(|r| (r.clone(), self.color_for(r)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("region {i}")).collect()
    }

    #[test]
    fn tableau_assigns_in_order_and_cycles() {
        let cm = ColorMap::new(&regions(12), ColorScheme::Tableau10);
        assert_eq!(cm.color_for("region 0"), TABLEAU10[0]);
        assert_eq!(cm.color_for("region 9"), TABLEAU10[9]);
        assert_eq!(cm.color_for("region 10"), TABLEAU10[0]);
        assert_eq!(cm.color_for("region 11"), TABLEAU10[1]);
    }

    #[test]
    fn hues_are_distinct() {
        let palette = generate_palette(13);
        assert_eq!(palette.len(), 13);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unknown_region_is_gray() {
        let cm = ColorMap::new(&regions(2), ColorScheme::Hues);
        assert_eq!(cm.color_for("elsewhere"), Color32::GRAY);
    }

    #[test]
    fn legend_follows_dataset_order() {
        let names = vec!["Quebec".to_string(), "Alberta".to_string()];
        let cm = ColorMap::new(&names, ColorScheme::Tableau10);
        let legend = cm.legend_entries();
        assert_eq!(legend[0], ("Quebec".to_string(), TABLEAU10[0]));
        assert_eq!(legend[1], ("Alberta".to_string(), TABLEAU10[1]));
    }
}
