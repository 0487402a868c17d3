use eframe::egui::{Pos2, Vec2, vec2};

use super::HoverTarget;

/// Offset from the pointer to the tooltip's top-left corner.
pub const POINTER_OFFSET: Vec2 = vec2(10.0, -28.0);

// ---------------------------------------------------------------------------
// Tooltip text
// ---------------------------------------------------------------------------

/// Format a share as a percentage with two decimals: `0.3 → "30.00%"`.
pub fn format_percentage(share: f64) -> String {
    format!("{:.2}%", share * 100.0)
}

/// Counts are whole students in practice; drop the fraction when there is none.
pub fn format_count(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// `"British Columbia, origin"` → `"British Columbia"`.
pub fn short_region(region: &str) -> &str {
    region.split(',').next().unwrap_or(region).trim()
}

/// The detail lines for a hovered point: `(label, value)` pairs.
pub fn detail_lines(target: &HoverTarget, destination: &str) -> Vec<(String, String)> {
    let p = &target.point;
    vec![
        ("Year".to_string(), p.year.to_string()),
        (
            format!("Students from {} in {destination}", short_region(&target.region)),
            format_count(p.count),
        ),
        (
            format!("Total Students in {destination} in {}", p.year),
            format_count(p.total),
        ),
        ("Percentage".to_string(), format_percentage(p.percentage)),
    ]
}

// ---------------------------------------------------------------------------
// DetailTooltip – one overlay for the whole session
// ---------------------------------------------------------------------------

/// The floating detail panel.
///
/// Created once with the application state and reused by every chart
/// rebuild; hover events only change its content, position and visibility.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailTooltip {
    visible: bool,
    anchor: Pos2,
    content: Option<HoverTarget>,
}

impl DetailTooltip {
    pub fn show(&mut self, target: HoverTarget, pointer: Pos2) {
        self.content = Some(target);
        self.visible = true;
        self.move_to(pointer);
    }

    pub fn move_to(&mut self, pointer: Pos2) {
        self.anchor = pointer + POINTER_OFFSET;
    }

    /// Hide without forgetting the last content.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Top-left corner of the panel in screen coordinates.
    pub fn anchor(&self) -> Pos2 {
        self.anchor
    }

    /// What to draw, if the panel is showing.
    pub fn content(&self) -> Option<&HoverTarget> {
        self.content.as_ref().filter(|_| self.visible)
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::*;
    use crate::data::model::SeriesPoint;

    fn target() -> HoverTarget {
        HoverTarget {
            region: "British Columbia, origin".to_string(),
            point: SeriesPoint { year: 2015, count: 1234.0, total: 54321.0, percentage: 0.0227 },
        }
    }

    #[test]
    fn percentage_has_two_decimals() {
        assert_eq!(format_percentage(0.3), "30.00%");
        assert_eq!(format_percentage(0.12346), "12.35%");
        assert_eq!(format_percentage(1.0), "100.00%");
    }

    #[test]
    fn counts_drop_empty_fraction() {
        assert_eq!(format_count(1234.0), "1234");
        assert_eq!(format_count(12.5), "12.5");
    }

    #[test]
    fn detail_lines_use_short_region_and_destination() {
        let lines = detail_lines(&target(), "Ontario");
        assert_eq!(lines[0], ("Year".to_string(), "2015".to_string()));
        assert_eq!(lines[1].0, "Students from British Columbia in Ontario");
        assert_eq!(lines[1].1, "1234");
        assert_eq!(lines[2].0, "Total Students in Ontario in 2015");
        assert_eq!(lines[3].1, "2.27%");
    }

    #[test]
    fn region_without_comma_is_kept() {
        assert_eq!(short_region("Outside Canada"), "Outside Canada");
    }

    #[test]
    fn show_move_hide() {
        let mut tip = DetailTooltip::default();
        assert!(tip.content().is_none());

        tip.show(target(), pos2(100.0, 100.0));
        assert!(tip.is_visible());
        assert_eq!(tip.anchor(), pos2(110.0, 72.0));

        tip.move_to(pos2(50.0, 60.0));
        assert_eq!(tip.anchor(), pos2(60.0, 32.0));
        assert_eq!(tip.content().map(|t| t.point.year), Some(2015));

        tip.hide();
        assert!(!tip.is_visible());
        assert!(tip.content().is_none());
    }
}
