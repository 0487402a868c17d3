use eframe::egui::Pos2;

use super::tooltip::DetailTooltip;
use super::{ChartModel, HoverTarget};

/// Screen radius (points) of each hoverable marker.
pub const HOVER_RADIUS: f32 = 6.0;

pub const LINE_WIDTH: f32 = 2.0;
pub const HIGHLIGHT_WIDTH: f32 = 4.0;

// ---------------------------------------------------------------------------
// Hit testing
// ---------------------------------------------------------------------------

/// The point under `pointer`, if any.
///
/// `project` maps `(year, percentage)` to screen space. When markers overlap
/// the nearest one wins; ties go to the series drawn last (topmost).
pub fn hit_test(
    model: &ChartModel,
    pointer: Pos2,
    radius: f32,
    project: impl Fn(f64, f64) -> Pos2,
) -> Option<HoverTarget> {
    let mut best: Option<(f32, HoverTarget)> = None;
    for series in &model.series {
        for point in &series.points {
            let d = project(f64::from(point.year), point.percentage).distance(pointer);
            if d > radius {
                continue;
            }
            if best.as_ref().map_or(true, |(bd, _)| d <= *bd) {
                best = Some((
                    d,
                    HoverTarget {
                        region: series.region.clone(),
                        point: *point,
                    },
                ));
            }
        }
    }
    best.map(|(_, target)| target)
}

/// Stroke width of `region`'s line given the hovered region.
pub fn line_width(region: &str, hovered: Option<&str>) -> f32 {
    if hovered == Some(region) {
        HIGHLIGHT_WIDTH
    } else {
        LINE_WIDTH
    }
}

// ---------------------------------------------------------------------------
// Hover lifecycle
// ---------------------------------------------------------------------------

/// What changed between two frames.
#[derive(Debug, Clone, PartialEq)]
pub enum HoverEvent {
    Enter(HoverTarget),
    Move,
    Exit,
    Idle,
}

/// Tracks the hovered point across frames and drives the tooltip.
#[derive(Debug, Clone, Default)]
pub struct HoverState {
    current: Option<HoverTarget>,
}

impl HoverState {
    /// Feed this frame's hit-test result.
    ///
    /// Entering a different point counts as a fresh enter, so the tooltip
    /// content always matches the point under the pointer.
    pub fn update(
        &mut self,
        hit: Option<HoverTarget>,
        pointer: Option<Pos2>,
        tooltip: &mut DetailTooltip,
    ) -> HoverEvent {
        match (hit, pointer) {
            (Some(target), Some(pos)) => {
                if self.current.as_ref() == Some(&target) {
                    tooltip.move_to(pos);
                    HoverEvent::Move
                } else {
                    log::debug!("hover enter {} {}", target.region, target.point.year);
                    tooltip.show(target.clone(), pos);
                    self.current = Some(target.clone());
                    HoverEvent::Enter(target)
                }
            }
            _ => self.clear(tooltip),
        }
    }

    /// Drop any hover, e.g. after the chart was rebuilt.
    pub fn clear(&mut self, tooltip: &mut DetailTooltip) -> HoverEvent {
        if self.current.take().is_some() {
            tooltip.hide();
            HoverEvent::Exit
        } else {
            HoverEvent::Idle
        }
    }

    /// Region whose line is highlighted.
    pub fn highlighted_region(&self) -> Option<&str> {
        self.current.as_ref().map(|t| t.region.as_str())
    }
}
