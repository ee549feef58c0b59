//! Layout projection: pings → 2-D display coordinates.
//!
//! # Responsibility
//! - Turn a day's ping list into deterministic layout hints for the two
//!   presentation granularities (month cell, week bar).
//! - Stay free of any rendering-technology dependency; output is plain
//!   geometry plus the color token and view key.
//!
//! # Invariants
//! - Pings are sorted ascending by `timestamp` before projection, so
//!   colliding markers stack in stable creation order.
//! - A marker's `top` never exceeds `extent - diameter`; the proportional
//!   placement is clamped so a 23:59 ping cannot overflow the bottom edge.

use crate::model::ping::{Ping, PingId, MINUTES_PER_DAY};

/// Geometry of a month-mode day cell.
///
/// Month cells are small, so collisions are likely: pings overflow into
/// extra columns of `column_capacity` markers each, offset leftwards from
/// the right-aligned origin. Defaults match the mobile shell's day cell.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthLayout {
    /// Vertical extent available for markers, in logical units.
    pub cell_height: f32,
    /// Marker diameter.
    pub dot_diameter: f32,
    /// Markers per column before overflowing into the next one.
    pub column_capacity: usize,
    /// Horizontal gap between columns.
    pub column_gap: f32,
}

impl Default for MonthLayout {
    fn default() -> Self {
        Self {
            cell_height: 50.0,
            dot_diameter: 10.0,
            column_capacity: 5,
            column_gap: 2.0,
        }
    }
}

/// Geometry of a week-mode day bar.
///
/// The week bar is tall and only seven days are visible at once, so no
/// column overflow handling is needed; markers are horizontally centered
/// by the renderer. Defaults match the mobile shell's week bar.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekLayout {
    /// Bar height in logical units.
    pub bar_height: f32,
    /// Marker diameter.
    pub marker_diameter: f32,
}

impl Default for WeekLayout {
    fn default() -> Self {
        Self {
            bar_height: 160.0,
            marker_diameter: 12.0,
        }
    }
}

/// One month-mode marker: vertical position plus right-aligned column
/// offset.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthDot {
    /// Ping id, carried along as a stable view key.
    pub id: PingId,
    /// Offset from the cell top.
    pub top: f32,
    /// Offset from the cell's right edge (grows per overflow column).
    pub right: f32,
    /// Ping color token, passed through untouched.
    pub color: String,
}

/// One week-mode marker: vertical position only.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekMarker {
    /// Ping id, carried along as a stable view key.
    pub id: PingId,
    /// Offset from the bar top.
    pub top: f32,
    /// Ping color token, passed through untouched.
    pub color: String,
}

/// Full week-mode projection for one day.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeekBar {
    pub markers: Vec<WeekMarker>,
    /// Total pings on the day, shown as the bar's counter label.
    pub ping_count: usize,
}

/// Projects a day's pings onto month-cell dot positions.
///
/// Placement is proportional to minutes since midnight across the cell
/// height, clamped to keep the dot inside the cell. Dot `i` (in timestamp
/// order) lands in column `i / column_capacity`; each column shifts the
/// right-offset by `dot_diameter + column_gap`, bounding overlap instead
/// of stacking without limit.
pub fn project_month(pings: &[Ping], layout: &MonthLayout) -> Vec<MonthDot> {
    let capacity = layout.column_capacity.max(1);
    sorted_by_creation(pings)
        .into_iter()
        .enumerate()
        .map(|(index, ping)| {
            let column = (index / capacity) as f32;
            MonthDot {
                id: ping.id,
                top: vertical_position(&ping, layout.cell_height, layout.dot_diameter),
                right: column * (layout.dot_diameter + layout.column_gap),
                color: ping.color,
            }
        })
        .collect()
}

/// Projects a day's pings onto week-bar marker positions.
///
/// Same proportional formula as month mode against the bar height, clamped
/// to `bar_height - marker_diameter`. The aggregate `ping_count` rides
/// along for the counter label under the bar.
pub fn project_week(pings: &[Ping], layout: &WeekLayout) -> WeekBar {
    let markers = sorted_by_creation(pings)
        .into_iter()
        .map(|ping| WeekMarker {
            id: ping.id,
            top: vertical_position(&ping, layout.bar_height, layout.marker_diameter),
            color: ping.color,
        })
        .collect();

    WeekBar {
        markers,
        ping_count: pings.len(),
    }
}

/// Proportional minutes-since-midnight placement, clamped to the extent.
fn vertical_position(ping: &Ping, extent: f32, diameter: f32) -> f32 {
    let raw = f32::from(ping.minutes_since_midnight()) / f32::from(MINUTES_PER_DAY) * extent;
    raw.min(extent - diameter)
}

fn sorted_by_creation(pings: &[Ping]) -> Vec<Ping> {
    let mut sorted = pings.to_vec();
    sorted.sort_by_key(|ping| ping.timestamp);
    sorted
}
