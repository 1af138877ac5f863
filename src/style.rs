//! Stroke styling for route legs, shared by the map, the sidebar and the
//! summary table so all three agree on what the current leg looks like.

use crate::classifier::LegStatus;
use serde::Serialize;

/// Dark-to-light indigo gradient, indexed by `leg index mod len`.
pub const ROUTE_COLORS: [&str; 9] = [
    "#1a237e", "#283593", "#303f9f", "#3949ab", "#3f51b5", "#5c6bc0", "#7986cb", "#9fa8da",
    "#c5cae9",
];

pub const BASE_WEIGHT: u32 = 4;
pub const ACTIVE_WEIGHT_FACTOR: u32 = 2;
/// Weight while the pointer is over a leg, regardless of status.
pub const HOVER_WEIGHT: u32 = 10;
pub const ROUTE_OPACITY: f64 = 0.9;
pub const UPCOMING_DASH: &str = "8,4";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteStyle {
    pub stroke_color: &'static str,
    pub stroke_weight: u32,
    pub dash_pattern: Option<&'static str>,
    pub opacity: f64,
}

pub fn route_color(index: usize) -> &'static str {
    ROUTE_COLORS[index % ROUTE_COLORS.len()]
}

/// Weight a leg returns to once any hover emphasis is removed.
pub fn resting_weight(status: LegStatus) -> u32 {
    match status {
        LegStatus::Active => BASE_WEIGHT * ACTIVE_WEIGHT_FACTOR,
        LegStatus::Completed | LegStatus::Upcoming => BASE_WEIGHT,
    }
}

pub fn dash_pattern(status: LegStatus) -> Option<&'static str> {
    match status {
        LegStatus::Upcoming => Some(UPCOMING_DASH),
        LegStatus::Completed | LegStatus::Active => None,
    }
}

/// `index` is not bounded by the leg count; colors wrap around the palette.
pub fn style(index: usize, _total_legs: usize, status: LegStatus) -> RouteStyle {
    RouteStyle {
        stroke_color: route_color(index),
        stroke_weight: resting_weight(status),
        dash_pattern: dash_pattern(status),
        opacity: ROUTE_OPACITY,
    }
}
