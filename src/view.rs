use crate::classifier::{Classification, LegStatus};
use crate::itinerary::{Itinerary, Leg, Stop};
use crate::markers::{Marker, marker_number, number_stops};
use crate::style::{RouteStyle, style};
use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::Serialize;

pub const MAP_CENTER: (f64, f64) = (39.8283, -98.5795);
pub const MAP_ZOOM: u8 = 4;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapView {
    pub center: (f64, f64),
    pub zoom: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegView {
    pub index: usize,
    pub number: usize,
    pub label: CompactString,
    pub from: CompactString,
    pub to: CompactString,
    pub positions: [(f64, f64); 2],
    pub status: LegStatus,
    pub style: RouteStyle,
    pub tooltip: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendEntry {
    pub status: LegStatus,
    pub label: &'static str,
    pub style: RouteStyle,
}

/// One row of the tabular summary. Carries the same status and stroke as the map.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SummaryRow {
    pub number: usize,
    pub label: CompactString,
    pub route: String,
    pub status: LegStatus,
    pub stroke_color: &'static str,
    pub stroke_weight: u32,
    pub dashed: bool,
}

/// Everything a view needs to paint one clock reading.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteSnapshot {
    pub generated_at: DateTime<Utc>,
    pub active_leg: Option<usize>,
    pub legs: Vec<LegView>,
    pub markers: Vec<Marker>,
    pub legend: Vec<LegendEntry>,
    pub map: MapView,
}

impl RouteSnapshot {
    pub fn build(itinerary: &Itinerary, classification: &Classification) -> Self {
        let total = itinerary.legs().len();
        let legs = itinerary
            .legs()
            .iter()
            .zip(&classification.statuses)
            .enumerate()
            .map(|(i, (leg, status))| {
                let from = itinerary.origin_of(leg);
                let to = itinerary.destination_of(leg);
                LegView {
                    index: i,
                    number: i + 1,
                    label: leg.label.clone(),
                    from: from.name.clone(),
                    to: to.name.clone(),
                    positions: [from.location, to.location],
                    status: *status,
                    style: style(i, total, *status),
                    tooltip: leg_tooltip(i, leg, from, to),
                }
            })
            .collect();

        Self {
            generated_at: classification.now,
            active_leg: classification.active,
            legs,
            markers: number_stops(itinerary.stops()),
            legend: legend(),
            map: MapView {
                center: MAP_CENTER,
                zoom: MAP_ZOOM,
            },
        }
    }

    pub fn active(&self) -> Option<&LegView> {
        self.active_leg.and_then(|i| self.legs.get(i))
    }

    pub fn summary(&self) -> Vec<SummaryRow> {
        self.legs
            .iter()
            .map(|leg| SummaryRow {
                number: leg.number,
                label: leg.label.clone(),
                route: format!("{} → {}", leg.from, leg.to),
                status: leg.status,
                stroke_color: leg.style.stroke_color,
                stroke_weight: leg.style.stroke_weight,
                dashed: leg.style.dash_pattern.is_some(),
            })
            .collect()
    }
}

pub fn legend() -> Vec<LegendEntry> {
    [
        (LegStatus::Active, "Current Segment"),
        (LegStatus::Upcoming, "Upcoming"),
        (LegStatus::Completed, "Completed"),
    ]
    .into_iter()
    .map(|(status, label)| LegendEntry {
        status,
        label,
        style: style(0, 1, status),
    })
    .collect()
}

fn leg_tooltip(index: usize, leg: &Leg, from: &Stop, to: &Stop) -> Vec<String> {
    let departs = leg.departure.with_timezone(&from.time_zone);
    let arrives = leg.arrival.with_timezone(&to.time_zone);
    vec![
        format!("Segment {}: {}", marker_number(index), leg.label),
        format!("Date: {}", departs.format("%b %-d")),
        format!("{} → {}", from.name, to.name),
        format!("Departs: {}", departs.format("%-I:%M %p")),
        format!(
            "Arrives: {} ({})",
            arrives.format("%-I:%M %p"),
            arrives.format("%b %-d")
        ),
        format!("Nights at stop: {}", leg.nights_at_stop),
    ]
}
