//! Seam to whatever widget actually draws tiles, polylines and pins.

use crate::style::{HOVER_WEIGHT, RouteStyle, resting_weight};
use crate::view::RouteSnapshot;

pub trait MapSurface {
    fn draw_leg(&mut self, index: usize, positions: &[(f64, f64)], style: &RouteStyle);

    fn place_marker(&mut self, position: (f64, f64), label: &str);

    /// Changes only the stroke weight of an already drawn leg.
    fn set_leg_weight(&mut self, index: usize, weight: u32);
}

pub fn render<S: MapSurface>(snapshot: &RouteSnapshot, surface: &mut S) {
    for leg in &snapshot.legs {
        surface.draw_leg(leg.index, &leg.positions, &leg.style);
    }
    for marker in &snapshot.markers {
        surface.place_marker(marker.position, &marker.number.to_string());
    }
}

/// Applies the transient hover emphasis and puts the resting weight back.
#[derive(Debug, Default)]
pub struct HoverTracker {
    hovered: Option<usize>,
}

impl HoverTracker {
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn enter<S: MapSurface>(
        &mut self,
        snapshot: &RouteSnapshot,
        index: usize,
        surface: &mut S,
    ) {
        if snapshot.legs.get(index).is_none() {
            return;
        }
        if let Some(previous) = self.hovered.filter(|p| *p != index) {
            self.restore(snapshot, previous, surface);
        }
        self.hovered = Some(index);
        surface.set_leg_weight(index, HOVER_WEIGHT);
    }

    pub fn exit<S: MapSurface>(
        &mut self,
        snapshot: &RouteSnapshot,
        index: usize,
        surface: &mut S,
    ) {
        if self.hovered == Some(index) {
            self.hovered = None;
        }
        self.restore(snapshot, index, surface);
    }

    /// Re-applies hover emphasis after a re-render from a newer snapshot.
    pub fn reapply<S: MapSurface>(&self, snapshot: &RouteSnapshot, surface: &mut S) {
        if let Some(index) = self.hovered.filter(|i| *i < snapshot.legs.len()) {
            surface.set_leg_weight(index, HOVER_WEIGHT);
        }
    }

    // Status comes from the snapshot being shown now, not the one that was
    // current when the pointer entered.
    fn restore<S: MapSurface>(&self, snapshot: &RouteSnapshot, index: usize, surface: &mut S) {
        if let Some(leg) = snapshot.legs.get(index) {
            surface.set_leg_weight(index, resting_weight(leg.status));
        }
    }
}
