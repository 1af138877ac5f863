use crate::itinerary::Stop;
use compact_str::CompactString;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Marker {
    pub number: usize,
    pub name: CompactString,
    pub position: (f64, f64),
    pub tooltip: Vec<String>,
}

/// 1-based label shown on the map pin and in listings.
pub fn marker_number(index: usize) -> usize {
    index + 1
}

pub fn number_stops(stops: &[Stop]) -> Vec<Marker> {
    stops
        .iter()
        .enumerate()
        .map(|(i, stop)| {
            let number = marker_number(i);
            Marker {
                number,
                name: stop.name.clone(),
                position: stop.location,
                tooltip: vec![
                    format!("#{} {}", number, stop.name),
                    format!("Arrival: {}", stop.arrival_date.format("%Y-%m-%d")),
                    format!("Departure: {}", stop.departure_date.format("%Y-%m-%d")),
                    format!("Nights: {}", stop.layover_nights),
                ],
            }
        })
        .collect()
}
