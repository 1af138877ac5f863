//! The summer rail loop, Oakland to Oakland.

use crate::itinerary::{ConfigurationError, Itinerary, Leg, Stop};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::America::{Chicago, Denver, Los_Angeles, New_York};
use chrono_tz::Tz;
use tracing::info;

const YEAR: i32 = 2025;

struct StopRecord {
    city: &'static str,
    coords: (f64, f64),
    tz: Tz,
    arrival: (u32, u32),
    departure: (u32, u32),
    nights: u32,
}

struct LegRecord {
    from: usize,
    to: usize,
    name: &'static str,
    // (month, day, hour, minute), local to the respective stop
    departs: (u32, u32, u32, u32),
    arrives: (u32, u32, u32, u32),
    nights: u32,
}

#[rustfmt::skip]
const STOPS: [StopRecord; 10] = [
    StopRecord { city: "Oakland, CA", coords: (37.8044, -122.2711), tz: Los_Angeles, arrival: (6, 28), departure: (6, 28), nights: 0 },
    StopRecord { city: "Los Angeles, CA", coords: (34.0522, -118.2437), tz: Los_Angeles, arrival: (7, 1), departure: (7, 2), nights: 1 },
    StopRecord { city: "Atlanta, GA", coords: (33.7490, -84.3880), tz: New_York, arrival: (7, 2), departure: (7, 3), nights: 1 },
    StopRecord { city: "Washington, DC", coords: (38.9072, -77.0369), tz: New_York, arrival: (7, 3), departure: (7, 6), nights: 3 },
    StopRecord { city: "New York, NY", coords: (40.7128, -74.0060), tz: New_York, arrival: (7, 5), departure: (7, 6), nights: 1 },
    StopRecord { city: "Raleigh, NC", coords: (35.7796, -78.6382), tz: New_York, arrival: (7, 6), departure: (7, 8), nights: 2 },
    StopRecord { city: "Chicago, IL", coords: (41.8781, -87.6298), tz: Chicago, arrival: (7, 8), departure: (7, 8), nights: 0 },
    StopRecord { city: "Lincoln, NE", coords: (40.8136, -96.7026), tz: Chicago, arrival: (7, 9), departure: (7, 10), nights: 1 },
    StopRecord { city: "Denver, CO", coords: (39.7392, -104.9903), tz: Denver, arrival: (7, 10), departure: (7, 12), nights: 2 },
    StopRecord { city: "Oakland, CA", coords: (37.8044, -122.2711), tz: Los_Angeles, arrival: (7, 12), departure: (7, 12), nights: 0 },
];

#[rustfmt::skip]
const LEGS: [LegRecord; 9] = [
    LegRecord { from: 0, to: 1, name: "Coast Starlight", departs: (6, 28, 21, 21), arrives: (6, 29, 21, 6), nights: 0 },
    LegRecord { from: 1, to: 2, name: "Sunset Limited → Crescent", departs: (6, 29, 22, 0), arrives: (6, 30, 23, 29), nights: 1 },
    LegRecord { from: 2, to: 3, name: "Crescent", departs: (6, 30, 19, 55), arrives: (7, 2, 5, 31), nights: 3 },
    LegRecord { from: 3, to: 4, name: "Northeast Regional", departs: (7, 5, 8, 5), arrives: (7, 5, 12, 25), nights: 1 },
    LegRecord { from: 4, to: 5, name: "Carolinian", departs: (7, 6, 7, 4), arrives: (7, 6, 18, 15), nights: 2 },
    LegRecord { from: 5, to: 6, name: "Carolinian ↝ Capitol Limited (through-fare)", departs: (7, 8, 16, 5), arrives: (7, 9, 8, 45), nights: 0 },
    LegRecord { from: 6, to: 7, name: "California Zephyr (CHI→LIN)", departs: (7, 9, 14, 0), arrives: (7, 9, 19, 20), nights: 1 },
    LegRecord { from: 7, to: 8, name: "California Zephyr (LIN→DEN)", departs: (7, 10, 8, 5), arrives: (7, 10, 13, 30), nights: 2 },
    LegRecord { from: 8, to: 9, name: "California Zephyr (DEN→OAK)", departs: (7, 12, 19, 15), arrives: (7, 12, 20, 25), nights: 0 },
];

pub fn summer_itinerary() -> Result<Itinerary, ConfigurationError> {
    let stops = STOPS
        .iter()
        .map(|s| {
            Ok(Stop {
                name: s.city.into(),
                location: s.coords,
                time_zone: s.tz,
                arrival_date: date(s.city, s.arrival)?,
                departure_date: date(s.city, s.departure)?,
                layover_nights: s.nights,
            })
        })
        .collect::<Result<Vec<_>, ConfigurationError>>()?;
    info!("Built {} stops", stops.len());

    let legs = LEGS
        .iter()
        .map(|l| {
            let departs = local(l.name, l.departs)?;
            let arrives = local(l.name, l.arrives)?;
            let leg = Leg::in_local_time(&stops, l.from, l.to, l.name, departs, arrives)?;
            Ok(leg.with_nights(l.nights))
        })
        .collect::<Result<Vec<_>, ConfigurationError>>()?;
    info!("Built {} legs", legs.len());

    let itinerary = Itinerary::new(stops, legs)?;
    info!("Itinerary validated");
    Ok(itinerary)
}

fn date(label: &str, (month, day): (u32, u32)) -> Result<NaiveDate, ConfigurationError> {
    NaiveDate::from_ymd_opt(YEAR, month, day)
        .ok_or_else(|| ConfigurationError::InvalidCalendar { label: label.into() })
}

fn local(
    label: &str,
    (month, day, hour, minute): (u32, u32, u32, u32),
) -> Result<NaiveDateTime, ConfigurationError> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| ConfigurationError::InvalidCalendar { label: label.into() })?;
    Ok(date(label, (month, day))?.and_time(time))
}
