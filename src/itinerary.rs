use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use compact_str::CompactString;

/// A city on the route. Names may repeat (the trip starts and ends in Oakland).
#[derive(Clone, Debug)]
pub struct Stop {
    pub name: CompactString,
    /// (lat, lon)
    pub location: (f64, f64),
    pub time_zone: Tz,
    pub arrival_date: NaiveDate,
    pub departure_date: NaiveDate,
    pub layover_nights: u32,
}

/// A half-open instant range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Window {
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        t >= self.start && t < self.end
    }
}

/// One directed connection between two stops.
#[derive(Clone, Debug)]
pub struct Leg {
    pub origin: usize,
    pub destination: usize,
    pub label: CompactString,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    /// Local midnight of the departure date to local midnight of the arrival date.
    pub days: Window,
    pub nights_at_stop: u32,
}

impl Leg {
    /// Builds a leg from UTC instants. Calendar days are taken in UTC.
    pub fn new(
        origin: usize,
        destination: usize,
        label: impl Into<CompactString>,
        departure: DateTime<Utc>,
        arrival: DateTime<Utc>,
    ) -> Self {
        let start = midnight(departure.date_naive()).and_utc();
        let end = midnight(arrival.date_naive()).and_utc().max(start);
        Self {
            origin,
            destination,
            label: label.into(),
            departure,
            arrival,
            days: Window { start, end },
            nights_at_stop: 0,
        }
    }

    /// Builds a leg from wall-clock times: departure in the origin's zone,
    /// arrival in the destination's zone.
    pub fn in_local_time(
        stops: &[Stop],
        origin: usize,
        destination: usize,
        label: impl Into<CompactString>,
        departure: NaiveDateTime,
        arrival: NaiveDateTime,
    ) -> Result<Self, ConfigurationError> {
        let label = label.into();
        let from = stop_at(stops, origin, &label)?;
        let to = stop_at(stops, destination, &label)?;

        let departure_utc = resolve_local(&from.time_zone, departure, &label)?;
        let arrival_utc = resolve_local(&to.time_zone, arrival, &label)?;

        let start = resolve_local(&from.time_zone, midnight(departure.date()), &label)?;
        let end = resolve_local(&to.time_zone, midnight(arrival.date()), &label)?.max(start);

        Ok(Self {
            origin,
            destination,
            label,
            departure: departure_utc,
            arrival: arrival_utc,
            days: Window { start, end },
            nights_at_stop: 0,
        })
    }

    pub fn with_nights(mut self, nights: u32) -> Self {
        self.nights_at_stop = nights;
        self
    }

    /// Exact timestamps as a window. Zero-length for zero-duration legs.
    pub fn exact(&self) -> Window {
        Window {
            start: self.departure,
            end: self.arrival,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigurationError {
    #[error("leg {leg} arrives at {arrival}, not after it departs at {departure}")]
    InvertedLeg {
        leg: usize,
        departure: DateTime<Utc>,
        arrival: DateTime<Utc>,
    },

    #[error("leg {leg} references stop {stop} but only {stops} stops exist")]
    StopOutOfRange { leg: usize, stop: usize, stops: usize },

    #[error("leg {leg} departs before the leg listed ahead of it")]
    OutOfOrder { leg: usize },

    #[error("{label}: stop {stop} does not exist ({stops} stops)")]
    UnknownStop {
        label: CompactString,
        stop: usize,
        stops: usize,
    },

    #[error("{label}: not a valid calendar date or clock time")]
    InvalidCalendar { label: CompactString },

    #[error("{label}: {value} does not exist in the local time zone")]
    InvalidLocalTime {
        label: CompactString,
        value: NaiveDateTime,
    },
}

/// The validated, immutable trip. Only constructible through [`Itinerary::new`].
#[derive(Clone, Debug)]
pub struct Itinerary {
    stops: Vec<Stop>,
    legs: Vec<Leg>,
}

impl Itinerary {
    /// Validates the legs, then pulls each calendar-day window forward so
    /// day windows open in the same order as the legs depart.
    pub fn new(stops: Vec<Stop>, mut legs: Vec<Leg>) -> Result<Self, ConfigurationError> {
        for (i, leg) in legs.iter().enumerate() {
            for stop in [leg.origin, leg.destination] {
                if stop >= stops.len() {
                    return Err(ConfigurationError::StopOutOfRange {
                        leg: i,
                        stop,
                        stops: stops.len(),
                    });
                }
            }

            if leg.arrival <= leg.departure {
                return Err(ConfigurationError::InvertedLeg {
                    leg: i,
                    departure: leg.departure,
                    arrival: leg.arrival,
                });
            }

            if i > 0 && leg.departure < legs[i - 1].departure {
                return Err(ConfigurationError::OutOfOrder { leg: i });
            }
        }

        // Local midnights differ per zone, so a later leg leaving from a
        // western stop can otherwise open its day window first.
        for i in 1..legs.len() {
            let floor = legs[i - 1].days.start;
            let days = &mut legs[i].days;
            days.start = days.start.max(floor);
            days.end = days.end.max(days.start);
        }

        Ok(Self { stops, legs })
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn origin_of(&self, leg: &Leg) -> &Stop {
        &self.stops[leg.origin]
    }

    pub fn destination_of(&self, leg: &Leg) -> &Stop {
        &self.stops[leg.destination]
    }
}

fn stop_at<'a>(
    stops: &'a [Stop],
    index: usize,
    label: &CompactString,
) -> Result<&'a Stop, ConfigurationError> {
    stops.get(index).ok_or_else(|| ConfigurationError::UnknownStop {
        label: label.clone(),
        stop: index,
        stops: stops.len(),
    })
}

// Ambiguous times (DST fall-back) take the earlier reading.
fn resolve_local(
    tz: &Tz,
    value: NaiveDateTime,
    label: &CompactString,
) -> Result<DateTime<Utc>, ConfigurationError> {
    tz.from_local_datetime(&value)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| ConfigurationError::InvalidLocalTime {
            label: label.clone(),
            value,
        })
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}
