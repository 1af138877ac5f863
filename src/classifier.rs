use crate::itinerary::{Leg, Window};
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegStatus {
    Completed,
    Active,
    Upcoming,
}

/// Which pair of instants bounds a leg.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Granularity {
    /// Local midnight of the departure date to local midnight of the arrival date.
    #[default]
    Day,
    /// The scheduled departure and arrival instants.
    Exact,
}

#[derive(Clone, Copy, Debug)]
pub struct Classifier {
    /// Padding after a leg's arrival during which it still counts as current.
    pub grace: TimeDelta,
    pub granularity: Granularity,
}

/// Output of one classification pass. `statuses` is parallel to the leg list.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    pub now: DateTime<Utc>,
    pub active: Option<usize>,
    pub statuses: Vec<LegStatus>,
}

impl Classifier {
    pub fn new(grace: TimeDelta, granularity: Granularity) -> Self {
        Self { grace, granularity }
    }

    /// The padded window in which `leg` is considered current.
    pub fn active_window(&self, leg: &Leg) -> Window {
        let nominal = match self.granularity {
            Granularity::Day => leg.days,
            Granularity::Exact => leg.exact(),
        };
        Window {
            start: nominal.start,
            end: nominal.end + self.grace,
        }
    }

    /// First leg, in list order, whose padded window contains `now`.
    pub fn active_index(&self, legs: &[Leg], now: DateTime<Utc>) -> Option<usize> {
        legs.iter()
            .position(|leg| self.active_window(leg).contains(now))
    }

    pub fn classify(&self, legs: &[Leg], now: DateTime<Utc>) -> Classification {
        let active = self.active_index(legs, now);

        let statuses = legs
            .iter()
            .enumerate()
            .map(|(i, leg)| {
                if Some(i) == active {
                    LegStatus::Active
                } else if now >= self.active_window(leg).end {
                    LegStatus::Completed
                } else {
                    // Either not started yet, or started but shadowed by an
                    // earlier leg whose padded window still holds `now`.
                    LegStatus::Upcoming
                }
            })
            .collect();

        Classification {
            now,
            active,
            statuses,
        }
    }
}

impl Classification {
    pub fn status(&self, index: usize) -> Option<LegStatus> {
        self.statuses.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, m, d, h, min, 0).unwrap()
    }

    fn exact(grace_hours: i64) -> Classifier {
        Classifier::new(TimeDelta::hours(grace_hours), Granularity::Exact)
    }

    fn leg(dep: DateTime<Utc>, arr: DateTime<Utc>) -> Leg {
        Leg::new(0, 1, "test", dep, arr)
    }

    fn count_active(c: &Classification) -> usize {
        c.statuses
            .iter()
            .filter(|s| **s == LegStatus::Active)
            .count()
    }

    #[test]
    fn test_overnight_leg_is_active_on_departure_evening() {
        // Coast Starlight: departs Jun 28 21:21, arrives the next day 21:06
        let legs = vec![leg(ts(6, 28, 21, 21), ts(6, 29, 21, 6))];
        let c = exact(24).classify(&legs, ts(6, 28, 22, 0));

        assert_eq!(c.active, Some(0));
        assert_eq!(c.statuses, vec![LegStatus::Active]);
        assert_eq!(c.status(0), Some(LegStatus::Active));
        assert_eq!(c.status(1), None);
    }

    #[test]
    fn test_gap_between_windows_has_no_active_leg() {
        let legs = vec![
            leg(ts(6, 29, 19, 55), ts(6, 30, 5, 31)),
            leg(ts(7, 5, 8, 5), ts(7, 5, 12, 25)),
        ];
        let c = exact(24).classify(&legs, ts(7, 4, 12, 0));

        assert_eq!(c.active, None);
        assert_eq!(c.statuses, vec![LegStatus::Completed, LegStatus::Upcoming]);
    }

    #[test]
    fn test_before_first_departure_everything_is_upcoming() {
        let legs = vec![
            leg(ts(7, 1, 8, 0), ts(7, 1, 12, 0)),
            leg(ts(7, 2, 8, 0), ts(7, 2, 12, 0)),
            leg(ts(7, 3, 8, 0), ts(7, 3, 12, 0)),
        ];
        let c = exact(24).classify(&legs, ts(6, 1, 0, 0));

        assert_eq!(c.active, None);
        assert!(c.statuses.iter().all(|s| *s == LegStatus::Upcoming));
    }

    #[test]
    fn test_after_last_window_everything_is_completed() {
        let legs = vec![
            leg(ts(7, 1, 8, 0), ts(7, 1, 12, 0)),
            leg(ts(7, 2, 8, 0), ts(7, 2, 12, 0)),
        ];
        let c = exact(24).classify(&legs, ts(7, 3, 12, 0));

        assert_eq!(c.active, None);
        assert!(c.statuses.iter().all(|s| *s == LegStatus::Completed));
    }

    #[test]
    fn test_overlapping_windows_pick_the_first_leg() {
        // Second leg departs inside the first leg's grace period.
        let legs = vec![
            leg(ts(7, 1, 8, 0), ts(7, 1, 12, 0)),
            leg(ts(7, 1, 18, 0), ts(7, 1, 22, 0)),
        ];
        let c = exact(24).classify(&legs, ts(7, 1, 19, 0));

        assert_eq!(c.active, Some(0));
        assert_eq!(c.statuses, vec![LegStatus::Active, LegStatus::Upcoming]);
        assert_eq!(count_active(&c), 1);

        // once the first window closes the second takes over
        let later = exact(24).classify(&legs, ts(7, 2, 12, 0));
        assert_eq!(later.active, Some(1));
        assert_eq!(later.statuses[0], LegStatus::Completed);
    }

    #[test]
    fn test_boundaries_are_half_open() {
        let legs = vec![leg(ts(7, 1, 8, 0), ts(7, 1, 12, 0))];
        let classifier = exact(1);

        assert_eq!(classifier.classify(&legs, ts(7, 1, 7, 59)).statuses[0], LegStatus::Upcoming);
        assert_eq!(classifier.classify(&legs, ts(7, 1, 8, 0)).statuses[0], LegStatus::Active);
        assert_eq!(classifier.classify(&legs, ts(7, 1, 12, 59)).statuses[0], LegStatus::Active);
        assert_eq!(classifier.classify(&legs, ts(7, 1, 13, 0)).statuses[0], LegStatus::Completed);
    }

    #[test]
    fn test_zero_duration_leg_is_active_for_the_grace_window() {
        let t = ts(7, 8, 16, 0);
        let legs = vec![leg(t, t)];
        let classifier = exact(1);

        assert_eq!(classifier.classify(&legs, t).active, Some(0));
        assert_eq!(
            classifier.classify(&legs, t + TimeDelta::minutes(30)).active,
            Some(0)
        );
        assert_eq!(
            classifier.classify(&legs, t + TimeDelta::hours(1)).statuses[0],
            LegStatus::Completed
        );
    }

    #[test]
    fn test_day_granularity_covers_whole_calendar_days() {
        // Same-day leg in the evening; with day granularity it is current
        // for the whole calendar day.
        let legs = vec![leg(ts(7, 12, 19, 15), ts(7, 12, 20, 25))];
        let classifier = Classifier::new(TimeDelta::hours(24), Granularity::Day);

        assert_eq!(classifier.classify(&legs, ts(7, 12, 0, 0)).active, Some(0));
        assert_eq!(classifier.classify(&legs, ts(7, 12, 23, 59)).active, Some(0));
        assert_eq!(classifier.classify(&legs, ts(7, 13, 0, 0)).active, None);
        assert_eq!(classifier.classify(&legs, ts(7, 11, 23, 59)).active, None);
    }

    #[test]
    fn test_empty_leg_list() {
        let c = exact(24).classify(&[], ts(7, 1, 0, 0));
        assert_eq!(c.active, None);
        assert!(c.statuses.is_empty());
    }

    // Every half hour over [from, to): one status per leg, at most one active,
    // repeatable, and no leg ever goes back to upcoming.
    fn assert_sweep(
        classifier: &Classifier,
        legs: &[Leg],
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) {
        let mut previous: Option<Classification> = None;
        let mut now = from;
        while now < to {
            let c = classifier.classify(legs, now);

            assert_eq!(c.statuses.len(), legs.len());
            assert!(count_active(&c) <= 1);
            assert_eq!(c, classifier.classify(legs, now));
            assert_eq!(
                c.active,
                c.statuses.iter().position(|s| *s == LegStatus::Active)
            );

            if let Some(prev) = &previous {
                let pairs = prev.statuses.iter().zip(&c.statuses);
                for (i, (before, after)) in pairs.enumerate() {
                    if *before != LegStatus::Upcoming {
                        assert_ne!(
                            *after,
                            LegStatus::Upcoming,
                            "leg {i} regressed {before:?} -> Upcoming at {now}"
                        );
                    }
                }
            }

            previous = Some(c);
            now += TimeDelta::minutes(30);
        }
    }

    #[test]
    fn test_properties_over_a_sweep() {
        let legs = vec![
            leg(ts(6, 28, 21, 21), ts(6, 29, 21, 6)),
            leg(ts(6, 29, 22, 0), ts(6, 30, 23, 29)),
            leg(ts(6, 30, 19, 55), ts(7, 2, 5, 31)),
            leg(ts(7, 5, 8, 5), ts(7, 5, 12, 25)),
            leg(ts(7, 6, 7, 4), ts(7, 6, 18, 15)),
        ];

        assert_sweep(&exact(24), &legs, ts(6, 27, 0, 0), ts(7, 10, 0, 0));
    }

    #[test]
    fn test_day_windows_across_zones_stay_monotonic() {
        use crate::itinerary::{Itinerary, Stop};
        use chrono::NaiveDate;
        use chrono_tz::America::{Los_Angeles, New_York};
        use chrono_tz::Tz;

        let stop = |name: &str, tz: Tz| Stop {
            name: name.into(),
            location: (0.0, 0.0),
            time_zone: tz,
            arrival_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            departure_date: NaiveDate::from_ymd_opt(2025, 7, 2).unwrap(),
            layover_nights: 0,
        };
        let local = |d: u32, h: u32| {
            NaiveDate::from_ymd_opt(2025, 7, d)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap()
        };
        let stops = vec![
            stop("New York", New_York),
            stop("Boston", New_York),
            stop("Los Angeles", Los_Angeles),
            stop("Oakland", Los_Angeles),
        ];
        // The western leg departs later in absolute time but on an earlier
        // local date.
        let legs = vec![
            Leg::in_local_time(&stops, 0, 1, "east", local(2, 1), local(2, 9)).unwrap(),
            Leg::in_local_time(&stops, 2, 3, "west", local(1, 23), local(2, 1)).unwrap(),
        ];
        let itinerary = Itinerary::new(stops, legs).unwrap();
        let classifier = Classifier::new(TimeDelta::hours(24), Granularity::Day);

        let early = classifier.classify(itinerary.legs(), ts(7, 1, 12, 0));
        assert_eq!(early.statuses, vec![LegStatus::Upcoming, LegStatus::Upcoming]);

        let first = classifier.classify(itinerary.legs(), ts(7, 2, 5, 0));
        assert_eq!(first.statuses, vec![LegStatus::Active, LegStatus::Upcoming]);

        let second = classifier.classify(itinerary.legs(), ts(7, 3, 5, 0));
        assert_eq!(second.statuses, vec![LegStatus::Completed, LegStatus::Active]);

        assert_sweep(&classifier, itinerary.legs(), ts(6, 30, 0, 0), ts(7, 5, 0, 0));
    }

    #[test]
    fn test_summer_trip_day_windows_sweep() {
        let itinerary = crate::trip_data::summer_itinerary().unwrap();
        let classifier = Classifier::new(TimeDelta::hours(24), Granularity::Day);

        assert_sweep(&classifier, itinerary.legs(), ts(6, 27, 0, 0), ts(7, 15, 0, 0));
    }
}
