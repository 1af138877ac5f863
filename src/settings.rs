use crate::classifier::{Classifier, Granularity};
use chrono::TimeDelta;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

/// Re-classification cadence.
pub const TICK_PERIOD: Duration = Duration::from_secs(60);
/// One grace width for every leg.
pub const GRACE_HOURS: i64 = 24;
pub const HTTP_PORT: u16 = 3000;
pub const BIND_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

#[derive(Clone, Debug)]
pub struct Settings {
    pub tick_period: Duration,
    pub grace: TimeDelta,
    pub granularity: Granularity,
    pub bind_addr: IpAddr,
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_period: TICK_PERIOD,
            grace: TimeDelta::hours(GRACE_HOURS),
            granularity: Granularity::Day,
            bind_addr: BIND_ADDR,
            port: HTTP_PORT,
        }
    }
}

impl Settings {
    pub fn classifier(&self) -> Classifier {
        Classifier::new(self.grace, self.granularity)
    }
}
