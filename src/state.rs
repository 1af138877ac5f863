use crate::classifier::Classifier;
use crate::clock::{Clock, ClockError};
use crate::itinerary::Itinerary;
use crate::view::RouteSnapshot;
use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct AppState {
    // Read-only for the life of the process
    pub itinerary: Arc<Itinerary>,
    pub classifier: Classifier,

    // Written only by `tick`; readers get a clone
    snapshot: RwLock<Option<RouteSnapshot>>,
}

impl AppState {
    pub fn new(itinerary: Itinerary, classifier: Classifier) -> Self {
        Self {
            itinerary: Arc::new(itinerary),
            classifier,
            snapshot: RwLock::new(None),
        }
    }

    /// Classifies the itinerary at `reading` and publishes the result.
    /// A failed reading keeps whatever was published before. Returns
    /// whether a new snapshot was published.
    pub fn tick(&self, reading: Result<DateTime<Utc>, ClockError>) -> bool {
        let now = match reading {
            Ok(now) => now,
            Err(e) => {
                warn!("Skipping tick, keeping previous classification: {}", e);
                return false;
            }
        };

        let next = self.preview(now);
        let previous_active = self.snapshot().map(|s| s.active_leg);

        if previous_active != Some(next.active_leg) {
            match next.active() {
                Some(leg) => info!(%now, leg = leg.number, label = %leg.label, "Current leg"),
                None => info!(%now, "No current leg"),
            }
        } else {
            debug!(%now, active = ?next.active_leg, "Tick");
        }

        let mut slot = self.snapshot.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(next);
        true
    }

    /// Snapshot for an arbitrary instant without publishing it.
    pub fn preview(&self, now: DateTime<Utc>) -> RouteSnapshot {
        let classification = self.classifier.classify(self.itinerary.legs(), now);
        RouteSnapshot::build(&self.itinerary, &classification)
    }

    pub fn snapshot(&self) -> Option<RouteSnapshot> {
        self.snapshot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

/// Classifies once immediately, then once per `period`.
pub async fn run_ticker(state: Arc<AppState>, clock: Arc<dyn Clock>, period: Duration) {
    loop {
        state.tick(clock.now());
        tokio::time::sleep(period).await;
    }
}
