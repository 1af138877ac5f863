use crate::clock::parse_reading;
use crate::markers::number_stops;
use crate::state::AppState;
use crate::view::RouteSnapshot;
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;
use warp::filters::BoxedFilter;
use warp::http::StatusCode;
use warp::reply::{Reply, Response};
use warp::Filter;

#[derive(Debug, Default, Deserialize)]
pub struct SnapshotQuery {
    /// RFC 3339 instant to classify instead of the published tick.
    pub at: Option<String>,
}

pub fn routes(state: Arc<AppState>) -> BoxedFilter<(Response,)> {
    let state_filter = warp::any().map(move || state.clone()).boxed();

    // GET /snapshot[?at=...]
    let snapshot_route = warp::path("snapshot")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<SnapshotQuery>())
        .and(state_filter.clone())
        .map(|query: SnapshotQuery, state: Arc<AppState>| {
            with_snapshot(&state, query, |snapshot| warp::reply::json(&snapshot).into_response())
        });

    // GET /legs
    let legs_route = warp::path("legs")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<SnapshotQuery>())
        .and(state_filter.clone())
        .map(|query: SnapshotQuery, state: Arc<AppState>| {
            with_snapshot(&state, query, |snapshot| {
                warp::reply::json(&snapshot.legs).into_response()
            })
        });

    // GET /summary
    let summary_route = warp::path("summary")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<SnapshotQuery>())
        .and(state_filter.clone())
        .map(|query: SnapshotQuery, state: Arc<AppState>| {
            with_snapshot(&state, query, |snapshot| {
                warp::reply::json(&snapshot.summary()).into_response()
            })
        });

    // GET /stops
    let stops_route = warp::path("stops")
        .and(warp::path::end())
        .and(warp::get())
        .and(state_filter)
        .map(|state: Arc<AppState>| {
            warp::reply::json(&number_stops(state.itinerary.stops())).into_response()
        });

    snapshot_route
        .or(legs_route)
        .unify()
        .or(summary_route)
        .unify()
        .or(stops_route)
        .unify()
        .boxed()
}

// An unparsable `at` falls back to the published snapshot, same as a bad
// clock reading on a tick.
fn with_snapshot<F>(state: &AppState, query: SnapshotQuery, reply: F) -> Response
where
    F: FnOnce(RouteSnapshot) -> Response,
{
    if let Some(raw) = query.at.as_deref() {
        match parse_reading(raw) {
            Ok(at) => return reply(state.preview(at)),
            Err(e) => warn!("Ignoring requested instant: {}", e),
        }
    }

    match state.snapshot() {
        Some(snapshot) => reply(snapshot),
        None => warp::reply::with_status(
            "classification pending",
            StatusCode::SERVICE_UNAVAILABLE,
        )
        .into_response(),
    }
}
