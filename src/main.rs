use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use itinerary_map::clock::SystemClock;
use itinerary_map::routes::routes;
use itinerary_map::settings::Settings;
use itinerary_map::state::{AppState, run_ticker};
use itinerary_map::trip_data::summer_itinerary;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::default();

    // 1. Load static itinerary (fatal on bad data)
    let itinerary = summer_itinerary().context("itinerary data is invalid")?;
    info!(
        stops = itinerary.stops().len(),
        legs = itinerary.legs().len(),
        "Loaded itinerary"
    );
    let state = Arc::new(AppState::new(itinerary, settings.classifier()));

    // 2. Clock tick: classify on mount, then every period
    tokio::spawn(run_ticker(
        state.clone(),
        Arc::new(SystemClock),
        settings.tick_period,
    ));

    // 3. HTTP Server
    let addr = SocketAddr::new(settings.bind_addr, settings.port);
    info!("Server running at http://{}", addr);
    warp::serve(routes(state)).run(addr).await;

    Ok(())
}
