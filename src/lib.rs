//! Itinerary map core: which leg of a fixed rail trip is current, and how
//! every view should stroke each leg because of it.

pub mod classifier;
pub mod clock;
pub mod itinerary;
pub mod map;
pub mod markers;
pub mod routes;
pub mod settings;
pub mod state;
pub mod style;
pub mod trip_data;
pub mod view;
