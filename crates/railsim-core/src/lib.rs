//! Rail network simulation engine.
//!
//! A discrete-time simulation of a rail network: stations, tracks, trains and
//! movable loads (passengers and cargo) evolve one simulated minute ("tick")
//! at a time. All state lives in a [`RailNetwork`]; ticks are fully
//! deterministic and single-threaded, so a given sequence of creation calls
//! and `simulate` calls always produces the same network state.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`geometry`] | 2D positions, Euclidean distance, advance-toward stepping |
//! | [`components`] | Entity data and per-entity rules: loads, tracks, routes, stations, trains |
//! | [`systems`] | Per-tick logic: station load exchange, train movement, perishable expiry |
//! | [`engine`] | [`RailNetwork`]: registries, creation/validation, snapshots, the tick orchestrator |
//! | [`snapshot`] | Read-only snapshot shapes for external inspection |
//! | [`error`] | The [`SimError`] taxonomy |
//!
//! # Example
//!
//! ```rust
//! use railsim_core::prelude::*;
//!
//! let mut net = RailNetwork::new();
//! net.create_station("west", StationKind::Passenger, 0.0, 0.0).unwrap();
//! net.create_station("east", StationKind::Passenger, 10.0, 0.0).unwrap();
//! net.create_track("w-e", "west", "east").unwrap();
//! net.create_train("t1", TrainKind::Passenger, "west", vec!["west".into(), "east".into()])
//!     .unwrap();
//!
//! // A passenger train covers 2 distance units per minute.
//! net.simulate_minutes(5).unwrap();
//! assert_eq!(net.train_snapshot("t1").unwrap().location, "east");
//! ```

pub mod components;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod snapshot;
pub mod systems;

/// Commonly used types for convenient importing.
pub mod prelude {
    pub use crate::components::{
        Load, LoadKind, Route, RouteKind, Station, StationKind, Track, TrackKind, Train,
        TrainKind, TrainLocation,
    };
    pub use crate::engine::RailNetwork;
    pub use crate::error::SimError;
    pub use crate::geometry::Position;
    pub use crate::snapshot::{LoadSnapshot, StationSnapshot, TrackSnapshot, TrainSnapshot};
}
