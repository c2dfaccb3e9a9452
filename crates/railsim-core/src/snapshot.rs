//! Read-only snapshot shapes for external inspection.
//!
//! These are in-process data-transfer values assembled on demand from live
//! entities; they hold no references into the network and define no wire
//! format, though they serialize cleanly with serde for tooling that wants
//! JSON out.

use serde::{Deserialize, Serialize};

use crate::components::{Load, Station, Track, Train};
use crate::geometry::Position;

/// (ID, kind tag) view of a load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSnapshot {
    pub id: String,
    /// Exactly "Passenger", "Cargo" or "PerishableCargo".
    pub kind: String,
}

impl LoadSnapshot {
    pub(crate) fn of(load: &Load) -> Self {
        Self {
            id: load.id().to_string(),
            kind: load.kind().label().to_string(),
        }
    }
}

/// Point-in-time view of a train.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainSnapshot {
    pub id: String,
    /// The docked station, or the station last departed while in transit.
    pub location: String,
    pub kind: String,
    pub position: Position,
    /// Carried loads in boarding order.
    pub loads: Vec<LoadSnapshot>,
}

impl TrainSnapshot {
    pub(crate) fn of(train: &Train) -> Self {
        Self {
            id: train.id().to_string(),
            location: train.location().station_id().to_string(),
            kind: train.kind().label().to_string(),
            position: train.position(),
            loads: train.carried_loads().iter().map(LoadSnapshot::of).collect(),
        }
    }
}

/// Point-in-time view of a station, including snapshots of its docked
/// trains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSnapshot {
    pub id: String,
    pub kind: String,
    pub position: Position,
    /// Waiting loads, ascending by load ID.
    pub loads: Vec<LoadSnapshot>,
    /// Docked trains, ascending by train ID.
    pub trains: Vec<TrainSnapshot>,
}

impl StationSnapshot {
    pub(crate) fn of(station: &Station, docked: Vec<TrainSnapshot>) -> Self {
        Self {
            id: station.id().to_string(),
            kind: station.kind().label().to_string(),
            position: station.position(),
            loads: station.waiting_loads().iter().map(LoadSnapshot::of).collect(),
            trains: docked,
        }
    }
}

/// Point-in-time view of a track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSnapshot {
    pub id: String,
    pub from: String,
    pub to: String,
    pub kind: String,
    pub durability: u32,
}

impl TrackSnapshot {
    pub(crate) fn of(track: &Track) -> Self {
        Self {
            id: track.id().to_string(),
            from: track.from_station().to_string(),
            to: track.to_station().to_string(),
            kind: track.kind().label().to_string(),
            durability: track.durability(),
        }
    }
}
