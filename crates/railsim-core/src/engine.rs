//! The simulation engine: registries, creation, snapshots and the tick
//! orchestrator.

use std::collections::HashMap;

use crate::components::{
    resolve_route_kind, Load, Route, Station, StationKind, Track, Train, TrainKind,
};
use crate::error::SimError;
use crate::geometry::Position;
use crate::snapshot::{StationSnapshot, TrackSnapshot, TrainSnapshot};
use crate::systems;

/// The whole rail network: every station, track and train, keyed by
/// caller-supplied unique IDs, plus the tick counter.
///
/// All mutation funnels through the creation operations and
/// [`RailNetwork::simulate`]; the simulation itself is single-threaded and
/// fully deterministic. Within one tick trains are advanced in ascending ID
/// order against the shared registries, so earlier trains' effects (loads
/// taken, docking slots filled or vacated) are visible to later ones.
#[derive(Debug, Default)]
pub struct RailNetwork {
    stations: HashMap<String, Station>,
    tracks: HashMap<String, Track>,
    trains: HashMap<String, Train>,
    minutes_elapsed: u64,
}

impl RailNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Creation ---

    /// Register a station. The ID must be unused.
    pub fn create_station(
        &mut self,
        id: &str,
        kind: StationKind,
        x: f64,
        y: f64,
    ) -> Result<(), SimError> {
        if self.stations.contains_key(id) {
            return Err(SimError::DuplicateId(id.to_string()));
        }
        let station = Station::new(id, kind, Position::new(x, y));
        self.stations.insert(id.to_string(), station);
        Ok(())
    }

    /// Register a track between two existing stations. The ID must be
    /// unused.
    pub fn create_track(&mut self, id: &str, from: &str, to: &str) -> Result<(), SimError> {
        if self.tracks.contains_key(id) {
            return Err(SimError::DuplicateId(id.to_string()));
        }
        if !self.stations.contains_key(from) {
            return Err(SimError::NoSuchStation(from.to_string()));
        }
        if !self.stations.contains_key(to) {
            return Err(SimError::NoSuchStation(to.to_string()));
        }
        self.tracks.insert(id.to_string(), Track::new(id, from, to));
        Ok(())
    }

    /// Create a train docked at `station_id` with the given route.
    ///
    /// The route sequence must name existing stations and contain the
    /// starting station. Topology is resolved here: a cyclical-shaped
    /// sequence is only legal for a bullet train (and becomes a cyclical
    /// route); for any other kind it is a configuration error. Docking
    /// counts against the station's capacity, so creation at a full station
    /// fails.
    pub fn create_train(
        &mut self,
        id: &str,
        kind: TrainKind,
        station_id: &str,
        route_stations: Vec<String>,
    ) -> Result<(), SimError> {
        if self.trains.contains_key(id) {
            return Err(SimError::DuplicateId(id.to_string()));
        }
        if !self.stations.contains_key(station_id) {
            return Err(SimError::NoSuchStation(station_id.to_string()));
        }
        for sid in &route_stations {
            if !self.stations.contains_key(sid) {
                return Err(SimError::NoSuchStation(sid.clone()));
            }
        }
        if !route_stations.iter().any(|s| s == station_id) {
            return Err(SimError::InvalidRoute(format!(
                "starting station {} is not on the route",
                station_id,
            )));
        }

        let route_kind = resolve_route_kind(kind, &route_stations, self.tracks.values())?;
        let route = Route::new(route_stations, route_kind)?;

        let station = self
            .stations
            .get_mut(station_id)
            .ok_or_else(|| SimError::NoSuchStation(station_id.to_string()))?;
        station.dock(id)?;

        let train = Train::new(id, kind, station_id, station.position(), route);
        self.trains.insert(id.to_string(), train);
        log::debug!("train {} created at {}", id, station_id);
        Ok(())
    }

    /// Create a passenger waiting at `start`, bound for `dest`. The start
    /// station must hold passengers.
    pub fn create_passenger(&mut self, start: &str, dest: &str, id: &str) -> Result<(), SimError> {
        if !self.stations.contains_key(dest) {
            return Err(SimError::NoSuchStation(dest.to_string()));
        }
        let station = self
            .stations
            .get_mut(start)
            .ok_or_else(|| SimError::NoSuchStation(start.to_string()))?;
        station.accept_load(Load::passenger(id, dest, station.position()))
    }

    /// Create cargo of the given weight waiting at `start`, bound for
    /// `dest`. The start station must hold cargo and the weight must be
    /// positive.
    pub fn create_cargo(
        &mut self,
        start: &str,
        dest: &str,
        id: &str,
        weight: f64,
    ) -> Result<(), SimError> {
        if !self.stations.contains_key(dest) {
            return Err(SimError::NoSuchStation(dest.to_string()));
        }
        let station = self
            .stations
            .get_mut(start)
            .ok_or_else(|| SimError::NoSuchStation(start.to_string()))?;
        let load = Load::cargo(id, dest, weight, station.position())?;
        station.accept_load(load)
    }

    /// Create perishable cargo that spoils `minutes_till_perish` minutes
    /// from now unless delivered first.
    pub fn create_perishable_cargo(
        &mut self,
        start: &str,
        dest: &str,
        id: &str,
        weight: f64,
        minutes_till_perish: u32,
    ) -> Result<(), SimError> {
        if !self.stations.contains_key(dest) {
            return Err(SimError::NoSuchStation(dest.to_string()));
        }
        let station = self
            .stations
            .get_mut(start)
            .ok_or_else(|| SimError::NoSuchStation(start.to_string()))?;
        let load = Load::perishable_cargo(id, dest, weight, minutes_till_perish, station.position())?;
        station.accept_load(load)
    }

    // --- Listings & snapshots ---

    /// IDs of all stations, in no particular order.
    pub fn station_ids(&self) -> Vec<String> {
        self.stations.keys().cloned().collect()
    }

    /// IDs of all tracks, in no particular order.
    pub fn track_ids(&self) -> Vec<String> {
        self.tracks.keys().cloned().collect()
    }

    /// IDs of all trains, in no particular order.
    pub fn train_ids(&self) -> Vec<String> {
        self.trains.keys().cloned().collect()
    }

    pub fn train_snapshot(&self, id: &str) -> Result<TrainSnapshot, SimError> {
        let train = self
            .trains
            .get(id)
            .ok_or_else(|| SimError::NoSuchTrain(id.to_string()))?;
        Ok(TrainSnapshot::of(train))
    }

    pub fn station_snapshot(&self, id: &str) -> Result<StationSnapshot, SimError> {
        let station = self
            .stations
            .get(id)
            .ok_or_else(|| SimError::NoSuchStation(id.to_string()))?;
        let docked = station
            .docked_trains()
            .filter_map(|tid| self.trains.get(tid))
            .map(TrainSnapshot::of)
            .collect();
        Ok(StationSnapshot::of(station, docked))
    }

    pub fn track_snapshot(&self, id: &str) -> Result<TrackSnapshot, SimError> {
        let track = self
            .tracks
            .get(id)
            .ok_or_else(|| SimError::NoSuchTrack(id.to_string()))?;
        Ok(TrackSnapshot::of(track))
    }

    /// Simulated minutes since the network was created.
    pub fn minutes_elapsed(&self) -> u64 {
        self.minutes_elapsed
    }

    // --- Simulation ---

    /// Advance the whole network by one simulated minute.
    ///
    /// Trains are advanced exactly once each, in ascending lexicographic ID
    /// order, then the perishable-expiry sweep runs. Mutations made by an
    /// earlier train in the tick are visible to later ones.
    pub fn simulate(&mut self) -> Result<(), SimError> {
        let mut ids: Vec<String> = self.trains.keys().cloned().collect();
        ids.sort();
        for id in &ids {
            if let Some(mut train) = self.trains.remove(id) {
                let outcome =
                    systems::advance_train(&mut train, &mut self.stations, &self.tracks);
                self.trains.insert(id.clone(), train);
                outcome?;
            }
        }
        systems::expire_perishables(&mut self.stations, &mut self.trains);
        self.minutes_elapsed += 1;
        log::trace!("tick {} complete", self.minutes_elapsed);
        Ok(())
    }

    /// Advance the network by `minutes` ticks, one at a time.
    pub fn simulate_minutes(&mut self, minutes: u32) -> Result<(), SimError> {
        for _ in 0..minutes {
            self.simulate()?;
        }
        Ok(())
    }
}
