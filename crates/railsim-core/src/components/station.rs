//! Stations: docking slots for trains plus a waiting area for loads.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::components::{Load, LoadKind};
use crate::error::SimError;
use crate::geometry::Position;

/// Station kind. Capacity and which load categories the platform holds are
/// fixed per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationKind {
    Passenger,
    Cargo,
    Central,
    Depot,
}

impl StationKind {
    /// Maximum number of simultaneously docked trains.
    pub fn max_trains(self) -> usize {
        match self {
            StationKind::Passenger => 2,
            StationKind::Cargo => 4,
            StationKind::Central | StationKind::Depot => 8,
        }
    }

    pub fn holds_passengers(self) -> bool {
        matches!(self, StationKind::Passenger | StationKind::Central)
    }

    pub fn holds_cargo(self) -> bool {
        matches!(self, StationKind::Cargo | StationKind::Central)
    }

    /// Whether a load of `kind` may wait on this station's platform.
    pub fn holds(self, kind: LoadKind) -> bool {
        if kind.is_passenger() {
            self.holds_passengers()
        } else {
            self.holds_cargo()
        }
    }

    /// Kind tag as it appears in snapshots.
    pub fn label(self) -> &'static str {
        match self {
            StationKind::Passenger => "PassengerStation",
            StationKind::Cargo => "CargoStation",
            StationKind::Central => "CentralStation",
            StationKind::Depot => "DepotStation",
        }
    }
}

impl std::str::FromStr for StationKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PassengerStation" => Ok(StationKind::Passenger),
            "CargoStation" => Ok(StationKind::Cargo),
            "CentralStation" => Ok(StationKind::Central),
            "DepotStation" => Ok(StationKind::Depot),
            other => Err(SimError::UnknownKind(other.to_string())),
        }
    }
}

/// A fixed point on the map where trains dock and loads wait.
///
/// Invariants: the docked set never exceeds the kind's capacity, and the
/// waiting list only ever holds load categories the kind accepts, kept
/// sorted by load ID so boarding order is deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    id: String,
    kind: StationKind,
    position: Position,
    docked: BTreeSet<String>,
    waiting: Vec<Load>,
}

impl Station {
    pub fn new(id: impl Into<String>, kind: StationKind, position: Position) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            docked: BTreeSet::new(),
            waiting: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> StationKind {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// IDs of currently docked trains, in sorted order.
    pub fn docked_trains(&self) -> impl Iterator<Item = &str> {
        self.docked.iter().map(String::as_str)
    }

    pub fn docked_count(&self) -> usize {
        self.docked.len()
    }

    pub fn is_full(&self) -> bool {
        self.docked.len() >= self.kind.max_trains()
    }

    /// Occupy a docking slot. Fails when the station is at capacity.
    pub fn dock(&mut self, train_id: &str) -> Result<(), SimError> {
        if self.docked.contains(train_id) {
            return Ok(());
        }
        if self.is_full() {
            return Err(SimError::StationFull {
                station: self.id.clone(),
                capacity: self.kind.max_trains(),
            });
        }
        self.docked.insert(train_id.to_string());
        Ok(())
    }

    /// Release a docking slot. Removing a train that is not docked is a
    /// no-op.
    pub fn undock(&mut self, train_id: &str) {
        self.docked.remove(train_id);
    }

    /// Add a load to the waiting area. The load's category must be one this
    /// station kind holds; load creation goes through here, so a depot never
    /// sees a passenger and a passenger platform never sees cargo.
    pub fn accept_load(&mut self, load: Load) -> Result<(), SimError> {
        if !self.kind.holds(load.kind()) {
            return Err(SimError::LoadNotAllowed {
                station: self.id.clone(),
                kind: load.kind(),
            });
        }
        // Keep the waiting list sorted by load ID.
        let at = self
            .waiting
            .partition_point(|w| w.id() < load.id());
        self.waiting.insert(at, load);
        Ok(())
    }

    /// Waiting loads, ascending by load ID.
    pub fn waiting_loads(&self) -> &[Load] {
        &self.waiting
    }

    pub(crate) fn waiting_loads_mut(&mut self) -> &mut Vec<Load> {
        &mut self.waiting
    }
}
