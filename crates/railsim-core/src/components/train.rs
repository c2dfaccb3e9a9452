//! Trains: kind capability table, carried loads, speed law and location.

use serde::{Deserialize, Serialize};

use crate::components::{Load, LoadKind, Route};
use crate::error::SimError;
use crate::geometry::Position;

/// Speed lost per unit of carried weight, as a fraction of base speed.
pub const WEIGHT_SPEED_PENALTY: f64 = 0.0001;

/// Train kind. Base speed, weight ceiling and accepted load categories are
/// fixed per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainKind {
    Passenger,
    Cargo,
    Bullet,
}

impl TrainKind {
    /// Unloaded speed in distance units per tick.
    pub fn base_speed(self) -> f64 {
        match self {
            TrainKind::Passenger => 2.0,
            TrainKind::Cargo => 3.0,
            TrainKind::Bullet => 5.0,
        }
    }

    /// Total carried weight this kind never exceeds.
    pub fn max_weight(self) -> f64 {
        match self {
            TrainKind::Passenger => 3500.0,
            TrainKind::Cargo | TrainKind::Bullet => 5000.0,
        }
    }

    /// Which load categories this kind carries. Bullet trains take both.
    pub fn accepts(self, load: LoadKind) -> bool {
        match self {
            TrainKind::Passenger => load.is_passenger(),
            TrainKind::Cargo => load.is_cargo(),
            TrainKind::Bullet => true,
        }
    }

    /// Kind tag as it appears in snapshots.
    pub fn label(self) -> &'static str {
        match self {
            TrainKind::Passenger => "PassengerTrain",
            TrainKind::Cargo => "CargoTrain",
            TrainKind::Bullet => "BulletTrain",
        }
    }
}

impl std::str::FromStr for TrainKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PassengerTrain" => Ok(TrainKind::Passenger),
            "CargoTrain" => Ok(TrainKind::Cargo),
            "BulletTrain" => Ok(TrainKind::Bullet),
            other => Err(SimError::UnknownKind(other.to_string())),
        }
    }
}

/// Where a train currently is.
///
/// `Docked` means the train's position coincides with the station's and it
/// occupies one of its capacity slots. `InTransit` pins down both endpoints
/// of the leg being traversed; `from` is the station last departed and is
/// what route lookups key on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainLocation {
    Docked(String),
    InTransit { from: String, toward: String },
}

impl TrainLocation {
    /// The station ID external callers see: the docked station, or the
    /// station last departed while in transit.
    pub fn station_id(&self) -> &str {
        match self {
            TrainLocation::Docked(id) => id,
            TrainLocation::InTransit { from, .. } => from,
        }
    }

    pub fn is_docked(&self) -> bool {
        matches!(self, TrainLocation::Docked(_))
    }
}

/// A train patrolling its route, exchanging loads at stations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Train {
    id: String,
    kind: TrainKind,
    position: Position,
    location: TrainLocation,
    route: Route,
    moving_forward: bool,
    carried: Vec<Load>,
}

impl Train {
    /// A new train starts docked at `station_id`, which must be on `route`
    /// (the engine validates this before construction).
    pub fn new(
        id: impl Into<String>,
        kind: TrainKind,
        station_id: impl Into<String>,
        position: Position,
        route: Route,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            location: TrainLocation::Docked(station_id.into()),
            route,
            moving_forward: true,
            carried: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> TrainKind {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn location(&self) -> &TrainLocation {
        &self.location
    }

    pub fn set_location(&mut self, location: TrainLocation) {
        self.location = location;
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn is_moving_forward(&self) -> bool {
        self.moving_forward
    }

    /// Loads currently on board, in boarding order.
    pub fn carried_loads(&self) -> &[Load] {
        &self.carried
    }

    pub(crate) fn carried_loads_mut(&mut self) -> &mut Vec<Load> {
        &mut self.carried
    }

    pub fn carried_weight(&self) -> f64 {
        self.carried.iter().map(Load::weight).sum()
    }

    /// Speed this tick given current cargo: each unit of weight shaves
    /// 0.01% off the base speed, floored at zero.
    pub fn effective_speed(&self) -> f64 {
        let reduction = self.carried_weight() * WEIGHT_SPEED_PENALTY;
        (self.kind.base_speed() * (1.0 - reduction)).max(0.0)
    }

    /// Whether `load` could board right now: the kind must be accepted and
    /// the weight ceiling respected.
    pub fn can_board(&self, load: &Load) -> bool {
        self.kind.accepts(load.kind())
            && self.carried_weight() + load.weight() <= self.kind.max_weight()
    }

    /// Take a load on board. On refusal the load is handed back unchanged.
    pub fn board(&mut self, load: Load) -> Result<(), Load> {
        if !self.can_board(&load) {
            return Err(load);
        }
        self.carried.push(load);
        Ok(())
    }

    /// Flip direction when sitting at an endpoint of a linear route:
    /// arriving at the last station while moving forward turns the train
    /// around, and likewise at the first station while moving backward.
    /// Cyclical routes never flip.
    pub fn flip_direction_at_terminus(&mut self) {
        if self.route.is_cyclical() {
            return;
        }
        let here = self.location.station_id();
        if here == self.route.first_station() && !self.moving_forward {
            self.moving_forward = true;
            log::debug!("train {} reversing at {} (now forward)", self.id, here);
        } else if here == self.route.last_station() && self.moving_forward {
            self.moving_forward = false;
            log::debug!("train {} reversing at {} (now backward)", self.id, here);
        }
    }
}
