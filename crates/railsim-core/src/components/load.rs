//! Movable loads: passengers and cargo waiting at stations or riding trains.

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::geometry::Position;

/// Every passenger weighs the same fixed amount.
pub const PASSENGER_WEIGHT: f64 = 70.0;

/// Category tag for a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadKind {
    Passenger,
    Cargo,
    PerishableCargo,
}

impl LoadKind {
    /// Kind tag as it appears in snapshots.
    pub fn label(self) -> &'static str {
        match self {
            LoadKind::Passenger => "Passenger",
            LoadKind::Cargo => "Cargo",
            LoadKind::PerishableCargo => "PerishableCargo",
        }
    }

    /// Whether this kind is handled by cargo infrastructure. Perishable
    /// cargo follows every cargo rule and additionally expires.
    pub fn is_cargo(self) -> bool {
        matches!(self, LoadKind::Cargo | LoadKind::PerishableCargo)
    }

    pub fn is_passenger(self) -> bool {
        matches!(self, LoadKind::Passenger)
    }
}

/// A destination-tagged, weighted item waiting at a station or carried by a
/// train.
///
/// Lifecycle: created at a station (joins its waiting set), transferred to a
/// train's carried set when boarding succeeds, destroyed on delivery at the
/// destination station. Perishable cargo may instead be destroyed by its
/// timer running out, wherever it happens to be.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Load {
    id: String,
    kind: LoadKind,
    destination: String,
    weight: f64,
    /// Where the load was when it entered the system.
    origin: Position,
    /// Remaining minutes before a perishable load spoils.
    minutes_till_perish: Option<u32>,
}

impl Load {
    pub fn passenger(id: impl Into<String>, destination: impl Into<String>, origin: Position) -> Self {
        Self {
            id: id.into(),
            kind: LoadKind::Passenger,
            destination: destination.into(),
            weight: PASSENGER_WEIGHT,
            origin,
            minutes_till_perish: None,
        }
    }

    pub fn cargo(
        id: impl Into<String>,
        destination: impl Into<String>,
        weight: f64,
        origin: Position,
    ) -> Result<Self, SimError> {
        if weight <= 0.0 {
            return Err(SimError::InvalidWeight(weight));
        }
        Ok(Self {
            id: id.into(),
            kind: LoadKind::Cargo,
            destination: destination.into(),
            weight,
            origin,
            minutes_till_perish: None,
        })
    }

    pub fn perishable_cargo(
        id: impl Into<String>,
        destination: impl Into<String>,
        weight: f64,
        minutes_till_perish: u32,
        origin: Position,
    ) -> Result<Self, SimError> {
        if weight <= 0.0 {
            return Err(SimError::InvalidWeight(weight));
        }
        if minutes_till_perish == 0 {
            return Err(SimError::InvalidPerishTime(minutes_till_perish));
        }
        Ok(Self {
            id: id.into(),
            kind: LoadKind::PerishableCargo,
            destination: destination.into(),
            weight,
            origin,
            minutes_till_perish: Some(minutes_till_perish),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> LoadKind {
        self.kind
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn origin(&self) -> Position {
        self.origin
    }

    pub fn minutes_till_perish(&self) -> Option<u32> {
        self.minutes_till_perish
    }

    /// Advance the perish timer by one minute. Returns `true` once the load
    /// has spoiled and must be destroyed. Non-perishable loads never spoil.
    pub fn tick_perish_timer(&mut self) -> bool {
        match self.minutes_till_perish.as_mut() {
            Some(m) => {
                *m = m.saturating_sub(1);
                *m == 0
            }
            None => false,
        }
    }
}
