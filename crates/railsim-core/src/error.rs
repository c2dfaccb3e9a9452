//! Error taxonomy for network construction and simulation.
//!
//! Three families share one enum: configuration errors (bad routes, kinds or
//! weights), capacity errors (docking at a full station) and lookup errors
//! (unknown or duplicate IDs). A load that cannot currently board and an
//! inbound train stalled outside a full station are *not* errors; both are
//! retried on later ticks.

use crate::components::LoadKind;

/// Errors reported synchronously to the caller of the offending operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// An entity with this ID already exists in the registry.
    DuplicateId(String),
    /// No station registered under this ID.
    NoSuchStation(String),
    /// No track registered under this ID.
    NoSuchTrack(String),
    /// No train registered under this ID.
    NoSuchTrain(String),
    /// A kind tag that names no known station/train/load kind.
    UnknownKind(String),
    /// Load weight must be strictly positive.
    InvalidWeight(f64),
    /// Perishable cargo must have a strictly positive lifetime.
    InvalidPerishTime(u32),
    /// The station's kind cannot hold this category of load.
    LoadNotAllowed { station: String, kind: LoadKind },
    /// Malformed or ill-suited route configuration.
    InvalidRoute(String),
    /// Docking refused: the station already holds its maximum train count.
    StationFull { station: String, capacity: usize },
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimError::DuplicateId(id) => write!(f, "ID already exists: {}", id),
            SimError::NoSuchStation(id) => write!(f, "no such station: {}", id),
            SimError::NoSuchTrack(id) => write!(f, "no such track: {}", id),
            SimError::NoSuchTrain(id) => write!(f, "no such train: {}", id),
            SimError::UnknownKind(kind) => write!(f, "unknown kind: {}", kind),
            SimError::InvalidWeight(w) => write!(f, "weight must be positive, got {}", w),
            SimError::InvalidPerishTime(m) => {
                write!(f, "perish time must be positive, got {}", m)
            }
            SimError::LoadNotAllowed { station, kind } => {
                write!(f, "station {} cannot hold {} loads", station, kind.label())
            }
            SimError::InvalidRoute(reason) => write!(f, "invalid route: {}", reason),
            SimError::StationFull { station, capacity } => {
                write!(f, "station {} is full (capacity {})", station, capacity)
            }
        }
    }
}

impl std::error::Error for SimError {}
