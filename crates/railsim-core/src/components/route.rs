//! Routes: ordered station sequences trains patrol, linear or cyclical.

use serde::{Deserialize, Serialize};

use crate::components::{Track, TrainKind};
use crate::error::SimError;

/// Topology of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteKind {
    /// A shuttle: the train runs end to end and reverses at the endpoints.
    Linear,
    /// A loop: the last station connects back to the first and the train
    /// keeps going the same way around.
    Cyclical,
}

/// An ordered, non-empty sequence of station IDs with a topology tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    stations: Vec<String>,
    kind: RouteKind,
}

impl Route {
    /// Build a route, enforcing the per-topology minimum length: linear
    /// routes need at least two stations, cyclical routes at least three.
    pub fn new(stations: Vec<String>, kind: RouteKind) -> Result<Self, SimError> {
        if stations.is_empty() {
            return Err(SimError::InvalidRoute("station sequence is empty".into()));
        }
        if kind == RouteKind::Linear && stations.len() < 2 {
            return Err(SimError::InvalidRoute(
                "linear routes need at least two stations".into(),
            ));
        }
        if kind == RouteKind::Cyclical && stations.len() < 3 {
            return Err(SimError::InvalidRoute(
                "cyclical routes need at least three stations".into(),
            ));
        }
        Ok(Self { stations, kind })
    }

    pub fn stations(&self) -> &[String] {
        &self.stations
    }

    pub fn kind(&self) -> RouteKind {
        self.kind
    }

    pub fn is_cyclical(&self) -> bool {
        self.kind == RouteKind::Cyclical
    }

    pub fn contains(&self, station_id: &str) -> bool {
        self.stations.iter().any(|s| s == station_id)
    }

    pub fn first_station(&self) -> &str {
        // Non-empty by construction.
        &self.stations[0]
    }

    pub fn last_station(&self) -> &str {
        &self.stations[self.stations.len() - 1]
    }

    /// The station a train at `current` heads for next.
    ///
    /// Linear routes step along the sequence; at the final index the step
    /// simply goes back the way it came (the direction flag itself is only
    /// flipped by the train after it arrives at an endpoint). Cyclical
    /// routes wrap around with modulo arithmetic in both directions.
    pub fn next_station(&self, current: &str, forward: bool) -> Result<&str, SimError> {
        let index = self
            .stations
            .iter()
            .position(|s| s == current)
            .ok_or_else(|| {
                SimError::InvalidRoute(format!("station {} is not on the route", current))
            })?;
        let len = self.stations.len();

        let next = match self.kind {
            RouteKind::Linear => {
                if forward {
                    if index == len - 1 {
                        index - 1
                    } else {
                        index + 1
                    }
                } else if index == 0 {
                    index + 1
                } else {
                    index - 1
                }
            }
            RouteKind::Cyclical => {
                if forward {
                    (index + 1) % len
                } else {
                    (index + len - 1) % len
                }
            }
        };
        Ok(&self.stations[next])
    }
}

/// Decide the topology a station sequence gets for a given train kind.
///
/// A sequence has *cyclical shape* when it holds at least three stations and
/// some track joins its first and last station (either orientation). Only
/// bullet trains may run such a loop; handing a cyclical-shaped sequence to
/// any other train kind is a configuration error, never a silent downgrade
/// to linear. Everything else is linear.
pub fn resolve_route_kind<'a>(
    train_kind: TrainKind,
    stations: &[String],
    tracks: impl IntoIterator<Item = &'a Track>,
) -> Result<RouteKind, SimError> {
    if !has_cyclical_shape(stations, tracks) {
        return Ok(RouteKind::Linear);
    }
    match train_kind {
        TrainKind::Bullet => Ok(RouteKind::Cyclical),
        TrainKind::Passenger | TrainKind::Cargo => Err(SimError::InvalidRoute(format!(
            "route endpoints are joined by a track; only bullet trains run loops, not {}",
            train_kind.label()
        ))),
    }
}

fn has_cyclical_shape<'a>(
    stations: &[String],
    tracks: impl IntoIterator<Item = &'a Track>,
) -> bool {
    if stations.len() < 3 {
        return false;
    }
    let first = &stations[0];
    let last = &stations[stations.len() - 1];
    tracks.into_iter().any(|t| t.connects(first, last))
}
