//! The per-train tick state machine: exchange, navigate, move.

use std::collections::HashMap;

use crate::components::{Station, Track, Train, TrainLocation};
use crate::error::SimError;
use crate::systems::exchange;

/// Advance one train by one tick.
///
/// In order: a docked train first exchanges loads with its station, then the
/// route names the next stop and the weight-adjusted speed is compared with
/// the remaining distance. An inbound train (speed covers the distance)
/// arrives only if the destination has a free docking slot; a full station
/// freezes the train in place for the whole tick, re-checked every tick
/// until a slot opens. Otherwise the train advances part-way along the
/// straight line. Arrival repeats the load exchange and, on linear routes,
/// turns the train around at either end of the sequence.
pub fn advance_train(
    train: &mut Train,
    stations: &mut HashMap<String, Station>,
    _tracks: &HashMap<String, Track>,
) -> Result<(), SimError> {
    // Pre-departure exchange, docked trains only. Trains stalled in transit
    // are not docked and do not exchange.
    if let TrainLocation::Docked(at) = train.location().clone() {
        let station = stations
            .get_mut(&at)
            .ok_or_else(|| SimError::NoSuchStation(at.clone()))?;
        exchange(station, train);
    }

    let current = train.location().station_id().to_string();
    let next_id = train
        .route()
        .next_station(&current, train.is_moving_forward())?
        .to_string();
    let next_pos = stations
        .get(&next_id)
        .ok_or_else(|| SimError::NoSuchStation(next_id.clone()))?
        .position();

    let distance = train.position().distance(&next_pos);
    let speed = train.effective_speed();

    if speed >= distance {
        // Inbound: the arrival is gated on destination capacity.
        if stations
            .get(&next_id)
            .map(Station::is_full)
            .unwrap_or(false)
        {
            log::debug!(
                "train {} held outside full station {} this tick",
                train.id(),
                next_id,
            );
            return Ok(());
        }

        if let TrainLocation::Docked(at) = train.location().clone() {
            if let Some(origin) = stations.get_mut(&at) {
                origin.undock(train.id());
            }
        }

        let station = stations
            .get_mut(&next_id)
            .ok_or_else(|| SimError::NoSuchStation(next_id.clone()))?;
        station.dock(train.id())?;
        train.set_position(next_pos);
        train.set_location(TrainLocation::Docked(next_id.clone()));
        log::debug!("train {} arrived at {}", train.id(), next_id);

        exchange(station, train);
        train.flip_direction_at_terminus();
    } else {
        // Partial advance toward the next station.
        if let TrainLocation::Docked(at) = train.location().clone() {
            if let Some(origin) = stations.get_mut(&at) {
                origin.undock(train.id());
            }
        }
        train.set_position(train.position().advance_toward(&next_pos, speed));
        train.set_location(TrainLocation::InTransit {
            from: current,
            toward: next_id,
        });
    }

    Ok(())
}
