//! End-of-tick expiry sweep for perishable cargo.

use std::collections::HashMap;

use crate::components::{Load, Station, Train};

/// Advance every perishable load's timer by one minute and destroy the ones
/// that have spoiled, wherever they sit: station platforms and train cars
/// alike. Stations are swept in ID order, then trains, so log output is
/// deterministic.
pub fn expire_perishables(
    stations: &mut HashMap<String, Station>,
    trains: &mut HashMap<String, Train>,
) {
    let mut station_ids: Vec<String> = stations.keys().cloned().collect();
    station_ids.sort();
    for id in station_ids {
        if let Some(station) = stations.get_mut(&id) {
            sweep(station.waiting_loads_mut(), "station", &id);
        }
    }

    let mut train_ids: Vec<String> = trains.keys().cloned().collect();
    train_ids.sort();
    for id in train_ids {
        if let Some(train) = trains.get_mut(&id) {
            sweep(train.carried_loads_mut(), "train", &id);
        }
    }
}

fn sweep(loads: &mut Vec<Load>, owner_kind: &str, owner_id: &str) {
    loads.retain_mut(|load| {
        if load.tick_perish_timer() {
            log::info!(
                "perishable {} spoiled on {} {}",
                load.id(),
                owner_kind,
                owner_id,
            );
            false
        } else {
            true
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Route, RouteKind, StationKind, TrainKind};
    use crate::geometry::Position;

    fn perishable(id: &str, minutes: u32) -> Load {
        Load::perishable_cargo(id, "b", 100.0, minutes, Position::ORIGIN).unwrap()
    }

    #[test]
    fn test_waiting_perishable_spoils_on_schedule() {
        let mut stations = HashMap::new();
        let mut st = Station::new("a", StationKind::Cargo, Position::ORIGIN);
        st.accept_load(perishable("c1", 2)).unwrap();
        stations.insert("a".to_string(), st);
        let mut trains = HashMap::new();

        expire_perishables(&mut stations, &mut trains);
        assert_eq!(stations["a"].waiting_loads().len(), 1);

        expire_perishables(&mut stations, &mut trains);
        assert!(stations["a"].waiting_loads().is_empty());
    }

    #[test]
    fn test_carried_perishable_spoils_too() {
        let mut stations = HashMap::new();
        let route = Route::new(vec!["a".into(), "b".into()], RouteKind::Linear).unwrap();
        let mut train = Train::new("t1", TrainKind::Cargo, "a", Position::ORIGIN, route);
        train.board(perishable("c1", 1)).unwrap();
        let mut trains = HashMap::new();
        trains.insert("t1".to_string(), train);

        expire_perishables(&mut stations, &mut trains);
        assert!(trains["t1"].carried_loads().is_empty());
    }

    #[test]
    fn test_plain_cargo_untouched_by_sweep() {
        let mut stations = HashMap::new();
        let mut st = Station::new("a", StationKind::Cargo, Position::ORIGIN);
        st.accept_load(Load::cargo("c1", "b", 50.0, Position::ORIGIN).unwrap())
            .unwrap();
        stations.insert("a".to_string(), st);
        let mut trains = HashMap::new();

        for _ in 0..10 {
            expire_perishables(&mut stations, &mut trains);
        }
        assert_eq!(stations["a"].waiting_loads().len(), 1);
    }
}
