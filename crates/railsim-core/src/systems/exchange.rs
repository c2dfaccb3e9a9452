//! Station-side load exchange: deliveries off a docked train, then boarding.
//!
//! Boarding order is load-bearing for determinism: waiting loads are taken
//! in ascending lexicographic ID order, and when several trains share a
//! station in one tick the orchestrator visits them in ascending train-ID
//! order, so an earlier train may exhaust loads a later one wanted.

use crate::components::{Station, Train};

/// Deliver every carried load whose destination is this station. Delivered
/// loads leave the system for good.
pub fn unload_deliveries(station: &Station, train: &mut Train) {
    let station_id = station.id();
    let train_id = train.id().to_string();
    train.carried_loads_mut().retain(|load| {
        if load.destination() == station_id {
            log::info!(
                "load {} delivered at {} by train {}",
                load.id(),
                station_id,
                train_id,
            );
            false
        } else {
            true
        }
    });
}

/// Board waiting loads onto `train`, one at a time in ascending load-ID
/// order. A candidate is left waiting when its destination is not on the
/// train's route, when the train's kind refuses its category, or when its
/// weight would push the train past its ceiling. Skipping is not an error;
/// the load is retried on every later visit.
pub fn board_waiting(station: &mut Station, train: &mut Train) {
    let mut i = 0;
    while i < station.waiting_loads().len() {
        let candidate = &station.waiting_loads()[i];
        let reachable = train.route().contains(candidate.destination());
        if reachable && train.can_board(candidate) {
            let load = station.waiting_loads_mut().remove(i);
            log::debug!(
                "load {} boarded train {} at {}",
                load.id(),
                train.id(),
                station.id(),
            );
            train.carried_loads_mut().push(load);
        } else {
            i += 1;
        }
    }
}

/// One station visit: unload first, then load.
pub fn exchange(station: &mut Station, train: &mut Train) {
    unload_deliveries(station, train);
    board_waiting(station, train);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Load, Route, RouteKind, StationKind, TrainKind};
    use crate::geometry::Position;

    fn station(id: &str, kind: StationKind) -> Station {
        Station::new(id, kind, Position::ORIGIN)
    }

    fn train_at(id: &str, kind: TrainKind, at: &str, route: &[&str]) -> Train {
        let route = Route::new(
            route.iter().map(|s| s.to_string()).collect(),
            RouteKind::Linear,
        )
        .unwrap();
        Train::new(id, kind, at, Position::ORIGIN, route)
    }

    // --- Unloading ---

    #[test]
    fn test_unload_removes_only_loads_for_this_station() {
        let st = station("b", StationKind::Central);
        let mut t = train_at("t1", TrainKind::Bullet, "b", &["a", "b", "c"]);
        t.board(Load::passenger("p-here", "b", Position::ORIGIN))
            .unwrap();
        t.board(Load::passenger("p-later", "c", Position::ORIGIN))
            .unwrap();

        unload_deliveries(&st, &mut t);

        let ids: Vec<&str> = t.carried_loads().iter().map(|l| l.id()).collect();
        assert_eq!(ids, vec!["p-later"]);
    }

    #[test]
    fn test_unload_twice_is_idempotent() {
        let st = station("b", StationKind::Central);
        let mut t = train_at("t1", TrainKind::Bullet, "b", &["a", "b"]);
        t.board(Load::passenger("p1", "b", Position::ORIGIN)).unwrap();
        unload_deliveries(&st, &mut t);
        unload_deliveries(&st, &mut t);
        assert!(t.carried_loads().is_empty());
    }

    // --- Boarding ---

    #[test]
    fn test_boarding_takes_loads_in_id_order() {
        let mut st = station("a", StationKind::Central);
        st.accept_load(Load::passenger("zeta", "b", Position::ORIGIN))
            .unwrap();
        st.accept_load(Load::passenger("alpha", "b", Position::ORIGIN))
            .unwrap();
        let mut t = train_at("t1", TrainKind::Bullet, "a", &["a", "b"]);

        board_waiting(&mut st, &mut t);

        let ids: Vec<&str> = t.carried_loads().iter().map(|l| l.id()).collect();
        assert_eq!(ids, vec!["alpha", "zeta"]);
        assert!(st.waiting_loads().is_empty());
    }

    #[test]
    fn test_unreachable_destination_stays_waiting() {
        let mut st = station("a", StationKind::Central);
        st.accept_load(Load::passenger("p1", "nowhere", Position::ORIGIN))
            .unwrap();
        let mut t = train_at("t1", TrainKind::Bullet, "a", &["a", "b"]);

        board_waiting(&mut st, &mut t);

        assert!(t.carried_loads().is_empty());
        assert_eq!(st.waiting_loads().len(), 1);
    }

    #[test]
    fn test_weight_ceiling_skips_but_keeps_scanning() {
        let mut st = station("a", StationKind::Cargo);
        st.accept_load(Load::cargo("c1", "b", 3000.0, Position::ORIGIN).unwrap())
            .unwrap();
        st.accept_load(Load::cargo("c2", "b", 2500.0, Position::ORIGIN).unwrap())
            .unwrap();
        st.accept_load(Load::cargo("c3", "b", 2000.0, Position::ORIGIN).unwrap())
            .unwrap();
        let mut t = train_at("t1", TrainKind::Cargo, "a", &["a", "b"]);

        board_waiting(&mut st, &mut t);

        // c1 boards (3000); c2 would overflow (5500) and is skipped; c3
        // still fits exactly (5000).
        let ids: Vec<&str> = t.carried_loads().iter().map(|l| l.id()).collect();
        assert_eq!(ids, vec!["c1", "c3"]);
        let waiting: Vec<&str> = st.waiting_loads().iter().map(|l| l.id()).collect();
        assert_eq!(waiting, vec!["c2"]);
    }

    #[test]
    fn test_wrong_category_stays_waiting() {
        let mut st = station("a", StationKind::Central);
        st.accept_load(Load::cargo("c1", "b", 100.0, Position::ORIGIN).unwrap())
            .unwrap();
        st.accept_load(Load::passenger("p1", "b", Position::ORIGIN))
            .unwrap();
        let mut t = train_at("t1", TrainKind::Passenger, "a", &["a", "b"]);

        board_waiting(&mut st, &mut t);

        let ids: Vec<&str> = t.carried_loads().iter().map(|l| l.id()).collect();
        assert_eq!(ids, vec!["p1"]);
        let waiting: Vec<&str> = st.waiting_loads().iter().map(|l| l.id()).collect();
        assert_eq!(waiting, vec!["c1"]);
    }

    #[test]
    fn test_exchange_unloads_before_loading() {
        // The train arrives full; delivery must free capacity before the
        // waiting load is considered.
        let mut st = station("b", StationKind::Cargo);
        st.accept_load(Load::cargo("new", "c", 5000.0, Position::ORIGIN).unwrap())
            .unwrap();
        let mut t = train_at("t1", TrainKind::Cargo, "b", &["a", "b", "c"]);
        t.board(Load::cargo("old", "b", 5000.0, Position::ORIGIN).unwrap())
            .unwrap();

        exchange(&mut st, &mut t);

        let ids: Vec<&str> = t.carried_loads().iter().map(|l| l.id()).collect();
        assert_eq!(ids, vec!["new"]);
        assert!(st.waiting_loads().is_empty());
    }
}
