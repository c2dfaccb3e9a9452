//! Railsim Headless Simulation Harness
//!
//! Validates the tick engine end-to-end without any UI. Runs scripted
//! scenarios against `RailNetwork` plus a randomized network sweep that
//! checks the simulation invariants over many ticks.
//!
//! Usage:
//!   cargo run -p railsim-simtest
//!   cargo run -p railsim-simtest -- --verbose
//!   cargo run -p railsim-simtest -- --json

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use railsim_core::prelude::*;
use serde::Serialize;

// ── Test harness ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(results: &mut Vec<TestResult>, name: &str, passed: bool, detail: String) {
    results.push(TestResult {
        name: name.into(),
        passed,
        detail,
    });
}

fn main() {
    env_logger::init();
    let verbose = std::env::args().any(|a| a == "--verbose");
    let json = std::env::args().any(|a| a == "--json");
    if !json {
        println!("=== Railsim Simulation Harness ===\n");
    }

    let mut results = Vec::new();

    // 1. Shuttle movement and arrival timing
    results.extend(validate_shuttle_timing(json));

    // 2. Load assignment ordering and ceilings
    results.extend(validate_load_assignment(json));

    // 3. Capacity gating at stations
    results.extend(validate_capacity_rules(json));

    // 4. Perishable cargo lifecycle
    results.extend(validate_perishables(json));

    // 5. Randomized invariant sweep
    results.extend(validate_random_sweep(json));

    if json {
        match serde_json::to_string_pretty(&results) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("JSON encode error: {}", e),
        }
    } else {
        println!();
        for r in &results {
            let icon = if r.passed { "✓" } else { "✗" };
            if !r.passed || verbose {
                println!("  {} {}: {}", icon, r.name, r.detail);
            }
        }
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = results.len() - passed;
        println!(
            "\n=== RESULT: {}/{} passed, {} failed ===",
            passed,
            results.len(),
            failed
        );
    }

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }
}

fn section(json: bool, title: &str) {
    if !json {
        println!("--- {} ---", title);
    }
}

fn route(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

// ── 1. Shuttle timing ───────────────────────────────────────────────────

fn validate_shuttle_timing(json: bool) -> Vec<TestResult> {
    section(json, "Shuttle timing");
    let mut results = Vec::new();

    let mut net = RailNetwork::new();
    net.create_station("a", StationKind::Passenger, 0.0, 0.0)
        .unwrap();
    net.create_station("b", StationKind::Passenger, 10.0, 0.0)
        .unwrap();
    net.create_track("ab", "a", "b").unwrap();
    net.create_train("shuttle", TrainKind::Passenger, "a", route(&["a", "b"]))
        .unwrap();

    let mut positions = Vec::new();
    for _ in 0..5 {
        net.simulate().unwrap();
        positions.push(net.train_snapshot("shuttle").unwrap().position.x);
    }
    let expected = [2.0, 4.0, 6.0, 8.0, 10.0];
    let on_track = positions
        .iter()
        .zip(expected.iter())
        .all(|(got, want)| (got - want).abs() < 1e-9);
    check(
        &mut results,
        "five_tick_crossing",
        on_track,
        format!("positions {:?}", positions),
    );

    let snap = net.train_snapshot("shuttle").unwrap();
    check(
        &mut results,
        "docked_after_arrival",
        snap.location == "b",
        format!("location {}", snap.location),
    );

    // 10 more ticks: back at a, having reversed at b.
    net.simulate_minutes(5).unwrap();
    let snap = net.train_snapshot("shuttle").unwrap();
    check(
        &mut results,
        "shuttle_reverses",
        snap.location == "a" && snap.position.x.abs() < 1e-9,
        format!("location {} at x={}", snap.location, snap.position.x),
    );

    results
}

// ── 2. Load assignment ──────────────────────────────────────────────────

fn validate_load_assignment(json: bool) -> Vec<TestResult> {
    section(json, "Load assignment");
    let mut results = Vec::new();

    let mut net = RailNetwork::new();
    net.create_station("hub", StationKind::Central, 0.0, 0.0)
        .unwrap();
    net.create_station("out", StationKind::Central, 40.0, 0.0)
        .unwrap();
    net.create_track("ho", "hub", "out").unwrap();
    net.create_cargo("hub", "out", "c-big", 3000.0).unwrap();
    net.create_cargo("hub", "out", "c-mid", 2500.0).unwrap();
    net.create_cargo("hub", "out", "c-sml", 2000.0).unwrap();
    net.create_train("first", TrainKind::Cargo, "hub", route(&["hub", "out"]))
        .unwrap();
    net.create_train("second", TrainKind::Cargo, "hub", route(&["hub", "out"]))
        .unwrap();

    net.simulate().unwrap();

    // Lex order: c-big, c-mid, c-sml. "first" takes c-big (3000), skips
    // c-mid (would be 5500) and takes c-sml (5000 exactly); "second" gets
    // the leftover c-mid.
    let first: Vec<String> = net
        .train_snapshot("first")
        .unwrap()
        .loads
        .iter()
        .map(|l| l.id.clone())
        .collect();
    let second: Vec<String> = net
        .train_snapshot("second")
        .unwrap()
        .loads
        .iter()
        .map(|l| l.id.clone())
        .collect();
    check(
        &mut results,
        "lexicographic_first_pick",
        first == ["c-big", "c-sml"],
        format!("first carries {:?}", first),
    );
    check(
        &mut results,
        "later_train_gets_leftovers",
        second == ["c-mid"],
        format!("second carries {:?}", second),
    );
    check(
        &mut results,
        "platform_emptied",
        net.station_snapshot("hub").unwrap().loads.is_empty(),
        "no loads left waiting".into(),
    );

    results
}

// ── 3. Capacity rules ───────────────────────────────────────────────────

fn validate_capacity_rules(json: bool) -> Vec<TestResult> {
    section(json, "Capacity rules");
    let mut results = Vec::new();

    let mut net = RailNetwork::new();
    net.create_station("ps", StationKind::Passenger, 0.0, 0.0)
        .unwrap();
    net.create_station("other", StationKind::Passenger, 10.0, 0.0)
        .unwrap();
    net.create_track("t", "ps", "other").unwrap();
    net.create_train("d1", TrainKind::Passenger, "ps", route(&["ps", "other"]))
        .unwrap();
    net.create_train("d2", TrainKind::Passenger, "ps", route(&["ps", "other"]))
        .unwrap();
    let refused = net.create_train("d3", TrainKind::Passenger, "ps", route(&["ps", "other"]));
    check(
        &mut results,
        "third_docking_refused",
        matches!(refused, Err(SimError::StationFull { .. })),
        format!("{:?}", refused),
    );

    let bad_route = net.create_train("d4", TrainKind::Passenger, "ps", route(&["ps"]));
    check(
        &mut results,
        "single_station_route_refused",
        matches!(bad_route, Err(SimError::InvalidRoute(_))),
        format!("{:?}", bad_route),
    );

    results
}

// ── 4. Perishables ──────────────────────────────────────────────────────

fn validate_perishables(json: bool) -> Vec<TestResult> {
    section(json, "Perishable cargo");
    let mut results = Vec::new();

    let mut net = RailNetwork::new();
    net.create_station("a", StationKind::Cargo, 0.0, 0.0).unwrap();
    net.create_station("b", StationKind::Cargo, 30.0, 0.0).unwrap();
    net.create_track("ab", "a", "b").unwrap();
    net.create_perishable_cargo("a", "b", "rots-fast", 500.0, 3)
        .unwrap();
    net.create_perishable_cargo("a", "b", "keeps-well", 500.0, 60)
        .unwrap();
    net.create_train("t", TrainKind::Cargo, "a", route(&["a", "b"]))
        .unwrap();

    // Both board on tick 1; "rots-fast" spoils on tick 3, mid-leg.
    net.simulate_minutes(3).unwrap();
    let carried: Vec<String> = net
        .train_snapshot("t")
        .unwrap()
        .loads
        .iter()
        .map(|l| l.id.clone())
        .collect();
    check(
        &mut results,
        "spoils_in_transit",
        carried == ["keeps-well"],
        format!("carried {:?}", carried),
    );

    // The survivor is delivered once the train gets there.
    net.simulate_minutes(12).unwrap();
    let snap = net.train_snapshot("t").unwrap();
    check(
        &mut results,
        "survivor_delivered",
        snap.loads.is_empty(),
        format!("carried {:?} at {}", snap.loads.len(), snap.location),
    );

    results
}

// ── 5. Randomized invariant sweep ───────────────────────────────────────

/// Build a random linear network and hammer it, checking the invariants the
/// engine promises: trains never leave the line, docked counts stay within
/// capacity, and no load is ever in two places at once or resurrected after
/// delivery.
fn validate_random_sweep(json: bool) -> Vec<TestResult> {
    section(json, "Randomized sweep");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(0x5EED);

    let mut violations = Vec::new();
    for round in 0..10 {
        let mut net = RailNetwork::new();
        let station_count = rng.gen_range(3..8);
        let ids: Vec<String> = (0..station_count).map(|i| format!("s{}", i)).collect();
        for (i, id) in ids.iter().enumerate() {
            let kind = match rng.gen_range(0..3) {
                0 => StationKind::Cargo,
                1 => StationKind::Central,
                _ => StationKind::Passenger,
            };
            net.create_station(id, kind, i as f64 * rng.gen_range(5.0..15.0), 0.0)
                .unwrap();
        }
        for pair in ids.windows(2) {
            net.create_track(&format!("{}-{}", pair[0], pair[1]), &pair[0], &pair[1])
                .unwrap();
        }

        for t in 0..rng.gen_range(1..4u32) {
            let id = format!("t{}", t);
            let start = ids[rng.gen_range(0..ids.len())].clone();
            // Start station may already be full this round; skip the train.
            let _ = net.create_train(&id, TrainKind::Bullet, &start, ids.clone());
        }
        for c in 0..rng.gen_range(0..12u32) {
            let from = &ids[rng.gen_range(0..ids.len())];
            let to = &ids[rng.gen_range(0..ids.len())];
            let _ = net.create_cargo(from, to, &format!("c{}", c), rng.gen_range(1.0..2000.0));
        }

        let max_x = net
            .station_ids()
            .iter()
            .map(|sid| net.station_snapshot(sid).unwrap().position.x)
            .fold(0.0_f64, f64::max);

        for _ in 0..rng.gen_range(10..60) {
            net.simulate().unwrap();

            // Trains stay on the line.
            for tid in net.train_ids() {
                let snap = net.train_snapshot(&tid).unwrap();
                if snap.position.x < -1e-9 || snap.position.x > max_x + 1e-9 {
                    violations.push(format!(
                        "round {}: {} off the line at {}",
                        round, tid, snap.position.x
                    ));
                }
            }

            // Docked counts respect station capacity, and no load exists in
            // two places at once (nor comes back after delivery).
            let mut seen_loads = std::collections::HashSet::new();
            for sid in net.station_ids() {
                let snap = net.station_snapshot(&sid).unwrap();
                let cap = match snap.kind.as_str() {
                    "PassengerStation" => 2,
                    "CargoStation" => 4,
                    _ => 8,
                };
                if snap.trains.len() > cap {
                    violations.push(format!("round {}: {} over capacity", round, sid));
                }
                for load in &snap.loads {
                    if !seen_loads.insert(load.id.clone()) {
                        violations.push(format!("round {}: load {} duplicated", round, load.id));
                    }
                }
            }
            for tid in net.train_ids() {
                for load in net.train_snapshot(&tid).unwrap().loads {
                    if !seen_loads.insert(load.id.clone()) {
                        violations.push(format!("round {}: load {} duplicated", round, load.id));
                    }
                }
            }
        }
    }

    check(
        &mut results,
        "random_sweep_invariants",
        violations.is_empty(),
        if violations.is_empty() {
            "10 random networks, no invariant violations".into()
        } else {
            violations.join("; ")
        },
    );

    results
}
