//! Integration tests for the fleet and ride drivers against the in-memory
//! directory.

use std::sync::Arc;
use std::time::{Duration, Instant};

use scoot_core::{CityZone, GeoPoint, RenterId, Station, StationId, StationKind, VehicleId,
    VehicleStatus, ZoneId};
use scoot_directory::{MemoryDirectory, VehicleSnapshot};
use scoot_session::RentalSession;
use scoot_vehicle::ReturnOutcome;

use crate::{Command, DriverState, FleetConfig, FleetDriver, FleetObserver, RideConfig,
    RideDriver, SimError};

// ── Fixtures ──────────────────────────────────────────────────────────────────

const CENTER: GeoPoint = GeoPoint { lat: 59.19554, lon: 17.62525 };
const OUTSIDE: GeoPoint = GeoPoint { lat: 59.159111, lon: 17.606871 };

fn zone() -> CityZone {
    CityZone::new(ZoneId(2), 25.84, CENTER).unwrap()
}

fn snapshot(id: u32, battery: f32, status: VehicleStatus, at: GeoPoint) -> VehicleSnapshot {
    VehicleSnapshot {
        id: VehicleId(id),
        position: at,
        speed_kph: 0,
        battery_percent: battery,
        status,
        station: None,
    }
}

/// Directory with `count` available scooters parked at the city centre.
fn city_fleet(count: u32) -> MemoryDirectory {
    let dir = MemoryDirectory::new();
    for id in 1..=count {
        dir.insert_vehicle(snapshot(id, 100.0, VehicleStatus::Available, CENTER), zone());
    }
    dir
}

fn fast_config(total: u32) -> FleetConfig {
    FleetConfig {
        total_vehicles: total,
        window: Duration::from_millis(40),
        tick_interval_secs: 15,
        per_session_delay: Duration::from_micros(100),
        first_renter_id: 6,
        seed: 42,
    }
}

fn fast_ride_config() -> RideConfig {
    RideConfig {
        cadence: Duration::from_millis(2),
        out_of_zone_cadence: Duration::from_millis(4),
        tick_interval_secs: 15,
    }
}

/// Observer that records every callback for assertions.
#[derive(Default)]
struct Recorder {
    admitted: Vec<(VehicleId, RenterId)>,
    rejected: Vec<VehicleId>,
    ended: Vec<(VehicleId, ReturnOutcome)>,
    sweep_size: Option<usize>,
    rounds: u64,
}

impl FleetObserver for Recorder {
    fn on_admitted(&mut self, vehicle: VehicleId, renter: RenterId) {
        self.admitted.push((vehicle, renter));
    }
    fn on_rejected(&mut self, vehicle: VehicleId) {
        self.rejected.push(vehicle);
    }
    fn on_round_end(&mut self, round: u64, _active: usize) {
        self.rounds = round;
    }
    fn on_session_end(
        &mut self,
        vehicle: VehicleId,
        _renter: RenterId,
        outcome: &ReturnOutcome,
        _elapsed_secs: u64,
        _battery_percent: f32,
    ) {
        self.ended.push((vehicle, *outcome));
    }
    fn on_sweep_start(&mut self, active: usize) {
        self.sweep_size = Some(active);
    }
}

/// Poll `pred` until it holds or the deadline passes.
fn wait_for(pred: impl Fn() -> bool, what: &str) {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if pred() {
            return;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    panic!("timed out waiting for {what}");
}

// ── Command parsing ───────────────────────────────────────────────────────────

#[cfg(test)]
mod commands {
    use super::*;

    #[test]
    fn digits_and_verbs_parse() {
        assert_eq!(Command::parse("1").unwrap(), Command::Start);
        assert_eq!(Command::parse(" stop ").unwrap(), Command::Stop);
        assert_eq!(Command::parse("3").unwrap(), Command::Info);
        assert_eq!(Command::parse("CHARGE").unwrap(), Command::Charge);
        assert_eq!(Command::parse("return").unwrap(), Command::Return);
    }

    #[test]
    fn unknown_choice_is_invalid_selection() {
        match Command::parse("9") {
            Err(SimError::InvalidSelection(s)) => assert_eq!(s, "9"),
            other => panic!("expected InvalidSelection, got {other:?}"),
        }
    }
}

// ── Batch admission ───────────────────────────────────────────────────────────

#[cfg(test)]
mod admission {
    use super::*;

    #[test]
    fn only_available_scooters_are_admitted() {
        // Three candidates; only #2 reports Available.
        let dir = MemoryDirectory::new();
        dir.insert_vehicle(snapshot(1, 100.0, VehicleStatus::Running, CENTER), zone());
        dir.insert_vehicle(snapshot(2, 100.0, VehicleStatus::Available, CENTER), zone());
        dir.insert_vehicle(snapshot(3, 100.0, VehicleStatus::Maintenance, CENTER), zone());

        let mut driver = FleetDriver::new(dir, fast_config(3));
        let mut recorder = Recorder::default();
        driver.admit_all(&mut recorder);

        assert_eq!(recorder.admitted, vec![(VehicleId(2), RenterId(6))],
            "the one admitted scooter gets the first synthetic renter id");
        assert_eq!(recorder.rejected, vec![VehicleId(1), VehicleId(3)]);
        assert_eq!(driver.active_count(), 1);
        assert_eq!(driver.directory().rides().len(), 1, "one ride log opened");
    }

    #[test]
    fn renter_ids_are_sequential_per_admission() {
        let dir = city_fleet(3);
        let mut driver = FleetDriver::new(dir, fast_config(3));
        let mut recorder = Recorder::default();
        driver.admit_all(&mut recorder);

        let renters: Vec<RenterId> = recorder.admitted.iter().map(|(_, r)| *r).collect();
        assert_eq!(renters, vec![RenterId(6), RenterId(7), RenterId(8)]);
    }

    #[test]
    fn missing_records_are_skipped_not_fatal() {
        // Only id 2 exists out of 1..=3.
        let dir = MemoryDirectory::new();
        dir.insert_vehicle(snapshot(2, 100.0, VehicleStatus::Available, CENTER), zone());

        let mut driver = FleetDriver::new(dir, fast_config(3));
        let mut recorder = Recorder::default();
        driver.admit_all(&mut recorder);

        assert_eq!(driver.active_count(), 1);
        assert_eq!(recorder.rejected, vec![VehicleId(1), VehicleId(3)]);
    }
}

// ── Batch rounds ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod rounds {
    use super::*;

    #[test]
    fn out_of_zone_session_is_removed_without_skipping_neighbours() {
        let dir = MemoryDirectory::new();
        dir.insert_vehicle(snapshot(1, 100.0, VehicleStatus::Available, CENTER), zone());
        dir.insert_vehicle(snapshot(2, 100.0, VehicleStatus::Available, OUTSIDE), zone());
        dir.insert_vehicle(snapshot(3, 100.0, VehicleStatus::Available, CENTER), zone());

        let mut driver = FleetDriver::new(dir, fast_config(3));
        let mut recorder = Recorder::default();
        driver.admit_all(&mut recorder);
        assert_eq!(driver.active_count(), 3);

        driver.run_round(&mut recorder);

        // #2 ended exactly once; #1 and #3 survived and were each ticked once.
        assert_eq!(recorder.ended, vec![(VehicleId(2), ReturnOutcome::LeftOutsideZone)]);
        assert_eq!(driver.active_count(), 2);
        assert_eq!(driver.directory().vehicle(VehicleId(2)).unwrap().status,
            VehicleStatus::Unavailable);
        for id in [1, 3] {
            let pushed = driver.directory().vehicle(VehicleId(id)).unwrap();
            assert!((pushed.battery_percent - 99.5).abs() < f32::EPSILON,
                "scooter {id} ticked exactly once, battery {}", pushed.battery_percent);
        }
    }

    #[test]
    fn post_tick_battery_check_routes_to_charging() {
        let dir = MemoryDirectory::new();
        dir.insert_vehicle(snapshot(1, 20.2, VehicleStatus::Available, CENTER), zone());
        let charging = Station {
            id: StationId(11),
            kind: StationKind::Charging,
            position: GeoPoint::new(59.20, 17.63),
        };
        dir.insert_station(ZoneId(2), charging);

        let mut driver = FleetDriver::new(dir, fast_config(1));
        let mut recorder = Recorder::default();
        driver.admit_all(&mut recorder);

        // One tick drains 20.2 → 19.7, crossing the threshold.
        driver.run_round(&mut recorder);

        assert_eq!(recorder.ended,
            vec![(VehicleId(1), ReturnOutcome::SentToCharging(Some(StationId(11))))]);
        assert_eq!(driver.active_count(), 0);
        let pushed = driver.directory().vehicle(VehicleId(1)).unwrap();
        assert_eq!(pushed.status, VehicleStatus::Charging);
        assert_eq!(pushed.position, charging.position);
    }

    #[test]
    fn snapshot_fetch_failure_skips_the_tick_but_keeps_the_session() {
        let dir = city_fleet(1);
        let mut driver = FleetDriver::new(dir, fast_config(1));
        let mut recorder = Recorder::default();
        driver.admit_all(&mut recorder);

        driver.directory().remove_vehicle(VehicleId(1));
        let pushes_before = driver.directory().pushes().len();

        driver.run_round(&mut recorder);

        assert_eq!(driver.active_count(), 1, "session survives a missing snapshot");
        assert!(recorder.ended.is_empty());
        assert_eq!(driver.directory().pushes().len(), pushes_before,
            "no update pushed for a skipped tick");
    }
}

// ── Sweep & full runs ─────────────────────────────────────────────────────────

#[cfg(test)]
mod sweep {
    use super::*;

    #[test]
    fn sweep_drains_the_pool_and_closes_every_ride() {
        let dir = city_fleet(2);
        let mut driver = FleetDriver::new(dir, fast_config(2));
        let mut recorder = Recorder::default();
        driver.admit_all(&mut recorder);

        driver.sweep(&mut recorder);

        assert_eq!(recorder.sweep_size, Some(2));
        assert_eq!(driver.active_count(), 0);
        assert_eq!(recorder.ended.len(), 2);
        assert_eq!(driver.stats().completed(), 2);
        assert!(driver.directory().rides().iter().all(|r| r.end.is_some()),
            "every ride log closed by the sweep");
    }

    #[test]
    fn full_run_completes_every_admitted_session() {
        let dir = city_fleet(3);
        let mut driver = FleetDriver::new(dir, fast_config(3));
        let mut recorder = Recorder::default();

        let stats = driver.run(&mut recorder);

        assert_eq!(stats.admitted, 3);
        assert_eq!(stats.rejected, 0);
        assert_eq!(stats.completed(), 3, "window end sweeps everything home");
        assert!(stats.rounds >= 1);
        assert_eq!(recorder.rounds, stats.rounds, "observer saw every round");
        assert_eq!(driver.active_count(), 0);
        assert!(driver.directory().rides().iter().all(|r| r.end.is_some()));
    }

    #[test]
    fn run_with_no_candidates_is_a_no_op() {
        let dir = MemoryDirectory::new();
        let mut driver = FleetDriver::new(dir, fast_config(0));
        let stats = driver.run(&mut crate::NoopFleetObserver);
        assert_eq!(stats.admitted, 0);
        assert_eq!(stats.completed(), 0);
    }
}

// ── Interactive driver ────────────────────────────────────────────────────────

#[cfg(test)]
mod interactive {
    use super::*;

    fn admitted_driver(dir: Arc<MemoryDirectory>) -> RideDriver<MemoryDirectory> {
        let session = RentalSession::admit(&*dir, VehicleId(1), RenterId(6)).unwrap();
        RideDriver::new(dir, session, fast_ride_config(), 42)
    }

    #[test]
    fn start_ticks_and_stop_suspends() {
        let dir = Arc::new(city_fleet(1));
        let mut driver = admitted_driver(Arc::clone(&dir));
        assert_eq!(driver.state(), DriverState::Idle);

        driver.dispatch(Command::Start).unwrap();
        assert_eq!(driver.state(), DriverState::Running);

        let baseline = dir.pushes().len();
        wait_for(|| dir.pushes().len() > baseline + 2, "background ticks to land");

        driver.dispatch(Command::Stop).unwrap();
        assert_eq!(driver.state(), DriverState::Stopped);

        // Let any in-flight tick finish, then the push count must hold still.
        std::thread::sleep(Duration::from_millis(20));
        let settled = dir.pushes().len();
        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(dir.pushes().len(), settled, "no ticks while stopped");
    }

    #[test]
    fn info_reports_status_and_rent_time() {
        let dir = Arc::new(city_fleet(1));
        let mut driver = admitted_driver(dir);
        let info = driver.dispatch(Command::Info).unwrap();
        assert!(info.contains("sleep mode"), "{info}");
        assert!(info.contains("rent time: 00:00:0"), "{info}");
    }

    #[test]
    fn return_joins_the_ticker_before_the_terminal_write() {
        let dir = Arc::new(city_fleet(1));
        let mut driver = admitted_driver(Arc::clone(&dir));
        driver.dispatch(Command::Start).unwrap();
        let baseline = dir.pushes().len();
        wait_for(|| dir.pushes().len() > baseline, "at least one tick");

        driver.dispatch(Command::Return).unwrap();
        assert_eq!(driver.state(), DriverState::Ended);
        assert!(dir.rides()[0].end.is_some(), "ride log closed");
        assert_ne!(dir.vehicle(VehicleId(1)).unwrap().status, VehicleStatus::Running);

        // The ticker has observably exited: nothing lands after the close.
        let settled = dir.pushes().len();
        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(dir.pushes().len(), settled, "no write after termination");
    }

    #[test]
    fn out_of_zone_force_stops_the_session() {
        let dir = Arc::new(MemoryDirectory::new());
        dir.insert_vehicle(snapshot(1, 100.0, VehicleStatus::Available, OUTSIDE), zone());
        let mut driver = admitted_driver(Arc::clone(&dir));

        driver.dispatch(Command::Start).unwrap();
        wait_for(|| !driver.is_ticking(), "the out-of-zone force-stop");

        // The next command folds the force-stop into the state machine.
        driver.dispatch(Command::Info).unwrap();
        assert_eq!(driver.state(), DriverState::Stopped);

        let message = driver.dispatch(Command::Return).unwrap();
        assert!(message.contains("out_of_zone"), "{message}");
        assert_eq!(dir.vehicle(VehicleId(1)).unwrap().status, VehicleStatus::Unavailable);
    }

    #[test]
    fn charge_ends_full_and_available() {
        let dir = Arc::new(city_fleet(1));
        let mut driver = admitted_driver(Arc::clone(&dir));
        driver.dispatch(Command::Start).unwrap();

        driver.dispatch(Command::Charge).unwrap();
        assert_eq!(driver.state(), DriverState::Ended);

        let record = dir.vehicle(VehicleId(1)).unwrap();
        assert_eq!(record.status, VehicleStatus::Available);
        assert!((record.battery_percent - 100.0).abs() < f32::EPSILON);
        assert!(dir.rides()[0].end.is_some());
    }

    #[test]
    fn start_refused_once_the_battery_is_low() {
        let dir = Arc::new(city_fleet(1));
        let mut driver = admitted_driver(Arc::clone(&dir));

        // Simulate a drained scooter via a remote refresh.
        driver
            .session()
            .lock()
            .unwrap()
            .refresh_from(&snapshot(1, 15.0, VehicleStatus::Running, CENTER));

        match driver.dispatch(Command::Start) {
            Err(SimError::Session(_)) => {}
            other => panic!("expected a low-battery refusal, got {other:?}"),
        }
        assert_eq!(driver.state(), DriverState::Idle, "refusal leaves the state alone");
    }

    #[test]
    fn commands_after_the_end_are_refused_politely() {
        let dir = Arc::new(city_fleet(1));
        let mut driver = admitted_driver(dir);
        driver.dispatch(Command::Return).unwrap();

        let message = driver.dispatch(Command::Start).unwrap();
        assert_eq!(message, "the rental has already ended");
        assert_eq!(driver.state(), DriverState::Ended);
    }
}

// ── CSV report ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod report {
    use super::*;
    use crate::CsvRideReport;

    #[test]
    fn writes_one_row_per_finished_session() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("rides.csv");

        let mut report = CsvRideReport::create(&path).unwrap();
        report.on_session_end(
            VehicleId(2),
            RenterId(6),
            &ReturnOutcome::SentToCharging(Some(StationId(11))),
            37,
            18.5,
        );
        report.on_session_end(VehicleId(3), RenterId(7), &ReturnOutcome::ReturnedAvailable, 5, 99.5);
        report.finish().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3, "header + two rows");
        assert_eq!(lines[0], "vehicle_id,renter_id,outcome,station_id,elapsed_secs,battery_percent");
        assert_eq!(lines[1], "2,6,charging,11,37,18.5");
        assert_eq!(lines[2], "3,7,available,,5,99.5");
    }
}
