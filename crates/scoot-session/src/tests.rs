//! Tests for session admission and finalization against the in-memory
//! directory.

use scoot_core::{CityZone, GeoPoint, RenterId, Station, StationId, StationKind, VehicleId,
    VehicleRng, VehicleStatus, ZoneId};
use scoot_directory::{MemoryDirectory, VehicleSnapshot};
use scoot_vehicle::{ReturnOutcome, VehicleError};

use crate::{RentalSession, SessionError};

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

fn seeded(id: u32, battery: f32, at: GeoPoint) -> MemoryDirectory {
    let dir = MemoryDirectory::new();
    dir.insert_vehicle(snapshot(id, battery, VehicleStatus::Available, at), zone());
    dir
}

/// First seed whose opening maintenance roll comes up "not due", keeping
/// the nominal-return tests deterministic.
fn calm_seed() -> u64 {
    use scoot_vehicle::VehicleState;
    (0..10_000u64)
        .find(|&s| !VehicleState::maintenance_due(&mut VehicleRng::new(s, VehicleId(1))))
        .expect("a calm seed exists")
}

// ── Admission ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod admission {
    use super::*;

    #[test]
    fn available_scooter_is_admitted_running() {
        let dir = seeded(1, 90.0, CENTER);
        let session = RentalSession::admit(&dir, VehicleId(1), RenterId(6)).unwrap();

        assert_eq!(session.renter(), RenterId(6));
        assert_eq!(session.vehicle().status, VehicleStatus::Running);
        assert_eq!(session.zone().id, ZoneId(2));

        // Ride log opened and the Running state pushed through.
        assert_eq!(dir.rides().len(), 1);
        assert_eq!(dir.rides()[0].vehicle, VehicleId(1));
        assert_eq!(dir.vehicle(VehicleId(1)).unwrap().status, VehicleStatus::Running);
    }

    #[test]
    fn non_available_status_is_rejected() {
        let dir = MemoryDirectory::new();
        dir.insert_vehicle(snapshot(1, 90.0, VehicleStatus::Charging, CENTER), zone());

        let err = RentalSession::admit(&dir, VehicleId(1), RenterId(6)).unwrap_err();
        assert!(matches!(
            err,
            SessionError::VehicleNotAvailable { vehicle: VehicleId(1), status: VehicleStatus::Charging }
        ));
        assert!(dir.rides().is_empty(), "no ride log for a rejected rental");
    }

    #[test]
    fn low_battery_is_rejected_before_any_log_is_opened() {
        let dir = seeded(1, 15.0, CENTER);
        let err = RentalSession::admit(&dir, VehicleId(1), RenterId(6)).unwrap_err();
        assert!(matches!(err, SessionError::Vehicle(VehicleError::LowBattery { .. })));
        assert!(dir.rides().is_empty());
        assert_eq!(
            dir.vehicle(VehicleId(1)).unwrap().status,
            VehicleStatus::Available,
            "remote record untouched by the refusal"
        );
    }

    #[test]
    fn unknown_scooter_is_a_directory_error() {
        let dir = MemoryDirectory::new();
        let err = RentalSession::admit(&dir, VehicleId(9), RenterId(6)).unwrap_err();
        assert!(matches!(err, SessionError::Directory(_)));
    }
}

// ── Ticking & refresh ─────────────────────────────────────────────────────────

#[cfg(test)]
mod running {
    use super::*;

    #[test]
    fn tick_moves_and_drains_through_the_session() {
        let dir = seeded(1, 100.0, CENTER);
        let mut session = RentalSession::admit(&dir, VehicleId(1), RenterId(6)).unwrap();
        let mut rng = VehicleRng::new(42, VehicleId(1));

        session.tick(15, &mut rng).unwrap();
        assert!((session.vehicle().battery_percent - 99.5).abs() < f32::EPSILON);
        assert_ne!(session.vehicle().position, CENTER);
    }

    #[test]
    fn refresh_keeps_the_session_running() {
        let dir = seeded(1, 100.0, CENTER);
        let mut session = RentalSession::admit(&dir, VehicleId(1), RenterId(6)).unwrap();

        // A remote record claiming Available must not demote the session.
        let remote = snapshot(1, 55.0, VehicleStatus::Available, OUTSIDE);
        session.refresh_from(&remote);

        assert_eq!(session.vehicle().status, VehicleStatus::Running);
        assert_eq!(session.vehicle().position, OUTSIDE);
        assert!((session.vehicle().battery_percent - 55.0).abs() < f32::EPSILON);
        assert!(!session.in_zone());
    }

    #[test]
    fn elapsed_is_whole_seconds_from_admission() {
        let dir = seeded(1, 100.0, CENTER);
        let session = RentalSession::admit(&dir, VehicleId(1), RenterId(6)).unwrap();
        assert_eq!(session.elapsed_secs(), 0);
    }
}

// ── Finalization ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod finalization {
    use super::*;

    #[test]
    fn nominal_return_closes_the_ride_available() {
        let dir = seeded(1, 90.0, CENTER);
        let mut session = RentalSession::admit(&dir, VehicleId(1), RenterId(6)).unwrap();
        let mut rng = VehicleRng::new(calm_seed(), VehicleId(1));

        let outcome = session.finalize(&dir, &mut rng);

        assert_eq!(outcome, ReturnOutcome::ReturnedAvailable);
        assert_eq!(dir.vehicle(VehicleId(1)).unwrap().status, VehicleStatus::Available);
        let rides = dir.rides();
        assert!(rides[0].end.is_some(), "ride log closed");
        assert_eq!(rides[0].end.as_ref().unwrap().station, None);
    }

    #[test]
    fn out_of_zone_beats_low_battery_and_stays_put() {
        let dir = seeded(1, 90.0, CENTER);
        let mut session = RentalSession::admit(&dir, VehicleId(1), RenterId(6)).unwrap();

        // Stranded outside with a nearly flat battery: rule 1 must win.
        session.refresh_from(&snapshot(1, 10.0, VehicleStatus::Running, OUTSIDE));
        let mut rng = VehicleRng::new(0, VehicleId(1));
        let outcome = session.finalize(&dir, &mut rng);

        assert_eq!(outcome, ReturnOutcome::LeftOutsideZone);
        let pushed = dir.vehicle(VehicleId(1)).unwrap();
        assert_eq!(pushed.status, VehicleStatus::Unavailable);
        assert_eq!(pushed.position, OUTSIDE, "not routed anywhere");
        assert_eq!(session.station_assignment(), None);
    }

    #[test]
    fn low_battery_routes_to_the_charging_station() {
        let dir = seeded(1, 90.0, CENTER);
        let station = Station {
            id: StationId(11),
            kind: StationKind::Charging,
            position: GeoPoint::new(59.20, 17.63),
        };
        dir.insert_station(ZoneId(2), station);

        let mut session = RentalSession::admit(&dir, VehicleId(1), RenterId(6)).unwrap();
        session.refresh_from(&snapshot(1, 12.0, VehicleStatus::Running, CENTER));
        let mut rng = VehicleRng::new(0, VehicleId(1));

        let outcome = session.finalize(&dir, &mut rng);

        assert_eq!(outcome, ReturnOutcome::SentToCharging(Some(StationId(11))));
        assert_eq!(session.station_assignment(), Some(StationId(11)));
        let pushed = dir.vehicle(VehicleId(1)).unwrap();
        assert_eq!(pushed.status, VehicleStatus::Charging);
        assert_eq!(pushed.position, station.position);
        assert_eq!(dir.rides()[0].end.as_ref().unwrap().station, Some(StationId(11)));
    }

    #[test]
    fn missing_charging_station_degrades_to_leaving_in_place() {
        let dir = seeded(1, 90.0, CENTER); // no stations seeded
        let mut session = RentalSession::admit(&dir, VehicleId(1), RenterId(6)).unwrap();
        session.refresh_from(&snapshot(1, 12.0, VehicleStatus::Running, CENTER));
        let mut rng = VehicleRng::new(0, VehicleId(1));

        let outcome = session.finalize(&dir, &mut rng);

        assert_eq!(outcome, ReturnOutcome::SentToCharging(None));
        let pushed = dir.vehicle(VehicleId(1)).unwrap();
        assert_eq!(pushed.status, VehicleStatus::Charging);
        assert_eq!(pushed.position, CENTER, "kept its last position");
        assert!(dir.rides()[0].end.is_some(), "ride still closed");
    }

    #[test]
    fn charge_ends_full_and_available() {
        let dir = seeded(1, 40.0, CENTER);
        let mut session = RentalSession::admit(&dir, VehicleId(1), RenterId(6)).unwrap();

        session.finalize_charged(&dir);

        let pushed = dir.vehicle(VehicleId(1)).unwrap();
        assert_eq!(pushed.status, VehicleStatus::Available);
        assert!((pushed.battery_percent - 100.0).abs() < f32::EPSILON);
        assert!(dir.rides()[0].end.is_some());
    }
}
