//! The end-of-rental decision.
//!
//! When a rental ends (explicitly, or forced by the zone/battery checks)
//! exactly one terminal status is assigned, evaluated in strict priority
//! order:
//!
//! 1. outside the zone   → `Unavailable`, left in place;
//! 2. battery low        → `Charging`, routed to a charging station;
//! 3. maintenance due    → `Maintenance`, routed to a maintenance station;
//! 4. otherwise          → `Available`, parked where it stands.
//!
//! A zone violation always overrides the battery and maintenance outcomes.
//!
//! The decision is split into a read-only verdict and a mutating apply step
//! so that callers fetch a destination station from the directory only on the
//! paths that need one.

use scoot_core::{CityZone, Station, StationId, StationKind, VehicleRng, VehicleStatus};

use crate::VehicleState;

/// Which rule of the priority ladder fired.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReturnVerdict {
    OutOfZone,
    BatteryLow,
    MaintenanceDue,
    Nominal,
}

impl ReturnVerdict {
    /// The station kind this verdict routes to, if any.
    pub fn station_kind(self) -> Option<StationKind> {
        match self {
            ReturnVerdict::BatteryLow => Some(StationKind::Charging),
            ReturnVerdict::MaintenanceDue => Some(StationKind::Maintenance),
            ReturnVerdict::OutOfZone | ReturnVerdict::Nominal => None,
        }
    }
}

/// How a finished rental was resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReturnOutcome {
    /// Stranded outside the zone; flagged unavailable where it stands.
    LeftOutsideZone,
    /// Flagged charging; `None` if no charging station could be fetched, in
    /// which case the scooter keeps its last position.
    SentToCharging(Option<StationId>),
    /// Flagged maintenance; `None` as above.
    SentToMaintenance(Option<StationId>),
    /// Returned in good order and rentable again.
    ReturnedAvailable,
}

impl ReturnOutcome {
    /// Short label for logs and the CSV ride report.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnOutcome::LeftOutsideZone => "out_of_zone",
            ReturnOutcome::SentToCharging(_) => "charging",
            ReturnOutcome::SentToMaintenance(_) => "maintenance",
            ReturnOutcome::ReturnedAvailable => "available",
        }
    }

    /// The station the scooter was routed to, if any.
    pub fn station(&self) -> Option<StationId> {
        match self {
            ReturnOutcome::SentToCharging(s) | ReturnOutcome::SentToMaintenance(s) => *s,
            _ => None,
        }
    }
}

impl std::fmt::Display for ReturnOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluate the priority ladder without mutating anything.
///
/// The maintenance die is only rolled once the zone and battery rules have
/// both passed: a higher-priority rule must not consume a random draw.
pub fn return_verdict(
    vehicle: &VehicleState,
    zone: &CityZone,
    rng: &mut VehicleRng,
) -> ReturnVerdict {
    if !vehicle.in_zone(zone) {
        ReturnVerdict::OutOfZone
    } else if vehicle.is_battery_low() {
        ReturnVerdict::BatteryLow
    } else if VehicleState::maintenance_due(rng) {
        ReturnVerdict::MaintenanceDue
    } else {
        ReturnVerdict::Nominal
    }
}

/// Commit a verdict: assign the terminal status, stop the scooter, and route
/// it to `station` where the verdict calls for one.
///
/// `station` is ignored for verdicts that do not route; a routing verdict
/// with `station == None` still gets its terminal status but keeps its last
/// position (the caller logs the missing station).
pub fn apply_return(
    vehicle: &mut VehicleState,
    verdict: ReturnVerdict,
    station: Option<&Station>,
) -> ReturnOutcome {
    match verdict {
        ReturnVerdict::OutOfZone => {
            vehicle.stop(VehicleStatus::Unavailable);
            ReturnOutcome::LeftOutsideZone
        }
        ReturnVerdict::BatteryLow => {
            vehicle.stop(VehicleStatus::Charging);
            if let Some(s) = station {
                vehicle.move_to_station(s);
            }
            ReturnOutcome::SentToCharging(station.map(|s| s.id))
        }
        ReturnVerdict::MaintenanceDue => {
            vehicle.stop(VehicleStatus::Maintenance);
            if let Some(s) = station {
                vehicle.move_to_station(s);
            }
            ReturnOutcome::SentToMaintenance(station.map(|s| s.id))
        }
        ReturnVerdict::Nominal => {
            vehicle.stop(VehicleStatus::Available);
            ReturnOutcome::ReturnedAvailable
        }
    }
}
