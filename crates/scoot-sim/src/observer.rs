//! Fleet observer trait for progress reporting and data collection.

use scoot_core::{RenterId, VehicleId};
use scoot_vehicle::ReturnOutcome;

/// Callbacks invoked by [`FleetDriver::run`][crate::FleetDriver::run] at key
/// points in a fleet run.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait FleetObserver {
    /// A scooter passed admission and its session is live.
    fn on_admitted(&mut self, _vehicle: VehicleId, _renter: RenterId) {}

    /// A scooter was skipped at admission (not available, or its data could
    /// not be fetched).
    fn on_rejected(&mut self, _vehicle: VehicleId) {}

    /// A round over all active sessions completed; `active` is the pool size
    /// after removals.
    fn on_round_end(&mut self, _round: u64, _active: usize) {}

    /// A session resolved to a terminal status and left the pool.
    fn on_session_end(
        &mut self,
        _vehicle: VehicleId,
        _renter: RenterId,
        _outcome: &ReturnOutcome,
        _elapsed_secs: u64,
        _battery_percent: f32,
    ) {
    }

    /// The window expired; `active` sessions are about to be force-returned.
    fn on_sweep_start(&mut self, _active: usize) {}

    /// The run is over; every session has been finalized.
    fn on_fleet_end(&mut self, _completed: usize) {}
}

/// A [`FleetObserver`] that does nothing.  Use when you need to call `run`
/// but don't want progress callbacks.
pub struct NoopFleetObserver;

impl FleetObserver for NoopFleetObserver {}
