//! The `RentalSession` lifecycle.

use std::time::Instant;

use log::warn;

use scoot_core::{unix_now_secs, CityZone, RenterId, RideId, StationId, VehicleId, VehicleRng,
    VehicleStatus};
use scoot_directory::{Directory, VehicleSnapshot};
use scoot_vehicle::{apply_return, return_verdict, ReturnOutcome, VehicleResult, VehicleState};

use crate::{SessionError, SessionResult};

/// One rental: a renter, the scooter they hold, and the zone it must stay in.
///
/// The session owns its `VehicleState` exclusively; the zone is snapshotted
/// at admission and immutable for the session's lifetime.
#[derive(Debug)]
pub struct RentalSession {
    renter: RenterId,
    vehicle: VehicleState,
    zone: CityZone,
    ride: RideId,
    started: Instant,
    station_assignment: Option<StationId>,
}

impl RentalSession {
    /// Try to rent `vehicle` for `renter`.
    ///
    /// Admission requires the directory to report the scooter `Available`
    /// and the battery to clear the start threshold; the city zone and a
    /// fresh ride log are both fetched/opened before the session exists.
    /// Any of those failing means no session, and nothing to undo: the ride
    /// log is opened last.  The initial `Running` push is fire-and-forget.
    pub fn admit<D>(directory: &D, vehicle: VehicleId, renter: RenterId) -> SessionResult<Self>
    where
        D: Directory + ?Sized,
    {
        let snapshot = directory.fetch_vehicle(vehicle)?;
        if snapshot.status != VehicleStatus::Available {
            return Err(SessionError::VehicleNotAvailable {
                vehicle,
                status: snapshot.status,
            });
        }

        let zone = directory.fetch_zone(vehicle)?;

        let mut state = snapshot.into_state();
        state.start()?;

        let ride = directory.open_ride(renter, vehicle, state.position, unix_now_secs())?;

        if let Err(e) = directory.push_vehicle(&state) {
            warn!("scooter {}: initial state push failed: {e}", vehicle.0);
        }

        Ok(Self {
            renter,
            vehicle: state,
            zone,
            ride,
            started: Instant::now(),
            station_assignment: None,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn renter(&self) -> RenterId {
        self.renter
    }

    pub fn vehicle(&self) -> &VehicleState {
        &self.vehicle
    }

    pub fn zone(&self) -> &CityZone {
        &self.zone
    }

    pub fn ride(&self) -> RideId {
        self.ride
    }

    /// The station chosen by the end-of-rental decision, once one is.
    pub fn station_assignment(&self) -> Option<StationId> {
        self.station_assignment
    }

    /// Whole seconds since the rental started (wall clock, truncated).
    pub fn elapsed_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }

    // ── While running ─────────────────────────────────────────────────────

    /// Advance the scooter one motion step.
    pub fn tick(&mut self, tick_interval_secs: u32, rng: &mut VehicleRng) -> VehicleResult<()> {
        self.vehicle.tick(tick_interval_secs, rng)
    }

    /// Re-seed position/speed/battery from the latest remote record.
    ///
    /// The directory is authoritative between batch rounds, but the session
    /// stays the owner of the lifecycle: the local `Running` status survives
    /// whatever the snapshot carries.
    pub fn refresh_from(&mut self, snapshot: &VehicleSnapshot) {
        self.vehicle.position = snapshot.position;
        self.vehicle.speed_kph = snapshot.speed_kph;
        self.vehicle.battery_percent = snapshot.battery_percent;
    }

    /// `true` iff the scooter still sits inside the session's zone.
    pub fn in_zone(&self) -> bool {
        self.vehicle.in_zone(&self.zone)
    }

    // ── Ending ────────────────────────────────────────────────────────────

    /// Run the end-of-rental decision and close out the rental.
    ///
    /// The destination station is fetched only on the decision paths that
    /// route to one; a failed station fetch degrades to leaving the scooter
    /// in place (logged).  The final state push and ride-log close are
    /// fire-and-forget.
    pub fn finalize<D>(&mut self, directory: &D, rng: &mut VehicleRng) -> ReturnOutcome
    where
        D: Directory + ?Sized,
    {
        let verdict = return_verdict(&self.vehicle, &self.zone, rng);

        let station = verdict.station_kind().and_then(|kind| {
            match directory.fetch_station(self.zone.id, kind) {
                Ok(s) => Some(s),
                Err(e) => {
                    warn!(
                        "scooter {}: no {kind} station available, leaving in place: {e}",
                        self.vehicle.id.0
                    );
                    None
                }
            }
        });

        let outcome = apply_return(&mut self.vehicle, verdict, station.as_ref());
        self.station_assignment = outcome.station();
        self.close_out(directory);
        outcome
    }

    /// End the rental by charging in place: battery to 100 %, status
    /// `Available`, ride closed.
    pub fn finalize_charged<D>(&mut self, directory: &D)
    where
        D: Directory + ?Sized,
    {
        self.vehicle.battery_percent = 100.0;
        self.vehicle.stop(VehicleStatus::Available);
        self.close_out(directory);
    }

    /// Push the terminal state and close the ride log, logging failures.
    fn close_out<D>(&self, directory: &D)
    where
        D: Directory + ?Sized,
    {
        let id = self.vehicle.id;
        if let Err(e) = directory.push_vehicle(&self.vehicle) {
            warn!("scooter {}: final state push failed: {e}", id.0);
        }
        if let Err(e) = directory.close_ride(
            self.ride,
            unix_now_secs(),
            self.vehicle.position,
            self.station_assignment,
        ) {
            warn!("scooter {}: ride log close failed: {e}", id.0);
        }
    }
}
