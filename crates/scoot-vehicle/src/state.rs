//! Per-scooter mutable state and tick operations.

use scoot_core::{
    CityZone, GeoPoint, Station, StationId, VehicleId, VehicleRng, VehicleStatus,
    CARDINAL_BEARINGS,
};

use crate::{VehicleError, VehicleResult};

/// Battery percentage below which a scooter must be routed to charging and
/// may not be started.
pub const LOW_BATTERY_PERCENT: f32 = 20.0;

/// Fixed battery drain per tick, independent of speed and distance.
pub const BATTERY_DRAIN_PER_TICK: f32 = 0.5;

/// Top speed of the random walk, km/h.
pub const MAX_SPEED_KPH: u8 = 20;

/// Sides of the maintenance die: each roll is due with probability 1/10.
const MAINTENANCE_DIE_SIDES: u8 = 10;

/// The live state of a single scooter.
///
/// `status == Running` holds exactly while the scooter is actively ticking
/// inside a rental session; `station` is `None` while running and points at
/// the parked/destination station otherwise.
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleState {
    pub id: VehicleId,
    pub position: GeoPoint,
    /// Current speed; 0 whenever the scooter is not moving.
    pub speed_kph: u8,
    /// Charge level in `[0, 100]`.  Non-increasing while running; reset only
    /// by an explicit charge action.
    pub battery_percent: f32,
    pub status: VehicleStatus,
    pub station: Option<StationId>,
}

impl VehicleState {
    /// A parked, rentable scooter: the usual fixture and seed state.
    pub fn available(id: VehicleId, position: GeoPoint, battery_percent: f32) -> Self {
        Self {
            id,
            position,
            speed_kph: 0,
            battery_percent,
            status: VehicleStatus::Available,
            station: None,
        }
    }

    /// Begin running.  Refused below the low-battery threshold; the status
    /// is left untouched on failure.
    pub fn start(&mut self) -> VehicleResult<()> {
        if self.battery_percent < LOW_BATTERY_PERCENT {
            return Err(VehicleError::LowBattery {
                vehicle: self.id,
                level: self.battery_percent,
            });
        }
        self.status = VehicleStatus::Running;
        Ok(())
    }

    /// One motion step of the random walk.
    ///
    /// Draw order is fixed (speed, then bearing) and the candidate position
    /// is computed before anything is committed, so the same RNG state always
    /// yields the same coordinates.
    pub fn tick(&mut self, tick_interval_secs: u32, rng: &mut VehicleRng) -> VehicleResult<()> {
        if self.status != VehicleStatus::Running {
            return Err(VehicleError::NotRunning(self.id));
        }

        let speed: u8 = rng.gen_range(1..=MAX_SPEED_KPH);
        let distance_km = speed as f64 * tick_interval_secs as f64 / 3_600.0;
        let bearing = CARDINAL_BEARINGS[rng.gen_range(0..CARDINAL_BEARINGS.len())];
        let candidate = self.position.destination(distance_km, bearing);

        self.position = candidate;
        self.speed_kph = speed;
        self.battery_percent = (self.battery_percent - BATTERY_DRAIN_PER_TICK).max(0.0);
        Ok(())
    }

    /// Stop moving and take on `new_status`.  Safe to call when already
    /// stopped.
    pub fn stop(&mut self, new_status: VehicleStatus) {
        self.status = new_status;
        self.speed_kph = 0;
    }

    /// `true` once the charge level has dropped below
    /// [`LOW_BATTERY_PERCENT`].
    #[inline]
    pub fn is_battery_low(&self) -> bool {
        self.battery_percent < LOW_BATTERY_PERCENT
    }

    /// Roll the maintenance die: due with probability 1/10.
    ///
    /// Scooters carry no real wear model, so being due for maintenance is an
    /// independent per-call draw, not persisted state.
    pub fn maintenance_due(rng: &mut VehicleRng) -> bool {
        rng.gen_range(1..=MAINTENANCE_DIE_SIDES) == 1
    }

    /// Relocate to `station` and remember it.  The status is not touched —
    /// routing and status assignment are separate steps of the end-of-rental
    /// decision.
    pub fn move_to_station(&mut self, station: &Station) {
        self.position = station.position;
        self.station = Some(station.id);
    }

    /// `true` iff the scooter currently sits inside `zone`.
    #[inline]
    pub fn in_zone(&self, zone: &CityZone) -> bool {
        zone.contains(self.position)
    }
}

impl std::fmt::Display for VehicleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "scooter {} at {}: {} km/h, {:.1} %, {}",
            self.id.0, self.position, self.speed_kph, self.battery_percent, self.status
        )
    }
}
