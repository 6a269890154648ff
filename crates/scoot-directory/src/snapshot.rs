//! One fetched scooter record, already translated to core types.

use scoot_core::{GeoPoint, StationId, VehicleId, VehicleStatus};
use scoot_vehicle::VehicleState;

/// A scooter as the directory last saw it.
///
/// Status arrives here already translated from the wire's integer code; the
/// vocabulary never leaks past [`wire`][crate::wire].
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleSnapshot {
    pub id: VehicleId,
    pub position: GeoPoint,
    pub speed_kph: u8,
    pub battery_percent: f32,
    pub status: VehicleStatus,
    pub station: Option<StationId>,
}

impl VehicleSnapshot {
    /// Promote the snapshot to live, owned vehicle state.
    pub fn into_state(self) -> VehicleState {
        VehicleState {
            id: self.id,
            position: self.position,
            speed_kph: self.speed_kph,
            battery_percent: self.battery_percent,
            status: self.status,
            station: self.station,
        }
    }
}

impl From<&VehicleState> for VehicleSnapshot {
    fn from(v: &VehicleState) -> Self {
        Self {
            id: v.id,
            position: v.position,
            speed_kph: v.speed_kph,
            battery_percent: v.battery_percent,
            status: v.status,
            station: v.station,
        }
    }
}
