use scoot_core::VehicleId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VehicleError {
    #[error("scooter {vehicle} battery at {level:.1} % is below the start threshold")]
    LowBattery { vehicle: VehicleId, level: f32 },

    #[error("scooter {0} is not running")]
    NotRunning(VehicleId),
}

pub type VehicleResult<T> = Result<T, VehicleError>;
