use scoot_core::{VehicleId, VehicleStatus};
use scoot_directory::DirectoryError;
use scoot_vehicle::VehicleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("scooter {vehicle} is not available (reported {status})")]
    VehicleNotAvailable {
        vehicle: VehicleId,
        status: VehicleStatus,
    },

    #[error(transparent)]
    Vehicle(#[from] VehicleError),

    #[error("directory lookup failed: {0}")]
    Directory(#[from] DirectoryError),
}

pub type SessionResult<T> = Result<T, SessionError>;
