//! Vehicle status vocabulary shared with the directory service.
//!
//! The directory exchanges status as a small fixed integer code; translation
//! happens only at the wire boundary (`scoot-directory`).  Codes 5 and 6 are
//! reserved by the service and never appear in scooter payloads.

use crate::{CoreError, CoreResult};

/// The lifecycle state of one scooter.  Exactly one variant holds at a time.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleStatus {
    /// Parked and rentable.
    Available,
    /// Left outside its zone; not rentable until collected.
    Unavailable,
    /// At (or headed to) a maintenance station.
    Maintenance,
    /// At (or headed to) a charging station.
    Charging,
    /// Actively ticking inside a rental session.
    Running,
}

impl VehicleStatus {
    /// The directory's integer code for this status.
    pub fn code(self) -> u8 {
        match self {
            VehicleStatus::Available   => 1,
            VehicleStatus::Unavailable => 2,
            VehicleStatus::Maintenance => 3,
            VehicleStatus::Charging    => 4,
            VehicleStatus::Running     => 7,
        }
    }

    /// Translate a directory code, rejecting anything outside the vocabulary.
    pub fn from_code(code: u8) -> CoreResult<Self> {
        match code {
            1 => Ok(VehicleStatus::Available),
            2 => Ok(VehicleStatus::Unavailable),
            3 => Ok(VehicleStatus::Maintenance),
            4 => Ok(VehicleStatus::Charging),
            7 => Ok(VehicleStatus::Running),
            other => Err(CoreError::UnknownStatusCode(other)),
        }
    }

    /// Human-readable label, useful for menus and CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleStatus::Available   => "available",
            VehicleStatus::Unavailable => "unavailable",
            VehicleStatus::Maintenance => "maintenance",
            VehicleStatus::Charging    => "charging",
            VehicleStatus::Running     => "running",
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
