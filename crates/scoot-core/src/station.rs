//! Stations a scooter can be routed to when a rental ends.

use crate::{CoreError, CoreResult, GeoPoint, StationId};

/// What a station is for.  The directory numbers this closed set externally.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StationKind {
    Charging,
    Parking,
    Maintenance,
}

impl StationKind {
    /// The directory's integer code for this kind.
    pub fn code(self) -> u8 {
        match self {
            StationKind::Charging    => 1,
            StationKind::Parking     => 2,
            StationKind::Maintenance => 3,
        }
    }

    /// Translate a directory code, rejecting anything outside the vocabulary.
    pub fn from_code(code: u8) -> CoreResult<Self> {
        match code {
            1 => Ok(StationKind::Charging),
            2 => Ok(StationKind::Parking),
            3 => Ok(StationKind::Maintenance),
            other => Err(CoreError::UnknownStationKind(other)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StationKind::Charging    => "charging",
            StationKind::Parking     => "parking",
            StationKind::Maintenance => "maintenance",
        }
    }
}

impl std::fmt::Display for StationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One station as reported by the directory.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    pub id: StationId,
    pub kind: StationKind,
    pub position: GeoPoint,
}
