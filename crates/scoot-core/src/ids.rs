//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  Every identifier here is assigned by
//! the external directory service; the inner integer is `pub` so wire code can
//! read it directly, but nothing in this workspace ever derives meaning from
//! the numeric value.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(raw: $inner) -> $name {
                $name(raw)
            }
        }

        impl From<$name> for $inner {
            #[inline(always)]
            fn from(id: $name) -> $inner {
                id.0
            }
        }
    };
}

typed_id! {
    /// A scooter, as numbered by the directory service.
    pub struct VehicleId(u32);
}

typed_id! {
    /// A renter (customer) account in the directory service.
    pub struct RenterId(u32);
}

typed_id! {
    /// A charging/parking/maintenance station.
    pub struct StationId(u32);
}

typed_id! {
    /// A city zone record.
    pub struct ZoneId(u32);
}

typed_id! {
    /// A ride log opened when a rental starts and closed when it ends.
    /// `u64`: log rows accumulate across every simulation run.
    pub struct RideId(u64);
}
