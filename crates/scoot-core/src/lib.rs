//! `scoot-core` — foundational types for the scoot fleet simulator.
//!
//! This crate is a dependency of every other `scoot-*` crate.  It intentionally
//! has no `scoot-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`ids`]     | `VehicleId`, `RenterId`, `StationId`, `ZoneId`, `RideId` |
//! | [`geo`]     | `GeoPoint`, haversine distance, destination projection |
//! | [`zone`]    | `CityZone` — circular city zone + containment          |
//! | [`station`] | `Station`, `StationKind`                               |
//! | [`status`]  | `VehicleStatus` + directory wire codes                 |
//! | [`rng`]     | `VehicleRng` (per-vehicle deterministic RNG)           |
//! | [`clock`]   | Unix-seconds timestamps, `HH:MM:SS` formatting         |
//! | [`error`]   | `CoreError`, `CoreResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod clock;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod station;
pub mod status;
pub mod zone;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use clock::{format_hms, unix_now_secs};
pub use error::{CoreError, CoreResult};
pub use geo::{GeoPoint, CARDINAL_BEARINGS};
pub use ids::{RenterId, RideId, StationId, VehicleId, ZoneId};
pub use rng::VehicleRng;
pub use station::{Station, StationKind};
pub use status::VehicleStatus;
pub use zone::CityZone;
