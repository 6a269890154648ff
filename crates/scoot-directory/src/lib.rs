//! `scoot-directory` — the remote city/vehicle directory as a collaborator.
//!
//! The directory service owns the fleet's persistent records: scooters,
//! cities, stations, renters, and ride logs.  This crate is the only place
//! that knows its wire protocol; everything above it works with the typed
//! [`Directory`] trait and core types.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`api`]      | The [`Directory`] trait — the seam the drivers consume      |
//! | [`snapshot`] | `VehicleSnapshot` — one fetched scooter record              |
//! | [`wire`]     | Query/mutation documents, response envelopes, parsing       |
//! | [`http`]     | `HttpDirectory` — blocking JSON client with a fixed timeout |
//! | [`memory`]   | `MemoryDirectory` test double (feature `test-helpers`)      |
//! | [`error`]    | `DirectoryError`, `DirectoryResult<T>`                      |
//!
//! # Failure contract
//!
//! Every call returns a distinguishable [`DirectoryError`]; nothing panics
//! across this boundary.  Callers treat a failed fetch as "cannot proceed
//! with this vehicle" and a failed update as a logged no-op.

pub mod api;
pub mod error;
pub mod http;
#[cfg(feature = "test-helpers")]
pub mod memory;
pub mod snapshot;
pub mod wire;


pub use api::Directory;
pub use error::{DirectoryError, DirectoryResult};
pub use http::HttpDirectory;
#[cfg(feature = "test-helpers")]
pub use memory::{MemoryDirectory, RideEnd, RideRecord};
pub use snapshot::VehicleSnapshot;
