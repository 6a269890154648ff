//! `scoot-vehicle` — one scooter's mutable state and its lifecycle rules.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`state`]    | `VehicleState` — position, speed, battery, status + tick ops  |
//! | [`decision`] | end-of-rental decision: verdict, routing, `ReturnOutcome`     |
//! | [`error`]    | `VehicleError`, `VehicleResult<T>`                            |
//!
//! # Movement model (cardinal random walk)
//!
//! A running scooter advances in discrete ticks:
//!
//! 1. Draw a speed uniformly in `[1, 20]` km/h.
//! 2. `distance_km = speed × tick_interval_secs / 3600`.
//! 3. Draw one of the four cardinal bearings and project the candidate
//!    position along the great circle.
//! 4. Commit position and speed, then drain the battery by a fixed
//!    [`BATTERY_DRAIN_PER_TICK`][state::BATTERY_DRAIN_PER_TICK]; the drain
//!    does not depend on the distance covered.
//!
//! The candidate position is fully computed before any field is written, so
//! a given RNG state always maps to the same committed coordinates.

pub mod decision;
pub mod error;
pub mod state;


pub use decision::{apply_return, return_verdict, ReturnOutcome, ReturnVerdict};
pub use error::{VehicleError, VehicleResult};
pub use state::{VehicleState, BATTERY_DRAIN_PER_TICK, LOW_BATTERY_PERCENT, MAX_SPEED_KPH};
