//! `scoot-session` — the binding of one renter to one scooter.
//!
//! A [`RentalSession`] is created when a scooter passes the availability
//! check at rent time, owns that scooter's [`VehicleState`] exclusively for
//! the rental's duration, and is logically destroyed once an end-of-rental
//! decision has resolved and the remote ride log is closed.  No two live
//! sessions ever reference the same scooter.
//!
//! Directory failure policy (mirrors the service contract): fetches needed to
//! proceed are fatal to the session being built; update-style pushes and the
//! ride-log close are fire-and-forget (logged, never escalated).
//!
//! [`VehicleState`]: scoot_vehicle::VehicleState

pub mod error;
pub mod session;

#[cfg(test)]
mod tests;

pub use error::{SessionError, SessionResult};
pub use session::RentalSession;
