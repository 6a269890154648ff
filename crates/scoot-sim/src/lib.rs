//! `scoot-sim` — the drivers that advance rentals through time.
//!
//! # Two driving modes
//!
//! **Interactive** ([`RideDriver`]): one rental, driven by menu commands on
//! the foreground thread while a background thread ticks the scooter on a
//! fixed cadence.  The two threads share the session behind a mutex plus two
//! atomic flags (running / terminate); `charge` and `return` set the
//! terminate flag and **join** the ticker before the terminal state is
//! pushed, so a stale in-flight tick can never overwrite the final write.
//!
//! **Batch** ([`FleetDriver`]): a pool of sessions advanced round by round
//! for a fixed wall-clock window.  Each round runs a read/tick phase over
//! every active session, then an apply phase that finalizes and removes the
//! sessions that failed their zone or battery check.  The pool is rebuilt
//! each round, so removal can never skip or double-process a neighbour.
//! When the window expires, a sweep finalizes everything still active.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the round's fetch+tick phase on Rayon's pool.     |

pub mod error;
pub mod fleet;
pub mod observer;
pub mod report;
pub mod ride;

#[cfg(test)]
mod tests;

pub use error::{SimError, SimResult};
pub use fleet::{FleetConfig, FleetDriver, FleetStats};
pub use observer::{FleetObserver, NoopFleetObserver};
pub use report::CsvRideReport;
pub use ride::{Command, DriverState, RideConfig, RideDriver};
