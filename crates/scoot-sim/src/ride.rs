//! The interactive single-rental driver.
//!
//! One foreground thread handles menu commands; one background thread ticks
//! the scooter.  They share the session behind a mutex and coordinate
//! through two atomic flags:
//!
//! - `running`: set by `start`, cleared by `stop` (and by the ticker itself
//!   when the scooter leaves the zone).  The ticker only moves the scooter
//!   while this is set.
//! - `terminate`: set once by `charge`/`return`.  The ticker checks it at
//!   every cadence boundary and exits.
//!
//! `charge` and `return` join the ticker thread after setting `terminate`
//! and before any terminal directory write, so an in-flight tick can never
//! overwrite the final state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::warn;

use scoot_core::{format_hms, VehicleRng};
use scoot_directory::Directory;
use scoot_session::RentalSession;

use crate::{SimError, SimResult};

/// Mixed into the master seed so the end-of-rental maintenance roll draws
/// from a different stream than the background walk.
const RETURN_ROLL_SALT: u64 = 0x5f0e_6ad1_93b1_7c4d;

// ── Commands ──────────────────────────────────────────────────────────────────

/// The closed set of menu commands.  Dispatch is an exhaustive match, not
/// a name-based lookup.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Info,
    Charge,
    Return,
}

impl Command {
    /// The menu shown between prompts.
    pub const MENU: &'static str = "\
1: start the scooter
2: stop the scooter
3: show scooter info
4: charge the scooter and end the rental
5: return the scooter";

    /// Parse a menu choice; both the digit and the verb are accepted.
    pub fn parse(input: &str) -> SimResult<Command> {
        match input.trim().to_ascii_lowercase().as_str() {
            "1" | "start" => Ok(Command::Start),
            "2" | "stop" => Ok(Command::Stop),
            "3" | "info" => Ok(Command::Info),
            "4" | "charge" => Ok(Command::Charge),
            "5" | "return" => Ok(Command::Return),
            other => Err(SimError::InvalidSelection(other.to_string())),
        }
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

/// Cadences for the background ticker.  Tests shrink these to milliseconds.
#[derive(Clone, Debug)]
pub struct RideConfig {
    /// Sleep between ticks while running (and while idle).
    pub cadence: Duration,
    /// Longer sleep after the out-of-zone warning.
    pub out_of_zone_cadence: Duration,
    /// Seconds of simulated movement per tick.
    pub tick_interval_secs: u32,
}

impl Default for RideConfig {
    fn default() -> Self {
        Self {
            cadence: Duration::from_secs(5),
            out_of_zone_cadence: Duration::from_secs(10),
            tick_interval_secs: 15,
        }
    }
}

// ── Driver ────────────────────────────────────────────────────────────────────

/// Where the foreground state machine stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// Rented but not moving yet.
    Idle,
    /// The ticker is advancing the scooter.
    Running,
    /// Ticking suspended by `stop` (or by an out-of-zone force-stop).
    Stopped,
    /// `charge`/`return` ran; the session is closed.
    Ended,
}

/// Drives one rental from menu commands.
///
/// Constructing the driver spawns the ticker thread; it idles until `start`.
pub struct RideDriver<D: Directory + 'static> {
    directory: Arc<D>,
    session: Arc<Mutex<RentalSession>>,
    running: Arc<AtomicBool>,
    terminate: Arc<AtomicBool>,
    state: DriverState,
    ticker: Option<JoinHandle<()>>,
    decision_rng: VehicleRng,
}

impl<D: Directory + 'static> RideDriver<D> {
    /// Wrap an admitted session and spawn the background ticker.
    pub fn new(directory: Arc<D>, session: RentalSession, config: RideConfig, seed: u64) -> Self {
        let vehicle = session.vehicle().id;
        let session = Arc::new(Mutex::new(session));
        let running = Arc::new(AtomicBool::new(false));
        let terminate = Arc::new(AtomicBool::new(false));

        let ticker = {
            let directory = Arc::clone(&directory);
            let session = Arc::clone(&session);
            let running = Arc::clone(&running);
            let terminate = Arc::clone(&terminate);
            thread::spawn(move || {
                let mut rng = VehicleRng::new(seed, vehicle);
                loop {
                    if terminate.load(Ordering::SeqCst) {
                        break;
                    }
                    let mut pause = config.cadence;
                    if running.load(Ordering::SeqCst) {
                        let Ok(mut session) = session.lock() else { break };
                        if !session.in_zone() {
                            warn!(
                                "scooter {} is outside of the city zone; ticking suspended, \
                                 session stopped",
                                vehicle.0
                            );
                            running.store(false, Ordering::SeqCst);
                            pause = config.out_of_zone_cadence;
                        } else {
                            match session.tick(config.tick_interval_secs, &mut rng) {
                                Ok(()) => {
                                    if let Err(e) = directory.push_vehicle(session.vehicle()) {
                                        warn!(
                                            "scooter {}: position update failed: {e}",
                                            vehicle.0
                                        );
                                    }
                                }
                                Err(e) => warn!("scooter {}: tick refused: {e}", vehicle.0),
                            }
                        }
                    }
                    thread::sleep(pause);
                }
            })
        };

        Self {
            directory,
            session,
            running,
            terminate,
            state: DriverState::Idle,
            ticker: Some(ticker),
            decision_rng: VehicleRng::new(seed ^ RETURN_ROLL_SALT, vehicle),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// `true` while the background ticker is actually moving the scooter.
    pub fn is_ticking(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Shared handle to the session (read-mostly; used by demo epilogues).
    pub fn session(&self) -> Arc<Mutex<RentalSession>> {
        Arc::clone(&self.session)
    }

    // ── Dispatch ──────────────────────────────────────────────────────────

    /// Execute one command and return the message to show the renter.
    pub fn dispatch(&mut self, command: Command) -> SimResult<String> {
        self.reconcile();

        if self.state == DriverState::Ended && command != Command::Info {
            return Ok("the rental has already ended".into());
        }

        match command {
            Command::Start => self.start(),
            Command::Stop => Ok(self.stop()),
            Command::Info => Ok(self.info()),
            Command::Charge => Ok(self.charge()),
            Command::Return => Ok(self.finish()),
        }
    }

    /// Fold a background force-stop into the foreground state machine.
    fn reconcile(&mut self) {
        if self.state == DriverState::Running && !self.running.load(Ordering::SeqCst) {
            self.state = DriverState::Stopped;
        }
    }

    fn start(&mut self) -> SimResult<String> {
        if self.state == DriverState::Running {
            return Ok("scooter is already running".into());
        }
        {
            let session = self.lock_session();
            let vehicle = session.vehicle();
            if vehicle.is_battery_low() {
                return Err(SimError::Session(
                    scoot_vehicle::VehicleError::LowBattery {
                        vehicle: vehicle.id,
                        level: vehicle.battery_percent,
                    }
                    .into(),
                ));
            }
        }
        self.running.store(true, Ordering::SeqCst);
        self.state = DriverState::Running;
        Ok("scooter started".into())
    }

    fn stop(&mut self) -> String {
        if self.state != DriverState::Running {
            return "scooter is not running".into();
        }
        self.running.store(false, Ordering::SeqCst);
        self.state = DriverState::Stopped;
        "scooter stopped".into()
    }

    fn info(&mut self) -> String {
        let session = self.lock_session();
        let mood = match self.state {
            DriverState::Running => "scooter is running",
            DriverState::Ended => "rental has ended",
            DriverState::Idle | DriverState::Stopped => "scooter is in sleep mode",
        };
        format!(
            "{mood}\n{}\nrent time: {}",
            session.vehicle(),
            format_hms(session.elapsed_secs())
        )
    }

    fn charge(&mut self) -> String {
        self.shut_down_ticker();
        self.lock_session().finalize_charged(&*self.directory);
        self.state = DriverState::Ended;
        "scooter charged to 100 % and returned".into()
    }

    fn finish(&mut self) -> String {
        self.shut_down_ticker();
        // Clone the handle so the guard borrows a local, leaving `self` free
        // for the disjoint directory/rng field borrows below.
        let session = Arc::clone(&self.session);
        let outcome = {
            let mut session = session.lock().expect("session mutex poisoned");
            session.finalize(&*self.directory, &mut self.decision_rng)
        };
        self.state = DriverState::Ended;
        format!("scooter returned ({outcome})")
    }

    // ── Shutdown ──────────────────────────────────────────────────────────

    /// Stop the ticker and wait for it to observably exit.  Must complete
    /// before any terminal directory write.
    fn shut_down_ticker(&mut self) {
        self.terminate.store(true, Ordering::SeqCst);
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.ticker.take() {
            if handle.join().is_err() {
                warn!("tick thread panicked before shutdown");
            }
        }
    }

    fn lock_session(&self) -> MutexGuard<'_, RentalSession> {
        self.session.lock().expect("session mutex poisoned")
    }
}

impl<D: Directory + 'static> Drop for RideDriver<D> {
    /// A dropped driver must not leak a spinning ticker.
    fn drop(&mut self) {
        self.shut_down_ticker();
    }
}
