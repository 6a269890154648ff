//! The batch fleet driver: many concurrent rentals against one directory.

use std::thread;
use std::time::{Duration, Instant};

use log::{info, warn};

use scoot_core::{RenterId, VehicleId, VehicleRng};
use scoot_directory::Directory;
use scoot_session::RentalSession;
use scoot_vehicle::ReturnOutcome;

use crate::FleetObserver;

// ── Configuration ─────────────────────────────────────────────────────────────

/// Knobs for one fleet run.  The defaults reproduce the load-test shape the
/// directory service is sized for: 120 s of wandering, one movement step per
/// visit, a millisecond of breathing room between scooters.
#[derive(Clone, Debug)]
pub struct FleetConfig {
    /// Candidate vehicle ids `1..=total_vehicles` are tried at admission.
    pub total_vehicles: u32,
    /// Wall-clock budget for the wandering phase; the sweep runs after.
    pub window: Duration,
    /// Seconds of simulated movement per tick.
    pub tick_interval_secs: u32,
    /// Delay between per-session iterations, bounding the directory call rate.
    pub per_session_delay: Duration,
    /// Synthetic renter ids are handed out sequentially from here.
    pub first_renter_id: u32,
    /// Master seed for every session's random walk.
    pub seed: u64,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            total_vehicles: 1_000,
            window: Duration::from_secs(120),
            tick_interval_secs: 15,
            per_session_delay: Duration::from_millis(1),
            // Renter accounts below 6 are service-internal; customer #1 is 6.
            first_renter_id: 6,
            seed: 42,
        }
    }
}

// ── Stats ─────────────────────────────────────────────────────────────────────

/// Outcome tally for one fleet run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FleetStats {
    pub admitted: usize,
    pub rejected: usize,
    pub rounds: u64,
    pub out_of_zone: usize,
    pub charging: usize,
    pub maintenance: usize,
    pub available: usize,
}

impl FleetStats {
    fn record(&mut self, outcome: &ReturnOutcome) {
        match outcome {
            ReturnOutcome::LeftOutsideZone => self.out_of_zone += 1,
            ReturnOutcome::SentToCharging(_) => self.charging += 1,
            ReturnOutcome::SentToMaintenance(_) => self.maintenance += 1,
            ReturnOutcome::ReturnedAvailable => self.available += 1,
        }
    }

    /// Sessions that reached a terminal status (equals `admitted` after a
    /// full run).
    pub fn completed(&self) -> usize {
        self.out_of_zone + self.charging + self.maintenance + self.available
    }
}

// ── Driver ────────────────────────────────────────────────────────────────────

/// One active rental plus the RNG stream that drives its random walk.
struct ActiveSession {
    session: RentalSession,
    rng: VehicleRng,
}

/// Advances a pool of rental sessions round by round until the window
/// expires, then sweeps the stragglers home.
///
/// Partial failure never propagates: one session's directory hiccup is
/// logged and the remaining pool keeps moving.
pub struct FleetDriver<D: Directory> {
    directory: D,
    config: FleetConfig,
    active: Vec<ActiveSession>,
    stats: FleetStats,
}

impl<D: Directory> FleetDriver<D> {
    pub fn new(directory: D, config: FleetConfig) -> Self {
        Self {
            directory,
            config,
            active: Vec::new(),
            stats: FleetStats::default(),
        }
    }

    /// Sessions currently in the pool.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Read access to the directory (mainly for demo epilogues).
    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// The full three-phase run: admit, wander until the window closes,
    /// sweep.  Returns the outcome tally.
    pub fn run<O: FleetObserver>(&mut self, observer: &mut O) -> FleetStats {
        self.admit_all(observer);

        let deadline = Instant::now() + self.config.window;
        while Instant::now() < deadline && !self.active.is_empty() {
            self.run_round(observer);
        }

        self.sweep(observer);
        observer.on_fleet_end(self.stats.completed());
        self.stats.clone()
    }

    // ── Phase 1: admission ────────────────────────────────────────────────

    /// Try to rent every candidate id in order.  Rejections are logged and
    /// skipped; the id loop always advances.
    pub fn admit_all<O: FleetObserver>(&mut self, observer: &mut O) {
        let mut renter = self.config.first_renter_id;

        for raw_id in 1..=self.config.total_vehicles {
            let vehicle = VehicleId(raw_id);
            match RentalSession::admit(&self.directory, vehicle, RenterId(renter)) {
                Ok(session) => {
                    observer.on_admitted(vehicle, RenterId(renter));
                    self.active.push(ActiveSession {
                        session,
                        rng: VehicleRng::new(self.config.seed, vehicle),
                    });
                    self.stats.admitted += 1;
                    renter += 1;
                }
                Err(e) => {
                    info!("scooter {raw_id} is not available: {e}");
                    observer.on_rejected(vehicle);
                    self.stats.rejected += 1;
                }
            }
        }
    }

    // ── Phase 2: one round over the pool ──────────────────────────────────

    /// Advance every active session once and drop the ones whose post-tick
    /// state fails the zone or battery check.
    ///
    /// The pool is taken out of `self` and rebuilt from the survivors, so a
    /// removal can never skip the element after it, and a session finalized
    /// this round is never ticked again this round.
    pub fn run_round<O: FleetObserver>(&mut self, observer: &mut O) {
        let pool = std::mem::take(&mut self.active);
        self.stats.rounds += 1;

        #[cfg(not(feature = "parallel"))]
        let verdicts: Vec<(ActiveSession, bool)> = pool
            .into_iter()
            .map(|mut entry| {
                let keep = advance(&self.directory, self.config.tick_interval_secs, &mut entry);
                (entry, keep)
            })
            .collect();

        #[cfg(feature = "parallel")]
        let verdicts: Vec<(ActiveSession, bool)> = {
            use rayon::prelude::*;
            let directory = &self.directory;
            let tick_interval_secs = self.config.tick_interval_secs;
            pool.into_par_iter()
                .map(|mut entry| {
                    let keep = advance(directory, tick_interval_secs, &mut entry);
                    (entry, keep)
                })
                .collect()
        };

        // Apply phase: sequential, in pool order.
        let mut kept = Vec::with_capacity(verdicts.len());
        for (entry, keep) in verdicts {
            if keep {
                kept.push(entry);
            } else {
                self.finish(entry, observer);
            }
            thread::sleep(self.config.per_session_delay);
        }
        self.active = kept;
        observer.on_round_end(self.stats.rounds, self.active.len());
    }

    // ── Phase 3: sweep ────────────────────────────────────────────────────

    /// Force every remaining session through the end-of-rental decision,
    /// regardless of its zone/battery state, and drain the pool.
    pub fn sweep<O: FleetObserver>(&mut self, observer: &mut O) {
        observer.on_sweep_start(self.active.len());
        for entry in std::mem::take(&mut self.active) {
            self.finish(entry, observer);
            thread::sleep(self.config.per_session_delay);
        }
    }

    /// Final tally so far (complete once `run` returns).
    pub fn stats(&self) -> &FleetStats {
        &self.stats
    }

    fn finish<O: FleetObserver>(&mut self, mut entry: ActiveSession, observer: &mut O) {
        let vehicle = entry.session.vehicle().id;
        let renter = entry.session.renter();
        let elapsed = entry.session.elapsed_secs();

        let outcome = entry.session.finalize(&self.directory, &mut entry.rng);
        self.stats.record(&outcome);
        observer.on_session_end(
            vehicle,
            renter,
            &outcome,
            elapsed,
            entry.session.vehicle().battery_percent,
        );
    }
}

/// The read/tick step for one session.  Returns `true` to keep the session
/// in the pool.
///
/// A failed snapshot fetch skips this session's tick (logged, not retried)
/// but keeps it active; only a failed zone or battery check ends it.
fn advance<D: Directory>(directory: &D, tick_interval_secs: u32, entry: &mut ActiveSession) -> bool {
    let id = entry.session.vehicle().id;

    match directory.fetch_vehicle(id) {
        Ok(snapshot) => entry.session.refresh_from(&snapshot),
        Err(e) => {
            warn!("scooter {}: snapshot fetch failed, skipping tick: {e}", id.0);
            return true;
        }
    }

    if let Err(e) = entry.session.tick(tick_interval_secs, &mut entry.rng) {
        warn!("scooter {}: tick refused: {e}", id.0);
        return true;
    }

    if !entry.session.in_zone() {
        info!("scooter {} is outside of the city, returning it", id.0);
        return false;
    }
    if entry.session.vehicle().is_battery_low() {
        info!("scooter {} is low on battery, returning it for charging", id.0);
        return false;
    }

    if let Err(e) = directory.push_vehicle(entry.session.vehicle()) {
        warn!("scooter {}: position update failed: {e}", id.0);
    }
    true
}
