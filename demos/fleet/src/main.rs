//! fleet: load-test the directory service with many concurrent rentals.
//!
//! Usage: `fleet [TOTAL] [--memory]`
//!
//! Rents up to TOTAL scooters (default 1000), wanders them around their city
//! zones for the configured window, then returns every one of them.  With
//! `--memory` the run uses a self-contained in-memory directory seeded with
//! a synthetic city, so no service needs to be up.  Otherwise point
//! `SCOOT_DIRECTORY_URL` at the directory endpoint.

use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Context, Result};

use scoot_core::{CityZone, GeoPoint, RenterId, Station, StationId, StationKind, VehicleId,
    VehicleStatus, ZoneId};
use scoot_directory::{Directory, HttpDirectory, MemoryDirectory, VehicleSnapshot};
use scoot_sim::{CsvRideReport, FleetConfig, FleetDriver, FleetObserver};
use scoot_vehicle::ReturnOutcome;

const DEFAULT_ENDPOINT: &str = "http://localhost:1337/api/v1/";
const REPORT_DIR: &str = "output/fleet";

// ── Progress observer (wraps the CSV report) ──────────────────────────────────

struct Progress {
    report: CsvRideReport,
}

impl FleetObserver for Progress {
    fn on_rejected(&mut self, vehicle: VehicleId) {
        println!("* Scooter {} is not available.", vehicle.0);
    }

    fn on_session_end(
        &mut self,
        vehicle: VehicleId,
        renter: RenterId,
        outcome: &ReturnOutcome,
        elapsed_secs: u64,
        battery_percent: f32,
    ) {
        println!("Scooter {} returned ({outcome}).", vehicle.0);
        self.report
            .on_session_end(vehicle, renter, outcome, elapsed_secs, battery_percent);
    }

    fn on_sweep_start(&mut self, active: usize) {
        println!("\nStep 3 - Returning the {active} scooters still out . . . . . . . .");
    }
}

// ── Synthetic city for --memory runs ──────────────────────────────────────────

/// Seed the reference city plus `total` scooters.  Every fifth scooter is
/// already out (Running) so the admission loop has rejections to report, and
/// batteries are spread so some rentals end at the charging station.
fn seed_demo_city(directory: &MemoryDirectory, total: u32) {
    let center = GeoPoint::new(59.19554, 17.62525);
    let zone = CityZone::new(ZoneId(2), 25.84, center).expect("demo zone area is positive");

    directory.insert_station(ZoneId(2), Station {
        id: StationId(1),
        kind: StationKind::Charging,
        position: GeoPoint::new(59.2010, 17.6312),
    });
    directory.insert_station(ZoneId(2), Station {
        id: StationId(2),
        kind: StationKind::Maintenance,
        position: GeoPoint::new(59.1901, 17.6178),
    });

    for id in 1..=total {
        let status = if id % 5 == 0 { VehicleStatus::Running } else { VehicleStatus::Available };
        directory.insert_vehicle(
            VehicleSnapshot {
                id: VehicleId(id),
                position: center,
                speed_kph: 0,
                battery_percent: 21.0 + (id * 7 % 70) as f32,
                status,
                station: None,
            },
            zone.clone(),
        );
    }
}

// ── Run ───────────────────────────────────────────────────────────────────────

fn run_fleet<D: Directory>(directory: D, config: FleetConfig) -> Result<()> {
    std::fs::create_dir_all(REPORT_DIR)?;
    let report_path = Path::new(REPORT_DIR).join("rides.csv");
    let report = CsvRideReport::create(&report_path).context("creating ride report")?;
    let mut observer = Progress { report };

    println!("\nStep 1 - Renting scooters . . . . . . . .");
    println!("Step 2 - Moving scooters . . . . . . . .  ({} s window)\n", config.window.as_secs());

    let t0 = Instant::now();
    let mut driver = FleetDriver::new(directory, config);
    let stats = driver.run(&mut observer);
    let elapsed = t0.elapsed();

    observer.report.finish().context("flushing ride report")?;

    println!("\nSimulation complete in {:.1} s", elapsed.as_secs_f64());
    println!("{:<24} {:>8}", "admitted", stats.admitted);
    println!("{:<24} {:>8}", "rejected", stats.rejected);
    println!("{:<24} {:>8}", "rounds", stats.rounds);
    println!("{:<24} {:>8}", "returned available", stats.available);
    println!("{:<24} {:>8}", "sent to charging", stats.charging);
    println!("{:<24} {:>8}", "sent to maintenance", stats.maintenance);
    println!("{:<24} {:>8}", "left out of zone", stats.out_of_zone);
    println!("\nRide report: {}", report_path.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let use_memory = args.iter().any(|a| a == "--memory");
    let total: u32 = match args.iter().find(|a| !a.starts_with("--")) {
        Some(raw) => match raw.parse() {
            Ok(n) => n,
            Err(_) => bail!("TOTAL must be a number, got {raw:?}"),
        },
        None => 1_000,
    };

    println!("************ Welcome to the scooter fleet simulation **************");
    println!("The simulation takes a few minutes; let it run to completion.");

    let config = FleetConfig { total_vehicles: total, ..FleetConfig::default() };

    if use_memory {
        let directory = MemoryDirectory::new();
        seed_demo_city(&directory, total);
        run_fleet(directory, config)
    } else {
        let endpoint =
            std::env::var("SCOOT_DIRECTORY_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.into());
        let directory = HttpDirectory::new(&endpoint).context("building directory client")?;
        run_fleet(directory, config)
    }
}
