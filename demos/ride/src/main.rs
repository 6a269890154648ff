//! ride: rent one scooter interactively.
//!
//! Reads a scooter id, rents it from the directory service, then drives the
//! rental from a small menu while a background thread ticks the scooter
//! every few seconds.  Point `SCOOT_DIRECTORY_URL` at the directory
//! endpoint (default `http://localhost:1337/api/v1/`).

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use log::warn;

use scoot_core::{unix_now_secs, RenterId, VehicleId};
use scoot_directory::{Directory, HttpDirectory};
use scoot_session::{RentalSession, SessionError};
use scoot_sim::{Command, DriverState, RideConfig, RideDriver, SimError};

const DEFAULT_ENDPOINT: &str = "http://localhost:1337/api/v1/";

fn prompt(out: &str) -> Result<String> {
    print!("{out}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn main() -> Result<()> {
    env_logger::init();

    println!("************ Welcome to the scooter program **************\n");

    let endpoint = std::env::var("SCOOT_DIRECTORY_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.into());
    let directory = Arc::new(HttpDirectory::new(&endpoint).context("building directory client")?);

    // Pick the renter account: first registered renter, or a fallback.
    let renter = match directory.fetch_all_renters() {
        Ok(renters) if !renters.is_empty() => renters[0],
        Ok(_) => RenterId(1),
        Err(e) => {
            warn!("renter lookup failed, falling back to renter 1: {e}");
            RenterId(1)
        }
    };

    // The one fatal input error: a non-numeric scooter id ends the attempt.
    let session = loop {
        let raw = prompt("Enter scooter id: ")?;
        let Ok(id) = raw.parse::<u32>() else {
            bail!("scooter id must be a number");
        };

        match RentalSession::admit(&*directory, VehicleId(id), renter) {
            Ok(session) => break session,
            Err(SessionError::VehicleNotAvailable { .. }) => {
                println!("\n* Scooter {id} is not available.\n");
            }
            Err(e) => println!("\n* Scooter {id} cannot be rented: {e}\n"),
        }
    };

    let mut driver = RideDriver::new(
        directory,
        session,
        RideConfig::default(),
        unix_now_secs() as u64,
    );

    while driver.state() != DriverState::Ended {
        println!("\n{}", Command::MENU);
        let choice = prompt("What do you want to do: ")?;

        let command = match Command::parse(&choice) {
            Ok(c) => c,
            Err(SimError::InvalidSelection(_)) => {
                println!("\nInvalid choice!");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        match driver.dispatch(command) {
            Ok(message) => println!("\n{message}"),
            Err(e) => println!("\n* {e}"),
        }
    }

    println!("\nThanks for riding.");
    Ok(())
}
