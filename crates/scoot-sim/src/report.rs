//! CSV ride report: one row per finished session.

use std::fs::File;
use std::path::Path;

use scoot_core::{RenterId, VehicleId};
use scoot_vehicle::ReturnOutcome;

use crate::{FleetObserver, SimResult};

/// A [`FleetObserver`] that appends a row to `rides.csv` for every session
/// that reaches a terminal status.
///
/// Write errors are held rather than panicking the run; the first one is
/// surfaced by [`finish`][Self::finish].
pub struct CsvRideReport {
    writer: csv::Writer<File>,
    error: Option<csv::Error>,
}

impl CsvRideReport {
    /// Create `path` (truncating) and write the header row.
    pub fn create(path: &Path) -> SimResult<Self> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record([
            "vehicle_id",
            "renter_id",
            "outcome",
            "station_id",
            "elapsed_secs",
            "battery_percent",
        ])?;
        Ok(Self { writer, error: None })
    }

    /// Flush and return the first write error, if any occurred mid-run.
    pub fn finish(mut self) -> SimResult<()> {
        self.writer.flush().map_err(csv::Error::from)?;
        match self.error.take() {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    fn record(&mut self, row: [String; 6]) {
        if self.error.is_some() {
            return; // keep only the first failure
        }
        if let Err(e) = self.writer.write_record(&row) {
            self.error = Some(e);
        }
    }
}

impl FleetObserver for CsvRideReport {
    fn on_session_end(
        &mut self,
        vehicle: VehicleId,
        renter: RenterId,
        outcome: &ReturnOutcome,
        elapsed_secs: u64,
        battery_percent: f32,
    ) {
        let station = outcome
            .station()
            .map(|s| s.0.to_string())
            .unwrap_or_default();
        self.record([
            vehicle.0.to_string(),
            renter.0.to_string(),
            outcome.as_str().to_string(),
            station,
            elapsed_secs.to_string(),
            format!("{battery_percent:.1}"),
        ]);
    }
}
