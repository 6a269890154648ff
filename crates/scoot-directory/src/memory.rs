//! In-memory [`Directory`] double for tests and offline demo runs.
//!
//! Behaves like a tiny directory service: fetches read the seeded records,
//! `push_vehicle` overwrites the stored snapshot (and keeps an append-only
//! push log so tests can assert on write ordering), and ride logs are opened
//! and closed with sequential ids.

use std::collections::HashMap;
use std::sync::Mutex;

use scoot_core::{CityZone, GeoPoint, RenterId, RideId, Station, StationId, StationKind,
    VehicleId, ZoneId};
use scoot_vehicle::VehicleState;

use crate::api::Directory;
use crate::{DirectoryError, DirectoryResult, VehicleSnapshot};

/// One ride log row.
#[derive(Clone, Debug, PartialEq)]
pub struct RideRecord {
    pub id: RideId,
    pub renter: RenterId,
    pub vehicle: VehicleId,
    pub start_unix_secs: i64,
    pub start_position: GeoPoint,
    pub end: Option<RideEnd>,
}

/// Closing half of a ride log row.
#[derive(Clone, Debug, PartialEq)]
pub struct RideEnd {
    pub end_unix_secs: i64,
    pub position: GeoPoint,
    pub station: Option<StationId>,
}

#[derive(Default)]
struct Inner {
    vehicles: HashMap<VehicleId, VehicleSnapshot>,
    zones: HashMap<VehicleId, CityZone>,
    stations: HashMap<(ZoneId, StationKind), Station>,
    renters: Vec<RenterId>,
    pushes: Vec<VehicleSnapshot>,
    rides: Vec<RideRecord>,
    next_ride: u64,
}

/// A directory service that lives entirely in this process.
#[derive(Default)]
pub struct MemoryDirectory {
    inner: Mutex<Inner>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("MemoryDirectory lock poisoned")
    }

    // ── Seeding ───────────────────────────────────────────────────────────

    /// Register a scooter and the zone it is reported in.
    pub fn insert_vehicle(&self, snapshot: VehicleSnapshot, zone: CityZone) {
        let mut inner = self.lock();
        inner.zones.insert(snapshot.id, zone);
        inner.vehicles.insert(snapshot.id, snapshot);
    }

    /// Register a station for `(zone, kind)` lookups.
    pub fn insert_station(&self, zone: ZoneId, station: Station) {
        self.lock().stations.insert((zone, station.kind), station);
    }

    pub fn set_renters(&self, renters: Vec<RenterId>) {
        self.lock().renters = renters;
    }

    /// Drop a scooter's record so later fetches report `NotFound`, which
    /// lets tests simulate a record vanishing mid-run.
    pub fn remove_vehicle(&self, vehicle: VehicleId) {
        self.lock().vehicles.remove(&vehicle);
    }

    // ── Inspection ────────────────────────────────────────────────────────

    /// The stored record for `vehicle`, if any.
    pub fn vehicle(&self, vehicle: VehicleId) -> Option<VehicleSnapshot> {
        self.lock().vehicles.get(&vehicle).cloned()
    }

    /// Every state pushed via `push_vehicle`, oldest first.
    pub fn pushes(&self) -> Vec<VehicleSnapshot> {
        self.lock().pushes.clone()
    }

    /// Every ride log row, in open order.
    pub fn rides(&self) -> Vec<RideRecord> {
        self.lock().rides.clone()
    }
}

impl Directory for MemoryDirectory {
    fn fetch_vehicle(&self, vehicle: VehicleId) -> DirectoryResult<VehicleSnapshot> {
        self.lock()
            .vehicles
            .get(&vehicle)
            .cloned()
            .ok_or(DirectoryError::NotFound)
    }

    fn fetch_zone(&self, vehicle: VehicleId) -> DirectoryResult<CityZone> {
        self.lock()
            .zones
            .get(&vehicle)
            .cloned()
            .ok_or(DirectoryError::NotFound)
    }

    fn fetch_station(&self, zone: ZoneId, kind: StationKind) -> DirectoryResult<Station> {
        self.lock()
            .stations
            .get(&(zone, kind))
            .copied()
            .ok_or(DirectoryError::NotFound)
    }

    fn fetch_all_renters(&self) -> DirectoryResult<Vec<RenterId>> {
        Ok(self.lock().renters.clone())
    }

    fn push_vehicle(&self, vehicle: &VehicleState) -> DirectoryResult<()> {
        let snapshot = VehicleSnapshot::from(vehicle);
        let mut inner = self.lock();
        inner.vehicles.insert(snapshot.id, snapshot.clone());
        inner.pushes.push(snapshot);
        Ok(())
    }

    fn open_ride(
        &self,
        renter: RenterId,
        vehicle: VehicleId,
        position: GeoPoint,
        start_unix_secs: i64,
    ) -> DirectoryResult<RideId> {
        let mut inner = self.lock();
        inner.next_ride += 1;
        let id = RideId(inner.next_ride);
        inner.rides.push(RideRecord {
            id,
            renter,
            vehicle,
            start_unix_secs,
            start_position: position,
            end: None,
        });
        Ok(id)
    }

    fn close_ride(
        &self,
        ride: RideId,
        end_unix_secs: i64,
        position: GeoPoint,
        station: Option<StationId>,
    ) -> DirectoryResult<()> {
        let mut inner = self.lock();
        let row = inner
            .rides
            .iter_mut()
            .find(|r| r.id == ride)
            .ok_or(DirectoryError::NotFound)?;
        row.end = Some(RideEnd {
            end_unix_secs,
            position,
            station,
        });
        Ok(())
    }
}
