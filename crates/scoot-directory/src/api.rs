//! The `Directory` trait: the seam between the lifecycle core and the
//! remote service.

use scoot_core::{CityZone, GeoPoint, RenterId, RideId, Station, StationId, StationKind,
    VehicleId, ZoneId};
use scoot_vehicle::VehicleState;

use crate::{DirectoryResult, VehicleSnapshot};

/// Remote lookups and mutations for vehicle, city, station, and ride data.
///
/// Implementations must be shareable across the foreground and tick threads
/// (`Send + Sync`); the blocking [`HttpDirectory`][crate::HttpDirectory] and
/// the in-memory test double both qualify.
///
/// Fetches are fatal to the operation that needed them; update-style
/// mutations (`push_vehicle`, `close_ride`) are fire-and-forget from the
/// caller's point of view: the caller logs the error and moves on.
pub trait Directory: Send + Sync {
    /// The scooter's current record, or `NotFound`.
    fn fetch_vehicle(&self, vehicle: VehicleId) -> DirectoryResult<VehicleSnapshot>;

    /// The zone of the city the scooter is registered in.
    fn fetch_zone(&self, vehicle: VehicleId) -> DirectoryResult<CityZone>;

    /// A station of `kind` in zone `zone` (the service picks which).
    fn fetch_station(&self, zone: ZoneId, kind: StationKind) -> DirectoryResult<Station>;

    /// All registered renter accounts, in the service's order.
    fn fetch_all_renters(&self) -> DirectoryResult<Vec<RenterId>>;

    /// Overwrite the scooter's record with `vehicle`'s current state.
    fn push_vehicle(&self, vehicle: &VehicleState) -> DirectoryResult<()>;

    /// Open a ride log at rental start; the returned id closes it later.
    fn open_ride(
        &self,
        renter: RenterId,
        vehicle: VehicleId,
        position: GeoPoint,
        start_unix_secs: i64,
    ) -> DirectoryResult<RideId>;

    /// Close a ride log with the final position and station assignment.
    fn close_ride(
        &self,
        ride: RideId,
        end_unix_secs: i64,
        position: GeoPoint,
        station: Option<StationId>,
    ) -> DirectoryResult<()>;
}
