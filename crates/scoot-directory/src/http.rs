//! Blocking HTTP implementation of [`Directory`].

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::json;

use scoot_core::{CityZone, GeoPoint, RenterId, RideId, Station, StationId, StationKind,
    VehicleId, ZoneId};
use scoot_vehicle::VehicleState;

use crate::api::Directory;
use crate::wire::{self, Envelope};
use crate::{DirectoryError, DirectoryResult, VehicleSnapshot};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// Thin blocking client for the directory's single JSON endpoint.
///
/// Cheap to clone; the underlying `reqwest` client pools connections.
#[derive(Debug, Clone)]
pub struct HttpDirectory {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpDirectory {
    /// Create a client for the given endpoint
    /// (e.g. `http://localhost:1337/api/v1/`).
    pub fn new(endpoint: &str) -> DirectoryResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(DirectoryError::Http)?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// POST one query document with its variables and decode the envelope.
    fn call<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> DirectoryResult<Envelope<T>> {
        let body = json!({ "query": query, "variables": variables });
        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .map_err(DirectoryError::Http)?;
        response.json::<Envelope<T>>().map_err(DirectoryError::Json)
    }
}

impl Directory for HttpDirectory {
    fn fetch_vehicle(&self, vehicle: VehicleId) -> DirectoryResult<VehicleSnapshot> {
        let envelope = self.call(wire::GET_SCOOTER, json!({ "id": vehicle.0 }))?;
        wire::parse_vehicle(envelope)
    }

    fn fetch_zone(&self, vehicle: VehicleId) -> DirectoryResult<CityZone> {
        let envelope = self.call(wire::GET_CITY, json!({ "scooter_id": vehicle.0 }))?;
        wire::parse_zone(envelope)
    }

    fn fetch_station(&self, zone: ZoneId, kind: StationKind) -> DirectoryResult<Station> {
        let envelope = self.call(
            wire::GET_STATION,
            json!({ "city_id": zone.0, "kind": kind.code() }),
        )?;
        wire::parse_station(envelope, kind)
    }

    fn fetch_all_renters(&self) -> DirectoryResult<Vec<RenterId>> {
        let envelope = self.call(wire::GET_RENTERS, json!({}))?;
        wire::parse_renters(envelope)
    }

    fn push_vehicle(&self, vehicle: &VehicleState) -> DirectoryResult<()> {
        let envelope = self.call(
            wire::UPDATE_SCOOTER,
            json!({
                "id": vehicle.id.0,
                "latitude": vehicle.position.lat,
                "longitude": vehicle.position.lon,
                "speed": vehicle.speed_kph,
                "battery": vehicle.battery_percent,
                "statusId": vehicle.status.code(),
                "stationId": vehicle.station.map(|s| s.0),
            }),
        )?;
        wire::parse_ack(envelope)
    }

    fn open_ride(
        &self,
        renter: RenterId,
        vehicle: VehicleId,
        position: GeoPoint,
        start_unix_secs: i64,
    ) -> DirectoryResult<RideId> {
        let envelope = self.call(
            wire::CREATE_LOG,
            json!({
                "scooter_id": vehicle.0,
                "renter_id": renter.0,
                "start_time": start_unix_secs,
                "start_latitude": position.lat,
                "start_longitude": position.lon,
            }),
        )?;
        wire::parse_ride_ref(envelope)
    }

    fn close_ride(
        &self,
        ride: RideId,
        end_unix_secs: i64,
        position: GeoPoint,
        station: Option<StationId>,
    ) -> DirectoryResult<()> {
        let envelope = self.call(
            wire::UPDATE_LOG,
            json!({
                "id": ride.0,
                "end_time": end_unix_secs,
                "end_latitude": position.lat,
                "end_longitude": position.lon,
                "station_id": station.map(|s| s.0),
            }),
        )?;
        wire::parse_ack(envelope)
    }
}
