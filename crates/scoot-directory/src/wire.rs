//! Wire protocol: query documents, response envelopes, and parsing.
//!
//! The service speaks a GraphQL-style protocol over a single endpoint: every
//! call is a JSON POST of `{ "query": <document>, "variables": {...} }` and
//! every response is `{ "data": ..., "errors": [...] }`.  This module owns
//! both directions of the translation, including the integer status and
//! station-kind vocabularies.

use serde::Deserialize;

use scoot_core::{CityZone, GeoPoint, RenterId, RideId, Station, StationId, StationKind,
    VehicleId, VehicleStatus, ZoneId};

use crate::{DirectoryError, DirectoryResult, VehicleSnapshot};

// ── Query / mutation documents ────────────────────────────────────────────────

pub(crate) const GET_SCOOTER: &str = "\
query getScooterById($id: Int!) {
    getScooterById(id: $id) { id latitude longitude speed battery statusId stationId }
}";

pub(crate) const GET_CITY: &str = "\
query getCityData($scooter_id: Int!) {
    getCityData(scooter_id: $scooter_id) { id latitude longitude area }
}";

pub(crate) const GET_STATION: &str = "\
query getStation($city_id: Int!, $kind: Int!) {
    getStation(city_id: $city_id, kind: $kind) { id latitude longitude }
}";

pub(crate) const GET_RENTERS: &str = "\
query getRenters {
    getRenters { id }
}";

pub(crate) const UPDATE_SCOOTER: &str = "\
mutation updateScooter($id: Int!, $latitude: Float!, $longitude: Float!,
                       $speed: Int!, $battery: Float!, $statusId: Int!, $stationId: Int) {
    updateScooter(id: $id, latitude: $latitude, longitude: $longitude,
                  speed: $speed, battery: $battery, statusId: $statusId,
                  stationId: $stationId) { id }
}";

pub(crate) const CREATE_LOG: &str = "\
mutation createLog($scooter_id: Int!, $renter_id: Int!, $start_time: Int!,
                   $start_latitude: Float!, $start_longitude: Float!) {
    createLog(scooter_id: $scooter_id, renter_id: $renter_id, start_time: $start_time,
              start_latitude: $start_latitude, start_longitude: $start_longitude) { id }
}";

pub(crate) const UPDATE_LOG: &str = "\
mutation updateLog($id: Int!, $end_time: Int!, $end_latitude: Float!,
                   $end_longitude: Float!, $station_id: Int) {
    updateLog(id: $id, end_time: $end_time, end_latitude: $end_latitude,
              end_longitude: $end_longitude, station_id: $station_id) { id }
}";

// ── Response envelopes ────────────────────────────────────────────────────────

/// The outer `data`/`errors` shape every response shares.
#[derive(Deserialize)]
pub(crate) struct Envelope<T> {
    pub(crate) data: Option<T>,
    pub(crate) errors: Option<Vec<WireError>>,
}

#[derive(Deserialize)]
pub(crate) struct WireError {
    pub(crate) message: String,
}

#[derive(Deserialize)]
pub(crate) struct ScooterData {
    #[serde(rename = "getScooterById")]
    pub(crate) scooter: Option<WireScooter>,
}

#[derive(Deserialize)]
pub(crate) struct WireScooter {
    pub(crate) id: u32,
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
    pub(crate) speed: u8,
    pub(crate) battery: f32,
    #[serde(rename = "statusId")]
    pub(crate) status_id: u8,
    #[serde(rename = "stationId")]
    pub(crate) station_id: Option<u32>,
}

#[derive(Deserialize)]
pub(crate) struct CityData {
    #[serde(rename = "getCityData")]
    pub(crate) city: Option<WireCity>,
}

#[derive(Deserialize)]
pub(crate) struct WireCity {
    pub(crate) id: u32,
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
    pub(crate) area: f64,
}

#[derive(Deserialize)]
pub(crate) struct StationData {
    #[serde(rename = "getStation")]
    pub(crate) station: Option<WireStation>,
}

#[derive(Deserialize)]
pub(crate) struct WireStation {
    pub(crate) id: u32,
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
}

#[derive(Deserialize)]
pub(crate) struct RentersData {
    #[serde(rename = "getRenters")]
    pub(crate) renters: Option<Vec<WireRenter>>,
}

#[derive(Deserialize)]
pub(crate) struct WireRenter {
    pub(crate) id: u32,
}

#[derive(Deserialize)]
pub(crate) struct CreateLogData {
    #[serde(rename = "createLog")]
    pub(crate) log: Option<WireLogRef>,
}

#[derive(Deserialize)]
pub(crate) struct WireLogRef {
    pub(crate) id: u64,
}

/// Mutations we only need to acknowledge; the payload is ignored.
#[derive(Deserialize)]
pub(crate) struct Ack {}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Unwrap the envelope: GraphQL errors win over data, missing data is
/// `NotFound`.
fn unwrap_envelope<T>(envelope: Envelope<T>) -> DirectoryResult<T> {
    if let Some(errors) = envelope.errors {
        let joined = errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(DirectoryError::Api(joined));
    }
    envelope.data.ok_or(DirectoryError::NotFound)
}

pub(crate) fn parse_vehicle(envelope: Envelope<ScooterData>) -> DirectoryResult<VehicleSnapshot> {
    let wire = unwrap_envelope(envelope)?
        .scooter
        .ok_or(DirectoryError::NotFound)?;
    Ok(VehicleSnapshot {
        id: VehicleId(wire.id),
        position: GeoPoint::new(wire.latitude, wire.longitude),
        speed_kph: wire.speed,
        battery_percent: wire.battery,
        status: VehicleStatus::from_code(wire.status_id)?,
        station: wire.station_id.map(StationId),
    })
}

pub(crate) fn parse_zone(envelope: Envelope<CityData>) -> DirectoryResult<CityZone> {
    let wire = unwrap_envelope(envelope)?.city.ok_or(DirectoryError::NotFound)?;
    let zone = CityZone::new(
        ZoneId(wire.id),
        wire.area,
        GeoPoint::new(wire.latitude, wire.longitude),
    )?;
    Ok(zone)
}

pub(crate) fn parse_station(
    envelope: Envelope<StationData>,
    kind: StationKind,
) -> DirectoryResult<Station> {
    let wire = unwrap_envelope(envelope)?
        .station
        .ok_or(DirectoryError::NotFound)?;
    Ok(Station {
        id: StationId(wire.id),
        kind,
        position: GeoPoint::new(wire.latitude, wire.longitude),
    })
}

pub(crate) fn parse_renters(envelope: Envelope<RentersData>) -> DirectoryResult<Vec<RenterId>> {
    let wire = unwrap_envelope(envelope)?
        .renters
        .ok_or(DirectoryError::NotFound)?;
    Ok(wire.into_iter().map(|r| RenterId(r.id)).collect())
}

pub(crate) fn parse_ride_ref(envelope: Envelope<CreateLogData>) -> DirectoryResult<RideId> {
    let wire = unwrap_envelope(envelope)?.log.ok_or(DirectoryError::NotFound)?;
    Ok(RideId(wire.id))
}

/// Acknowledge an update-style mutation: surface API errors, accept any data.
pub(crate) fn parse_ack(envelope: Envelope<Ack>) -> DirectoryResult<()> {
    unwrap_envelope(envelope).map(|_| ())
}
