//! Circular city zone derived from a city's area figure.

use crate::{CoreError, CoreResult, GeoPoint, ZoneId};

/// The geographic area a rented scooter must stay inside.
///
/// The directory stores a city as a centre point plus an area in km²; the
/// zone is the circle of equivalent area.  A `CityZone` is snapshotted when a
/// rental starts and stays immutable for the session's lifetime.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CityZone {
    pub id: ZoneId,
    pub area_km2: f64,
    pub center: GeoPoint,
}

impl CityZone {
    /// Build a zone, rejecting non-positive areas.
    pub fn new(id: ZoneId, area_km2: f64, center: GeoPoint) -> CoreResult<Self> {
        if !(area_km2 > 0.0) {
            return Err(CoreError::InvalidZoneArea(area_km2));
        }
        Ok(Self { id, area_km2, center })
    }

    /// Circle-equivalent radius: `sqrt(area / π)`.
    #[inline]
    pub fn radius_km(&self) -> f64 {
        (self.area_km2 / std::f64::consts::PI).sqrt()
    }

    /// `true` iff `p` lies within the zone circle (geodesic distance from
    /// the centre is at most the radius).
    #[inline]
    pub fn contains(&self, p: GeoPoint) -> bool {
        self.center.distance_km(p) <= self.radius_km()
    }
}
