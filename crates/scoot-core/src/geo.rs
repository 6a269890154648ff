//! Geographic coordinate type and spherical-earth utilities.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Zone containment is asserted to
//! meter-level tolerances against known city fixtures, and a fleet holds at
//! most a few thousand points, so the double-precision cost is irrelevant.

/// Mean Earth radius in kilometres (IUGG).
const EARTH_RADIUS_KM: f64 = 6_371.0088;

/// The four bearings a rented scooter may wander along, in degrees.
///
/// Movement is a synthetic random walk restricted to cardinal directions:
/// North 0°, East 90°, South 180°, West 270°.  Callers draw uniformly from
/// this table.
pub const CARDINAL_BEARINGS: [f64; 4] = [0.0, 90.0, 180.0, 270.0];

/// A WGS-84 geographic coordinate in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in kilometres.
    ///
    /// Accuracy is within ~0.5 % of the ellipsoidal distance, well inside
    /// the tolerance of a city-zone radius check.
    pub fn distance_km(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }

    /// The point `distance_km` away from `self` along `bearing_deg`.
    ///
    /// Standard great-circle destination formula; bearing is clockwise from
    /// true north.  Longitude is normalised to `[-180, 180)`.
    pub fn destination(self, distance_km: f64, bearing_deg: f64) -> GeoPoint {
        let delta = distance_km / EARTH_RADIUS_KM; // angular distance
        let theta = bearing_deg.to_radians();

        let lat1 = self.lat.to_radians();
        let lon1 = self.lon.to_radians();

        let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
        let lon2 = lon1
            + (theta.sin() * delta.sin() * lat1.cos())
                .atan2(delta.cos() - lat1.sin() * lat2.sin());

        GeoPoint {
            lat: lat2.to_degrees(),
            lon: (lon2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0,
        }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
