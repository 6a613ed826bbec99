/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatLon(f64, f64);

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        LatLon(lat, lon)
    }

    pub fn lat(self) -> f64 {
        self.0
    }

    pub fn lon(self) -> f64 {
        self.1
    }

    pub fn distance_km(self, other: LatLon) -> f64 {
        haversine_distance_km(self.0, self.1, other.0, other.1)
    }
}

/// Great-circle distance between two points given in decimal degrees.
///
/// Inputs are not range checked, so out of range degrees still yield a
/// number.
pub fn haversine_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
