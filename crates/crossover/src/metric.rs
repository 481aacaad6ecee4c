//! Location-time "distance" between two samples.
//!
//! The surface part is the haversine great-circle distance on a sphere with
//! the Earth's authalic radius. The time part converts the time difference to
//! kilometers using an assumed seawater drift speed. The two are combined as
//! the root of the sum of squares, so the result is in kilometers but is not
//! a true spatial distance.

use crate::config::CrossoverConfig;
use crate::track::Sample;

const SECONDS_PER_DAY: f64 = 24.0 * 60.0 * 60.0;

/// Great-circle distance in kilometers between two (longitude, latitude)
/// points given in decimal degrees.
pub fn surface_distance_km(lon1: f64, lat1: f64, lon2: f64, lat2: f64, radius_km: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1 for antipodal points.
    let c = 2.0 * a.min(1.0).sqrt().asin();

    radius_km * c
}

/// Kilometer equivalent of the time between two samples (seconds since epoch).
pub fn time_distance_km(time1: f64, time2: f64, seawater_speed_km_per_day: f64) -> f64 {
    (time2 - time1) / SECONDS_PER_DAY * seawater_speed_km_per_day
}

/// Combined location-time distance in kilometers.
pub fn location_time_distance_km(p1: &Sample, p2: &Sample, config: &CrossoverConfig) -> f64 {
    let surface = surface_distance_km(
        p1.lon,
        p1.lat,
        p2.lon,
        p2.lat,
        config.earth_authalic_radius_km,
    );
    let time = time_distance_km(p1.time, p2.time, config.seawater_speed_km_per_day);
    (surface * surface + time * time).sqrt()
}
