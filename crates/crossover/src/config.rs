//! Thresholds and physical constants for crossover detection.

use cruise_common::{CrossoverError, CrossoverResult, DEFAULT_PLATFORM_PREFIX_LEN};
use serde::{Deserialize, Serialize};

const SECONDS_PER_DAY: f64 = 24.0 * 60.0 * 60.0;

/// Configuration for crossover detection.
///
/// `max_time_diff_secs` and `max_lat_diff_deg` follow from the distance limit:
/// a pair further apart than either can never have a location-time distance
/// under `max_crossover_dist_km`. Use [`CrossoverConfig::derived`] to keep
/// them consistent when changing the other values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossoverConfig {
    /// Radius of a spherical Earth with the same surface area, in kilometers.
    pub earth_authalic_radius_km: f64,

    /// "Distance" in kilometers contributed by every 24 hours of time difference.
    pub seawater_speed_km_per_day: f64,

    /// Maximum location-time distance, in kilometers, still considered a crossover.
    pub max_crossover_dist_km: f64,

    /// Maximum difference in recomputed fCO2 (uatm).
    pub max_fco2_diff: f64,

    /// Maximum difference in sea surface temperature (deg C).
    pub max_temp_diff: f64,

    /// Maximum difference in sample time, in seconds.
    pub max_time_diff_secs: f64,

    /// Maximum difference in latitude, in decimal degrees.
    pub max_lat_diff_deg: f64,

    /// Number of leading dataset ID characters naming the platform.
    pub platform_prefix_len: usize,
}

impl Default for CrossoverConfig {
    fn default() -> Self {
        Self::derived(6371.007, 30.0, 80.0, 5.0, 0.3)
    }
}

impl CrossoverConfig {
    /// Build a configuration, computing the time and latitude limits from the
    /// distance limit.
    pub fn derived(
        earth_authalic_radius_km: f64,
        seawater_speed_km_per_day: f64,
        max_crossover_dist_km: f64,
        max_fco2_diff: f64,
        max_temp_diff: f64,
    ) -> Self {
        Self {
            earth_authalic_radius_km,
            seawater_speed_km_per_day,
            max_crossover_dist_km,
            max_fco2_diff,
            max_temp_diff,
            max_time_diff_secs: (SECONDS_PER_DAY * max_crossover_dist_km
                / seawater_speed_km_per_day)
                .ceil(),
            max_lat_diff_deg: (max_crossover_dist_km / earth_authalic_radius_km).to_degrees(),
            platform_prefix_len: DEFAULT_PLATFORM_PREFIX_LEN,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// The time and latitude limits are recomputed from the other values
    /// unless given explicitly.
    pub fn from_env() -> Self {
        let base = Self::default();

        let radius = env_f64("CROSSOVER_EARTH_RADIUS_KM").unwrap_or(base.earth_authalic_radius_km);
        let speed =
            env_f64("CROSSOVER_SEAWATER_SPEED_KM_PER_DAY").unwrap_or(base.seawater_speed_km_per_day);
        let max_dist = env_f64("CROSSOVER_MAX_DIST_KM").unwrap_or(base.max_crossover_dist_km);
        let fco2 = env_f64("CROSSOVER_MAX_FCO2_DIFF").unwrap_or(base.max_fco2_diff);
        let temp = env_f64("CROSSOVER_MAX_TEMP_DIFF").unwrap_or(base.max_temp_diff);

        let mut config = Self::derived(radius, speed, max_dist, fco2, temp);

        if let Some(secs) = env_f64("CROSSOVER_MAX_TIME_DIFF_SECS") {
            config.max_time_diff_secs = secs;
        }

        if let Some(deg) = env_f64("CROSSOVER_MAX_LAT_DIFF_DEG") {
            config.max_lat_diff_deg = deg;
        }

        if let Ok(val) = std::env::var("CROSSOVER_PLATFORM_PREFIX_LEN") {
            if let Ok(len) = val.parse() {
                config.platform_prefix_len = len;
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> CrossoverResult<()> {
        let positive = [
            ("earth_authalic_radius_km", self.earth_authalic_radius_km),
            ("seawater_speed_km_per_day", self.seawater_speed_km_per_day),
            ("max_crossover_dist_km", self.max_crossover_dist_km),
            ("max_time_diff_secs", self.max_time_diff_secs),
            ("max_lat_diff_deg", self.max_lat_diff_deg),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(CrossoverError::InvalidConfig(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        for (name, value) in [
            ("max_fco2_diff", self.max_fco2_diff),
            ("max_temp_diff", self.max_temp_diff),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CrossoverError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if self.platform_prefix_len == 0 {
            return Err(CrossoverError::InvalidConfig(
                "platform_prefix_len must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn env_f64(name: &str) -> Option<f64> {
    std::env::var(name).ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_derived_limits() {
        let config = CrossoverConfig::default();
        // 80 km at 30 km/day is 2.666 days
        assert_eq!(config.max_time_diff_secs, 230_400.0);
        assert!((config.max_lat_diff_deg - 0.71944).abs() < 1.0e-4);
        assert_eq!(config.platform_prefix_len, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_derived_recomputes_limits() {
        let config = CrossoverConfig::derived(6371.007, 10.0, 20.0, 5.0, 0.3);
        assert_eq!(config.max_time_diff_secs, 172_800.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = CrossoverConfig::default();
        config.max_crossover_dist_km = 0.0;
        assert!(config.validate().is_err());

        let mut config = CrossoverConfig::default();
        config.max_fco2_diff = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = CrossoverConfig::default();
        config.platform_prefix_len = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: CrossoverConfig = serde_yaml::from_str("max_fco2_diff: 2.5\n").unwrap();
        assert_eq!(config.max_fco2_diff, 2.5);
        assert_eq!(config.max_crossover_dist_km, 80.0);
    }
}
