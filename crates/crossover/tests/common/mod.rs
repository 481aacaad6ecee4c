//! Common helpers for crossover integration tests.

#![allow(dead_code)]

use crossover::{
    location_time_distance_km, CrossoverConfig, DatasetId, InMemoryLoader, Track,
};
use test_utils::RawTrack;

/// Build a track from generated raw columns.
pub fn track(id: &str, raw: &RawTrack) -> Track {
    Track::from_raw(
        DatasetId::parse(id).unwrap(),
        &raw.lons,
        &raw.lats,
        &raw.times,
        &raw.ssts,
        &raw.fco2s,
    )
    .unwrap()
}

/// Loader holding the given `(id, track)` pairs.
pub fn loader(tracks: &[(&str, &RawTrack)]) -> InMemoryLoader {
    tracks.iter().map(|(id, raw)| track(id, raw)).collect()
}

/// Thresholds from the single-row example scenario.
pub fn loose_config() -> CrossoverConfig {
    let mut config = CrossoverConfig::default();
    config.max_temp_diff = 1.0;
    config.max_fco2_diff = 2.0;
    config.max_lat_diff_deg = 1.0;
    config
}

/// Smallest qualifying distance over every pair of usable rows, without pruning.
pub fn brute_force_min_distance(a: &Track, b: &Track, config: &CrossoverConfig) -> Option<f64> {
    let mut best: Option<f64> = None;
    for (_, pa) in a.usable_rows() {
        for (_, pb) in b.usable_rows() {
            if (pb.time - pa.time).abs() > config.max_time_diff_secs
                || (pb.sst - pa.sst).abs() > config.max_temp_diff
                || (pb.fco2 - pa.fco2).abs() > config.max_fco2_diff
                || (pb.lat - pa.lat).abs() > config.max_lat_diff_deg
            {
                continue;
            }
            let distance = location_time_distance_km(&pa, &pb, config);
            if distance <= config.max_crossover_dist_km && best.map_or(true, |d| distance < d) {
                best = Some(distance);
            }
        }
    }
    best
}
