//! Pairwise crossover search.
//!
//! Every usable row of the first track is compared with every usable row of
//! the second. Pairs are rejected on time, SST, fCO2, and latitude before the
//! location-time distance is computed, and only the closest pair under the
//! distance limit is kept.
//!
//! When the second track is in chronological order the inner loop stops at
//! the first row too far in the future. When both tracks are ordered, rows of
//! the second track too far in the past for the current outer row are also
//! never revisited. A track out of time order is searched exhaustively.

use cruise_common::{round_epoch, Crossover};
use tracing::debug;

use crate::config::CrossoverConfig;
use crate::metric::location_time_distance_km;
use crate::track::{Sample, Track};

/// Closest qualifying point pair found so far.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    distance: f64,
    row_a: usize,
    sample_a: Sample,
    row_b: usize,
    sample_b: Sample,
}

/// Find the closest high-quality crossover between two tracks.
///
/// Returns `None` when no pair of usable rows passes every threshold. The
/// platform of the two tracks is not checked here; see
/// [`crate::checker::CrossoverChecker`].
pub fn find_crossover(a: &Track, b: &Track, config: &CrossoverConfig) -> Option<Crossover> {
    let best = if b.is_time_ordered() {
        scan(a, b, config, a.is_time_ordered())
    } else {
        debug!(
            dataset = %b.dataset_id(),
            "Times not in chronological order; using exhaustive search"
        );
        scan_exhaustive(a, b, config)
    };
    best.map(|c| to_crossover(a, b, c))
}

/// Exhaustive O(N*M) search with the same thresholds and no pruning.
///
/// Gives the same answer as [`find_crossover`] for any row order.
pub fn find_crossover_exhaustive(
    a: &Track,
    b: &Track,
    config: &CrossoverConfig,
) -> Option<Crossover> {
    scan_exhaustive(a, b, config).map(|c| to_crossover(a, b, c))
}

fn scan(a: &Track, b: &Track, config: &CrossoverConfig, skip_past: bool) -> Option<Candidate> {
    let max_time = config.max_time_diff_secs;
    let mut best: Option<Candidate> = None;
    let mut min_distance = config.max_crossover_dist_km;
    let mut start = 0;

    for (j, pa) in a.usable_rows() {
        if skip_past {
            // Outer times never decrease, so rows behind this point stay too old.
            while start < b.len() && b.row(start).map_or(true, |pb| pb.time < pa.time - max_time) {
                start += 1;
            }
        }

        for k in start..b.len() {
            let Some(pb) = b.row(k) else { continue };

            if pb.time > pa.time + max_time {
                // All later rows of the second track are later still.
                break;
            }
            if let Some(candidate) = evaluate(j, &pa, k, &pb, config, min_distance) {
                min_distance = candidate.distance;
                best = Some(candidate);
            }
        }
    }

    best
}

fn scan_exhaustive(a: &Track, b: &Track, config: &CrossoverConfig) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    let mut min_distance = config.max_crossover_dist_km;

    for (j, pa) in a.usable_rows() {
        for (k, pb) in b.usable_rows() {
            if (pb.time - pa.time).abs() > config.max_time_diff_secs {
                continue;
            }
            if let Some(candidate) = evaluate(j, &pa, k, &pb, config, min_distance) {
                min_distance = candidate.distance;
                best = Some(candidate);
            }
        }
    }

    best
}

/// Apply the cheap rejections, then the distance test against the current minimum.
#[inline]
fn evaluate(
    j: usize,
    pa: &Sample,
    k: usize,
    pb: &Sample,
    config: &CrossoverConfig,
    min_distance: f64,
) -> Option<Candidate> {
    if pb.time < pa.time - config.max_time_diff_secs {
        return None;
    }
    if (pb.sst - pa.sst).abs() > config.max_temp_diff {
        return None;
    }
    if (pb.fco2 - pa.fco2).abs() > config.max_fco2_diff {
        return None;
    }
    if (pb.lat - pa.lat).abs() > config.max_lat_diff_deg {
        return None;
    }

    let distance = location_time_distance_km(pa, pb, config);
    if distance < min_distance && distance <= config.max_crossover_dist_km {
        Some(Candidate {
            distance,
            row_a: j,
            sample_a: *pa,
            row_b: k,
            sample_b: *pb,
        })
    } else {
        None
    }
}

fn to_crossover(a: &Track, b: &Track, c: Candidate) -> Crossover {
    Crossover {
        dataset_ids: [a.dataset_id().to_string(), b.dataset_id().to_string()],
        min_distance_km: c.distance,
        row_nums_at_min: [c.row_a + 1, c.row_b + 1],
        lons_at_min: [c.sample_a.lon, c.sample_b.lon],
        lats_at_min: [c.sample_a.lat, c.sample_b.lat],
        times_at_min: [round_epoch(c.sample_a.time), round_epoch(c.sample_b.time)],
        dataset_min_times: None,
        dataset_max_times: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cruise_common::DatasetId;

    fn track(id: &str, samples: &[Sample]) -> Track {
        Track::from_samples(DatasetId::parse(id).unwrap(), samples)
    }

    fn sample(lon: f64, lat: f64, time: f64, sst: f64, fco2: f64) -> Sample {
        Sample {
            lon,
            lat,
            time,
            sst,
            fco2,
        }
    }

    fn loose_config() -> CrossoverConfig {
        let mut config = CrossoverConfig::default();
        config.max_temp_diff = 1.0;
        config.max_fco2_diff = 2.0;
        config.max_lat_diff_deg = 1.0;
        config
    }

    #[test]
    fn test_single_row_crossover() {
        let a = track("AAAA20100101", &[sample(-70.0, 40.0, 1000.0, 15.0, 380.0)]);
        let b = track("BBBB20100101", &[sample(-70.01, 40.01, 1005.0, 15.05, 380.2)]);

        let crossover = find_crossover(&a, &b, &loose_config()).unwrap();
        assert_eq!(crossover.row_nums_at_min, [1, 1]);
        assert!(crossover.min_distance_km > 0.0);
        assert!(crossover.min_distance_km < 2.0);
        assert_eq!(crossover.times_at_min, [1000, 1005]);
        assert_eq!(crossover.lons_at_min, [-70.0, -70.01]);
        assert_eq!(
            crossover.dataset_ids,
            ["AAAA20100101".to_string(), "BBBB20100101".to_string()]
        );
    }

    #[test]
    fn test_fco2_gate() {
        let a = track("AAAA20100101", &[sample(-70.0, 40.0, 1000.0, 15.0, 380.0)]);
        let b = track("BBBB20100101", &[sample(-70.01, 40.01, 1005.0, 15.05, 430.0)]);
        assert!(find_crossover(&a, &b, &loose_config()).is_none());
    }

    #[test]
    fn test_sst_and_latitude_gates() {
        let config = loose_config();
        let a = track("AAAA20100101", &[sample(-70.0, 40.0, 1000.0, 15.0, 380.0)]);

        let warm = track("BBBB20100101", &[sample(-70.0, 40.0, 1000.0, 16.5, 380.0)]);
        assert!(find_crossover(&a, &warm, &config).is_none());

        let north = track("BBBB20100101", &[sample(-70.0, 41.5, 1000.0, 15.0, 380.0)]);
        assert!(find_crossover(&a, &north, &config).is_none());
    }

    #[test]
    fn test_picks_closest_pair() {
        let a = track(
            "AAAA20100101",
            &[
                sample(-70.0, 40.0, 0.0, 15.0, 380.0),
                sample(-70.2, 40.0, 3600.0, 15.0, 380.0),
            ],
        );
        let b = track(
            "BBBB20100101",
            &[
                sample(-70.5, 40.0, 0.0, 15.0, 380.0),
                sample(-70.21, 40.0, 3600.0, 15.0, 380.0),
                sample(-71.0, 40.0, 7200.0, 15.0, 380.0),
            ],
        );
        let crossover = find_crossover(&a, &b, &loose_config()).unwrap();
        assert_eq!(crossover.row_nums_at_min, [2, 2]);
    }

    #[test]
    fn test_time_too_far_apart() {
        let config = loose_config();
        let a = track("AAAA20100101", &[sample(-70.0, 40.0, 0.0, 15.0, 380.0)]);
        let b = track(
            "BBBB20100101",
            &[sample(-70.0, 40.0, config.max_time_diff_secs + 1.0, 15.0, 380.0)],
        );
        assert!(find_crossover(&a, &b, &config).is_none());
        assert!(find_crossover(&b, &a, &config).is_none());
    }

    #[test]
    fn test_distance_limit() {
        // The time difference alone is worth the whole distance limit.
        let config = loose_config();
        let secs = config.max_time_diff_secs;
        let a = track("AAAA20100101", &[sample(-70.0, 40.0, 0.0, 15.0, 380.0)]);
        let b = track("BBBB20100101", &[sample(-70.0, 40.001, secs, 15.0, 380.0)]);
        assert!(find_crossover(&a, &b, &config).is_none());

        let c = track("CCCC20100101", &[sample(-70.0, 40.001, secs - 3600.0, 15.0, 380.0)]);
        let crossover = find_crossover(&a, &c, &config).unwrap();
        assert!(crossover.min_distance_km <= config.max_crossover_dist_km);
    }

    #[test]
    fn test_unordered_track_uses_exhaustive_search() {
        let config = loose_config();
        let a = track("AAAA20100101", &[sample(-70.0, 40.0, 500_000.0, 15.0, 380.0)]);
        // The first row is far in the future of `a`; pruning would stop before row 2.
        let b = track(
            "BBBB20100101",
            &[
                sample(-70.0, 40.0, 1_000_000.0, 15.0, 380.0),
                sample(-70.01, 40.0, 500_100.0, 15.0, 380.0),
            ],
        );
        assert!(!b.is_time_ordered());
        let crossover = find_crossover(&a, &b, &config).unwrap();
        assert_eq!(crossover.row_nums_at_min, [1, 2]);
    }
}
