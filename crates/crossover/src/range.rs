//! Valid-data ranges used to reject cruise pairs before a detailed scan.

use cruise_common::{round_epoch, CrossoverError, CrossoverResult, DatasetId};
use serde::{Deserialize, Serialize};

use crate::config::CrossoverConfig;
use crate::track::Track;

/// Inclusive range of the present values in a column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Whether the two ranges overlap after widening both by `slack`.
    pub fn overlaps_within(&self, other: &ValueRange, slack: f64) -> bool {
        !(self.max + slack < other.min || other.max + slack < self.min)
    }

    /// The range end points rounded to whole seconds.
    pub fn rounded_times(&self) -> (i64, i64) {
        (round_epoch(self.min), round_epoch(self.max))
    }
}

/// Minimum and maximum of the present values, or `None` if every value is missing.
pub fn min_max_valid(values: &[Option<f64>]) -> Option<ValueRange> {
    values.iter().flatten().fold(None, |range, &value| {
        Some(match range {
            None => ValueRange {
                min: value,
                max: value,
            },
            Some(r) => ValueRange {
                min: r.min.min(value),
                max: r.max.max(value),
            },
        })
    })
}

/// Time and latitude extent of a cruise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackExtent {
    pub dataset_id: DatasetId,
    pub time: ValueRange,
    pub lat: ValueRange,
}

impl TrackExtent {
    /// Summarize a track. Fails if it has no valid times or no valid latitudes.
    pub fn from_track(track: &Track) -> CrossoverResult<Self> {
        let id = track.dataset_id();
        let time = min_max_valid(track.times())
            .ok_or_else(|| CrossoverError::no_valid_data(id.as_str(), "times"))?;
        let lat = min_max_valid(track.latitudes())
            .ok_or_else(|| CrossoverError::no_valid_data(id.as_str(), "latitudes"))?;
        Ok(Self {
            dataset_id: id.clone(),
            time,
            lat,
        })
    }

    /// Whether any pair of rows could possibly be close enough in both time
    /// and latitude to form a crossover.
    pub fn may_cross(&self, other: &TrackExtent, config: &CrossoverConfig) -> bool {
        self.time
            .overlaps_within(&other.time, config.max_time_diff_secs)
            && self.lat.overlaps_within(&other.lat, config.max_lat_diff_deg)
    }
}
