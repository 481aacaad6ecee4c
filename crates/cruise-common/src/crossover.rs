//! The crossover result entity.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::time::format_epoch;

/// The closest high-quality crossover found between two cruises.
///
/// Index 0 of every pair refers to the first (primary) cruise and index 1 to
/// the second. Row numbers are 1-based rows in the cruise data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Crossover {
    pub dataset_ids: [String; 2],
    /// Location-time "distance" in kilometers at the closest approach.
    pub min_distance_km: f64,
    pub row_nums_at_min: [usize; 2],
    pub lons_at_min: [f64; 2],
    pub lats_at_min: [f64; 2],
    /// Sample times at the closest approach, seconds since 1970-01-01.
    pub times_at_min: [i64; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_min_times: Option<[i64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_max_times: Option<[i64; 2]>,
}

impl Crossover {
    /// True if either side of this crossover is the given dataset.
    pub fn matches_dataset(&self, dataset_id: &str) -> bool {
        self.dataset_ids.iter().any(|id| id == dataset_id)
    }

    /// Attach the overall time range of each cruise.
    pub fn with_dataset_times(mut self, min_times: [i64; 2], max_times: [i64; 2]) -> Self {
        self.dataset_min_times = Some(min_times);
        self.dataset_max_times = Some(max_times);
        self
    }
}

impl fmt::Display for Crossover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} row {} ({:.4}, {:.4}, {}) x {} row {} ({:.4}, {:.4}, {}): {:.2} km",
            self.dataset_ids[0],
            self.row_nums_at_min[0],
            self.lons_at_min[0],
            self.lats_at_min[0],
            format_epoch(self.times_at_min[0]),
            self.dataset_ids[1],
            self.row_nums_at_min[1],
            self.lons_at_min[1],
            self.lats_at_min[1],
            format_epoch(self.times_at_min[1]),
            self.min_distance_km
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Crossover {
        Crossover {
            dataset_ids: ["33RO20030604".to_string(), "49P120030601".to_string()],
            min_distance_km: 12.5,
            row_nums_at_min: [10, 42],
            lons_at_min: [-70.0, -70.1],
            lats_at_min: [40.0, 40.05],
            times_at_min: [1_054_684_800, 1_054_688_400],
            dataset_min_times: None,
            dataset_max_times: None,
        }
    }

    #[test]
    fn test_matches_dataset() {
        let crossover = sample();
        assert!(crossover.matches_dataset("49P120030601"));
        assert!(!crossover.matches_dataset("06AQ20030601"));
    }

    #[test]
    fn test_json_uses_camel_case_and_skips_missing_ranges() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["minDistanceKm"], 12.5);
        assert_eq!(json["rowNumsAtMin"][1], 42);
        assert!(json.get("datasetMinTimes").is_none());

        let with_times = sample().with_dataset_times([1, 2], [3, 4]);
        let json = serde_json::to_value(with_times).unwrap();
        assert_eq!(json["datasetMaxTimes"][0], 3);
    }

    #[test]
    fn test_display() {
        let text = sample().to_string();
        assert!(text.starts_with("33RO20030604 row 10"));
        assert!(text.contains("2003-06-04 01:00:00"));
        assert!(text.ends_with("12.50 km"));
    }
}
