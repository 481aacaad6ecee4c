//! Per-cruise sample arrays.

use cruise_common::{CrossoverError, CrossoverResult, DatasetId};

use crate::tolerance::to_optional;

/// One fully-populated row of a track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Longitude in decimal degrees east.
    pub lon: f64,
    /// Latitude in decimal degrees north.
    pub lat: f64,
    /// Seconds since 1970-01-01T00:00:00Z.
    pub time: f64,
    /// Sea surface temperature in deg C.
    pub sst: f64,
    /// Recomputed fCO2 in uatm.
    pub fco2: f64,
}

/// The underway measurements of one cruise as five parallel columns.
///
/// Rows keep the order of the source data. A `None` marks a missing value,
/// and a row with any missing value is never matched.
#[derive(Debug, Clone)]
pub struct Track {
    dataset_id: DatasetId,
    longitudes: Vec<Option<f64>>,
    latitudes: Vec<Option<f64>>,
    times: Vec<Option<f64>>,
    ssts: Vec<Option<f64>>,
    fco2s: Vec<Option<f64>>,
    time_ordered: bool,
}

impl Track {
    /// Create a track from its five columns, which must all have the same length.
    pub fn new(
        dataset_id: DatasetId,
        longitudes: Vec<Option<f64>>,
        latitudes: Vec<Option<f64>>,
        times: Vec<Option<f64>>,
        ssts: Vec<Option<f64>>,
        fco2s: Vec<Option<f64>>,
    ) -> CrossoverResult<Self> {
        let num_rows = longitudes.len();
        for (name, len) in [
            ("latitudes", latitudes.len()),
            ("times", times.len()),
            ("ssts", ssts.len()),
            ("fco2s", fco2s.len()),
        ] {
            if len != num_rows {
                return Err(CrossoverError::invalid_input(format!(
                    "sizes of longitudes ({num_rows}) and {name} ({len}) arrays do not match for {dataset_id}"
                )));
            }
        }

        let time_ordered = is_non_decreasing(&times);

        Ok(Self {
            dataset_id,
            longitudes,
            latitudes,
            times,
            ssts,
            fco2s,
            time_ordered,
        })
    }

    /// Create a track from raw file values, where NaN, infinities, and the
    /// sentinel denote missing data.
    pub fn from_raw(
        dataset_id: DatasetId,
        longitudes: &[f64],
        latitudes: &[f64],
        times: &[f64],
        ssts: &[f64],
        fco2s: &[f64],
    ) -> CrossoverResult<Self> {
        let convert = |values: &[f64]| values.iter().copied().map(to_optional).collect();
        Self::new(
            dataset_id,
            convert(longitudes),
            convert(latitudes),
            convert(times),
            convert(ssts),
            convert(fco2s),
        )
    }

    /// Create a track where every value is present.
    pub fn from_samples(dataset_id: DatasetId, samples: &[Sample]) -> Self {
        let times: Vec<Option<f64>> = samples.iter().map(|s| Some(s.time)).collect();
        let time_ordered = is_non_decreasing(&times);
        Self {
            dataset_id,
            longitudes: samples.iter().map(|s| Some(s.lon)).collect(),
            latitudes: samples.iter().map(|s| Some(s.lat)).collect(),
            times,
            ssts: samples.iter().map(|s| Some(s.sst)).collect(),
            fco2s: samples.iter().map(|s| Some(s.fco2)).collect(),
            time_ordered,
        }
    }

    pub fn dataset_id(&self) -> &DatasetId {
        &self.dataset_id
    }

    pub fn len(&self) -> usize {
        self.longitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.longitudes.is_empty()
    }

    pub fn longitudes(&self) -> &[Option<f64>] {
        &self.longitudes
    }

    pub fn latitudes(&self) -> &[Option<f64>] {
        &self.latitudes
    }

    pub fn times(&self) -> &[Option<f64>] {
        &self.times
    }

    pub fn ssts(&self) -> &[Option<f64>] {
        &self.ssts
    }

    pub fn fco2s(&self) -> &[Option<f64>] {
        &self.fco2s
    }

    /// Whether the present sample times never decrease from row to row.
    ///
    /// The pruned search relies on this; unordered tracks are searched
    /// exhaustively instead.
    pub fn is_time_ordered(&self) -> bool {
        self.time_ordered
    }

    /// The row at `index` if it exists and none of its values are missing.
    #[inline]
    pub fn row(&self, index: usize) -> Option<Sample> {
        Some(Sample {
            lon: (*self.longitudes.get(index)?)?,
            lat: self.latitudes[index]?,
            time: self.times[index]?,
            sst: self.ssts[index]?,
            fco2: self.fco2s[index]?,
        })
    }

    /// All usable rows with their 0-based index.
    pub fn usable_rows(&self) -> impl Iterator<Item = (usize, Sample)> + '_ {
        (0..self.len()).filter_map(move |i| self.row(i).map(|s| (i, s)))
    }

    /// Consume the track, returning the ID.
    pub fn into_dataset_id(self) -> DatasetId {
        self.dataset_id
    }
}

fn is_non_decreasing(values: &[Option<f64>]) -> bool {
    let mut previous = f64::NEG_INFINITY;
    for value in values.iter().flatten() {
        if *value < previous {
            return false;
        }
        previous = *value;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tolerance::FP_MISSING_VALUE;

    fn id() -> DatasetId {
        DatasetId::parse("33RO20030604").unwrap()
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let err = Track::new(
            id(),
            vec![Some(0.0); 3],
            vec![Some(0.0); 3],
            vec![Some(0.0); 2],
            vec![Some(0.0); 3],
            vec![Some(0.0); 3],
        )
        .unwrap_err();
        assert!(err.is_input_error());
        assert!(err.to_string().contains("times"));
    }

    #[test]
    fn test_row_requires_all_fields() {
        let track = Track::from_raw(
            id(),
            &[-70.0, -70.1],
            &[40.0, 40.1],
            &[0.0, 60.0],
            &[15.0, FP_MISSING_VALUE],
            &[380.0, 381.0],
        )
        .unwrap();
        assert!(track.row(0).is_some());
        assert!(track.row(1).is_none());
        assert!(track.row(2).is_none());
        assert_eq!(track.usable_rows().count(), 1);
    }

    #[test]
    fn test_time_order_ignores_missing_times() {
        let track = Track::from_raw(
            id(),
            &[0.0; 3],
            &[0.0; 3],
            &[10.0, f64::NAN, 20.0],
            &[0.0; 3],
            &[0.0; 3],
        )
        .unwrap();
        assert!(track.is_time_ordered());

        let track = Track::from_raw(
            id(),
            &[0.0; 3],
            &[0.0; 3],
            &[10.0, 30.0, 20.0],
            &[0.0; 3],
            &[0.0; 3],
        )
        .unwrap();
        assert!(!track.is_time_ordered());
    }
}
