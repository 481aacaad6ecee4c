//! Candidate selection for fleet-wide crossover runs.
//!
//! Reading the full data of every cruise pair is far too slow for thousands
//! of cruises, so each cruise is first summarized by its time and latitude
//! extent, and only pairs whose extents could produce a crossover are
//! searched.

use std::collections::BTreeMap;

use cruise_common::{Crossover, CrossoverError, DatasetId};
use tracing::{info, warn};

use crate::config::CrossoverConfig;
use crate::loader::TrackLoader;
use crate::progress::ProgressEvent;
use crate::range::TrackExtent;
use crate::checker::BatchOptions;

/// Time and latitude extents of a set of cruises, ordered by dataset ID.
#[derive(Debug, Default, Clone)]
pub struct ExtentIndex {
    extents: BTreeMap<DatasetId, TrackExtent>,
}

impl ExtentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the extent of every cruise in `dataset_ids`.
    ///
    /// Cruises that cannot be read or have no valid times or latitudes are
    /// logged and left out; they are returned alongside the index.
    pub fn build<L, I>(
        loader: &L,
        dataset_ids: I,
        options: &BatchOptions<'_>,
    ) -> (Self, Vec<(DatasetId, CrossoverError)>)
    where
        L: TrackLoader + ?Sized,
        I: IntoIterator<Item = DatasetId>,
    {
        let mut index = Self::new();
        let mut failures = Vec::new();

        for dataset_id in dataset_ids {
            if options.cancel.is_cancelled() {
                break;
            }
            options
                .progress
                .on_event(options.started.elapsed(), ProgressEvent::Loading {
                    dataset_id: &dataset_id,
                });
            match loader.load_extent(&dataset_id) {
                Ok(extent) => index.insert(extent),
                Err(err) => {
                    warn!(dataset = %dataset_id, error = %err, kind = err.kind(), "Skipping cruise");
                    failures.push((dataset_id, err));
                }
            }
        }

        info!(
            cruises = index.len(),
            skipped = failures.len(),
            "Built cruise extent index"
        );
        (index, failures)
    }

    pub fn insert(&mut self, extent: TrackExtent) {
        self.extents.insert(extent.dataset_id.clone(), extent);
    }

    pub fn len(&self) -> usize {
        self.extents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    pub fn get(&self, dataset_id: &DatasetId) -> Option<&TrackExtent> {
        self.extents.get(dataset_id)
    }

    /// All indexed IDs in sorted order.
    pub fn dataset_ids(&self) -> impl Iterator<Item = &DatasetId> + '_ {
        self.extents.keys()
    }

    /// Cruises to search against `primary`.
    ///
    /// Only cruises sorting before `primary` are returned so that each
    /// unordered pair is considered once. Cruises from the same platform, and
    /// cruises whose time or latitude extent is too far away, are left out.
    pub fn candidates_for(&self, primary: &DatasetId, config: &CrossoverConfig) -> Vec<DatasetId> {
        let Some(first) = self.extents.get(primary) else {
            return Vec::new();
        };

        self.extents
            .range(..primary.clone())
            .filter(|(id, _)| !primary.same_platform(id, config.platform_prefix_len))
            .filter(|(_, extent)| first.may_cross(extent, config))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Fill in the overall time range of both cruises of a crossover from the index.
    ///
    /// The crossover is returned unchanged if either cruise is not indexed.
    pub fn attach_time_ranges(&self, crossover: Crossover) -> Crossover {
        let lookup = |name: &str| {
            DatasetId::parse(name)
                .ok()
                .and_then(|id| self.extents.get(&id))
                .map(|extent| extent.time.rounded_times())
        };
        match (
            lookup(&crossover.dataset_ids[0]),
            lookup(&crossover.dataset_ids[1]),
        ) {
            (Some((min0, max0)), Some((min1, max1))) => {
                crossover.with_dataset_times([min0, min1], [max0, max1])
            }
            _ => crossover,
        }
    }
}

impl FromIterator<TrackExtent> for ExtentIndex {
    fn from_iter<I: IntoIterator<Item = TrackExtent>>(iter: I) -> Self {
        let mut index = Self::new();
        for extent in iter {
            index.insert(extent);
        }
        index
    }
}
