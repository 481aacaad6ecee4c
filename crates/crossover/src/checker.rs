//! Batch driver: one-vs-one, one-vs-many, and fleet-wide crossover checks.

use std::time::{Duration, Instant};

use cruise_common::{Crossover, CrossoverError, CrossoverResult, DatasetId};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::cancel::CancelToken;
use crate::candidates::ExtentIndex;
use crate::config::CrossoverConfig;
use crate::loader::TrackLoader;
use crate::progress::{NoProgress, ProgressEvent, ProgressObserver};
use crate::range::min_max_valid;
use crate::search::find_crossover;
use crate::track::Track;

static NO_PROGRESS: NoProgress = NoProgress;

/// Progress and cancellation settings for a batch run.
#[derive(Clone)]
pub struct BatchOptions<'a> {
    pub progress: &'a dyn ProgressObserver,
    pub cancel: CancelToken,
    /// Reference point for the elapsed times given to `progress`.
    pub started: Instant,
}

impl Default for BatchOptions<'static> {
    fn default() -> Self {
        Self {
            progress: &NO_PROGRESS,
            cancel: CancelToken::new(),
            started: Instant::now(),
        }
    }
}

impl<'a> BatchOptions<'a> {
    pub fn new(progress: &'a dyn ProgressObserver, cancel: CancelToken) -> Self {
        Self {
            progress,
            cancel,
            started: Instant::now(),
        }
    }

    fn report(&self, event: ProgressEvent<'_>) {
        self.progress.on_event(self.started.elapsed(), event);
    }
}

/// Checks cruises for high-quality crossovers using tracks from a [`TrackLoader`].
///
/// Crossovers are only reported between cruises from different platforms.
pub struct CrossoverChecker<L> {
    loader: L,
    config: CrossoverConfig,
}

impl<L: TrackLoader> CrossoverChecker<L> {
    pub fn new(loader: L, config: CrossoverConfig) -> Self {
        Self { loader, config }
    }

    pub fn config(&self) -> &CrossoverConfig {
        &self.config
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Check a single pair of cruises.
    ///
    /// Reads both cruises and skips the detailed search when their time or
    /// latitude ranges cannot produce a crossover. A crossover returned here
    /// carries the overall time range of both cruises.
    pub fn check_pair(&self, dataset_ids: &[&str]) -> CrossoverResult<Option<Crossover>> {
        let [first, second] = dataset_ids else {
            return Err(CrossoverError::invalid_input(format!(
                "expected two dataset IDs, got {}",
                dataset_ids.len()
            )));
        };
        let ids = [DatasetId::parse(first)?, DatasetId::parse(second)?];

        if ids[0].same_platform(&ids[1], self.config.platform_prefix_len) {
            debug!(first = %ids[0], second = %ids[1], "Same platform; no crossover possible");
            return Ok(None);
        }

        let tracks = [
            self.loader.load_track(&ids[0])?,
            self.loader.load_track(&ids[1])?,
        ];

        let time_ranges = [
            min_max_valid(tracks[0].times())
                .ok_or_else(|| CrossoverError::no_valid_data(ids[0].as_str(), "times"))?,
            min_max_valid(tracks[1].times())
                .ok_or_else(|| CrossoverError::no_valid_data(ids[1].as_str(), "times"))?,
        ];
        if !time_ranges[0].overlaps_within(&time_ranges[1], self.config.max_time_diff_secs) {
            debug!(first = %ids[0], second = %ids[1], "No overlap in time");
            return Ok(None);
        }

        let lat_ranges = [
            min_max_valid(tracks[0].latitudes())
                .ok_or_else(|| CrossoverError::no_valid_data(ids[0].as_str(), "latitudes"))?,
            min_max_valid(tracks[1].latitudes())
                .ok_or_else(|| CrossoverError::no_valid_data(ids[1].as_str(), "latitudes"))?,
        ];
        if !lat_ranges[0].overlaps_within(&lat_ranges[1], self.config.max_lat_diff_deg) {
            debug!(first = %ids[0], second = %ids[1], "No overlap in latitude");
            return Ok(None);
        }

        let (min0, max0) = time_ranges[0].rounded_times();
        let (min1, max1) = time_ranges[1].rounded_times();
        Ok(find_crossover(&tracks[0], &tracks[1], &self.config)
            .map(|c| c.with_dataset_times([min0, min1], [max0, max1])))
    }

    /// Check one cruise against many others, in order.
    ///
    /// The candidates are expected to already be restricted to cruises whose
    /// time and latitude ranges could overlap the primary cruise; no range
    /// check is made here. Same-platform candidates are skipped. The first
    /// error aborts the batch.
    pub fn crossovers_for<I, S>(
        &self,
        primary: &str,
        candidates: I,
        options: &BatchOptions<'_>,
    ) -> CrossoverResult<Vec<Crossover>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let primary_id = DatasetId::parse(primary)?;
        options.report(ProgressEvent::Loading {
            dataset_id: &primary_id,
        });
        let primary_track = self.loader.load_track(&primary_id)?;

        let mut found = Vec::new();
        for candidate in candidates {
            options.cancel.check()?;
            let other_id = DatasetId::parse(candidate.as_ref())?;
            if let Some(crossover) = self.compare_with(&primary_track, &other_id, options)? {
                found.push(crossover);
            }
        }

        Ok(found)
    }

    /// Same as [`CrossoverChecker::crossovers_for`], with candidates loaded
    /// and searched on the current rayon pool.
    ///
    /// Results keep the candidate order. Run inside
    /// `ThreadPool::install` to bound the number of workers.
    pub fn crossovers_for_parallel<S>(
        &self,
        primary: &str,
        candidates: &[S],
        options: &BatchOptions<'_>,
    ) -> CrossoverResult<Vec<Crossover>>
    where
        S: AsRef<str> + Sync,
    {
        let primary_id = DatasetId::parse(primary)?;
        options.report(ProgressEvent::Loading {
            dataset_id: &primary_id,
        });
        let primary_track = self.loader.load_track(&primary_id)?;

        let results = candidates
            .par_iter()
            .map(|candidate| {
                options.cancel.check()?;
                let other_id = DatasetId::parse(candidate.as_ref())?;
                self.compare_with(&primary_track, &other_id, options)
            })
            .collect::<CrossoverResult<Vec<_>>>()?;

        Ok(results.into_iter().flatten().collect())
    }

    /// Check every cruise in `index` against the cruises that sort before it.
    ///
    /// Each unordered pair is examined once. Crossovers carry the overall time
    /// range of both cruises, taken from the index.
    pub fn fleet_crossovers(
        &self,
        index: &ExtentIndex,
        parallel: bool,
        options: &BatchOptions<'_>,
    ) -> CrossoverResult<Vec<Crossover>> {
        let mut all = Vec::new();

        for primary in index.dataset_ids() {
            options.cancel.check()?;
            let candidates = index.candidates_for(primary, &self.config);
            if candidates.is_empty() {
                continue;
            }
            info!(
                primary = %primary,
                candidates = candidates.len(),
                "Checking cruise for crossovers"
            );

            let names: Vec<&str> = candidates.iter().map(DatasetId::as_str).collect();
            let found = if parallel {
                self.crossovers_for_parallel(primary.as_str(), &names, options)?
            } else {
                self.crossovers_for(primary.as_str(), &names, options)?
            };

            all.extend(found.into_iter().map(|c| index.attach_time_ranges(c)));
        }

        Ok(all)
    }

    fn compare_with(
        &self,
        primary: &Track,
        other_id: &DatasetId,
        options: &BatchOptions<'_>,
    ) -> CrossoverResult<Option<Crossover>> {
        let primary_id = primary.dataset_id();
        if primary_id.same_platform(other_id, self.config.platform_prefix_len) {
            return Ok(None);
        }

        options.report(ProgressEvent::Loading {
            dataset_id: other_id,
        });
        let other = self.loader.load_track(other_id)?;

        options.report(ProgressEvent::Examining {
            primary: primary_id,
            other: other_id,
        });
        let check_start = Instant::now();
        let crossover = find_crossover(primary, &other, &self.config);
        let check_time = check_start.elapsed();
        warn_if_slow(primary_id, other_id, check_time);

        match &crossover {
            Some(found) => options.report(ProgressEvent::Found {
                crossover: found,
                check_time,
            }),
            None => options.report(ProgressEvent::NotFound {
                primary: primary_id,
                other: other_id,
                check_time,
            }),
        }

        Ok(crossover)
    }
}

fn warn_if_slow(primary: &DatasetId, other: &DatasetId, check_time: Duration) {
    if check_time > Duration::from_secs(60) {
        warn!(
            primary = %primary,
            other = %other,
            secs = check_time.as_secs(),
            "Slow crossover search"
        );
    }
}
