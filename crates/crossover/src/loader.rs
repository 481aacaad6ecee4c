//! Source of cruise tracks.

use std::collections::HashMap;
use std::sync::Arc;

use cruise_common::{CrossoverError, CrossoverResult, DatasetId};

use crate::range::TrackExtent;
use crate::track::Track;

/// Loads the longitude, latitude, time, SST, and fCO2 columns of a cruise.
///
/// Implementations report an unknown or unreadable cruise as an error; the
/// batch driver passes such errors through unchanged.
pub trait TrackLoader: Send + Sync {
    fn load_track(&self, dataset_id: &DatasetId) -> CrossoverResult<Track>;

    /// Time and latitude extent of a cruise. Override when the source can
    /// produce it without reading every column.
    fn load_extent(&self, dataset_id: &DatasetId) -> CrossoverResult<TrackExtent> {
        TrackExtent::from_track(&self.load_track(dataset_id)?)
    }
}

impl<T: TrackLoader + ?Sized> TrackLoader for &T {
    fn load_track(&self, dataset_id: &DatasetId) -> CrossoverResult<Track> {
        (**self).load_track(dataset_id)
    }

    fn load_extent(&self, dataset_id: &DatasetId) -> CrossoverResult<TrackExtent> {
        (**self).load_extent(dataset_id)
    }
}

impl<T: TrackLoader + ?Sized> TrackLoader for Arc<T> {
    fn load_track(&self, dataset_id: &DatasetId) -> CrossoverResult<Track> {
        (**self).load_track(dataset_id)
    }

    fn load_extent(&self, dataset_id: &DatasetId) -> CrossoverResult<TrackExtent> {
        (**self).load_extent(dataset_id)
    }
}

/// Tracks held in memory, keyed by dataset ID.
#[derive(Debug, Default, Clone)]
pub struct InMemoryLoader {
    tracks: HashMap<DatasetId, Track>,
}

impl InMemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a track, replacing any earlier track with the same ID.
    pub fn insert(&mut self, track: Track) {
        self.tracks.insert(track.dataset_id().clone(), track);
    }

    pub fn with_track(mut self, track: Track) -> Self {
        self.insert(track);
        self
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// IDs of every stored track, sorted.
    pub fn dataset_ids(&self) -> Vec<DatasetId> {
        let mut ids: Vec<_> = self.tracks.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl FromIterator<Track> for InMemoryLoader {
    fn from_iter<I: IntoIterator<Item = Track>>(iter: I) -> Self {
        let mut loader = Self::new();
        for track in iter {
            loader.insert(track);
        }
        loader
    }
}

impl TrackLoader for InMemoryLoader {
    fn load_track(&self, dataset_id: &DatasetId) -> CrossoverResult<Track> {
        self.tracks
            .get(dataset_id)
            .cloned()
            .ok_or_else(|| CrossoverError::DatasetNotFound(dataset_id.to_string()))
    }
}
