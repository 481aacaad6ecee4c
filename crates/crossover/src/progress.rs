//! Progress reporting for batch crossover runs.
//!
//! The search itself has no side effects; the batch driver reports what it is
//! doing through a [`ProgressObserver`] passed in by the caller.

use std::time::Duration;

use cruise_common::{Crossover, DatasetId};
use tracing::info;

/// A step of a batch run.
#[derive(Debug, Clone, Copy)]
pub enum ProgressEvent<'a> {
    /// About to read the data of a cruise.
    Loading { dataset_id: &'a DatasetId },
    /// About to search a pair of cruises.
    Examining {
        primary: &'a DatasetId,
        other: &'a DatasetId,
    },
    /// A pair search produced a crossover.
    Found {
        crossover: &'a Crossover,
        check_time: Duration,
    },
    /// A pair search found nothing.
    NotFound {
        primary: &'a DatasetId,
        other: &'a DatasetId,
        check_time: Duration,
    },
}

/// Receives progress events along with the time elapsed since the batch started.
pub trait ProgressObserver: Send + Sync {
    fn on_event(&self, elapsed: Duration, event: ProgressEvent<'_>);
}

impl<F> ProgressObserver for F
where
    F: Fn(Duration, ProgressEvent<'_>) + Send + Sync,
{
    fn on_event(&self, elapsed: Duration, event: ProgressEvent<'_>) {
        self(elapsed, event)
    }
}

/// Discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_event(&self, _elapsed: Duration, _event: ProgressEvent<'_>) {}
}

/// Logs every event at INFO level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressObserver for TracingProgress {
    fn on_event(&self, elapsed: Duration, event: ProgressEvent<'_>) {
        let elapsed_min = format!("{:.2}m", elapsed.as_secs_f64() / 60.0);
        match event {
            ProgressEvent::Loading { dataset_id } => {
                info!(elapsed = %elapsed_min, dataset = %dataset_id, "Reading data");
            }
            ProgressEvent::Examining { primary, other } => {
                info!(elapsed = %elapsed_min, primary = %primary, other = %other, "Examining pair");
            }
            ProgressEvent::Found {
                crossover,
                check_time,
            } => {
                let check_secs = format!("{:.2}", check_time.as_secs_f64());
                info!(
                    elapsed = %elapsed_min,
                    check_secs = %check_secs,
                    crossover = %crossover,
                    "Crossover found"
                );
            }
            ProgressEvent::NotFound {
                primary,
                other,
                check_time,
            } => {
                let check_secs = format!("{:.2}", check_time.as_secs_f64());
                info!(
                    elapsed = %elapsed_min,
                    check_secs = %check_secs,
                    primary = %primary,
                    other = %other,
                    "No crossover"
                );
            }
        }
    }
}
