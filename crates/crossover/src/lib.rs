//! High-quality crossover detection for underway CO2 cruises.
//!
//! A crossover is a coincidental near-overlap in location, time, SST, and
//! fCO2 between measurements made by two different platforms. Crossovers are
//! used to cross-validate independent measurements.
//!
//! # Architecture
//!
//! ```text
//! CrossoverChecker (one-vs-one / one-vs-many / fleet)
//!      │
//!      ├─► TrackLoader::load_track(id)       external data source
//!      │
//!      ├─► TrackExtent / ExtentIndex         cheap pair rejection
//!      │
//!      └─► find_crossover(a, b, config)
//!               │
//!               ├─► time pruning (chronological rows)
//!               ├─► SST / fCO2 / latitude gates
//!               └─► location_time_distance_km
//! ```
//!
//! # Example
//!
//! ```ignore
//! use crossover::{CrossoverChecker, CrossoverConfig, InMemoryLoader};
//!
//! let checker = CrossoverChecker::new(loader, CrossoverConfig::default());
//! if let Some(crossover) = checker.check_pair(&["33RO20030604", "49P120030601"])? {
//!     println!("{crossover}");
//! }
//! ```

pub mod cancel;
pub mod candidates;
pub mod checker;
pub mod config;
pub mod loader;
pub mod metric;
pub mod progress;
pub mod range;
pub mod search;
pub mod tolerance;
pub mod track;

// Re-export commonly used types at crate root
pub use cancel::CancelToken;
pub use candidates::ExtentIndex;
pub use checker::{BatchOptions, CrossoverChecker};
pub use config::CrossoverConfig;
pub use cruise_common::{Crossover, CrossoverError, CrossoverResult, DatasetId};
pub use loader::{InMemoryLoader, TrackLoader};
pub use metric::{location_time_distance_km, surface_distance_km};
pub use progress::{NoProgress, ProgressEvent, ProgressObserver, TracingProgress};
pub use range::{min_max_valid, TrackExtent, ValueRange};
pub use search::{find_crossover, find_crossover_exhaustive};
pub use track::{Sample, Track};
