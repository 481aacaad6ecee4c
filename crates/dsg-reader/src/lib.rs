//! Reader for cruise data files in discrete sampling geometry (DSG) layout.
//!
//! Each cruise lives in its own NetCDF file at
//! `<root>/<first four characters of the ID>/<ID>.nc`, with one-dimensional
//! `longitude`, `latitude`, `time`, `temp` and `fCO2_recommended` variables
//! along the observation dimension.
//!
//! [`DsgTrackLoader`] implements [`crossover::TrackLoader`] on top of that
//! layout, so the checker can be pointed at a directory tree.

pub mod error;
pub mod reader;

pub use error::{DsgError, DsgResult};
pub use reader::{silence_hdf5_errors, DsgTrackLoader, DSG_FILE_EXTENSION, VARIABLE_NAMES};
