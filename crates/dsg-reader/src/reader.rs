//! Native NetCDF reading of DSG cruise files.

use std::path::{Path, PathBuf};
use std::sync::Once;

use crossover::tolerance::to_optional;
use crossover::{TrackExtent, TrackLoader, ValueRange};
use cruise_common::{CrossoverError, CrossoverResult, DatasetId};
use tracing::debug;

use crate::error::{DsgError, DsgResult};

/// Extension of DSG files.
pub const DSG_FILE_EXTENSION: &str = "nc";

/// Names of the longitude, latitude, time, SST, and fCO2 variables.
pub const VARIABLE_NAMES: [&str; 5] = ["longitude", "latitude", "time", "temp", "fCO2_recommended"];

const PLATFORM_DIR_LEN: usize = 4;

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints diagnostics even when an error is handled on
/// the Rust side, for example when probing for an optional `_FillValue`.
/// Only needs to be called once per process but is safe to call repeatedly.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and null handlers are a
        // documented way to turn off automatic error printing.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Loads cruise tracks from a tree of DSG files.
#[derive(Debug, Clone)]
pub struct DsgTrackLoader {
    root: PathBuf,
}

impl DsgTrackLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        silence_hdf5_errors();
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the DSG file for a dataset.
    pub fn dsg_file_path(&self, dataset_id: &DatasetId) -> PathBuf {
        let id = dataset_id.as_str();
        self.root
            .join(&id[..PLATFORM_DIR_LEN])
            .join(format!("{id}.{DSG_FILE_EXTENSION}"))
    }

    fn open(&self, dataset_id: &DatasetId) -> DsgResult<netcdf::File> {
        let path = self.dsg_file_path(dataset_id);
        if !path.is_file() {
            return Err(DsgError::NotFound(path.display().to_string()));
        }
        debug!(dataset = %dataset_id, path = %path.display(), "Opening DSG file");
        netcdf::open(&path).map_err(|e| {
            DsgError::InvalidFormat(format!("Failed to open {}: {}", path.display(), e))
        })
    }

    /// Read the five data columns as raw values.
    pub fn read_columns(&self, dataset_id: &DatasetId) -> DsgResult<[Vec<f64>; 5]> {
        let file = self.open(dataset_id)?;
        let mut columns: [Vec<f64>; 5] = Default::default();
        for (column, name) in columns.iter_mut().zip(VARIABLE_NAMES) {
            *column = read_variable(&file, name)?;
        }
        Ok(columns)
    }
}

impl TrackLoader for DsgTrackLoader {
    fn load_track(&self, dataset_id: &DatasetId) -> CrossoverResult<crossover::Track> {
        let [lons, lats, times, ssts, fco2s] = self.read_columns(dataset_id)?;
        debug!(dataset = %dataset_id, rows = lons.len(), "Read cruise track");
        crossover::Track::from_raw(dataset_id.clone(), &lons, &lats, &times, &ssts, &fco2s)
    }

    /// Reads only the time and latitude variables.
    fn load_extent(&self, dataset_id: &DatasetId) -> CrossoverResult<TrackExtent> {
        let file = self.open(dataset_id)?;
        let times = read_variable(&file, VARIABLE_NAMES[2])?;
        let lats = read_variable(&file, VARIABLE_NAMES[1])?;

        let time = valid_range(&times)
            .ok_or_else(|| CrossoverError::no_valid_data(dataset_id.as_str(), "times"))?;
        let lat = valid_range(&lats)
            .ok_or_else(|| CrossoverError::no_valid_data(dataset_id.as_str(), "latitudes"))?;
        Ok(TrackExtent {
            dataset_id: dataset_id.clone(),
            time,
            lat,
        })
    }
}

fn valid_range(values: &[f64]) -> Option<ValueRange> {
    let present: Vec<Option<f64>> = values.iter().copied().map(to_optional).collect();
    crossover::min_max_valid(&present)
}

/// Read a whole variable as f64, replacing its `_FillValue` with NaN.
fn read_variable(file: &netcdf::File, name: &str) -> DsgResult<Vec<f64>> {
    let var = file
        .variable(name)
        .ok_or_else(|| DsgError::MissingData(format!("{name} variable")))?;
    let mut values: Vec<f64> = var
        .get_values(..)
        .map_err(|e| DsgError::InvalidFormat(format!("Failed to read {name}: {e}")))?;

    if let Some(fill) = get_f64_attr(&var, "_FillValue") {
        for value in values.iter_mut().filter(|v| **v == fill) {
            *value = f64::NAN;
        }
    }
    Ok(values)
}

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

fn get_f64_attr(var: &netcdf::Variable, name: &str) -> Option<f64> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    f64::try_from(attr_value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dsg_file_path() {
        let loader = DsgTrackLoader::new("/data/dsg");
        let id = DatasetId::parse("33ro20030604").unwrap();
        assert_eq!(
            loader.dsg_file_path(&id),
            PathBuf::from("/data/dsg/33RO/33RO20030604.nc")
        );
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let loader = DsgTrackLoader::new(dir.path());
        let id = DatasetId::parse("49P120030601").unwrap();
        let err = loader.load_track(&id).unwrap_err();
        assert!(matches!(err, CrossoverError::DatasetNotFound(_)));
    }
}
