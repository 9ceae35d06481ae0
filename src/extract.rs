//! Table Extractors
//!
//!     Given physical parameters, an extractor names the dataset file that holds them, loads
//!     it through [`read_source`], and slices the reduced table down to the rows those
//!     parameters select. Natraj has no extractor: its nested map is already keyed by the
//!     physical parameters.
//!
//!     Arguments are checked against the dataset's reference axes before any file is opened,
//!     so a bad angle is a `ValueNotFound`, never an I/O error.

pub mod egap;
pub mod sos;

use crate::error::{Allowed, Error, Result};
use std::fs;
use std::path::Path;

/// Read a whole dataset file into memory.
pub fn read_source(path: &Path) -> Result<String> {
    log::debug!("reading {}", path.display());
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Fail with `ValueNotFound` unless `value` is allowed for `parameter`.
pub(crate) fn require(parameter: &'static str, value: f64, allowed: Allowed) -> Result<()> {
    if allowed.contains(value) {
        Ok(())
    } else {
        Err(Error::ValueNotFound {
            parameter,
            value,
            allowed,
        })
    }
}
