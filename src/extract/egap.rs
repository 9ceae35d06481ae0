//! EGAP extractor.
//!
//! Files only store azimuths below 90 degrees; `phi` and `phi - 180` share a file and sit on
//! opposite halves of its rows. The midpoint row belongs to both halves.

use super::{read_source, require};
use crate::axes::EGAP_AZIMUTHS;
use crate::error::{Allowed, Result};
use crate::reduce;
use crate::table::Table;
use std::path::{Path, PathBuf};

pub const PHI: Allowed = Allowed::Set(&EGAP_AZIMUTHS);
pub const THETA_SUN: Allowed = Allowed::Range { min: 0.0, max: 90.0 };
pub const WAVELENGTH: Allowed = Allowed::Range {
    min: 0.0,
    max: 9999.0,
};

/// Azimuth as written in the file name: `[90, 360)` folds back by 180 degrees.
fn stored_phi(phi: f64) -> f64 {
    if phi < 90.0 {
        phi
    } else {
        phi - 180.0
    }
}

/// `<dir>/<name>/RAW_DATA_<name>_TOA_sun<NNN>_phi<NNN>_<WWWW>x`
pub fn data_path(
    dir: &Path,
    name: &str,
    theta_sun: f64,
    phi: f64,
    wavelength: f64,
) -> Result<PathBuf> {
    require("theta_sun", theta_sun, THETA_SUN)?;
    require("phi", phi, PHI)?;
    require("wavelength", wavelength, WAVELENGTH)?;

    let file = format!(
        "RAW_DATA_{}_TOA_sun{:03}_phi{:03}_{:04}x",
        name,
        theta_sun as i64,
        stored_phi(phi) as i64,
        wavelength as i64
    );
    Ok(dir.join(name).join(file))
}

/// Rows of `table` that belong to `phi`.
///
/// Below 90 degrees this is rows `[0, n/2]` in reverse order, otherwise rows `[n/2, n)`.
pub fn select(table: &Table, phi: f64) -> Result<Table> {
    require("phi", phi, PHI)?;
    let n_rows = table.n_rows();
    let middle = n_rows / 2;
    if phi < 90.0 {
        Ok(table.slice_rows(0..(middle + 1).min(n_rows)).reversed())
    } else {
        Ok(table.slice_rows(middle..n_rows))
    }
}

/// Load the file for `(name, theta_sun, phi, wavelength)` under `dir` and select `phi`'s half.
pub fn get_data(
    dir: &Path,
    name: &str,
    theta_sun: f64,
    phi: f64,
    wavelength: f64,
) -> Result<Table> {
    let path = data_path(dir, name, theta_sun, phi, wavelength)?;
    let table = reduce::egap::parse(&read_source(&path)?)?;
    let selected = select(&table, phi)?;
    log::debug!(
        "egap: {} rows of {} selected for phi={}",
        selected.n_rows(),
        table.n_rows(),
        phi
    );
    Ok(selected)
}
