//! SOS extractor.
//!
//! A reduced SOS file is `[photon zenith][azimuth][sensor zenith]` in row-major order, so a
//! `(theta_photon, phi)` pair selects one contiguous run of 13 rows.

use super::{read_source, require};
use crate::axes::{
    index_of, SOS_AZIMUTHS, SOS_PHOTON_ZENITHS, SOS_SENSOR_ZENITHS, SOS_WAVELENGTHS,
};
use crate::error::{Allowed, Error, Result};
use crate::reduce;
use crate::table::Table;
use std::path::{Path, PathBuf};

pub const THETA_PHOTON: Allowed = Allowed::Set(&SOS_PHOTON_ZENITHS);
pub const PHI: Allowed = Allowed::Set(&SOS_AZIMUTHS);
pub const WAVELENGTH: Allowed = Allowed::Set(&SOS_WAVELENGTHS);

/// Leading columns dropped from the window: photon zenith, sensor zenith, azimuth.
const ANGLE_COLUMNS: usize = 3;

/// `<dir>/vSOS_PACE_Bench_AOS_III_W0_<WWW>`
pub fn data_path(dir: &Path, wavelength: f64) -> Result<PathBuf> {
    require("wavelength", wavelength, WAVELENGTH)?;
    Ok(dir.join(format!(
        "vSOS_PACE_Bench_AOS_III_W0_{:03}",
        wavelength as i64
    )))
}

/// First row of the `(theta_photon, phi)` window.
pub fn window_start(theta_photon: f64, phi: f64) -> Result<usize> {
    let photon = index_of(&SOS_PHOTON_ZENITHS, theta_photon).ok_or(Error::ValueNotFound {
        parameter: "theta_photon",
        value: theta_photon,
        allowed: THETA_PHOTON,
    })?;
    let azimuth = index_of(&SOS_AZIMUTHS, phi).ok_or(Error::ValueNotFound {
        parameter: "phi",
        value: phi,
        allowed: PHI,
    })?;
    let sensors = SOS_SENSOR_ZENITHS.len();
    Ok(photon * sensors * SOS_AZIMUTHS.len() + azimuth * sensors)
}

/// The 13 `[R_I, R_Q, R_U]` rows for `(theta_photon, phi)`, one per sensor zenith.
pub fn select(table: &Table, theta_photon: f64, phi: f64) -> Result<Table> {
    let start = window_start(theta_photon, phi)?;
    let end = start + SOS_SENSOR_ZENITHS.len();
    if end > table.n_rows() {
        return Err(Error::SectionShape {
            rule: "window",
            expected: end,
            found: table.n_rows(),
        });
    }
    Ok(table.slice_rows(start..end).columns_from(ANGLE_COLUMNS))
}

/// Load the SOS file for `wavelength` under `dir` and select `(theta_photon, phi)`.
///
/// Takes no dataset `name`: SOS files are addressed by wavelength alone, so the name
/// argument of the EGAP extractor is deliberately not mirrored here.
pub fn get_data(dir: &Path, theta_photon: f64, phi: f64, wavelength: f64) -> Result<Table> {
    window_start(theta_photon, phi)?;
    let path = data_path(dir, wavelength)?;
    let table = reduce::sos::parse(&read_source(&path)?)?;
    let selected = select(&table, theta_photon, phi)?;
    log::debug!(
        "sos: rows for theta_photon={} phi={} selected from {}",
        theta_photon,
        phi,
        path.display()
    );
    Ok(selected)
}
