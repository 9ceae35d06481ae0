//! Reference axes of the three benchmark datasets
//!
//! Order matters wherever a table is indexed by position: SOS sections appear in the order
//! of [`SOS_PHOTON_ZENITHS`], and inside a section rows run over [`SOS_AZIMUTHS`] then
//! [`SOS_SENSOR_ZENITHS`].

/// SOS wavelengths (nm), one dataset file each.
pub const SOS_WAVELENGTHS: [f64; 4] = [350.0, 450.0, 550.0, 650.0];

/// SOS photon zenith angles (degrees) in file order.
pub const SOS_PHOTON_ZENITHS: [f64; 2] = [60.0, 30.0];

/// SOS sensor zenith angles (degrees), `0..=60` in steps of 5.
pub const SOS_SENSOR_ZENITHS: [f64; 13] = [
    0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0, 55.0, 60.0,
];

/// SOS relative azimuths (degrees).
pub const SOS_AZIMUTHS: [f64; 4] = [0.0, 60.0, 180.0, 240.0];

/// Rows in one SOS `mu_section`: every sensor zenith for every azimuth.
pub const SOS_SECTION_ROWS: usize = SOS_SENSOR_ZENITHS.len() * SOS_AZIMUTHS.len();

/// Photon cosine written in an SOS section header, paired with its zenith angle.
pub const SOS_PHOTON_COSINES: [(f64, f64); 2] = [(-0.5, 60.0), (-0.866025, 30.0)];

/// EGAP relative azimuths (degrees). Files only store `[0, 90)`; the rest is mirrored.
pub const EGAP_AZIMUTHS: [f64; 4] = [0.0, 60.0, 180.0, 240.0];

/// Natraj azimuth columns (degrees), in row order.
pub const NATRAJ_AZIMUTHS: [f64; 7] = [0.0, 30.0, 60.0, 90.0, 120.0, 150.0, 180.0];

/// Position of `value` in `axis`, by exact match.
pub fn index_of(axis: &[f64], value: f64) -> Option<usize> {
    axis.iter().position(|candidate| *candidate == value)
}
