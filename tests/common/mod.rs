//! Fixture renderers shared by the integration tests.
//!
//! Each renderer writes a benchmark file in the textual layout its parser expects, so tests
//! can check reduced values against the numbers that went in.

#![allow(dead_code)]

use rt_tables::axes::{SOS_AZIMUTHS, SOS_PHOTON_ZENITHS, SOS_SENSOR_ZENITHS};
use rt_tables::reduce::sos::photon_cosine;
use std::fmt::Write;

/// Fortran-style literal: shortest round-trip significand, `marker`, signed two-digit exponent.
pub fn exponent_literal(value: f64, marker: char) -> String {
    let formatted = format!("{:E}", value);
    let (significand, exponent) = formatted
        .split_once('E')
        .expect("LowerExp output always has an exponent");
    let exponent: i32 = exponent.parse().expect("exponent is an integer");
    format!("{}{}{:+03}", significand, marker, exponent)
}

/// An EGAP file: the `25` marker, then one row per entry, padded with four filler columns.
pub fn egap_file(rows: &[[f64; 4]]) -> String {
    let mut out = String::from("25\n");
    for row in rows {
        for value in row {
            write!(out, " {}", exponent_literal(*value, 'D')).unwrap();
        }
        out.push_str("  0.0  0.0  0.0  0.0\n");
    }
    out
}

/// EGAP rows whose `R_I` column is the row index, for checking which rows an extractor kept.
pub fn egap_marked_rows(count: usize) -> Vec<[f64; 4]> {
    (0..count)
        .map(|index| [index as f64 - 30.0, index as f64, 0.5, -0.25])
        .collect()
}

/// One SOS `mu_section` for `theta_photon`; `value(row)` gives the `(R_I, R_Q, R_U)` of each row.
pub fn sos_section(theta_photon: f64, value: impl Fn(usize) -> [f64; 3]) -> String {
    let cosine = photon_cosine(theta_photon).expect("known photon zenith");
    let mut out = format!(
        "SOLAR MU0= {}\nDOWNWELLING IRRADIANCE= 1.0E+00 UPWELLING IRRADIANCE= 2.5E-01\n\
         THETA PHI I Q U V\n",
        cosine
    );
    let mut row = 0;
    for phi in SOS_AZIMUTHS {
        for theta in SOS_SENSOR_ZENITHS {
            let [i, q, u] = value(row);
            writeln!(
                out,
                "{:.1} {:.1} {} {} {} 0.0",
                theta,
                phi,
                exponent_literal(i, 'E'),
                exponent_literal(q, 'E'),
                exponent_literal(u, 'E')
            )
            .unwrap();
            row += 1;
        }
    }
    out
}

/// A complete SOS file: one detector, one section per photon zenith in file order.
/// `R_I` of every row is its global row index.
pub fn sos_file() -> String {
    let mut out = String::from("DETECTOR 1\n");
    for (section, theta_photon) in SOS_PHOTON_ZENITHS.into_iter().enumerate() {
        out.push_str(&sos_section(theta_photon, |row| {
            [(section * 52 + row) as f64, 0.01, -0.002]
        }));
    }
    out
}

/// Natraj row: `mu0, mu` and the seven azimuth values.
pub type NatrajRow = (f64, f64, [f64; 7]);

/// One Natraj optical-depth block holding one chunk per `(albedo, rows)` entry.
pub fn natraj_block(tau: f64, chunks: &[(f64, Vec<NatrajRow>)]) -> String {
    let rule = "~~~~~~~~~~~~~~~~~~~~~~~~\n";
    let mut out = String::new();
    out.push_str(rule);
    writeln!(out, "TAU = {}", tau).unwrap();
    out.push_str(rule);
    out.push_str("MU 0 MU PHI = 0 PHI = 30 PHI = 60 PHI = 90 PHI = 120 PHI = 150 PHI = 180\n");
    for (albedo, rows) in chunks {
        out.push_str(rule);
        writeln!(out, "ALBEDO = {}", albedo).unwrap();
        out.push_str(rule);
        for (mu0, mu, values) in rows {
            write!(out, "{} {}", mu0, mu).unwrap();
            for value in values {
                write!(out, " {}", value).unwrap();
            }
            out.push('\n');
        }
    }
    out
}

/// Initialize test logging once; `RUST_LOG` selects the level.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
