//! Successive-orders-of-scattering layout
//!
//!     ```text
//!     DETECTOR 1
//!     SOLAR MU0= -0.5
//!     DOWNWELLING IRRADIANCE= 1.0E+00 UPWELLING IRRADIANCE= 2.0E-01
//!     THETA PHI I Q U V
//!     0.0 0.0 1.0E-01 2.0E-02 0.0 0.0
//!     ...
//!     ```
//!
//!     Files start at the first `DETECTOR` marker. Each detector holds one `mu_section` per
//!     photon zenith, and each section holds the rows of its `(theta_sensor, phi)` grid.

use super::{choice, lit, many1, numbers, opt, pattern, r, seq, spaced, Grammar};
use once_cell::sync::Lazy;

/// Numbers per data row.
pub const ROW_WIDTH: usize = 6;

pub static GRAMMAR: Lazy<Grammar> = Lazy::new(|| {
    Grammar::new("sos")
        .rule("text", seq(vec![opt(r("ws")), many1(r("detector_section"))]))
        .rule(
            "detector_section",
            seq(vec![
                spaced(vec![lit("DETECTOR"), r("number")]),
                many1(r("mu_section")),
            ]),
        )
        .rule(
            "mu_section",
            seq(vec![
                spaced(vec![lit("SOLAR MU0="), r("number")]),
                r("irradiances"),
                r("column_headers"),
                opt(r("ws")),
                many1(r("data_row")),
            ]),
        )
        .rule(
            "irradiances",
            spaced(vec![
                lit("DOWNWELLING IRRADIANCE="),
                r("number"),
                lit("UPWELLING IRRADIANCE="),
                r("number"),
            ]),
        )
        .rule("column_headers", spaced(vec![r("word"); 6]))
        .rule("data_row", numbers(ROW_WIDTH))
        // The exponent form must come first: the plain form is a prefix of it.
        .rule("number", choice(vec![r("number_sci"), r("number_base")]))
        .rule("number_sci", seq(vec![r("number_base"), pattern(r"E[-+]?\d\d")]))
        .rule("number_base", pattern(r"[-+]?\d*\.?\d+"))
        .rule("word", seq(vec![pattern(r"[,\w]+"), opt(r("ws"))]))
});
