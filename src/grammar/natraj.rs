//! Natraj Rayleigh table layout
//!
//!     ```text
//!     ~~~~~~~~~~~~~~
//!     TAU = 0.02
//!     ~~~~~~~~~~~~~~
//!     MU 0 MU PHI = 0 PHI = 30 ... PHI = 180
//!     ~~~~~~~~~~~~~~
//!     ALBEDO = 0.0
//!     ~~~~~~~~~~~~~~
//!     0.1 0.1 0.5 0.4 0.3 0.2 0.1 0.05 0.01
//!     ```
//!
//!     One `text` block per optical depth; inside it one `data_chunk` per albedo; each data row
//!     holds `mu0, mu` and the seven azimuth values. Plain decimals only.

use super::{lit, many1, numbers, opt, pattern, r, seq, spaced, Grammar};
use once_cell::sync::Lazy;

/// Numbers per data row: `mu0, mu` plus one value per azimuth.
pub const ROW_WIDTH: usize = 9;

pub static GRAMMAR: Lazy<Grammar> = Lazy::new(|| {
    Grammar::new("natraj")
        .rule("text", seq(vec![opt(r("ws")), r("file_header"), many1(r("data_chunk"))]))
        .rule(
            "file_header",
            seq(vec![r("tline"), r("pair"), r("tline"), r("col_headers")]),
        )
        .rule(
            "col_headers",
            seq(vec![spaced(vec![r("word"), r("word")]), many1(r("pair"))]),
        )
        .rule(
            "data_chunk",
            seq(vec![r("tline"), r("pair"), r("tline"), many1(r("data_row"))]),
        )
        .rule("data_row", numbers(ROW_WIDTH))
        .rule(
            "pair",
            seq(vec![r("word"), r("equal"), r("number"), opt(r("ws"))]),
        )
        .rule("number", pattern(r"[-+]?\d*\.?\d+"))
        .rule("word", pattern(r"\w+ 0?"))
        .rule("equal", seq(vec![opt(r("ws")), lit("="), opt(r("ws"))]))
        .rule("tline", seq(vec![pattern(r"~+"), opt(r("ws"))]))
});
