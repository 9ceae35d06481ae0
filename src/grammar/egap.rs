//! EGAP layout
//!
//!     ```text
//!     25
//!      0.30000D+02  1.234D+00  5.6D-01  0.0  ...  (8 columns per row)
//!     ```
//!
//!     A `25` marker, then rows of eight numbers. Only the first four columns
//!     (`mu, R_I, R_Q, R_U`) are reduced. Numbers may carry a Fortran `D` exponent.

use super::{choice, lit, many1, numbers, opt, pattern, r, seq, Grammar};
use once_cell::sync::Lazy;

/// Numbers per textual row.
pub const ROW_WIDTH: usize = 8;

pub static GRAMMAR: Lazy<Grammar> = Lazy::new(|| {
    Grammar::new("egap")
        .rule("text", seq(vec![opt(r("ws")), r("file_header"), many1(r("data_row"))]))
        .rule("file_header", seq(vec![lit("25"), opt(r("ws"))]))
        .rule("data_row", numbers(ROW_WIDTH))
        // The exponent form must come first: the plain form is a prefix of it.
        .rule("number", choice(vec![r("number_sci"), r("number_base")]))
        .rule("number_sci", seq(vec![r("number_base"), pattern(r"D[-+]?\d\d")]))
        .rule("number_base", pattern(r"[-+]?\d*\.?\d+"))
});
