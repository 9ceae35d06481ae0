//! # rt-tables
//!
//! Grammar-driven parsers for three radiative-transfer benchmark layouts (EGAP, Natraj and
//! successive-orders-of-scattering), reducing each file to a numeric table, plus extractors
//! that slice those tables by physical parameters.
//!
//! ## Pipeline
//!
//!     text --grammar--> ParseNode tree --visitor--> ReducedTable --extractor--> Table
//!
//!     1. [grammar]: each layout is a table of PEG rules.
//!     2. [parsing]: one engine interprets any rule table and yields a concrete parse tree.
//!     3. [reduce]: a per-layout visitor folds the tree bottom-up, decoding numbers through
//!        [numeric].
//!     4. [extract]: EGAP and SOS extractors locate a dataset file and select rows.
//!
//! Everything is synchronous and pure apart from the single whole-file read in
//! [`parse_file`] and the extractors.

pub mod axes;
pub mod config;
pub mod error;
pub mod extract;
pub mod format;
pub mod grammar;
pub mod numeric;
pub mod parsing;
pub mod reduce;
pub mod table;

pub use error::{Allowed, Error, ParseError, Result};
pub use format::{Format, ReducedTable};
pub use table::{NatrajTable, ParamKey, Table};

use std::path::Path;

/// Parse in-memory `text` in `format` into its reduced table.
pub fn parse_text(format: Format, text: &str) -> Result<ReducedTable> {
    format.parse(text)
}

/// Read `path` whole and parse it in `format`.
pub fn parse_file(format: Format, path: impl AsRef<Path>) -> Result<ReducedTable> {
    let source = extract::read_source(path.as_ref())?;
    format.parse(&source)
}
