//! Benchmark Formats
//!
//!     The three layouts form a closed set. [`Format`] pairs each with its grammar and its
//!     reduction, and every dispatch below matches exhaustively, so adding a layout is a
//!     compile error everywhere it has to be handled.

use crate::error::{Error, Result};
use crate::grammar::{egap, natraj, sos, Grammar};
use crate::reduce;
use crate::table::{NatrajTable, Table};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Egap,
    Natraj,
    Sos,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Egap, Format::Natraj, Format::Sos];

    pub fn name(self) -> &'static str {
        match self {
            Format::Egap => "egap",
            Format::Natraj => "natraj",
            Format::Sos => "sos",
        }
    }

    pub fn grammar(self) -> &'static Grammar {
        match self {
            Format::Egap => &egap::GRAMMAR,
            Format::Natraj => &natraj::GRAMMAR,
            Format::Sos => &sos::GRAMMAR,
        }
    }

    /// Parse and reduce `source` with this format's grammar and visitor.
    pub fn parse(self, source: &str) -> Result<ReducedTable> {
        log::debug!("{}: parsing {} bytes", self, source.len());
        match self {
            Format::Egap => reduce::egap::parse(source).map(ReducedTable::Rows),
            Format::Natraj => reduce::natraj::parse(source).map(ReducedTable::Nested),
            Format::Sos => reduce::sos::parse(source).map(ReducedTable::Rows),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown format '{}' (expected egap, natraj or sos)", s))
    }
}

/// Output of a parse: a flat matrix (EGAP, SOS) or the Natraj nested map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReducedTable {
    Rows(Table),
    Nested(NatrajTable),
}

impl ReducedTable {
    pub fn as_rows(&self) -> Option<&Table> {
        match self {
            ReducedTable::Rows(table) => Some(table),
            ReducedTable::Nested(_) => None,
        }
    }

    pub fn as_nested(&self) -> Option<&NatrajTable> {
        match self {
            ReducedTable::Nested(table) => Some(table),
            ReducedTable::Rows(_) => None,
        }
    }

    /// The flat matrix, or a `Structure` error for the Natraj map.
    pub fn into_rows(self) -> Result<Table> {
        match self {
            ReducedTable::Rows(table) => Ok(table),
            ReducedTable::Nested(_) => Err(Error::Structure {
                rule: "expr",
                detail: "natraj tables are nested maps, not rows".to_string(),
            }),
        }
    }
}
