//! Numeric Literal Decoder
//!
//!     Turns the text matched by a grammar's `number` rule into an `f64`. Three encodings show
//!     up in the benchmark files:
//!
//!         plain           `-0.866025`, `.5`, `30`
//!         Fortran D       `0.30000D+02` (EGAP)
//!         E exponent      `1.2345E-03` (SOS)
//!
//!     Decoding is a pure function of the literal and the marker the grammar admits, so it is
//!     tested here independently of any grammar.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static PLAIN_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-+]?\d*\.?\d+$").expect("plain decimal pattern is valid"));

static EXPONENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-+]?\d+$").expect("exponent pattern is valid"));

/// Which encoding a literal was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Plain,
    FortranD,
    EngineeringE,
}

/// Exponent marker a grammar admits in its number literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExponentMarker {
    /// Plain decimals only (Natraj).
    None,
    /// Fortran `D` exponent (EGAP).
    D,
    /// `E` exponent (SOS).
    E,
}

impl ExponentMarker {
    fn as_char(self) -> Option<char> {
        match self {
            ExponentMarker::None => None,
            ExponentMarker::D => Some('D'),
            ExponentMarker::E => Some('E'),
        }
    }

    fn encoding(self) -> Encoding {
        match self {
            ExponentMarker::None => Encoding::Plain,
            ExponentMarker::D => Encoding::FortranD,
            ExponentMarker::E => Encoding::EngineeringE,
        }
    }
}

/// A decoded literal. Only `value` survives into reduced tables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericToken {
    pub value: f64,
    pub encoding: Encoding,
}

/// Decode a trimmed literal.
///
/// Plain decimals are tried first. Otherwise the literal is split at the single exponent
/// marker into significand and exponent, and the value is the correctly rounded
/// `significand * 10^exponent`.
pub fn decode(text: &str, marker: ExponentMarker) -> Result<NumericToken> {
    let malformed = || Error::MalformedNumber {
        text: text.to_string(),
    };

    if PLAIN_DECIMAL.is_match(text) {
        let value = text.parse::<f64>().map_err(|_| malformed())?;
        return Ok(NumericToken {
            value,
            encoding: Encoding::Plain,
        });
    }

    let marker_char = marker.as_char().ok_or_else(malformed)?;
    let (significand, exponent) = text.split_once(marker_char).ok_or_else(malformed)?;
    if !PLAIN_DECIMAL.is_match(significand) || !EXPONENT.is_match(exponent) {
        return Err(malformed());
    }

    let exponent_value = exponent.parse::<i32>().map_err(|_| malformed())?;

    let value = format!("{}e{}", significand, exponent_value)
        .parse::<f64>()
        .map_err(|_| malformed())?;

    Ok(NumericToken {
        value,
        encoding: marker.encoding(),
    })
}

/// Round to one decimal place.
///
/// EGAP angles are whole degrees written with a `D` exponent; the decoded product carries
/// float noise that would break exact key lookups.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
