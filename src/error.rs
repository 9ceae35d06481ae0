//! Error types for parsing, reduction and extraction
//!
//! Every failure is surfaced to the caller as a typed value. Nothing is retried and nothing
//! is downgraded to a partial table: a benchmark file either reduces completely or not at all.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Input text did not match the grammar.
///
/// `offset` is the furthest byte the engine reached; `expected` names the rules that were
/// being attempted there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub grammar: &'static str,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
    pub expected: Vec<String>,
}

impl ParseError {
    /// Build an error for `offset` into `source`, computing the 1-based line and column.
    pub fn at(grammar: &'static str, source: &str, offset: usize, expected: Vec<String>) -> Self {
        let offset = offset.min(source.len());
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let column = match before.rfind('\n') {
            Some(newline) => before[newline + 1..].chars().count() + 1,
            None => before.chars().count() + 1,
        };

        Self {
            grammar,
            offset,
            line,
            column,
            expected,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} input does not match at line {}, column {} (offset {})",
            self.grammar, self.line, self.column, self.offset
        )?;
        if !self.expected.is_empty() {
            write!(f, "; expected one of: {}", self.expected.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// The discrete set (or range) an extractor argument must belong to.
#[derive(Debug, Clone, PartialEq)]
pub enum Allowed {
    Set(&'static [f64]),
    Range { min: f64, max: f64 },
}

impl Allowed {
    pub fn contains(&self, value: f64) -> bool {
        match self {
            Allowed::Set(values) => values.iter().any(|v| *v == value),
            Allowed::Range { min, max } => value >= *min && value <= *max,
        }
    }
}

impl fmt::Display for Allowed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Allowed::Set(values) => {
                let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "{{{}}}", rendered.join(", "))
            }
            Allowed::Range { min, max } => write!(f, "[{}, {}]", min, max),
        }
    }
}

/// Errors raised while turning benchmark text into tables or slicing those tables.
#[derive(Debug)]
pub enum Error {
    /// Text does not match the selected grammar.
    Parse(ParseError),
    /// A numeric literal carried an exponent marker but its parts are not numbers.
    MalformedNumber { text: String },
    /// An extractor argument is not one of the format's allowed values.
    ValueNotFound {
        parameter: &'static str,
        value: f64,
        allowed: Allowed,
    },
    /// An SOS `SOLAR MU0=` header holds a cosine with no known photon zenith.
    UnrecognizedPhotonCosine { value: f64 },
    /// A section or row does not have the number of entries its layout fixes.
    SectionShape {
        rule: &'static str,
        expected: usize,
        found: usize,
    },
    /// The parse tree has a shape the grammar cannot produce.
    Structure { rule: &'static str, detail: String },
    /// Reading a dataset file failed.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(err) => write!(f, "Parse error: {}", err),
            Error::MalformedNumber { text } => write!(f, "Malformed number literal '{}'", text),
            Error::ValueNotFound {
                parameter,
                value,
                allowed,
            } => write!(
                f,
                "Value {} for '{}' not found; allowed: {}",
                value, parameter, allowed
            ),
            Error::UnrecognizedPhotonCosine { value } => write!(
                f,
                "Unrecognized photon cosine {} (expected -0.5 or -0.866025)",
                value
            ),
            Error::SectionShape {
                rule,
                expected,
                found,
            } => write!(
                f,
                "Malformed {}: expected {} entries, found {}",
                rule, expected, found
            ),
            Error::Structure { rule, detail } => {
                write!(f, "Unexpected parse tree under '{}': {}", rule, detail)
            }
            Error::Io { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(err) => Some(err),
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Parse(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_line_and_column() {
        let source = "25\n1.0 2.0\n  x";
        let err = ParseError::at("egap", source, 13, vec!["number".to_string()]);
        assert_eq!(err.line, 3);
        assert_eq!(err.column, 3);
    }

    #[test]
    fn test_parse_error_clamps_offset() {
        let err = ParseError::at("sos", "abc", 99, vec![]);
        assert_eq!(err.offset, 3);
        assert_eq!(err.column, 4);
    }

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::at("natraj", "~~\nTAU", 3, vec!["tline".into(), "word".into()]);
        insta::assert_snapshot!(
            err.to_string(),
            @"natraj input does not match at line 2, column 1 (offset 3); expected one of: tline, word"
        );
    }

    #[test]
    fn test_value_not_found_display() {
        let err = Error::ValueNotFound {
            parameter: "phi",
            value: 45.0,
            allowed: Allowed::Set(&[0.0, 60.0, 180.0, 240.0]),
        };
        insta::assert_snapshot!(
            err.to_string(),
            @"Value 45 for 'phi' not found; allowed: {0, 60, 180, 240}"
        );
    }

    #[test]
    fn test_allowed_contains() {
        assert!(Allowed::Set(&[60.0, 30.0]).contains(30.0));
        assert!(!Allowed::Set(&[60.0, 30.0]).contains(45.0));
        assert!(Allowed::Range { min: 0.0, max: 90.0 }.contains(90.0));
        assert!(!Allowed::Range { min: 0.0, max: 90.0 }.contains(-1.0));
        assert!(!Allowed::Range { min: 0.0, max: 90.0 }.contains(f64::NAN));
    }
}
