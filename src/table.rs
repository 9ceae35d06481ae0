//! Reduced Tables
//!
//!     Two shapes come out of reduction:
//!
//!         - [`Table`]: a row-major matrix with named columns (EGAP, SOS).
//!         - [`NatrajTable`]: nested maps `tau -> albedo -> mu0 -> mu -> azimuth -> value`.
//!
//!     Both are built once by a visitor and then only read. Extractors return new tables and
//!     never touch the one they were given.

use crate::error::{Error, Result};
use serde::ser::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

/// A matrix whose rows all have one entry per named column.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Table {
    columns: Vec<&'static str>,
    rows: Vec<Vec<f64>>,
}

impl Table {
    pub fn new(columns: &[&'static str]) -> Self {
        Self {
            columns: columns.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn with_capacity(columns: &[&'static str], rows: usize) -> Self {
        Self {
            columns: columns.to_vec(),
            rows: Vec::with_capacity(rows),
        }
    }

    /// Append a row, rejecting any row whose width is not the column count.
    pub fn push_row(&mut self, row: Vec<f64>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::SectionShape {
                rule: "row",
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Stack `other` below `self`. Column names must agree.
    pub fn append(&mut self, other: Table) -> Result<()> {
        if other.columns != self.columns {
            return Err(Error::Structure {
                rule: "table",
                detail: format!(
                    "cannot stack columns {:?} under {:?}",
                    other.columns, self.columns
                ),
            });
        }
        self.rows.extend(other.rows);
        Ok(())
    }

    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of one named column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let index = self.columns.iter().position(|column| *column == name)?;
        Some(self.rows.iter().map(|row| row[index]).collect())
    }

    /// Copy of rows `range`. The caller guarantees the range is in bounds.
    pub fn slice_rows(&self, range: Range<usize>) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows[range].to_vec(),
        }
    }

    /// Copy with the row order flipped.
    pub fn reversed(&self) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().rev().cloned().collect(),
        }
    }

    /// Copy keeping only the columns from `first` on.
    pub fn columns_from(&self, first: usize) -> Table {
        let first = first.min(self.columns.len());
        Table {
            columns: self.columns[first..].to_vec(),
            rows: self.rows.iter().map(|row| row[first..].to_vec()).collect(),
        }
    }
}

/// Physical-parameter key compared by exact value.
///
/// Ordering uses `f64::total_cmp` on the value with the sign of zero dropped, so keys sort
/// numerically, `-0.0` and `0.0` are one key, and lookups never apply a tolerance.
#[derive(Debug, Clone, Copy)]
pub struct ParamKey(pub f64);

impl ParamKey {
    /// The key value with `-0.0` folded into `0.0`.
    pub fn value(self) -> f64 {
        if self.0 == 0.0 {
            0.0
        } else {
            self.0
        }
    }
}

impl PartialEq for ParamKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ParamKey {}

impl PartialOrd for ParamKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ParamKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value().total_cmp(&other.value())
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl Serialize for ParamKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// `azimuth -> value` for one `(tau, albedo, mu0, mu)`.
pub type AzimuthValues = BTreeMap<ParamKey, f64>;
/// `mu -> azimuth -> value`.
pub type MuTable = BTreeMap<ParamKey, AzimuthValues>;
/// `mu0 -> mu -> ...`.
pub type Mu0Table = BTreeMap<ParamKey, MuTable>;
/// `albedo -> mu0 -> ...`.
pub type AlbedoTable = BTreeMap<ParamKey, Mu0Table>;

/// Natraj Rayleigh tables keyed `tau -> albedo -> mu0 -> mu -> azimuth`.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct NatrajTable {
    by_tau: BTreeMap<ParamKey, AlbedoTable>,
}

impl NatrajTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one optical-depth block, replacing any earlier block for the same `tau`.
    pub fn insert(&mut self, tau: f64, block: AlbedoTable) -> Option<AlbedoTable> {
        self.by_tau.insert(ParamKey(tau), block)
    }

    pub fn tau(&self, tau: f64) -> Option<&AlbedoTable> {
        self.by_tau.get(&ParamKey(tau))
    }

    /// Exact-key lookup of a single value.
    pub fn get(&self, tau: f64, albedo: f64, mu0: f64, mu: f64, azimuth: f64) -> Option<f64> {
        self.tau(tau)?
            .get(&ParamKey(albedo))?
            .get(&ParamKey(mu0))?
            .get(&ParamKey(mu))?
            .get(&ParamKey(azimuth))
            .copied()
    }

    pub fn taus(&self) -> impl Iterator<Item = f64> + '_ {
        self.by_tau.keys().map(|key| key.value())
    }

    /// Every `(tau, albedo, mu0, mu)` path with its azimuth values.
    pub fn entries(&self) -> impl Iterator<Item = ([f64; 4], &AzimuthValues)> + '_ {
        self.by_tau.iter().flat_map(|(tau, albedos)| {
            albedos.iter().flat_map(move |(albedo, mu0s)| {
                mu0s.iter().flat_map(move |(mu0, mus)| {
                    mus.iter().map(move |(mu, values)| {
                        ([tau.value(), albedo.value(), mu0.value(), mu.value()], values)
                    })
                })
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(&["a", "b"]);
        for i in 0..4 {
            table.push_row(vec![i as f64, 10.0 * i as f64]).unwrap();
        }
        table
    }

    #[test]
    fn test_push_row_rejects_wrong_width() {
        let mut table = Table::new(&["a", "b"]);
        let err = table.push_row(vec![1.0]).unwrap_err();
        assert!(matches!(
            err,
            Error::SectionShape {
                expected: 2,
                found: 1,
                ..
            }
        ));
        assert!(table.is_empty());
    }

    #[test]
    fn test_slice_reverse_and_columns() {
        let table = sample();
        assert_eq!(table.slice_rows(1..3).column("a"), Some(vec![1.0, 2.0]));
        assert_eq!(table.reversed().column("b"), Some(vec![30.0, 20.0, 10.0, 0.0]));

        let tail = table.columns_from(1);
        assert_eq!(tail.columns(), &["b"]);
        assert_eq!(tail.row(2), Some(&[20.0][..]));
        assert_eq!(table.n_rows(), 4, "source table is untouched");
    }

    #[test]
    fn test_append_requires_matching_columns() {
        let mut table = sample();
        table.append(sample()).unwrap();
        assert_eq!(table.n_rows(), 8);
        assert!(table.append(Table::new(&["x", "y"])).is_err());
    }

    #[test]
    fn test_param_key_exact_match() {
        let mut map = BTreeMap::new();
        map.insert(ParamKey(0.1), "a");
        assert_eq!(map.get(&ParamKey(0.1)), Some(&"a"));
        assert_eq!(map.get(&ParamKey(0.1 + 1e-15)), None);
        assert!(ParamKey(-0.5) < ParamKey(0.0));
    }

    #[test]
    fn test_param_key_signed_zero_is_one_key() {
        assert_eq!(ParamKey(-0.0), ParamKey(0.0));
        assert!(ParamKey(-0.0) > ParamKey(-1e-300));
        let mut map = BTreeMap::new();
        map.insert(ParamKey(-0.0), "zero");
        assert_eq!(map.get(&ParamKey(0.0)), Some(&"zero"));
        assert_eq!(ParamKey(-0.0).to_string(), "0");
    }

    #[test]
    fn test_table_serializes_columns_and_rows() {
        let mut table = Table::new(&["mu", "R_I"]);
        table.push_row(vec![30.0, 0.5]).unwrap();
        insta::assert_snapshot!(
            serde_json::to_string(&table).unwrap(),
            @r#"{"columns":["mu","R_I"],"rows":[[30.0,0.5]]}"#
        );
    }

    #[test]
    fn test_natraj_lookup_and_serialize() {
        let azimuths: AzimuthValues = [(ParamKey(0.0), 1.5)].into_iter().collect();
        let mus: MuTable = [(ParamKey(0.2), azimuths)].into_iter().collect();
        let mu0s: Mu0Table = [(ParamKey(0.1), mus)].into_iter().collect();
        let albedos: AlbedoTable = [(ParamKey(0.0), mu0s)].into_iter().collect();
        let mut table = NatrajTable::new();
        table.insert(0.5, albedos);

        assert_eq!(table.get(0.5, 0.0, 0.1, 0.2, 0.0), Some(1.5));
        assert_eq!(table.get(0.5, 0.0, 0.1, 0.2, 30.0), None);
        assert_eq!(table.entries().count(), 1);
        insta::assert_snapshot!(
            serde_json::to_string(&table).unwrap(),
            @r#"{"0.5":{"0":{"0.1":{"0.2":{"0":1.5}}}}}"#
        );
    }
}
