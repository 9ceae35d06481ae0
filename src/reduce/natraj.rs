//! Natraj reduction: rows, chunks and blocks fold into a [`NatrajTable`].
//!
//!     data_row    -> mu0 -> mu -> azimuth -> value
//!     data_chunk  -> albedo -> ..., rows merged by mu0 (a repeated (mu0, mu) keeps the later row)
//!     text        -> tau -> ..., a repeated albedo replaces the earlier chunk
//!     expr        -> all blocks, a repeated tau replaces the earlier block

use super::{reduce, take_numbers, Reduced, Visitor};
use crate::axes::NATRAJ_AZIMUTHS;
use crate::error::{Error, Result};
use crate::grammar::natraj::{GRAMMAR, ROW_WIDTH};
use crate::numeric::ExponentMarker;
use crate::parsing::{self, ParseNode};
use crate::table::{AlbedoTable, AzimuthValues, Mu0Table, NatrajTable, ParamKey};

#[derive(Debug, Clone, PartialEq)]
pub enum NatrajItem {
    /// `KEY = value` header line.
    Pair(String, f64),
    Row {
        mu0: f64,
        mu: f64,
        values: AzimuthValues,
    },
    Chunk(f64, Mu0Table),
    Block(f64, AlbedoTable),
    Table(NatrajTable),
}

pub struct NatrajVisitor;

impl Visitor for NatrajVisitor {
    type Item = NatrajItem;

    fn marker(&self) -> ExponentMarker {
        ExponentMarker::None
    }

    fn visit(
        &self,
        node: &ParseNode<'_>,
        children: Vec<Reduced<NatrajItem>>,
    ) -> Result<Reduced<NatrajItem>> {
        match node.name() {
            "number" => self.number(node),
            "word" => Ok(Reduced::Word(node.text.trim().to_string())),
            "col_headers" | "tline" | "blank" => Ok(Reduced::Skip),
            "pair" => {
                let value = Reduced::generic(children);
                let key = value.words().first().map(|word| word.to_string());
                let number = take_numbers(&value, "pair", 1)?;
                match key {
                    Some(key) => Ok(Reduced::Item(NatrajItem::Pair(key, number[0].value))),
                    None => Err(Error::Structure {
                        rule: "pair",
                        detail: "missing key".to_string(),
                    }),
                }
            }
            "data_row" => {
                let numbers = take_numbers(&Reduced::generic(children), "data_row", ROW_WIDTH)?;
                let values = NATRAJ_AZIMUTHS
                    .iter()
                    .zip(&numbers[2..])
                    .map(|(azimuth, token)| (ParamKey(*azimuth), token.value))
                    .collect();
                Ok(Reduced::Item(NatrajItem::Row {
                    mu0: numbers[0].value,
                    mu: numbers[1].value,
                    values,
                }))
            }
            "data_chunk" => {
                let mut items = Reduced::generic(children).into_items().into_iter();
                let albedo = leading_pair(&mut items, "data_chunk")?;
                let mut by_mu0 = Mu0Table::new();
                for item in items {
                    if let NatrajItem::Row { mu0, mu, values } = item {
                        by_mu0
                            .entry(ParamKey(mu0))
                            .or_default()
                            .insert(ParamKey(mu), values);
                    }
                }
                Ok(Reduced::Item(NatrajItem::Chunk(albedo, by_mu0)))
            }
            "text" => {
                let mut items = Reduced::generic(children).into_items().into_iter();
                let tau = leading_pair(&mut items, "text")?;
                let mut by_albedo = AlbedoTable::new();
                for item in items {
                    if let NatrajItem::Chunk(albedo, chunk) = item {
                        by_albedo.insert(ParamKey(albedo), chunk);
                    }
                }
                Ok(Reduced::Item(NatrajItem::Block(tau, by_albedo)))
            }
            "expr" => {
                let mut table = NatrajTable::new();
                for item in Reduced::generic(children).into_items() {
                    if let NatrajItem::Block(tau, block) = item {
                        if table.insert(tau, block).is_some() {
                            log::debug!("natraj: tau {} repeated, keeping the later block", tau);
                        }
                    }
                }
                Ok(Reduced::Item(NatrajItem::Table(table)))
            }
            _ => Ok(Reduced::generic(children)),
        }
    }
}

/// The value of the `KEY = value` line that heads a block or chunk.
fn leading_pair(
    items: &mut impl Iterator<Item = NatrajItem>,
    rule: &'static str,
) -> Result<f64> {
    match items.next() {
        Some(NatrajItem::Pair(key, value)) => {
            log::trace!("natraj: {} {} = {}", rule, key, value);
            Ok(value)
        }
        _ => Err(Error::Structure {
            rule,
            detail: "missing heading KEY = value line".to_string(),
        }),
    }
}

/// Parse Natraj text into `tau -> albedo -> mu0 -> mu -> azimuth -> value`.
pub fn parse(source: &str) -> Result<NatrajTable> {
    let root = parsing::parse(&GRAMMAR, source)?;
    let table = reduce(&NatrajVisitor, &root)?
        .into_items()
        .into_iter()
        .find_map(|item| match item {
            NatrajItem::Table(table) => Some(table),
            _ => None,
        })
        .ok_or_else(|| Error::Structure {
            rule: "expr",
            detail: "no optical-depth block".to_string(),
        })?;
    log::debug!("natraj: reduced {} (tau, albedo, mu0, mu) paths", table.entries().count());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
~~~~~~~~~~~~~~~~~~~~
TAU = 0.02
~~~~~~~~~~~~~~~~~~~~
MU 0 MU PHI = 0 PHI = 30 PHI = 60 PHI = 90 PHI = 120 PHI = 150 PHI = 180
~~~~~~~~~~~~~~~~~~~~
ALBEDO = 0.0
~~~~~~~~~~~~~~~~~~~~
0.1 0.1 1.0 1.1 1.2 1.3 1.4 1.5 1.6
0.1 0.2 2.0 2.1 2.2 2.3 2.4 2.5 2.6
0.2 0.1 3.0 3.1 3.2 3.3 3.4 3.5 3.6
~~~~~~~~~~~~~~~~~~~~
ALBEDO = 0.8
~~~~~~~~~~~~~~~~~~~~
0.1 0.1 4.0 4.1 4.2 4.3 4.4 4.5 4.6
";

    #[test]
    fn test_nested_lookup() {
        let table = parse(SAMPLE).unwrap();
        assert_eq!(table.taus().collect::<Vec<_>>(), vec![0.02]);
        assert_eq!(table.get(0.02, 0.0, 0.1, 0.1, 0.0), Some(1.0));
        assert_eq!(table.get(0.02, 0.0, 0.1, 0.2, 180.0), Some(2.6));
        assert_eq!(table.get(0.02, 0.0, 0.2, 0.1, 90.0), Some(3.3));
        assert_eq!(table.get(0.02, 0.8, 0.1, 0.1, 30.0), Some(4.1));
        assert_eq!(table.get(0.02, 0.8, 0.2, 0.1, 30.0), None);
    }

    #[test]
    fn test_rows_merge_by_mu0() {
        let table = parse(SAMPLE).unwrap();
        let mu0 = &table.tau(0.02).unwrap()[&ParamKey(0.0)][&ParamKey(0.1)];
        assert_eq!(mu0.len(), 2);
    }

    #[test]
    fn test_every_path_has_seven_azimuths() {
        let table = parse(SAMPLE).unwrap();
        assert_eq!(table.entries().count(), 4);
        for (_, values) in table.entries() {
            let keys: Vec<f64> = values.keys().map(|key| key.0).collect();
            assert_eq!(keys, NATRAJ_AZIMUTHS.to_vec());
            assert!(values.values().all(|value| value.is_finite()));
        }
    }

    #[test]
    fn test_blocks_fold_by_tau() {
        let second = SAMPLE.replace("TAU = 0.02", "TAU = 0.5");
        let source = format!("\n{}\n\n{}", SAMPLE, second);
        let table = parse(&source).unwrap();
        assert_eq!(table.taus().collect::<Vec<_>>(), vec![0.02, 0.5]);
        assert_eq!(table.get(0.5, 0.8, 0.1, 0.1, 180.0), Some(4.6));
    }

    #[test]
    fn test_repeated_tau_keeps_later_block() {
        let later = SAMPLE.replace("4.6", "9.9");
        let table = parse(&format!("{}{}", SAMPLE, later)).unwrap();
        assert_eq!(table.get(0.02, 0.8, 0.1, 0.1, 180.0), Some(9.9));
    }

    #[test]
    fn test_negative_zero_keys_match_zero() {
        let source = SAMPLE
            .replace("ALBEDO = 0.0", "ALBEDO = -0.0")
            .replace("0.1 0.1 1.0", "0.1 -0 1.0");
        let table = parse(&source).unwrap();
        assert_eq!(table.get(0.02, 0.0, 0.1, 0.0, 0.0), Some(1.0));
        assert_eq!(table.get(0.02, -0.0, 0.1, -0.0, 0.0), Some(1.0));
        assert_eq!(table.get(0.02, 0.0, 0.1, 0.2, 180.0), Some(2.6));
    }

    #[test]
    fn test_eight_column_row_is_rejected() {
        let source = SAMPLE.replace("4.0 4.1 4.2 4.3 4.4 4.5 4.6", "4.0 4.1 4.2 4.3 4.4 4.5");
        assert!(matches!(parse(&source), Err(Error::Parse(_))));
    }
}
