//! EGAP reduction: data rows fold into a four-column [`Table`].

use super::{reduce, take_numbers, Reduced, Visitor};
use crate::error::{Error, Result};
use crate::grammar::egap::GRAMMAR;
use crate::numeric::{round_to_tenth, Encoding, ExponentMarker};
use crate::parsing::{self, ParseNode};
use crate::table::Table;

/// Columns kept from each row; the remaining four textual columns are discarded.
pub const COLUMNS: [&str; 4] = ["mu", "R_I", "R_Q", "R_U"];

#[derive(Debug, Clone, PartialEq)]
pub enum EgapItem {
    Row(Vec<f64>),
    Table(Table),
}

pub struct EgapVisitor;

impl Visitor for EgapVisitor {
    type Item = EgapItem;

    fn marker(&self) -> ExponentMarker {
        ExponentMarker::D
    }

    fn visit(
        &self,
        node: &ParseNode<'_>,
        children: Vec<Reduced<EgapItem>>,
    ) -> Result<Reduced<EgapItem>> {
        match node.name() {
            "number" => self.number(node),
            "file_header" | "blank" => Ok(Reduced::Skip),
            "data_row" => {
                let numbers = take_numbers(&Reduced::generic(children), "data_row", COLUMNS.len())?;
                let row = numbers
                    .iter()
                    .enumerate()
                    .map(|(column, token)| match (column, token.encoding) {
                        // The angle column: whole degrees behind a D exponent.
                        (0, Encoding::FortranD) => round_to_tenth(token.value),
                        _ => token.value,
                    })
                    .collect();
                Ok(Reduced::Item(EgapItem::Row(row)))
            }
            "text" => {
                let items = Reduced::generic(children).into_items();
                let mut table = Table::with_capacity(&COLUMNS, items.len());
                for item in items {
                    if let EgapItem::Row(row) = item {
                        table.push_row(row)?;
                    }
                }
                Ok(Reduced::Item(EgapItem::Table(table)))
            }
            "expr" => {
                let table = first_table(Reduced::generic(children))?;
                Ok(Reduced::Item(EgapItem::Table(table)))
            }
            _ => Ok(Reduced::generic(children)),
        }
    }
}

fn first_table(value: Reduced<EgapItem>) -> Result<Table> {
    let mut tables = value.into_items().into_iter().filter_map(|item| match item {
        EgapItem::Table(table) => Some(table),
        EgapItem::Row(_) => None,
    });
    let table = tables.next().ok_or_else(|| Error::Structure {
        rule: "expr",
        detail: "no data block".to_string(),
    })?;
    let ignored = tables.count();
    if ignored > 0 {
        log::debug!("egap: ignoring {} data blocks after the first", ignored);
    }
    Ok(table)
}

/// Parse EGAP text into rows of `mu, R_I, R_Q, R_U`.
pub fn parse(source: &str) -> Result<Table> {
    let root = parsing::parse(&GRAMMAR, source)?;
    let table = first_table(reduce(&EgapVisitor, &root)?)?;
    log::debug!("egap: reduced {} rows", table.n_rows());
    Ok(table)
}
