//! SOS reduction: every `mu_section` becomes a fixed 52 x 6 block, stacked in document order.
//!
//! The section header carries the photon cosine; it is mapped to its zenith angle and
//! broadcast into the first column of every row of the block.

use super::{reduce, take_numbers, Reduced, Visitor};
use crate::axes::{SOS_PHOTON_COSINES, SOS_SECTION_ROWS};
use crate::error::{Error, Result};
use crate::grammar::sos::GRAMMAR;
use crate::numeric::ExponentMarker;
use crate::parsing::{self, ParseNode};
use crate::table::Table;

pub const COLUMNS: [&str; 6] = ["theta_photon", "theta_sensor", "phi", "R_I", "R_Q", "R_U"];

/// Numbers kept from each textual row (everything after the photon column).
const PARSED_COLUMNS: usize = COLUMNS.len() - 1;

#[derive(Debug, Clone, PartialEq)]
pub enum SosItem {
    Row(Vec<f64>),
    Block(Table),
}

/// Photon zenith (degrees) for the cosine written in a section header.
pub fn photon_zenith(cosine: f64) -> Result<f64> {
    SOS_PHOTON_COSINES
        .iter()
        .find(|(known, _)| *known == cosine)
        .map(|(_, zenith)| *zenith)
        .ok_or(Error::UnrecognizedPhotonCosine { value: cosine })
}

/// Header cosine for a photon zenith (degrees), the inverse of [`photon_zenith`].
pub fn photon_cosine(zenith: f64) -> Option<f64> {
    SOS_PHOTON_COSINES
        .iter()
        .find(|(_, known)| *known == zenith)
        .map(|(cosine, _)| *cosine)
}

pub struct SosVisitor;

impl SosVisitor {
    fn section(&self, children: Vec<Reduced<SosItem>>) -> Result<Table> {
        let value = Reduced::generic(children);
        let cosine = take_numbers(&value, "mu_section", 1)?[0].value;
        let theta_photon = photon_zenith(cosine)?;

        let rows: Vec<Vec<f64>> = value
            .into_items()
            .into_iter()
            .filter_map(|item| match item {
                SosItem::Row(row) => Some(row),
                SosItem::Block(_) => None,
            })
            .collect();
        if rows.len() != SOS_SECTION_ROWS {
            return Err(Error::SectionShape {
                rule: "mu_section",
                expected: SOS_SECTION_ROWS,
                found: rows.len(),
            });
        }

        let mut block = Table::with_capacity(&COLUMNS, SOS_SECTION_ROWS);
        for row in rows {
            let mut full = Vec::with_capacity(COLUMNS.len());
            full.push(theta_photon);
            full.extend(row);
            block.push_row(full)?;
        }
        log::trace!("sos: section theta_photon={} reduced", theta_photon);
        Ok(block)
    }
}

impl Visitor for SosVisitor {
    type Item = SosItem;

    fn marker(&self) -> ExponentMarker {
        ExponentMarker::E
    }

    fn visit(
        &self,
        node: &ParseNode<'_>,
        children: Vec<Reduced<SosItem>>,
    ) -> Result<Reduced<SosItem>> {
        match node.name() {
            "number" => self.number(node),
            "irradiances" | "column_headers" | "blank" => Ok(Reduced::Skip),
            "data_row" => {
                let numbers =
                    take_numbers(&Reduced::generic(children), "data_row", PARSED_COLUMNS)?;
                let row = numbers.iter().map(|token| token.value).collect();
                Ok(Reduced::Item(SosItem::Row(row)))
            }
            "mu_section" => Ok(Reduced::Item(SosItem::Block(self.section(children)?))),
            "detector_section" | "text" | "expr" => {
                Ok(Reduced::Item(SosItem::Block(stack(Reduced::generic(children))?)))
            }
            _ => Ok(Reduced::generic(children)),
        }
    }
}

/// Stack every block below `value` vertically, in document order.
fn stack(value: Reduced<SosItem>) -> Result<Table> {
    let mut table = Table::new(&COLUMNS);
    for item in value.into_items() {
        if let SosItem::Block(block) = item {
            table.append(block)?;
        }
    }
    Ok(table)
}

/// Parse SOS text into a `[theta_photon, theta_sensor, phi, R_I, R_Q, R_U]` matrix.
pub fn parse(source: &str) -> Result<Table> {
    let root = parsing::parse(&GRAMMAR, source)?;
    let table = stack(reduce(&SosVisitor, &root)?)?;
    log::debug!("sos: reduced {} rows", table.n_rows());
    Ok(table)
}
