//! Reduction Visitor
//!
//!     Folds a parse tree into a reduced table, strictly bottom-up: every child is reduced
//!     before its parent sees it. A format supplies a [`Visitor`] with one reduction per rule
//!     it cares about; everything else goes through [`Reduced::generic`], which drops
//!     discarded structure and keeps the rest as a sequence.
//!
//!     Values flowing up the tree are [`Reduced`]: numbers and words decoded from leaves,
//!     format-specific items (rows, chunks, sections), or sequences of those.

pub mod egap;
pub mod natraj;
pub mod sos;

use crate::error::{Error, Result};
use crate::numeric::{self, ExponentMarker, NumericToken};
use crate::parsing::ParseNode;

/// Intermediate value produced for one parse node.
#[derive(Debug, Clone, PartialEq)]
pub enum Reduced<T> {
    /// Whitespace, markers, headers: nothing survives.
    Skip,
    Number(NumericToken),
    Word(String),
    Item(T),
    Seq(Vec<Reduced<T>>),
}

impl<T> Reduced<T> {
    /// Default reduction: drop skipped children, keep the rest in order.
    pub fn generic(children: Vec<Reduced<T>>) -> Self {
        let kept: Vec<_> = children
            .into_iter()
            .filter(|child| !matches!(child, Reduced::Skip))
            .collect();
        if kept.is_empty() {
            Reduced::Skip
        } else {
            Reduced::Seq(kept)
        }
    }

    /// All numbers below this value, in document order.
    pub fn numbers(&self) -> Vec<NumericToken> {
        let mut out = Vec::new();
        self.walk(&mut |value| {
            if let Reduced::Number(token) = value {
                out.push(*token);
            }
        });
        out
    }

    /// All words below this value, in document order.
    pub fn words(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.walk_ref(&mut out);
        out
    }

    fn walk_ref<'v>(&'v self, out: &mut Vec<&'v str>) {
        match self {
            Reduced::Word(word) => out.push(word),
            Reduced::Seq(children) => children.iter().for_each(|child| child.walk_ref(out)),
            _ => {}
        }
    }

    fn walk(&self, visit: &mut impl FnMut(&Reduced<T>)) {
        visit(self);
        if let Reduced::Seq(children) = self {
            for child in children {
                child.walk(visit);
            }
        }
    }

    /// All items below this value, in document order, by value.
    pub fn into_items(self) -> Vec<T> {
        let mut out = Vec::new();
        self.collect_items(&mut out);
        out
    }

    fn collect_items(self, out: &mut Vec<T>) {
        match self {
            Reduced::Item(item) => out.push(item),
            Reduced::Seq(children) => children
                .into_iter()
                .for_each(|child| child.collect_items(out)),
            _ => {}
        }
    }
}

/// Per-format reduction of one node whose children are already reduced.
pub trait Visitor {
    type Item;

    /// Exponent marker this format's number literals may carry.
    fn marker(&self) -> ExponentMarker;

    fn visit(
        &self,
        node: &ParseNode<'_>,
        children: Vec<Reduced<Self::Item>>,
    ) -> Result<Reduced<Self::Item>>;

    /// Decode a `number` node from its matched text.
    fn number(&self, node: &ParseNode<'_>) -> Result<Reduced<Self::Item>> {
        numeric::decode(node.text.trim(), self.marker()).map(Reduced::Number)
    }
}

/// Reduce `node` bottom-up with `visitor`.
pub fn reduce<V: Visitor>(visitor: &V, node: &ParseNode<'_>) -> Result<Reduced<V::Item>> {
    let children = node
        .children
        .iter()
        .map(|child| reduce(visitor, child))
        .collect::<Result<Vec<_>>>()?;
    visitor.visit(node, children)
}

/// Take exactly `count` numbers from `value`, or report the shape of `rule` as broken.
pub fn take_numbers<T>(
    value: &Reduced<T>,
    rule: &'static str,
    count: usize,
) -> Result<Vec<NumericToken>> {
    let numbers = value.numbers();
    if numbers.len() < count {
        return Err(Error::Structure {
            rule,
            detail: format!("expected {} numbers, found {}", count, numbers.len()),
        });
    }
    Ok(numbers.into_iter().take(count).collect())
}
