//! Parsing
//!
//!     Source text goes through two stages before it becomes a table:
//!
//!         1. Matching: the [engine] walks a [grammar](crate::grammar) over the text and builds
//!            a concrete tree of [`ParseNode`]s, one per matched expression.
//!         2. Reduction: a format's visitor in [reduce](crate::reduce) folds that tree bottom-up
//!            into a reduced table.
//!
//!     The tree is only an intermediate. It borrows the source and is never returned from the
//!     public `parse_*` entry points.

pub mod engine;
pub mod node;

pub use engine::parse;
pub use node::ParseNode;
