//! Parse tree nodes
//!
//! A node records the span it matched, the named rule that produced it (anonymous
//! sub-expressions such as `ws?` or a repetition carry `None`), and its children in order.
//! Trees borrow the source text and are dropped once reduction finishes.

use std::fmt::Write as _;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNode<'a> {
    pub rule: Option<&'static str>,
    pub span: Range<usize>,
    pub text: &'a str,
    pub children: Vec<ParseNode<'a>>,
}

impl<'a> ParseNode<'a> {
    pub fn leaf(source: &'a str, span: Range<usize>) -> Self {
        Self {
            rule: None,
            text: &source[span.clone()],
            span,
            children: Vec::new(),
        }
    }

    pub fn branch(source: &'a str, span: Range<usize>, children: Vec<ParseNode<'a>>) -> Self {
        Self {
            children,
            ..Self::leaf(source, span)
        }
    }

    /// Name of the rule this node matched, or `""` for anonymous sub-expressions.
    pub fn name(&self) -> &'static str {
        self.rule.unwrap_or("")
    }

    pub fn is(&self, rule: &str) -> bool {
        self.rule == Some(rule)
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// Named descendants (including `self`) in document order.
    pub fn named(&self) -> Vec<&ParseNode<'a>> {
        let mut out = Vec::new();
        self.collect_named(&mut out);
        out
    }

    fn collect_named<'n>(&'n self, out: &mut Vec<&'n ParseNode<'a>>) {
        if self.rule.is_some() {
            out.push(self);
        }
        for child in &self.children {
            child.collect_named(out);
        }
    }

    /// Indented outline of the named nodes, one per line: `rule start..end`.
    pub fn to_outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(0, &mut out);
        out
    }

    fn write_outline(&self, depth: usize, out: &mut String) {
        let depth = match self.rule {
            Some(rule) => {
                let _ = writeln!(
                    out,
                    "{}{} {}..{}",
                    "  ".repeat(depth),
                    rule,
                    self.span.start,
                    self.span.end
                );
                depth + 1
            }
            None => depth,
        };
        for child in &self.children {
            child.write_outline(depth, out);
        }
    }
}
