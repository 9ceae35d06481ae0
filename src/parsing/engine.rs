//! Parse Engine - PEG interpreter
//!
//!     Walks a [`Grammar`] over the source text, producing one [`ParseNode`] that spans the
//!     whole input. Semantics are plain PEG:
//!
//!         - Choice commits to the first alternative that matches.
//!         - Repetition is greedy; a zero-length iteration ends the loop.
//!         - Sequence members match contiguously; a failing member fails the sequence and
//!           the offset falls back to where the sequence started.
//!
//!     Failures are not reported where they happen. The engine remembers the furthest offset
//!     any leaf failed at, and which rules were being tried there; if the start rule fails or
//!     leaves trailing text, that is what the [`ParseError`] carries.

use crate::error::ParseError;
use crate::grammar::{Grammar, Rule, START};
use crate::parsing::node::ParseNode;
use std::collections::BTreeSet;

/// Parse `source` from the grammar's start rule. Trailing unmatched text is an error.
pub fn parse<'s>(grammar: &Grammar, source: &'s str) -> Result<ParseNode<'s>, ParseError> {
    let mut engine = Engine::new(grammar, source);
    let root = engine.match_named(START, 0);

    match root {
        Some(node) if node.span.end == source.len() => {
            log::trace!(
                "{}: parsed {} bytes into {} named nodes",
                grammar.name(),
                source.len(),
                node.named().len()
            );
            Ok(node)
        }
        Some(node) => {
            engine.record_failure(node.span.end, "end of input".to_string());
            Err(engine.into_error())
        }
        None => Err(engine.into_error()),
    }
}

struct Engine<'g, 's> {
    grammar: &'g Grammar,
    source: &'s str,
    rule_stack: Vec<&'static str>,
    furthest: usize,
    expected: BTreeSet<String>,
}

impl<'g, 's> Engine<'g, 's> {
    fn new(grammar: &'g Grammar, source: &'s str) -> Self {
        Self {
            grammar,
            source,
            rule_stack: Vec::new(),
            furthest: 0,
            expected: BTreeSet::new(),
        }
    }

    fn into_error(self) -> ParseError {
        ParseError::at(
            self.grammar.name(),
            self.source,
            self.furthest,
            self.expected.into_iter().collect(),
        )
    }

    fn record_failure(&mut self, pos: usize, expected: String) {
        if pos > self.furthest {
            self.furthest = pos;
            self.expected.clear();
        }
        if pos == self.furthest {
            self.expected.insert(expected);
        }
    }

    /// Label for a failing leaf: the literal itself, or the named rule that owns the pattern.
    fn failure_label(&self, rule: &Rule) -> String {
        match (rule, self.rule_stack.last()) {
            (Rule::Literal(_), _) | (_, None) => rule.describe(),
            (_, Some(name)) => (*name).to_string(),
        }
    }

    fn match_named(&mut self, name: &'static str, pos: usize) -> Option<ParseNode<'s>> {
        let grammar = self.grammar;
        let Some(rule) = grammar.get(name) else {
            self.record_failure(pos, format!("<undefined rule {}>", name));
            return None;
        };

        self.rule_stack.push(name);
        let matched = self.match_rule(rule, pos);
        self.rule_stack.pop();

        matched.map(|mut node| {
            node.rule = Some(name);
            node
        })
    }

    fn match_rule(&mut self, rule: &Rule, pos: usize) -> Option<ParseNode<'s>> {
        let source = self.source;
        let rest = &source[pos..];
        match rule {
            Rule::Literal(text) => {
                if rest.starts_with(text) {
                    Some(ParseNode::leaf(source, pos..pos + text.len()))
                } else {
                    let label = self.failure_label(rule);
                    self.record_failure(pos, label);
                    None
                }
            }
            Rule::Pattern(regex) => match regex.find(rest) {
                Some(found) => Some(ParseNode::leaf(source, pos..pos + found.end())),
                None => {
                    let label = self.failure_label(rule);
                    self.record_failure(pos, label);
                    None
                }
            },
            Rule::Ref(name) => self.match_named(*name, pos),
            Rule::Sequence(members) => {
                let mut children = Vec::with_capacity(members.len());
                let mut end = pos;
                for member in members {
                    let child = self.match_rule(member, end)?;
                    end = child.span.end;
                    children.push(child);
                }
                Some(ParseNode::branch(self.source, pos..end, children))
            }
            Rule::Choice(alternatives) => alternatives
                .iter()
                .find_map(|alternative| self.match_rule(alternative, pos))
                .map(|child| ParseNode::branch(self.source, pos..child.span.end, vec![child])),
            Rule::ZeroOrMore(inner) => Some(self.repeat(inner, pos)),
            Rule::OneOrMore(inner) => {
                let node = self.repeat(inner, pos);
                (!node.children.is_empty()).then_some(node)
            }
            Rule::Optional(inner) => {
                let children: Vec<_> = self.match_rule(inner, pos).into_iter().collect();
                let end = children.first().map_or(pos, |child| child.span.end);
                Some(ParseNode::branch(self.source, pos..end, children))
            }
        }
    }

    fn repeat(&mut self, inner: &Rule, pos: usize) -> ParseNode<'s> {
        let mut children = Vec::new();
        let mut end = pos;
        while let Some(child) = self.match_rule(inner, end) {
            let consumed = !child.is_empty();
            end = child.span.end;
            children.push(child);
            if !consumed {
                break;
            }
        }
        ParseNode::branch(self.source, pos..end, children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{choice, lit, many0, many1, opt, pattern, r, seq, spaced};

    /// `expr = (text / blank)+` over comma-free lists like `[1 2 3]`.
    fn list_grammar() -> Grammar {
        Grammar::new("list")
            .rule(
                "text",
                seq(vec![opt(r("ws")), lit("["), many0(r("item")), lit("]")]),
            )
            .rule("item", spaced(vec![r("number")]))
            .rule("number", choice(vec![r("sci"), r("int")]))
            .rule("sci", seq(vec![r("int"), pattern(r"D[-+]?\d\d")]))
            .rule("int", pattern(r"\d+"))
    }

    #[test]
    fn test_parses_and_names_nodes() {
        let grammar = list_grammar();
        let source = "[1 22 3D+01]";
        let root = parse(&grammar, source).unwrap();

        assert_eq!(root.name(), "expr");
        assert_eq!(root.span, 0..source.len());
        let numbers: Vec<&str> = root
            .named()
            .into_iter()
            .filter(|node| node.is("number"))
            .map(|node| node.text)
            .collect();
        assert_eq!(numbers, vec!["1", "22", "3D+01"]);
    }

    #[test]
    fn test_choice_keeps_single_child() {
        let grammar = list_grammar();
        let root = parse(&grammar, "[7]").unwrap();
        let number = root
            .named()
            .into_iter()
            .find(|node| node.is("number"))
            .unwrap();
        assert_eq!(number.children.len(), 1);
        assert!(number.children[0].is("int"));
    }

    #[test]
    fn test_exponent_alternative_wins_over_prefix() {
        let grammar = list_grammar();
        let root = parse(&grammar, "[3D+01 4]").unwrap();
        let sci: Vec<&str> = root
            .named()
            .into_iter()
            .filter(|node| node.is("sci"))
            .map(|node| node.text)
            .collect();
        assert_eq!(sci, vec!["3D+01"]);
    }

    #[test]
    fn test_blank_regions_around_text() {
        let grammar = list_grammar();
        let root = parse(&grammar, "\n\n[1]\n  \n[2]\n").unwrap();
        let texts = root
            .named()
            .into_iter()
            .filter(|node| node.is("text"))
            .count();
        assert_eq!(texts, 2);
    }

    #[test]
    fn test_trailing_text_is_rejected() {
        let grammar = list_grammar();
        let err = parse(&grammar, "[1 2] x").unwrap_err();
        assert_eq!(err.offset, 6);
        assert_eq!(err.grammar, "list");
    }

    #[test]
    fn test_reports_furthest_failure() {
        let grammar = list_grammar();
        let err = parse(&grammar, "[1 2 ?]").unwrap_err();
        assert_eq!(err.offset, 5);
        assert_eq!(err.line, 1);
        assert_eq!(err.column, 6);
        assert!(err.expected.contains(&"\"]\"".to_string()), "{:?}", err);
        assert!(err.expected.contains(&"int".to_string()), "{:?}", err);
    }

    #[test]
    fn test_empty_input_fails() {
        let grammar = list_grammar();
        assert!(parse(&grammar, "").is_err());
    }

    #[test]
    fn test_one_or_more_needs_a_match() {
        let grammar = Grammar::new("plus")
            .rule("text", many1(lit("a")))
            .rule("unused", many0(lit("b")));
        assert!(parse(&grammar, "aaa").is_ok());
        assert!(parse(&grammar, "b").is_err());
    }

    #[test]
    fn test_undefined_rule_is_a_failure() {
        let grammar = Grammar::new("broken");
        let err = parse(&grammar, "x").unwrap_err();
        assert!(err
            .expected
            .contains(&"<undefined rule text>".to_string()));
    }
}
