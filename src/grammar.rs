//! Grammar Definitions
//!
//!     A grammar is a fixed table of named PEG rules. Rules are data, not code: the engine in
//!     [parsing](crate::parsing) interprets them, and each benchmark layout only declares its
//!     table. See [egap], [natraj] and [sos] for the three layouts.
//!
//!     Rule forms:
//!
//!         Literal     exact text
//!         Pattern     regex anchored at the current offset
//!         Ref         another rule of the same grammar, by name
//!         Sequence    all members, contiguously, in order
//!         Choice      first member that matches; later members are never tried after that
//!         ZeroOrMore / OneOrMore / Optional   greedy repetition, no backtracking into it
//!
//!     Every grammar shares three rules: `ws` (optional whitespace), `blank` (whitespace-only
//!     region) and the start rule `expr = (text / blank)+`.

pub mod egap;
pub mod natraj;
pub mod sos;

use regex::Regex;
use std::collections::HashMap;

/// Name of the start rule shared by all grammars.
pub const START: &str = "expr";

/// A PEG expression.
#[derive(Debug, Clone)]
pub enum Rule {
    Literal(&'static str),
    Pattern(Regex),
    Ref(&'static str),
    Sequence(Vec<Rule>),
    Choice(Vec<Rule>),
    ZeroOrMore(Box<Rule>),
    OneOrMore(Box<Rule>),
    Optional(Box<Rule>),
}

impl Rule {
    /// Short description used in "expected ..." diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Rule::Literal(text) => format!("{:?}", text),
            Rule::Pattern(regex) => format!("~{:?}", regex.as_str()),
            Rule::Ref(name) => (*name).to_string(),
            Rule::Sequence(_) => "sequence".to_string(),
            Rule::Choice(_) => "choice".to_string(),
            Rule::ZeroOrMore(inner) => format!("{}*", inner.describe()),
            Rule::OneOrMore(inner) => format!("{}+", inner.describe()),
            Rule::Optional(inner) => format!("{}?", inner.describe()),
        }
    }

    fn references(&self, out: &mut Vec<&'static str>) {
        match self {
            Rule::Literal(_) | Rule::Pattern(_) => {}
            Rule::Ref(name) => out.push(*name),
            Rule::Sequence(members) | Rule::Choice(members) => {
                members.iter().for_each(|member| member.references(out))
            }
            Rule::ZeroOrMore(inner) | Rule::OneOrMore(inner) | Rule::Optional(inner) => {
                inner.references(out)
            }
        }
    }
}

pub fn lit(text: &'static str) -> Rule {
    Rule::Literal(text)
}

/// Regex leaf. Patterns are compile-time constants of this crate, so a bad one is a bug.
pub fn pattern(source: &str) -> Rule {
    let anchored = format!(r"\A(?:{})", source);
    Rule::Pattern(Regex::new(&anchored).expect("grammar pattern must compile"))
}

pub fn r(name: &'static str) -> Rule {
    Rule::Ref(name)
}

pub fn seq(members: Vec<Rule>) -> Rule {
    Rule::Sequence(members)
}

pub fn choice(members: Vec<Rule>) -> Rule {
    Rule::Choice(members)
}

pub fn many0(inner: Rule) -> Rule {
    Rule::ZeroOrMore(Box::new(inner))
}

pub fn many1(inner: Rule) -> Rule {
    Rule::OneOrMore(Box::new(inner))
}

pub fn opt(inner: Rule) -> Rule {
    Rule::Optional(Box::new(inner))
}

/// `a ws? b ws? c ws?` - every member followed by optional whitespace.
pub fn spaced(members: Vec<Rule>) -> Rule {
    let mut out = Vec::with_capacity(members.len() * 2);
    for member in members {
        out.push(member);
        out.push(opt(r("ws")));
    }
    seq(out)
}

/// `number ws?` repeated `count` times.
pub fn numbers(count: usize) -> Rule {
    spaced(vec![r("number"); count])
}

/// Immutable table of named rules for one layout.
#[derive(Debug)]
pub struct Grammar {
    name: &'static str,
    rules: HashMap<&'static str, Rule>,
    order: Vec<&'static str>,
}

impl Grammar {
    /// Start a grammar carrying the shared `expr`, `ws` and `blank` rules.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            rules: HashMap::new(),
            order: Vec::new(),
        }
        .rule(START, many1(choice(vec![r("text"), r("blank")])))
        .rule("ws", pattern(r"\s*"))
        .rule("blank", pattern(r"\s+"))
    }

    /// Add or replace a rule.
    pub fn rule(mut self, name: &'static str, rule: Rule) -> Self {
        if self.rules.insert(name, rule).is_none() {
            self.order.push(name);
        }
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// Rule names in declaration order.
    pub fn rule_names(&self) -> &[&'static str] {
        &self.order
    }

    /// Names referenced somewhere in the grammar but never defined.
    pub fn unresolved(&self) -> Vec<&'static str> {
        let mut referenced = Vec::new();
        for name in &self.order {
            if let Some(rule) = self.rules.get(name) {
                rule.references(&mut referenced);
            }
        }
        referenced.retain(|name| !self.rules.contains_key(name));
        referenced.sort_unstable();
        referenced.dedup();
        referenced
    }
}
