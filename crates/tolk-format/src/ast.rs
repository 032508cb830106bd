//! Parsed representation of a MessageFormat pattern

use crate::plural::{PluralCategory, PluralKind};

/// A parsed message pattern
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Message {
    pub(crate) parts: Vec<Part>,
}

impl Message {
    /// The top-level parts of this message
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Whether the pattern is plain text with no arguments
    pub fn is_literal(&self) -> bool {
        self.parts.iter().all(|part| matches!(part, Part::Text(_)))
    }
}

/// One element of a message
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    /// Literal text, quotes already resolved
    Text(String),
    /// `{name}`
    Argument(String),
    /// `{name, number}` and `{name, number, style}`; the style is ignored
    Number(String),
    /// `#` inside a plural arm
    Pound,
    /// `{name, plural, ...}` or `{name, selectordinal, ...}`
    Plural {
        name: String,
        kind: PluralKind,
        offset: f64,
        arms: Vec<PluralArm>,
        other: Message,
    },
    /// `{name, select, ...}`
    Select {
        name: String,
        arms: Vec<SelectArm>,
        other: Message,
    },
}

/// What a plural arm matches on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PluralSelector {
    /// `=N`, compared against the value before the offset is applied
    Exact(f64),
    /// A CLDR category keyword other than `other`
    Category(PluralCategory),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PluralArm {
    pub selector: PluralSelector,
    pub message: Message,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectArm {
    pub key: String,
    pub message: Message,
}
