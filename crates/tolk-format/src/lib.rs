//! ICU MessageFormat rendering for tolk
//!
//! This crate is the formatting engine the translator delegates to. It
//! understands the MessageFormat syntax used by `intl-messageformat`:
//!
//! - Simple placeholders: `{name}`
//! - Plural arguments with exact matches and CLDR categories:
//!   `{count, plural, =0 {none} one {# item} other {# items}}`
//! - Ordinal plurals (`selectordinal`) and `select`
//! - Apostrophe quoting (`''`, `'{literal}'`)
//!
//! Plural categories are taken from CLDR data through `intl_pluralrules`.
//!
//! # Example
//!
//! ```rust
//! use tolk_format::{FluentArgs, IcuFormatter, MessageFormatter};
//!
//! let mut args = FluentArgs::new();
//! args.set("count", 3);
//!
//! let out = IcuFormatter::new()
//!     .format("{count, plural, one {# photo} other {# photos}}", "en", &args)
//!     .unwrap();
//! assert_eq!(out, "3 photos");
//! ```

pub mod ast;
pub mod error;
pub mod formatter;
mod parser;
pub mod plural;

pub use ast::Message;
pub use error::{FormatError, FormatResult};
pub use formatter::{IcuFormatter, MessageFormatter};
pub use plural::{LocaleRules, PluralCategory, PluralKind};

// Re-export the argument types used across the formatter boundary
pub use fluent_bundle::{FluentArgs, FluentValue};
