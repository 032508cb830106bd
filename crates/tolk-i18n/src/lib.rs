//! Locale and domain scoped message translation
//!
//! This crate resolves a message template for an identifier, locale and
//! domain, then renders it with the ICU MessageFormat engine from
//! `tolk-format`. It includes:
//!
//! - Per-locale catalogs, flat or nested by domain
//! - `domain.key` identifiers with a configurable default domain
//! - Fallback to the identifier itself when a locale or message is missing
//! - Automatic `count` parameter for plural messages
//! - An optional process-wide translate hook
//!
//! # Example
//!
//! ```rust
//! use tolk_i18n::{fluent_args, DomainTable, Translator};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut translator = Translator::new("en", None);
//! translator.load(
//!     "en",
//!     DomainTable::flat([(
//!         "photos",
//!         "{name}, You have {count, plural, =0 {no photos.} =1 {one photo.} other {# photos.}}",
//!     )]),
//! );
//!
//! let message = translator.translate("photos", Some(5.0), fluent_args!["name" => "Martin"], None, None)?;
//! assert_eq!(message, "Martin, You have 5 photos.");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod catalog;
pub mod context;
pub mod domain;
pub mod error;
pub mod global;
pub mod translator;

pub use catalog::{Catalog, DomainTable, Entry};
pub use context::TranslationContext;
pub use domain::extract_domain;
pub use error::{I18nError, I18nResult};
pub use translator::Translator;

// Re-export the formatter seam and argument types
pub use fluent_bundle::{FluentArgs, FluentValue};
pub use tolk_format::{FormatError, IcuFormatter, MessageFormatter};

/// Macro to create translate parameters; expands to `Option<FluentArgs>`
#[macro_export]
macro_rules! fluent_args {
    () => {
        None
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut args = $crate::FluentArgs::new();
        $(
            args.set($key, $value);
        )+
        Some(args)
    }};
}
