//! Error types for translation operations

use thiserror::Error;
use tolk_format::FormatError;

/// Errors that can occur while loading catalogs or translating
///
/// Missing locales and missing messages are not errors: they fall back to
/// rendering the identifier itself.
#[derive(Error, Debug)]
pub enum I18nError {
    /// The formatting engine rejected the template or its arguments
    #[error("Failed to format message: {0}")]
    Format(#[from] FormatError),

    /// A JSON catalog did not have the `{id: template}` or
    /// `{domain: {id: template}}` shape
    #[error("Failed to parse catalog for locale {locale}: {source}")]
    CatalogParse {
        locale: String,
        #[source]
        source: serde_json::Error,
    },

    /// The global translate hook was used before a translator was installed
    #[error("No translator installed")]
    NotInstalled,
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;
