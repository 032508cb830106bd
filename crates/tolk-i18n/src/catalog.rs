//! Locale-scoped message catalogs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Messages loaded for one locale
///
/// A table is flat (`{id: template}`), nested by domain
/// (`{domain: {id: template}}`), or a mix of both at the top level. An
/// unqualified lookup only matches a top-level template and a
/// domain-qualified lookup only matches a template inside that domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DomainTable {
    /// Message id to template
    Flat(HashMap<String, String>),
    /// Domain to message id to template
    Domained(HashMap<String, HashMap<String, String>>),
    /// Top-level templates side by side with domain groups
    Mixed(HashMap<String, Entry>),
}

/// One top-level value of a [`DomainTable::Mixed`] table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    /// Template for an unqualified id
    Template(String),
    /// Message id to template within a domain
    Domain(HashMap<String, String>),
}

impl Default for DomainTable {
    fn default() -> Self {
        Self::Flat(HashMap::new())
    }
}

impl DomainTable {
    /// Build a flat table from `(id, template)` pairs
    pub fn flat<I, K, V>(messages: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Flat(
            messages
                .into_iter()
                .map(|(id, template)| (id.into(), template.into()))
                .collect(),
        )
    }

    /// Build a domained table from `(domain, messages)` pairs
    pub fn domained<I, D, M, K, V>(domains: I) -> Self
    where
        I: IntoIterator<Item = (D, M)>,
        D: Into<String>,
        M: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Domained(
            domains
                .into_iter()
                .map(|(domain, messages)| {
                    let messages = messages
                        .into_iter()
                        .map(|(id, template)| (id.into(), template.into()))
                        .collect();
                    (domain.into(), messages)
                })
                .collect(),
        )
    }

    /// Look up a template; `None` when the domain or id is absent
    pub fn get(&self, domain: Option<&str>, id: &str) -> Option<&str> {
        let template = match (self, domain) {
            (Self::Flat(messages), None) => messages.get(id),
            (Self::Domained(domains), Some(domain)) => {
                domains.get(domain).and_then(|messages| messages.get(id))
            }
            (Self::Mixed(entries), None) => match entries.get(id) {
                Some(Entry::Template(template)) => Some(template),
                _ => None,
            },
            (Self::Mixed(entries), Some(domain)) => match entries.get(domain) {
                Some(Entry::Domain(messages)) => messages.get(id),
                _ => None,
            },
            _ => None,
        };
        template.map(String::as_str)
    }

    /// Number of templates in the table
    pub fn len(&self) -> usize {
        match self {
            Self::Flat(messages) => messages.len(),
            Self::Domained(domains) => domains.values().map(HashMap::len).sum(),
            Self::Mixed(entries) => entries
                .values()
                .map(|entry| match entry {
                    Entry::Template(_) => 1,
                    Entry::Domain(messages) => messages.len(),
                })
                .sum(),
        }
    }

    /// Whether the table holds no templates
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Message templates for every loaded locale
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: HashMap<String, DomainTable>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `translations` for `locale`, replacing any earlier table wholesale
    pub fn load(&mut self, locale: impl Into<String>, translations: DomainTable) {
        let locale = locale.into();
        let size = translations.len();

        if self.tables.insert(locale.clone(), translations).is_some() {
            debug!("Replaced catalog for locale {} ({} messages)", locale, size);
        } else {
            debug!("Loaded catalog for locale {} ({} messages)", locale, size);
        }
    }

    /// Check if a table exists for the locale, even an empty one
    pub fn has_locale(&self, locale: &str) -> bool {
        self.tables.contains_key(locale)
    }

    /// Check if a template exists for `(locale, domain, id)`
    pub fn has_message(&self, locale: &str, domain: Option<&str>, id: &str) -> bool {
        self.get_message(locale, domain, id).is_some()
    }

    /// Get the template for `(locale, domain, id)`
    pub fn get_message(&self, locale: &str, domain: Option<&str>, id: &str) -> Option<&str> {
        self.tables.get(locale)?.get(domain, id)
    }

    /// Get the whole table for a locale
    pub fn table(&self, locale: &str) -> Option<&DomainTable> {
        self.tables.get(locale)
    }

    /// Iterate over the loaded locale tags
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Number of loaded locales
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether no locale has been loaded
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.load("en", DomainTable::flat([("hello", "Hello"), ("a.b", "dotted")]));
        catalog.load(
            "sk",
            DomainTable::domained([("app", vec![("hello", "Ahoj")]), ("empty", vec![])]),
        );
        catalog
    }

    #[test]
    fn test_has_locale_includes_empty_tables() {
        let mut catalog = catalog();
        catalog.load("de", DomainTable::default());

        assert!(catalog.has_locale("en"));
        assert!(catalog.has_locale("de"));
        assert!(!catalog.has_locale("fr"));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_flat_lookup() {
        let catalog = catalog();
        assert_eq!(catalog.get_message("en", None, "hello"), Some("Hello"));
        assert!(catalog.has_message("en", None, "a.b"));
        assert!(!catalog.has_message("en", None, "missing"));
        assert!(!catalog.has_message("en", Some("hello"), "x"));
    }

    #[test]
    fn test_domained_lookup() {
        let catalog = catalog();
        assert_eq!(catalog.get_message("sk", Some("app"), "hello"), Some("Ahoj"));
        assert!(!catalog.has_message("sk", Some("app"), "missing"));
        assert!(!catalog.has_message("sk", Some("empty"), "hello"));
        assert!(!catalog.has_message("sk", Some("other"), "hello"));
        assert!(!catalog.has_message("sk", None, "app"));
    }

    #[test]
    fn test_missing_locale_never_matches() {
        let catalog = catalog();
        assert!(!catalog.has_message("fr", None, "hello"));
        assert_eq!(catalog.get_message("fr", Some("app"), "hello"), None);
    }

    #[test]
    fn test_load_replaces_instead_of_merging() {
        let mut catalog = catalog();
        catalog.load("en", DomainTable::flat([("bye", "Bye")]));

        assert!(catalog.has_message("en", None, "bye"));
        assert!(!catalog.has_message("en", None, "hello"));
        assert_eq!(catalog.table("en").map(DomainTable::len), Some(1));
    }

    #[test]
    fn test_table_shapes_from_json() {
        let flat: DomainTable = serde_json::from_str(r#"{"test1": "TEST1"}"#).unwrap();
        assert_eq!(flat, DomainTable::flat([("test1", "TEST1")]));

        let nested: DomainTable =
            serde_json::from_str(r#"{"app": {"title": "Title"}, "errors": {}}"#).unwrap();
        assert_eq!(nested.get(Some("app"), "title"), Some("Title"));
        assert_eq!(nested.len(), 1);

        let empty: DomainTable = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());

        let invalid = serde_json::from_str::<DomainTable>(r#"{"a": "x", "b": 1}"#);
        assert!(invalid.is_err());
    }

    #[test]
    fn test_mixed_table_resolves_both_kinds_of_id() {
        let mixed: DomainTable =
            serde_json::from_str(r#"{"greeting": "Hi", "app": {"title": "Title"}}"#).unwrap();
        assert!(matches!(mixed, DomainTable::Mixed(_)));
        assert_eq!(mixed.len(), 2);

        assert_eq!(mixed.get(None, "greeting"), Some("Hi"));
        assert_eq!(mixed.get(Some("app"), "title"), Some("Title"));
        assert_eq!(mixed.get(None, "app"), None);
        assert_eq!(mixed.get(Some("greeting"), "title"), None);
        assert_eq!(mixed.get(Some("app"), "missing"), None);
    }
}
