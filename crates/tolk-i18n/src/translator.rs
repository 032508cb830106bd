//! Message resolution and rendering

use crate::catalog::{Catalog, DomainTable};
use crate::context::TranslationContext;
use crate::domain::{extract_domain, non_empty};
use crate::error::{I18nError, I18nResult};
use fluent_bundle::FluentArgs;
use std::fmt;
use std::sync::Arc;
use tolk_common::TranslatorConfig;
use tolk_format::{IcuFormatter, MessageFormatter};
use tracing::{debug, info};

/// Resolves message identifiers against loaded catalogs and renders them
///
/// Lookups never fail: when the locale or the message is missing the
/// identifier itself is used as the template. Only errors from the formatter
/// reach the caller.
pub struct Translator {
    /// Locale used when a call does not name one
    locale: String,
    /// Domain for identifiers without a `domain.` prefix
    default_domain: Option<String>,
    catalog: Catalog,
    formatter: Arc<dyn MessageFormatter>,
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("locale", &self.locale)
            .field("default_domain", &self.default_domain)
            .field("catalog", &self.catalog)
            .field("formatter", &"dyn MessageFormatter")
            .finish()
    }
}

impl Translator {
    /// Create a translator rendering with [`IcuFormatter`]
    pub fn new(locale: impl Into<String>, default_domain: Option<&str>) -> Self {
        Self::with_formatter(locale, default_domain, Arc::new(IcuFormatter::new()))
    }

    /// Create a translator with a custom formatting engine
    pub fn with_formatter(
        locale: impl Into<String>,
        default_domain: Option<&str>,
        formatter: Arc<dyn MessageFormatter>,
    ) -> Self {
        let translator = Self {
            locale: locale.into(),
            default_domain: non_empty(default_domain).map(str::to_string),
            catalog: Catalog::new(),
            formatter,
        };

        info!(
            "Translator initialized with locale {} and default domain {:?}",
            translator.locale, translator.default_domain
        );
        translator
    }

    /// Create a translator from configuration
    pub fn from_config(config: &TranslatorConfig) -> Self {
        Self::new(config.locale.clone(), config.default_domain.as_deref())
    }

    /// Change the current locale; the tag is not validated
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
        debug!("Current locale set to {}", self.locale);
    }

    /// Get the current locale
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Get the default domain
    pub fn default_domain(&self) -> Option<&str> {
        self.default_domain.as_deref()
    }

    /// Get the loaded catalogs
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Load messages for a locale, replacing any earlier table for it
    pub fn load(&mut self, locale: impl Into<String>, translations: DomainTable) {
        self.catalog.load(locale, translations);
    }

    /// Parse a JSON catalog and load it; the catalog is untouched on error
    pub fn load_json(&mut self, locale: impl Into<String>, json: &str) -> I18nResult<()> {
        let locale = locale.into();
        let translations = serde_json::from_str(json).map_err(|source| I18nError::CatalogParse {
            locale: locale.clone(),
            source,
        })?;

        self.load(locale, translations);
        Ok(())
    }

    /// Check if messages were loaded for the locale
    pub fn has_locale(&self, locale: &str) -> bool {
        self.catalog.has_locale(locale)
    }

    /// Check if `translate` would find a catalog template for these arguments
    pub fn has_message(&self, id: &str, domain: Option<&str>, locale: Option<&str>) -> bool {
        self.find_template(id, domain, self.effective_locale(locale))
            .is_some()
    }

    /// Split an identifier using this translator's default domain
    pub fn extract_domain<'a>(&'a self, id: &'a str) -> (Option<&'a str>, &'a str) {
        extract_domain(id, self.default_domain())
    }

    /// Translate a message
    ///
    /// `count` defaults to 0 and is added to `params` as `count` unless the
    /// caller already supplied that parameter. When `domain` is given the
    /// identifier is used as-is; otherwise a `domain.` prefix is split off.
    pub fn translate(
        &self,
        id: &str,
        count: Option<f64>,
        params: Option<FluentArgs<'_>>,
        domain: Option<&str>,
        locale: Option<&str>,
    ) -> I18nResult<String> {
        let count = count.unwrap_or(0.0);
        let locale = self.effective_locale(locale);

        let template = match self.find_template(id, domain, locale) {
            Some(template) => template,
            None => id,
        };

        let mut params = params.unwrap_or_default();
        if params.get("count").is_none() {
            params.set("count", count);
        }

        Ok(self.formatter.format(template, locale, &params)?)
    }

    /// Translate a message with options collected in a context
    pub fn translate_with_context(&self, id: &str, context: &TranslationContext) -> I18nResult<String> {
        self.translate(
            id,
            context.count,
            Some(context.to_fluent_args()),
            context.domain.as_deref(),
            context.locale.as_deref(),
        )
    }

    fn effective_locale<'a>(&'a self, locale: Option<&'a str>) -> &'a str {
        non_empty(locale).unwrap_or(&self.locale)
    }

    /// The catalog template for a call, or `None` when the identifier must be used
    fn find_template<'a>(&'a self, id: &'a str, domain: Option<&'a str>, locale: &str) -> Option<&'a str> {
        if !self.catalog.has_locale(locale) {
            debug!("Locale {} not loaded, using '{}' as template", locale, id);
            return None;
        }

        let (domain, key) = match non_empty(domain) {
            Some(domain) => (Some(domain), id),
            None => self.extract_domain(id),
        };

        let template = self.catalog.get_message(locale, domain, key);
        if template.is_none() {
            debug!(
                "Message '{}' (domain {:?}) not found for locale {}, using '{}' as template",
                key, domain, locale, id
            );
        }
        template
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluent_bundle::FluentValue;
    use std::sync::Mutex;
    use tolk_format::FormatResult;

    /// Formatter that records what it was asked to render
    #[derive(Default)]
    struct RecordingFormatter {
        calls: Mutex<Vec<(String, String, Vec<(String, String)>)>>,
    }

    impl MessageFormatter for RecordingFormatter {
        fn format(&self, template: &str, locale: &str, args: &FluentArgs<'_>) -> FormatResult<String> {
            let args = args
                .iter()
                .map(|(key, value)| {
                    let value = match value {
                        FluentValue::String(s) => s.to_string(),
                        FluentValue::Number(n) => n.as_string().into_owned(),
                        _ => "?".to_string(),
                    };
                    (key.to_string(), value)
                })
                .collect();
            self.calls
                .lock()
                .unwrap()
                .push((template.to_string(), locale.to_string(), args));
            Ok(template.to_string())
        }
    }

    fn recording(default_domain: Option<&str>) -> (Translator, Arc<RecordingFormatter>) {
        let formatter = Arc::new(RecordingFormatter::default());
        let translator = Translator::with_formatter("en", default_domain, formatter.clone());
        (translator, formatter)
    }

    fn last_call(formatter: &RecordingFormatter) -> (String, String, Vec<(String, String)>) {
        formatter.calls.lock().unwrap().last().cloned().unwrap()
    }

    #[test]
    fn test_count_defaults_to_zero() {
        let (translator, formatter) = recording(None);
        translator.translate("hello", None, None, None, None).unwrap();

        let (template, locale, args) = last_call(&formatter);
        assert_eq!(template, "hello");
        assert_eq!(locale, "en");
        assert_eq!(args, vec![("count".to_string(), "0".to_string())]);
    }

    #[test]
    fn test_explicit_count_param_is_kept() {
        let (translator, formatter) = recording(None);
        let mut params = FluentArgs::new();
        params.set("count", 7);
        translator.translate("hello", Some(2.0), Some(params), None, None).unwrap();

        let (_, _, args) = last_call(&formatter);
        assert_eq!(args, vec![("count".to_string(), "7".to_string())]);
    }

    #[test]
    fn test_fallback_keeps_the_original_identifier() {
        let (mut translator, formatter) = recording(None);
        translator.load("en", DomainTable::domained([("app", vec![("title", "Title")])]));

        translator.translate("app.missing.key", None, None, None, None).unwrap();
        assert_eq!(last_call(&formatter).0, "app.missing.key");

        translator.translate("app.title", None, None, None, None).unwrap();
        assert_eq!(last_call(&formatter).0, "Title");
    }

    #[test]
    fn test_explicit_domain_skips_extraction() {
        let (mut translator, formatter) = recording(None);
        translator.load("en", DomainTable::domained([("app", vec![("menu.open", "Open")])]));

        translator.translate("menu.open", None, None, Some("app"), None).unwrap();
        assert_eq!(last_call(&formatter).0, "Open");
    }

    #[test]
    fn test_empty_domain_argument_means_extract() {
        let (mut translator, formatter) = recording(None);
        translator.load("en", DomainTable::domained([("app", vec![("title", "Title")])]));

        translator.translate("app.title", None, None, Some(""), None).unwrap();
        assert_eq!(last_call(&formatter).0, "Title");
    }

    #[test]
    fn test_default_domain_applies_to_undotted_ids() {
        let (mut translator, formatter) = recording(Some("messages"));
        translator.load("en", DomainTable::domained([("messages", vec![("hello", "Hello!")])]));

        translator.translate("hello", None, None, None, None).unwrap();
        assert_eq!(last_call(&formatter).0, "Hello!");
        assert!(translator.has_message("hello", None, None));
        assert!(translator.has_message("messages.hello", None, None));
        assert!(!translator.has_message("hello", None, Some("sk")));
    }

    #[test]
    fn test_locale_argument_overrides_current_locale() {
        let (mut translator, formatter) = recording(None);
        translator.load("sk", DomainTable::flat([("hello", "Ahoj")]));

        translator.translate("hello", None, None, None, Some("sk")).unwrap();
        let (template, locale, _) = last_call(&formatter);
        assert_eq!(template, "Ahoj");
        assert_eq!(locale, "sk");

        translator.translate("hello", None, None, None, Some("")).unwrap();
        assert_eq!(last_call(&formatter).1, "en");
    }

    #[test]
    fn test_unloaded_locale_skips_lookup() {
        let (mut translator, formatter) = recording(None);
        translator.load("sk", DomainTable::flat([("hello", "Ahoj")]));

        translator.translate("hello", None, None, None, None).unwrap();
        assert_eq!(last_call(&formatter).0, "hello");
    }

    #[test]
    fn test_load_json_rejects_malformed_catalogs() {
        let (mut translator, _) = recording(None);
        let err = translator.load_json("en", r#"{"a": 1}"#).unwrap_err();
        assert!(matches!(err, I18nError::CatalogParse { ref locale, .. } if locale == "en"));
        assert!(!translator.has_locale("en"));
    }
}
