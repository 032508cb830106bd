//! Per-call translation options
//!
//! [`TranslationContext`] bundles everything `translate` accepts besides the
//! identifier, so call sites can build it fluently and reuse it.

use fluent_bundle::{FluentArgs, FluentValue};
use std::collections::HashMap;

/// Count, parameters, domain and locale for one translation
#[derive(Debug, Clone, Default)]
pub struct TranslationContext {
    /// Count for pluralization; injected as `count` unless a param named `count` exists
    pub count: Option<f64>,
    /// Named parameters for the template
    pub params: HashMap<String, FluentValue<'static>>,
    /// Explicit domain; skips domain extraction from the identifier
    pub domain: Option<String>,
    /// Explicit locale; overrides the translator's current locale
    pub locale: Option<String>,
}

impl TranslationContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create context with a count for pluralization
    pub fn with_count(count: impl Into<f64>) -> Self {
        Self {
            count: Some(count.into()),
            ..Default::default()
        }
    }

    /// Set the count
    pub fn set_count(mut self, count: impl Into<f64>) -> Self {
        self.count = Some(count.into());
        self
    }

    /// Add a named parameter
    pub fn add_param<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FluentValue<'static>>,
    {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Look up messages in this domain
    pub fn in_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Render for this locale
    pub fn for_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Convert the parameters to FluentArgs; `count` is left to the translator
    pub fn to_fluent_args(&self) -> FluentArgs<'_> {
        let mut args = FluentArgs::new();
        for (key, value) in &self.params {
            args.set(key, value.clone());
        }
        args
    }
}

/// Macro to create TranslationContext more easily
#[macro_export]
macro_rules! translation_context {
    () => {
        $crate::TranslationContext::new()
    };
    (count: $count:expr) => {
        $crate::TranslationContext::with_count($count)
    };
    (count: $count:expr, $($key:expr => $value:expr),+ $(,)?) => {{
        let mut context = $crate::TranslationContext::with_count($count);
        $(
            context = context.add_param($key, $value);
        )+
        context
    }};
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut context = $crate::TranslationContext::new();
        $(
            context = context.add_param($key, $value);
        )+
        context
    }};
}
