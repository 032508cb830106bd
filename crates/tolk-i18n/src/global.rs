//! Process-wide translate hook
//!
//! A single slot holding one [`Translator`], so code that cannot thread a
//! translator through can still call [`translate`] or the [`t!`](crate::t)
//! macro. Installing again replaces the previous translator; [`reset`] empties
//! the slot. The core types never read this state.

use crate::error::{I18nError, I18nResult};
use crate::translator::Translator;
use arc_swap::ArcSwapOption;
use fluent_bundle::FluentArgs;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::info;

static INSTALLED: Lazy<ArcSwapOption<Translator>> = Lazy::new(ArcSwapOption::empty);

/// Install `translator` as the global instance and return a handle to it
pub fn install(translator: Translator) -> Arc<Translator> {
    let translator = Arc::new(translator);
    if INSTALLED.swap(Some(Arc::clone(&translator))).is_some() {
        info!("Replaced global translator (locale {})", translator.locale());
    } else {
        info!("Installed global translator (locale {})", translator.locale());
    }
    translator
}

/// Remove the global instance
pub fn reset() {
    INSTALLED.store(None);
}

/// Get the installed translator, if any
pub fn installed() -> Option<Arc<Translator>> {
    INSTALLED.load_full()
}

/// Translate through the installed translator
pub fn translate(
    id: &str,
    count: Option<f64>,
    params: Option<FluentArgs<'_>>,
    domain: Option<&str>,
    locale: Option<&str>,
) -> I18nResult<String> {
    let translator = INSTALLED.load_full().ok_or(I18nError::NotInstalled)?;
    translator.translate(id, count, params, domain, locale)
}

/// Translate through the globally installed translator
///
/// ```rust
/// use tolk_i18n::{global, t, DomainTable, Translator};
///
/// let mut translator = Translator::new("en", None);
/// translator.load("en", DomainTable::flat([("apples", "{count, plural, one {# apple} other {# apples}}")]));
/// global::install(translator);
///
/// assert_eq!(t!("apples", 3).unwrap(), "3 apples");
/// assert_eq!(t!("Hi {name}", 0, "name" => "Ann").unwrap(), "Hi Ann");
/// global::reset();
/// ```
#[macro_export]
macro_rules! t {
    ($id:expr) => {
        $crate::global::translate($id, None, None, None, None)
    };
    ($id:expr, $count:expr) => {
        $crate::global::translate($id, Some(f64::from($count)), None, None, None)
    };
    ($id:expr, $count:expr, $($key:expr => $value:expr),+ $(,)?) => {
        $crate::global::translate($id, Some(f64::from($count)), $crate::fluent_args!($($key => $value),+), None, None)
    };
}
