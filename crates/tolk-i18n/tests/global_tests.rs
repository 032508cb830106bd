//! Tests for the process-wide translate hook
//!
//! The hook is global state, so the whole lifecycle runs in one test.

use tolk_i18n::{global, t, DomainTable, I18nError, Translator};

#[test]
fn test_install_translate_replace_reset() {
    global::reset();
    assert!(global::installed().is_none());
    assert!(matches!(t!("hello"), Err(I18nError::NotInstalled)));

    let mut english = Translator::new("en", None);
    english.load("en", DomainTable::flat([("hello", "Hello {name}")]));
    let handle = global::install(english);
    assert_eq!(handle.locale(), "en");

    assert_eq!(t!("hello", 0, "name" => "Ann").unwrap(), "Hello Ann");
    assert_eq!(
        global::translate("{count, plural, one {# day} other {# days}}", Some(1.0), None, None, None).unwrap(),
        "1 day"
    );

    let mut slovak = Translator::new("sk", None);
    slovak.load("sk", DomainTable::flat([("hello", "Ahoj {name}")]));
    global::install(slovak);

    assert_eq!(t!("hello", 0, "name" => "Ann").unwrap(), "Ahoj Ann");
    assert_eq!(global::installed().map(|t| t.locale().to_string()), Some("sk".to_string()));

    global::reset();
    assert!(matches!(t!("hello", 1), Err(I18nError::NotInstalled)));
}
