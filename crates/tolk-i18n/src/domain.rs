//! Splitting `domain.key` message identifiers

/// Split a message identifier into `(domain, key)`
///
/// Without a dot the identifier is the key and `default_domain` applies.
/// Otherwise the text before the first dot is the domain and everything after
/// it, further dots included, is the key. An empty domain counts as no domain.
pub fn extract_domain<'a>(id: &'a str, default_domain: Option<&'a str>) -> (Option<&'a str>, &'a str) {
    match id.split_once('.') {
        None => (non_empty(default_domain), id),
        Some((domain, key)) => (non_empty(Some(domain)), key),
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}
