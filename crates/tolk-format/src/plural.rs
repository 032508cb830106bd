//! Plural category selection for different languages
//!
//! Category tables come from CLDR through `intl_pluralrules`; this module only
//! maps a locale onto those tables and falls back to `other` when a language
//! has no rules.

use intl_pluralrules::{PluralCategory as CldrCategory, PluralRuleType, PluralRules};
use std::fmt;
use tracing::debug;
use unic_langid::LanguageIdentifier;

/// Grammatical plural class selected for a number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    /// Get the MessageFormat keyword for this category
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }

    /// Parse a category from its MessageFormat keyword
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "zero" => Some(Self::Zero),
            "one" => Some(Self::One),
            "two" => Some(Self::Two),
            "few" => Some(Self::Few),
            "many" => Some(Self::Many),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl From<CldrCategory> for PluralCategory {
    fn from(category: CldrCategory) -> Self {
        match category {
            CldrCategory::ZERO => Self::Zero,
            CldrCategory::ONE => Self::One,
            CldrCategory::TWO => Self::Two,
            CldrCategory::FEW => Self::Few,
            CldrCategory::MANY => Self::Many,
            CldrCategory::OTHER => Self::Other,
        }
    }
}

/// Which rule set a `plural`-style argument selects with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralKind {
    /// `plural`: counts of things
    Cardinal,
    /// `selectordinal`: positions (1st, 2nd, ...)
    Ordinal,
}

impl PluralKind {
    fn rule_type(self) -> PluralRuleType {
        match self {
            Self::Cardinal => PluralRuleType::CARDINAL,
            Self::Ordinal => PluralRuleType::ORDINAL,
        }
    }
}

/// Cardinal and ordinal rules resolved for one locale
pub struct LocaleRules {
    langid: LanguageIdentifier,
    cardinal: Option<PluralRules>,
    ordinal: Option<PluralRules>,
}

impl fmt::Debug for LocaleRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleRules")
            .field("langid", &self.langid.to_string())
            .field("cardinal", &self.cardinal.is_some())
            .field("ordinal", &self.ordinal.is_some())
            .finish()
    }
}

impl LocaleRules {
    /// Resolve plural rules for a language identifier
    pub fn new(langid: LanguageIdentifier) -> Self {
        let cardinal = Self::resolve(&langid, PluralKind::Cardinal);
        let ordinal = Self::resolve(&langid, PluralKind::Ordinal);

        Self {
            langid,
            cardinal,
            ordinal,
        }
    }

    /// Try the full identifier first, then the bare language subtag
    fn resolve(langid: &LanguageIdentifier, kind: PluralKind) -> Option<PluralRules> {
        if let Ok(rules) = PluralRules::create(langid.clone(), kind.rule_type()) {
            return Some(rules);
        }

        let language = LanguageIdentifier::from_parts(langid.language, None, None, &[]);
        match PluralRules::create(language, kind.rule_type()) {
            Ok(rules) => Some(rules),
            Err(_) => {
                debug!("No {:?} plural rules for {}, selecting 'other'", kind, langid);
                None
            }
        }
    }

    /// The language identifier these rules were resolved for
    pub fn langid(&self) -> &LanguageIdentifier {
        &self.langid
    }

    /// Whether CLDR rules were found for the given kind
    pub fn has_rules(&self, kind: PluralKind) -> bool {
        match kind {
            PluralKind::Cardinal => self.cardinal.is_some(),
            PluralKind::Ordinal => self.ordinal.is_some(),
        }
    }

    /// Get the plural category of `value` for this locale
    pub fn category(&self, kind: PluralKind, value: f64) -> PluralCategory {
        let rules = match kind {
            PluralKind::Cardinal => self.cardinal.as_ref(),
            PluralKind::Ordinal => self.ordinal.as_ref(),
        };

        rules
            .and_then(|rules| rules.select(value).ok())
            .map_or(PluralCategory::Other, PluralCategory::from)
    }
}
