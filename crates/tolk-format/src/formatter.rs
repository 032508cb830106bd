//! Message rendering and the formatter seam used by the translator

use crate::ast::{Message, Part, PluralArm, PluralSelector, SelectArm};
use crate::error::{FormatError, FormatResult};
use crate::parser::Parser;
use crate::plural::{LocaleRules, PluralKind};
use fluent_bundle::types::{FluentNumber, FluentNumberOptions};
use fluent_bundle::{FluentArgs, FluentValue};
use std::borrow::Cow;
use tracing::trace;
use unic_langid::LanguageIdentifier;

/// Renders a message template for a locale
///
/// The translator treats implementations as a black box: it hands over the
/// resolved template, the effective locale tag and the normalized arguments,
/// and returns whatever comes back.
pub trait MessageFormatter: Send + Sync {
    /// Render `template` for `locale` with `args`
    fn format(&self, template: &str, locale: &str, args: &FluentArgs<'_>) -> FormatResult<String>;
}

/// ICU MessageFormat renderer backed by CLDR plural rules
#[derive(Debug, Default, Clone, Copy)]
pub struct IcuFormatter;

impl IcuFormatter {
    /// Create a new formatter
    pub fn new() -> Self {
        Self
    }
}

impl MessageFormatter for IcuFormatter {
    fn format(&self, template: &str, locale: &str, args: &FluentArgs<'_>) -> FormatResult<String> {
        let langid: LanguageIdentifier = locale
            .parse()
            .map_err(|_| FormatError::InvalidLocale(locale.to_string()))?;

        let message = Message::parse(template)?;
        let rules = LocaleRules::new(langid);

        trace!("Formatting {} part(s) for locale {}", message.parts.len(), locale);
        message.format(&rules, args)
    }
}

impl Message {
    /// Parse a pattern so it can be rendered repeatedly
    pub fn parse(pattern: &str) -> FormatResult<Self> {
        Parser::new(pattern).parse()
    }

    /// Render the message with the given plural rules and arguments
    pub fn format(&self, rules: &LocaleRules, args: &FluentArgs<'_>) -> FormatResult<String> {
        let mut out = String::new();
        self.write(&mut out, rules, args, None)?;
        Ok(out)
    }

    fn write(
        &self,
        out: &mut String,
        rules: &LocaleRules,
        args: &FluentArgs<'_>,
        pound: Option<&FluentNumber>,
    ) -> FormatResult<()> {
        for part in &self.parts {
            match part {
                Part::Text(text) => out.push_str(text),
                Part::Argument(name) => {
                    let value = lookup(args, name)?;
                    out.push_str(&render_value(name, value)?);
                }
                Part::Number(name) => {
                    let number = numeric(name, lookup(args, name)?)?;
                    out.push_str(&number.as_string());
                }
                Part::Pound => match pound {
                    Some(number) => out.push_str(&number.as_string()),
                    None => out.push('#'),
                },
                Part::Plural {
                    name,
                    kind,
                    offset,
                    arms,
                    other,
                } => {
                    let number = numeric(name, lookup(args, name)?)?;
                    let arm = select_plural(arms, other, *kind, *offset, number.value, rules);
                    let shown = FluentNumber::new(number.value - offset, number.options.clone());
                    arm.write(out, rules, args, Some(&shown))?;
                }
                Part::Select { name, arms, other } => {
                    let key = render_value(name, lookup(args, name)?)?;
                    select_arm(arms, other, &key).write(out, rules, args, None)?;
                }
            }
        }
        Ok(())
    }
}

/// Exact `=N` arms win over categories; `other` catches everything else
fn select_plural<'m>(
    arms: &'m [PluralArm],
    other: &'m Message,
    kind: PluralKind,
    offset: f64,
    value: f64,
    rules: &LocaleRules,
) -> &'m Message {
    let exact = arms
        .iter()
        .find(|arm| matches!(arm.selector, PluralSelector::Exact(n) if n == value));
    if let Some(arm) = exact {
        return &arm.message;
    }

    let category = rules.category(kind, value - offset);
    arms.iter()
        .find(|arm| arm.selector == PluralSelector::Category(category))
        .map_or(other, |arm| &arm.message)
}

fn select_arm<'m>(arms: &'m [SelectArm], other: &'m Message, key: &str) -> &'m Message {
    arms.iter()
        .find(|arm| arm.key == key)
        .map_or(other, |arm| &arm.message)
}

fn lookup<'a>(args: &'a FluentArgs<'_>, name: &str) -> FormatResult<&'a FluentValue<'a>> {
    args.iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .ok_or_else(|| FormatError::MissingArgument {
            name: name.to_string(),
        })
}

fn render_value<'v>(name: &str, value: &'v FluentValue<'_>) -> FormatResult<Cow<'v, str>> {
    match value {
        FluentValue::String(text) => Ok(Cow::Borrowed(text.as_ref())),
        FluentValue::Number(number) => Ok(number.as_string()),
        _ => Err(FormatError::UnsupportedValue {
            name: name.to_string(),
        }),
    }
}

/// Numbers pass through; numeric strings are accepted the way JavaScript coerces them
fn numeric(name: &str, value: &FluentValue<'_>) -> FormatResult<FluentNumber> {
    let not_a_number = || FormatError::NotANumber {
        name: name.to_string(),
    };

    match value {
        FluentValue::Number(number) => Ok(number.clone()),
        FluentValue::String(text) => text
            .trim()
            .parse::<f64>()
            .map(|value| FluentNumber::new(value, FluentNumberOptions::default()))
            .map_err(|_| not_a_number()),
        _ => Err(not_a_number()),
    }
}
