//! Recursive-descent parser for ICU MessageFormat patterns

use crate::ast::{Message, Part, PluralArm, PluralSelector, SelectArm};
use crate::error::{FormatError, FormatResult};
use crate::plural::{PluralCategory, PluralKind};

/// Where a (sub)message sits; decides how `}` and `#` are read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    TopLevel,
    PluralArm,
    SelectArm,
}

pub(crate) struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// Parse the whole pattern
    pub(crate) fn parse(mut self) -> FormatResult<Message> {
        self.parse_message(Context::TopLevel)
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn error(&self, message: impl Into<String>) -> FormatError {
        FormatError::Syntax {
            position: self.pos,
            message: message.into(),
        }
    }

    fn expect(&mut self, expected: char) -> FormatResult<()> {
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected '{expected}', found '{c}'"))),
            None => Err(self.error(format!("expected '{expected}', found end of pattern"))),
        }
    }

    fn parse_message(&mut self, context: Context) -> FormatResult<Message> {
        let mut parts = Vec::new();
        let mut text = String::new();

        while let Some(c) = self.peek() {
            match c {
                '{' => {
                    flush_text(&mut text, &mut parts);
                    parts.push(self.parse_argument()?);
                }
                '}' if context != Context::TopLevel => break,
                '#' if context == Context::PluralArm => {
                    self.bump();
                    flush_text(&mut text, &mut parts);
                    parts.push(Part::Pound);
                }
                '\'' => self.parse_apostrophe(context, &mut text),
                _ => {
                    self.bump();
                    text.push(c);
                }
            }
        }

        flush_text(&mut text, &mut parts);
        Ok(Message { parts })
    }

    /// `''` is a literal apostrophe; `'` before a syntax character opens a quote
    fn parse_apostrophe(&mut self, context: Context, text: &mut String) {
        self.bump();
        match self.peek() {
            Some('\'') => {
                self.bump();
                text.push('\'');
            }
            Some('{' | '}') => self.parse_quoted(text),
            Some('#') if context == Context::PluralArm => self.parse_quoted(text),
            _ => text.push('\''),
        }
    }

    /// Copy quoted text up to the closing apostrophe, or to the end of the pattern
    fn parse_quoted(&mut self, text: &mut String) {
        while let Some(c) = self.bump() {
            if c != '\'' {
                text.push(c);
                continue;
            }
            if self.peek() == Some('\'') {
                self.bump();
                text.push('\'');
            } else {
                return;
            }
        }
    }

    fn parse_identifier(&mut self) -> String {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| !c.is_whitespace() && !matches!(c, '{' | '}' | ',' | '#' | '\'' | '='))
        {
            self.bump();
        }
        self.src[start..self.pos].to_string()
    }

    fn parse_number(&mut self) -> FormatResult<f64> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        {
            self.bump();
        }
        let literal = &self.src[start..self.pos];
        literal
            .parse()
            .map_err(|_| self.error(format!("invalid number '{literal}'")))
    }

    fn parse_argument(&mut self) -> FormatResult<Part> {
        self.expect('{')?;
        self.skip_whitespace();

        let name = self.parse_identifier();
        if name.is_empty() {
            return Err(self.error("expected argument name"));
        }
        self.skip_whitespace();

        match self.peek() {
            Some('}') => {
                self.bump();
                Ok(Part::Argument(name))
            }
            Some(',') => {
                self.bump();
                self.skip_whitespace();
                let kind = self.parse_identifier();
                self.skip_whitespace();

                match kind.as_str() {
                    "number" => {
                        self.skip_style()?;
                        Ok(Part::Number(name))
                    }
                    "plural" => self.parse_plural(name, PluralKind::Cardinal),
                    "selectordinal" => self.parse_plural(name, PluralKind::Ordinal),
                    "select" => self.parse_select(name),
                    "" => Err(self.error("expected argument type")),
                    _ => Err(FormatError::UnsupportedArgumentType { name, kind }),
                }
            }
            _ => Err(self.error(format!("expected ',' or '}}' after argument '{name}'"))),
        }
    }

    /// Skip an optional `, style` up to the argument's closing brace
    fn skip_style(&mut self) -> FormatResult<()> {
        match self.bump() {
            Some('}') => Ok(()),
            Some(',') => {
                let mut depth = 0usize;
                while let Some(c) = self.bump() {
                    match c {
                        '{' => depth += 1,
                        '}' if depth == 0 => return Ok(()),
                        '}' => depth -= 1,
                        _ => {}
                    }
                }
                Err(self.error("unterminated argument style"))
            }
            _ => Err(self.error("expected ',' or '}' after argument type")),
        }
    }

    fn parse_arm_body(&mut self, context: Context) -> FormatResult<Message> {
        self.skip_whitespace();
        self.expect('{')?;
        let message = self.parse_message(context)?;
        self.expect('}')?;
        Ok(message)
    }

    fn parse_plural(&mut self, name: String, kind: PluralKind) -> FormatResult<Part> {
        self.expect(',')?;
        self.skip_whitespace();

        let offset = if self.src[self.pos..].starts_with("offset:") {
            self.pos += "offset:".len();
            self.skip_whitespace();
            self.parse_number()?
        } else {
            0.0
        };

        let mut arms: Vec<PluralArm> = Vec::new();
        let mut other = None;

        loop {
            self.skip_whitespace();
            let selector = match self.peek() {
                Some('}') => {
                    self.bump();
                    break;
                }
                None => return Err(self.error(format!("unterminated plural argument '{name}'"))),
                Some('=') => {
                    self.bump();
                    Some(PluralSelector::Exact(self.parse_number()?))
                }
                Some(_) => {
                    let keyword = self.parse_identifier();
                    match PluralCategory::from_keyword(&keyword) {
                        Some(PluralCategory::Other) => None,
                        Some(category) => Some(PluralSelector::Category(category)),
                        None => {
                            return Err(self.error(format!("invalid plural selector '{keyword}'")))
                        }
                    }
                }
            };

            let duplicate = match selector {
                Some(selector) => arms.iter().any(|arm| arm.selector == selector),
                None => other.is_some(),
            };
            if duplicate {
                return Err(self.error(format!("duplicate selector in plural argument '{name}'")));
            }

            let message = self.parse_arm_body(Context::PluralArm)?;
            match selector {
                Some(selector) => arms.push(PluralArm { selector, message }),
                None => other = Some(message),
            }
        }

        let other = other
            .ok_or_else(|| self.error(format!("plural argument '{name}' has no 'other' arm")))?;

        Ok(Part::Plural {
            name,
            kind,
            offset,
            arms,
            other,
        })
    }

    fn parse_select(&mut self, name: String) -> FormatResult<Part> {
        self.expect(',')?;

        let mut arms: Vec<SelectArm> = Vec::new();
        let mut other = None;

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('}') => {
                    self.bump();
                    break;
                }
                None => return Err(self.error(format!("unterminated select argument '{name}'"))),
                Some(_) => {}
            }

            let key = self.parse_identifier();
            if key.is_empty() {
                return Err(self.error(format!("expected selector in select argument '{name}'")));
            }
            let duplicate = if key == "other" {
                other.is_some()
            } else {
                arms.iter().any(|arm| arm.key == key)
            };
            if duplicate {
                return Err(self.error(format!("duplicate selector '{key}' in select argument '{name}'")));
            }

            let message = self.parse_arm_body(Context::SelectArm)?;
            if key == "other" {
                other = Some(message);
            } else {
                arms.push(SelectArm { key, message });
            }
        }

        let other = other
            .ok_or_else(|| self.error(format!("select argument '{name}' has no 'other' arm")))?;

        Ok(Part::Select { name, arms, other })
    }
}

fn flush_text(text: &mut String, parts: &mut Vec<Part>) {
    if !text.is_empty() {
        parts.push(Part::Text(std::mem::take(text)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> FormatResult<Message> {
        Parser::new(src).parse()
    }

    fn text(s: &str) -> Part {
        Part::Text(s.to_string())
    }

    #[test]
    fn test_plain_text() {
        let message = parse("Hello world").unwrap();
        assert_eq!(message.parts, vec![text("Hello world")]);
        assert!(message.is_literal());
    }

    #[test]
    fn test_dotted_identifier_is_plain_text() {
        let message = parse("missing.key").unwrap();
        assert_eq!(message.parts, vec![text("missing.key")]);
    }

    #[test]
    fn test_simple_argument() {
        let message = parse("Hi { name }!").unwrap();
        assert_eq!(
            message.parts,
            vec![text("Hi "), Part::Argument("name".to_string()), text("!")]
        );
    }

    #[test]
    fn test_apostrophe_escapes() {
        let message = parse("It''s '{literal}' and don't").unwrap();
        assert_eq!(message.parts, vec![text("It's {literal} and don't")]);
    }

    #[test]
    fn test_unmatched_close_brace_at_top_level_is_text() {
        let message = parse("a } b").unwrap();
        assert_eq!(message.parts, vec![text("a } b")]);
    }

    #[test]
    fn test_plural_with_exact_and_category_arms() {
        let message = parse("{count, plural, offset:1 =0 {none} one {# one} other {# many}}").unwrap();
        let Part::Plural { name, kind, offset, arms, other } = &message.parts[0] else {
            panic!("expected plural, got {:?}", message.parts);
        };
        assert_eq!(name, "count");
        assert_eq!(*kind, PluralKind::Cardinal);
        assert_eq!(*offset, 1.0);
        assert_eq!(arms.len(), 2);
        assert_eq!(arms[0].selector, PluralSelector::Exact(0.0));
        assert_eq!(arms[1].selector, PluralSelector::Category(PluralCategory::One));
        assert_eq!(other.parts, vec![Part::Pound, text(" many")]);
    }

    #[test]
    fn test_pound_is_literal_outside_plural() {
        let message = parse("# {kind, select, a {#} other {x}}").unwrap();
        assert_eq!(message.parts[0], text("# "));
        let Part::Select { arms, .. } = &message.parts[1] else {
            panic!("expected select");
        };
        assert_eq!(arms[0].message.parts, vec![text("#")]);
    }

    #[test]
    fn test_number_style_is_skipped() {
        let message = parse("{n, number, ::currency/EUR}!").unwrap();
        assert_eq!(message.parts, vec![Part::Number("n".to_string()), text("!")]);
    }

    #[test]
    fn test_missing_other_is_rejected() {
        let err = parse("{count, plural, one {x}}").unwrap_err();
        assert!(matches!(err, FormatError::Syntax { .. }));

        let err = parse("{g, select, male {x}}").unwrap_err();
        assert!(matches!(err, FormatError::Syntax { .. }));
    }

    #[test]
    fn test_duplicate_selector_is_rejected() {
        let err = parse("{count, plural, one {a} one {b} other {c}}").unwrap_err();
        assert!(matches!(err, FormatError::Syntax { .. }));
    }

    #[test]
    fn test_unclosed_argument_is_rejected() {
        assert!(matches!(parse("Hi {name"), Err(FormatError::Syntax { .. })));
        assert!(matches!(parse("{}"), Err(FormatError::Syntax { .. })));
        assert!(matches!(
            parse("{count, plural, other {x}"),
            Err(FormatError::Syntax { .. })
        ));
    }

    #[test]
    fn test_date_is_unsupported() {
        let err = parse("{when, date, short}").unwrap_err();
        assert_eq!(
            err,
            FormatError::UnsupportedArgumentType {
                name: "when".to_string(),
                kind: "date".to_string(),
            }
        );
    }
}
