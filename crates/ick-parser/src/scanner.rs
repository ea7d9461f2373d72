//! Splits markup into literal spans and custom tags.
//!
//! Custom tags are self-closing elements named with the reserved prefix:
//!
//! ```text
//! <ick-{name} [boolattribute] [attribute=[']value['] ...]/>
//! ```
//!
//! Everything else is passed through untouched.

use ick_core::{normalize, Attributes, GrammarError, ParseError, Span, TagSyntaxError, ICK_PREFIX};

use crate::grammar::parse_attributes_at;
use crate::lexer::*;

/// A piece of scanned input.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment<'a> {
    Literal(&'a str),
    Tag(IckTag<'a>),
}

/// A parsed custom tag.
#[derive(Debug, Clone, PartialEq)]
pub struct IckTag<'a> {
    /// Full lower-cased tag name, prefix included.
    pub name: String,
    /// The tag as written in the input.
    pub source: &'a str,
    pub attributes: Attributes,
    pub span: Span,
}

/// Lazy, left-to-right scanner over markup. Stops after the first error.
pub struct Scanner<'a> {
    input: &'a str,
    rest: &'a str,
    failed: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            rest: input,
            failed: false,
        }
    }

    fn offset(&self, rest: &str) -> usize {
        self.input.len() - rest.len()
    }

    fn next_literal(&mut self) -> &'a str {
        match literal(self.rest) {
            Ok((rest, text)) => {
                self.rest = rest;
                text
            }
            Err(_) => std::mem::take(&mut self.rest),
        }
    }

    fn next_tag(&mut self) -> Result<IckTag<'a>, ParseError> {
        let start = self.offset(self.rest);
        let (after_open, _) = tag_open(self.rest).map_err(|_| TagSyntaxError::MissingTagName {
            offset: start,
        })?;
        let (after_name, short) = tag_name(after_open).unwrap_or((after_open, ""));
        if short.is_empty() {
            return Err(TagSyntaxError::MissingTagName { offset: start }.into());
        }
        let name = normalize(&format!("{ICK_PREFIX}{short}"));

        let (attributes, rest) = match after_name.chars().next() {
            _ if tag_close(after_name).is_ok() => {
                (Attributes::new(), &after_name[TAG_CLOSE.len()..])
            }
            Some(c) if c.is_whitespace() => {
                let close = match find_close(after_name) {
                    TagEnd::Close(close) => close,
                    TagEnd::OpenQuote(quote) => {
                        return Err(GrammarError::MissingEndingQuote {
                            offset: self.offset(&after_name[quote..]),
                        }
                        .into());
                    }
                    TagEnd::Missing => {
                        return Err(TagSyntaxError::NotSelfClosed { name, offset: start }.into());
                    }
                };
                let attributes =
                    parse_attributes_at(&after_name[..close], self.offset(after_name))?;
                (attributes, &after_name[close + TAG_CLOSE.len()..])
            }
            None | Some('>') => {
                return Err(TagSyntaxError::NotSelfClosed { name, offset: start }.into());
            }
            Some(found) => {
                return Err(TagSyntaxError::InvalidTagCharacter {
                    name,
                    found,
                    offset: self.offset(after_name),
                }
                .into());
            }
        };

        let end = self.offset(rest);
        let tag = IckTag {
            name,
            source: &self.input[start..end],
            attributes,
            span: Span::new(start, end),
        };
        self.rest = rest;
        log::trace!("scanned <{}> at {}..{}", tag.name, start, end);
        Ok(tag)
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Segment<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.rest.is_empty() {
            return None;
        }
        if tag_open(self.rest).is_err() {
            return Some(Ok(Segment::Literal(self.next_literal())));
        }
        match self.next_tag() {
            Ok(tag) => Some(Ok(Segment::Tag(tag))),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

/// Where the attribute region of a tag ends.
#[derive(Debug, PartialEq, Eq)]
enum TagEnd {
    /// Byte index of the closing `/>`.
    Close(usize),
    /// Byte index of a quote that is never closed.
    OpenQuote(usize),
    /// Closed by a bare `>` or not closed at all.
    Missing,
}

/// Find the `/>` closing the attribute region.
///
/// A quote opens a quoted value only right after `=` (whitespace allowed in
/// between); `/>` inside a quoted value does not close the tag.
fn find_close(region: &str) -> TagEnd {
    let mut quote: Option<(char, usize)> = None;
    let mut value_start = false;
    for (i, c) in region.char_indices() {
        if let Some((q, _)) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '/' if region[i..].starts_with(TAG_CLOSE) => return TagEnd::Close(i),
            '>' => return TagEnd::Missing,
            '=' => value_start = true,
            '"' | '\'' if value_start => {
                quote = Some((c, i));
                value_start = false;
            }
            c if c.is_whitespace() => {}
            _ => value_start = false,
        }
    }
    match quote {
        Some((_, at)) => TagEnd::OpenQuote(at),
        None => TagEnd::Missing,
    }
}

/// Scan the whole input eagerly.
pub fn scan(input: &str) -> Result<Vec<Segment<'_>>, ParseError> {
    Scanner::new(input).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ick_core::Attribute;
    use proptest::prelude::*;

    fn tag(input: &str) -> IckTag<'_> {
        match scan(input).unwrap().pop() {
            Some(Segment::Tag(tag)) => tag,
            other => panic!("expected a tag, got {other:?}"),
        }
    }

    #[test]
    fn test_literal_only() {
        assert_eq!(scan("").unwrap(), vec![]);
        assert_eq!(
            scan("<strong>Hello</strong>").unwrap(),
            vec![Segment::Literal("<strong>Hello</strong>")]
        );
    }

    #[test]
    fn test_text_and_tags() {
        let segments = scan(" Hello <ick-test-snippet0/> folks <ick-test-snippet0/> ! ").unwrap();
        assert_eq!(segments.len(), 5);
        assert_eq!(segments[0], Segment::Literal(" Hello "));
        assert!(matches!(&segments[1], Segment::Tag(t) if t.name == "ick-test-snippet0"));
        assert_eq!(segments[2], Segment::Literal(" folks "));
        assert_eq!(segments[4], Segment::Literal(" ! "));
    }

    #[test]
    fn test_tag_with_attributes() {
        let t = tag(r#"<ick-Card a b=1 c="x"/>"#);
        assert_eq!(t.name, "ick-card");
        assert_eq!(t.span, Span::new(0, 23));
        assert_eq!(t.source, r#"<ick-Card a b=1 c="x"/>"#);
        assert_eq!(
            t.attributes.into_vec(),
            vec![
                Attribute::flag("a"),
                Attribute::with_value("b", "1"),
                Attribute::with_value("c", "x"),
            ]
        );
    }

    #[test]
    fn test_close_inside_quotes() {
        let t = tag(r#"<ick-x html="<br/>"/>"#);
        assert_eq!(t.attributes[0].value.as_deref(), Some("<br/>"));
        let t = tag(r#"<ick-x a="<ok></>"/>"#);
        assert_eq!(t.attributes[0].value.as_deref(), Some("<ok></>"));
        let t = tag("<ick-x a=y'z/>");
        assert_eq!(t.attributes[0].value.as_deref(), Some("y'z"));
    }

    #[test]
    fn test_missing_tag_name() {
        assert_eq!(
            scan("ab<ick-/>"),
            Err(TagSyntaxError::MissingTagName { offset: 2 }.into())
        );
    }

    #[test]
    fn test_not_self_closed() {
        let inputs = [
            "<ick-test-snippet0 >",
            "<ick-test-snippet0>",
            "<ick-x",
            "<ick-x a> <ick-y/>",
        ];
        for input in inputs {
            assert!(
                matches!(
                    scan(input),
                    Err(ParseError::TagSyntax(TagSyntaxError::NotSelfClosed { .. }))
                ),
                "{input}"
            );
        }
    }

    #[test]
    fn test_invalid_tag_character() {
        assert_eq!(
            scan("<ick-test-snippet0=/>"),
            Err(TagSyntaxError::InvalidTagCharacter {
                name: "ick-test-snippet0".into(),
                found: '=',
                offset: 18,
            }
            .into())
        );
    }

    #[test]
    fn test_grammar_errors_carry_input_offsets() {
        assert_eq!(
            scan("<ick-x a=/>"),
            Err(GrammarError::MissingValue { offset: 8 }.into())
        );
        assert!(matches!(
            scan("<ick-x = />"),
            Err(ParseError::Grammar(GrammarError::ValueWithoutName { offset: 7 }))
        ));
    }

    #[test]
    fn test_unterminated_quote() {
        assert_eq!(
            scan("<ick-x a='y />"),
            Err(GrammarError::MissingEndingQuote { offset: 9 }.into())
        );
        assert_eq!(find_close("a='y/>' b/>"), TagEnd::Close(9));
    }

    #[test]
    fn test_stops_after_error() {
        let mut scanner = Scanner::new("a<ick-/>b");
        assert_eq!(scanner.next(), Some(Ok(Segment::Literal("a"))));
        assert!(matches!(scanner.next(), Some(Err(_))));
        assert_eq!(scanner.next(), None);
    }

    proptest! {
        #[test]
        fn prop_text_without_tags_is_one_literal(input in "[^<]*(<[a-z]*[^<]*)*") {
            prop_assume!(!input.contains(TAG_OPEN));
            let segments = scan(&input).unwrap();
            if input.is_empty() {
                prop_assert!(segments.is_empty());
            } else {
                prop_assert_eq!(segments, vec![Segment::Literal(input.as_str())]);
            }
        }
    }
}
