//! Attribute grammar.
//!
//! An attribute list is scanned left to right:
//!
//! ```text
//! name name name=value name = 'quoted value' name="quoted"
//! ```
//!
//! Bare names before the next `=` are boolean attributes; the value after an
//! `=` belongs to the last of them. Quoted values may hold whitespace and
//! markup, unquoted values stop at the first whitespace and may not hold `;`.

use ick_core::{names::is_valid_name, Attribute, Attributes, GrammarError};

use crate::lexer::*;

/// Parse a raw attribute substring into attributes, in source order.
///
/// Error offsets are relative to `input`.
pub fn parse_attributes(input: &str) -> Result<Attributes, GrammarError> {
    parse_attributes_at(input, 0)
}

/// Same as [`parse_attributes`] with error offsets shifted by `base`.
pub(crate) fn parse_attributes_at(input: &str, base: usize) -> Result<Attributes, GrammarError> {
    let offset = |rest: &str| base + input.len() - rest.len();
    let mut attrs = Attributes::new();
    let mut rest = input;

    loop {
        rest = skip_whitespace(rest);
        if rest.is_empty() {
            break;
        }

        // boolean names until the next '='
        let names_at = offset(rest);
        let (after, names) = names_run(rest).unwrap_or(("", rest));
        let found = push_names(&mut attrs, names, names_at)?;
        rest = after;

        let Ok((after_eq, _)) = equals(rest) else {
            break;
        };
        if found == 0 {
            return Err(GrammarError::ValueWithoutName {
                offset: offset(rest),
            });
        }
        let eq_at = offset(rest);
        rest = skip_whitespace(after_eq);

        let value = if let Ok((after_quote, quote)) = quote_open(rest) {
            let (after_value, value) = quoted_body(after_quote, quote).map_err(|_| {
                GrammarError::MissingEndingQuote {
                    offset: offset(rest),
                }
            })?;
            if after_value.starts_with(|c: char| !c.is_whitespace()) {
                return Err(GrammarError::QuoteNotSeparated {
                    offset: offset(after_value),
                });
            }
            rest = after_value;
            value
        } else {
            let (after_value, value) =
                token(rest).map_err(|_| GrammarError::MissingValue { offset: eq_at })?;
            if value.contains(';') {
                return Err(GrammarError::InvalidValue {
                    value: value.to_string(),
                    offset: offset(rest),
                });
            }
            rest = after_value;
            value
        };

        if let Some(last) = attrs.last_mut() {
            last.value = Some(value.to_string());
        }
    }

    Ok(attrs)
}

/// Push every whitespace separated name of `names` as a boolean attribute.
/// Returns how many were found.
fn push_names(attrs: &mut Attributes, names: &str, at: usize) -> Result<usize, GrammarError> {
    let mut cursor = skip_whitespace(names);
    let mut count = 0;
    while let Ok((rest, name)) = token(cursor) {
        if !is_valid_name(name) {
            return Err(GrammarError::InvalidName {
                name: name.to_string(),
                offset: at + names.len() - cursor.len(),
            });
        }
        attrs.push(Attribute::flag(name));
        count += 1;
        cursor = skip_whitespace(rest);
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Vec<Attribute> {
        parse_attributes(input).unwrap().into_vec()
    }

    #[test]
    fn test_empty() {
        assert!(parse("").is_empty());
        assert!(parse("   ").is_empty());
    }

    #[test]
    fn test_boolean_names() {
        assert_eq!(
            parse(" c a1  b "),
            vec![Attribute::flag("c"), Attribute::flag("a1"), Attribute::flag("b")]
        );
    }

    #[test]
    fn test_unquoted_values() {
        assert_eq!(
            parse("a b=1 abc=y'z"),
            vec![
                Attribute::flag("a"),
                Attribute::with_value("b", "1"),
                Attribute::with_value("abc", "y'z"),
            ]
        );
    }

    #[test]
    fn test_quoted_values() {
        assert_eq!(parse("a='x'"), parse("a=\"x\""));
        assert_eq!(parse("a= 'x' "), vec![Attribute::with_value("a", "x")]);
        assert_eq!(parse("a=' x '"), vec![Attribute::with_value("a", " x ")]);
        assert_eq!(parse("a=\"y'z;\""), vec![Attribute::with_value("a", "y'z;")]);
        assert_eq!(parse("a = \"<ok></>\""), vec![Attribute::with_value("a", "<ok></>")]);
    }

    #[test]
    fn test_multibyte_name() {
        assert_eq!(parse("a😀b"), vec![Attribute::flag("a😀b")]);
    }

    #[test]
    fn test_invalid_names() {
        assert_eq!(
            parse_attributes(" ; "),
            Err(GrammarError::InvalidName { name: ";".into(), offset: 1 })
        );
        assert_eq!(
            parse_attributes("a 1a"),
            Err(GrammarError::InvalidName { name: "1a".into(), offset: 2 })
        );
        assert!(matches!(
            parse_attributes("a=1 ;=2"),
            Err(GrammarError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_value_without_name() {
        assert_eq!(
            parse_attributes("="),
            Err(GrammarError::ValueWithoutName { offset: 0 })
        );
        assert_eq!(
            parse_attributes(" = "),
            Err(GrammarError::ValueWithoutName { offset: 1 })
        );
    }

    #[test]
    fn test_missing_value() {
        assert_eq!(
            parse_attributes("a="),
            Err(GrammarError::MissingValue { offset: 1 })
        );
        assert_eq!(
            parse_attributes(" a= "),
            Err(GrammarError::MissingValue { offset: 2 })
        );
    }

    #[test]
    fn test_missing_ending_quote() {
        assert_eq!(
            parse_attributes("a='x"),
            Err(GrammarError::MissingEndingQuote { offset: 2 })
        );
        assert!(matches!(
            parse_attributes("a=\""),
            Err(GrammarError::MissingEndingQuote { .. })
        ));
    }

    #[test]
    fn test_quote_must_be_separated() {
        assert_eq!(
            parse_attributes("a='x'b"),
            Err(GrammarError::QuoteNotSeparated { offset: 5 })
        );
        assert_eq!(parse("a='x' b"), vec![Attribute::with_value("a", "x"), Attribute::flag("b")]);
    }

    #[test]
    fn test_semicolon_in_unquoted_value() {
        assert_eq!(
            parse_attributes("a=;"),
            Err(GrammarError::InvalidValue { value: ";".into(), offset: 2 })
        );
        assert_eq!(
            parse_attributes("b a= x;y"),
            Err(GrammarError::InvalidValue { value: "x;y".into(), offset: 5 })
        );
        assert_eq!(parse("a='x;y'"), vec![Attribute::with_value("a", "x;y")]);
    }

    #[test]
    fn test_base_offset() {
        assert_eq!(
            parse_attributes_at("a=", 20),
            Err(GrammarError::MissingValue { offset: 21 })
        );
    }
}
