//! Lexical primitives shared by the attribute grammar and the tag scanner.

use ick_core::names::is_tag_char;
use nom::{
    bytes::complete::{tag, take_till, take_till1, take_until, take_while},
    character::complete::{char, one_of},
    sequence::terminated,
    IResult,
};

/// Opening delimiter of a custom tag.
pub const TAG_OPEN: &str = "<ick-";

/// Closing delimiter of a custom tag.
pub const TAG_CLOSE: &str = "/>";

/// Any run of whitespace, possibly empty.
pub fn whitespace(input: &str) -> IResult<&str, &str> {
    take_while(char::is_whitespace)(input)
}

/// Skip leading whitespace.
pub fn skip_whitespace(input: &str) -> &str {
    match whitespace(input) {
        Ok((rest, _)) => rest,
        Err(_) => input,
    }
}

/// Everything up to the next `=`, possibly empty.
pub fn names_run(input: &str) -> IResult<&str, &str> {
    take_till(|c: char| c == '=')(input)
}

/// One whitespace delimited token.
pub fn token(input: &str) -> IResult<&str, &str> {
    take_till1(char::is_whitespace)(input)
}

pub fn equals(input: &str) -> IResult<&str, char> {
    char('=')(input)
}

/// An opening quote, `'` or `"`.
pub fn quote_open(input: &str) -> IResult<&str, char> {
    one_of("\"'")(input)
}

/// The rest of a quoted value after its opening `quote`, consuming the closing quote.
pub fn quoted_body(input: &str, quote: char) -> IResult<&str, &str> {
    terminated(take_till(move |c: char| c == quote), char(quote))(input)
}

/// Literal text up to the next custom tag. Fails when no tag follows.
pub fn literal(input: &str) -> IResult<&str, &str> {
    take_until(TAG_OPEN)(input)
}

pub fn tag_open(input: &str) -> IResult<&str, &str> {
    tag(TAG_OPEN)(input)
}

pub fn tag_close(input: &str) -> IResult<&str, &str> {
    tag(TAG_CLOSE)(input)
}

/// The part of a tag name after the reserved prefix, possibly empty.
pub fn tag_name(input: &str) -> IResult<&str, &str> {
    take_while(is_tag_char)(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_whitespace() {
        assert_eq!(skip_whitespace(" \t\n a "), "a ");
        assert_eq!(skip_whitespace(""), "");
    }

    #[test]
    fn test_names_run() {
        assert_eq!(names_run("a b=1"), Ok(("=1", "a b")));
        assert_eq!(names_run("a b"), Ok(("", "a b")));
    }

    #[test]
    fn test_quoted_body() {
        assert_eq!(quoted_body("x y' b", '\''), Ok((" b", "x y")));
        assert!(quoted_body("x y", '"').is_err());
    }

    #[test]
    fn test_token_requires_input() {
        assert_eq!(token("y'z rest"), Ok((" rest", "y'z")));
        assert!(token("").is_err());
        assert!(token(" a").is_err());
    }

    #[test]
    fn test_literal_and_tag_name() {
        assert_eq!(literal("Hello <ick-x/>"), Ok(("<ick-x/>", "Hello ")));
        assert!(literal("no tag here").is_err());
        assert_eq!(tag_name("test-snippet0 a/>"), Ok((" a/>", "test-snippet0")));
        assert_eq!(tag_name("/>"), Ok(("/>", "")));
    }
}
