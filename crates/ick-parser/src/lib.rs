//! Parser for ick markup.
//!
//! This crate provides the two lexical stages of custom tag expansion:
//! - the attribute grammar, turning `a b=1 c="x"` into attributes
//! - the scanner, splitting markup into literal spans and `<ick-.../>` tags
//!
//! Built on `nom` combinators.

mod grammar;
mod lexer;
mod scanner;

pub use grammar::parse_attributes;
pub use lexer::{TAG_CLOSE, TAG_OPEN};
pub use scanner::{scan, IckTag, Scanner, Segment};
