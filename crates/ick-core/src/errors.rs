//! Error types for ick markup expansion.

use crate::types::Span;
use thiserror::Error;

/// Malformed attribute substring.
///
/// Offsets are byte positions in the text handed to the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("invalid attribute name {name:?} at offset {offset}")]
    InvalidName { name: String, offset: usize },

    #[error("value without attribute: '=' at offset {offset} has no name before it")]
    ValueWithoutName { offset: usize },

    #[error("missing ending quote in value starting at offset {offset}")]
    MissingEndingQuote { offset: usize },

    #[error("quoted value must be separated by a space from the next attribute (offset {offset})")]
    QuoteNotSeparated { offset: usize },

    #[error("missing value after '=' at offset {offset}")]
    MissingValue { offset: usize },

    #[error("invalid unquoted value {value:?} at offset {offset}")]
    InvalidValue { value: String, offset: usize },
}

/// Malformed custom tag delimiters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagSyntaxError {
    #[error("'<ick-' tag found without name at offset {offset}")]
    MissingTagName { offset: usize },

    #[error("invalid character {found:?} in tag <{name}> at offset {offset}")]
    InvalidTagCharacter {
        name: String,
        found: char,
        offset: usize,
    },

    #[error("tag <{name}> starting at offset {offset} is not self-closed with '/>'")]
    NotSelfClosed { name: String, offset: usize },
}

/// Errors while scanning input for custom tags.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error(transparent)]
    TagSyntax(#[from] TagSyntaxError),
}

/// Errors raised by [`AttributeStore`](crate::AttributeStore) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    #[error("tabindex value {value:?} is not an integer")]
    InvalidTabIndex { value: String },

    #[error("invalid attribute name {name:?}")]
    InvalidName { name: String },
}

/// A caller value that cannot be converted into a component property.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value {value:?} for property '{property}': {reason}")]
pub struct PropertyError {
    pub property: String,
    pub value: String,
    pub reason: String,
}

/// Errors while registering a component.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("register component failed: name missing")]
    EmptyName,

    #[error("register component {name:?} failed: name must start by 'ick-'")]
    MissingPrefix { name: String },

    #[error("register component {name:?} failed: name must only contain letters, digits and '-'")]
    InvalidName { name: String },
}

/// Errors during component expansion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpandError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("unable to unfold unregistered component <{name}>")]
    UnregisteredComponent { name: String, span: Span },

    #[error("recursive embedding of <{name}>: {}", .chain.join(" -> "))]
    RecursiveEmbedding { name: String, chain: Vec<String> },

    #[error("maximum component nesting depth ({depth}) exceeded")]
    MaxDepthExceeded { depth: usize },

    #[error("component <{component}>: {source}")]
    Attribute {
        component: String,
        #[source]
        source: AttributeError,
    },

    #[error("component <{component}>: {source}")]
    Property {
        component: String,
        #[source]
        source: PropertyError,
    },
}

impl From<GrammarError> for ExpandError {
    fn from(err: GrammarError) -> Self {
        ExpandError::Parse(ParseError::Grammar(err))
    }
}

impl ExpandError {
    /// True for the two kinds raised by the recursion guard.
    pub fn is_recursion(&self) -> bool {
        matches!(
            self,
            ExpandError::RecursiveEmbedding { .. } | ExpandError::MaxDepthExceeded { .. }
        )
    }
}
