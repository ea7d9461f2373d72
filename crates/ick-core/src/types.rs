//! Shared value types and constants.

/// Reserved prefix of every custom tag name.
pub const ICK_PREFIX: &str = "ick-";

/// Name used for identifiers of components rendered without a registered tag name.
pub const ANONYMOUS_NAME: &str = "ick";

/// Default ceiling on nested component expansion.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// A byte range in the scanned input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Trim spaces and lower-case a name, the way tag and attribute names are compared.
pub fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span() {
        let span = Span::new(12, 15);
        assert_eq!(span.len(), 3);
        assert!(!span.is_empty());
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  ICK-Button "), "ick-button");
        assert_eq!(normalize(""), "");
    }
}
