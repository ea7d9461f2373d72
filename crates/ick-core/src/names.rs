//! HTML name validation.
//!
//! Attribute names follow the XML `Name` production: a start character
//! followed by any number of name characters.
//! See <https://www.w3.org/TR/xml/#NT-Name>.

type CharRange = (char, char);

/// Ranges valid anywhere in a name, including its first character.
const START_RANGES: &[CharRange] = &[
    ('a', 'z'),
    ('A', 'Z'),
    ('_', '_'),
    (':', ':'),
    ('\u{C0}', '\u{D6}'),
    ('\u{D8}', '\u{F6}'),
    ('\u{F8}', '\u{2FF}'),
    ('\u{370}', '\u{37D}'),
    ('\u{37F}', '\u{1FFF}'),
    ('\u{200C}', '\u{200D}'),
    ('\u{2070}', '\u{218F}'),
    ('\u{2C00}', '\u{2FEF}'),
    ('\u{3001}', '\u{D7FF}'),
    ('\u{F900}', '\u{FDCF}'),
    ('\u{FDF0}', '\u{FFFD}'),
    ('\u{10000}', '\u{EFFFF}'),
];

/// Extra ranges allowed after the first character.
const FOLLOW_RANGES: &[CharRange] = &[
    ('-', '-'),
    ('.', '.'),
    ('0', '9'),
    ('\u{B7}', '\u{B7}'),
    ('\u{300}', '\u{36F}'),
    ('\u{203F}', '\u{2040}'),
];

fn in_ranges(ranges: &[CharRange], c: char) -> bool {
    ranges.iter().any(|&(from, to)| c >= from && c <= to)
}

/// Whether `c` may appear in a name, at the first position when `first` is set.
pub fn is_name_char(c: char, first: bool) -> bool {
    if in_ranges(START_RANGES, c) {
        return true;
    }
    !first && in_ranges(FOLLOW_RANGES, c)
}

/// Whether `name` matches the HTML name grammar. Empty names are invalid.
///
/// The name must already be trimmed.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if is_name_char(c, true) => chars.all(|c| is_name_char(c, false)),
        _ => false,
    }
}

/// Whether `c` may appear in a custom tag name after the reserved prefix.
pub fn is_tag_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-'
}
