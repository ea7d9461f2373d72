//! Serialization of a resolved component into markup.

use ick_core::AttributeStore;
use std::fmt;

/// Render `<TAG attrs>body</TAG>`, or `<TAG attrs>` for a void element.
///
/// The tag name is upper-cased. Attribute order and value formatting come
/// from the store, so equal stores always render identically.
pub fn render(tag_name: &str, attributes: &AttributeStore, body: &str, void: bool) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = render_into(&mut out, tag_name, attributes, body, void);
    out
}

/// Same as [`render`], writing into any text sink.
pub fn render_into<W: fmt::Write>(
    out: &mut W,
    tag_name: &str,
    attributes: &AttributeStore,
    body: &str,
    void: bool,
) -> fmt::Result {
    let tag_name = tag_name.trim().to_uppercase();
    out.write_char('<')?;
    out.write_str(&tag_name)?;
    if !attributes.is_empty() {
        write!(out, " {attributes}")?;
    }
    out.write_char('>')?;
    if !void {
        out.write_str(body)?;
        write!(out, "</{tag_name}>")?;
    }
    Ok(())
}
