//! Canonical serialization of tags back to SDLang text.
//!
//! The output is canonical: one statement per line, values before nothing in
//! particular but always in their stored order, attributes sorted by namespace
//! then key, children indented inside `{ }`. Re-parsing the output of
//! [`document_to_string`] always yields a root structurally equal to the one
//! serialized.
//!
//! ```rust
//! let root = sdlang::parse_str("box size=4 \"label\"").unwrap();
//! let text = sdlang::ser::document_to_string(&root);
//! assert_eq!(text, "box \"label\" size=4\n");
//! let again = sdlang::parse_str(&text).unwrap();
//! assert_eq!(root, again);
//! ```

use crate::tag::Tag;

/// Formatting options for the serializer.
///
/// Built in the usual chained style:
///
/// ```rust
/// use sdlang::ser::SdlFormat;
///
/// let format = SdlFormat::new().with_indent(2);
/// ```
#[derive(Clone, Debug)]
pub struct SdlFormat {
    indent: usize,
}

impl SdlFormat {
    /// Default formatting: four-space indent.
    #[must_use]
    pub fn new() -> Self {
        SdlFormat { indent: 4 }
    }

    /// Sets the number of spaces per nesting level.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

impl Default for SdlFormat {
    fn default() -> Self {
        SdlFormat::new()
    }
}

/// Renders one tag as a statement (recursively), with default formatting.
#[must_use]
pub fn to_string(tag: &Tag) -> String {
    to_string_with(tag, &SdlFormat::new())
}

/// Renders one tag as a statement with the given formatting.
#[must_use]
pub fn to_string_with(tag: &Tag, format: &SdlFormat) -> String {
    let mut out = String::new();
    write_tag(&mut out, tag, format, 0);
    out
}

/// Renders a root tag's children as a document, one top-level statement per
/// line. The root itself does not appear in the output.
#[must_use]
pub fn document_to_string(root: &Tag) -> String {
    document_to_string_with(root, &SdlFormat::new())
}

/// Renders a document with the given formatting.
#[must_use]
pub fn document_to_string_with(root: &Tag, format: &SdlFormat) -> String {
    let mut out = String::new();
    for child in root.children() {
        write_tag(&mut out, child, format, 0);
        out.push('\n');
    }
    out
}

fn write_tag(out: &mut String, tag: &Tag, format: &SdlFormat, depth: usize) {
    push_indent(out, format, depth);
    if !tag.namespace().is_empty() {
        out.push_str(tag.namespace());
        out.push(':');
    }
    out.push_str(tag.name());
    for value in tag.values() {
        out.push(' ');
        out.push_str(&value.to_string());
    }
    for (namespace, key, value) in tag.attributes() {
        out.push(' ');
        if !namespace.is_empty() {
            out.push_str(namespace);
            out.push(':');
        }
        out.push_str(key);
        out.push('=');
        out.push_str(&value.to_string());
    }
    if tag.has_children() {
        out.push_str(" {\n");
        for child in tag.children() {
            write_tag(out, child, format, depth + 1);
            out.push('\n');
        }
        push_indent(out, format, depth);
        out.push('}');
    }
}

fn push_indent(out: &mut String, format: &SdlFormat, depth: usize) {
    for _ in 0..format.indent * depth {
        out.push(' ');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::SdlValue;

    #[test]
    fn empty_tag_is_just_its_name() {
        assert_eq!(to_string(&Tag::new("ping")), "ping");
        assert_eq!(
            to_string(&Tag::with_namespace("meta", "ping")),
            "meta:ping"
        );
    }

    #[test]
    fn attributes_come_out_in_canonical_order() {
        let tag = Tag::new("t")
            .attribute("zeta", 1)
            .attribute_in("alpha", "key", 2)
            .attribute("beta", 3);
        assert_eq!(to_string(&tag), "t beta=3 zeta=1 alpha:key=2");
    }

    #[test]
    fn children_nest_with_indent() {
        let tag = Tag::new("a").child(Tag::new("b").child(Tag::new("c").value(1)));
        assert_eq!(to_string(&tag), "a {\n    b {\n        c 1\n    }\n}");
        assert_eq!(
            to_string_with(&tag, &SdlFormat::new().with_indent(2)),
            "a {\n  b {\n    c 1\n  }\n}"
        );
    }

    #[test]
    fn anonymous_tags_spell_out_their_name() {
        let root = crate::parse_str("1 2 3").unwrap();
        assert_eq!(document_to_string(&root), "content 1 2 3\n");
        let again = crate::parse_str(&document_to_string(&root)).unwrap();
        // The reparse names the tag explicitly; structurally identical.
        assert_eq!(root, again);
    }

    #[test]
    fn document_omits_the_root() {
        let root = crate::parse_str("a 1\nb 2").unwrap();
        assert_eq!(document_to_string(&root), "a 1\nb 2\n");
    }

    #[test]
    fn every_literal_round_trips_through_text() {
        let text = concat!(
            "literals null true false 'x' \"one\\nline\" `two\nlines` 5 5L 0.5F 2.34D 1.5BD\n",
            "temporal 2015/12/06 2005/12/31 12:30:23.120-JST 1d:02:03:04 -00:00:01\n",
            "payload [aGk=]\n",
        );
        let root = crate::parse_str(text).unwrap();
        let written = document_to_string(&root);
        let again = crate::parse_str(&written).unwrap();
        assert_eq!(root, again);
        assert_eq!(written, document_to_string(&again));
    }

    #[test]
    fn multiline_value_keeps_raw_newlines() {
        let tag = Tag::new("note").value(SdlValue::MultilineString("a\nb".to_string()));
        assert_eq!(to_string(&tag), "note `a\nb`");
    }
}
