//! The SDLang document tree.
//!
//! A parsed document is a tree of [`Tag`] nodes. Each tag has a name, an
//! optional namespace, an ordered list of values, a set of namespaced
//! attributes, and an ordered list of child tags. The parser returns a
//! synthetic root tag named `root` whose children are the document's top-level
//! statements.
//!
//! ## Building tags in code
//!
//! The fluent builder methods consume and return `self`, so a tree can be
//! assembled in one expression:
//!
//! ```rust
//! use sdlang::{SdlValue, Tag};
//!
//! let tag = Tag::new("folder")
//!     .value("myFiles")
//!     .attribute("color", "yellow")
//!     .child(Tag::new("file").value("core.sdl"));
//!
//! assert_eq!(tag.to_string(), "folder \"myFiles\" color=\"yellow\" {\n    file \"core.sdl\"\n}");
//! ```
//!
//! ## Equality
//!
//! Two tags are equal when their names, namespaces, values (in order),
//! attributes (as a set), and children (in order, recursively) are all equal.
//! Attribute spelling order in the source text does not matter.

use crate::value::SdlValue;
use crate::{ser, SdlError};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// The name given to value-only statements that have no explicit tag name.
pub const ANONYMOUS_NAME: &str = "content";

/// The name of the synthetic root tag returned by the parse entry points.
pub const ROOT_NAME: &str = "root";

/// A node in an SDLang document tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Tag {
    name: String,
    namespace: String,
    values: Vec<SdlValue>,
    attributes: BTreeMap<(String, String), SdlValue>,
    children: Vec<Tag>,
}

impl Tag {
    /// Creates an empty tag in the default namespace.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Tag {
            name: name.into(),
            namespace: String::new(),
            values: Vec::new(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Creates an empty tag in the given namespace.
    #[must_use]
    pub fn with_namespace(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Tag {
            namespace: namespace.into(),
            ..Tag::new(name)
        }
    }

    /// Creates the anonymous tag used for value-only statements.
    #[must_use]
    pub(crate) fn anonymous() -> Self {
        Tag::new(ANONYMOUS_NAME)
    }

    /// Parses a single statement into a tag.
    ///
    /// The text must contain exactly one top-level statement.
    ///
    /// ```rust
    /// use sdlang::Tag;
    ///
    /// let tag: Tag = "size 4".parse().unwrap();
    /// assert_eq!(tag.name(), "size");
    /// ```
    fn parse_single(text: &str) -> crate::Result<Self> {
        let root = crate::parse_str(text)?;
        let mut children = root.children;
        match (children.len(), children.pop()) {
            (1, Some(tag)) => Ok(tag),
            (n, _) => Err(SdlError::parse_unlocated(format!(
                "expected exactly one tag, found {}.",
                n
            ))),
        }
    }

    /// The tag's name. Anonymous tags are named `content`.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The tag's namespace; empty string means the default namespace.
    #[inline]
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns `true` if the tag is an anonymous (value-only) statement's tag.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.namespace.is_empty() && self.name == ANONYMOUS_NAME
    }

    // ---- fluent builders ----

    /// Appends a value, returning the tag for chaining.
    #[must_use]
    pub fn value(mut self, value: impl Into<SdlValue>) -> Self {
        self.values.push(value.into());
        self
    }

    /// Sets an attribute in the default namespace, returning the tag for chaining.
    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<SdlValue>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Sets an attribute in the given namespace, returning the tag for chaining.
    #[must_use]
    pub fn attribute_in(
        mut self,
        namespace: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<SdlValue>,
    ) -> Self {
        self.set_attribute_in(namespace, key, value);
        self
    }

    /// Appends a child tag, returning the tag for chaining.
    #[must_use]
    pub fn child(mut self, child: Tag) -> Self {
        self.children.push(child);
        self
    }

    // ---- mutators ----

    /// Appends a value.
    pub fn push_value(&mut self, value: impl Into<SdlValue>) {
        self.values.push(value.into());
    }

    /// Removes the first value equal to `value`; returns whether one was removed.
    pub fn remove_value(&mut self, value: &SdlValue) -> bool {
        match self.values.iter().position(|v| v == value) {
            Some(idx) => {
                self.values.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Sets an attribute in the default namespace, replacing any existing value.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<SdlValue>) {
        self.set_attribute_in("", key, value);
    }

    /// Sets an attribute in the given namespace, replacing any existing value.
    pub fn set_attribute_in(
        &mut self,
        namespace: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<SdlValue>,
    ) {
        self.attributes
            .insert((namespace.into(), key.into()), value.into());
    }

    /// Removes an attribute from the default namespace, returning its value.
    pub fn remove_attribute(&mut self, key: &str) -> Option<SdlValue> {
        self.attributes
            .remove(&(String::new(), key.to_string()))
    }

    /// Appends a child tag.
    pub fn push_child(&mut self, child: Tag) {
        self.children.push(child);
    }

    // ---- projections ----

    /// The tag's values, in statement order.
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[SdlValue] {
        &self.values
    }

    /// The tag's first value, if any.
    #[must_use]
    pub fn first_value(&self) -> Option<&SdlValue> {
        self.values.first()
    }

    /// Returns `true` if the tag has at least one value.
    #[must_use]
    pub fn has_values(&self) -> bool {
        !self.values.is_empty()
    }

    /// Looks up an attribute in the default namespace.
    #[must_use]
    pub fn attribute_value(&self, key: &str) -> Option<&SdlValue> {
        self.attribute_value_in("", key)
    }

    /// Looks up an attribute in the given namespace.
    #[must_use]
    pub fn attribute_value_in(&self, namespace: &str, key: &str) -> Option<&SdlValue> {
        self.attributes
            .get(&(namespace.to_string(), key.to_string()))
    }

    /// All attributes in canonical order: sorted by namespace, then by key.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str, &SdlValue)> {
        self.attributes
            .iter()
            .map(|((ns, key), value)| (ns.as_str(), key.as_str(), value))
    }

    /// The attributes belonging to one namespace, sorted by key.
    #[must_use]
    pub fn attributes_in(&self, namespace: &str) -> Vec<(&str, &SdlValue)> {
        self.attributes
            .iter()
            .filter(|((ns, _), _)| ns == namespace)
            .map(|((_, key), value)| (key.as_str(), value))
            .collect()
    }

    /// Returns `true` if the tag has at least one attribute.
    #[must_use]
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// The tag's children, in document order.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[Tag] {
        &self.children
    }

    /// Returns `true` if the tag has at least one child.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// The first direct child with the given name, in any namespace.
    #[must_use]
    pub fn child_named(&self, name: &str) -> Option<&Tag> {
        self.children.iter().find(|c| c.name == name)
    }

    /// The first child with the given name anywhere in the subtree, depth-first.
    #[must_use]
    pub fn child_recursive(&self, name: &str) -> Option<&Tag> {
        for child in &self.children {
            if child.name == name {
                return Some(child);
            }
            if let Some(found) = child.child_recursive(name) {
                return Some(found);
            }
        }
        None
    }

    /// All children with the given name, optionally descending into the whole
    /// subtree in depth-first order.
    #[must_use]
    pub fn children_named(&self, name: &str, recursive: bool) -> Vec<&Tag> {
        let mut found = Vec::new();
        self.collect_children(&mut found, &|c| c.name == name, recursive);
        found
    }

    /// All children in the given namespace, optionally descending into the
    /// whole subtree in depth-first order.
    #[must_use]
    pub fn children_in_namespace(&self, namespace: &str, recursive: bool) -> Vec<&Tag> {
        let mut found = Vec::new();
        self.collect_children(&mut found, &|c| c.namespace == namespace, recursive);
        found
    }

    fn collect_children<'a>(
        &'a self,
        found: &mut Vec<&'a Tag>,
        keep: &dyn Fn(&Tag) -> bool,
        recursive: bool,
    ) {
        for child in &self.children {
            if keep(child) {
                found.push(child);
            }
            if recursive {
                child.collect_children(found, keep, recursive);
            }
        }
    }

    /// One row of values per direct child with the given name.
    ///
    /// With the anonymous name `content` this reads a matrix of value-only
    /// rows out of a child block:
    ///
    /// ```rust
    /// let root = sdlang::parse_str("matrix {\n 1 2 3\n 4 5 6\n}").unwrap();
    /// let rows = root.child_named("matrix").unwrap().children_values("content");
    /// assert_eq!(rows.len(), 2);
    /// assert_eq!(rows[0].len(), 3);
    /// ```
    #[must_use]
    pub fn children_values(&self, name: &str) -> Vec<Vec<SdlValue>> {
        self.children
            .iter()
            .filter(|c| c.name == name)
            .map(|c| c.values.clone())
            .collect()
    }
}

impl fmt::Display for Tag {
    /// Writes the tag as a canonical SDLang statement, with default formatting.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&ser::to_string(self))
    }
}

impl std::str::FromStr for Tag {
    type Err = SdlError;

    fn from_str(text: &str) -> crate::Result<Self> {
        Tag::parse_single(text)
    }
}

impl Serialize for Tag {
    /// Exports the tag as a map with `name`, and with `namespace`, `values`,
    /// `attributes`, and `children` present only when non-empty.
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut len = 1;
        if !self.namespace.is_empty() {
            len += 1;
        }
        if !self.values.is_empty() {
            len += 1;
        }
        if !self.attributes.is_empty() {
            len += 1;
        }
        if !self.children.is_empty() {
            len += 1;
        }
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("name", &self.name)?;
        if !self.namespace.is_empty() {
            map.serialize_entry("namespace", &self.namespace)?;
        }
        if !self.values.is_empty() {
            map.serialize_entry("values", &self.values)?;
        }
        if !self.attributes.is_empty() {
            let attrs: BTreeMap<String, &SdlValue> = self
                .attributes
                .iter()
                .map(|((ns, key), value)| {
                    let spelled = if ns.is_empty() {
                        key.clone()
                    } else {
                        format!("{}:{}", ns, key)
                    };
                    (spelled, value)
                })
                .collect();
            map.serialize_entry("attributes", &attrs)?;
        }
        if !self.children.is_empty() {
            map.serialize_entry("children", &self.children)?;
        }
        map.end()
    }
}
