//! A reader, writer, and typed document model for SDLang (Simple Declarative
//! Language).
//!
//! SDLang is a line-oriented text format in which each statement is a *tag*: a
//! name, a list of typed values, a set of `key=value` attributes, and an
//! optional `{ }` block of child tags. Unlike JSON-family formats, literals
//! are richly typed: four numeric precisions plus arbitrary-precision
//! decimals, dates, date-times with time zones, durations, characters, raw
//! multi-line strings, and base64 binary payloads.
//!
//! # Quick start
//!
//! ```rust
//! use sdlang::{SdlValue, Tag};
//!
//! let root = sdlang::parse_str(r#"
//! folder "myFiles" color="yellow" protection=on {
//!     folder "my images" {
//!         file "myHouse.jpg" color=true date=2005/11/05
//!     }
//!     file "myMusic.mp3" size=3.5F
//! }
//! "#)?;
//!
//! let folder = root.child_named("folder").unwrap();
//! assert_eq!(folder.first_value(), Some(&SdlValue::from("myFiles")));
//! assert_eq!(folder.attribute_value("protection"), Some(&SdlValue::Boolean(true)));
//!
//! let file = folder.child_recursive("file").unwrap();
//! assert_eq!(file.attribute_value("color"), Some(&SdlValue::Boolean(true)));
//! # Ok::<(), sdlang::SdlError>(())
//! ```
//!
//! # Writing documents
//!
//! Tags are built with fluent methods and serialized with [`ser`]:
//!
//! ```rust
//! use sdlang::Tag;
//!
//! let root = Tag::new("root").child(Tag::new("size").value(4));
//! let text = sdlang::ser::document_to_string(&root);
//! assert_eq!(text, "size 4\n");
//! assert_eq!(sdlang::parse_str(&text)?, root);
//! # Ok::<(), sdlang::SdlError>(())
//! ```
//!
//! The round trip above is a guarantee, not a coincidence: for every document
//! this crate parses or builds, serializing and re-parsing yields a
//! structurally equal tree. See [`spec`] for the format itself.
//!
//! # Exporting elsewhere
//!
//! [`Tag`] and [`SdlValue`] implement [`serde::Serialize`], so a parsed
//! document can be handed to any serde back end (JSON, YAML, ...) for
//! interchange with tools that do not speak SDLang.

pub mod error;
mod lexer;
mod parser;
pub mod ser;
pub mod spec;
pub mod tag;
pub mod value;

pub use error::{Result, SdlError};
pub use tag::Tag;
pub use value::SdlValue;

use std::io::Read;
use std::path::Path;

/// Parses an SDLang document from a string.
///
/// Returns a synthetic root tag named `root` whose children are the
/// document's top-level statements. Fails on the first malformed token or
/// structural error, reporting its line and position.
pub fn parse_str(text: &str) -> Result<Tag> {
    parser::parse(lexer::tokenize(text)?)
}

/// Parses an SDLang document from any reader.
///
/// The reader is drained into memory first; I/O errors propagate unchanged.
pub fn parse_reader<R: Read>(mut reader: R) -> Result<Tag> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_str(&text)
}

/// Parses an SDLang document from a file on disk.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Tag> {
    parse_str(&std::fs::read_to_string(path)?)
}
