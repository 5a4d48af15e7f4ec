//! The SDLang text format, as read and written by this crate.
//!
//! This module holds no code; it documents the grammar the lexer and parser
//! implement and the canonical form the serializer emits.
//!
//! # Documents and statements
//!
//! A document is a sequence of statements. A statement is terminated by a
//! newline or a `;`, and produces one tag:
//!
//! ```sdl
//! title "My Files"
//! folder "docs" color="yellow" {
//!     file "readme.txt" size=120
//! }
//! ```
//!
//! A statement normally starts with a tag name. A statement that starts with
//! a literal instead is *anonymous* and gets the implicit name `content`:
//!
//! ```sdl
//! matrix {
//!     1 2 3
//!     4 5 6
//! }
//! ```
//!
//! After the name come any number of values and `key=value` attributes, in any
//! order. A `{` at the end of the statement opens a child block that runs to
//! the matching `}`; blocks nest arbitrarily.
//!
//! Names take an optional namespace prefix, `ns:name`, on both tags and
//! attribute keys. A name with no prefix is in the default namespace.
//!
//! # Comments and continuations
//!
//! `#` and `//` comment to end of line; `/* ... */` comments may span lines
//! without ending the statement. A `\` at the end of a line joins the next
//! line into the current statement.
//!
//! # Literals
//!
//! | Literal | Example | Type |
//! |---|---|---|
//! | null | `null` | null |
//! | boolean | `true`, `false`, `on`, `off` | boolean |
//! | character | `'a'`, `'\n'` | character |
//! | string | `"hi\nthere"` | string |
//! | raw string | `` `anything at all` `` | multi-line string |
//! | integer | `42` | 32-bit int |
//! | long | `42L` | 64-bit int |
//! | float | `0.5F` | 32-bit float |
//! | double | `2.34D`, `2.34` | 64-bit float |
//! | decimal | `11.1BD` | arbitrary-precision decimal |
//! | date | `2015/12/06` | date |
//! | date-time | `2015/12/06 12:30:00.123-JST` | date-time, optional zone |
//! | duration | `12:30:00`, `-1d:00:00:00.500` | signed span |
//! | binary | `[aGVsbG8=]` | bytes (base64) |
//!
//! Details worth knowing:
//!
//! - Keywords (`true`, `off`, `null`, ...) match case-insensitively; the
//!   canonical spelling is lowercase.
//! - Quoted strings recognize the escapes `\\`, `\"`, `\n`, `\t`. A quoted
//!   string containing a real newline becomes a multi-line string. A `\` at
//!   the end of a line inside a string continues it, dropping the next line's
//!   leading indentation.
//! - Backtick strings are raw: no escapes, newlines kept verbatim. The
//!   `"""..."""` block form is accepted on input as raw text too; output
//!   always uses backticks.
//! - A bare integer must fit 32 bits; use the `L` suffix for anything larger.
//!   A bare fractional number (no suffix) reads as a 64-bit float.
//! - A date followed by a single space and a time-of-day merges into one
//!   date-time value. The zone suffix after `-` is carried verbatim and never
//!   resolved against a time-zone database.
//! - Durations require seconds (`HH:MM:SS`); a leading `-` negates the whole
//!   span and an `Nd:` prefix adds days. A standalone `HH:MM` is an error
//!   rather than a guess.
//! - Whitespace inside a binary literal's brackets is ignored, so payloads
//!   can be wrapped across lines.
//!
//! # Canonical output
//!
//! The serializer writes one statement per line with four-space indentation
//! (configurable), values in stored order, then attributes sorted by namespace
//! and key. Re-parsing serializer output always reproduces a structurally
//! equal document; textual idempotence follows because canonical text
//! re-serializes to itself.
