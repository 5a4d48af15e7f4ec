//! The SDLang literal type system.
//!
//! This module provides [`SdlValue`], a closed enum with one variant per literal
//! type the text format can express. Values are variant-exact: a 32-bit integer
//! and a 64-bit integer holding the same magnitude are *not* equal, because the
//! literal suffix that produced them is part of the value's identity and must
//! survive a round trip through text.
//!
//! ## Core Types
//!
//! - [`SdlValue`]: any SDLang literal (null, boolean, character, strings, four
//!   numeric precisions, arbitrary-precision decimal, date, date-time, duration,
//!   binary)
//!
//! ## Canonical rendering
//!
//! `Display` writes the exact literal form the parser reads back, including the
//! numeric suffix (`L`, `F`, `D`, `BD`), quoting/escaping for strings and
//! characters, backticks for multi-line strings, and base64 in square brackets
//! for binary payloads. The serializer renders every value through this
//! implementation, which is what makes the parse/serialize round trip lossless.
//!
//! ```rust
//! use sdlang::SdlValue;
//!
//! assert_eq!(SdlValue::Int(5).to_string(), "5");
//! assert_eq!(SdlValue::Long(5).to_string(), "5L");
//! assert_eq!(SdlValue::from("hi\nthere").to_string(), "\"hi\\nthere\"");
//! assert_eq!(SdlValue::Binary(b"hi".to_vec()).to_string(), "[aGk=]");
//! ```

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use bigdecimal::BigDecimal;
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::fmt;

/// A single SDLang literal value.
///
/// Every value holds exactly one variant; the parser maps each literal form to
/// its best-fit variant at parse time and no coercion happens afterwards.
///
/// # Examples
///
/// ```rust
/// use sdlang::SdlValue;
///
/// let v = SdlValue::from(42);
/// assert!(v.is_number());
/// assert_eq!(v.as_i32(), Some(42));
///
/// // Variant-exact equality: 5 and 5L are different values.
/// assert_ne!(SdlValue::Int(5), SdlValue::Long(5));
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum SdlValue {
    #[default]
    Null,
    Boolean(bool),
    /// A single Unicode code point, written `'x'`.
    Character(char),
    /// A single-line string, written with double quotes.
    String(String),
    /// A multi-line string, written verbatim between backticks.
    MultilineString(String),
    /// 32-bit integer; the suffix-less integer literal form.
    Int(i32),
    /// 64-bit integer, written with an `L` suffix.
    Long(i64),
    /// 32-bit float, written with an `F` suffix.
    Float(f32),
    /// 64-bit float, written with a `D` suffix (or a bare fractional literal).
    Double(f64),
    /// Arbitrary-precision base-10 decimal, written with a `BD` suffix.
    Decimal(BigDecimal),
    /// A calendar date with no time-of-day, written `YYYY/MM/DD`.
    Date(NaiveDate),
    /// A date with time-of-day and optional time-zone identifier.
    ///
    /// The zone is carried verbatim; an absent zone means the reader's local
    /// zone. A zoned and a zone-less value with the same wall-clock fields are
    /// not equal.
    DateTime {
        local: NaiveDateTime,
        zone: Option<String>,
    },
    /// A signed time span, written `[-][Nd:]HH:MM:SS[.mmm]`.
    Duration(Duration),
    /// An opaque byte sequence, written as base64 between square brackets.
    Binary(Vec<u8>),
}

impl SdlValue {
    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, SdlValue::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, SdlValue::Boolean(_))
    }

    /// Returns `true` if the value is any string variant, single- or multi-line.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, SdlValue::String(_) | SdlValue::MultilineString(_))
    }

    /// Returns `true` if the value is any numeric variant.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(
            self,
            SdlValue::Int(_)
                | SdlValue::Long(_)
                | SdlValue::Float(_)
                | SdlValue::Double(_)
                | SdlValue::Decimal(_)
        )
    }

    /// If the value is a boolean, returns it.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SdlValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string (either variant), returns its text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SdlValue::String(s) | SdlValue::MultilineString(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a character, returns it.
    #[inline]
    #[must_use]
    pub fn as_char(&self) -> Option<char> {
        match self {
            SdlValue::Character(c) => Some(*c),
            _ => None,
        }
    }

    /// If the value is a 32-bit integer, returns it.
    #[inline]
    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            SdlValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is a 32- or 64-bit integer, returns it widened to `i64`.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SdlValue::Int(i) => Some(i64::from(*i)),
            SdlValue::Long(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is a 32- or 64-bit float, returns it widened to `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SdlValue::Float(f) => Some(f64::from(*f)),
            SdlValue::Double(f) => Some(*f),
            _ => None,
        }
    }

    /// If the value is a date, returns it.
    #[inline]
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            SdlValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// If the value is a duration, returns it.
    #[inline]
    #[must_use]
    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            SdlValue::Duration(d) => Some(*d),
            _ => None,
        }
    }

    /// If the value is a binary payload, returns the bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            SdlValue::Binary(b) => Some(b),
            _ => None,
        }
    }

    /// A short lowercase name for the variant.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            SdlValue::Null => "null",
            SdlValue::Boolean(_) => "boolean",
            SdlValue::Character(_) => "character",
            SdlValue::String(_) => "string",
            SdlValue::MultilineString(_) => "multiline string",
            SdlValue::Int(_) => "int",
            SdlValue::Long(_) => "long",
            SdlValue::Float(_) => "float",
            SdlValue::Double(_) => "double",
            SdlValue::Decimal(_) => "decimal",
            SdlValue::Date(_) => "date",
            SdlValue::DateTime { .. } => "date-time",
            SdlValue::Duration(_) => "duration",
            SdlValue::Binary(_) => "binary",
        }
    }
}

/// Escapes one character of a single-line quoted string.
///
/// The escape set is exactly the inverse of what the tokenizer unescapes:
/// backslash, double quote, newline, tab. Everything else is written literally.
pub(crate) fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
}

fn write_char_literal(f: &mut fmt::Formatter<'_>, c: char) -> fmt::Result {
    match c {
        '\\' => write!(f, "'\\\\'"),
        '\'' => write!(f, "'\\''"),
        '\n' => write!(f, "'\\n'"),
        '\t' => write!(f, "'\\t'"),
        _ => write!(f, "'{}'", c),
    }
}

fn write_duration(f: &mut fmt::Formatter<'_>, d: &Duration) -> fmt::Result {
    let total = d.num_milliseconds();
    if total < 0 {
        f.write_str("-")?;
    }
    let magnitude = total.unsigned_abs();
    let millis = magnitude % 1_000;
    let seconds = (magnitude / 1_000) % 60;
    let minutes = (magnitude / 60_000) % 60;
    let hours = (magnitude / 3_600_000) % 24;
    let days = magnitude / 86_400_000;
    if days > 0 {
        write!(f, "{}d:", days)?;
    }
    write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds)?;
    if millis > 0 {
        write!(f, ".{:03}", millis)?;
    }
    Ok(())
}

fn write_date(f: &mut fmt::Formatter<'_>, d: &NaiveDate) -> fmt::Result {
    use chrono::Datelike;
    write!(f, "{:04}/{:02}/{:02}", d.year(), d.month(), d.day())
}

impl fmt::Display for SdlValue {
    /// Writes the canonical SDLang literal for this value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdlValue::Null => f.write_str("null"),
            SdlValue::Boolean(b) => write!(f, "{}", b),
            SdlValue::Character(c) => write_char_literal(f, *c),
            SdlValue::String(s) => {
                let mut escaped = String::with_capacity(s.len() + 2);
                escape_into(&mut escaped, s);
                write!(f, "\"{}\"", escaped)
            }
            SdlValue::MultilineString(s) => {
                if !s.contains('`') {
                    write!(f, "`{}`", s)
                } else if !s.contains("\"\"\"") && !s.ends_with('"') {
                    // Backticks cannot appear in the backtick form; the
                    // triple-quoted raw form reads back as multi-line too.
                    // Text containing a quote run of three, or ending in a
                    // quote, would collide with the closing delimiter.
                    write!(f, "\"\"\"{}\"\"\"", s)
                } else {
                    // Contains every delimiter; quoted with literal newlines.
                    f.write_str("\"")?;
                    for ch in s.chars() {
                        match ch {
                            '\\' => f.write_str("\\\\")?,
                            '"' => f.write_str("\\\"")?,
                            _ => write!(f, "{}", ch)?,
                        }
                    }
                    f.write_str("\"")
                }
            }
            SdlValue::Int(i) => write!(f, "{}", i),
            SdlValue::Long(i) => write!(f, "{}L", i),
            SdlValue::Float(x) => write!(f, "{}F", x),
            SdlValue::Double(x) => write!(f, "{}D", x),
            SdlValue::Decimal(d) => write!(f, "{}BD", d),
            SdlValue::Date(d) => write_date(f, d),
            SdlValue::DateTime { local, zone } => {
                write_date(f, &local.date())?;
                let time = local.time();
                write!(
                    f,
                    " {:02}:{:02}:{:02}",
                    time.hour(),
                    time.minute(),
                    time.second()
                )?;
                let millis = time.nanosecond() / 1_000_000;
                if millis > 0 {
                    write!(f, ".{:03}", millis)?;
                }
                if let Some(zone) = zone {
                    write!(f, "-{}", zone)?;
                }
                Ok(())
            }
            SdlValue::Duration(d) => write_duration(f, d),
            SdlValue::Binary(bytes) => write!(f, "[{}]", BASE64.encode(bytes)),
        }
    }
}

impl Serialize for SdlValue {
    /// Maps each literal variant to the closest generic serde form; the exotic
    /// types (decimal, date, date-time, duration) export as their canonical
    /// literal text, binary exports as a byte sequence.
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            SdlValue::Null => serializer.serialize_unit(),
            SdlValue::Boolean(b) => serializer.serialize_bool(*b),
            SdlValue::Character(c) => serializer.serialize_char(*c),
            SdlValue::String(s) | SdlValue::MultilineString(s) => serializer.serialize_str(s),
            SdlValue::Int(i) => serializer.serialize_i32(*i),
            SdlValue::Long(i) => serializer.serialize_i64(*i),
            SdlValue::Float(x) => serializer.serialize_f32(*x),
            SdlValue::Double(x) => serializer.serialize_f64(*x),
            SdlValue::Decimal(d) => serializer.serialize_str(&d.to_string()),
            SdlValue::Date(_) | SdlValue::DateTime { .. } | SdlValue::Duration(_) => {
                serializer.serialize_str(&self.to_string())
            }
            SdlValue::Binary(bytes) => {
                let mut seq = serializer.serialize_seq(Some(bytes.len()))?;
                for byte in bytes {
                    seq.serialize_element(byte)?;
                }
                seq.end()
            }
        }
    }
}

impl From<bool> for SdlValue {
    fn from(value: bool) -> Self {
        SdlValue::Boolean(value)
    }
}

impl From<char> for SdlValue {
    fn from(value: char) -> Self {
        SdlValue::Character(value)
    }
}

impl From<i32> for SdlValue {
    fn from(value: i32) -> Self {
        SdlValue::Int(value)
    }
}

impl From<i64> for SdlValue {
    fn from(value: i64) -> Self {
        SdlValue::Long(value)
    }
}

impl From<f32> for SdlValue {
    fn from(value: f32) -> Self {
        SdlValue::Float(value)
    }
}

impl From<f64> for SdlValue {
    fn from(value: f64) -> Self {
        SdlValue::Double(value)
    }
}

impl From<&str> for SdlValue {
    fn from(value: &str) -> Self {
        SdlValue::String(value.to_string())
    }
}

impl From<String> for SdlValue {
    fn from(value: String) -> Self {
        SdlValue::String(value)
    }
}

impl From<Vec<u8>> for SdlValue {
    fn from(value: Vec<u8>) -> Self {
        SdlValue::Binary(value)
    }
}

impl From<BigDecimal> for SdlValue {
    fn from(value: BigDecimal) -> Self {
        SdlValue::Decimal(value)
    }
}

impl From<NaiveDate> for SdlValue {
    fn from(value: NaiveDate) -> Self {
        SdlValue::Date(value)
    }
}

impl From<Duration> for SdlValue {
    fn from(value: Duration) -> Self {
        SdlValue::Duration(value)
    }
}
