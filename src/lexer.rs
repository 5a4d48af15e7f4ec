//! Character-level tokenizer for SDLang text.
//!
//! The lexer walks the input one character at a time, tracking a 1-indexed
//! line and column for diagnostics, and produces the small token alphabet the
//! parser consumes: identifiers, literal values, `=`, braces, and statement
//! terminators. All literal recognition happens here; the parser never looks
//! at raw text.
//!
//! Two places need lookahead beyond one character: deciding whether a date is
//! followed by a time-of-day (which merges both into a single date-time
//! literal), and distinguishing `//` comments from the `/` inside date
//! literals. Both are handled with a saved-position restore rather than a
//! token pushback.

use crate::error::{Result, SdlError};
use crate::value::SdlValue;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveTime};
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum TokenKind {
    /// A tag or attribute name, possibly `ns:name`.
    Ident(String),
    /// A fully recognized literal value.
    Literal(SdlValue),
    Equals,
    OpenBrace,
    CloseBrace,
    /// End of statement: a newline or `;`.
    Terminator,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

/// Tokenizes a whole document, failing on the first malformed token.
pub(crate) fn tokenize(text: &str) -> Result<Vec<Token>> {
    let mut lexer = Lexer::new(text);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

/// Characters that may appear in an unquoted literal blob: numbers, dates,
/// date-times, and durations all draw from this set.
fn is_blob_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ':' | '/' | '.' | '+' | '-' | '_')
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '$' | ':')
}

#[derive(Clone, Copy)]
struct Checkpoint {
    pos: usize,
    line: usize,
    column: usize,
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    fn new(text: &str) -> Self {
        Lexer {
            chars: text.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    fn restore(&mut self, saved: Checkpoint) {
        self.pos = saved.pos;
        self.line = saved.line;
        self.column = saved.column;
    }

    fn err(&self, line: usize, column: usize, description: impl Into<String>) -> SdlError {
        SdlError::lex(line, column, description)
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        loop {
            let (line, column) = (self.line, self.column);
            let c = match self.peek() {
                Some(c) => c,
                None => return Ok(None),
            };
            match c {
                ' ' | '\t' | '\r' => {
                    self.bump();
                }
                '#' => self.skip_line_comment(),
                '/' if self.peek_at(1) == Some('/') => self.skip_line_comment(),
                '/' if self.peek_at(1) == Some('*') => self.skip_block_comment(line, column)?,
                '\\' => {
                    self.bump();
                    self.skip_line_continuation(line, column)?;
                }
                '\n' => {
                    self.bump();
                    return Ok(Some(Token {
                        kind: TokenKind::Terminator,
                        line,
                        column,
                    }));
                }
                ';' => {
                    self.bump();
                    return Ok(Some(Token {
                        kind: TokenKind::Terminator,
                        line,
                        column,
                    }));
                }
                '=' => {
                    self.bump();
                    return Ok(Some(Token {
                        kind: TokenKind::Equals,
                        line,
                        column,
                    }));
                }
                '{' => {
                    self.bump();
                    return Ok(Some(Token {
                        kind: TokenKind::OpenBrace,
                        line,
                        column,
                    }));
                }
                '}' => {
                    self.bump();
                    return Ok(Some(Token {
                        kind: TokenKind::CloseBrace,
                        line,
                        column,
                    }));
                }
                '"' => {
                    let value = self.lex_quoted_string(line, column)?;
                    return Ok(Some(Token {
                        kind: TokenKind::Literal(value),
                        line,
                        column,
                    }));
                }
                '`' => {
                    let value = self.lex_backtick_string(line, column)?;
                    return Ok(Some(Token {
                        kind: TokenKind::Literal(value),
                        line,
                        column,
                    }));
                }
                '\'' => {
                    let value = self.lex_character(line, column)?;
                    return Ok(Some(Token {
                        kind: TokenKind::Literal(value),
                        line,
                        column,
                    }));
                }
                '[' => {
                    let value = self.lex_binary(line, column)?;
                    return Ok(Some(Token {
                        kind: TokenKind::Literal(value),
                        line,
                        column,
                    }));
                }
                c if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => {
                    let value = self.lex_blob(line, column)?;
                    return Ok(Some(Token {
                        kind: TokenKind::Literal(value),
                        line,
                        column,
                    }));
                }
                c if is_ident_start(c) => {
                    let kind = self.lex_ident();
                    return Ok(Some(Token { kind, line, column }));
                }
                c => {
                    return Err(self.err(line, column, format!("unexpected character '{}'.", c)));
                }
            }
        }
    }

    /// Skips a `#` or `//` comment, stopping *before* the newline so the
    /// statement terminator still fires.
    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    /// Skips a `/* ... */` comment. Newlines inside it advance the line
    /// counter but do not terminate the statement.
    fn skip_block_comment(&mut self, line: usize, column: usize) -> Result<()> {
        self.bump();
        self.bump();
        loop {
            match self.bump() {
                Some('*') if self.peek() == Some('/') => {
                    self.bump();
                    return Ok(());
                }
                Some(_) => {}
                None => {
                    return Err(self.err(line, column, "unterminated block comment.".to_string()))
                }
            }
        }
    }

    /// Consumes the rest of a `\`-continued line through its newline, joining
    /// the next physical line into the current statement.
    fn skip_line_continuation(&mut self, line: usize, column: usize) -> Result<()> {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' => {
                    self.bump();
                }
                '\n' => {
                    self.bump();
                    return Ok(());
                }
                _ => break,
            }
        }
        Err(self.err(
            line,
            column,
            "line continuation '\\' must be the last character on the line.".to_string(),
        ))
    }

    // ---- strings ----

    fn lex_quoted_string(&mut self, line: usize, column: usize) -> Result<SdlValue> {
        self.bump();
        if self.peek() == Some('"') && self.peek_at(1) == Some('"') {
            self.bump();
            self.bump();
            return self.lex_triple_quoted(line, column);
        }
        let mut text = String::new();
        let mut multiline = false;
        loop {
            match self.bump() {
                None => {
                    return Err(self.err(line, column, "unterminated string literal.".to_string()))
                }
                Some('"') => break,
                Some('\\') => match self.bump() {
                    Some('\\') => text.push('\\'),
                    Some('"') => text.push('"'),
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some('\r') | Some('\n') => {
                        // Continuation inside a string also swallows the
                        // continued line's leading indentation.
                        while matches!(self.peek(), Some(' ' | '\t' | '\r' | '\n')) {
                            self.bump();
                        }
                    }
                    Some(other) => {
                        return Err(self.err(
                            self.line,
                            self.column.saturating_sub(1),
                            format!("invalid escape sequence '\\{}'.", other),
                        ));
                    }
                    None => {
                        return Err(self.err(
                            line,
                            column,
                            "unterminated string literal.".to_string(),
                        ))
                    }
                },
                Some('\r') => {}
                Some('\n') => {
                    text.push('\n');
                    multiline = true;
                }
                Some(c) => text.push(c),
            }
        }
        if multiline {
            Ok(SdlValue::MultilineString(text))
        } else {
            Ok(SdlValue::String(text))
        }
    }

    /// Raw block between `"""` delimiters; accepted on input, never written.
    fn lex_triple_quoted(&mut self, line: usize, column: usize) -> Result<SdlValue> {
        let mut text = String::new();
        loop {
            match self.bump() {
                None => {
                    return Err(self.err(line, column, "unterminated string literal.".to_string()))
                }
                Some('"') if self.peek() == Some('"') && self.peek_at(1) == Some('"') => {
                    self.bump();
                    self.bump();
                    return Ok(SdlValue::MultilineString(text));
                }
                Some('\r') => {}
                Some(c) => text.push(c),
            }
        }
    }

    fn lex_backtick_string(&mut self, line: usize, column: usize) -> Result<SdlValue> {
        self.bump();
        let mut text = String::new();
        loop {
            match self.bump() {
                None => {
                    return Err(self.err(line, column, "unterminated string literal.".to_string()))
                }
                Some('`') => return Ok(SdlValue::MultilineString(text)),
                Some('\r') => {}
                Some(c) => text.push(c),
            }
        }
    }

    fn lex_character(&mut self, line: usize, column: usize) -> Result<SdlValue> {
        self.bump();
        let c = match self.bump() {
            Some('\\') => match self.bump() {
                Some('\\') => '\\',
                Some('\'') => '\'',
                Some('"') => '"',
                Some('n') => '\n',
                Some('t') => '\t',
                Some(other) => {
                    return Err(self.err(
                        line,
                        column,
                        format!("invalid escape sequence '\\{}' in character literal.", other),
                    ))
                }
                None => {
                    return Err(self.err(line, column, "unterminated character literal.".to_string()))
                }
            },
            Some('\'') => {
                return Err(self.err(line, column, "empty character literal.".to_string()))
            }
            Some(c) => c,
            None => {
                return Err(self.err(line, column, "unterminated character literal.".to_string()))
            }
        };
        match self.bump() {
            Some('\'') => Ok(SdlValue::Character(c)),
            _ => Err(self.err(
                line,
                column,
                "character literal must contain exactly one character.".to_string(),
            )),
        }
    }

    /// Base64 between square brackets. Whitespace and newlines inside the
    /// brackets are ignored, so long payloads can be wrapped.
    fn lex_binary(&mut self, line: usize, column: usize) -> Result<SdlValue> {
        self.bump();
        let mut encoded = String::new();
        loop {
            match self.bump() {
                None => {
                    return Err(self.err(line, column, "unterminated binary literal.".to_string()))
                }
                Some(']') => break,
                Some(c) if c.is_whitespace() => {}
                Some(c) => encoded.push(c),
            }
        }
        match BASE64.decode(encoded.as_bytes()) {
            Ok(bytes) => Ok(SdlValue::Binary(bytes)),
            Err(_) => Err(self.err(
                line,
                column,
                "invalid base64 in binary literal.".to_string(),
            )),
        }
    }

    // ---- unquoted blobs: numbers, dates, date-times, durations ----

    /// Collects the maximal run of blob characters, stopping before an
    /// embedded `//` or `/*` comment opener.
    fn collect_blob(&mut self) -> String {
        let mut blob = String::new();
        while let Some(c) = self.peek() {
            if !is_blob_char(c) {
                break;
            }
            if c == '/' && matches!(self.peek_at(1), Some('/') | Some('*')) {
                break;
            }
            blob.push(c);
            self.bump();
        }
        blob
    }

    fn lex_blob(&mut self, line: usize, column: usize) -> Result<SdlValue> {
        let blob = self.collect_blob();
        if blob.contains('/') {
            let date = self.parse_date(&blob, line, column)?;
            return self.try_merge_time(date, line, column);
        }
        if blob.contains(':') {
            return self.parse_duration(&blob, line, column);
        }
        self.parse_number(&blob, line, column)
    }

    fn parse_date(&self, blob: &str, line: usize, column: usize) -> Result<NaiveDate> {
        let malformed = || self.err(line, column, format!("malformed date literal '{}'.", blob));
        let parts: Vec<&str> = blob.split('/').collect();
        if parts.len() != 3 || parts.iter().any(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_digit())) {
            return Err(malformed());
        }
        let year: i32 = parts[0].parse().map_err(|_| malformed())?;
        let month: u32 = parts[1].parse().map_err(|_| malformed())?;
        let day: u32 = parts[2].parse().map_err(|_| malformed())?;
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(malformed)
    }

    /// After a date, a single space followed by a `digits:` pattern commits to
    /// a date-time literal. Anything else restores the position and yields the
    /// plain date. A following duration like `1d:...` does not match the
    /// pattern, so `2015/12/06 1d:00:00:00` stays two separate values.
    fn try_merge_time(&mut self, date: NaiveDate, line: usize, column: usize) -> Result<SdlValue> {
        let saved = self.checkpoint();
        if self.peek() == Some(' ') {
            self.bump();
            let mut offset = 0;
            while matches!(self.peek_at(offset), Some(c) if c.is_ascii_digit()) {
                offset += 1;
            }
            if offset > 0 && self.peek_at(offset) == Some(':') {
                let blob = self.collect_blob();
                let (time, zone) = self.parse_time_of_day(&blob, line, column)?;
                return Ok(SdlValue::DateTime {
                    local: date.and_time(time),
                    zone,
                });
            }
        }
        self.restore(saved);
        Ok(SdlValue::Date(date))
    }

    /// Parses `HH:MM[:SS[.mmm]][-ZONE]`. The zone is everything after the
    /// first `-` and is carried verbatim.
    fn parse_time_of_day(
        &self,
        blob: &str,
        line: usize,
        column: usize,
    ) -> Result<(NaiveTime, Option<String>)> {
        let malformed = || self.err(line, column, format!("malformed time literal '{}'.", blob));
        let (time_part, zone) = match blob.find('-') {
            Some(idx) => {
                let zone = &blob[idx + 1..];
                if zone.is_empty() {
                    return Err(malformed());
                }
                (&blob[..idx], Some(zone.to_string()))
            }
            None => (blob, None),
        };
        let parts: Vec<&str> = time_part.split(':').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(malformed());
        }
        let hour: u32 = parse_digits(parts[0]).ok_or_else(malformed)?;
        let minute: u32 = parse_digits(parts[1]).ok_or_else(malformed)?;
        let (second, millis) = if parts.len() == 3 {
            parse_seconds(parts[2]).ok_or_else(malformed)?
        } else {
            (0, 0)
        };
        let time = NaiveTime::from_hms_milli_opt(hour, minute, second, millis)
            .ok_or_else(malformed)?;
        Ok((time, zone))
    }

    /// Parses `[-][Nd:]HH:MM:SS[.mmm]`. The leading sign negates the whole
    /// span. Seconds are required; a bare `HH:MM` is rejected rather than
    /// guessed at.
    fn parse_duration(&self, blob: &str, line: usize, column: usize) -> Result<SdlValue> {
        let malformed =
            || self.err(line, column, format!("malformed duration literal '{}'.", blob));
        let (negative, body) = match blob.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, blob),
        };
        let mut parts: Vec<&str> = body.split(':').collect();
        let days: u64 = if parts.len() == 4 {
            let day_part = parts.remove(0);
            let digits = day_part.strip_suffix(['d', 'D']).ok_or_else(malformed)?;
            parse_digits::<u64>(digits).ok_or_else(malformed)?
        } else {
            0
        };
        if parts.len() == 2 {
            return Err(self.err(
                line,
                column,
                format!("duration '{}' is missing seconds (expected HH:MM:SS).", blob),
            ));
        }
        if parts.len() != 3 {
            return Err(malformed());
        }
        let hours: u64 = parse_digits(parts[0]).ok_or_else(malformed)?;
        let minutes: u64 = parse_digits(parts[1]).ok_or_else(malformed)?;
        let (seconds, millis) = parse_seconds(parts[2]).ok_or_else(malformed)?;
        if minutes >= 60 || u64::from(seconds) >= 60 || (days > 0 && hours >= 24) {
            return Err(malformed());
        }
        let total_ms = days
            .checked_mul(24)
            .and_then(|h| h.checked_add(hours))
            .and_then(|h| h.checked_mul(60))
            .and_then(|m| m.checked_add(minutes))
            .and_then(|m| m.checked_mul(60))
            .and_then(|s| s.checked_add(u64::from(seconds)))
            .and_then(|s| s.checked_mul(1_000))
            .and_then(|ms| ms.checked_add(u64::from(millis)))
            .ok_or_else(malformed)?;
        let total_ms = i64::try_from(total_ms).map_err(|_| malformed())?;
        let span = chrono::Duration::milliseconds(if negative { -total_ms } else { total_ms });
        Ok(SdlValue::Duration(span))
    }

    fn parse_number(&self, blob: &str, line: usize, column: usize) -> Result<SdlValue> {
        let malformed =
            || self.err(line, column, format!("malformed number literal '{}'.", blob));
        let lower = blob.to_ascii_lowercase();
        if let Some(body) = lower.strip_suffix("bd") {
            let decimal = BigDecimal::from_str(body).map_err(|_| malformed())?;
            return Ok(SdlValue::Decimal(decimal));
        }
        if let Some(body) = blob.strip_suffix(['l', 'L']) {
            let value: i64 = body.parse().map_err(|_| malformed())?;
            return Ok(SdlValue::Long(value));
        }
        if let Some(body) = blob.strip_suffix(['f', 'F']) {
            let value: f32 = body.parse().map_err(|_| malformed())?;
            return Ok(SdlValue::Float(value));
        }
        if let Some(body) = blob.strip_suffix(['d', 'D']) {
            let value: f64 = body.parse().map_err(|_| malformed())?;
            return Ok(SdlValue::Double(value));
        }
        if blob.contains('.') || lower.contains('e') {
            // Fractional with no suffix reads as a 64-bit float.
            let value: f64 = blob.parse().map_err(|_| malformed())?;
            return Ok(SdlValue::Double(value));
        }
        match blob.parse::<i32>() {
            Ok(value) => Ok(SdlValue::Int(value)),
            Err(_) if blob.parse::<i64>().is_ok() => Err(self.err(
                line,
                column,
                format!(
                    "number '{}' does not fit a 32-bit integer (use the L suffix).",
                    blob
                ),
            )),
            Err(_) => Err(malformed()),
        }
    }

    fn lex_ident(&mut self) -> TokenKind {
        let mut ident = String::new();
        while let Some(c) = self.peek() {
            if !is_ident_char(c) {
                break;
            }
            ident.push(c);
            self.bump();
        }
        if ident.eq_ignore_ascii_case("null") {
            TokenKind::Literal(SdlValue::Null)
        } else if ident.eq_ignore_ascii_case("true") || ident.eq_ignore_ascii_case("on") {
            TokenKind::Literal(SdlValue::Boolean(true))
        } else if ident.eq_ignore_ascii_case("false") || ident.eq_ignore_ascii_case("off") {
            TokenKind::Literal(SdlValue::Boolean(false))
        } else {
            TokenKind::Ident(ident)
        }
    }
}

fn parse_digits<T: FromStr>(text: &str) -> Option<T> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Parses `SS[.mmm]`, right-padding a short fraction to milliseconds.
fn parse_seconds(text: &str) -> Option<(u32, u32)> {
    let (seconds_part, fraction) = match text.split_once('.') {
        Some((s, f)) => (s, Some(f)),
        None => (text, None),
    };
    let seconds: u32 = parse_digits(seconds_part)?;
    let millis = match fraction {
        Some(f) if f.is_empty() || f.len() > 3 => return None,
        Some(f) => {
            let digits: u32 = parse_digits(f)?;
            digits * 10u32.pow(3 - f.len() as u32)
        }
        None => 0,
    };
    Some((seconds, millis))
}
