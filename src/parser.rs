//! Recursive-descent parser over the lexer's token stream.
//!
//! One statement becomes one [`Tag`]. The first token of a statement decides
//! its shape: an identifier names the tag, a literal starts an anonymous
//! `content` tag. After that, literals append to the value list, `ident =
//! literal` pairs set attributes, and a `{` opens a child block that runs
//! until the matching `}`. Values and attributes may be interleaved freely.
//!
//! The whole document parses into a synthetic root tag whose children are the
//! top-level statements.

use crate::error::{Result, SdlError};
use crate::lexer::{Token, TokenKind};
use crate::tag::{Tag, ROOT_NAME};

/// Parses a token stream into the synthetic root tag.
pub(crate) fn parse(tokens: Vec<Token>) -> Result<Tag> {
    let mut parser = Parser { tokens, pos: 0 };
    let mut root = Tag::new(ROOT_NAME);
    parser.parse_block(&mut root, None)?;
    Ok(root)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Parses statements into `parent` until the block closes. For the
    /// top-level block `open` is `None` and the block ends at end of input;
    /// for a child block it holds the opening brace's position, and reaching
    /// end of input first is an error.
    fn parse_block(&mut self, parent: &mut Tag, open: Option<(usize, usize)>) -> Result<()> {
        loop {
            while matches!(self.peek().map(|t| &t.kind), Some(TokenKind::Terminator)) {
                self.next();
            }
            match self.peek() {
                None => {
                    return match open {
                        Some((line, column)) => Err(SdlError::parse(
                            line,
                            column,
                            "'{' is never closed.".to_string(),
                        )),
                        None => Ok(()),
                    };
                }
                Some(token) if token.kind == TokenKind::CloseBrace => {
                    return match open {
                        Some(_) => {
                            self.next();
                            Ok(())
                        }
                        None => Err(SdlError::parse(
                            token.line,
                            token.column,
                            "'}' without a matching '{'.".to_string(),
                        )),
                    };
                }
                Some(_) => {
                    let statement = self.parse_statement()?;
                    parent.push_child(statement);
                }
            }
        }
    }

    /// Parses one statement. On return the terminating token has been
    /// consumed, except for a closing `}` which is left for the enclosing
    /// block.
    fn parse_statement(&mut self) -> Result<Tag> {
        let first = match self.next() {
            Some(token) => token,
            None => return Err(SdlError::parse_unlocated("document ended unexpectedly.")),
        };
        let mut tag = match first.kind {
            TokenKind::Ident(spelled) => {
                let (namespace, name) = split_name(&spelled, first.line, first.column)?;
                Tag::with_namespace(namespace, name)
            }
            TokenKind::Literal(value) => Tag::anonymous().value(value),
            TokenKind::OpenBrace => {
                return Err(SdlError::parse(
                    first.line,
                    first.column,
                    "'{' must follow a tag, not start a statement.".to_string(),
                ));
            }
            TokenKind::Equals => {
                return Err(SdlError::parse(
                    first.line,
                    first.column,
                    "unexpected '='.".to_string(),
                ));
            }
            // parse_block consumes these before dispatching here.
            TokenKind::CloseBrace | TokenKind::Terminator => {
                return Err(SdlError::parse(
                    first.line,
                    first.column,
                    "unexpected token.".to_string(),
                ));
            }
        };

        loop {
            let token = match self.peek() {
                Some(token) => token.clone(),
                None => return Ok(tag),
            };
            match token.kind {
                TokenKind::Terminator => {
                    self.next();
                    return Ok(tag);
                }
                TokenKind::CloseBrace => return Ok(tag),
                TokenKind::Literal(value) => {
                    self.next();
                    tag.push_value(value);
                }
                TokenKind::Ident(spelled) => {
                    self.next();
                    self.parse_attribute(&mut tag, &spelled, token.line, token.column)?;
                }
                TokenKind::Equals => {
                    return Err(SdlError::parse(
                        token.line,
                        token.column,
                        "unexpected '='.".to_string(),
                    ));
                }
                TokenKind::OpenBrace => {
                    self.next();
                    self.parse_block(&mut tag, Some((token.line, token.column)))?;
                    self.expect_statement_end()?;
                    return Ok(tag);
                }
            }
        }
    }

    /// Parses the `= value` half of an attribute whose name was just consumed.
    fn parse_attribute(
        &mut self,
        tag: &mut Tag,
        spelled: &str,
        line: usize,
        column: usize,
    ) -> Result<()> {
        let (namespace, key) = split_name(spelled, line, column)?;
        match self.next().map(|t| t.kind) {
            Some(TokenKind::Equals) => {}
            _ => {
                return Err(SdlError::parse(
                    line,
                    column,
                    format!("expected '=' after attribute name '{}'.", spelled),
                ));
            }
        }
        let value = match self.next() {
            Some(Token {
                kind: TokenKind::Literal(value),
                ..
            }) => value,
            Some(token) => {
                return Err(SdlError::parse(
                    token.line,
                    token.column,
                    format!("expected a value for attribute '{}'.", spelled),
                ));
            }
            None => {
                return Err(SdlError::parse_unlocated(format!(
                    "expected a value for attribute '{}'.",
                    spelled
                )));
            }
        };
        if tag.attribute_value_in(&namespace, &key).is_some() {
            return Err(SdlError::parse(
                line,
                column,
                format!("duplicate attribute '{}'.", spelled),
            ));
        }
        tag.set_attribute_in(namespace, key, value);
        Ok(())
    }

    /// After a child block closes, the statement must end too.
    fn expect_statement_end(&mut self) -> Result<()> {
        match self.peek() {
            None => Ok(()),
            Some(token) if token.kind == TokenKind::Terminator => {
                self.next();
                Ok(())
            }
            Some(token) if token.kind == TokenKind::CloseBrace => Ok(()),
            Some(token) => Err(SdlError::parse(
                token.line,
                token.column,
                "unexpected token after '}'.".to_string(),
            )),
        }
    }
}

/// Splits an `ns:name` spelling into its namespace and name, with the empty
/// string standing for the default namespace.
fn split_name(spelled: &str, line: usize, column: usize) -> Result<(String, String)> {
    match spelled.split_once(':') {
        None => Ok((String::new(), spelled.to_string())),
        Some((namespace, name)) => {
            if namespace.is_empty() || name.is_empty() || name.contains(':') {
                Err(SdlError::parse(
                    line,
                    column,
                    format!("malformed name '{}'.", spelled),
                ))
            } else {
                Ok((namespace.to_string(), name.to_string()))
            }
        }
    }
}
