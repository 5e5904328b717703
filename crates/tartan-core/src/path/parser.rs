//! Path expression parser
//!
//! A small hand-written parser for the dotted/indexed path grammar:
//!
//! ```text
//! path    := segment ( "." segment )*
//! segment := name ( "[" index "]" )?
//! name    := [A-Za-z0-9_]+
//! index   := [0-9]+
//! ```
//!
//! The whole input is validated up front; a single malformed token fails the
//! path as a whole.
//!
//! Copyright (c) 2025 Tartan Team
//! Licensed under the Apache-2.0 license

use super::ast::{Path, Segment, MAX_INDEX};
use super::error::PathError;
use std::iter::Peekable;
use std::str::Chars;

/// Parse a path string into a [`Path`]
pub fn parse(input: &str) -> Result<Path, PathError> {
    Parser::new(input)?.parse()
}

/// Path expression parser
pub struct Parser<'a> {
    /// Input string being parsed
    input: &'a str,
    /// Character iterator
    chars: Peekable<Chars<'a>>,
    /// Current byte offset in input
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given input
    pub fn new(input: &'a str) -> Result<Self, PathError> {
        if input.is_empty() {
            return Err(PathError::Empty);
        }

        Ok(Self {
            input,
            chars: input.chars().peekable(),
            position: 0,
        })
    }

    /// Parse the input into a path
    pub fn parse(mut self) -> Result<Path, PathError> {
        let mut segments = vec![self.parse_segment()?];

        while let Some(ch) = self.current_char() {
            match ch {
                '.' => {
                    self.advance();
                    segments.push(self.parse_segment()?);
                }
                other => {
                    return Err(PathError::syntax(
                        "Unexpected character after segment",
                        self.position,
                        self.input,
                        vec![".".to_string(), "end of path".to_string()],
                        other.to_string(),
                    ));
                }
            }
        }

        Path::new(segments)
    }

    /// Parse one `name` or `name[index]` token
    fn parse_segment(&mut self) -> Result<Segment, PathError> {
        match self.current_char() {
            None | Some('.') => Err(PathError::empty_segment(self.position, self.input)),
            Some('[') => Err(PathError::syntax(
                "Index must follow a field name",
                self.position,
                self.input,
                vec!["field name".to_string()],
                "[",
            )),
            Some(_) => {
                let name = self.parse_identifier()?;
                let index = if self.current_char() == Some('[') {
                    Some(self.parse_index()?)
                } else {
                    None
                };
                Ok(Segment { name, index })
            }
        }
    }

    /// Parse a field identifier
    fn parse_identifier(&mut self) -> Result<String, PathError> {
        let mut identifier = String::new();

        while let Some(ch) = self.current_char() {
            if is_identifier_char(ch) {
                identifier.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if identifier.is_empty() {
            return Err(PathError::syntax(
                "Expected field name",
                self.position,
                self.input,
                vec!["letter, digit or _".to_string()],
                self.current_char()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "EOF".to_string()),
            ));
        }

        Ok(identifier)
    }

    /// Parse a bracketed non-negative index
    fn parse_index(&mut self) -> Result<usize, PathError> {
        let start = self.position;
        self.advance(); // consume '['

        let mut digits = String::new();
        loop {
            match self.current_char() {
                Some(']') => {
                    self.advance();
                    break;
                }
                Some(ch) if ch.is_ascii_digit() => {
                    digits.push(ch);
                    self.advance();
                }
                Some(ch) => {
                    return Err(PathError::syntax(
                        "Invalid character in index",
                        self.position,
                        self.input,
                        vec!["digit".to_string(), "]".to_string()],
                        ch.to_string(),
                    ));
                }
                None => return Err(PathError::unterminated_index(start, self.input)),
            }
        }

        if digits.is_empty() {
            return Err(PathError::invalid_index(digits, start, self.input));
        }

        match digits.parse::<usize>() {
            Ok(index) if index <= MAX_INDEX => Ok(index),
            _ => Err(PathError::invalid_index(digits, start, self.input)),
        }
    }

    /// Get current character without advancing
    fn current_char(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        self.position += ch.len_utf8();
        Some(ch)
    }
}

pub(crate) fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
