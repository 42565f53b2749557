use std::fmt::{Display, Formatter};
use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::{ParseError, Result};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TokenKind {
    Ident,
    True,
    False,
    And,
    Or,
    Not,
    LParen,
    RParen,
    Eof,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Ident => write!(f, "identifier"),
            TokenKind::True => write!(f, "`TRUE`"),
            TokenKind::False => write!(f, "`FALSE`"),
            TokenKind::And => write!(f, "`AND`"),
            TokenKind::Or => write!(f, "`OR`"),
            TokenKind::Not => write!(f, "`NOT`"),
            TokenKind::LParen => write!(f, "`(`"),
            TokenKind::RParen => write!(f, "`)`"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Byte offset of the first character.
    pub offset: usize,
}

/// Splits the input into tokens. Keywords are upper-case; anything else made of
/// alphanumerics and underscores (not starting with a digit) is an identifier.
pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            done: false,
        }
    }

    /// Read the next token. After the end of input, keeps returning `Eof`.
    pub fn next_token(&mut self) -> Result<Token> {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}

        let Some((offset, ch)) = self.chars.next() else {
            self.done = true;
            return Ok(Token {
                kind: TokenKind::Eof,
                text: String::new(),
                offset: self.input.len(),
            });
        };

        let kind = match ch {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            c if c.is_alphabetic() || c == '_' => {
                let mut end = offset + c.len_utf8();
                while let Some((i, c)) = self.chars.next_if(|(_, c)| c.is_alphanumeric() || *c == '_') {
                    end = i + c.len_utf8();
                }
                let text = &self.input[offset..end];
                let kind = match text {
                    "TRUE" => TokenKind::True,
                    "FALSE" => TokenKind::False,
                    "AND" => TokenKind::And,
                    "OR" => TokenKind::Or,
                    "NOT" => TokenKind::Not,
                    _ => TokenKind::Ident,
                };
                return Ok(Token {
                    kind,
                    text: text.to_string(),
                    offset,
                });
            }
            ch => return Err(ParseError::UnexpectedChar { ch, offset }),
        };

        Ok(Token {
            kind,
            text: ch.to_string(),
            offset,
        })
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token>;

    /// Yields tokens up to and including `Eof`, or up to the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let token = self.next_token();
        if token.is_err() {
            self.done = true;
        }
        Some(token)
    }
}

pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    Lexer::new(input).collect()
}
