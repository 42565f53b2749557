use thiserror::Error;

use crate::lexer::TokenKind;

pub type Result<T, E = ParseError> = std::result::Result<T, E>;

/// Lexical and syntactic errors reported while reading an expression.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ParseError {
    #[error("unexpected character {ch:?} at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("unexpected {text:?} at offset {offset}, expected {}", expected_list(.expected))]
    UnexpectedToken {
        found: TokenKind,
        text: String,
        expected: Vec<TokenKind>,
        offset: usize,
    },

    #[error("unexpected end of input, expected {}", expected_list(.expected))]
    UnexpectedEnd { expected: Vec<TokenKind> },
}

fn expected_list(expected: &[TokenKind]) -> String {
    match expected {
        [] => "nothing".to_string(),
        [single] => single.to_string(),
        [init @ .., last] => {
            let init: Vec<String> = init.iter().map(ToString::to_string).collect();
            format!("{} or {}", init.join(", "), last)
        }
    }
}
