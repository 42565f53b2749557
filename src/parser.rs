//! Recursive-descent parser.
//!
//! Grammar (left-associative chains, `NOT` binds tightest):
//!
//! ```text
//! Expr    := OrChain
//! OrChain := AndChain ('OR' AndChain)*
//! AndChain:= Unary ('AND' Unary)*
//! Unary   := 'NOT' Unary | Primary
//! Primary := Identifier | 'TRUE' | 'FALSE' | '(' Expr ')'
//! ```
//!
//! Parenthesized sub-expressions are kept as `Parens` nodes.

use crate::ast::Ast;
use crate::error::{ParseError, Result};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::node::BinOp;
use crate::reference::NodeId;

const UNARY_START: [TokenKind; 5] = [
    TokenKind::Not,
    TokenKind::Ident,
    TokenKind::True,
    TokenKind::False,
    TokenKind::LParen,
];

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    /// Nodes allocated so far, freed again if the input turns out malformed.
    allocated: Vec<NodeId>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Result<Self> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            allocated: Vec::new(),
        })
    }

    /// Parse the whole input into `ast`, returning the new `Root`.
    ///
    /// On error, `ast` is left as it was.
    pub fn parse(mut self, ast: &mut Ast) -> Result<NodeId> {
        match self.parse_expr(ast) {
            Ok(expr) => Ok(ast.mk_root(expr)),
            Err(error) => {
                for &id in &self.allocated {
                    ast.discard(id);
                }
                Err(error)
            }
        }
    }

    fn parse_expr(&mut self, ast: &mut Ast) -> Result<NodeId> {
        let expr = self.parse_or(ast)?;
        if self.current.kind != TokenKind::Eof {
            return Err(self.unexpected(&[TokenKind::And, TokenKind::Or, TokenKind::Eof]));
        }
        Ok(expr)
    }

    fn track(&mut self, id: NodeId) -> NodeId {
        self.allocated.push(id);
        id
    }

    fn advance(&mut self) -> Result<Token> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn unexpected(&self, expected: &[TokenKind]) -> ParseError {
        let expected = expected.to_vec();
        if self.current.kind == TokenKind::Eof {
            ParseError::UnexpectedEnd { expected }
        } else {
            ParseError::UnexpectedToken {
                found: self.current.kind,
                text: self.current.text.clone(),
                expected,
                offset: self.current.offset,
            }
        }
    }

    fn parse_chain<F>(&mut self, ast: &mut Ast, op: BinOp, token: TokenKind, mut operand: F) -> Result<NodeId>
    where
        F: FnMut(&mut Self, &mut Ast) -> Result<NodeId>,
    {
        let mut lhs = operand(self, ast)?;
        while self.current.kind == token {
            self.advance()?;
            let rhs = operand(self, ast)?;
            lhs = self.track(ast.mk_binary(op, lhs, rhs));
        }
        Ok(lhs)
    }

    fn parse_or(&mut self, ast: &mut Ast) -> Result<NodeId> {
        self.parse_chain(ast, BinOp::Or, TokenKind::Or, Self::parse_and)
    }

    fn parse_and(&mut self, ast: &mut Ast) -> Result<NodeId> {
        self.parse_chain(ast, BinOp::And, TokenKind::And, Self::parse_unary)
    }

    fn parse_unary(&mut self, ast: &mut Ast) -> Result<NodeId> {
        match self.current.kind {
            TokenKind::Not => {
                self.advance()?;
                let child = self.parse_unary(ast)?;
                Ok(self.track(ast.mk_not(child)))
            }
            TokenKind::Ident => {
                let token = self.advance()?;
                Ok(self.track(ast.mk_id(token.text)))
            }
            TokenKind::True => {
                self.advance()?;
                Ok(self.track(ast.mk_true()))
            }
            TokenKind::False => {
                self.advance()?;
                Ok(self.track(ast.mk_false()))
            }
            TokenKind::LParen => {
                self.advance()?;
                let inner = self.parse_or(ast)?;
                if self.current.kind != TokenKind::RParen {
                    return Err(self.unexpected(&[TokenKind::And, TokenKind::Or, TokenKind::RParen]));
                }
                self.advance()?;
                Ok(self.track(ast.mk_parens(inner)))
            }
            _ => Err(self.unexpected(&UNARY_START)),
        }
    }
}

/// Parse `input` into `ast`, returning the handle of the new `Root`.
pub fn parse(ast: &mut Ast, input: &str) -> Result<NodeId> {
    Parser::new(input)?.parse(ast)
}

impl Ast {
    /// Parse `input` into a fresh arena.
    pub fn parse(input: &str) -> Result<(Ast, NodeId)> {
        let mut ast = Ast::new();
        let root = parse(&mut ast, input)?;
        Ok((ast, root))
    }
}
