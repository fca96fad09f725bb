//! Parse-time error shapes.
//!
//! Parse errors are collected, not fatal: the parser records one of these
//! per failure and keeps going. [`ParseError`]'s `Display` impl is the exact
//! wording the error list is built from.

use crate::token::TokenKind;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ParseError {
    #[error("expected next token to be {expected}, got {got} instead")]
    UnexpectedPeek {
        expected: TokenKind,
        got: TokenKind,
    },

    #[error("no prefix parse function for {0} found")]
    NoPrefixParseFn(TokenKind),

    #[error("could not parse {0:?} as integer")]
    InvalidInteger(String),

    #[error("integer literal {0} out of range")]
    IntegerOutOfRange(String),
}
