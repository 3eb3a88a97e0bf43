//! Shared test input: a small program with comments between most tokens.

use crate::token::{Span, Token, TokenKind};

pub(crate) const SOURCE: &str =
    "/*A*/var answer/*B*/=/*C*/a/*D*/* b/*E*///F\n    call();\n/*Z*/";

pub(crate) const PROGRAM: Span = Span::new(5, 55);
pub(crate) const DECLARATION: Span = Span::new(5, 35);
pub(crate) const DECLARATOR_ID: Span = Span::new(9, 15);
pub(crate) const BINARY: Span = Span::new(26, 35);
pub(crate) const BINARY_LEFT: Span = Span::new(26, 27);
pub(crate) const BINARY_RIGHT: Span = Span::new(34, 35);
pub(crate) const CALL: Span = Span::new(48, 54);

pub(crate) fn tokens() -> Vec<Token> {
    [
        (TokenKind::Keyword, "var", 5, 8),
        (TokenKind::Identifier, "answer", 9, 15),
        (TokenKind::Punctuator, "=", 20, 21),
        (TokenKind::Identifier, "a", 26, 27),
        (TokenKind::Punctuator, "*", 32, 33),
        (TokenKind::Identifier, "b", 34, 35),
        (TokenKind::Identifier, "call", 48, 52),
        (TokenKind::Punctuator, "(", 52, 53),
        (TokenKind::Punctuator, ")", 53, 54),
        (TokenKind::Punctuator, ";", 54, 55),
    ]
    .into_iter()
    .map(|(kind, text, start, end)| Token::new(kind, text, Span::new(start, end)))
    .collect()
}

pub(crate) fn comments() -> Vec<Token> {
    [
        (TokenKind::Block, "A", 0, 5),
        (TokenKind::Block, "B", 15, 20),
        (TokenKind::Block, "C", 21, 26),
        (TokenKind::Block, "D", 27, 32),
        (TokenKind::Block, "E", 35, 40),
        (TokenKind::Line, "F", 40, 43),
        (TokenKind::Block, "Z", 56, 61),
    ]
    .into_iter()
    .map(|(kind, text, start, end)| Token::new(kind, text, Span::new(start, end)))
    .collect()
}

pub(crate) fn store() -> super::TokenStore {
    super::TokenStore::new(tokens(), comments())
}

/// Values of the given tokens, in order.
pub(crate) fn values<'a>(tokens: impl IntoIterator<Item = &'a Token>) -> Vec<&'a str> {
    tokens.into_iter().map(|t| t.text.as_str()).collect()
}
