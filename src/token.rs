//! Token and comment data model.
//!
//! Tokens and comments share one shape: a kind, the source text, and a
//! half-open byte range. Which sequence a value is stored in (tokens or
//! comments) decides how the store treats it.

use serde::{Deserialize, Serialize};

/// A half-open `[start, end)` byte range into the source text.
///
/// Serialized as a two-element array, matching the ESTree `range` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whether `other` lies completely inside this span.
    pub const fn contains(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl From<[u32; 2]> for Span {
    fn from([start, end]: [u32; 2]) -> Self {
        Self { start, end }
    }
}

impl From<Span> for [u32; 2] {
    fn from(span: Span) -> Self {
        [span.start, span.end]
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Anything that covers a range of the source: AST nodes, tokens, comments.
///
/// Every store query is anchored on a `Ranged` value.
pub trait Ranged {
    fn span(&self) -> Span;
}

impl Ranged for Span {
    fn span(&self) -> Span {
        *self
    }
}

impl<T: Ranged + ?Sized> Ranged for &T {
    fn span(&self) -> Span {
        (**self).span()
    }
}

/// ESTree token types, plus the comment types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Boolean,
    Null,
    Identifier,
    Keyword,
    Punctuator,
    Numeric,
    String,
    RegularExpression,
    Template,
    #[serde(rename = "JSXIdentifier")]
    JsxIdentifier,
    #[serde(rename = "JSXText")]
    JsxText,
    PrivateIdentifier,
    /// `// ...`
    Line,
    /// `/* ... */`
    Block,
    /// `#!...` on the first line.
    Shebang,
}

impl TokenKind {
    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::Line | TokenKind::Block | TokenKind::Shebang)
    }

    /// ESTree name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Boolean => "Boolean",
            TokenKind::Null => "Null",
            TokenKind::Identifier => "Identifier",
            TokenKind::Keyword => "Keyword",
            TokenKind::Punctuator => "Punctuator",
            TokenKind::Numeric => "Numeric",
            TokenKind::String => "String",
            TokenKind::RegularExpression => "RegularExpression",
            TokenKind::Template => "Template",
            TokenKind::JsxIdentifier => "JSXIdentifier",
            TokenKind::JsxText => "JSXText",
            TokenKind::PrivateIdentifier => "PrivateIdentifier",
            TokenKind::Line => "Line",
            TokenKind::Block => "Block",
            TokenKind::Shebang => "Shebang",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TokenKind {
    type Err = String;

    /// Parses an ESTree kind name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ALL: [TokenKind; 15] = [
            TokenKind::Boolean,
            TokenKind::Null,
            TokenKind::Identifier,
            TokenKind::Keyword,
            TokenKind::Punctuator,
            TokenKind::Numeric,
            TokenKind::String,
            TokenKind::RegularExpression,
            TokenKind::Template,
            TokenKind::JsxIdentifier,
            TokenKind::JsxText,
            TokenKind::PrivateIdentifier,
            TokenKind::Line,
            TokenKind::Block,
            TokenKind::Shebang,
        ];
        ALL.into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown token kind '{}'", s))
    }
}

/// A lexical token or comment.
///
/// Field names follow ESTree when serialized (`type`, `value`, `range`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "type")]
    pub kind: TokenKind,
    #[serde(rename = "value")]
    pub text: String,
    #[serde(rename = "range")]
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    pub fn start(&self) -> u32 {
        self.span.start
    }

    pub fn end(&self) -> u32 {
        self.span.end
    }

    pub fn is_comment(&self) -> bool {
        self.kind.is_comment()
    }

    /// Punctuator with exactly this text.
    pub fn is_punctuator(&self, text: &str) -> bool {
        self.kind == TokenKind::Punctuator && self.text == text
    }
}

impl Ranged for Token {
    fn span(&self) -> Span {
        self.span
    }
}
