//! JavaScript/TypeScript front end built on swc.
//!
//! swc's parser gives the module AST and the comments; its lexer gives the
//! token spans. Spans the lexer cannot classify on its own (regular
//! expressions, template pieces, JSX text and names) are taken from the AST
//! instead, which also matches the ESTree token shapes.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use swc_common::comments::{CommentKind, SingleThreadedComments};
use swc_common::{BytePos, FileName, SourceMap, Spanned};
use swc_ecma_ast::{JSXAttrName, JSXElementName, JSXText, Regex, Tpl};
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax, lexer::Lexer};
use swc_ecma_visit::{Visit, VisitWith};
use tracing::debug;

use crate::source::{SourceCode, SourceNode, nodes::collect_nodes};
use crate::token::{Span, Token, TokenKind};

/// Reserved words reported as `Keyword` tokens.
const KEYWORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "export", "extends", "finally", "for", "function", "if", "import", "in",
    "instanceof", "let", "new", "return", "static", "super", "switch", "this", "throw", "try",
    "typeof", "var", "void", "while", "with", "yield",
];

pub struct ParsedSource {
    pub text: String,
    pub tokens: Vec<Token>,
    pub comments: Vec<Token>,
    pub nodes: Vec<SourceNode>,
}

impl ParsedSource {
    pub fn into_source_code(self) -> SourceCode {
        SourceCode::new(self.text, self.tokens, self.comments).with_nodes(self.nodes)
    }
}

/// TypeScript syntax, with JSX enabled for `.tsx` and `.jsx` files.
pub fn syntax_for(path: &str) -> Syntax {
    let tsx = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext, "tsx" | "jsx"));
    Syntax::Typescript(TsSyntax {
        tsx,
        ..Default::default()
    })
}

pub fn parse_file(path: &Path) -> Result<ParsedSource> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read source file: {:?}", path))?;
    parse_source(text, &path.to_string_lossy())
}

/// Parse source text into token and comment sequences plus node anchors.
pub fn parse_source(text: String, file_path: &str) -> Result<ParsedSource> {
    let source_map = SourceMap::default();
    let source_file =
        source_map.new_source_file(FileName::Real(file_path.into()).into(), text.clone());
    let base = source_file.start_pos;
    let syntax = syntax_for(file_path);

    let swc_comments = SingleThreadedComments::default();
    let mut parser = Parser::new(syntax, StringInput::from(&*source_file), Some(&swc_comments));
    let module = parser
        .parse_module()
        .map_err(|e| anyhow!("Failed to parse {}: {:?}", file_path, e))?;
    let recovered = parser.take_errors();
    if !recovered.is_empty() {
        debug!(file = file_path, errors = recovered.len(), "recovered from parse errors");
    }

    let shebang = shebang(&text);
    let mut comments: Vec<Token> = shebang.iter().cloned().collect();
    {
        let (leading, trailing) = swc_comments.borrow_all();
        comments.extend(
            leading
                .iter()
                .chain(trailing.iter())
                .flat_map(|(_, cmts)| cmts.iter())
                .map(|cmt| {
                    let kind = match cmt.kind {
                        CommentKind::Line => TokenKind::Line,
                        CommentKind::Block => TokenKind::Block,
                    };
                    Token::new(kind, cmt.text.to_string(), to_span(cmt.span, base))
                }),
        );
    }
    comments.sort_by_key(Token::start);
    comments.dedup_by_key(|cmt| cmt.start());

    let mut overrides = LexicalOverrides {
        text: &text,
        base,
        tokens: Vec::new(),
    };
    module.visit_with(&mut overrides);
    let mut fixed = overrides.tokens;
    fixed.sort_by_key(Token::start);
    fixed.dedup_by_key(|token| token.start());

    let comment_spans: Vec<Span> = comments.iter().map(|c| c.span).collect();
    let mut blocked: Vec<Span> = fixed.iter().map(|t| t.span).collect();
    blocked.extend(shebang.map(|s| s.span));
    blocked.sort_by_key(|span| span.start);

    let mut tokens: Vec<Token> = lex_gaps(&source_map, syntax, &text, &blocked)
        .into_iter()
        .filter(|span| !overlaps(&comment_spans, *span))
        .filter_map(|span| lexed_token(&text, span))
        .collect();
    tokens.extend(fixed);
    tokens.sort_by_key(Token::start);
    tokens.dedup_by_key(|token| token.start());

    let nodes = collect_nodes(&module, base.0);
    debug!(
        file = file_path,
        tokens = tokens.len(),
        comments = comments.len(),
        nodes = nodes.len(),
        "parsed source"
    );

    Ok(ParsedSource {
        text,
        tokens,
        comments,
        nodes,
    })
}

fn to_span(span: swc_common::Span, base: BytePos) -> Span {
    Span::new(
        span.lo.0.saturating_sub(base.0),
        span.hi.0.saturating_sub(base.0),
    )
}

/// Token spans of everything outside `blocked`.
///
/// Each gap is lexed on its own, so a construct the lexer misreads cannot
/// shift the tokens after it.
fn lex_gaps(source_map: &SourceMap, syntax: Syntax, text: &str, blocked: &[Span]) -> Vec<Span> {
    let len = u32::try_from(text.len()).unwrap_or(u32::MAX);
    let mut spans = Vec::new();
    let mut start = 0;
    for stop in blocked.iter().copied().chain([Span::new(len, len)]) {
        if stop.start > start {
            spans.extend(lex_segment(source_map, syntax, text, Span::new(start, stop.start)));
        }
        start = start.max(stop.end);
    }
    spans
}

fn lex_segment(source_map: &SourceMap, syntax: Syntax, text: &str, segment: Span) -> Vec<Span> {
    let Some(code) = text.get(segment.start as usize..segment.end as usize) else {
        return Vec::new();
    };
    let file = source_map.new_source_file(FileName::Anon.into(), code.to_string());
    let (base, end) = (file.start_pos, file.end_pos);
    Lexer::new(syntax, Default::default(), StringInput::from(&*file), None)
        .take(code.len() + 1)
        .take_while(|t| t.span.lo < end)
        .map(|t| to_span(t.span, base))
        .filter(|span| !span.is_empty())
        .map(|span| Span::new(span.start + segment.start, span.end + segment.start))
        .collect()
}

/// Whether `span` overlaps any of the sorted, disjoint `ranges`.
fn overlaps(ranges: &[Span], span: Span) -> bool {
    let i = ranges.partition_point(|r| r.start < span.end);
    i > 0 && ranges[i - 1].end > span.start
}

/// A `#!` line at the very start of the file, as a `Shebang` comment.
fn shebang(text: &str) -> Option<Token> {
    let rest = text.strip_prefix("#!")?;
    let line = rest.split(['\r', '\n']).next().unwrap_or_default();
    let end = u32::try_from(line.len() + 2).ok()?;
    Some(Token::new(TokenKind::Shebang, line, Span::new(0, end)))
}

fn lexed_token(text: &str, span: Span) -> Option<Token> {
    let raw = text.get(span.start as usize..span.end as usize)?;
    let kind = classify(raw);
    let value = match kind {
        TokenKind::PrivateIdentifier => raw.trim_start_matches('#'),
        _ => raw,
    };
    Some(Token::new(kind, value, span))
}

/// ESTree token type of a lexed token, from its source text.
fn classify(raw: &str) -> TokenKind {
    match raw {
        "true" | "false" => return TokenKind::Boolean,
        "null" => return TokenKind::Null,
        _ if KEYWORDS.contains(&raw) => return TokenKind::Keyword,
        _ => {}
    }
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some('0'..='9'), _) => TokenKind::Numeric,
        (Some('.'), Some('0'..='9')) => TokenKind::Numeric,
        (Some('"' | '\''), _) => TokenKind::String,
        (Some('`'), _) => TokenKind::Template,
        (Some('#'), Some(_)) => TokenKind::PrivateIdentifier,
        (Some(c), _) if c == '_' || c == '$' || c == '\\' || c.is_alphabetic() => {
            TokenKind::Identifier
        }
        _ => TokenKind::Punctuator,
    }
}

/// Tokens whose shape comes from the AST rather than the lexer.
struct LexicalOverrides<'a> {
    text: &'a str,
    base: BytePos,
    tokens: Vec<Token>,
}

impl LexicalOverrides<'_> {
    fn push(&mut self, kind: TokenKind, span: Span) {
        if span.is_empty() {
            return;
        }
        if let Some(raw) = self.text.get(span.start as usize..span.end as usize) {
            self.tokens.push(Token::new(kind, raw, span));
        }
    }

    fn offset(&self, pos: BytePos) -> u32 {
        pos.0.saturating_sub(self.base.0)
    }
}

impl Visit for LexicalOverrides<'_> {
    fn visit_regex(&mut self, regex: &Regex) {
        self.push(TokenKind::RegularExpression, to_span(regex.span, self.base));
    }

    /// Splits a template literal into ESTree pieces: `` `a${ ``, `` }b${ ``,
    /// `` }c` ``.
    fn visit_tpl(&mut self, tpl: &Tpl) {
        let (lo, hi) = (self.offset(tpl.span.lo), self.offset(tpl.span.hi));
        let mut start = lo;
        for expr in &tpl.exprs {
            let expr_span = expr.span();
            let (expr_lo, expr_hi) = (self.offset(expr_span.lo), self.offset(expr_span.hi));
            let open = self
                .text
                .get(start as usize..expr_lo as usize)
                .and_then(|s| s.rfind("${"))
                .map_or(expr_lo, |i| start + i as u32 + 2);
            self.push(TokenKind::Template, Span::new(start, open));
            start = self
                .text
                .get(expr_hi as usize..hi as usize)
                .and_then(|s| s.find('}'))
                .map_or(expr_hi, |i| expr_hi + i as u32);
        }
        self.push(TokenKind::Template, Span::new(start, hi));
        tpl.visit_children_with(self);
    }

    fn visit_jsx_text(&mut self, text: &JSXText) {
        self.push(TokenKind::JsxText, to_span(text.span, self.base));
    }

    fn visit_jsx_element_name(&mut self, name: &JSXElementName) {
        if let JSXElementName::Ident(ident) = name {
            self.push(TokenKind::JsxIdentifier, to_span(ident.span, self.base));
        }
        name.visit_children_with(self);
    }

    fn visit_jsx_attr_name(&mut self, name: &JSXAttrName) {
        if let JSXAttrName::Ident(ident) = name {
            self.push(TokenKind::JsxIdentifier, to_span(ident.span, self.base));
        }
        name.visit_children_with(self);
    }
}
