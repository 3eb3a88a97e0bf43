//! One store query described as data.
//!
//! The CLI `query` command and the MCP `query_tokens` tool both build a
//! [`QueryRequest`] and hand it to [`execute`], which checks the request
//! before touching the store so malformed input becomes an error instead of a
//! panic.

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::source::SourceCode;
use crate::store::{CountOptions, Padding, SkipOptions, TokenStore};
use crate::token::{Span, Token, TokenKind};

/// Every store operation, by name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, ValueEnum,
)]
#[serde(rename_all = "camelCase")]
pub enum QueryKind {
    TokenByRangeStart,
    FirstToken,
    LastToken,
    TokenBefore,
    TokenAfter,
    TokenOrCommentBefore,
    TokenOrCommentAfter,
    FirstTokenBetween,
    LastTokenBetween,
    FirstTokens,
    LastTokens,
    TokensBefore,
    TokensAfter,
    FirstTokensBetween,
    LastTokensBetween,
    /// Tokens of a node, widened by `before`/`after`.
    AllTokens,
    /// Tokens of a node, narrowed by `count`/filters.
    Tokens,
    TokensBetween,
    CommentsExistBetween,
    CommentsBefore,
    CommentsAfter,
    CommentsInside,
}

impl QueryKind {
    /// Queries anchored on two nodes.
    pub fn needs_right(self) -> bool {
        matches!(
            self,
            Self::FirstTokenBetween
                | Self::LastTokenBetween
                | Self::FirstTokensBetween
                | Self::LastTokensBetween
                | Self::TokensBetween
                | Self::CommentsExistBetween
        )
    }
}

impl std::fmt::Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_possible_value() {
            Some(value) => f.write_str(value.get_name()),
            None => write!(f, "{:?}", self),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub query: QueryKind,
    /// Anchor range `[start, end)`. Not used by `tokenByRangeStart`.
    #[serde(default)]
    #[schemars(with = "Option<[u32; 2]>")]
    pub node: Option<Span>,
    /// Second anchor for the `*Between` queries.
    #[serde(default)]
    #[schemars(with = "Option<[u32; 2]>")]
    pub right: Option<Span>,
    /// Byte offset for `tokenByRangeStart`.
    #[serde(default)]
    pub offset: Option<u32>,
    #[serde(default)]
    pub skip: usize,
    /// Maximum number of results for multi-token queries.
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub include_comments: bool,
    /// Only yield these token types (ESTree names, case-insensitive).
    #[serde(default)]
    pub kinds: Vec<String>,
    /// Only yield tokens whose value matches this regex.
    #[serde(default)]
    pub matches: Option<String>,
    /// Padding on both sides for `allTokens` and `tokensBetween`.
    #[serde(default)]
    pub padding: usize,
    /// Overrides `padding` before the node for `allTokens`.
    #[serde(default)]
    pub before: Option<usize>,
    /// Overrides `padding` after the node for `allTokens`.
    #[serde(default)]
    pub after: Option<usize>,
}

impl QueryRequest {
    pub fn new(query: QueryKind) -> Self {
        Self {
            query,
            node: None,
            right: None,
            offset: None,
            skip: 0,
            count: None,
            include_comments: false,
            kinds: Vec::new(),
            matches: None,
            padding: 0,
            before: None,
            after: None,
        }
    }

    pub fn node(mut self, span: Span) -> Self {
        self.node = Some(span);
        self
    }

    pub fn right(mut self, span: Span) -> Self {
        self.right = Some(span);
        self
    }

    fn has_filter(&self) -> bool {
        !self.kinds.is_empty() || self.matches.is_some()
    }
}

/// What a query produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutput<'s> {
    Tokens(Vec<&'s Token>),
    Exists(bool),
}

impl<'s> QueryOutput<'s> {
    fn single(token: Option<&'s Token>) -> Self {
        Self::Tokens(token.into_iter().collect())
    }

    /// The tokens, or nothing for a yes/no query.
    pub fn tokens(&self) -> &[&'s Token] {
        match self {
            Self::Tokens(tokens) => tokens,
            Self::Exists(_) => &[],
        }
    }
}

/// Token predicate built from `kinds` and `matches`.
struct TokenFilter {
    kinds: Vec<TokenKind>,
    pattern: Option<Regex>,
}

impl TokenFilter {
    fn from_request(request: &QueryRequest) -> Result<Self> {
        let kinds = request
            .kinds
            .iter()
            .map(|name| name.parse::<TokenKind>().map_err(anyhow::Error::msg))
            .collect::<Result<Vec<_>>>()?;
        let pattern = request
            .matches
            .as_deref()
            .map(Regex::new)
            .transpose()
            .context("Invalid 'matches' pattern")?;
        Ok(Self { kinds, pattern })
    }

    fn accepts(&self, token: &Token) -> bool {
        (self.kinds.is_empty() || self.kinds.contains(&token.kind))
            && self
                .pattern
                .as_ref()
                .is_none_or(|re| re.is_match(&token.text))
    }
}

fn checked(span: Span, what: &str) -> Result<Span> {
    if span.start > span.end {
        bail!("'{}' range {} starts after it ends", what, span);
    }
    Ok(span)
}

pub fn execute<'s>(source: &'s SourceCode, request: &QueryRequest) -> Result<QueryOutput<'s>> {
    let store = source.store();
    let query = request.query;

    if query == QueryKind::TokenByRangeStart {
        let offset = request
            .offset
            .with_context(|| format!("'{}' needs an offset", query))?;
        return Ok(QueryOutput::single(
            store.token_by_range_start(offset, request.include_comments),
        ));
    }

    let node = request
        .node
        .with_context(|| format!("'{}' needs a node range", query))
        .and_then(|span| checked(span, "node"))?;
    let right = match request.right {
        Some(span) => Some(checked(span, "right")?),
        None if query.needs_right() => bail!("'{}' needs a right range", query),
        None => None,
    };
    if let Some(right) = right
        && node.end > right.start
    {
        bail!("ranges {} and {} overlap or are out of order", node, right);
    }

    let filter = TokenFilter::from_request(request)?;
    let predicate = |token: &Token| filter.accepts(token);
    let has_filter = request.has_filter();

    let mut skip = SkipOptions::by_skip(request.skip);
    let mut count = CountOptions {
        count: request.count,
        ..CountOptions::default()
    };
    if request.include_comments {
        skip = skip.with_comments();
        count = count.with_comments();
    }
    if has_filter {
        skip = skip.with_filter(&predicate);
        count = count.with_filter(&predicate);
    }

    Ok(dispatch(store, query, node, right.unwrap_or(node), skip, count, request))
}

#[allow(deprecated)]
fn dispatch<'s>(
    store: &'s TokenStore,
    query: QueryKind,
    node: Span,
    right: Span,
    skip: SkipOptions<'_>,
    count: CountOptions<'_>,
    request: &QueryRequest,
) -> QueryOutput<'s> {
    use QueryKind::*;

    let narrowed = request.count.is_some() || request.include_comments || request.has_filter();
    match query {
        TokenByRangeStart => {
            QueryOutput::single(store.token_by_range_start(node.start, request.include_comments))
        }
        FirstToken => QueryOutput::single(store.first_token(&node, skip)),
        LastToken => QueryOutput::single(store.last_token(&node, skip)),
        TokenBefore => QueryOutput::single(store.token_before(&node, skip)),
        TokenAfter => QueryOutput::single(store.token_after(&node, skip)),
        TokenOrCommentBefore => {
            QueryOutput::single(store.token_or_comment_before(&node, request.skip))
        }
        TokenOrCommentAfter => {
            QueryOutput::single(store.token_or_comment_after(&node, request.skip))
        }
        FirstTokenBetween => QueryOutput::single(store.first_token_between(&node, &right, skip)),
        LastTokenBetween => QueryOutput::single(store.last_token_between(&node, &right, skip)),
        FirstTokens => QueryOutput::Tokens(store.first_tokens(&node, count)),
        LastTokens => QueryOutput::Tokens(store.last_tokens(&node, count)),
        TokensBefore => QueryOutput::Tokens(store.tokens_before(&node, count)),
        TokensAfter => QueryOutput::Tokens(store.tokens_after(&node, count)),
        FirstTokensBetween => QueryOutput::Tokens(store.first_tokens_between(&node, &right, count)),
        LastTokensBetween => QueryOutput::Tokens(store.last_tokens_between(&node, &right, count)),
        AllTokens => {
            let padding = Padding::new(
                request.before.unwrap_or(request.padding),
                request.after.unwrap_or(request.padding),
            );
            QueryOutput::Tokens(store.all_tokens(&node, padding))
        }
        Tokens => QueryOutput::Tokens(store.tokens_with(&node, count)),
        TokensBetween if narrowed => {
            QueryOutput::Tokens(store.tokens_between_with(&node, &right, count))
        }
        TokensBetween => QueryOutput::Tokens(store.tokens_between(&node, &right, request.padding)),
        CommentsExistBetween => QueryOutput::Exists(store.comments_exist_between(&node, &right)),
        CommentsBefore => QueryOutput::Tokens(store.comments_before(&node)),
        CommentsAfter => QueryOutput::Tokens(store.comments_after(&node)),
        CommentsInside => QueryOutput::Tokens(store.comments_inside(&node)),
    }
}
