//! Token store: navigation over the token and comment sequences of one file.
//!
//! [`TokenStore`] answers "which token or comment is at or near this node"
//! queries. Every query builds a short-lived cursor over a bounded slice of
//! the sequences (see [`cursor`]), so a store can be shared by any number of
//! readers without locking.
//!
//! Query anchors are anything [`Ranged`]: AST nodes, tokens, comments, or a
//! bare [`Span`].

mod cursor;
mod factory;
mod index;
mod options;

#[cfg(test)]
pub(crate) mod fixture;

pub use options::{CountOptions, Filter, Padding, SkipOptions};

use tracing::debug;

use crate::token::{Ranged, Span, Token};
use cursor::{Bounds, Cursor, CursorKind, Direction, Sequences};
use index::{PositionIndex, search};

/// Immutable token and comment sequences plus the position index over them.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    tokens: Vec<Token>,
    comments: Vec<Token>,
    index: PositionIndex,
}

/// Span of a query anchor. Panics on a malformed anchor.
fn span_of(node: &impl Ranged) -> Span {
    let span = node.span();
    assert!(
        span.start <= span.end,
        "malformed anchor {}: start is after end",
        span
    );
    span
}

fn pair(left: &impl Ranged, right: &impl Ranged) -> Bounds {
    let (left, right) = (span_of(left), span_of(right));
    assert!(
        left.end <= right.start,
        "anchors {} and {} overlap or are out of order",
        left,
        right
    );
    Bounds::between(left, right)
}

impl TokenStore {
    /// Builds a store from sequences sorted by start offset, with no comment
    /// overlapping a token.
    pub fn new(tokens: Vec<Token>, comments: Vec<Token>) -> Self {
        debug_assert!(tokens.is_sorted_by_key(Token::start), "tokens out of order");
        debug_assert!(comments.is_sorted_by_key(Token::start), "comments out of order");

        let index = PositionIndex::build(&tokens, &comments);
        debug!(
            tokens = tokens.len(),
            comments = comments.len(),
            "built token store"
        );
        Self {
            tokens,
            comments,
            index,
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn comments(&self) -> &[Token] {
        &self.comments
    }

    fn seq(&self) -> Sequences<'_> {
        Sequences {
            tokens: &self.tokens,
            comments: &self.comments,
            index: &self.index,
        }
    }

    fn one<'f>(
        &self,
        bounds: Bounds,
        direction: Direction,
        options: SkipOptions<'f>,
    ) -> Option<&Token> {
        let kind = factory::cursor_with_skip(
            self.seq(),
            bounds,
            direction,
            options.include_comments,
            options.filter,
            options.skip,
        );
        Cursor::new(self.seq(), kind).first()
    }

    fn many<'f>(
        &self,
        bounds: Bounds,
        direction: Direction,
        options: CountOptions<'f>,
    ) -> Vec<&Token> {
        let kind = factory::cursor_with_count(self.seq(), bounds, direction, options);
        self.drain(kind, direction)
    }

    /// Collects a cursor in ascending source order.
    fn drain<'f>(&self, kind: CursorKind<'f>, direction: Direction) -> Vec<&Token> {
        let mut items: Vec<&Token> = Cursor::new(self.seq(), kind).collect();
        if direction == Direction::Backward {
            items.reverse();
        }
        items
    }

    // Single-token queries.

    /// The token starting exactly at `offset`, or the comment starting there
    /// when `include_comments` is set.
    pub fn token_by_range_start(&self, offset: u32, include_comments: bool) -> Option<&Token> {
        let options = SkipOptions {
            include_comments,
            ..SkipOptions::default()
        };
        self.one(Bounds::after(offset), Direction::Forward, options)
            .filter(|token| token.start() == offset)
    }

    pub fn first_token<'f>(
        &self,
        node: &impl Ranged,
        options: impl Into<SkipOptions<'f>>,
    ) -> Option<&Token> {
        let bounds = Bounds::within(span_of(node));
        self.one(bounds, Direction::Forward, options.into())
    }

    pub fn last_token<'f>(
        &self,
        node: &impl Ranged,
        options: impl Into<SkipOptions<'f>>,
    ) -> Option<&Token> {
        let bounds = Bounds::within(span_of(node));
        self.one(bounds, Direction::Backward, options.into())
    }

    /// The token ending at or before the anchor's start.
    pub fn token_before<'f>(
        &self,
        anchor: &impl Ranged,
        options: impl Into<SkipOptions<'f>>,
    ) -> Option<&Token> {
        let bounds = Bounds::before(span_of(anchor).start);
        self.one(bounds, Direction::Backward, options.into())
    }

    /// The token starting at or after the anchor's end.
    pub fn token_after<'f>(
        &self,
        anchor: &impl Ranged,
        options: impl Into<SkipOptions<'f>>,
    ) -> Option<&Token> {
        let bounds = Bounds::after(span_of(anchor).end);
        self.one(bounds, Direction::Forward, options.into())
    }

    pub fn first_token_between<'f>(
        &self,
        left: &impl Ranged,
        right: &impl Ranged,
        options: impl Into<SkipOptions<'f>>,
    ) -> Option<&Token> {
        self.one(pair(left, right), Direction::Forward, options.into())
    }

    pub fn last_token_between<'f>(
        &self,
        left: &impl Ranged,
        right: &impl Ranged,
        options: impl Into<SkipOptions<'f>>,
    ) -> Option<&Token> {
        self.one(pair(left, right), Direction::Backward, options.into())
    }

    #[deprecated(note = "use `token_before` with `SkipOptions::with_comments`")]
    pub fn token_or_comment_before(&self, anchor: &impl Ranged, skip: usize) -> Option<&Token> {
        self.token_before(anchor, SkipOptions::by_skip(skip).with_comments())
    }

    #[deprecated(note = "use `token_after` with `SkipOptions::with_comments`")]
    pub fn token_or_comment_after(&self, anchor: &impl Ranged, skip: usize) -> Option<&Token> {
        self.token_after(anchor, SkipOptions::by_skip(skip).with_comments())
    }

    // Multi-token queries. Results are always in ascending source order.

    pub fn first_tokens<'f>(
        &self,
        node: &impl Ranged,
        options: impl Into<CountOptions<'f>>,
    ) -> Vec<&Token> {
        let bounds = Bounds::within(span_of(node));
        self.many(bounds, Direction::Forward, options.into())
    }

    pub fn last_tokens<'f>(
        &self,
        node: &impl Ranged,
        options: impl Into<CountOptions<'f>>,
    ) -> Vec<&Token> {
        let bounds = Bounds::within(span_of(node));
        self.many(bounds, Direction::Backward, options.into())
    }

    /// Tokens before the anchor, nearest last. `count` counts back from the
    /// anchor.
    pub fn tokens_before<'f>(
        &self,
        anchor: &impl Ranged,
        options: impl Into<CountOptions<'f>>,
    ) -> Vec<&Token> {
        let bounds = Bounds::before(span_of(anchor).start);
        self.many(bounds, Direction::Backward, options.into())
    }

    pub fn tokens_after<'f>(
        &self,
        anchor: &impl Ranged,
        options: impl Into<CountOptions<'f>>,
    ) -> Vec<&Token> {
        let bounds = Bounds::after(span_of(anchor).end);
        self.many(bounds, Direction::Forward, options.into())
    }

    pub fn first_tokens_between<'f>(
        &self,
        left: &impl Ranged,
        right: &impl Ranged,
        options: impl Into<CountOptions<'f>>,
    ) -> Vec<&Token> {
        self.many(pair(left, right), Direction::Forward, options.into())
    }

    pub fn last_tokens_between<'f>(
        &self,
        left: &impl Ranged,
        right: &impl Ranged,
        options: impl Into<CountOptions<'f>>,
    ) -> Vec<&Token> {
        self.many(pair(left, right), Direction::Backward, options.into())
    }

    /// All tokens of `node`, widened by `padding` tokens on each side.
    pub fn all_tokens(&self, node: &impl Ranged, padding: Padding) -> Vec<&Token> {
        let bounds = Bounds::within(span_of(node));
        let kind = factory::cursor_with_padding(self.seq(), bounds, padding.before, padding.after);
        self.drain(kind, Direction::Forward)
    }

    /// Option form of [`all_tokens`](Self::all_tokens).
    pub fn tokens_with<'f>(
        &self,
        node: &impl Ranged,
        options: impl Into<CountOptions<'f>>,
    ) -> Vec<&Token> {
        self.first_tokens(node, options)
    }

    /// Tokens strictly between two anchors, widened by `padding` on both
    /// sides.
    pub fn tokens_between(
        &self,
        left: &impl Ranged,
        right: &impl Ranged,
        padding: usize,
    ) -> Vec<&Token> {
        let kind = factory::cursor_with_padding(self.seq(), pair(left, right), padding, padding);
        self.drain(kind, Direction::Forward)
    }

    /// Option form of [`tokens_between`](Self::tokens_between).
    pub fn tokens_between_with<'f>(
        &self,
        left: &impl Ranged,
        right: &impl Ranged,
        options: impl Into<CountOptions<'f>>,
    ) -> Vec<&Token> {
        self.first_tokens_between(left, right, options)
    }

    // Comment queries.

    /// Whether any comment lies entirely between the two anchors.
    pub fn comments_exist_between(&self, left: &impl Ranged, right: &impl Ranged) -> bool {
        let (left, right) = (span_of(left), span_of(right));
        self.comments
            .get(search(&self.comments, left.end))
            .is_some_and(|comment| comment.end() <= right.start)
    }

    /// Comments directly before the anchor, with no token in between.
    pub fn comments_before(&self, anchor: &impl Ranged) -> Vec<&Token> {
        let bounds = Bounds::before(span_of(anchor).start);
        let kind = factory::cursor_with_count(
            self.seq(),
            bounds,
            Direction::Backward,
            CountOptions::default().with_comments(),
        );
        let mut comments: Vec<&Token> = Cursor::new(self.seq(), kind)
            .take_while(|item| item.is_comment())
            .collect();
        comments.reverse();
        comments
    }

    /// Comments directly after the anchor, with no token in between.
    pub fn comments_after(&self, anchor: &impl Ranged) -> Vec<&Token> {
        let bounds = Bounds::after(span_of(anchor).end);
        let kind = factory::cursor_with_count(
            self.seq(),
            bounds,
            Direction::Forward,
            CountOptions::default().with_comments(),
        );
        Cursor::new(self.seq(), kind)
            .take_while(|item| item.is_comment())
            .collect()
    }

    /// Comments within `node`.
    pub fn comments_inside(&self, node: &impl Ranged) -> Vec<&Token> {
        let is_comment = |item: &Token| item.is_comment();
        self.first_tokens(node, CountOptions::by_filter(&is_comment).with_comments())
    }
}
