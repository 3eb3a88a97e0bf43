//! Cursors over the token and comment sequences.
//!
//! A cursor is built per query, walks a bounded slice of the sequences in one
//! direction and is dropped when the query returns. The base cursors
//! ([`TokenCursor`], [`TokenCommentCursor`], [`PaddedCursor`]) produce items;
//! the decorators ([`FilterCursor`], [`SkipCursor`], [`LimitCursor`]) wrap
//! another cursor and narrow what it yields.

use std::ops::Range;

use enum_dispatch::enum_dispatch;

use super::index::{PositionIndex, search, search_end};
use super::options::Filter;
use crate::token::{Span, Token};

/// The read-only state shared by every cursor of one store.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Sequences<'s> {
    pub(crate) tokens: &'s [Token],
    pub(crate) comments: &'s [Token],
    pub(crate) index: &'s PositionIndex,
}

/// Traversal direction, in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Backward,
}

/// Offset bounds of a traversal. `None` leaves that side unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Bounds {
    pub(crate) start: Option<u32>,
    pub(crate) end: Option<u32>,
}

impl Bounds {
    /// Items inside `span`.
    pub(crate) fn within(span: Span) -> Self {
        Self {
            start: Some(span.start),
            end: Some(span.end),
        }
    }

    /// Items ending at or before `offset`.
    pub(crate) fn before(offset: u32) -> Self {
        Self {
            start: None,
            end: Some(offset),
        }
    }

    /// Items starting at or after `offset`.
    pub(crate) fn after(offset: u32) -> Self {
        Self {
            start: Some(offset),
            end: None,
        }
    }

    /// Items strictly between two non-overlapping anchors.
    pub(crate) fn between(left: Span, right: Span) -> Self {
        Self {
            start: Some(left.end),
            end: Some(right.start),
        }
    }
}

#[enum_dispatch]
pub(crate) trait Advance {
    /// Moves one step in the cursor's direction.
    ///
    /// Returns `None` once the range is exhausted, and keeps returning
    /// `None` on every later call.
    fn advance<'s>(&mut self, seq: Sequences<'s>) -> Option<&'s Token>;
}

#[enum_dispatch(Advance)]
pub(crate) enum CursorKind<'f> {
    Tokens(TokenCursor),
    TokensAndComments(TokenCommentCursor),
    Padded(PaddedCursor),
    Filter(FilterCursor<'f>),
    Skip(SkipCursor<'f>),
    Limit(LimitCursor<'f>),
}

/// Iterates tokens only, over a window of token indices resolved through
/// the position index.
pub(crate) struct TokenCursor {
    window: Range<usize>,
    direction: Direction,
}

impl TokenCursor {
    pub(crate) fn new(seq: Sequences<'_>, bounds: Bounds, direction: Direction) -> Self {
        let start = seq.index.first_index(seq.tokens, bounds.start);
        let end = seq.index.end_index(seq.tokens, bounds.end);
        Self {
            window: start..end,
            direction,
        }
    }
}

impl Advance for TokenCursor {
    fn advance<'s>(&mut self, seq: Sequences<'s>) -> Option<&'s Token> {
        let index = match self.direction {
            Direction::Forward => self.window.next(),
            Direction::Backward => self.window.next_back(),
        }?;
        seq.tokens.get(index)
    }
}

/// Iterates tokens and comments merged in source order.
///
/// Keeps one position in each sequence; `token` and `comment` are the next
/// candidates going forward, or one past them going backward.
pub(crate) struct TokenCommentCursor {
    token: usize,
    comment: usize,
    /// Forward: the end bound. Backward: the start bound.
    border: Option<u32>,
    direction: Direction,
}

impl TokenCommentCursor {
    pub(crate) fn new(seq: Sequences<'_>, bounds: Bounds, direction: Direction) -> Self {
        match direction {
            Direction::Forward => Self {
                token: seq.index.first_index(seq.tokens, bounds.start),
                comment: bounds.start.map_or(0, |start| search(seq.comments, start)),
                border: bounds.end,
                direction,
            },
            Direction::Backward => Self {
                token: seq.index.end_index(seq.tokens, bounds.end),
                comment: bounds
                    .end
                    .map_or(seq.comments.len(), |end| search_end(seq.comments, end)),
                border: bounds.start,
                direction,
            },
        }
    }

    fn next_forward<'s>(&mut self, seq: Sequences<'s>) -> Option<&'s Token> {
        let token = seq.tokens.get(self.token);
        let comment = seq.comments.get(self.comment);
        let (item, is_token) = match (token, comment) {
            (Some(t), Some(c)) if t.start() < c.start() => (t, true),
            (Some(t), None) => (t, true),
            (_, Some(c)) => (c, false),
            (None, None) => return None,
        };
        if self.border.is_some_and(|border| item.end() > border) {
            return None;
        }
        if is_token {
            self.token += 1;
        } else {
            self.comment += 1;
        }
        Some(item)
    }

    fn next_backward<'s>(&mut self, seq: Sequences<'s>) -> Option<&'s Token> {
        let token = self.token.checked_sub(1).and_then(|i| seq.tokens.get(i));
        let comment = self.comment.checked_sub(1).and_then(|i| seq.comments.get(i));
        let (item, is_token) = match (token, comment) {
            (Some(t), Some(c)) if t.end() > c.end() => (t, true),
            (Some(t), None) => (t, true),
            (_, Some(c)) => (c, false),
            (None, None) => return None,
        };
        if self.border.is_some_and(|border| item.start() < border) {
            return None;
        }
        if is_token {
            self.token -= 1;
        } else {
            self.comment -= 1;
        }
        Some(item)
    }
}

impl Advance for TokenCommentCursor {
    fn advance<'s>(&mut self, seq: Sequences<'s>) -> Option<&'s Token> {
        match self.direction {
            Direction::Forward => self.next_forward(seq),
            Direction::Backward => self.next_backward(seq),
        }
    }
}

/// Forward token cursor whose window is widened by fixed counts on both
/// sides, clamped to the token sequence.
pub(crate) struct PaddedCursor(TokenCursor);

impl PaddedCursor {
    pub(crate) fn new(seq: Sequences<'_>, bounds: Bounds, before: usize, after: usize) -> Self {
        let TokenCursor { window, direction } =
            TokenCursor::new(seq, bounds, Direction::Forward);
        let start = window.start.saturating_sub(before);
        let end = window.end.saturating_add(after).min(seq.tokens.len());
        Self(TokenCursor {
            window: start..end,
            direction,
        })
    }
}

impl Advance for PaddedCursor {
    fn advance<'s>(&mut self, seq: Sequences<'s>) -> Option<&'s Token> {
        self.0.advance(seq)
    }
}

/// Yields only the items that pass a predicate.
pub(crate) struct FilterCursor<'f> {
    inner: Box<CursorKind<'f>>,
    predicate: Filter<'f>,
}

impl<'f> FilterCursor<'f> {
    pub(crate) fn new(inner: CursorKind<'f>, predicate: Filter<'f>) -> Self {
        Self {
            inner: Box::new(inner),
            predicate,
        }
    }
}

impl Advance for FilterCursor<'_> {
    fn advance<'s>(&mut self, seq: Sequences<'s>) -> Option<&'s Token> {
        loop {
            let item = self.inner.advance(seq)?;
            if (self.predicate)(item) {
                return Some(item);
            }
        }
    }
}

/// Discards the first `remaining` items, then delegates.
pub(crate) struct SkipCursor<'f> {
    inner: Box<CursorKind<'f>>,
    remaining: usize,
}

impl<'f> SkipCursor<'f> {
    pub(crate) fn new(inner: CursorKind<'f>, count: usize) -> Self {
        Self {
            inner: Box::new(inner),
            remaining: count,
        }
    }
}

impl Advance for SkipCursor<'_> {
    fn advance<'s>(&mut self, seq: Sequences<'s>) -> Option<&'s Token> {
        while self.remaining > 0 {
            self.remaining -= 1;
            self.inner.advance(seq)?;
        }
        self.inner.advance(seq)
    }
}

/// Yields at most `remaining` items.
pub(crate) struct LimitCursor<'f> {
    inner: Box<CursorKind<'f>>,
    remaining: usize,
}

impl<'f> LimitCursor<'f> {
    pub(crate) fn new(inner: CursorKind<'f>, count: usize) -> Self {
        Self {
            inner: Box::new(inner),
            remaining: count,
        }
    }
}

impl Advance for LimitCursor<'_> {
    fn advance<'s>(&mut self, seq: Sequences<'s>) -> Option<&'s Token> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.inner.advance(seq)
    }
}

/// A cursor bound to the sequences it walks.
///
/// `current` is `None` before the first move and after exhaustion.
pub(crate) struct Cursor<'s, 'f> {
    seq: Sequences<'s>,
    kind: CursorKind<'f>,
    current: Option<&'s Token>,
}

impl<'s, 'f> Cursor<'s, 'f> {
    pub(crate) fn new(seq: Sequences<'s>, kind: CursorKind<'f>) -> Self {
        Self {
            seq,
            kind,
            current: None,
        }
    }

    pub(crate) fn current(&self) -> Option<&'s Token> {
        self.current
    }

    /// Moves to the next item in the cursor's direction.
    pub(crate) fn move_next(&mut self) -> bool {
        self.current = self.kind.advance(self.seq);
        self.current.is_some()
    }

    /// Consumes the cursor and returns its first item.
    pub(crate) fn first(mut self) -> Option<&'s Token> {
        self.move_next();
        self.current()
    }
}

impl<'s> Iterator for Cursor<'s, '_> {
    type Item = &'s Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.move_next();
        self.current()
    }
}
