//! Position index: boundary offsets mapped to token-array indices.
//!
//! For every token, its first and last byte offsets map to the token's own
//! index. For every comment, both boundaries map to the index of the token
//! that follows it, so a pure-token cursor can resolve a query bound that
//! lands on a comment without looking at the comment array.

use crate::token::Token;

/// Index of the first item whose start is `>= offset`, or `items.len()`.
pub(crate) fn search(items: &[Token], offset: u32) -> usize {
    items.partition_point(|item| item.span.start < offset)
}

/// Number of leading items that end at or before `offset`.
///
/// Items are non-overlapping, so ends ascend with starts.
pub(crate) fn search_end(items: &[Token], offset: u32) -> usize {
    items.partition_point(|item| item.span.end <= offset)
}

/// Sorted `(offset, token index)` pairs.
#[derive(Debug, Clone, Default)]
pub(crate) struct PositionIndex {
    entries: Vec<(u32, usize)>,
}

impl PositionIndex {
    /// Builds the index with a single merge walk over both sequences.
    pub(crate) fn build(tokens: &[Token], comments: &[Token]) -> Self {
        let mut index = Self {
            entries: Vec::with_capacity((tokens.len() + comments.len()) * 2),
        };
        let mut it = 0;
        let mut ic = 0;

        while it < tokens.len() || ic < comments.len() {
            let next_comment = comments.get(ic).map_or(u32::MAX, Token::start);
            while let Some(token) = tokens.get(it).filter(|t| t.start() < next_comment) {
                index.record(token, it);
                it += 1;
            }

            // `<=` keeps the walk moving even if a comment and a token share
            // a start offset, which well-formed input never does.
            let next_token = tokens.get(it).map_or(u32::MAX, Token::start);
            while let Some(comment) = comments.get(ic).filter(|c| c.start() <= next_token) {
                index.record(comment, it);
                ic += 1;
            }
        }

        index
    }

    fn record(&mut self, item: &Token, token_index: usize) {
        let last = item.end().saturating_sub(1).max(item.start());
        for offset in [item.start(), last] {
            // Offsets arrive in ascending order; a one-byte item repeats its
            // start, and malformed overlapping input is dropped.
            if self.entries.last().is_none_or(|&(prev, _)| prev < offset) {
                self.entries.push((offset, token_index));
            }
        }
    }

    /// The token index recorded at exactly `offset`.
    pub(crate) fn get(&self, offset: u32) -> Option<usize> {
        self.entries
            .binary_search_by_key(&offset, |&(key, _)| key)
            .ok()
            .map(|i| self.entries[i].1)
    }

    /// Index of the first token that starts at or after `start`.
    ///
    /// `start` may be a node's end offset (exclusive), so `start - 1` is
    /// checked as well. `None` means unbounded.
    pub(crate) fn first_index(&self, tokens: &[Token], start: Option<u32>) -> usize {
        let Some(start) = start else {
            return 0;
        };
        if let Some(index) = self.get(start) {
            // `start` may be the last byte of a token that begins earlier.
            return match tokens.get(index) {
                Some(token) if token.start() < start => index + 1,
                _ => index,
            };
        }
        if let Some(index) = start.checked_sub(1).and_then(|prev| self.get(prev)) {
            return match tokens.get(index) {
                None => tokens.len(),
                // Comment boundaries already point at the next token.
                Some(token) if token.start() >= start => index,
                Some(_) => index + 1,
            };
        }
        search(tokens, start)
    }

    /// One past the index of the last token that ends at or before `end`.
    ///
    /// End offsets are recorded at `end - 1`, so that is checked as well.
    /// `None` means unbounded.
    pub(crate) fn end_index(&self, tokens: &[Token], end: Option<u32>) -> usize {
        let Some(end) = end else {
            return tokens.len();
        };
        if let Some(index) = self.get(end) {
            return index;
        }
        if let Some(index) = end.checked_sub(1).and_then(|prev| self.get(prev)) {
            return match tokens.get(index) {
                None => tokens.len(),
                // Comment boundaries point at the token after the comment.
                Some(token) if token.end() > end => index,
                Some(_) => index + 1,
            };
        }
        search_end(tokens, end)
    }
}
