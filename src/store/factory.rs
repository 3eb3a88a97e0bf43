//! Builds cursors from query options.
//!
//! Decorators are applied in a fixed order, filter then skip then limit, so
//! `skip` and `count` both count only items that pass the filter.

use super::cursor::{
    Bounds, CursorKind, Direction, FilterCursor, LimitCursor, PaddedCursor, Sequences,
    SkipCursor, TokenCommentCursor, TokenCursor,
};
use super::options::{CountOptions, Filter};

fn base<'f>(
    seq: Sequences<'_>,
    include_comments: bool,
    bounds: Bounds,
    direction: Direction,
) -> CursorKind<'f> {
    if include_comments {
        TokenCommentCursor::new(seq, bounds, direction).into()
    } else {
        TokenCursor::new(seq, bounds, direction).into()
    }
}

fn decorate<'f>(
    mut cursor: CursorKind<'f>,
    filter: Option<Filter<'f>>,
    skip: usize,
    count: Option<usize>,
) -> CursorKind<'f> {
    if let Some(filter) = filter {
        cursor = FilterCursor::new(cursor, filter).into();
    }
    if skip >= 1 {
        cursor = SkipCursor::new(cursor, skip).into();
    }
    if let Some(count) = count {
        cursor = LimitCursor::new(cursor, count).into();
    }
    cursor
}

/// A cursor for single-token queries.
pub(crate) fn cursor_with_skip<'f>(
    seq: Sequences<'_>,
    bounds: Bounds,
    direction: Direction,
    include_comments: bool,
    filter: Option<Filter<'f>>,
    skip: usize,
) -> CursorKind<'f> {
    decorate(base(seq, include_comments, bounds, direction), filter, skip, None)
}

/// A cursor for multi-token queries.
pub(crate) fn cursor_with_count<'f>(
    seq: Sequences<'_>,
    bounds: Bounds,
    direction: Direction,
    options: CountOptions<'f>,
) -> CursorKind<'f> {
    decorate(
        base(seq, options.include_comments, bounds, direction),
        options.filter,
        0,
        options.count,
    )
}

/// A forward token cursor over `bounds`, widened by `before` and `after`
/// tokens.
pub(crate) fn cursor_with_padding<'f>(
    seq: Sequences<'_>,
    bounds: Bounds,
    before: usize,
    after: usize,
) -> CursorKind<'f> {
    PaddedCursor::new(seq, bounds, before, after).into()
}
