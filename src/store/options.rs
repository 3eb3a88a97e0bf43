//! Query options.
//!
//! Single-token queries take [`SkipOptions`], multi-token queries take
//! [`CountOptions`]. A bare integer converts into either one (`skip` or
//! `count` respectively); predicates go through the `by_filter` constructors.
//! The legacy padded form of `all_tokens` takes a [`Padding`].

use crate::token::Token;

/// Predicate deciding which tokens a cursor yields.
pub type Filter<'f> = &'f dyn Fn(&Token) -> bool;

/// Options for queries that return a single token.
#[derive(Clone, Copy, Default)]
pub struct SkipOptions<'f> {
    /// Iterate comments as well as tokens.
    pub include_comments: bool,
    pub filter: Option<Filter<'f>>,
    /// Number of matching items to skip before the result.
    pub skip: usize,
}

impl<'f> SkipOptions<'f> {
    pub fn by_skip(skip: usize) -> Self {
        Self {
            skip,
            ..Self::default()
        }
    }

    pub fn by_filter(filter: Filter<'f>) -> Self {
        Self {
            filter: Some(filter),
            ..Self::default()
        }
    }

    pub fn with_comments(mut self) -> Self {
        self.include_comments = true;
        self
    }

    pub fn with_filter(mut self, filter: Filter<'f>) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }
}

impl From<usize> for SkipOptions<'_> {
    fn from(skip: usize) -> Self {
        Self::by_skip(skip)
    }
}

impl std::fmt::Debug for SkipOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkipOptions")
            .field("include_comments", &self.include_comments)
            .field("filter", &self.filter.is_some())
            .field("skip", &self.skip)
            .finish()
    }
}

/// Options for queries that return a sequence of tokens.
#[derive(Clone, Copy, Default)]
pub struct CountOptions<'f> {
    /// Iterate comments as well as tokens.
    pub include_comments: bool,
    pub filter: Option<Filter<'f>>,
    /// Maximum number of items. `None` is unbounded; `Some(0)` yields nothing.
    pub count: Option<usize>,
}

impl<'f> CountOptions<'f> {
    pub fn by_count(count: usize) -> Self {
        Self {
            count: Some(count),
            ..Self::default()
        }
    }

    pub fn by_filter(filter: Filter<'f>) -> Self {
        Self {
            filter: Some(filter),
            ..Self::default()
        }
    }

    pub fn with_comments(mut self) -> Self {
        self.include_comments = true;
        self
    }

    pub fn with_filter(mut self, filter: Filter<'f>) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

impl From<usize> for CountOptions<'_> {
    fn from(count: usize) -> Self {
        Self::by_count(count)
    }
}

impl std::fmt::Debug for CountOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountOptions")
            .field("include_comments", &self.include_comments)
            .field("filter", &self.filter.is_some())
            .field("count", &self.count)
            .finish()
    }
}

/// Extra tokens to include around a range, clamped at the sequence ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Padding {
    pub before: usize,
    pub after: usize,
}

impl Padding {
    pub const NONE: Padding = Padding::new(0, 0);

    pub const fn new(before: usize, after: usize) -> Self {
        Self { before, after }
    }

    pub const fn symmetric(count: usize) -> Self {
        Self::new(count, count)
    }
}
