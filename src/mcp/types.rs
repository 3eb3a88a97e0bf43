use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::query::{QueryKind, QueryRequest};
use crate::source::SourceCode;
use crate::token::Token;

// ============================================================
// Parameters
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListTokensParams {
    /// Path to a JS/TS source file or an ESTree token dump (.json)
    pub file_path: String,
    /// Interleave comments with tokens (default: false)
    pub include_comments: Option<bool>,
    /// Number of items to skip (default: 0)
    pub offset: Option<u32>,
    /// Maximum number of items to return (default: 200, max: 1000)
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryTokensParams {
    /// Path to a JS/TS source file or an ESTree token dump (.json)
    pub file_path: String,
    #[serde(flatten)]
    pub request: QueryRequest,
}

// ============================================================
// Results
// ============================================================

/// A token or comment with its position.
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    pub range: [u32; 2],
    /// 1-based line
    pub line: usize,
    /// 1-based column, in characters
    pub column: usize,
}

impl TokenItem {
    pub fn new(token: &Token, source: &SourceCode) -> Self {
        let (line, column) = source.line_col(token.start());
        Self {
            kind: token.kind.as_str().to_string(),
            value: token.text.clone(),
            range: token.span.into(),
            line,
            column,
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenListResult {
    pub file_path: String,
    pub token_count: usize,
    pub comment_count: usize,
    pub items: Vec<TokenItem>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QueryTokensResult {
    pub query: QueryKind,
    pub count: usize,
    pub tokens: Vec<TokenItem>,
    /// Only set for `commentsExistBetween`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exists: Option<bool>,
}

/// Pagination information
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}
