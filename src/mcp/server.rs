use std::path::Path;

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde::Serialize;

use super::types::{
    ListTokensParams, Pagination, QueryTokensParams, QueryTokensResult, TokenItem,
    TokenListResult,
};
use crate::cli::all_items;
use crate::parsers::load_source;
use crate::query::{QueryOutput, execute};
use crate::source::SourceCode;

const DEFAULT_LIMIT: usize = 200;
const MAX_LIMIT: usize = 1000;

fn load(file_path: &str) -> Result<SourceCode, McpError> {
    load_source(Path::new(file_path))
        .map_err(|e| McpError::internal_error(format!("Failed to load {}: {:#}", file_path, e), None))
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

#[derive(Clone)]
pub struct TokstoreMcpServer {
    tool_router: ToolRouter<Self>,
}

impl Default for TokstoreMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl TokstoreMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "List the tokens of a JS/TS file (or ESTree token dump) in source order, optionally interleaved with comments. Returns a paginated list with type, value, range, line and column."
    )]
    pub async fn list_tokens(
        &self,
        params: Parameters<ListTokensParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let limit = params
            .limit
            .map(|v| v as usize)
            .unwrap_or(DEFAULT_LIMIT)
            .min(MAX_LIMIT);
        let offset = params.offset.map(|v| v as usize).unwrap_or(0);

        let source = load(&params.file_path)?;
        let store = source.store();
        let items = all_items(store, params.include_comments.unwrap_or(false));
        let total = items.len();

        let page: Vec<TokenItem> = items
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|token| TokenItem::new(token, &source))
            .collect();
        let has_more = offset + page.len() < total;

        json_result(&TokenListResult {
            file_path: params.file_path,
            token_count: store.tokens().len(),
            comment_count: store.comments().len(),
            items: page,
            pagination: Pagination {
                offset,
                limit,
                has_more,
            },
        })
    }

    #[tool(
        description = "Run one token store query against a file. `query` names the operation (e.g. firstToken, tokensBefore, commentsInside); `node` and `right` are [start, end) byte ranges; `skip`, `count`, `includeComments`, `kinds`, `matches` and `padding` narrow the result."
    )]
    pub async fn query_tokens(
        &self,
        params: Parameters<QueryTokensParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let source = load(&params.file_path)?;
        let output = execute(&source, &params.request)
            .map_err(|e| McpError::invalid_params(format!("{:#}", e), None))?;

        let exists = match output {
            QueryOutput::Exists(exists) => Some(exists),
            QueryOutput::Tokens(_) => None,
        };
        let tokens: Vec<TokenItem> = output
            .tokens()
            .iter()
            .map(|token| TokenItem::new(token, &source))
            .collect();

        json_result(&QueryTokensResult {
            query: params.request.query,
            count: tokens.len(),
            tokens,
            exists,
        })
    }
}

#[tool_handler]
impl ServerHandler for TokstoreMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "tokstore answers questions about the tokens and comments of JavaScript and TypeScript files.\n\n\
                 Available tools:\n\
                 1. list_tokens - List tokens (and optionally comments) with their byte ranges\n\
                 2. query_tokens - Find tokens or comments relative to a byte range: first/last token, \
                 token before/after, tokens between two ranges, comments before/after/inside\n\n\
                 Recommended Workflow:\n\
                 1. Use list_tokens to find the byte ranges you are interested in\n\
                 2. Pass those ranges as `node`/`right` to query_tokens"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = TokstoreMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
