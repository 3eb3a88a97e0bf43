use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;
use tokstore::mcp::{TokstoreMcpServer, types::QueryTokensParams};

use crate::{McpTestFixture, SAMPLE_JS, extract_tool_result_json};

/// Builds params the way an MCP client sends them.
fn params(value: serde_json::Value) -> QueryTokensParams {
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn test_query_token_after_with_comments() {
    let fixture = McpTestFixture::new().unwrap();
    let path = fixture.write_file("app.js", SAMPLE_JS).unwrap();
    let server = TokstoreMcpServer::new();

    let p = params(json!({
        "filePath": path,
        "query": "tokenAfter",
        "node": [6, 7],
        "includeComments": true
    }));
    let result = server.query_tokens(Parameters(p)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["query"], "tokenAfter");
    assert_eq!(json_result["count"], 1);
    assert_eq!(json_result["tokens"][0]["value"], "x");
    assert!(json_result.get("exists").is_none());
}

#[tokio::test]
async fn test_query_comments_exist_between() {
    let fixture = McpTestFixture::new().unwrap();
    let path = fixture.write_file("app.js", SAMPLE_JS).unwrap();
    let server = TokstoreMcpServer::new();

    let p = params(json!({
        "filePath": path,
        "query": "commentsExistBetween",
        "node": [4, 5],
        "right": [14, 15]
    }));
    let result = server.query_tokens(Parameters(p)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["exists"], true);
    assert_eq!(json_result["count"], 0);
}

#[tokio::test]
async fn test_query_comments_after_reports_position() {
    let fixture = McpTestFixture::new().unwrap();
    let path = fixture.write_file("app.js", SAMPLE_JS).unwrap();
    let server = TokstoreMcpServer::new();

    let p = params(json!({
        "filePath": path,
        "query": "commentsAfter",
        "node": [20, 21]
    }));
    let result = server.query_tokens(Parameters(p)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(
        json_result["tokens"],
        json!([{"type": "Line", "value": " y", "range": [22, 26], "line": 2, "column": 6}])
    );
}

#[tokio::test]
async fn test_query_invalid_request_is_invalid_params() {
    let fixture = McpTestFixture::new().unwrap();
    let path = fixture.write_file("app.js", SAMPLE_JS).unwrap();
    let server = TokstoreMcpServer::new();

    let p = params(json!({
        "filePath": path,
        "query": "firstTokenBetween",
        "node": [0, 3]
    }));
    let err = server.query_tokens(Parameters(p)).await.unwrap_err();
    assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
    assert!(err.message.contains("right"));
}
