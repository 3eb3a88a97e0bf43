use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;
use tokstore::mcp::{TokstoreMcpServer, types::ListTokensParams};

use crate::{McpTestFixture, SAMPLE_JS, extract_tool_result_json};

fn params(file_path: String) -> ListTokensParams {
    ListTokensParams {
        file_path,
        include_comments: None,
        offset: None,
        limit: None,
    }
}

#[tokio::test]
async fn test_list_tokens_defaults() {
    let fixture = McpTestFixture::new().unwrap();
    let path = fixture.write_file("app.js", SAMPLE_JS).unwrap();
    let server = TokstoreMcpServer::new();

    let result = server.list_tokens(Parameters(params(path.clone()))).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["filePath"], path);
    assert_eq!(json_result["tokenCount"], 14);
    assert_eq!(json_result["commentCount"], 2);
    assert_eq!(json_result["items"].as_array().unwrap().len(), 14);
    assert_eq!(
        json_result["items"][0],
        json!({"type": "Keyword", "value": "let", "range": [0, 3], "line": 1, "column": 1})
    );
    assert_eq!(json_result["pagination"]["hasMore"], false);
}

#[tokio::test]
async fn test_list_tokens_with_comments_paginated() {
    let fixture = McpTestFixture::new().unwrap();
    let path = fixture.write_file("app.js", SAMPLE_JS).unwrap();
    let server = TokstoreMcpServer::new();

    let mut p = params(path);
    p.include_comments = Some(true);
    p.offset = Some(2);
    p.limit = Some(3);

    let result = server.list_tokens(Parameters(p)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    let values: Vec<&str> = json_result["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["value"].as_str().unwrap())
        .collect();
    assert_eq!(values, vec!["=", "x", "1"]);
    assert_eq!(json_result["items"][1]["type"], "Block");
    assert_eq!(
        json_result["pagination"],
        json!({"offset": 2, "limit": 3, "hasMore": true})
    );
}

#[tokio::test]
async fn test_list_tokens_limit_is_capped() {
    let fixture = McpTestFixture::new().unwrap();
    let path = fixture.write_file("app.js", SAMPLE_JS).unwrap();
    let server = TokstoreMcpServer::new();

    let mut p = params(path);
    p.limit = Some(50_000);

    let result = server.list_tokens(Parameters(p)).await.unwrap();
    let json_result = extract_tool_result_json(&result);
    assert_eq!(json_result["pagination"]["limit"], 1000);
}

#[tokio::test]
async fn test_list_tokens_missing_file() {
    let fixture = McpTestFixture::new().unwrap();
    let server = TokstoreMcpServer::new();
    let path = fixture.path("missing.ts");

    let result = server.list_tokens(Parameters(params(path))).await;
    assert!(result.is_err());
}
