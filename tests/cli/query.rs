use anyhow::Result;
use insta::assert_snapshot;
use serde_json::{Value, json};

use crate::{APP_JS, CliTest, stderr, stdout};

#[test]
fn test_query_token_before() -> Result<()> {
    let test = CliTest::with_file("app.js", APP_JS)?;

    let output = test.run(&["query", "app.js", "token-before", "--node", "46:50"])?;
    assert_eq!(output.status.code(), Some(0));
    assert_snapshot!(stdout(&output), @r#"
    token-before 46..50: 1 result(s)

    Punctuator "(" 45..46
      --> app.js:3:6
      |
    3 | greet(name);
      |      ^
    "#);

    Ok(())
}

#[test]
fn test_query_comments_before_json() -> Result<()> {
    let test = CliTest::with_file("app.js", APP_JS)?;

    let output = test.run(&[
        "query",
        "app.js",
        "comments-before",
        "--node",
        "18:39",
        "--json",
    ])?;
    assert_eq!(output.status.code(), Some(0));

    let result: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(
        result,
        json!({
            "query": "commentsBefore",
            "node": [18, 39],
            "tokens": [{"type": "Line", "value": " greet the user", "range": [0, 17]}]
        })
    );

    Ok(())
}

#[test]
fn test_query_with_filter_and_count() -> Result<()> {
    let test = CliTest::with_file("app.js", APP_JS)?;

    let output = test.run(&[
        "query",
        "app.js",
        "tokens-before",
        "--node",
        "50:51",
        "--kind",
        "identifier",
        "--count",
        "2",
        "--json",
    ])?;
    let result: Value = serde_json::from_str(&stdout(&output))?;
    let values: Vec<&str> = result["tokens"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["value"].as_str().unwrap())
        .collect();
    assert_eq!(values, vec!["greet", "name"]);

    Ok(())
}

#[test]
fn test_query_comments_exist_between() -> Result<()> {
    let test = CliTest::with_file("app.js", APP_JS)?;

    let output = test.run(&[
        "query",
        "app.js",
        "comments-exist-between",
        "--node",
        "18:23",
        "--right",
        "24:28",
    ])?;
    assert_eq!(output.status.code(), Some(0));
    assert_snapshot!(stdout(&output), @"comments-exist-between 18..23 24..28: no");

    Ok(())
}

#[test]
fn test_query_between_without_right_fails() -> Result<()> {
    let test = CliTest::with_file("app.js", APP_JS)?;

    let output = test.run(&["query", "app.js", "tokens-between", "--node", "18:23"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("needs a right range"));

    Ok(())
}

#[test]
fn test_query_rejects_inverted_range() -> Result<()> {
    let test = CliTest::with_file("app.js", APP_JS)?;

    let output = test.run(&["query", "app.js", "first-token", "--node", "30:20"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("starts after it ends"));

    Ok(())
}
