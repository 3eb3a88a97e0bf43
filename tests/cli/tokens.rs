use anyhow::Result;
use serde_json::{Value, json};

use crate::{APP_JS, CliTest, stderr, stdout};

#[test]
fn test_tokens_table() -> Result<()> {
    let test = CliTest::with_file("app.js", APP_JS)?;

    let output = test.run(&["tokens", "app.js"])?;
    assert_eq!(output.status.code(), Some(0));

    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 11);
    assert!(lines[0].starts_with(" 2:1  Keyword "));
    assert!(lines[0].ends_with("18..23     \"const\""));
    assert!(lines[2].contains("Punctuator"));
    assert!(lines[3].ends_with("\"\\\"world\\\"\""));
    assert!(!out.contains("greet the user"));
    assert_eq!(lines[10], "✓ 10 token(s), 0 comment(s)");

    Ok(())
}

#[test]
fn test_tokens_with_comments_json() -> Result<()> {
    let test = CliTest::with_file("app.js", APP_JS)?;

    let output = test.run(&["tokens", "app.js", "--include-comments", "--json"])?;
    assert_eq!(output.status.code(), Some(0));

    let items: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(items.as_array().map(Vec::len), Some(11));
    assert_eq!(
        items[0],
        json!({"type": "Line", "value": " greet the user", "range": [0, 17]})
    );
    assert_eq!(
        items[1],
        json!({"type": "Keyword", "value": "const", "range": [18, 23]})
    );

    Ok(())
}

#[test]
fn test_tokens_include_comments_from_config() -> Result<()> {
    let test = CliTest::with_file("app.js", APP_JS)?;
    test.write_file(".tokstorerc.json", r#"{ "includeComments": true }"#)?;

    let output = test.run(&["tokens", "app.js"])?;
    assert!(stdout(&output).contains("✓ 10 token(s), 1 comment(s)"));

    Ok(())
}

#[test]
fn test_tokens_from_token_dump() -> Result<()> {
    let test = CliTest::with_file(
        "dump.json",
        r#"{
            "tokens": [
                {"type": "Identifier", "value": "a", "range": [0, 1]},
                {"type": "Punctuator", "value": ";", "range": [1, 2]}
            ],
            "source": "a;"
        }"#,
    )?;

    let output = test.run(&["tokens", "dump.json"])?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("✓ 2 token(s), 0 comment(s)"));

    Ok(())
}

#[test]
fn test_tokens_missing_file() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["tokens", "missing.ts"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).starts_with("Error:"));

    Ok(())
}

#[test]
fn test_tokens_parse_error() -> Result<()> {
    let test = CliTest::with_file("broken.ts", "let x = (;")?;

    let output = test.run(&["tokens", "broken.ts"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("broken.ts"));

    Ok(())
}
