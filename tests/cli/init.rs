use anyhow::{Context, Result};
use insta::assert_snapshot;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["init"])?;
    assert_eq!(output.status.code(), Some(0));
    assert_snapshot!(stdout(&output), @"✓ Created .tokstorerc.json");

    let content = test.read_file(".tokstorerc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["includeComments"], false);
    assert_eq!(parsed["ignores"][0], "**/node_modules/**");
    assert!(
        parsed["extensions"]
            .as_array()
            .is_some_and(|exts| exts.iter().any(|e| e == "tsx"))
    );
    assert!(content.contains("  "), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".tokstorerc.json", "{}")?;

    let output = test.run(&["init"])?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains(".tokstorerc.json already exists"));
    assert_eq!(test.read_file(".tokstorerc.json")?, "{}");

    Ok(())
}
