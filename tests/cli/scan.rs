use anyhow::Result;

use crate::{APP_JS, CliTest, stdout};

#[test]
fn test_scan_project() -> Result<()> {
    let test = CliTest::with_file("src/app.js", APP_JS)?;
    test.write_file("src/util.ts", "export const one: number = 1;\n")?;
    test.write_file("node_modules/lib/index.js", "module.exports = {};\n")?;
    test.write_file("README.md", "# readme\n")?;

    let output = test.run(&["scan"])?;
    assert_eq!(output.status.code(), Some(0));

    let out = stdout(&output);
    assert!(out.contains("note: no .tokstorerc.json found, using defaults"));
    assert!(out.contains("app.js  10 token(s), 1 comment(s)"));
    assert!(out.contains("util.ts  8 token(s), 0 comment(s)"));
    assert!(!out.contains("node_modules"));
    assert!(out.contains("✓ Scanned 2 file(s): 18 token(s), 1 comment(s)"));

    Ok(())
}

#[test]
fn test_scan_reports_parse_failures() -> Result<()> {
    let test = CliTest::with_file("app.js", APP_JS)?;
    test.write_file("broken.ts", "let x = (;")?;

    let output = test.run(&["scan", "."])?;
    assert_eq!(output.status.code(), Some(1));

    let out = stdout(&output);
    assert!(out.contains("error: "));
    assert!(out.contains("broken.ts"));
    assert!(out.contains("✘ Scanned 1 file(s): 10 token(s), 1 comment(s); 1 file(s) failed to parse"));

    Ok(())
}

#[test]
fn test_scan_respects_config() -> Result<()> {
    let test = CliTest::with_file("src/app.js", APP_JS)?;
    test.write_file("src/app.ts", "let a;\n")?;
    test.write_file(".tokstorerc.json", r#"{ "extensions": ["ts"] }"#)?;

    let output = test.run(&["scan"])?;
    let out = stdout(&output);
    assert!(!out.contains("note:"));
    assert!(out.contains("✓ Scanned 1 file(s): 3 token(s), 0 comment(s)"));

    Ok(())
}

#[test]
fn test_scan_not_a_directory() -> Result<()> {
    let test = CliTest::with_file("app.js", APP_JS)?;

    let output = test.run(&["scan", "app.js"])?;
    assert_eq!(output.status.code(), Some(2));

    Ok(())
}
