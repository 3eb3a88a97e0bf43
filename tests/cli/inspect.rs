use anyhow::Result;

use crate::{APP_JS, CliTest, stdout};

#[test]
fn test_inspect_statements() -> Result<()> {
    let test = CliTest::with_file("app.js", APP_JS)?;

    let output = test.run(&["inspect", "app.js"])?;
    assert_eq!(output.status.code(), Some(0));

    let out = stdout(&output);
    assert!(out.contains("VariableDeclaration 18.."));
    assert!(out.contains("--> app.js:2:1"));
    assert!(out.contains("= first   \"const\" 18..23"));
    assert!(out.contains("= before  -"));
    assert!(out.contains("= comments \" greet the user\""));
    assert!(out.contains("ExpressionStatement 40.."));
    assert!(out.contains("= after   -"));
    assert!(out.ends_with("✓ 2 top-level statement(s)\n"));

    Ok(())
}
