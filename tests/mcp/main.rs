use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tempfile::TempDir;

mod tools;

/// Test fixture for MCP integration tests
///
/// Manages a temporary directory of source files.
pub struct McpTestFixture {
    _temp_dir: TempDir,
    root: PathBuf,
}

impl McpTestFixture {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().canonicalize()?;
        Ok(Self {
            _temp_dir: temp_dir,
            root,
        })
    }

    /// Absolute path of a file in the fixture (for MCP parameters)
    pub fn path(&self, relative_path: &str) -> String {
        self.root.join(relative_path).to_string_lossy().to_string()
    }

    /// Write a file and return its absolute path (for MCP parameters)
    pub fn write_file(&self, relative_path: &str, content: &str) -> Result<String> {
        let path = self.root.join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        Ok(path.to_string_lossy().to_string())
    }
}

/// `a` 4..5, `=` 6..7, `/*x*/` 8..13, `1` 14..15, `;` 20..21, `// y` 22..26.
pub const SAMPLE_JS: &str = "let a = /*x*/ 1;\nb(); // y\nlet c = 2;\n";

/// Extract JSON value from a successful CallToolResult
///
/// Panics if the result indicates an error or cannot be parsed
pub fn extract_tool_result_json(result: &rmcp::model::CallToolResult) -> Value {
    if let Some(true) = result.is_error {
        panic!("Tool call returned an error: {:?}", result);
    }

    assert!(
        !result.content.is_empty(),
        "Tool result should have content"
    );

    let content_item = &result.content[0];
    let text_content = content_item
        .as_text()
        .expect("Tool result content should be text");

    serde_json::from_str(&text_content.text).expect("Tool result should be valid JSON")
}
