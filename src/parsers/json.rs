//! Loader for ESTree token dumps.
//!
//! Any ESTree front end (espree, typescript-estree, ...) can feed the store
//! through a JSON file of the form
//! `{"tokens": [...], "comments": [...], "source": "..."}`. Each entry needs
//! `type`, `value` and `range`; other properties (`loc`, `start`, `end`) are
//! ignored. `source` is optional.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::source::SourceCode;
use crate::token::Token;

#[derive(Debug, Deserialize)]
pub struct TokenDump {
    pub tokens: Vec<Token>,
    #[serde(default)]
    pub comments: Vec<Token>,
    #[serde(default)]
    pub source: String,
}

pub fn load_token_dump(path: &Path) -> Result<SourceCode> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read token dump: {:?}", path))?;
    let dump: TokenDump = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse token dump: {:?}", path))?;
    validate(&dump).with_context(|| format!("Invalid token dump: {:?}", path))?;
    Ok(SourceCode::new(dump.source, dump.tokens, dump.comments))
}

/// Checks the ordering invariants the store relies on.
pub fn validate(dump: &TokenDump) -> Result<()> {
    check_sequence("token", &dump.tokens, false)?;
    check_sequence("comment", &dump.comments, true)?;

    let mut comments = dump.comments.iter().peekable();
    for token in &dump.tokens {
        while comments.next_if(|c| c.end() <= token.start()).is_some() {}
        if let Some(comment) = comments.peek()
            && comment.start() < token.end()
        {
            bail!(
                "comment at {} overlaps token '{}' at {}",
                comment.span,
                token.text,
                token.span
            );
        }
    }
    Ok(())
}

fn check_sequence(what: &str, items: &[Token], comments: bool) -> Result<()> {
    for item in items {
        if item.start() >= item.end() {
            bail!("{} '{}' has an empty or inverted range {}", what, item.text, item.span);
        }
        if item.is_comment() != comments {
            bail!("{} '{}' has unexpected type {}", what, item.text, item.kind);
        }
    }
    if let Some(pair) = items.windows(2).find(|pair| pair[0].end() > pair[1].start()) {
        bail!(
            "{}s out of order or overlapping at {} and {}",
            what,
            pair[0].span,
            pair[1].span
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::token::{Span, TokenKind};

    fn write(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("tokens.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_espree_style_dump() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            r#"{
                "tokens": [
                    {"type": "Keyword", "value": "var", "start": 0, "end": 3, "range": [0, 3]},
                    {"type": "Identifier", "value": "x", "range": [4, 5]}
                ],
                "comments": [{"type": "Block", "value": "c", "range": [6, 11]}],
                "source": "var x /*c*/"
            }"#,
        );

        let source = load_token_dump(&path).unwrap();
        let store = source.store();
        assert_eq!(store.tokens().len(), 2);
        assert_eq!(store.comments()[0].kind, TokenKind::Block);
        assert_eq!(source.text_of(&Span::new(0, 3)), "var");
        assert_eq!(
            store.comments_after(&store.tokens()[1]).len(),
            1,
        );
    }

    #[test]
    fn test_source_is_optional() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            r#"{"tokens": [{"type": "Punctuator", "value": ";", "range": [0, 1]}]}"#,
        );
        let source = load_token_dump(&path).unwrap();
        assert_eq!(source.text(), "");
        assert!(source.store().comments().is_empty());
    }

    #[test]
    fn test_rejects_unordered_tokens() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            r#"{"tokens": [
                {"type": "Identifier", "value": "b", "range": [4, 5]},
                {"type": "Identifier", "value": "a", "range": [0, 1]}
            ]}"#,
        );
        let err = load_token_dump(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("out of order"));
    }

    #[test]
    fn test_rejects_comment_overlapping_token() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            r#"{
                "tokens": [{"type": "Identifier", "value": "abc", "range": [0, 3]}],
                "comments": [{"type": "Line", "value": "", "range": [2, 4]}]
            }"#,
        );
        let err = load_token_dump(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("overlaps token"));
    }

    #[test]
    fn test_rejects_comment_in_token_list() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            r#"{"tokens": [{"type": "Line", "value": "x", "range": [0, 3]}]}"#,
        );
        let err = load_token_dump(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("unexpected type"));
    }
}
