//! Front ends that produce token and comment sequences.
//!
//! - `js`: JavaScript/TypeScript source files, parsed with swc
//! - `json`: ESTree token dumps written by another parser

pub mod js;
pub mod json;

use std::path::Path;

use anyhow::Result;

use crate::source::SourceCode;

/// Load a file into a [`SourceCode`], choosing the front end by extension.
pub fn load_source(path: &Path) -> Result<SourceCode> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => json::load_token_dump(path),
        _ => Ok(js::parse_file(path)?.into_source_code()),
    }
}
