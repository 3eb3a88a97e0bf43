//! A parsed file: source text, line index, token store and node anchors.

pub mod nodes;

use crate::store::TokenStore;
use crate::token::{Ranged, Token};

pub use nodes::SourceNode;

/// Everything the store needs about one file, plus what reporting needs to
/// turn offsets into positions.
#[derive(Debug, Clone, Default)]
pub struct SourceCode {
    text: String,
    /// Byte offset where each line starts. Line 1 starts at 0.
    line_starts: Vec<u32>,
    store: TokenStore,
    nodes: Vec<SourceNode>,
}

impl SourceCode {
    pub fn new(text: String, tokens: Vec<Token>, comments: Vec<Token>) -> Self {
        let line_starts = build_line_index(&text);
        Self {
            text,
            line_starts,
            store: TokenStore::new(tokens, comments),
            nodes: Vec::new(),
        }
    }

    pub fn with_nodes(mut self, nodes: Vec<SourceNode>) -> Self {
        self.nodes = nodes;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// Statement and expression anchors, in source order.
    pub fn nodes(&self) -> &[SourceNode] {
        &self.nodes
    }

    /// Top-level statements only.
    pub fn statements(&self) -> impl Iterator<Item = &SourceNode> {
        self.nodes.iter().filter(|node| node.top_level)
    }

    /// Source text covered by `node`. Empty when the span is out of range,
    /// which happens for token dumps loaded without their source.
    pub fn text_of(&self, node: &impl Ranged) -> &str {
        let span = node.span();
        self.text
            .get(span.start as usize..span.end as usize)
            .unwrap_or_default()
    }

    /// 1-based line and column of a byte offset. Columns count characters.
    pub fn line_col(&self, offset: u32) -> (usize, usize) {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts[line.saturating_sub(1)] as usize;
        let end = (offset as usize).min(self.text.len());
        let col = self
            .text
            .get(line_start..end)
            .map_or(0, |prefix| prefix.chars().count());
        (line.max(1), col + 1)
    }

    /// Text of a 1-based line, without its line break.
    pub fn line_text(&self, line: usize) -> &str {
        let Some(&start) = self.line_starts.get(line.wrapping_sub(1)) else {
            return "";
        };
        let end = self
            .line_starts
            .get(line)
            .map_or(self.text.len(), |&next| next as usize);
        self.text
            .get(start as usize..end)
            .unwrap_or_default()
            .trim_end_matches(['\n', '\r'])
    }
}

fn build_line_index(text: &str) -> Vec<u32> {
    let mut starts = vec![0];
    starts.extend(
        text.match_indices('\n')
            .map(|(i, _)| u32::try_from(i + 1).unwrap_or(u32::MAX)),
    );
    starts
}
