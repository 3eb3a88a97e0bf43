//! Source file discovery for `tokstore scan`.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use tracing::warn;
use walkdir::WalkDir;

use crate::config::Config;

/// Patterns without `*` or `?` are literal paths relative to the scan root.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

pub struct ScanResult {
    /// Matching files in path order.
    pub files: BTreeSet<PathBuf>,
    /// Entries that could not be read.
    pub skipped_count: usize,
}

struct IgnoreSet {
    literal: Vec<PathBuf>,
    globs: Vec<Pattern>,
}

impl IgnoreSet {
    fn new(base_dir: &Path, patterns: &[String]) -> Self {
        let mut literal = Vec::new();
        let mut globs = Vec::new();
        for p in patterns {
            if !is_glob_pattern(p) {
                literal.push(base_dir.join(p));
                continue;
            }
            match Pattern::new(p) {
                Ok(pattern) => globs.push(pattern),
                Err(e) => warn!(pattern = %p, error = %e, "invalid ignore pattern"),
            }
        }
        Self { literal, globs }
    }

    fn is_ignored(&self, path: &Path) -> bool {
        self.literal.iter().any(|prefix| path.starts_with(prefix))
            || self.globs.iter().any(|p| p.matches_path(path))
    }
}

fn roots(base_dir: &Path, includes: &[String]) -> Vec<PathBuf> {
    if includes.is_empty() {
        return vec![base_dir.to_path_buf()];
    }

    let mut roots = Vec::new();
    for inc in includes {
        let joined = base_dir.join(inc);
        if !is_glob_pattern(inc) {
            if joined.exists() {
                roots.push(joined);
            } else {
                warn!(path = %joined.display(), "include path does not exist");
            }
            continue;
        }
        match glob(&joined.to_string_lossy()) {
            Ok(entries) => roots.extend(entries.flatten().filter(|entry| entry.is_dir())),
            Err(e) => warn!(pattern = %inc, error = %e, "invalid include pattern"),
        }
    }
    roots
}

pub fn scan_files(base_dir: &Path, config: &Config) -> ScanResult {
    let ignores = IgnoreSet::new(base_dir, &config.ignores);
    let mut files = BTreeSet::new();
    let mut skipped_count = 0;

    for root in roots(base_dir, &config.includes) {
        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    warn!(error = %e, "cannot access path");
                    continue;
                }
            };
            let path = entry.path();
            if ignores.is_ignored(path) {
                continue;
            }
            if entry.file_type().is_file() && has_extension(path, &config.extensions) {
                files.insert(path.to_path_buf());
            }
        }
    }

    tracing::debug!(files = files.len(), skipped = skipped_count, "scan finished");
    ScanResult {
        files,
        skipped_count,
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
}
