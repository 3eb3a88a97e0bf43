//! Command handlers.
//!
//! Each handler loads its input, runs the store queries it needs and hands
//! the results to [`report`](super::report). `serve` never reaches this
//! module; `main` starts the MCP server directly.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::{
    args::{Arguments, Command, InspectCommand, QueryCommand, ScanCommand, TokensCommand},
    exit_status::ExitStatus,
    report,
};
use crate::config::{CONFIG_FILE_NAME, default_config_json, load_config};
use crate::file_scanner::scan_files;
use crate::parsers::load_source;
use crate::query::execute;
use crate::source::{SourceCode, SourceNode};
use crate::store::{CountOptions, SkipOptions, TokenStore};
use crate::token::{Span, Token};

pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Tokens(cmd)) => tokens(cmd),
        Some(Command::Query(cmd)) => query(cmd),
        Some(Command::Inspect(cmd)) => inspect(cmd),
        Some(Command::Scan(cmd)) => scan(cmd),
        Some(Command::Init) => {
            init()?;
            report::print_init();
            Ok(ExitStatus::Success)
        }
        Some(Command::Serve) => {
            bail!("Serve command should be handled before run()")
        }
        None => {
            bail!("No command provided. Use --help to see available commands.")
        }
    }
}

/// Every token of the store, merged with the comments when asked.
pub fn all_items(store: &TokenStore, include_comments: bool) -> Vec<&Token> {
    let end = store
        .tokens()
        .last()
        .into_iter()
        .chain(store.comments().last())
        .map(Token::end)
        .max()
        .unwrap_or(0);
    let options = if include_comments {
        CountOptions::default().with_comments()
    } else {
        CountOptions::default()
    };
    store.first_tokens(&Span::new(0, end), options)
}

fn tokens(cmd: TokensCommand) -> Result<ExitStatus> {
    let source = load_source(&cmd.file)?;
    let include_comments = cmd.include_comments || config_includes_comments(&cmd.file)?;
    let items = all_items(source.store(), include_comments);

    if cmd.json {
        report::print_json(&items)?;
    } else {
        report::print_tokens(&items, &source);
    }
    Ok(ExitStatus::Success)
}

fn config_includes_comments(file: &Path) -> Result<bool> {
    let dir = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().context("Failed to read current directory")?,
    };
    Ok(load_config(&dir)?.config.include_comments)
}

fn query(cmd: QueryCommand) -> Result<ExitStatus> {
    let source = load_source(&cmd.file)?;
    let request = cmd.request();
    let output = execute(&source, &request)?;
    debug!(query = %request.query, results = output.tokens().len(), "query finished");

    if cmd.json {
        report::print_json(&report::QueryJson::new(&request, &output))?;
    } else {
        report::print_query(&cmd.file.display().to_string(), &request, &output, &source);
    }
    Ok(ExitStatus::Success)
}

/// Token context around one top-level statement.
pub struct StatementContext<'s> {
    pub node: &'s SourceNode,
    pub first: Option<&'s Token>,
    pub last: Option<&'s Token>,
    pub before: Option<&'s Token>,
    pub after: Option<&'s Token>,
    pub leading_comments: Vec<&'s Token>,
}

pub fn statement_contexts(source: &SourceCode) -> Vec<StatementContext<'_>> {
    let store = source.store();
    source
        .statements()
        .map(|node| StatementContext {
            node,
            first: store.first_token(node, SkipOptions::default()),
            last: store.last_token(node, SkipOptions::default()),
            before: store.token_before(node, SkipOptions::default()),
            after: store.token_after(node, SkipOptions::default()),
            leading_comments: store.comments_before(node),
        })
        .collect()
}

fn inspect(cmd: InspectCommand) -> Result<ExitStatus> {
    let source = load_source(&cmd.file)?;
    if source.nodes().is_empty() {
        warn!(file = %cmd.file.display(), "no statement anchors; token dumps carry no syntax tree");
    }
    let contexts = statement_contexts(&source);
    report::print_inspect(&cmd.file.display().to_string(), &contexts, &source);
    Ok(ExitStatus::Success)
}

/// Outcome of tokenizing one scanned file.
pub struct FileScan {
    pub path: PathBuf,
    pub result: Result<(usize, usize), String>,
}

pub struct ScanSummary {
    pub files: Vec<FileScan>,
    pub skipped_count: usize,
    pub config_from_file: bool,
}

impl ScanSummary {
    pub fn failed_count(&self) -> usize {
        self.files.iter().filter(|f| f.result.is_err()).count()
    }
}

fn scan(cmd: ScanCommand) -> Result<ExitStatus> {
    let base = cmd.path.unwrap_or_else(|| PathBuf::from("."));
    if !base.is_dir() {
        bail!("Not a directory: {}", base.display());
    }
    let loaded = load_config(&base)?;
    let found = scan_files(&base, &loaded.config);
    info!(files = found.files.len(), root = %base.display(), "scanning");

    let paths: Vec<PathBuf> = found.files.into_iter().collect();
    let files: Vec<FileScan> = paths
        .par_iter()
        .map(|path| FileScan {
            path: path.clone(),
            result: load_source(path)
                .map(|source| {
                    let store = source.store();
                    (store.tokens().len(), store.comments().len())
                })
                .map_err(|e| format!("{:#}", e)),
        })
        .collect();

    let summary = ScanSummary {
        files,
        skipped_count: found.skipped_count,
        config_from_file: loaded.from_file,
    };
    for failed in summary.files.iter().filter(|f| f.result.is_err()) {
        warn!(file = %failed.path.display(), "failed to parse");
    }
    report::print_scan(&summary);

    Ok(if summary.failed_count() > 0 {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    })
}

fn init() -> Result<()> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_config_json()?)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;
    Ok(())
}
