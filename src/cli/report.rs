//! Report formatting and printing.
//!
//! Every printer has a `_to` variant taking a writer so output can be tested
//! without capturing stdout.

use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use super::run::{ScanSummary, StatementContext};
use crate::config::CONFIG_FILE_NAME;
use crate::query::{QueryKind, QueryOutput, QueryRequest};
use crate::source::SourceCode;
use crate::token::{Span, Token};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// JSON shape of a query result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryJson<'a> {
    pub query: QueryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<Span>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<Span>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<&'a [&'a Token]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exists: Option<bool>,
}

impl<'a> QueryJson<'a> {
    pub fn new(request: &QueryRequest, output: &'a QueryOutput<'a>) -> Self {
        let (tokens, exists) = match output {
            QueryOutput::Tokens(tokens) => (Some(tokens.as_slice()), None),
            QueryOutput::Exists(exists) => (None, Some(*exists)),
        };
        Self {
            query: request.query,
            node: request.node,
            right: request.right,
            tokens,
            exists,
        }
    }
}

pub fn print_tokens(items: &[&Token], source: &SourceCode) {
    print_tokens_to(items, source, &mut io::stdout().lock());
}

pub fn print_tokens_to<W: Write>(items: &[&Token], source: &SourceCode, writer: &mut W) {
    let positions: Vec<String> = items
        .iter()
        .map(|item| {
            let (line, col) = source.line_col(item.start());
            format!("{}:{}", line, col)
        })
        .collect();
    let pos_width = positions.iter().map(String::len).max().unwrap_or(0);

    for (item, position) in items.iter().zip(&positions) {
        let kind = format!("{:<18}", item.kind.as_str());
        let kind = if item.is_comment() {
            kind.dimmed()
        } else {
            kind.cyan()
        };
        let _ = writeln!(
            writer,
            "{:>pos_width$}  {} {:<10} {:?}",
            position,
            kind,
            item.span.to_string(),
            item.text,
            pos_width = pos_width
        );
    }

    let comments = items.iter().filter(|item| item.is_comment()).count();
    let _ = writeln!(
        writer,
        "{} {} token(s), {} comment(s)",
        SUCCESS_MARK.green(),
        items.len() - comments,
        comments
    );
}

pub fn print_query(path: &str, request: &QueryRequest, output: &QueryOutput, source: &SourceCode) {
    print_query_to(path, request, output, source, &mut io::stdout().lock());
}

pub fn print_query_to<W: Write>(
    path: &str,
    request: &QueryRequest,
    output: &QueryOutput,
    source: &SourceCode,
    writer: &mut W,
) {
    let mut header = request.query.to_string();
    for span in [request.node, request.right].into_iter().flatten() {
        header.push(' ');
        header.push_str(&span.to_string());
    }
    if request.node.is_none()
        && let Some(offset) = request.offset
    {
        header.push_str(&format!(" @{}", offset));
    }

    let tokens = match output {
        QueryOutput::Exists(exists) => {
            let answer = if *exists { "yes".green() } else { "no".yellow() };
            let _ = writeln!(writer, "{}: {}", header.bold(), answer);
            return;
        }
        QueryOutput::Tokens(tokens) => tokens,
    };

    if tokens.is_empty() {
        let _ = writeln!(writer, "{}: {}", header.bold(), "no result".yellow());
        return;
    }
    let _ = writeln!(writer, "{}: {} result(s)", header.bold(), tokens.len());

    let line_width = tokens
        .iter()
        .map(|t| source.line_col(t.start()).0.to_string().len())
        .max()
        .unwrap_or(1);
    for token in tokens {
        let _ = writeln!(writer);
        print_excerpt(token, path, source, line_width, writer);
    }
}

/// Prints a token with its location and the source line underlined.
fn print_excerpt<W: Write>(
    token: &Token,
    path: &str,
    source: &SourceCode,
    line_width: usize,
    writer: &mut W,
) {
    let (line, col) = source.line_col(token.start());
    let _ = writeln!(
        writer,
        "{} {:?} {}",
        token.kind.to_string().cyan(),
        token.text,
        token.span.to_string().dimmed()
    );
    let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), path, line, col);

    let source_line = source.line_text(line);
    if source_line.is_empty() {
        return;
    }

    let prefix: String = source_line.chars().take(col - 1).collect();
    let covered = source.text_of(token).lines().next().unwrap_or_default();
    let carets = "^".repeat(UnicodeWidthStr::width(covered).max(1));
    let carets = if token.is_comment() {
        carets.dimmed()
    } else {
        carets.green()
    };

    let _ = writeln!(writer, "{:>width$} {}", "", "|".blue(), width = line_width);
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        line.to_string().blue(),
        "|".blue(),
        source_line,
        width = line_width
    );
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        carets,
        width = line_width,
        padding = UnicodeWidthStr::width(prefix.as_str())
    );
}

pub fn print_inspect(path: &str, contexts: &[StatementContext], source: &SourceCode) {
    print_inspect_to(path, contexts, source, &mut io::stdout().lock());
}

pub fn print_inspect_to<W: Write>(
    path: &str,
    contexts: &[StatementContext],
    source: &SourceCode,
    writer: &mut W,
) {
    let describe = |token: Option<&Token>| match token {
        Some(token) => format!("{:?} {}", token.text, token.span.to_string().dimmed()),
        None => "-".dimmed().to_string(),
    };

    for ctx in contexts {
        let (line, col) = source.line_col(ctx.node.span.start);
        let _ = writeln!(
            writer,
            "{} {}",
            ctx.node.label.bold(),
            ctx.node.span.to_string().dimmed()
        );
        let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), path, line, col);
        let rows = [
            ("first", describe(ctx.first)),
            ("last", describe(ctx.last)),
            ("before", describe(ctx.before)),
            ("after", describe(ctx.after)),
        ];
        for (label, value) in rows {
            let _ = writeln!(writer, "  {} {:<7} {}", "=".blue(), label, value);
        }
        if !ctx.leading_comments.is_empty() {
            let comments: Vec<String> = ctx
                .leading_comments
                .iter()
                .map(|c| format!("{:?}", c.text))
                .collect();
            let _ = writeln!(
                writer,
                "  {} {:<7} {}",
                "=".blue(),
                "comments",
                comments.join(", ")
            );
        }
        let _ = writeln!(writer);
    }

    let _ = writeln!(
        writer,
        "{} {} top-level statement(s)",
        SUCCESS_MARK.green(),
        contexts.len()
    );
}

pub fn print_scan(summary: &ScanSummary) {
    print_scan_to(summary, &mut io::stdout().lock());
}

pub fn print_scan_to<W: Write>(summary: &ScanSummary, writer: &mut W) {
    if !summary.config_from_file {
        let _ = writeln!(
            writer,
            "{} no {} found, using defaults",
            "note:".bold(),
            CONFIG_FILE_NAME
        );
    }

    let (mut tokens, mut comments) = (0, 0);
    for file in &summary.files {
        match &file.result {
            Ok((t, c)) => {
                tokens += t;
                comments += c;
                let _ = writeln!(
                    writer,
                    "{}  {} token(s), {} comment(s)",
                    file.path.display(),
                    t,
                    c
                );
            }
            Err(message) => {
                let _ = writeln!(
                    writer,
                    "{}: {}\n  {} {}",
                    "error".bold().red(),
                    message,
                    "-->".blue(),
                    file.path.display()
                );
            }
        }
    }

    if summary.skipped_count > 0 {
        let _ = writeln!(
            writer,
            "{} {} path(s) could not be read",
            "warning:".bold().yellow(),
            summary.skipped_count
        );
    }

    let failed = summary.failed_count();
    let scanned = summary.files.len() - failed;
    let totals = format!(
        "Scanned {} file(s): {} token(s), {} comment(s)",
        scanned, tokens, comments
    );
    if failed > 0 {
        let _ = writeln!(
            writer,
            "{} {}; {} file(s) failed to parse",
            FAILURE_MARK.red(),
            totals,
            failed
        );
    } else {
        let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), totals.green());
    }
}

pub fn print_init() {
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );
}
