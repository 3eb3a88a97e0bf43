//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `tokens`: list the tokens (and optionally comments) of a file
//! - `query`: run one store query against a file
//! - `inspect`: show token context for every top-level statement
//! - `scan`: tokenize every source file under a directory
//! - `init`: write a default configuration file
//! - `serve`: start the MCP server on stdio

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::query::{QueryKind, QueryRequest};
use crate::token::Span;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Tokens(cmd)) => cmd.common.verbose,
            Some(Command::Query(cmd)) => cmd.common.verbose,
            Some(Command::Inspect(cmd)) => cmd.common.verbose,
            Some(Command::Scan(cmd)) => cmd.common.verbose,
            Some(Command::Init) | Some(Command::Serve) | None => false,
        }
    }
}

/// Common arguments shared by the file commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses `START:END` (or `START..END`) into a span.
pub fn parse_range(value: &str) -> Result<Span, String> {
    let (start, end) = value
        .split_once(':')
        .or_else(|| value.split_once(".."))
        .ok_or_else(|| format!("expected START:END, got '{}'", value))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<u32>()
            .map_err(|e| format!("invalid offset '{}': {}", part, e))
    };
    let span = Span::new(parse(start)?, parse(end)?);
    if span.start > span.end {
        return Err(format!("range {} starts after it ends", span));
    }
    Ok(span)
}

#[derive(Debug, Args)]
pub struct TokensCommand {
    /// Source file (.js/.ts/...) or ESTree token dump (.json)
    pub file: PathBuf,

    /// Interleave comments with tokens (overrides config file)
    #[arg(long)]
    pub include_comments: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct QueryCommand {
    /// Source file (.js/.ts/...) or ESTree token dump (.json)
    pub file: PathBuf,

    #[arg(value_enum)]
    pub query: QueryKind,

    /// Anchor range, START:END
    #[arg(long, value_parser = parse_range)]
    pub node: Option<Span>,

    /// Second anchor for the *-between queries, START:END
    #[arg(long, value_parser = parse_range)]
    pub right: Option<Span>,

    /// Byte offset for token-by-range-start
    #[arg(long)]
    pub offset: Option<u32>,

    /// Matching tokens to skip (single-token queries)
    #[arg(long, default_value_t = 0)]
    pub skip: usize,

    /// Maximum number of tokens (multi-token queries)
    #[arg(long)]
    pub count: Option<usize>,

    #[arg(long)]
    pub include_comments: bool,

    /// Only yield tokens of this type. Can be repeated.
    #[arg(long = "kind")]
    pub kinds: Vec<String>,

    /// Only yield tokens whose value matches this regex
    #[arg(long)]
    pub matches: Option<String>,

    /// Extra tokens on both sides (all-tokens, tokens-between)
    #[arg(long, default_value_t = 0)]
    pub padding: usize,

    #[arg(long)]
    pub before: Option<usize>,

    #[arg(long)]
    pub after: Option<usize>,

    /// Print JSON instead of source excerpts
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl QueryCommand {
    pub fn request(&self) -> QueryRequest {
        QueryRequest {
            query: self.query,
            node: self.node,
            right: self.right,
            offset: self.offset,
            skip: self.skip,
            count: self.count,
            include_comments: self.include_comments,
            kinds: self.kinds.clone(),
            matches: self.matches.clone(),
            padding: self.padding,
            before: self.before,
            after: self.after,
        }
    }
}

#[derive(Debug, Args)]
pub struct InspectCommand {
    /// Source file to inspect
    pub file: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    /// Directory to scan (default: current directory)
    pub path: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the tokens of a file
    Tokens(TokensCommand),
    /// Run a token store query against a file
    Query(QueryCommand),
    /// Show surrounding tokens and comments for each top-level statement
    Inspect(InspectCommand),
    /// Tokenize every source file under a directory
    Scan(ScanCommand),
    /// Initialize a new .tokstorerc.json configuration file
    Init,
    /// Start MCP server for AI coding agents
    Serve,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("9:15"), Ok(Span::new(9, 15)));
        assert_eq!(parse_range("9..15"), Ok(Span::new(9, 15)));
        assert_eq!(parse_range("4:4"), Ok(Span::new(4, 4)));
        assert!(parse_range("15:9").is_err());
        assert!(parse_range("15").is_err());
        assert!(parse_range("a:b").is_err());
    }

    #[test]
    fn test_parse_query_command() {
        let args = Arguments::try_parse_from([
            "tokstore",
            "query",
            "app.ts",
            "tokens-before",
            "--node",
            "34:35",
            "--count",
            "2",
            "--kind",
            "Identifier",
            "-v",
        ])
        .unwrap();
        assert!(args.verbose());

        let Some(Command::Query(cmd)) = args.command else {
            panic!("expected query command");
        };
        let request = cmd.request();
        assert_eq!(request.query, QueryKind::TokensBefore);
        assert_eq!(request.node, Some(Span::new(34, 35)));
        assert_eq!(request.count, Some(2));
        assert_eq!(request.kinds, vec!["Identifier"]);
    }

    #[test]
    fn test_verify_cli() {
        Arguments::command().debug_assert();
    }
}
