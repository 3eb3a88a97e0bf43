//! tokstore - token and comment navigation for JavaScript/TypeScript
//!
//! tokstore answers "which token or comment is at or near this node" queries
//! over the token and comment sequences of a parsed file. It is the lookup
//! layer lint rules use to inspect punctuation, keywords and comments around
//! syntax-tree nodes.
//!
//! ## Module Structure
//!
//! - `token`: token and comment data model
//! - `store`: the token store and its cursors
//! - `source`: a parsed file (text, line index, store, node anchors)
//! - `parsers`: swc front end and ESTree token dump loader
//! - `query`: store queries described as data (shared by CLI and MCP)
//! - `config`: configuration file loading and parsing
//! - `file_scanner`: source file discovery
//! - `cli`: command-line interface layer
//! - `mcp`: Model Context Protocol server implementation

pub mod cli;
pub mod config;
pub mod file_scanner;
pub mod mcp;
pub mod parsers;
pub mod query;
pub mod source;
pub mod store;
pub mod token;
