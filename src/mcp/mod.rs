//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes token listing and store queries to AI assistants over stdio.
//!
//! ## Module Structure
//!
//! - `server`: tool handlers and the stdio entry point
//! - `types`: tool parameter and result types

mod server;
pub mod types;

pub use server::{TokstoreMcpServer, run_server};
