//! `askweb` crate (library surface).
//!
//! The primary entrypoint for end users is the `askweb` binary (MCP stdio + CLI).
//! This library module re-exports the pipeline types and the reqwest-backed providers
//! so the same search can be embedded without spawning the server.

pub use askweb_core as core;
pub use askweb_local as local;
