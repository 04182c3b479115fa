//! MongoDB implementation for docstream
//!
//! This crate connects to a MongoDB deployment, runs a single find (optionally
//! a `$text` search) and streams every matching document as one line of JSON.
//!
//! # Features
//! - Timed connection handshake with guaranteed shutdown
//! - Generic BSON to JSON encoding without a fixed schema
//! - Runner generic over [`DocumentStore`] so the lifecycle can be exercised
//!   without a server

pub mod config;
pub mod connection;
pub mod document;
pub mod query;
pub mod runner;
pub mod store;

pub use config::RunnerConfig;
pub use connection::{ConnectConfig, Connection, MongoCursor};
pub use docstream_common::{DocstreamError, Result};
pub use document::{document_to_json, to_json_line, to_json_value};
pub use query::{text_filter, FindRequest};
pub use runner::{execute, run_query, stream_documents, StreamSummary};
pub use store::{DocumentCursor, DocumentStore};
