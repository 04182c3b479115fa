//! Common utilities for docstream
//!
//! This crate provides the error taxonomy shared by the driver layer and the CLI.

pub mod error;

pub use error::{DocstreamError, Result};
