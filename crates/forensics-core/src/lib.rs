//! Shared types for the traffic forensics tools: the access-log data model,
//! the error type, command-line settings and report rendering.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{ForensicsError, Result};
