//! Data layer for traffic forensics.
//!
//! Responsible for reading access-log files, parsing lines under the
//! supported grammars, classifying suspicious requests, aggregating the
//! results into a bounded summary and running the top-level analysis
//! pipeline.

pub mod aggregator;
pub mod analysis;
pub mod classifier;
pub mod parser;
pub mod reader;

pub use forensics_core as core;
