//! Derive a JPA object model from a relational database catalog.
//!
//! The pipeline reads catalog facts ([`catalog`]), infers relations per table
//! ([`classifier`]), walks cascading relations into one aggregate and renders
//! Java sources ([`generator`]), then writes them out ([`output`]).
#![warn(missing_docs)]

/// Catalog facts and readers: in-memory, DDL, JSON snapshot, live PostgreSQL.
pub mod catalog;
/// Relation inference: junction detection, ownership, naming and cascade policy.
pub mod classifier;
/// Explicit generator settings and output target.
pub mod config;
/// Errors raised while generating artifacts.
pub mod error;
/// Aggregate closure walk and Java/JSON artifact rendering.
pub mod generator;
/// Identifier case conversion and pluralization.
pub mod naming;
/// File output and markdown report generation.
pub mod output;
/// SQL DDL parsing and identifier helpers.
pub mod parser;

pub use config::{GeneratorConfig, OutputTarget};
pub use error::GenerateError;
