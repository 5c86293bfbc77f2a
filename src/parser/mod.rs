/// Identifier normalization helpers (schema-qualified names, quoted identifiers).
pub mod names;
/// SQL DDL reader producing an in-memory catalog.
pub mod sql_parser;
