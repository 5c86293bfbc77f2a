/// Naming-convention cascade policy and the cascade annotation pass.
pub mod cascade;
/// Non-fatal findings collected while classifying.
pub mod diagnostics;
/// Table-shape recognizers: junction tables, shared identity, audit columns, field stems.
pub mod recognizers;
/// Per-table relation inference from catalog facts.
pub mod relation_classifier;
/// Relation model types: kinds, cascade modes, classified tables.
pub mod relations;

pub use cascade::should_cascade;
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use relation_classifier::classify_table;
pub use relations::{
    CascadeMode, ExtraRelation, IdColumn, Multiplicity, Ownership, RelationKind, TableWithRelation,
};
