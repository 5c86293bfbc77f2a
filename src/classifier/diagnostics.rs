use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::model::TableIdentity;

/// What a diagnostic is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A junction table whose name starts with neither side's name.
    AmbiguousManyToMany {
        /// The junction table.
        junction: TableIdentity,
    },
    /// A multi-column foreign key; its columns stay plain fields.
    CompositeForeignKey {
        /// Constraint name.
        constraint: String,
    },
    /// A column type with no known mapping.
    UnmappedType {
        /// Column name.
        column: String,
        /// Raw catalog type name.
        type_name: String,
    },
    /// An owning relation field whose derived name was already taken.
    RenamedField {
        /// Name derived from the foreign key or junction.
        field: String,
        /// Name emitted instead.
        renamed_to: String,
    },
}

/// A non-fatal finding reported while classifying a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Table the finding belongs to.
    pub table: TableIdentity,
    /// Structured kind.
    #[serde(flatten)]
    pub kind: DiagnosticKind,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Junction table ownership cannot be derived from its name.
    pub fn ambiguous_many_to_many(subject: &TableIdentity, junction: &TableIdentity) -> Self {
        Self {
            table: subject.clone(),
            message: format!(
                "cannot determine the owner of many-to-many junction {junction}; relation skipped"
            ),
            kind: DiagnosticKind::AmbiguousManyToMany {
                junction: junction.clone(),
            },
        }
    }

    /// Foreign key spanning several columns.
    pub fn composite_foreign_key(table: &TableIdentity, constraint: &str, columns: &str) -> Self {
        Self {
            table: table.clone(),
            message: format!(
                "composite foreign key {constraint} ({columns}) is not mapped as a relation"
            ),
            kind: DiagnosticKind::CompositeForeignKey {
                constraint: constraint.to_string(),
            },
        }
    }

    /// Column type without a mapping.
    pub fn unmapped_type(table: &TableIdentity, column: &str, type_name: &str) -> Self {
        Self {
            table: table.clone(),
            message: format!("column {column} has unmapped type {type_name}"),
            kind: DiagnosticKind::UnmappedType {
                column: column.to_string(),
                type_name: type_name.to_string(),
            },
        }
    }

    /// Owning relation field renamed to avoid a collision.
    pub fn renamed_field(table: &TableIdentity, field: &str, renamed_to: &str) -> Self {
        Self {
            table: table.clone(),
            message: format!(
                "relation field {field} collides with another field; emitted as {renamed_to}"
            ),
            kind: DiagnosticKind::RenamedField {
                field: field.to_string(),
                renamed_to: renamed_to.to_string(),
            },
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.table, self.message)
    }
}
