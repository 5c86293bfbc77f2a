//! Catalog access: the facts the relation classifier works from.
//!
//! A [`Catalog`] answers four questions about a schema-qualified table: its
//! columns, its primary-key set, the foreign keys it declares and the foreign
//! keys declaring it as their target. Readers exist for in-memory definitions,
//! SQL DDL files, JSON snapshots and (with the `db` feature) live PostgreSQL.

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

/// In-memory catalog built from table definitions.
pub mod memory;
/// Catalog value types: table identities, columns, keys.
pub mod model;
/// Live PostgreSQL catalog reader.
#[cfg(feature = "db")]
pub mod postgres;
/// JSON catalog snapshots.
pub mod snapshot;
/// Catalog type name to semantic kind lookup.
pub mod types;

pub use memory::MemoryCatalog;
pub use model::{ColumnDef, ForeignKey, TableDef, TableIdentity};
pub use types::SemanticType;

/// The catalog lookup that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogStep {
    /// Listing the table's columns.
    Columns,
    /// Listing the primary-key columns.
    PrimaryKeys,
    /// Listing foreign keys declared by the table.
    ForeignKeysFrom,
    /// Listing foreign keys referencing the table.
    ForeignKeysTo,
}

impl fmt::Display for CatalogStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogStep::Columns => write!(f, "list columns"),
            CatalogStep::PrimaryKeys => write!(f, "list primary keys"),
            CatalogStep::ForeignKeysFrom => write!(f, "list foreign keys from table"),
            CatalogStep::ForeignKeysTo => write!(f, "list foreign keys to table"),
        }
    }
}

/// Fatal catalog-access failure. Always names the table involved when known.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog has no such table.
    #[error("table {0} not found in catalog")]
    TableNotFound(TableIdentity),
    /// A catalog query failed.
    #[error("{step} failed for {table}: {message}")]
    Query {
        /// Table being inspected.
        table: TableIdentity,
        /// Lookup that failed.
        step: CatalogStep,
        /// Underlying driver message.
        message: String,
    },
    /// The catalog source itself could not be loaded or connected to.
    #[error("failed to load catalog: {0}")]
    Load(String),
}

/// Read access to database catalog facts.
///
/// Methods take `&mut self` so implementations may hold a live connection.
pub trait Catalog {
    /// Columns of `table`, ordered by position.
    fn columns(&mut self, table: &TableIdentity) -> Result<Vec<ColumnDef>, CatalogError>;

    /// Primary-key column names of `table`.
    fn primary_keys(&mut self, table: &TableIdentity) -> Result<BTreeSet<String>, CatalogError>;

    /// Foreign keys declared by `table`.
    fn foreign_keys_from(&mut self, table: &TableIdentity)
        -> Result<Vec<ForeignKey>, CatalogError>;

    /// Foreign keys declared by other tables that reference `table`.
    fn foreign_keys_to(&mut self, table: &TableIdentity) -> Result<Vec<ForeignKey>, CatalogError>;

    /// Full definition of `table`.
    fn table_def(&mut self, table: &TableIdentity) -> Result<TableDef, CatalogError> {
        Ok(TableDef {
            identity: table.clone(),
            columns: self.columns(table)?,
            primary_keys: self.primary_keys(table)?,
            foreign_keys: self.foreign_keys_from(table)?,
        })
    }
}
