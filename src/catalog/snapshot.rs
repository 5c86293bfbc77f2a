//! JSON catalog snapshots.
//!
//! A snapshot is an offline copy of the catalog facts for a set of tables:
//!
//! ```json
//! {
//!   "tables": [
//!     {
//!       "schema": "SALES",
//!       "name": "ORDER_ITEM",
//!       "columns": [
//!         {"position": 1, "name": "ITEM_ID", "type": "BIGINT"},
//!         {"position": 2, "name": "ORDER_ID", "type": "BIGINT"}
//!       ],
//!       "primary_keys": ["ITEM_ID"],
//!       "foreign_keys": [
//!         {"constraint_name": "FK_ITEM_ORDER",
//!          "to": {"schema": "SALES", "name": "ORDER"},
//!          "fk_columns": "ORDER_ID", "pk_columns": "ORDER_ID"}
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Key column lists may be arrays or catalog-style comma-joined strings.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::memory::MemoryCatalog;
use crate::catalog::model::{split_column_list, ColumnDef, ForeignKey, TableDef, TableIdentity};
use crate::catalog::CatalogError;

/// Top-level snapshot document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// Tables in the snapshot.
    pub tables: Vec<SnapshotTable>,
}

/// One table in a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotTable {
    /// Schema of the table.
    pub schema: String,
    /// Table name.
    pub name: String,
    /// Columns.
    #[serde(default)]
    pub columns: Vec<ColumnDef>,
    /// Primary-key columns.
    #[serde(default)]
    pub primary_keys: ColumnList,
    /// Foreign keys declared by this table.
    #[serde(default)]
    pub foreign_keys: Vec<SnapshotForeignKey>,
}

/// A foreign key in a snapshot; `from` is the enclosing table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotForeignKey {
    /// Constraint name; generated from the table name when omitted.
    #[serde(default)]
    pub constraint_name: Option<String>,
    /// Referenced table.
    pub to: TableIdentity,
    /// Referencing columns.
    pub fk_columns: ColumnList,
    /// Referenced columns.
    pub pk_columns: ColumnList,
}

/// Column names given either as a JSON array or as one catalog string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnList {
    /// `["ORDER_ID", "LINE_NO"]`
    List(Vec<String>),
    /// `"ORDER_ID,LINE_NO"`
    Joined(String),
}

impl Default for ColumnList {
    fn default() -> Self {
        ColumnList::List(Vec::new())
    }
}

impl ColumnList {
    /// Trimmed, ordered column names.
    pub fn names(&self) -> Vec<String> {
        match self {
            ColumnList::List(names) => names
                .iter()
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .collect(),
            ColumnList::Joined(raw) => split_column_list(raw),
        }
    }
}

impl SnapshotTable {
    fn into_table_def(self) -> TableDef {
        let identity = TableIdentity::new(self.schema.trim(), self.name.trim());
        let foreign_keys = self
            .foreign_keys
            .into_iter()
            .enumerate()
            .map(|(idx, fk)| ForeignKey {
                constraint_name: fk
                    .constraint_name
                    .unwrap_or_else(|| format!("{}_FK{}", identity.name, idx + 1)),
                from: identity.clone(),
                to: TableIdentity::new(fk.to.schema.trim(), fk.to.name.trim()),
                fk_columns: fk.fk_columns.names(),
                pk_columns: fk.pk_columns.names(),
            })
            .collect();

        TableDef {
            columns: self
                .columns
                .into_iter()
                .map(|mut c| {
                    c.name = c.name.trim().to_string();
                    c.type_name = c.type_name.trim().to_string();
                    c
                })
                .collect(),
            primary_keys: self.primary_keys.names().into_iter().collect::<BTreeSet<_>>(),
            foreign_keys,
            identity,
        }
    }
}

impl From<&TableDef> for SnapshotTable {
    fn from(def: &TableDef) -> Self {
        SnapshotTable {
            schema: def.identity.schema.clone(),
            name: def.identity.name.clone(),
            columns: def.columns.clone(),
            primary_keys: ColumnList::List(def.primary_keys.iter().cloned().collect()),
            foreign_keys: def
                .foreign_keys
                .iter()
                .map(|fk| SnapshotForeignKey {
                    constraint_name: Some(fk.constraint_name.clone()),
                    to: fk.to.clone(),
                    fk_columns: ColumnList::List(fk.fk_columns.clone()),
                    pk_columns: ColumnList::List(fk.pk_columns.clone()),
                })
                .collect(),
        }
    }
}

/// Parse a snapshot document into an in-memory catalog.
pub fn load_snapshot(json: &str) -> Result<MemoryCatalog, CatalogError> {
    let snapshot: CatalogSnapshot = serde_json::from_str(json)
        .map_err(|e| CatalogError::Load(format!("Invalid catalog snapshot JSON: {e}")))?;
    Ok(MemoryCatalog::from_tables(
        snapshot.tables.into_iter().map(SnapshotTable::into_table_def),
    ))
}

/// Serialize every table of `catalog` as a pretty-printed snapshot document.
pub fn dump_snapshot(catalog: &MemoryCatalog) -> Result<String, CatalogError> {
    let snapshot = CatalogSnapshot {
        tables: catalog.tables().map(SnapshotTable::from).collect(),
    };
    serde_json::to_string_pretty(&snapshot)
        .map_err(|e| CatalogError::Load(format!("Failed to serialize catalog snapshot: {e}")))
}
