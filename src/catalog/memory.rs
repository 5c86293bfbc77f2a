use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::model::{ColumnDef, ForeignKey, TableDef, TableIdentity};
use crate::catalog::{Catalog, CatalogError};

/// Catalog held entirely in memory.
///
/// Incoming foreign keys are answered by scanning the outgoing keys of every
/// known table, in table-identity order, so results are deterministic.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    tables: BTreeMap<TableIdentity, TableDef>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from table definitions. Later duplicates replace earlier ones.
    pub fn from_tables(tables: impl IntoIterator<Item = TableDef>) -> Self {
        let mut catalog = Self::new();
        for table in tables {
            catalog.insert(table);
        }
        catalog
    }

    /// Add or replace a table definition.
    pub fn insert(&mut self, table: TableDef) {
        self.tables.insert(table.identity.clone(), table);
    }

    /// Definition of `table`, if known.
    pub fn get(&self, table: &TableIdentity) -> Option<&TableDef> {
        self.tables.get(table)
    }

    /// Iterate over all table definitions in identity order.
    pub fn tables(&self) -> impl Iterator<Item = &TableDef> {
        self.tables.values()
    }

    /// Number of tables in the catalog.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// True when the catalog has no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    fn require(&self, table: &TableIdentity) -> Result<&TableDef, CatalogError> {
        self.tables
            .get(table)
            .ok_or_else(|| CatalogError::TableNotFound(table.clone()))
    }
}

impl Catalog for MemoryCatalog {
    fn columns(&mut self, table: &TableIdentity) -> Result<Vec<ColumnDef>, CatalogError> {
        let mut columns = self.require(table)?.columns.clone();
        columns.sort_by_key(|c| c.position);
        Ok(columns)
    }

    fn primary_keys(&mut self, table: &TableIdentity) -> Result<BTreeSet<String>, CatalogError> {
        Ok(self.require(table)?.primary_keys.clone())
    }

    fn foreign_keys_from(
        &mut self,
        table: &TableIdentity,
    ) -> Result<Vec<ForeignKey>, CatalogError> {
        Ok(self.require(table)?.foreign_keys.clone())
    }

    fn foreign_keys_to(&mut self, table: &TableIdentity) -> Result<Vec<ForeignKey>, CatalogError> {
        self.require(table)?;
        Ok(self
            .tables
            .values()
            .flat_map(|def| def.foreign_keys.iter())
            .filter(|fk| &fk.to == table)
            .cloned()
            .collect())
    }

    fn table_def(&mut self, table: &TableIdentity) -> Result<TableDef, CatalogError> {
        let mut def = self.require(table)?.clone();
        def.columns.sort_by_key(|c| c.position);
        Ok(def)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fk(from: &str, to: &str, column: &str) -> ForeignKey {
        ForeignKey {
            constraint_name: format!("FK_{from}_{to}"),
            from: TableIdentity::new("S", from),
            to: TableIdentity::new("S", to),
            fk_columns: vec![column.to_string()],
            pk_columns: vec![column.to_string()],
        }
    }

    fn table(name: &str, columns: &[&str], fks: Vec<ForeignKey>) -> TableDef {
        let mut def = TableDef::new(TableIdentity::new("S", name));
        def.columns = columns
            .iter()
            .enumerate()
            .rev()
            .map(|(idx, c)| ColumnDef::new(idx as u32 + 1, *c, "BIGINT"))
            .collect();
        def.foreign_keys = fks;
        def
    }

    #[test]
    fn columns_are_returned_in_position_order() {
        let mut catalog = MemoryCatalog::from_tables([table("ORDER", &["A", "B", "C"], vec![])]);
        let names: Vec<String> = catalog
            .columns(&TableIdentity::new("S", "ORDER"))
            .expect("table exists")
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn foreign_keys_to_collects_incoming_keys_from_all_tables() {
        let mut catalog = MemoryCatalog::from_tables([
            table("ORDER", &["ORDER_ID"], vec![]),
            table(
                "ORDER_ITEM",
                &["ITEM_ID", "ORDER_ID"],
                vec![fk("ORDER_ITEM", "ORDER", "ORDER_ID")],
            ),
            table(
                "INVOICE",
                &["INVOICE_ID", "ORDER_ID"],
                vec![fk("INVOICE", "ORDER", "ORDER_ID")],
            ),
        ]);

        let incoming = catalog
            .foreign_keys_to(&TableIdentity::new("S", "ORDER"))
            .expect("table exists");
        let sources: Vec<&str> = incoming.iter().map(|fk| fk.from.name.as_str()).collect();
        assert_eq!(sources, vec!["INVOICE", "ORDER_ITEM"]);
    }

    #[test]
    fn unknown_tables_are_reported_with_their_identity() {
        let mut catalog = MemoryCatalog::new();
        let err = catalog
            .table_def(&TableIdentity::new("S", "MISSING"))
            .expect_err("missing table should fail");
        assert_eq!(err.to_string(), "table S.MISSING not found in catalog");
    }
}
