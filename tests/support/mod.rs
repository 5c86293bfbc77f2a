#![allow(dead_code)]

use std::path::PathBuf;

use catalog2jpa::catalog::model::{ColumnDef, ForeignKey, TableDef, TableIdentity};
use catalog2jpa::catalog::snapshot::load_snapshot;
use catalog2jpa::catalog::{Catalog, MemoryCatalog};
use catalog2jpa::classifier::{classify_table, Diagnostic, TableWithRelation};
use catalog2jpa::parser::sql_parser;

pub(crate) fn fixture_dir(fixture: &str) -> PathBuf {
    PathBuf::from("tests/fixtures").join(fixture)
}

pub(crate) fn read_fixture_sql(fixture: &str) -> String {
    let path = fixture_dir(fixture).join("input.sql");
    std::fs::read_to_string(path).expect("fixture SQL should be readable")
}

pub(crate) fn load_fixture_catalog(fixture: &str, default_schema: &str) -> MemoryCatalog {
    sql_parser::load_ddl(&read_fixture_sql(fixture), default_schema)
        .expect("fixture SQL should load")
}

pub(crate) fn load_fixture_snapshot(fixture: &str) -> MemoryCatalog {
    let path = fixture_dir(fixture).join("catalog.json");
    let json = std::fs::read_to_string(path).expect("fixture snapshot should be readable");
    load_snapshot(&json).expect("fixture snapshot should parse")
}

pub(crate) fn identity(schema: &str, name: &str) -> TableIdentity {
    TableIdentity::new(schema, name)
}

/// Table in schema `S` whose columns are all `BIGINT`.
pub(crate) fn table(name: &str, columns: &[&str], primary_keys: &[&str]) -> TableDef {
    let mut def = TableDef::new(identity("S", name));
    def.columns = columns
        .iter()
        .enumerate()
        .map(|(idx, c)| ColumnDef::new(idx as u32 + 1, *c, "BIGINT"))
        .collect();
    def.primary_keys = primary_keys.iter().map(|c| c.to_string()).collect();
    def
}

/// Single-column foreign key between two tables of schema `S`.
pub(crate) fn fk(from: &str, column: &str, to: &str, pk: &str) -> ForeignKey {
    ForeignKey {
        constraint_name: format!("FK_{from}_{column}"),
        from: identity("S", from),
        to: identity("S", to),
        fk_columns: vec![column.to_string()],
        pk_columns: vec![pk.to_string()],
    }
}

pub(crate) fn with_fks(mut def: TableDef, fks: Vec<ForeignKey>) -> TableDef {
    def.foreign_keys = fks;
    def
}

/// Classify one table of `catalog`, returning the result and its diagnostics.
pub(crate) fn classify(
    catalog: &mut MemoryCatalog,
    table: &TableIdentity,
) -> (TableWithRelation, Vec<Diagnostic>) {
    let def = catalog.table_def(table).expect("table should exist");
    let mut diagnostics = Vec::new();
    let classified =
        classify_table(catalog, &def, &mut diagnostics).expect("classification should succeed");
    (classified, diagnostics)
}
