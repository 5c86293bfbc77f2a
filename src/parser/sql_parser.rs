use std::collections::BTreeMap;

use sqlparser::ast::{
    AlterTableOperation, ColumnOption, CreateTable, DataType, ObjectName, Statement,
    TableConstraint,
};
use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::parser::Parser;

use crate::catalog::memory::MemoryCatalog;
use crate::catalog::model::{ColumnDef, ForeignKey, TableDef, TableIdentity};
use crate::catalog::CatalogError;
use crate::parser::names::{qualify_table_name, unquote_identifier};

/// Foreign key as written in DDL; the referenced columns may be omitted.
#[derive(Debug, Clone)]
struct PendingForeignKey {
    name: Option<String>,
    from: TableIdentity,
    to: TableIdentity,
    fk_columns: Vec<String>,
    pk_columns: Vec<String>,
}

/// Parse SQL DDL into an in-memory catalog.
///
/// Understands `CREATE TABLE` (inline and table-level `PRIMARY KEY` /
/// `REFERENCES`) and `ALTER TABLE ... ADD CONSTRAINT`. Unqualified names land
/// in `default_schema`. A `REFERENCES t` without a column list targets the
/// primary key of `t`. Other statements are ignored.
pub fn load_ddl(sql: &str, default_schema: &str) -> Result<MemoryCatalog, CatalogError> {
    let statements = Parser::parse_sql(&PostgreSqlDialect {}, sql)
        .map_err(|e| CatalogError::Load(format!("SQL parse error: {e}")))?;

    let mut tables: BTreeMap<TableIdentity, TableDef> = BTreeMap::new();
    let mut pending: Vec<PendingForeignKey> = Vec::new();

    for statement in &statements {
        match statement {
            Statement::CreateTable(create) => {
                let def = table_from_create(create, default_schema, &mut pending);
                tables.insert(def.identity.clone(), def);
            }
            Statement::AlterTable {
                name, operations, ..
            } => {
                let identity = table_identity(name, default_schema);
                for operation in operations {
                    if let AlterTableOperation::AddConstraint(constraint) = operation {
                        apply_constraint(
                            &identity,
                            constraint,
                            default_schema,
                            &mut tables,
                            &mut pending,
                        );
                    }
                }
            }
            _ => {}
        }
    }

    resolve_foreign_keys(&mut tables, pending);
    Ok(MemoryCatalog::from_tables(tables.into_values()))
}

fn table_identity(name: &ObjectName, default_schema: &str) -> TableIdentity {
    let (schema, relation) = qualify_table_name(&name.to_string(), default_schema);
    TableIdentity::new(schema, relation)
}

fn ident_name(ident: &impl ToString) -> String {
    unquote_identifier(ident.to_string().trim()).to_string()
}

fn table_from_create(
    create: &CreateTable,
    default_schema: &str,
    pending: &mut Vec<PendingForeignKey>,
) -> TableDef {
    let identity = table_identity(&create.name, default_schema);
    let mut def = TableDef::new(identity.clone());

    for (idx, column) in create.columns.iter().enumerate() {
        let name = ident_name(&column.name);
        let (type_name, length, scale) = split_data_type(&column.data_type);
        def.columns.push(ColumnDef {
            position: idx as u32 + 1,
            name: name.clone(),
            type_name,
            length,
            scale,
        });

        for option in &column.options {
            match &option.option {
                ColumnOption::Unique {
                    is_primary: true, ..
                } => {
                    def.primary_keys.insert(name.clone());
                }
                ColumnOption::ForeignKey {
                    foreign_table,
                    referred_columns,
                    ..
                } => pending.push(PendingForeignKey {
                    name: option.name.as_ref().map(ident_name),
                    from: identity.clone(),
                    to: table_identity(foreign_table, default_schema),
                    fk_columns: vec![name.clone()],
                    pk_columns: referred_columns.iter().map(ident_name).collect(),
                }),
                _ => {}
            }
        }
    }

    let mut tables = BTreeMap::new();
    tables.insert(identity.clone(), def);
    for constraint in &create.constraints {
        apply_constraint(&identity, constraint, default_schema, &mut tables, pending);
    }
    tables
        .remove(&identity)
        .unwrap_or_else(|| TableDef::new(identity))
}

fn apply_constraint(
    table: &TableIdentity,
    constraint: &TableConstraint,
    default_schema: &str,
    tables: &mut BTreeMap<TableIdentity, TableDef>,
    pending: &mut Vec<PendingForeignKey>,
) {
    match constraint {
        TableConstraint::PrimaryKey { columns, .. } => {
            let def = tables
                .entry(table.clone())
                .or_insert_with(|| TableDef::new(table.clone()));
            def.primary_keys.extend(columns.iter().map(ident_name));
        }
        TableConstraint::ForeignKey {
            name,
            columns,
            foreign_table,
            referred_columns,
            ..
        } => pending.push(PendingForeignKey {
            name: name.as_ref().map(ident_name),
            from: table.clone(),
            to: table_identity(foreign_table, default_schema),
            fk_columns: columns.iter().map(ident_name).collect(),
            pk_columns: referred_columns.iter().map(ident_name).collect(),
        }),
        _ => {}
    }
}

/// Attach foreign keys to their declaring tables, filling in omitted
/// referenced columns from the target's primary key.
fn resolve_foreign_keys(
    tables: &mut BTreeMap<TableIdentity, TableDef>,
    pending: Vec<PendingForeignKey>,
) {
    for (idx, fk) in pending.into_iter().enumerate() {
        let pk_columns = if fk.pk_columns.is_empty() {
            tables
                .get(&fk.to)
                .map(|target| target.primary_keys.iter().cloned().collect())
                .unwrap_or_default()
        } else {
            fk.pk_columns
        };
        let Some(def) = tables.get_mut(&fk.from) else {
            continue;
        };
        def.foreign_keys.push(ForeignKey {
            constraint_name: fk
                .name
                .unwrap_or_else(|| format!("{}_FK{}", fk.from.name, idx + 1)),
            from: fk.from,
            to: fk.to,
            fk_columns: fk.fk_columns,
            pk_columns,
        });
    }
}

/// Split a declared type into `(TYPE_NAME, length, scale)`.
///
/// `VARCHAR(40)` -> `("VARCHAR", 40, 0)`, `DECIMAL(10,2)` -> `("DECIMAL", 10, 2)`.
fn split_data_type(data_type: &DataType) -> (String, u32, u32) {
    let rendered = data_type.to_string();
    let (base, args) = match rendered.split_once('(') {
        Some((base, rest)) => (base, rest.trim_end_matches(')')),
        None => (rendered.as_str(), ""),
    };
    let mut numbers = args
        .split(',')
        .map(|part| part.trim().parse::<u32>().unwrap_or_default());
    let length = numbers.next().unwrap_or_default();
    let scale = numbers.next().unwrap_or_default();
    (base.trim().to_ascii_uppercase(), length, scale)
}
