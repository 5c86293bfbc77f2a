use std::collections::BTreeSet;

use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_types::{Integer, Text};

use crate::catalog::model::{split_column_list, ColumnDef, ForeignKey, TableIdentity};
use crate::catalog::{Catalog, CatalogError, CatalogStep};

const COLUMNS_SQL: &str = "
SELECT c.ordinal_position::int4 AS position,
       c.column_name::text AS name,
       upper(c.data_type)::text AS type_name,
       coalesce(c.character_maximum_length, c.numeric_precision, 0)::int4 AS length,
       coalesce(c.numeric_scale, 0)::int4 AS scale
  FROM information_schema.columns c
 WHERE c.table_schema = $1 AND c.table_name = $2
 ORDER BY c.ordinal_position";

const PRIMARY_KEYS_SQL: &str = "
SELECT kcu.column_name::text AS name
  FROM information_schema.table_constraints tc
  JOIN information_schema.key_column_usage kcu
    ON kcu.constraint_schema = tc.constraint_schema
   AND kcu.constraint_name = tc.constraint_name
 WHERE tc.constraint_type = 'PRIMARY KEY'
   AND tc.table_schema = $1 AND tc.table_name = $2";

const FOREIGN_KEYS_SQL: &str = "
SELECT con.conname::text AS constraint_name,
       src_ns.nspname::text AS from_schema,
       src.relname::text AS from_table,
       dst_ns.nspname::text AS to_schema,
       dst.relname::text AS to_table,
       (SELECT string_agg(a.attname, ',' ORDER BY k.ord)
          FROM unnest(con.conkey) WITH ORDINALITY AS k(attnum, ord)
          JOIN pg_attribute a ON a.attrelid = con.conrelid AND a.attnum = k.attnum)::text
         AS fk_columns,
       (SELECT string_agg(a.attname, ',' ORDER BY k.ord)
          FROM unnest(con.confkey) WITH ORDINALITY AS k(attnum, ord)
          JOIN pg_attribute a ON a.attrelid = con.confrelid AND a.attnum = k.attnum)::text
         AS pk_columns
  FROM pg_constraint con
  JOIN pg_class src ON src.oid = con.conrelid
  JOIN pg_namespace src_ns ON src_ns.oid = src.relnamespace
  JOIN pg_class dst ON dst.oid = con.confrelid
  JOIN pg_namespace dst_ns ON dst_ns.oid = dst.relnamespace
 WHERE con.contype = 'f'";

#[derive(QueryableByName)]
struct ColumnRow {
    #[diesel(sql_type = Integer)]
    position: i32,
    #[diesel(sql_type = Text)]
    name: String,
    #[diesel(sql_type = Text)]
    type_name: String,
    #[diesel(sql_type = Integer)]
    length: i32,
    #[diesel(sql_type = Integer)]
    scale: i32,
}

#[derive(QueryableByName)]
struct NameRow {
    #[diesel(sql_type = Text)]
    name: String,
}

#[derive(QueryableByName)]
struct ForeignKeyRow {
    #[diesel(sql_type = Text)]
    constraint_name: String,
    #[diesel(sql_type = Text)]
    from_schema: String,
    #[diesel(sql_type = Text)]
    from_table: String,
    #[diesel(sql_type = Text)]
    to_schema: String,
    #[diesel(sql_type = Text)]
    to_table: String,
    #[diesel(sql_type = Text)]
    fk_columns: String,
    #[diesel(sql_type = Text)]
    pk_columns: String,
}

impl From<ForeignKeyRow> for ForeignKey {
    fn from(row: ForeignKeyRow) -> Self {
        ForeignKey {
            constraint_name: row.constraint_name.trim().to_string(),
            from: TableIdentity::new(row.from_schema.trim(), row.from_table.trim()),
            to: TableIdentity::new(row.to_schema.trim(), row.to_table.trim()),
            fk_columns: split_column_list(&row.fk_columns),
            pk_columns: split_column_list(&row.pk_columns),
        }
    }
}

/// Catalog backed by a live PostgreSQL connection.
///
/// Reads `information_schema` for columns and primary keys and `pg_catalog`
/// for foreign keys so multi-column keys keep their declared column order.
pub struct PostgresCatalog {
    conn: PgConnection,
}

impl PostgresCatalog {
    /// Connect to `database_url`.
    pub fn connect(database_url: &str) -> Result<Self, CatalogError> {
        let conn = PgConnection::establish(database_url)
            .map_err(|e| CatalogError::Load(format!("Failed to connect to PostgreSQL: {e}")))?;
        Ok(Self { conn })
    }

    /// Wrap an already established connection.
    pub fn from_connection(conn: PgConnection) -> Self {
        Self { conn }
    }

    fn load_foreign_keys(
        &mut self,
        table: &TableIdentity,
        step: CatalogStep,
    ) -> Result<Vec<ForeignKey>, CatalogError> {
        let filter = match step {
            CatalogStep::ForeignKeysTo => "dst_ns.nspname = $1 AND dst.relname = $2",
            _ => "src_ns.nspname = $1 AND src.relname = $2",
        };
        let sql = format!("{FOREIGN_KEYS_SQL} AND {filter} ORDER BY con.conname");
        let rows: Vec<ForeignKeyRow> = diesel::sql_query(sql)
            .bind::<Text, _>(table.schema.as_str())
            .bind::<Text, _>(table.name.as_str())
            .load(&mut self.conn)
            .map_err(|e| query_error(table, step, e))?;
        Ok(rows.into_iter().map(ForeignKey::from).collect())
    }
}

fn query_error(table: &TableIdentity, step: CatalogStep, err: diesel::result::Error) -> CatalogError {
    CatalogError::Query {
        table: table.clone(),
        step,
        message: err.to_string(),
    }
}

impl Catalog for PostgresCatalog {
    fn columns(&mut self, table: &TableIdentity) -> Result<Vec<ColumnDef>, CatalogError> {
        let rows: Vec<ColumnRow> = diesel::sql_query(COLUMNS_SQL)
            .bind::<Text, _>(table.schema.as_str())
            .bind::<Text, _>(table.name.as_str())
            .load(&mut self.conn)
            .map_err(|e| query_error(table, CatalogStep::Columns, e))?;

        if rows.is_empty() {
            return Err(CatalogError::TableNotFound(table.clone()));
        }

        Ok(rows
            .into_iter()
            .map(|row| ColumnDef {
                position: u32::try_from(row.position).unwrap_or_default(),
                name: row.name,
                type_name: row.type_name,
                length: u32::try_from(row.length).unwrap_or_default(),
                scale: u32::try_from(row.scale).unwrap_or_default(),
            })
            .collect())
    }

    fn primary_keys(&mut self, table: &TableIdentity) -> Result<BTreeSet<String>, CatalogError> {
        let rows: Vec<NameRow> = diesel::sql_query(PRIMARY_KEYS_SQL)
            .bind::<Text, _>(table.schema.as_str())
            .bind::<Text, _>(table.name.as_str())
            .load(&mut self.conn)
            .map_err(|e| query_error(table, CatalogStep::PrimaryKeys, e))?;
        Ok(rows.into_iter().map(|row| row.name).collect())
    }

    fn foreign_keys_from(
        &mut self,
        table: &TableIdentity,
    ) -> Result<Vec<ForeignKey>, CatalogError> {
        self.load_foreign_keys(table, CatalogStep::ForeignKeysFrom)
    }

    fn foreign_keys_to(&mut self, table: &TableIdentity) -> Result<Vec<ForeignKey>, CatalogError> {
        self.load_foreign_keys(table, CatalogStep::ForeignKeysTo)
    }
}
