use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::parser::names::{split_schema_and_relation, unquote_identifier};

/// Schema-qualified table name. Case-sensitive; used as map key and graph node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableIdentity {
    /// Schema (owner) the table lives in.
    pub schema: String,
    /// Table name within the schema.
    pub name: String,
}

impl TableIdentity {
    /// Build an identity from its two parts.
    pub fn new(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for TableIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.schema, self.name)
    }
}

impl FromStr for TableIdentity {
    type Err = String;

    /// Parse `schema.table`; both parts may be double-quoted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match split_schema_and_relation(s) {
            Some((schema, name)) if !schema.is_empty() && !name.is_empty() => {
                Ok(TableIdentity { schema, name })
            }
            _ => Err(format!(
                "Invalid table identity '{s}': expected 'schema.table'"
            )),
        }
    }
}

/// One column as described by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Ordinal position inside the table.
    pub position: u32,
    /// Column name.
    pub name: String,
    /// Catalog-native type name such as `VARCHAR` or `DECIMAL`.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Declared length (or precision for numeric types); `0` when absent.
    #[serde(default)]
    pub length: u32,
    /// Declared scale; `0` when absent.
    #[serde(default)]
    pub scale: u32,
}

impl ColumnDef {
    /// Build a column with no length or scale.
    pub fn new(position: u32, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            position,
            name: name.into(),
            type_name: type_name.into(),
            length: 0,
            scale: 0,
        }
    }

    /// Set length and scale.
    pub fn with_size(mut self, length: u32, scale: u32) -> Self {
        self.length = length;
        self.scale = scale;
        self
    }
}

/// A foreign-key constraint declared on `from` and referencing `to`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Constraint name as stored in the catalog.
    pub constraint_name: String,
    /// Table declaring the key.
    pub from: TableIdentity,
    /// Referenced table.
    pub to: TableIdentity,
    /// Referencing columns, in declaration order.
    pub fk_columns: Vec<String>,
    /// Referenced columns, in declaration order.
    pub pk_columns: Vec<String>,
}

impl ForeignKey {
    /// The referencing column when the key spans exactly one column.
    pub fn single_fk_column(&self) -> Option<&str> {
        match self.fk_columns.as_slice() {
            [column] => Some(column),
            _ => None,
        }
    }

    /// The referenced column when the key spans exactly one column.
    pub fn single_pk_column(&self) -> Option<&str> {
        match self.pk_columns.as_slice() {
            [column] => Some(column),
            _ => None,
        }
    }

    /// True when the key spans more than one column.
    pub fn is_composite(&self) -> bool {
        self.fk_columns.len() > 1
    }

    /// Referencing columns rendered the way the catalog stores them.
    pub fn fk_column_list(&self) -> String {
        self.fk_columns.join(",")
    }
}

/// Normalize a catalog column list into trimmed names.
///
/// Catalogs store multi-column keys as one comma- or whitespace-separated
/// string (`"ORDER_ID, LINE_NO"`); empty entries are dropped and quotes
/// removed.
pub fn split_column_list(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| unquote_identifier(part).to_string())
        .collect()
}

/// Everything the catalog knows about one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDef {
    /// Table identity.
    pub identity: TableIdentity,
    /// Columns ordered by position.
    pub columns: Vec<ColumnDef>,
    /// Foreign keys declared by this table.
    pub foreign_keys: Vec<ForeignKey>,
    /// Primary-key column names; order is irrelevant.
    pub primary_keys: BTreeSet<String>,
}

impl TableDef {
    /// Empty definition for `identity`.
    pub fn new(identity: TableIdentity) -> Self {
        Self {
            identity,
            columns: Vec::new(),
            foreign_keys: Vec::new(),
            primary_keys: BTreeSet::new(),
        }
    }

    /// True when `column` belongs to the primary key.
    pub fn is_primary_key(&self, column: &str) -> bool {
        self.primary_keys.contains(column)
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }
}
