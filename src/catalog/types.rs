use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic kind of a catalog column type, independent of any target language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "raw", rename_all = "snake_case")]
pub enum SemanticType {
    /// Calendar date without time.
    Date,
    /// Date and time of day.
    DateTime,
    /// Character data of any length.
    Text,
    /// 64-bit signed integer.
    Int64,
    /// 32-bit signed integer.
    Int32,
    /// Boolean.
    Boolean,
    /// Arbitrary-precision decimal.
    Decimal,
    /// Catalog type with no known mapping; carries the raw type name.
    Unmapped(String),
}

impl SemanticType {
    /// Map a catalog-native type name to its semantic kind.
    ///
    /// Matching is case-insensitive and ignores any `(length, scale)` suffix.
    pub fn from_catalog(type_name: &str) -> Self {
        let upper = type_name.trim().to_ascii_uppercase();
        let base = upper.split('(').next().unwrap_or(&upper).trim();

        match base {
            "DATE" => SemanticType::Date,
            "TIMESTAMP" | "TIMESTAMPTZ" | "DATETIME" | "TIMESTAMP WITH TIME ZONE"
            | "TIMESTAMP WITHOUT TIME ZONE" => SemanticType::DateTime,
            "VARCHAR" | "VARGRAPHIC" | "CLOB" | "CHARACTER VARYING" | "TEXT" | "DBCLOB" => {
                SemanticType::Text
            }
            "BIGINT" | "INT8" => SemanticType::Int64,
            "INTEGER" | "INT" | "INT4" => SemanticType::Int32,
            "BOOLEAN" | "BOOL" => SemanticType::Boolean,
            "DECIMAL" | "NUMERIC" | "DEC" => SemanticType::Decimal,
            _ => SemanticType::Unmapped(type_name.trim().to_string()),
        }
    }

    /// True when the catalog type had no known mapping.
    pub fn is_unmapped(&self) -> bool {
        matches!(self, SemanticType::Unmapped(_))
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticType::Date => write!(f, "date"),
            SemanticType::DateTime => write!(f, "date-time"),
            SemanticType::Text => write!(f, "text"),
            SemanticType::Int64 => write!(f, "int64"),
            SemanticType::Int32 => write!(f, "int32"),
            SemanticType::Boolean => write!(f, "boolean"),
            SemanticType::Decimal => write!(f, "decimal"),
            SemanticType::Unmapped(raw) => write!(f, "unmapped({raw})"),
        }
    }
}
