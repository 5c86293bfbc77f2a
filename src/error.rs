use thiserror::Error;

use crate::catalog::model::TableIdentity;
use crate::catalog::CatalogError;

/// Failure while turning a catalog into generated artifacts.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Catalog access failed; the run is aborted.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// A column type has no mapping and strict types are enabled.
    #[error("column {column} of {table} has unmapped type {type_name}")]
    UnmappedType {
        /// Table owning the column.
        table: TableIdentity,
        /// Column name.
        column: String,
        /// Raw catalog type name.
        type_name: String,
    },
    /// Writing generated text into a buffer failed.
    #[error("failed to render artifact: {0}")]
    Render(#[from] std::fmt::Error),
    /// The model could not be serialized.
    #[error("failed to serialize model: {0}")]
    Json(#[from] serde_json::Error),
    /// Artifacts could not be written.
    #[error("{0}")]
    Output(String),
}
