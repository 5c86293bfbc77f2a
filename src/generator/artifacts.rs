use std::path::PathBuf;

use crate::catalog::types::SemanticType;
use crate::config::GeneratorConfig;
use crate::error::GenerateError;
use crate::generator::aggregate::Aggregate;
use crate::generator::dto::render_dto;
use crate::generator::entity::render_entity;
use crate::generator::json_model::render_model;
use crate::generator::repository::render_repository;
use crate::generator::rest_service::render_rest_service;

/// One generated file, relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Path below the output root, e.g. `entity/Order.java`.
    pub relative_path: PathBuf,
    /// File contents.
    pub contents: String,
}

impl Artifact {
    fn new(relative_path: impl Into<PathBuf>, contents: String) -> Self {
        Self {
            relative_path: relative_path.into(),
            contents,
        }
    }
}

/// Render every artifact of `aggregate`, tables in discovery order, followed
/// by the JSON model dump.
pub fn generate_artifacts(
    aggregate: &Aggregate,
    config: &GeneratorConfig,
) -> Result<Vec<Artifact>, GenerateError> {
    check_column_types(aggregate, config)?;

    let mut artifacts = Vec::new();
    for table in &aggregate.tables {
        let name = &table.type_name;
        artifacts.push(Artifact::new(
            format!("entity/{name}.java"),
            render_entity(table, config)?,
        ));
        if let Some(repository) = render_repository(table, config)? {
            artifacts.push(Artifact::new(
                format!("repository/{name}Repository.java"),
                repository,
            ));
        }
        artifacts.push(Artifact::new(
            format!("restservice/{name}Dto.java"),
            render_dto(table, config)?,
        ));
        if let Some(service) = render_rest_service(table, config)? {
            artifacts.push(Artifact::new(
                format!("restservice/{name}RestService.java"),
                service,
            ));
        }
    }

    artifacts.push(Artifact::new(
        format!("{}_model.json", aggregate.root.name),
        render_model(aggregate)?,
    ));
    Ok(artifacts)
}

/// In strict mode, reject the first column whose type has no mapping.
fn check_column_types(aggregate: &Aggregate, config: &GeneratorConfig) -> Result<(), GenerateError> {
    if !config.strict_types {
        return Ok(());
    }
    for table in &aggregate.tables {
        for column in &table.basic_columns {
            if let SemanticType::Unmapped(raw) = SemanticType::from_catalog(&column.type_name) {
                return Err(GenerateError::UnmappedType {
                    table: table.identity.clone(),
                    column: column.name.clone(),
                    type_name: raw,
                });
            }
        }
    }
    Ok(())
}
