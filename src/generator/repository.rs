use std::fmt::{self, Write};

use crate::classifier::relations::TableWithRelation;
use crate::config::GeneratorConfig;
use crate::generator::java_source::write_preamble;
use crate::generator::java_types::java_type;

/// Render the Spring Data repository for `table`.
///
/// Returns `None` when the table has no single-column key.
pub fn render_repository(
    table: &TableWithRelation,
    config: &GeneratorConfig,
) -> Result<Option<String>, fmt::Error> {
    let Some(id) = &table.id else {
        return Ok(None);
    };
    let entity = &table.type_name;

    let mut out = String::new();
    write_preamble(&mut out, config.sub_package("repository").as_deref())?;
    writeln!(out, "import org.springframework.data.jpa.repository.JpaRepository;")?;
    writeln!(
        out,
        "import org.springframework.data.jpa.repository.JpaSpecificationExecutor;"
    )?;
    if let Some(entity_package) = config.sub_package("entity") {
        writeln!(out)?;
        writeln!(out, "import {entity_package}.{entity};")?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "public interface {entity}Repository extends JpaRepository<{entity}, {}>, JpaSpecificationExecutor<{entity}> {{",
        java_type(&id.semantic_type)
    )?;
    writeln!(out, "}}")?;
    Ok(Some(out))
}
