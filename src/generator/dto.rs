use std::fmt::{self, Write};

use crate::classifier::relations::{ExtraRelation, TableWithRelation};
use crate::config::GeneratorConfig;
use crate::generator::entity::column_java_type;
use crate::generator::java_source::{
    relation_field, relation_java_type, write_accessors, write_preamble, INDENT,
};
use crate::naming::camel_case;

/// Placeholder DTO carrying only the key of a referenced entity.
pub const ID_WRAPPER_DTO: &str = "IdWrapperDto";

/// Java type of a relation field on the DTO, or `None` when the DTO omits it.
///
/// Cascading relations nest the target's DTO; other owning relations only
/// carry the target's key.
pub fn dto_relation_type(relation: &ExtraRelation) -> Option<String> {
    if relation.cascade.is_cascading() {
        return Some(relation_java_type(
            relation,
            &format!("{}Dto", relation.type_name),
        ));
    }
    relation
        .owns_field()
        .then(|| relation_java_type(relation, ID_WRAPPER_DTO))
}

/// Render the transfer object for `table`.
pub fn render_dto(table: &TableWithRelation, config: &GeneratorConfig) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_preamble(&mut out, config.sub_package("restservice").as_deref())?;
    writeln!(out, "import java.math.BigDecimal;")?;
    writeln!(out, "import java.time.LocalDate;")?;
    writeln!(out, "import java.time.LocalDateTime;")?;
    writeln!(out, "import java.util.List;")?;
    writeln!(out)?;
    writeln!(out, "public class {}Dto {{", table.type_name)?;

    let columns: Vec<_> = table
        .basic_columns
        .iter()
        .filter(|c| !table.is_primary_key(&c.name))
        .map(|c| (column_java_type(c), camel_case(&c.name)))
        .collect();
    let relations: Vec<_> = table
        .relations
        .iter()
        .filter_map(|r| dto_relation_type(r).map(|java_type| (java_type, relation_field(r))))
        .collect();

    for (java_type, field) in columns.iter().chain(&relations) {
        writeln!(out, "{INDENT}private {java_type} {field};")?;
    }
    for (java_type, field) in columns.iter().chain(&relations) {
        write_accessors(&mut out, java_type, field)?;
    }

    writeln!(out, "}}")?;
    Ok(out)
}
