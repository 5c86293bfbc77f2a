use std::fmt::{self, Write};

use crate::catalog::model::ColumnDef;
use crate::catalog::types::SemanticType;
use crate::classifier::relations::{
    CascadeMode, ExtraRelation, Multiplicity, RelationKind, TableWithRelation,
};
use crate::config::GeneratorConfig;
use crate::generator::java_source::{
    relation_field, relation_java_type, write_accessors, write_preamble, INDENT,
};
use crate::generator::java_types::java_type;
use crate::naming::camel_case;

const ENTITY_IMPORTS: &[&str] = &[
    "java.io.Serializable",
    "java.math.BigDecimal",
    "java.time.LocalDate",
    "java.time.LocalDateTime",
    "java.util.ArrayList",
    "java.util.List",
    "javax.persistence.CascadeType",
    "javax.persistence.Column",
    "javax.persistence.Entity",
    "javax.persistence.FetchType",
    "javax.persistence.GeneratedValue",
    "javax.persistence.GenerationType",
    "javax.persistence.Id",
    "javax.persistence.JoinColumn",
    "javax.persistence.JoinTable",
    "javax.persistence.ManyToMany",
    "javax.persistence.ManyToOne",
    "javax.persistence.MapsId",
    "javax.persistence.OneToMany",
    "javax.persistence.OneToOne",
    "javax.persistence.SequenceGenerator",
    "javax.persistence.Table",
];

/// Name of the identity sequence for a table with a generated key.
pub fn sequence_name(table: &TableWithRelation) -> Option<String> {
    (table.primary_keys.len() == 1 && !table.no_sequence)
        .then(|| format!("{}_SEQ", table.identity.name))
}

/// Render the JPA entity class for `table`.
pub fn render_entity(
    table: &TableWithRelation,
    config: &GeneratorConfig,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_preamble(&mut out, config.sub_package("entity").as_deref())?;

    for import in ENTITY_IMPORTS {
        writeln!(out, "import {import};")?;
    }
    if table.audited && config.audit_base_class.contains('.') {
        writeln!(out, "import {};", config.audit_base_class)?;
    }
    writeln!(out)?;

    writeln!(out, "@Entity")?;
    writeln!(
        out,
        "@Table(schema = \"{}\", name = \"{}\")",
        table.identity.schema, table.identity.name
    )?;
    let extends = if table.audited {
        format!("extends {} ", config.audit_base_simple_name())
    } else {
        String::new()
    };
    writeln!(
        out,
        "public class {} {extends}implements Serializable {{",
        table.type_name
    )?;
    writeln!(out)?;
    writeln!(out, "{INDENT}private static final long serialVersionUID = 1L;")?;

    let sequence = sequence_name(table);
    for column in &table.basic_columns {
        writeln!(out)?;
        if table.is_primary_key(&column.name) {
            writeln!(out, "{INDENT}@Id")?;
            if let Some(sequence) = &sequence {
                writeln!(
                    out,
                    "{INDENT}@GeneratedValue(strategy = GenerationType.SEQUENCE, generator = \"{sequence}\")"
                )?;
                writeln!(
                    out,
                    "{INDENT}@SequenceGenerator(schema = \"{}\", name = \"{sequence}\", sequenceName = \"{sequence}\", initialValue = 1, allocationSize = 1)",
                    table.identity.schema
                )?;
            }
        }
        writeln!(
            out,
            "{INDENT}@Column(name = \"{}\"{}) // Database's type is {}",
            column.name,
            column_spec(column),
            column.type_name
        )?;
        writeln!(
            out,
            "{INDENT}private {} {};",
            column_java_type(column),
            camel_case(&column.name)
        )?;
    }

    for relation in &table.relations {
        writeln!(out)?;
        for annotation in relation_annotations(relation) {
            writeln!(out, "{INDENT}{annotation}")?;
        }
        let field = relation_field(relation);
        let java_type = relation_java_type(relation, &relation.type_name);
        if relation.is_to_many() {
            writeln!(out, "{INDENT}private {java_type} {field} = new ArrayList<>();")?;
        } else {
            writeln!(out, "{INDENT}private {java_type} {field};")?;
        }
    }

    for column in &table.basic_columns {
        write_accessors(&mut out, &column_java_type(column), &camel_case(&column.name))?;
    }
    for relation in &table.relations {
        write_accessors(
            &mut out,
            &relation_java_type(relation, &relation.type_name),
            &relation_field(relation),
        )?;
    }

    writeln!(out, "}}")?;
    Ok(out)
}

pub(crate) fn column_java_type(column: &ColumnDef) -> String {
    java_type(&SemanticType::from_catalog(&column.type_name)).to_string()
}

/// Extra `@Column` attributes carrying the declared size.
fn column_spec(column: &ColumnDef) -> String {
    match column.type_name.to_ascii_uppercase().as_str() {
        "VARGRAPHIC" => format!(", columnDefinition = \"VARGRAPHIC({})\"", column.length),
        "VARCHAR" | "CHARACTER VARYING" if column.length > 0 => {
            format!(", length = {}", column.length)
        }
        "DECIMAL" | "NUMERIC" if column.length > 0 => {
            format!(", precision = {}, scale = {}", column.length, column.scale)
        }
        _ => String::new(),
    }
}

/// Mapping annotations for one relation field.
pub fn relation_annotations(relation: &ExtraRelation) -> Vec<String> {
    let many_to_many = matches!(
        relation.kind,
        RelationKind::ManyToManyOwning { .. } | RelationKind::ManyToManyInverse { .. }
    );
    let cascade = match relation.cascade {
        CascadeMode::None => "",
        CascadeMode::Persist => ", cascade = CascadeType.ALL",
        CascadeMode::PersistAndRemoveOrphans if many_to_many => ", cascade = CascadeType.ALL",
        CascadeMode::PersistAndRemoveOrphans => {
            ", cascade = CascadeType.ALL, orphanRemoval = true"
        }
    };

    match &relation.kind {
        RelationKind::OneToOneOwning { .. } => vec![
            format!("@OneToOne(fetch = FetchType.LAZY{cascade})"),
            "@MapsId".to_string(),
        ],
        RelationKind::ManyToOneOwning { join_column } => vec![
            format!("@ManyToOne(fetch = FetchType.LAZY{cascade})"),
            format!("@JoinColumn(name = \"{join_column}\")"),
        ],
        RelationKind::OneToOneInverse { mapped_by } => vec![format!(
            "@OneToOne(fetch = FetchType.LAZY, mappedBy = \"{mapped_by}\"{cascade})"
        )],
        RelationKind::OneToManyInverse { mapped_by } => vec![format!(
            "@OneToMany(fetch = FetchType.LAZY, mappedBy = \"{mapped_by}\"{cascade})"
        )],
        RelationKind::ManyToManyOwning {
            join_table,
            join_columns,
            inverse_join_columns,
        } => vec![
            format!("@ManyToMany(fetch = FetchType.LAZY{cascade})"),
            format!(
                "@JoinTable(name = \"{}\", schema = \"{}\",",
                join_table.name, join_table.schema
            ),
            format!("{INDENT}joinColumns = {{{}}},", join_column_list(join_columns)),
            format!(
                "{INDENT}inverseJoinColumns = {{{}}}",
                join_column_list(inverse_join_columns)
            ),
            ")".to_string(),
        ],
        RelationKind::ManyToManyInverse { mapped_by } => vec![format!(
            "@ManyToMany(fetch = FetchType.LAZY, mappedBy = \"{}\"{cascade})",
            Multiplicity::ToMany.property_name(mapped_by)
        )],
    }
}

fn join_column_list(columns: &[String]) -> String {
    columns
        .iter()
        .map(|c| format!("@JoinColumn(name = \"{c}\")"))
        .collect::<Vec<_>>()
        .join(", ")
}
