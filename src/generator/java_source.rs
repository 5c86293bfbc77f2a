use std::fmt::{self, Write};

use crate::classifier::relations::ExtraRelation;
use crate::naming::capitalize_first;

/// First line of every generated Java file.
pub(crate) const GENERATED_HEADER: &str = "// generated by catalog2jpa";

/// Java source indentation.
pub(crate) const INDENT: &str = "    ";

/// Header line plus the optional package statement.
pub(crate) fn write_preamble(out: &mut String, package: Option<&str>) -> fmt::Result {
    writeln!(out, "{GENERATED_HEADER}")?;
    if let Some(package) = package {
        writeln!(out, "package {package};")?;
    }
    writeln!(out)
}

/// Getter and setter for a private field.
pub(crate) fn write_accessors(out: &mut String, java_type: &str, field: &str) -> fmt::Result {
    let property = capitalize_first(field);
    writeln!(out)?;
    writeln!(out, "{INDENT}public {java_type} get{property}() {{")?;
    writeln!(out, "{INDENT}{INDENT}return {field};")?;
    writeln!(out, "{INDENT}}}")?;
    writeln!(out)?;
    writeln!(
        out,
        "{INDENT}public void set{property}({java_type} {field}) {{"
    )?;
    writeln!(out, "{INDENT}{INDENT}this.{field} = {field};")?;
    writeln!(out, "{INDENT}}}")
}

/// Field name of a relation as emitted.
pub(crate) fn relation_field(relation: &ExtraRelation) -> String {
    relation.property_name()
}

/// `List<T>` for collections, `T` otherwise.
pub(crate) fn relation_java_type(relation: &ExtraRelation, element: &str) -> String {
    if relation.is_to_many() {
        format!("List<{element}>")
    } else {
        element.to_string()
    }
}
