/// Return the identifier without surrounding double quotes.
pub fn unquote_identifier(ident: &str) -> &str {
    ident
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(ident)
}

/// Split a potentially schema-qualified name into `(schema, relation)`.
///
/// Handles dots inside quoted identifiers, e.g. `"my.schema"."table.name"`.
/// Catalog-qualified names (`db.schema.table`) keep the last two parts.
pub fn split_schema_and_relation(name: &str) -> Option<(String, String)> {
    let mut in_quotes = false;
    let mut start = 0usize;
    let mut parts: Vec<&str> = Vec::new();

    for (idx, ch) in name.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '.' if !in_quotes => {
                parts.push(name[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(name[start..].trim());

    if parts.len() < 2 {
        return None;
    }

    let schema = unquote_identifier(parts[parts.len() - 2]).to_string();
    let relation = unquote_identifier(parts[parts.len() - 1]).to_string();
    Some((schema, relation))
}

/// Resolve a table reference to `(schema, relation)`, falling back to
/// `default_schema` when the name is not qualified.
///
/// Identifier case is preserved: catalog names are case-sensitive.
pub fn qualify_table_name(name: &str, default_schema: &str) -> (String, String) {
    split_schema_and_relation(name.trim()).unwrap_or_else(|| {
        (
            default_schema.to_string(),
            unquote_identifier(name.trim()).to_string(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_schema_and_relation_handles_quoted_dots() {
        assert_eq!(
            split_schema_and_relation(r#""my.schema"."table.name""#),
            Some(("my.schema".to_string(), "table.name".to_string()))
        );
    }

    #[test]
    fn split_schema_and_relation_keeps_last_two_parts() {
        assert_eq!(
            split_schema_and_relation("SALES.ORDER"),
            Some(("SALES".to_string(), "ORDER".to_string()))
        );
        assert_eq!(
            split_schema_and_relation("db.SALES.ORDER"),
            Some(("SALES".to_string(), "ORDER".to_string()))
        );
        assert_eq!(split_schema_and_relation("ORDER"), None);
    }

    #[test]
    fn qualify_table_name_uses_default_schema_for_bare_names() {
        assert_eq!(
            qualify_table_name("ORDER_ITEM", "SALES"),
            ("SALES".to_string(), "ORDER_ITEM".to_string())
        );
        assert_eq!(
            qualify_table_name(r#""Order""#, "public"),
            ("public".to_string(), "Order".to_string())
        );
        assert_eq!(
            qualify_table_name("hr.EMPLOYEE", "SALES"),
            ("hr".to_string(), "EMPLOYEE".to_string())
        );
    }
}
