use crate::catalog::model::{ForeignKey, TableDef};

/// Columns supplied by the shared audit base type.
pub const AUDIT_COLUMNS: [&str; 4] = ["MODIFIED_BY", "MODIFIED_DATE", "CREATED_BY", "CREATED_DATE"];

/// True for one of the four conventional audit columns, in any ASCII case.
pub fn is_audit_column(column: &str) -> bool {
    AUDIT_COLUMNS
        .iter()
        .any(|audit| audit.eq_ignore_ascii_case(column))
}

/// True when `table` is a pure association table: two columns, two foreign
/// keys, and both columns forming the primary key.
pub fn is_junction_table(table: &TableDef) -> bool {
    table.columns.len() == 2 && table.foreign_keys.len() == 2 && table.primary_keys.len() == 2
}

/// True when every column of `fk` belongs to the primary key of `table`.
///
/// `table` is the table declaring `fk`; a match means the declaring table
/// borrows its identity from the referenced one.
pub fn shares_identity(table: &TableDef, fk: &ForeignKey) -> bool {
    !fk.fk_columns.is_empty() && fk.fk_columns.iter().all(|c| table.is_primary_key(c))
}

/// Snake-case stem of the field holding a single-column foreign key.
///
/// `CUSTOMER_ID -> CUSTOMER.ID` gives `CUSTOMER`; a column named exactly like
/// the referenced key (`ORDER_ID -> ORDER.ORDER_ID`) gives the referenced
/// table name; anything else keeps the column name. Both ends of a relation
/// derive names from this stem.
pub fn relation_field_stem(fk: &ForeignKey) -> String {
    let column = fk.single_fk_column().unwrap_or_default();
    let Some(pk_column) = fk.single_pk_column() else {
        return column.to_string();
    };

    if let Some(stem) = column
        .strip_suffix(pk_column)
        .and_then(|rest| rest.strip_suffix('_'))
        .filter(|stem| !stem.is_empty())
    {
        return stem.to_string();
    }
    if column == pk_column {
        return fk.to.name.clone();
    }
    column.to_string()
}

/// Remainder of a junction table name after `<side>_`, if it starts that way.
pub fn junction_suffix<'a>(junction: &'a str, side: &str) -> Option<&'a str> {
    junction
        .strip_prefix(side)
        .and_then(|rest| rest.strip_prefix('_'))
        .filter(|rest| !rest.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::{ColumnDef, TableIdentity};

    fn fk(column: &str, to: &str, pk: &str) -> ForeignKey {
        ForeignKey {
            constraint_name: format!("FK_{column}"),
            from: TableIdentity::new("S", "CHILD"),
            to: TableIdentity::new("S", to),
            fk_columns: vec![column.to_string()],
            pk_columns: vec![pk.to_string()],
        }
    }

    #[test]
    fn relation_field_stem_strips_the_referenced_key_suffix() {
        assert_eq!(relation_field_stem(&fk("CUSTOMER_ID", "CUSTOMER", "ID")), "CUSTOMER");
        assert_eq!(relation_field_stem(&fk("BILLING_ADDRESS_ID", "ADDRESS", "ADDRESS_ID")), "BILLING");
        assert_eq!(relation_field_stem(&fk("ORDER_ID", "ORDER", "ORDER_ID")), "ORDER");
        assert_eq!(relation_field_stem(&fk("OWNER", "PERSON", "PERSON_ID")), "OWNER");
    }

    #[test]
    fn junction_detection_requires_two_columns_keys_and_foreign_keys() {
        let mut junction = TableDef::new(TableIdentity::new("S", "ORDER_TAG"));
        junction.columns = vec![
            ColumnDef::new(1, "ORDER_ID", "BIGINT"),
            ColumnDef::new(2, "TAG_ID", "BIGINT"),
        ];
        junction.primary_keys = ["ORDER_ID", "TAG_ID"].iter().map(|c| c.to_string()).collect();
        junction.foreign_keys = vec![fk("ORDER_ID", "ORDER", "ORDER_ID"), fk("TAG_ID", "TAG", "TAG_ID")];
        assert!(is_junction_table(&junction));

        let mut three_columns = junction.clone();
        three_columns.columns.push(ColumnDef::new(3, "NOTE", "VARCHAR"));
        assert!(!is_junction_table(&three_columns));

        let mut one_fk = junction;
        one_fk.foreign_keys.pop();
        assert!(!is_junction_table(&one_fk));
    }

    #[test]
    fn junction_suffix_drops_the_side_prefix_and_separator() {
        assert_eq!(junction_suffix("ORDER_TAG", "ORDER"), Some("TAG"));
        assert_eq!(junction_suffix("ORDER_TAG", "TAG"), None);
        assert_eq!(junction_suffix("ORDER", "ORDER"), None);
        assert_eq!(junction_suffix("ORDER_", "ORDER"), None);
    }

    #[test]
    fn junction_suffix_requires_a_separator_after_the_side() {
        assert_eq!(junction_suffix("ORDERLINE_TAG", "ORDER"), None);
        assert_eq!(junction_suffix("ORDERLINE_TAG", "ORDERLINE"), Some("TAG"));
    }

    #[test]
    fn audit_columns_are_recognized_in_any_case() {
        assert!(is_audit_column("CREATED_BY"));
        assert!(is_audit_column("MODIFIED_DATE"));
        assert!(is_audit_column("created_by"));
        assert!(is_audit_column("Modified_Date"));
        assert!(!is_audit_column("CREATED_AT"));
        assert!(!is_audit_column("created_at"));
    }
}
