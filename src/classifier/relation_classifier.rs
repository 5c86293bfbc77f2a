use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use crate::catalog::model::{ColumnDef, ForeignKey, TableDef, TableIdentity};
use crate::catalog::types::SemanticType;
use crate::catalog::{Catalog, CatalogError};
use crate::classifier::cascade::apply_cascade;
use crate::classifier::diagnostics::Diagnostic;
use crate::classifier::recognizers::{
    is_audit_column, is_junction_table, junction_suffix, relation_field_stem, shares_identity,
};
use crate::classifier::relations::{
    CascadeMode, ExtraRelation, IdColumn, Multiplicity, RelationKind, TableWithRelation,
};
use crate::naming::{camel_case, capitalize_first, type_name};

/// Classify one table: infer its relations, partition its columns and
/// annotate cascade decisions.
///
/// Incoming foreign keys are read from `catalog`, together with the full
/// definition of every table declaring one. Non-fatal findings are appended
/// to `diagnostics`.
pub fn classify_table<C: Catalog + ?Sized>(
    catalog: &mut C,
    table: &TableDef,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<TableWithRelation, CatalogError> {
    let mut classified = classify_relations(catalog, table, diagnostics)?;
    classified.relations = apply_cascade(&table.identity, classified.relations);

    debug!(
        table = %table.identity,
        relations = classified.relations.len(),
        cascading = classified.cascading_relations().count(),
        basic_columns = classified.basic_columns.len(),
        "classified table"
    );
    Ok(classified)
}

/// First pass of [`classify_table`]: relations without cascade decisions.
pub fn classify_relations<C: Catalog + ?Sized>(
    catalog: &mut C,
    table: &TableDef,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<TableWithRelation, CatalogError> {
    let names = OwnedNames::of(table);
    let mut relations = Vec::new();

    for fk in catalog.foreign_keys_to(&table.identity)? {
        let referencing = if fk.from == table.identity {
            table.clone()
        } else {
            catalog.table_def(&fk.from)?
        };
        if let Some(relation) =
            inverse_relation(catalog, table, &names, &referencing, &fk, diagnostics)?
        {
            relations.push(relation);
        }
    }

    let owned = classify_columns(table, &names, diagnostics);
    relations.extend(owned.relations);
    disambiguate_field_names(&table.identity, &mut relations, &owned.basic_columns, diagnostics);

    let id = single_id_column(table, &owned.basic_columns);

    Ok(TableWithRelation {
        identity: table.identity.clone(),
        type_name: type_name(&table.identity.name),
        primary_keys: table.primary_keys.clone(),
        id,
        audited: owned.audited,
        no_sequence: owned.no_sequence,
        basic_columns: owned.basic_columns,
        relations,
    })
}

/// Field names a table claims for its own columns.
///
/// Derived from the table definition alone, so the owning side and every
/// inverse side agree on the name an owning field is emitted under.
struct OwnedNames {
    /// Emitted names of basic columns and owning to-one fields.
    used: BTreeSet<String>,
    /// Owning to-one field per foreign-key column.
    fields: BTreeMap<String, String>,
}

impl OwnedNames {
    fn of(table: &TableDef) -> Self {
        let mut used: BTreeSet<String> = table
            .columns
            .iter()
            .filter(|c| stays_basic(table, &c.name))
            .map(|c| camel_case(&c.name))
            .collect();
        let mut fields = BTreeMap::new();

        for column in &table.columns {
            let Some(fk) = outgoing_key(table, &column.name) else {
                continue;
            };
            let stem = camel_case(&relation_field_stem(fk));
            let name = if used.contains(&stem) {
                free_name(&used, &camel_case(&column.name), Multiplicity::ToOne)
            } else {
                stem
            };
            used.insert(name.clone());
            fields.insert(column.name.clone(), name);
        }

        Self { used, fields }
    }

    /// Owning to-one field for a single-column `fk` of this table.
    fn field(&self, fk: &ForeignKey) -> String {
        fk.single_fk_column()
            .and_then(|column| self.fields.get(column))
            .cloned()
            .unwrap_or_else(|| camel_case(&relation_field_stem(fk)))
    }

    /// Owning many-to-many field derived as `base` on this table.
    fn many_to_many_field(&self, base: &str) -> String {
        free_name(&self.used, base, Multiplicity::ToMany)
    }
}

/// Single-column foreign key declared on `column`, if any.
fn outgoing_key<'a>(table: &'a TableDef, column: &str) -> Option<&'a ForeignKey> {
    table
        .foreign_keys
        .iter()
        .find(|fk| fk.single_fk_column() == Some(column))
}

/// Whether `column` is emitted as a basic field of `table`.
fn stays_basic(table: &TableDef, column: &str) -> bool {
    match outgoing_key(table, column) {
        Some(_) => table.is_primary_key(column),
        None => !is_audit_column(column),
    }
}

/// `base`, or `base` with the smallest numeric suffix from 2, whose emitted
/// form is not in `used`.
fn free_name(used: &BTreeSet<String>, base: &str, multiplicity: Multiplicity) -> String {
    if !used.contains(&multiplicity.property_name(base)) {
        return base.to_string();
    }
    (2usize..)
        .map(|idx| format!("{base}{idx}"))
        .find(|name| !used.contains(&multiplicity.property_name(name)))
        .unwrap_or_else(|| base.to_string())
}

/// Relation seen from `subject` for a foreign key declared by `referencing`.
fn inverse_relation<C: Catalog + ?Sized>(
    catalog: &mut C,
    subject: &TableDef,
    subject_names: &OwnedNames,
    referencing: &TableDef,
    fk: &ForeignKey,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Option<ExtraRelation>, CatalogError> {
    if is_junction_table(referencing) {
        let Some(other) = referencing.foreign_keys.iter().find(|other| *other != fk) else {
            return Ok(None);
        };
        let junction = &referencing.identity;

        if let Some(rest) = junction_suffix(&junction.name, &subject.identity.name) {
            // Both keys of a self-referencing junction give the same suffix.
            let base = if other.to == subject.identity {
                camel_case(&relation_field_stem(other))
            } else {
                camel_case(rest)
            };
            let field_name = subject_names.many_to_many_field(&base);
            if field_name != base {
                warn!(
                    table = %subject.identity,
                    junction = %junction,
                    field = %base,
                    renamed_to = %field_name,
                    "many-to-many field name taken; renamed"
                );
                diagnostics.push(Diagnostic::renamed_field(
                    &subject.identity,
                    &base,
                    &field_name,
                ));
            }
            return Ok(Some(ExtraRelation {
                target: other.to.clone(),
                kind: RelationKind::ManyToManyOwning {
                    join_table: junction.clone(),
                    join_columns: fk.fk_columns.clone(),
                    inverse_join_columns: other.fk_columns.clone(),
                },
                type_name: type_name(&other.to.name),
                field_name,
                cascade: CascadeMode::None,
            }));
        }
        if let Some(rest) = junction_suffix(&junction.name, &other.to.name) {
            let owner = catalog.table_def(&other.to)?;
            let mapped_by = OwnedNames::of(&owner).many_to_many_field(&camel_case(rest));
            return Ok(Some(ExtraRelation {
                target: other.to.clone(),
                kind: RelationKind::ManyToManyInverse { mapped_by },
                type_name: type_name(&other.to.name),
                field_name: camel_case(&other.to.name),
                cascade: CascadeMode::None,
            }));
        }

        warn!(
            table = %subject.identity,
            junction = %junction,
            "cannot determine many-to-many owner; relation skipped"
        );
        diagnostics.push(Diagnostic::ambiguous_many_to_many(&subject.identity, junction));
        return Ok(None);
    }

    if fk.is_composite() {
        debug!(
            table = %subject.identity,
            constraint = %fk.constraint_name,
            "skipping incoming composite foreign key"
        );
        diagnostics.push(Diagnostic::composite_foreign_key(
            &fk.from,
            &fk.constraint_name,
            &fk.fk_column_list(),
        ));
        return Ok(None);
    }

    let mapped_by = OwnedNames::of(referencing).field(fk);
    let kind = if shares_identity(referencing, fk) {
        RelationKind::OneToOneInverse { mapped_by }
    } else {
        RelationKind::OneToManyInverse { mapped_by }
    };

    Ok(Some(ExtraRelation {
        target: referencing.identity.clone(),
        kind,
        type_name: type_name(&referencing.identity.name),
        field_name: camel_case(&referencing.identity.name),
        cascade: CascadeMode::None,
    }))
}

#[derive(Default)]
struct OwnedColumns {
    relations: Vec<ExtraRelation>,
    basic_columns: Vec<ColumnDef>,
    audited: bool,
    no_sequence: bool,
}

/// Split the subject's own columns into owning relations, basic columns and
/// audit columns.
fn classify_columns(
    table: &TableDef,
    names: &OwnedNames,
    diagnostics: &mut Vec<Diagnostic>,
) -> OwnedColumns {
    let mut owned = OwnedColumns::default();

    for fk in table.foreign_keys.iter().filter(|fk| fk.is_composite()) {
        warn!(
            table = %table.identity,
            constraint = %fk.constraint_name,
            "composite foreign key is not mapped as a relation"
        );
        diagnostics.push(Diagnostic::composite_foreign_key(
            &table.identity,
            &fk.constraint_name,
            &fk.fk_column_list(),
        ));
    }

    for column in &table.columns {
        match outgoing_key(table, &column.name) {
            Some(fk) => {
                let stem = camel_case(&relation_field_stem(fk));
                let field_name = names.field(fk);
                if field_name != stem {
                    warn!(
                        table = %table.identity,
                        column = %column.name,
                        field = %stem,
                        renamed_to = %field_name,
                        "relation field name taken; renamed"
                    );
                    diagnostics.push(Diagnostic::renamed_field(
                        &table.identity,
                        &stem,
                        &field_name,
                    ));
                }
                let kind = if table.is_primary_key(&column.name) {
                    owned.no_sequence = true;
                    push_basic(&mut owned, table, column, diagnostics);
                    RelationKind::OneToOneOwning {
                        join_column: column.name.clone(),
                    }
                } else {
                    RelationKind::ManyToOneOwning {
                        join_column: column.name.clone(),
                    }
                };
                owned.relations.push(ExtraRelation {
                    target: fk.to.clone(),
                    kind,
                    type_name: type_name(&fk.to.name),
                    field_name,
                    cascade: CascadeMode::None,
                });
            }
            None if is_audit_column(&column.name) => owned.audited = true,
            None => push_basic(&mut owned, table, column, diagnostics),
        }
    }

    owned
}

fn push_basic(
    owned: &mut OwnedColumns,
    table: &TableDef,
    column: &ColumnDef,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if let SemanticType::Unmapped(raw) = SemanticType::from_catalog(&column.type_name) {
        warn!(
            table = %table.identity,
            column = %column.name,
            type_name = %raw,
            "column type has no mapping"
        );
        diagnostics.push(Diagnostic::unmapped_type(&table.identity, &column.name, &raw));
    }
    owned.basic_columns.push(column.clone());
}

fn single_id_column(table: &TableDef, basic_columns: &[ColumnDef]) -> Option<IdColumn> {
    if table.primary_keys.len() != 1 {
        return None;
    }
    let key = table.primary_keys.iter().next()?;
    let column = basic_columns.iter().find(|c| &c.name == key)?;
    Some(IdColumn {
        column: column.name.clone(),
        field_name: camel_case(&column.name),
        semantic_type: SemanticType::from_catalog(&column.type_name),
    })
}

/// Make emitted field names unique within the table.
///
/// Basic columns are claimed first, then owning to-one fields, owning
/// collections and inverse fields. Owning names are already unique against
/// the table's own columns; any owning field still colliding gets a numeric
/// suffix and a diagnostic. A colliding inverse field gets its mapped-by name
/// appended, then a numeric suffix.
fn disambiguate_field_names(
    subject: &TableIdentity,
    relations: &mut [ExtraRelation],
    basic_columns: &[ColumnDef],
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut used: BTreeSet<String> = basic_columns.iter().map(|c| camel_case(&c.name)).collect();

    let passes: [fn(&ExtraRelation) -> bool; 2] = [
        |r| r.owns_field() && !r.is_to_many(),
        |r| r.owns_field() && r.is_to_many(),
    ];
    for pass in passes {
        for relation in relations.iter_mut().filter(|r| pass(r)) {
            let name = free_name(&used, &relation.field_name, relation.multiplicity());
            if name != relation.field_name {
                warn!(
                    table = %subject,
                    field = %relation.field_name,
                    renamed_to = %name,
                    "relation field name taken; renamed"
                );
                diagnostics.push(Diagnostic::renamed_field(subject, &relation.field_name, &name));
                relation.field_name = name;
            }
            used.insert(relation.property_name());
        }
    }

    for relation in relations.iter_mut().filter(|r| !r.owns_field()) {
        let multiplicity = relation.multiplicity();
        let mut name = relation.field_name.clone();
        if used.contains(&multiplicity.property_name(&name)) {
            if let Some(mapped_by) = relation.mapped_by() {
                name = format!("{name}{}", capitalize_first(mapped_by));
            }
        }
        relation.field_name = free_name(&used, &name, multiplicity);
        used.insert(relation.property_name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::memory::MemoryCatalog;

    fn table(name: &str, columns: &[&str], primary_keys: &[&str]) -> TableDef {
        let mut def = TableDef::new(TableIdentity::new("S", name));
        def.columns = columns
            .iter()
            .enumerate()
            .map(|(idx, c)| ColumnDef::new(idx as u32 + 1, *c, "BIGINT"))
            .collect();
        def.primary_keys = primary_keys.iter().map(|c| c.to_string()).collect();
        def
    }

    fn fk(from: &str, column: &str, to: &str, pk: &str) -> ForeignKey {
        ForeignKey {
            constraint_name: format!("FK_{from}_{column}"),
            from: TableIdentity::new("S", from),
            to: TableIdentity::new("S", to),
            fk_columns: vec![column.to_string()],
            pk_columns: vec![pk.to_string()],
        }
    }

    #[test]
    fn colliding_inverse_fields_are_disambiguated_by_mapped_by() {
        let account = table("ACCOUNT", &["ACCOUNT_ID"], &["ACCOUNT_ID"]);
        let mut transfer = table(
            "TRANSFER",
            &["TRANSFER_ID", "FROM_ACCOUNT_ID", "TO_ACCOUNT_ID"],
            &["TRANSFER_ID"],
        );
        transfer.foreign_keys = vec![
            fk("TRANSFER", "FROM_ACCOUNT_ID", "ACCOUNT", "ACCOUNT_ID"),
            fk("TRANSFER", "TO_ACCOUNT_ID", "ACCOUNT", "ACCOUNT_ID"),
        ];
        let mut catalog = MemoryCatalog::from_tables([account.clone(), transfer]);

        let mut diagnostics = Vec::new();
        let classified =
            classify_relations(&mut catalog, &account, &mut diagnostics).expect("classify");

        let fields: Vec<(&str, Option<&str>)> = classified
            .relations
            .iter()
            .map(|r| (r.field_name.as_str(), r.mapped_by()))
            .collect();
        assert_eq!(
            fields,
            vec![("transfer", Some("from")), ("transferTo", Some("to"))]
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn inverse_field_never_shadows_a_basic_column() {
        let mut person = table("PERSON", &["PERSON_ID", "PET"], &["PERSON_ID"]);
        person.columns[1].type_name = "VARCHAR".to_string();
        let mut pet = table("PET", &["PET_ID", "OWNER_PERSON_ID"], &["PET_ID"]);
        pet.foreign_keys = vec![fk("PET", "OWNER_PERSON_ID", "PERSON", "PERSON_ID")];
        let mut catalog = MemoryCatalog::from_tables([person.clone(), pet]);

        let classified =
            classify_relations(&mut catalog, &person, &mut Vec::new()).expect("classify");
        assert_eq!(classified.relations[0].field_name, "petOwner");
    }

    fn emitted_names(classified: &TableWithRelation) -> Vec<String> {
        classified
            .basic_columns
            .iter()
            .map(|c| camel_case(&c.name))
            .chain(classified.relations.iter().map(ExtraRelation::property_name))
            .collect()
    }

    fn assert_unique(names: &[String]) {
        let distinct: BTreeSet<&String> = names.iter().collect();
        assert_eq!(distinct.len(), names.len(), "duplicate emitted names in {names:?}");
    }

    #[test]
    fn self_referencing_junction_names_each_side_after_the_other_key() {
        let person = table("PERSON", &["PERSON_ID"], &["PERSON_ID"]);
        let mut friend = table(
            "PERSON_FRIEND",
            &["PERSON_ID", "FRIEND_PERSON_ID"],
            &["PERSON_ID", "FRIEND_PERSON_ID"],
        );
        friend.foreign_keys = vec![
            fk("PERSON_FRIEND", "PERSON_ID", "PERSON", "PERSON_ID"),
            fk("PERSON_FRIEND", "FRIEND_PERSON_ID", "PERSON", "PERSON_ID"),
        ];
        let mut catalog = MemoryCatalog::from_tables([person.clone(), friend]);

        let mut diagnostics = Vec::new();
        let classified =
            classify_relations(&mut catalog, &person, &mut diagnostics).expect("classify");

        let fields: Vec<(&str, Vec<String>)> = classified
            .relations
            .iter()
            .map(|r| match &r.kind {
                RelationKind::ManyToManyOwning { join_columns, .. } => {
                    (r.field_name.as_str(), join_columns.clone())
                }
                other => panic!("expected owning many-to-many, got {other}"),
            })
            .collect();
        assert_eq!(
            fields,
            vec![
                ("friend", vec!["PERSON_ID".to_string()]),
                ("person", vec!["FRIEND_PERSON_ID".to_string()]),
            ]
        );
        assert_unique(&emitted_names(&classified));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn owning_field_colliding_with_a_basic_column_is_renamed_on_both_sides() {
        let status = table("STATUS", &["ID"], &["ID"]);
        let mut ticket = table("TICKET", &["TICKET_ID", "STATUS", "STATUS_ID"], &["TICKET_ID"]);
        ticket.foreign_keys = vec![fk("TICKET", "STATUS_ID", "STATUS", "ID")];
        let mut catalog = MemoryCatalog::from_tables([status.clone(), ticket.clone()]);

        let mut diagnostics = Vec::new();
        let classified =
            classify_relations(&mut catalog, &ticket, &mut diagnostics).expect("classify");
        assert_eq!(classified.relations.len(), 1);
        assert_eq!(classified.relations[0].field_name, "statusId");
        assert_unique(&emitted_names(&classified));
        assert_eq!(
            diagnostics,
            vec![Diagnostic::renamed_field(&ticket.identity, "status", "statusId")]
        );

        let mut inverse_diagnostics = Vec::new();
        let inverse = classify_relations(&mut catalog, &status, &mut inverse_diagnostics)
            .expect("classify");
        assert_eq!(inverse.relations[0].mapped_by(), Some("statusId"));
        assert!(inverse_diagnostics.is_empty());
    }

    #[test]
    fn inverse_collection_never_shadows_a_plural_basic_column() {
        let order = table("ORDER", &["ORDER_ID", "ORDER_ITEMS"], &["ORDER_ID"]);
        let mut item = table("ORDER_ITEM", &["ITEM_ID", "ORDER_ID"], &["ITEM_ID"]);
        item.foreign_keys = vec![fk("ORDER_ITEM", "ORDER_ID", "ORDER", "ORDER_ID")];
        let mut catalog = MemoryCatalog::from_tables([order.clone(), item]);

        let classified =
            classify_relations(&mut catalog, &order, &mut Vec::new()).expect("classify");
        assert_eq!(classified.relations[0].field_name, "orderItemOrder");
        assert_eq!(classified.relations[0].property_name(), "orderItemOrders");
        assert_unique(&emitted_names(&classified));
    }

    #[test]
    fn catalog_failures_are_fatal() {
        let orphan = table("ORPHAN", &["ID"], &["ID"]);
        let mut catalog = MemoryCatalog::new();
        let err = classify_table(&mut catalog, &orphan, &mut Vec::new())
            .expect_err("unknown table should fail");
        assert!(matches!(err, CatalogError::TableNotFound(t) if t.name == "ORPHAN"));
    }
}
