use crate::catalog::model::TableIdentity;
use crate::classifier::relations::{CascadeMode, ExtraRelation, Multiplicity};

/// Name fragment that keeps a prefixed table out of its parent's aggregate.
const FORM_MARKER: &str = "_FORM";

/// Whether `child` is an owned part of `parent`.
///
/// True when both live in the same schema, `child` is named
/// `<parent>_<rest>` and `_<rest>` does not contain `_FORM` in any ASCII case.
pub fn should_cascade(parent: &TableIdentity, child: &TableIdentity) -> bool {
    if parent.schema != child.schema {
        return false;
    }
    match child.name.strip_prefix(parent.name.as_str()) {
        Some(rest) => {
            rest.starts_with('_') && !rest.to_ascii_uppercase().contains(FORM_MARKER)
        }
        None => false,
    }
}

/// Cascade mode a relation of `subject` gets under the naming convention.
pub fn cascade_mode(subject: &TableIdentity, relation: &ExtraRelation) -> CascadeMode {
    if !should_cascade(subject, &relation.target) {
        return CascadeMode::None;
    }
    match relation.multiplicity() {
        Multiplicity::ToMany => CascadeMode::PersistAndRemoveOrphans,
        Multiplicity::ToOne => CascadeMode::Persist,
    }
}

/// Annotate a freshly classified relation list with cascade decisions.
pub fn apply_cascade(subject: &TableIdentity, relations: Vec<ExtraRelation>) -> Vec<ExtraRelation> {
    relations
        .into_iter()
        .map(|relation| ExtraRelation {
            cascade: cascade_mode(subject, &relation),
            ..relation
        })
        .collect()
}
