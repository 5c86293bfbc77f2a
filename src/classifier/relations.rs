use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::model::{ColumnDef, TableIdentity};
use crate::catalog::types::SemanticType;
use crate::naming::pluralize;

/// How many target entities a relation field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Multiplicity {
    /// A single reference.
    ToOne,
    /// A collection.
    ToMany,
}

impl Multiplicity {
    /// Property name emitted for a relation field named `field_name`.
    pub fn property_name(self, field_name: &str) -> String {
        match self {
            Multiplicity::ToMany => pluralize(field_name),
            Multiplicity::ToOne => field_name.to_string(),
        }
    }
}

/// Which endpoint declares the physical link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ownership {
    /// Declares the foreign key or join table.
    Owning,
    /// Refers back to the owning side's field.
    Inverse,
}

/// Inferred association between a subject table and a target table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RelationKind {
    /// The subject's key column is also a foreign key: the subject shares the
    /// target's identity.
    OneToOneOwning {
        /// Key column that doubles as the foreign key.
        join_column: String,
    },
    /// Plain foreign-key column on the subject.
    ManyToOneOwning {
        /// Foreign-key column on the subject.
        join_column: String,
    },
    /// The target shares the subject's identity.
    OneToOneInverse {
        /// Field on the target holding the owning side.
        mapped_by: String,
    },
    /// The target holds a foreign key to the subject.
    OneToManyInverse {
        /// Field on the target holding the owning side.
        mapped_by: String,
    },
    /// The subject owns a junction table linking it to the target.
    ManyToManyOwning {
        /// Junction table.
        join_table: TableIdentity,
        /// Junction columns referencing the subject.
        join_columns: Vec<String>,
        /// Junction columns referencing the target.
        inverse_join_columns: Vec<String>,
    },
    /// The target owns a junction table linking it to the subject.
    ManyToManyInverse {
        /// Field on the target holding the owning side.
        mapped_by: String,
    },
}

impl RelationKind {
    /// Multiplicity of the field on the subject.
    pub fn multiplicity(&self) -> Multiplicity {
        match self {
            RelationKind::OneToOneOwning { .. }
            | RelationKind::ManyToOneOwning { .. }
            | RelationKind::OneToOneInverse { .. } => Multiplicity::ToOne,
            RelationKind::OneToManyInverse { .. }
            | RelationKind::ManyToManyOwning { .. }
            | RelationKind::ManyToManyInverse { .. } => Multiplicity::ToMany,
        }
    }

    /// Whether the subject declares the physical link.
    pub fn ownership(&self) -> Ownership {
        match self {
            RelationKind::OneToOneOwning { .. }
            | RelationKind::ManyToOneOwning { .. }
            | RelationKind::ManyToManyOwning { .. } => Ownership::Owning,
            RelationKind::OneToOneInverse { .. }
            | RelationKind::OneToManyInverse { .. }
            | RelationKind::ManyToManyInverse { .. } => Ownership::Inverse,
        }
    }

    /// Back-reference field name for inverse relations.
    pub fn mapped_by(&self) -> Option<&str> {
        match self {
            RelationKind::OneToOneInverse { mapped_by }
            | RelationKind::OneToManyInverse { mapped_by }
            | RelationKind::ManyToManyInverse { mapped_by } => Some(mapped_by),
            _ => None,
        }
    }

    /// Subject column carrying the foreign key, for owning to-one relations.
    pub fn join_column(&self) -> Option<&str> {
        match self {
            RelationKind::OneToOneOwning { join_column }
            | RelationKind::ManyToOneOwning { join_column } => Some(join_column),
            _ => None,
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationKind::OneToOneOwning { .. } => write!(f, "one-to-one (owning)"),
            RelationKind::ManyToOneOwning { .. } => write!(f, "many-to-one (owning)"),
            RelationKind::OneToOneInverse { .. } => write!(f, "one-to-one (inverse)"),
            RelationKind::OneToManyInverse { .. } => write!(f, "one-to-many (inverse)"),
            RelationKind::ManyToManyOwning { .. } => write!(f, "many-to-many (owning)"),
            RelationKind::ManyToManyInverse { .. } => write!(f, "many-to-many (inverse)"),
        }
    }
}

/// Persistence propagation from the subject to the relation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CascadeMode {
    /// No propagation.
    #[default]
    None,
    /// Persist and delete propagate.
    Persist,
    /// Persist and delete propagate; removed collection members are deleted.
    PersistAndRemoveOrphans,
}

impl CascadeMode {
    /// True for any propagating mode.
    pub fn is_cascading(self) -> bool {
        !matches!(self, CascadeMode::None)
    }
}

/// One inferred association edge from the subject table to `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtraRelation {
    /// Table on the other end.
    pub target: TableIdentity,
    /// Multiplicity, ownership and mapping metadata.
    pub kind: RelationKind,
    /// Type name of the target entity.
    pub type_name: String,
    /// Field name on the subject (singular; collections are pluralized on emission).
    pub field_name: String,
    /// Cascade decision, filled by the cascade pass.
    #[serde(default)]
    pub cascade: CascadeMode,
}

impl ExtraRelation {
    /// Multiplicity of the field.
    pub fn multiplicity(&self) -> Multiplicity {
        self.kind.multiplicity()
    }

    /// Ownership of the link.
    pub fn ownership(&self) -> Ownership {
        self.kind.ownership()
    }

    /// True for collection fields.
    pub fn is_to_many(&self) -> bool {
        self.multiplicity() == Multiplicity::ToMany
    }

    /// True when the subject declares the physical link.
    pub fn owns_field(&self) -> bool {
        self.ownership() == Ownership::Owning
    }

    /// Back-reference field name for inverse relations.
    pub fn mapped_by(&self) -> Option<&str> {
        self.kind.mapped_by()
    }

    /// Field name as emitted on the entity: collections are pluralized.
    pub fn property_name(&self) -> String {
        self.multiplicity().property_name(&self.field_name)
    }
}

/// Single-column primary key of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdColumn {
    /// Catalog column name.
    pub column: String,
    /// Field name on the entity.
    pub field_name: String,
    /// Semantic type of the key.
    pub semantic_type: SemanticType,
}

/// A table with its inferred relation model, ready for emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableWithRelation {
    /// Table identity.
    pub identity: TableIdentity,
    /// Entity type name.
    pub type_name: String,
    /// Primary-key column names.
    pub primary_keys: BTreeSet<String>,
    /// Key column details when the primary key is a single basic column.
    pub id: Option<IdColumn>,
    /// True when the table carries conventional audit columns.
    pub audited: bool,
    /// True when the key is derived from a foreign key: no sequence needed.
    pub no_sequence: bool,
    /// Columns rendered as plain fields.
    pub basic_columns: Vec<ColumnDef>,
    /// Inferred relations.
    pub relations: Vec<ExtraRelation>,
}

impl TableWithRelation {
    /// True when `column` belongs to the primary key.
    pub fn is_primary_key(&self, column: &str) -> bool {
        self.primary_keys.contains(column)
    }

    /// Relations whose target is part of this table's aggregate.
    pub fn cascading_relations(&self) -> impl Iterator<Item = &ExtraRelation> {
        self.relations.iter().filter(|r| r.cascade.is_cascading())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relation_kinds_expose_multiplicity_and_ownership() {
        let cases = [
            (
                RelationKind::OneToOneOwning {
                    join_column: "ID".to_string(),
                },
                Multiplicity::ToOne,
                Ownership::Owning,
            ),
            (
                RelationKind::ManyToOneOwning {
                    join_column: "ORDER_ID".to_string(),
                },
                Multiplicity::ToOne,
                Ownership::Owning,
            ),
            (
                RelationKind::OneToOneInverse {
                    mapped_by: "order".to_string(),
                },
                Multiplicity::ToOne,
                Ownership::Inverse,
            ),
            (
                RelationKind::OneToManyInverse {
                    mapped_by: "order".to_string(),
                },
                Multiplicity::ToMany,
                Ownership::Inverse,
            ),
            (
                RelationKind::ManyToManyOwning {
                    join_table: TableIdentity::new("S", "ORDER_TAG"),
                    join_columns: vec!["ORDER_ID".to_string()],
                    inverse_join_columns: vec!["TAG_ID".to_string()],
                },
                Multiplicity::ToMany,
                Ownership::Owning,
            ),
            (
                RelationKind::ManyToManyInverse {
                    mapped_by: "tag".to_string(),
                },
                Multiplicity::ToMany,
                Ownership::Inverse,
            ),
        ];

        for (kind, multiplicity, ownership) in cases {
            assert_eq!(kind.multiplicity(), multiplicity, "{kind}");
            assert_eq!(kind.ownership(), ownership, "{kind}");
            assert_eq!(
                kind.mapped_by().is_some(),
                ownership == Ownership::Inverse,
                "{kind}"
            );
        }
    }

    #[test]
    fn cascade_mode_defaults_to_none() {
        assert_eq!(CascadeMode::default(), CascadeMode::None);
        assert!(!CascadeMode::None.is_cascading());
        assert!(CascadeMode::Persist.is_cascading());
        assert!(CascadeMode::PersistAndRemoveOrphans.is_cascading());
    }
}
