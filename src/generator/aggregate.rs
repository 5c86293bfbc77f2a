use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::model::TableIdentity;
use crate::catalog::{Catalog, CatalogError};
use crate::classifier::cascade::should_cascade;
use crate::classifier::diagnostics::Diagnostic;
use crate::classifier::relation_classifier::classify_table;
use crate::classifier::relations::TableWithRelation;

/// One generation unit: a root table plus every table it cascades into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    /// Table the walk started from.
    pub root: TableIdentity,
    /// Classified tables in discovery order, root first.
    pub tables: Vec<TableWithRelation>,
    /// Findings gathered while classifying, without duplicates.
    pub diagnostics: Vec<Diagnostic>,
}

impl Aggregate {
    /// Classified table for `identity`, if it belongs to the aggregate.
    pub fn table(&self, identity: &TableIdentity) -> Option<&TableWithRelation> {
        self.tables.iter().find(|t| &t.identity == identity)
    }

    /// True when the walk produced at least one diagnostic.
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Walk cascading relations breadth-first from `root`.
///
/// Each table is classified exactly once; a table is enqueued the first time
/// a cascading relation reaches it. Any catalog failure aborts the walk.
pub fn collect_aggregate<C: Catalog + ?Sized>(
    catalog: &mut C,
    root: &TableIdentity,
) -> Result<Aggregate, CatalogError> {
    let mut queue = VecDeque::from([root.clone()]);
    let mut visited = HashSet::from([root.clone()]);
    let mut tables = Vec::new();
    let mut diagnostics = Vec::new();

    while let Some(identity) = queue.pop_front() {
        let def = catalog.table_def(&identity)?;
        let mut found = Vec::new();
        let classified = classify_table(catalog, &def, &mut found)?;

        for diagnostic in found {
            if !diagnostics.contains(&diagnostic) {
                diagnostics.push(diagnostic);
            }
        }

        for relation in &classified.relations {
            if should_cascade(&identity, &relation.target) && visited.insert(relation.target.clone())
            {
                debug!(from = %identity, to = %relation.target, "enqueue cascading table");
                queue.push_back(relation.target.clone());
            }
        }
        tables.push(classified);
    }

    info!(
        root = %root,
        tables = tables.len(),
        diagnostics = diagnostics.len(),
        "collected aggregate"
    );
    Ok(Aggregate {
        root: root.clone(),
        tables,
        diagnostics,
    })
}
