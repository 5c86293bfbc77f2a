use std::fmt::{self, Write};

use crate::classifier::relations::CascadeMode;
use crate::generator::aggregate::Aggregate;
use crate::generator::entity::sequence_name;

/// Build a markdown report listing tables, relations and diagnostics.
pub fn build_report(aggregate: &Aggregate) -> Result<String, fmt::Error> {
    let mut report = String::new();

    writeln!(report, "# catalog2jpa Generation Report")?;
    writeln!(report)?;
    writeln!(report, "Root table: `{}`", aggregate.root)?;
    writeln!(report)?;

    writeln!(report, "## Tables")?;
    writeln!(report)?;
    writeln!(report, "| Table | Type | Id | Audited | Sequence | Columns | Relations |")?;
    writeln!(report, "|-------|------|----|---------|----------|---------|-----------|")?;
    for table in &aggregate.tables {
        let id = table.id.as_ref().map_or_else(
            || "-".to_string(),
            |id| format!("{} ({})", id.field_name, id.semantic_type),
        );
        let sequence = sequence_name(table).unwrap_or_else(|| "-".to_string());
        writeln!(
            report,
            "| {} | {} | {} | {} | {} | {} | {} |",
            table.identity,
            table.type_name,
            id,
            yes_no(table.audited),
            sequence,
            table.basic_columns.len(),
            table.relations.len()
        )?;
    }

    writeln!(report)?;
    writeln!(report, "## Relations")?;
    writeln!(report)?;
    writeln!(report, "| Table | Field | Kind | Target | Cascade |")?;
    writeln!(report, "|-------|-------|------|--------|---------|")?;
    for table in &aggregate.tables {
        for relation in &table.relations {
            writeln!(
                report,
                "| {} | {} | {} | {} | {} |",
                table.identity,
                relation.field_name,
                relation.kind,
                relation.target,
                format_cascade(relation.cascade)
            )?;
        }
    }

    if !aggregate.diagnostics.is_empty() {
        writeln!(report)?;
        writeln!(report, "## Warnings")?;
        writeln!(report)?;
        for diagnostic in &aggregate.diagnostics {
            writeln!(report, "- **{}**: {}", diagnostic.table, diagnostic.message)?;
        }
    }

    Ok(report)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn format_cascade(cascade: CascadeMode) -> &'static str {
    match cascade {
        CascadeMode::None => "-",
        CascadeMode::Persist => "all",
        CascadeMode::PersistAndRemoveOrphans => "all + orphan removal",
    }
}
