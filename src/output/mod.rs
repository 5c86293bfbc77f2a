/// Writes generated artifacts and the report to disk or stdout.
pub mod formatter;
/// Builds a Markdown summary of the classified aggregate.
pub mod report;
