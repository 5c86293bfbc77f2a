//! CLI entry point for `catalog2jpa`.

use std::path::PathBuf;
use std::process;

use clap::{ArgGroup, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog2jpa::catalog::snapshot::load_snapshot;
use catalog2jpa::catalog::{Catalog, CatalogError, TableIdentity};
use catalog2jpa::config::{DEFAULT_API_PACKAGE, DEFAULT_AUDIT_BASE_CLASS};
use catalog2jpa::generator::{collect_aggregate, generate_artifacts};
use catalog2jpa::output::formatter;
use catalog2jpa::parser::names::qualify_table_name;
use catalog2jpa::parser::sql_parser;
use catalog2jpa::{GenerateError, GeneratorConfig, OutputTarget};

#[derive(Parser)]
#[command(
    name = "catalog2jpa",
    about = "Derive JPA entities, repositories and REST services from a database catalog"
)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["ddl", "schema_dir", "snapshot", "db_url"])
))]
struct Cli {
    /// Root table, as `TABLE` or `SCHEMA.TABLE`
    table: String,

    /// Schema for unqualified table names
    #[arg(long, default_value = "public")]
    schema: String,

    /// SQL DDL files
    #[arg(long, num_args = 1..)]
    ddl: Vec<PathBuf>,

    /// Read all .sql files in directory
    #[arg(long)]
    schema_dir: Option<PathBuf>,

    /// JSON catalog snapshot
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Introspect live `PostgreSQL` database
    #[arg(long)]
    db_url: Option<String>,

    /// Base Java package of the generated sources
    #[arg(long)]
    package: Option<String>,

    /// Fully qualified base class of audited entities
    #[arg(long, default_value = DEFAULT_AUDIT_BASE_CLASS)]
    audit_base_class: String,

    /// Package of the shared REST API types
    #[arg(long, default_value = DEFAULT_API_PACKAGE)]
    api_package: String,

    /// Output directory
    #[arg(long, default_value = "catalog2jpa-output", conflicts_with = "stdout")]
    output_dir: PathBuf,

    /// Print artifacts to stdout instead of writing files
    #[arg(long)]
    stdout: bool,

    /// Fail on column types without a Java mapping
    #[arg(long)]
    strict_types: bool,

    /// Print verbose diagnostics
    #[arg(long)]
    verbose: bool,
}

impl From<&Cli> for GeneratorConfig {
    fn from(cli: &Cli) -> Self {
        GeneratorConfig {
            package: cli.package.clone().filter(|p| !p.trim().is_empty()),
            audit_base_class: cli.audit_base_class.clone(),
            api_package: cli.api_package.clone(),
            strict_types: cli.strict_types,
        }
    }
}

impl From<&Cli> for OutputTarget {
    fn from(cli: &Cli) -> Self {
        if cli.stdout {
            OutputTarget::Stdout
        } else {
            OutputTarget::Directory(cli.output_dir.clone())
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    match run(&cli) {
        Ok(true) => process::exit(1),
        Ok(false) => {}
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    }
}

/// Generate everything for the root table; `Ok(true)` when diagnostics were reported.
fn run(cli: &Cli) -> Result<bool, GenerateError> {
    let (schema, name) = qualify_table_name(&cli.table, &cli.schema);
    let root = TableIdentity::new(schema, name);
    let config = GeneratorConfig::from(cli);

    let mut catalog = open_catalog(cli)?;
    let aggregate = collect_aggregate(catalog.as_mut(), &root)?;
    let artifacts = generate_artifacts(&aggregate, &config)?;
    formatter::write_output(&OutputTarget::from(cli), &root.name, &artifacts, &aggregate)?;

    info!(
        root = %root,
        tables = aggregate.tables.len(),
        artifacts = artifacts.len(),
        "generation finished"
    );
    for diagnostic in &aggregate.diagnostics {
        eprintln!("warning: {diagnostic}");
    }
    Ok(aggregate.has_diagnostics())
}

fn open_catalog(cli: &Cli) -> Result<Box<dyn Catalog>, CatalogError> {
    if let Some(path) = &cli.snapshot {
        let json = read_input(path)?;
        return Ok(Box::new(load_snapshot(&json)?));
    }
    if let Some(url) = &cli.db_url {
        return open_database(url);
    }

    let mut sql_files = cli.ddl.clone();
    if let Some(dir) = &cli.schema_dir {
        let entries = std::fs::read_dir(dir)
            .map_err(|e| CatalogError::Load(format!("Error reading schema directory: {e}")))?;
        let mut found: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|e| e == "sql"))
            .collect();
        found.sort();
        sql_files.extend(found);
    }
    if sql_files.is_empty() {
        return Err(CatalogError::Load("No input SQL files provided".to_string()));
    }

    let mut combined_sql = String::new();
    for path in &sql_files {
        combined_sql.push_str(&read_input(path)?);
        combined_sql.push('\n');
    }
    Ok(Box::new(sql_parser::load_ddl(&combined_sql, &cli.schema)?))
}

fn read_input(path: &std::path::Path) -> Result<String, CatalogError> {
    std::fs::read_to_string(path)
        .map_err(|e| CatalogError::Load(format!("Error reading {}: {e}", path.display())))
}

#[cfg(feature = "db")]
fn open_database(url: &str) -> Result<Box<dyn Catalog>, CatalogError> {
    let catalog = catalog2jpa::catalog::postgres::PostgresCatalog::connect(url)?;
    Ok(Box::new(catalog))
}

#[cfg(not(feature = "db"))]
fn open_database(_url: &str) -> Result<Box<dyn Catalog>, CatalogError> {
    Err(CatalogError::Load(
        "--db-url requires catalog2jpa to be built with the `db` feature".to_string(),
    ))
}
