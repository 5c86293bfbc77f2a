use std::io::Write;
use std::path::{Component, Path};

use tracing::info;

use crate::config::OutputTarget;
use crate::error::GenerateError;
use crate::generator::aggregate::Aggregate;
use crate::generator::artifacts::Artifact;
use crate::output::report;

/// Write the artifacts plus `<name>_report.md` to `target`.
pub fn write_output(
    target: &OutputTarget,
    name: &str,
    artifacts: &[Artifact],
    aggregate: &Aggregate,
) -> Result<(), GenerateError> {
    validate_output_name(name).map_err(GenerateError::Output)?;
    for artifact in artifacts {
        validate_artifact_path(&artifact.relative_path).map_err(GenerateError::Output)?;
    }
    let report = Artifact {
        relative_path: format!("{name}_report.md").into(),
        contents: report::build_report(aggregate)?,
    };

    match target {
        OutputTarget::Directory(output_dir) => {
            for artifact in artifacts.iter().chain(std::iter::once(&report)) {
                write_file(output_dir, artifact)?;
            }
        }
        OutputTarget::Stdout => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            for artifact in artifacts.iter().chain(std::iter::once(&report)) {
                writeln!(out, "==> {} <==", artifact.relative_path.display())
                    .and_then(|()| writeln!(out, "{}", artifact.contents))
                    .map_err(|e| GenerateError::Output(format!("Failed to write to stdout: {e}")))?;
            }
        }
    }
    Ok(())
}

fn write_file(output_dir: &Path, artifact: &Artifact) -> Result<(), GenerateError> {
    let path = output_dir.join(&artifact.relative_path);
    let parent = path.parent().unwrap_or(output_dir);
    std::fs::create_dir_all(parent)
        .map_err(|e| GenerateError::Output(format!("Failed to create output directory: {e}")))?;
    std::fs::write(&path, &artifact.contents)
        .map_err(|e| GenerateError::Output(format!("Failed to write {}: {e}", path.display())))?;
    info!(path = %path.display(), "wrote artifact");
    Ok(())
}

fn validate_output_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Output name must not be empty".to_string());
    }
    if name.contains('/') || name.contains('\\') {
        return Err(format!(
            "Invalid output name '{name}': path separators are not allowed"
        ));
    }
    if name == "." || name == ".." {
        return Err(format!(
            "Invalid output name '{name}': traversal segments are not allowed"
        ));
    }
    Ok(())
}

fn validate_artifact_path(path: &Path) -> Result<(), String> {
    if path.as_os_str().is_empty() {
        return Err("Artifact path must not be empty".to_string());
    }
    if path.is_absolute() {
        return Err(format!(
            "Invalid artifact path '{}': absolute paths are not allowed",
            path.display()
        ));
    }
    if !path
        .components()
        .all(|component| matches!(component, Component::Normal(_)))
    {
        return Err(format!(
            "Invalid artifact path '{}': traversal segments are not allowed",
            path.display()
        ));
    }
    Ok(())
}
