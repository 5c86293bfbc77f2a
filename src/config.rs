use std::path::PathBuf;

/// Default base class for audited entities.
pub const DEFAULT_AUDIT_BASE_CLASS: &str = "com.example.shared.entity.AuditData";
/// Default package of the shared REST API types.
pub const DEFAULT_API_PACKAGE: &str = "com.example.shared.api";

/// Settings threaded into every emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Base package; artifacts land in `<package>.entity`, `<package>.repository`
    /// and `<package>.restservice`. `None` omits the package statement.
    pub package: Option<String>,
    /// Fully qualified class audited entities extend.
    pub audit_base_class: String,
    /// Package providing `RequestContext`, `RestfulOperationFlags` and `RestfulService`.
    pub api_package: String,
    /// Treat columns with unmapped types as fatal.
    pub strict_types: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package: None,
            audit_base_class: DEFAULT_AUDIT_BASE_CLASS.to_string(),
            api_package: DEFAULT_API_PACKAGE.to_string(),
            strict_types: false,
        }
    }
}

impl GeneratorConfig {
    /// `<package>.<sub>` when a package is configured.
    pub fn sub_package(&self, sub: &str) -> Option<String> {
        self.package.as_ref().map(|package| format!("{package}.{sub}"))
    }

    /// Unqualified name of the audit base class.
    pub fn audit_base_simple_name(&self) -> &str {
        self.audit_base_class
            .rsplit('.')
            .next()
            .unwrap_or(&self.audit_base_class)
    }
}

/// Where generated artifacts go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write files under this directory.
    Directory(PathBuf),
    /// Print every artifact to standard output.
    Stdout,
}
