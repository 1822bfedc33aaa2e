//! Generator configuration.

use ditto_diagnostic::DiagnosticConfig;

/// Compiled-pattern cache size (FIFO eviction).
pub const PATTERN_CACHE_CAPACITY: usize = 32;

/// Live slots in the deferred-dependency cache before entries spill into
/// the durable overflow queue.
pub const DEPENDENCY_CACHE_CAPACITY: usize = 32;

/// When to synthesize a documentation comment for generated code.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DocumentationPolicy {
    /// Never synthesize; emit the copied documentation (if any).
    Never,
    /// Always emit a cross-reference comment pointing at the original.
    Always,
    /// Synthesize only when the copied text has no documentation.
    #[default]
    WhenMissing,
}

/// Configuration for one generator instance.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorConfig {
    pub documentation: DocumentationPolicy,
    /// Emit an attribute naming the symbol the text was copied from.
    pub emit_provenance: bool,
    /// Attribute used for provenance.
    pub provenance_attribute: String,
    /// Generator-owned attributes stripped from copied attribute lists.
    /// Matched by simple name, with or without the `Attribute` suffix and
    /// any namespace qualifier.
    pub marker_attributes: Vec<String>,
    /// Accept local functions as members.
    pub allow_local_functions: bool,
    /// Report members the dependency scheduler could never emit.
    pub report_stalled_dependencies: bool,
    /// Prefix emitted text with an auto-generated marker comment.
    pub auto_generated_header: bool,
    /// Limits for the analysis-mode diagnostic sink.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub diagnostics: DiagnosticConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            documentation: DocumentationPolicy::default(),
            emit_provenance: true,
            provenance_attribute: "global::Ditto.Generator.GeneratedFrom".to_owned(),
            marker_attributes: vec![
                "CopyFromType".to_owned(),
                "CopyFromMethod".to_owned(),
                "Pattern".to_owned(),
            ],
            allow_local_functions: false,
            report_stalled_dependencies: false,
            auto_generated_header: true,
            diagnostics: DiagnosticConfig::default(),
        }
    }
}

impl GeneratorConfig {
    #[must_use]
    pub fn with_documentation(mut self, policy: DocumentationPolicy) -> Self {
        self.documentation = policy;
        self
    }

    #[must_use]
    pub fn with_provenance(mut self, emit: bool) -> Self {
        self.emit_provenance = emit;
        self
    }

    #[must_use]
    pub fn with_marker_attribute(mut self, name: impl Into<String>) -> Self {
        self.marker_attributes.push(name.into());
        self
    }

    #[must_use]
    pub fn with_local_functions(mut self, allow: bool) -> Self {
        self.allow_local_functions = allow;
        self
    }

    #[must_use]
    pub fn with_stalled_dependency_reports(mut self, report: bool) -> Self {
        self.report_stalled_dependencies = report;
        self
    }

    #[must_use]
    pub fn with_auto_generated_header(mut self, header: bool) -> Self {
        self.auto_generated_header = header;
        self
    }

    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: DiagnosticConfig) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Whether `name` (as written in an attribute list) is generator-owned.
    pub fn is_marker_attribute(&self, name: &str) -> bool {
        let simple = name
            .rsplit(['.', ':'])
            .next()
            .unwrap_or(name)
            .trim();
        let simple = simple.strip_suffix("Attribute").unwrap_or(simple);
        self.marker_attributes
            .iter()
            .any(|marker| marker.strip_suffix("Attribute").unwrap_or(marker) == simple)
    }
}
