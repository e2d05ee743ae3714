//! Diagnostic sweep over a parsed pipeline configuration
//!
//! Rendering never consults these diagnostics; they exist for the
//! `validate` command and the opt-in strict mode. Strict mode escalates
//! reference and cycle findings from warnings to errors.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::ast::{ModuleType, PipelineSpec};
use crate::dag::{sort::topological_order, DropReason, ModuleGraph};

/// Module names the engine accepts without quoting tricks
static MODULE_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_-]*$").unwrap());

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A single finding with context
#[derive(Debug, Error)]
pub enum Diagnostic {
    #[error("Failed to parse pipeline config: {message}")]
    ParseFailure { message: String },

    // The raw reference cannot be a field named `source`: thiserror would
    // treat it as the error's source() and demand an Error impl on String.
    #[error("Input '{input}' on module '{module}' has a malformed source: '{reference}'")]
    MalformedSource {
        module: String,
        input: String,
        reference: String,
        severity: Severity,
    },

    #[error("Input '{input}' on module '{module}' references unknown module '{referenced}'")]
    UnknownSourceModule {
        module: String,
        input: String,
        referenced: String,
        available: Vec<String>,
        severity: Severity,
    },

    #[error("Unknown module type '{module_type}' on module '{module}'")]
    UnknownModuleType {
        module: String,
        module_type: String,
        suggestions: Vec<String>,
    },

    #[error("Invalid module name format: '{name}'")]
    InvalidModuleName { name: String },

    #[error("Module '{name}' declares no inputs or outputs")]
    InertModule { name: String },

    #[error("Dependency cycle involving: {modules}")]
    DependencyCycle { modules: String, severity: Severity },
}

impl Diagnostic {
    /// Get severity (error vs warning)
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::ParseFailure { .. } => Severity::Error,
            Diagnostic::MalformedSource { severity, .. } => *severity,
            Diagnostic::UnknownSourceModule { severity, .. } => *severity,
            Diagnostic::DependencyCycle { severity, .. } => *severity,
            Diagnostic::UnknownModuleType { .. } => Severity::Warning,
            Diagnostic::InvalidModuleName { .. } => Severity::Warning,
            Diagnostic::InertModule { .. } => Severity::Warning,
        }
    }

    /// Get suggestion for fixing this finding
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Diagnostic::ParseFailure { .. } => {
                Some("Check YAML syntax: indentation and quoting".to_string())
            }
            Diagnostic::MalformedSource { .. } => {
                Some("Use the form '<module>.<output>' with both parts non-empty".to_string())
            }
            Diagnostic::UnknownSourceModule { available, .. } => {
                if available.is_empty() {
                    Some("No modules available in pipeline".to_string())
                } else if available.len() <= 5 {
                    Some(format!("Available modules: {}", available.join(", ")))
                } else {
                    Some(format!(
                        "Available modules: {} (and {} more)",
                        available[..3].join(", "),
                        available.len() - 3
                    ))
                }
            }
            Diagnostic::UnknownModuleType { suggestions, .. } => {
                if suggestions.is_empty() {
                    None
                } else {
                    Some(format!("Did you mean: {}?", suggestions.join(", ")))
                }
            }
            Diagnostic::InvalidModuleName { .. } => Some(
                "Module names start with a letter and use letters, digits, '_' or '-'".to_string(),
            ),
            Diagnostic::InertModule { .. } => {
                Some("Wire the module into the pipeline or remove it".to_string())
            }
            Diagnostic::DependencyCycle { .. } => {
                Some("Remove one of the source references in the cycle".to_string())
            }
        }
    }
}

/// Result of validating one pipeline config
#[derive(Debug)]
pub struct ValidationReport {
    pub file_path: String,
    pub module_count: usize,
    pub edge_count: usize,
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

impl ValidationReport {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            module_count: 0,
            edge_count: 0,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity() == Severity::Warning {
            self.warnings.push(diagnostic);
        } else {
            self.errors.push(diagnostic);
        }
    }
}

/// Sweep a parsed configuration for findings, in configuration order.
///
/// `strict` escalates dropped references and cycles to errors; without it
/// they stay warnings, matching the renderer's lenient behavior.
pub fn collect_diagnostics(
    spec: &PipelineSpec,
    graph: &ModuleGraph,
    strict: bool,
) -> Vec<Diagnostic> {
    let escalated = if strict { Severity::Error } else { Severity::Warning };
    let mut findings = Vec::new();

    for (name, module) in spec.pipeline_modules.iter() {
        if !MODULE_NAME_REGEX.is_match(name) {
            findings.push(Diagnostic::InvalidModuleName {
                name: name.to_string(),
            });
        }
        if let Some(module_type) = module.module_type.as_deref() {
            if ModuleType::parse(module_type).is_none() {
                findings.push(Diagnostic::UnknownModuleType {
                    module: name.to_string(),
                    module_type: module_type.to_string(),
                    suggestions: ModuleType::find_similar(module_type, 3)
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                });
            }
        }
        if module.inputs.is_empty() && module.outputs.is_empty() {
            findings.push(Diagnostic::InertModule {
                name: name.to_string(),
            });
        }
    }

    let available: Vec<String> = spec
        .pipeline_modules
        .iter()
        .map(|(name, _)| name.to_string())
        .collect();
    for dropped in graph.dropped() {
        match dropped.reason {
            DropReason::MalformedSource => findings.push(Diagnostic::MalformedSource {
                module: dropped.module.clone(),
                input: dropped.input.clone(),
                reference: dropped.source.clone(),
                severity: escalated,
            }),
            DropReason::UnknownModule => {
                let referenced = dropped
                    .source
                    .split_once('.')
                    .map(|(module, _)| module)
                    .unwrap_or(dropped.source.as_str());
                findings.push(Diagnostic::UnknownSourceModule {
                    module: dropped.module.clone(),
                    input: dropped.input.clone(),
                    referenced: referenced.to_string(),
                    available: available.clone(),
                    severity: escalated,
                });
            }
        }
    }

    if let Err(crate::error::PipevizError::CycleDetected { modules }) = topological_order(graph) {
        findings.push(Diagnostic::DependencyCycle {
            modules,
            severity: escalated,
        });
    }

    findings
}

/// Validate one parsed configuration into a report.
pub fn validate_spec(
    file_path: &str,
    spec: &PipelineSpec,
    graph: &ModuleGraph,
    strict: bool,
) -> ValidationReport {
    let mut report = ValidationReport::new(file_path);
    report.module_count = graph.node_count();
    report.edge_count = graph.edge_count();
    for finding in collect_diagnostics(spec, graph, strict) {
        report.add(finding);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::PipelineSpec;

    fn sweep(yaml: &str, strict: bool) -> Vec<Diagnostic> {
        let spec = PipelineSpec::from_yaml(yaml).unwrap();
        let graph = ModuleGraph::from_spec(&spec);
        collect_diagnostics(&spec, &graph, strict)
    }

    #[test]
    fn clean_pipeline_has_no_findings() {
        let findings = sweep(
            r#"
pipeline_modules:
  params:
    type: ParameterModule
    outputs:
      - name: img
  results:
    type: ResultModule
    inputs:
      - name: final
        source: params.img
"#,
            true,
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn dropped_reference_is_warning_by_default_error_in_strict() {
        let yaml = r#"
pipeline_modules:
  consumer:
    inputs:
      - name: x
        source: ghost.out
    outputs:
      - name: y
"#;
        let lenient = sweep(yaml, false);
        assert_eq!(lenient.len(), 1);
        assert_eq!(lenient[0].severity(), Severity::Warning);

        let strict = sweep(yaml, true);
        assert_eq!(strict[0].severity(), Severity::Error);
    }

    #[test]
    fn unknown_type_suggests_registry_names() {
        let findings = sweep(
            r#"
pipeline_modules:
  p:
    type: ParamModule
    outputs:
      - name: x
"#,
            false,
        );
        let type_finding = findings
            .iter()
            .find(|f| matches!(f, Diagnostic::UnknownModuleType { .. }))
            .unwrap();
        let suggestion = type_finding.suggestion().unwrap();
        assert!(suggestion.contains("ParameterModule"));
    }

    #[test]
    fn odd_module_name_is_flagged() {
        let findings = sweep(
            r#"
pipeline_modules:
  "9lives":
    outputs:
      - name: x
"#,
            false,
        );
        assert!(findings
            .iter()
            .any(|f| matches!(f, Diagnostic::InvalidModuleName { .. })));
    }

    #[test]
    fn inert_module_is_flagged() {
        let findings = sweep("pipeline_modules:\n  lonely: {}\n", false);
        assert!(findings
            .iter()
            .any(|f| matches!(f, Diagnostic::InertModule { .. })));
    }

    #[test]
    fn cycle_is_reported_once() {
        let findings = sweep(
            r#"
pipeline_modules:
  a:
    inputs:
      - name: x
        source: b.out
    outputs:
      - name: out
  b:
    inputs:
      - name: x
        source: a.out
    outputs:
      - name: out
"#,
            true,
        );
        let cycles: Vec<_> = findings
            .iter()
            .filter(|f| matches!(f, Diagnostic::DependencyCycle { .. }))
            .collect();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].severity(), Severity::Error);
    }

    #[test]
    fn malformed_source_names_the_bad_reference() {
        let yaml = r#"
pipeline_modules:
  consumer:
    inputs:
      - name: x
        source: "producer."
    outputs:
      - name: y
"#;
        let findings = sweep(yaml, false);
        assert_eq!(findings.len(), 1);
        assert!(matches!(
            &findings[0],
            Diagnostic::MalformedSource { reference, .. } if reference == "producer."
        ));
        assert!(findings[0].to_string().contains("'producer.'"));
        assert!(findings[0]
            .suggestion()
            .unwrap()
            .contains("<module>.<output>"));
    }

    #[test]
    fn parse_failure_is_always_an_error() {
        let finding = Diagnostic::ParseFailure {
            message: "mapping values are not allowed here".to_string(),
        };
        assert_eq!(finding.severity(), Severity::Error);
        assert!(finding.suggestion().unwrap().contains("YAML"));
    }

    #[test]
    fn report_routes_by_severity() {
        let yaml = r#"
pipeline_modules:
  consumer:
    type: MysteryModule
    inputs:
      - name: x
        source: ghost.out
    outputs:
      - name: y
"#;
        let spec = PipelineSpec::from_yaml(yaml).unwrap();
        let graph = ModuleGraph::from_spec(&spec);
        let report = validate_spec("test.yaml", &spec, &graph, true);
        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 1);
        assert!(report.has_warnings());
        assert_eq!(report.module_count, 1);
    }
}
