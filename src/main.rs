//! Pipeviz CLI - pipeline diagram generator

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use walkdir::WalkDir;

use pipeviz::dag::{collect_diagnostics, topological_order, validate_spec};
use pipeviz::diagram::DEFAULT_OUTPUT_BASE;
use pipeviz::init::init_pipeline;
use pipeviz::{
    create_backend, generate, Diagnostic, DiagramOptions, FixSuggestion, ImageFormat, ModuleGraph,
    PipelineSpec, PipevizError, Severity, ValidationReport,
};

#[derive(Parser)]
#[command(name = "pipeviz")]
#[command(about = "Pipeviz - render module pipeline configs as DAG diagrams")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a pipeline config to an image
    Render {
        /// Path to pipeline YAML file
        config: String,

        /// Output path without extension
        #[arg(short, long, default_value = DEFAULT_OUTPUT_BASE)]
        output: String,

        /// Image format
        #[arg(short, long, value_enum, default_value_t = ImageFormat::Png)]
        format: ImageFormat,

        /// Render backend (graphviz, mock)
        #[arg(long, default_value = "graphviz")]
        backend: String,

        /// Refuse to render configs with dropped references or cycles
        #[arg(long)]
        strict: bool,

        /// Also write the DOT source next to the image
        #[arg(long)]
        save_dot: bool,
    },

    /// Validate one config file or every config under a directory
    Validate {
        /// Path to a pipeline YAML file or a directory of them
        path: String,

        /// Escalate dropped references and cycles to errors
        #[arg(long)]
        strict: bool,

        /// Report format
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },

    /// Print the modules, ports, and execution order of a config
    Inspect {
        /// Path to pipeline YAML file
        config: String,
    },

    /// Write a starter pipeline config
    Init {
        /// Directory to scaffold into
        #[arg(default_value = ".")]
        dir: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            config,
            output,
            format,
            backend,
            strict,
            save_dot,
        } => render_config(&config, &output, format, &backend, strict, save_dot),
        Commands::Validate {
            path,
            strict,
            format,
        } => validate_path(&path, strict, format),
        Commands::Inspect { config } => inspect_config(&config),
        Commands::Init { dir } => init_dir(&dir),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

fn render_config(
    config: &str,
    output: &str,
    format: ImageFormat,
    backend_name: &str,
    strict: bool,
    save_dot: bool,
) -> Result<(), PipevizError> {
    let path = Path::new(config);
    if !path.exists() {
        return Err(PipevizError::ConfigNotFound {
            path: config.to_string(),
        });
    }
    let yaml = fs::read_to_string(path)?;

    // Strict mode gates rendering on a clean diagnostic sweep
    if strict {
        let spec = PipelineSpec::from_yaml(&yaml)?;
        let graph = ModuleGraph::from_spec(&spec);
        let blockers: Vec<Diagnostic> = collect_diagnostics(&spec, &graph, true)
            .into_iter()
            .filter(|finding| finding.severity() == Severity::Error)
            .collect();
        if !blockers.is_empty() {
            for finding in &blockers {
                eprintln!("{} {}", "✗".red(), finding);
            }
            return Err(PipevizError::ValidationFailed {
                count: blockers.len(),
            });
        }
    }

    let backend = create_backend(backend_name)?;
    let mut options = DiagramOptions::new()
        .with_output_base(output)
        .with_format(format);
    if save_dot {
        options = options.with_saved_dot();
    }

    let report = generate(&yaml, &options, backend.as_ref())?;

    println!(
        "{} Generated {} ({} modules, {} edges)",
        "✓".green(),
        report.image_path.display().to_string().cyan(),
        report.node_count,
        report.edge_count
    );
    if let Some(dot_path) = report.dot_path {
        println!("  DOT source: {}", dot_path.display());
    }

    Ok(())
}

fn validate_path(path_arg: &str, strict: bool, format: ReportFormat) -> Result<(), PipevizError> {
    let path = Path::new(path_arg);

    let reports = if path.is_dir() {
        let configs = find_configs(path);
        if configs.is_empty() {
            return Err(PipevizError::NoConfigsFound {
                path: path_arg.to_string(),
            });
        }
        configs
            .iter()
            .map(|config| validate_file(config, strict))
            .collect::<Result<Vec<_>, _>>()?
    } else {
        if !path.exists() {
            return Err(PipevizError::ConfigNotFound {
                path: path_arg.to_string(),
            });
        }
        vec![validate_file(path, strict)?]
    };

    match format {
        ReportFormat::Text => print_text_reports(&reports),
        ReportFormat::Json => print_json_reports(&reports)?,
    }

    let error_count: usize = reports.iter().map(|report| report.errors.len()).sum();
    if error_count > 0 {
        return Err(PipevizError::ValidationFailed { count: error_count });
    }
    Ok(())
}

/// Validate a single config, folding parse failures into the report so a
/// directory sweep keeps going past malformed files.
fn validate_file(path: &Path, strict: bool) -> Result<ValidationReport, PipevizError> {
    let yaml = fs::read_to_string(path)?;
    let file_path = path.display().to_string();
    match PipelineSpec::from_yaml(&yaml) {
        Ok(spec) => {
            let graph = ModuleGraph::from_spec(&spec);
            Ok(validate_spec(&file_path, &spec, &graph, strict))
        }
        Err(PipevizError::YamlParse(err)) => {
            let mut report = ValidationReport::new(file_path);
            report.add(Diagnostic::ParseFailure {
                message: err.to_string(),
            });
            Ok(report)
        }
        Err(other) => Err(other),
    }
}

/// Collect .yaml/.yml files under a directory, sorted for stable output
fn find_configs(dir: &Path) -> Vec<PathBuf> {
    let mut configs: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("yaml") | Some("yml")
            )
        })
        .collect();
    configs.sort();
    configs
}

fn print_text_reports(reports: &[ValidationReport]) {
    for report in reports {
        if report.is_valid() {
            println!(
                "{} {}: {} module(s), {} edge(s)",
                "✓".green(),
                report.file_path,
                report.module_count,
                report.edge_count
            );
        } else {
            println!(
                "{} {}: {} error(s), {} warning(s)",
                "✗".red(),
                report.file_path,
                report.errors.len(),
                report.warnings.len()
            );
        }
        for finding in &report.errors {
            println!("  {} {}", "error:".red().bold(), finding);
            if let Some(suggestion) = finding.suggestion() {
                println!("    {} {}", "Fix:".yellow(), suggestion);
            }
        }
        for finding in &report.warnings {
            println!("  {} {}", "warning:".yellow().bold(), finding);
            if let Some(suggestion) = finding.suggestion() {
                println!("    {} {}", "Fix:".yellow(), suggestion);
            }
        }
    }

    if reports.len() > 1 {
        let valid = reports.iter().filter(|report| report.is_valid()).count();
        println!(
            "Validated {} config file(s): {} valid, {} invalid",
            reports.len(),
            valid,
            reports.len() - valid
        );
    }
}

fn print_json_reports(reports: &[ValidationReport]) -> Result<(), PipevizError> {
    let files: Vec<serde_json::Value> = reports
        .iter()
        .map(|report| {
            serde_json::json!({
                "file": report.file_path,
                "valid": report.is_valid(),
                "module_count": report.module_count,
                "edge_count": report.edge_count,
                "errors": findings_json(&report.errors),
                "warnings": findings_json(&report.warnings),
            })
        })
        .collect();

    let error_count: usize = reports.iter().map(|report| report.errors.len()).sum();
    let warning_count: usize = reports.iter().map(|report| report.warnings.len()).sum();
    let summary = serde_json::json!({
        "valid": error_count == 0,
        "file_count": reports.len(),
        "error_count": error_count,
        "warning_count": warning_count,
        "files": files,
    });

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn findings_json(findings: &[Diagnostic]) -> Vec<serde_json::Value> {
    findings
        .iter()
        .map(|finding| {
            serde_json::json!({
                "message": finding.to_string(),
                "suggestion": finding.suggestion(),
            })
        })
        .collect()
}

fn inspect_config(config: &str) -> Result<(), PipevizError> {
    let path = Path::new(config);
    if !path.exists() {
        return Err(PipevizError::ConfigNotFound {
            path: config.to_string(),
        });
    }
    let yaml = fs::read_to_string(path)?;
    let spec = PipelineSpec::from_yaml(&yaml)?;

    println!("{} {}", "Pipeline:".cyan().bold(), config);
    match &spec.global_context {
        Some(ctx) => {
            println!(
                "  Model type: {}",
                ctx.model_type.as_deref().unwrap_or("(unset)")
            );
            println!(
                "  Default device: {}",
                ctx.default_device.as_deref().unwrap_or("(unset)")
            );
            if let Some(shared) = ctx.enable_shared_memory {
                println!("  Shared memory: {shared}");
            }
        }
        None => println!("  Global context: (none)"),
    }
    println!();

    let header = format!("Modules ({}):", spec.pipeline_modules.len());
    println!("{}", header.cyan().bold());
    for (name, module) in spec.pipeline_modules.iter() {
        print!("{}", module.describe(name));
        println!();
    }

    let graph = ModuleGraph::from_spec(&spec);
    if graph.is_empty() {
        println!("{} (no modules)", "Execution order:".cyan().bold());
    } else {
        match topological_order(&graph) {
            Ok(order) => {
                println!(
                    "{} {}",
                    "Execution order:".cyan().bold(),
                    order.join(" -> ")
                );
            }
            Err(e) => {
                println!("{} unavailable ({e})", "Execution order:".cyan().bold());
            }
        }
    }

    Ok(())
}

fn init_dir(dir: &str) -> Result<(), PipevizError> {
    let created = init_pipeline(Path::new(dir))?;
    println!(
        "{} Created starter config at '{}'",
        "✓".green(),
        created.display()
    );
    println!("  Render it with: pipeviz render {}", created.display());
    Ok(())
}
