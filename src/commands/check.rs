use crate::analyzers::converter::{ClassifierConfig, ConverterAnalyzer, ConverterValidationResult, Verdict};
use crate::config::FieldleakConfig;
use crate::core::{CheckReport, FuncDecl, LeakDiagnostic, SourceFile};
use crate::frontend::{parse_go_file, PackageIndex};
use crate::io::{self, create_writer, FileWalker, OutputFormat};
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, debug_span, info, info_span, trace, warn};

pub struct CheckConfig {
    pub paths: Vec<PathBuf>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub plain: bool,
    pub settings: FieldleakConfig,
}

/// Run a check and write the report. Returns whether any leak was found.
pub fn handle_check(config: CheckConfig) -> Result<bool> {
    configure_color(&config);

    let files = discover_files(&config.paths, &config.settings)?;
    let targets = load_sources(&files.targets);
    let dependencies = load_sources(&files.dependencies);

    let report = check_sources(
        &targets,
        &dependencies,
        config.settings.classifier_config(),
    );

    let sink: Box<dyn std::io::Write> = match &config.output {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout()),
    };
    create_writer(config.format, sink).write_report(&report)?;

    Ok(report.summary.has_warnings())
}

fn configure_color(config: &CheckConfig) {
    if config.plain || config.output.is_some() || config.format == OutputFormat::Json {
        colored::control::set_override(false);
    } else if let Some(use_color) = config.settings.output.use_color {
        colored::control::set_override(use_color);
    }
}

/// Files to analyze, plus files only read for type declarations.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DiscoveredFiles {
    pub targets: Vec<PathBuf>,
    pub dependencies: Vec<PathBuf>,
}

/// Walk every path. Vendored and ignored files are excluded from analysis
/// but their declarations still resolve types.
pub fn discover_files(paths: &[PathBuf], settings: &FieldleakConfig) -> Result<DiscoveredFiles> {
    let mut targets = BTreeSet::new();
    let mut all = BTreeSet::new();

    for root in paths {
        let analysis_walker = FileWalker::new(root.clone())
            .include_tests(settings.analysis.include_tests)
            .include_vendor(settings.analysis.include_vendor)
            .with_ignore_patterns(settings.ignore_patterns())?;
        targets.extend(
            analysis_walker
                .walk()
                .with_context(|| format!("Failed to walk {}", root.display()))?,
        );

        // A single file still needs the rest of its package for resolution.
        let package_root = match root.parent() {
            Some(parent) if root.is_file() && !parent.as_os_str().is_empty() => {
                parent.to_path_buf()
            }
            _ => root.clone(),
        };
        let index_walker = FileWalker::new(package_root)
            .include_tests(settings.analysis.include_tests)
            .include_vendor(true);
        all.extend(index_walker.walk()?);
    }

    let dependencies = all.difference(&targets).cloned().collect();
    Ok(DiscoveredFiles {
        targets: targets.into_iter().collect(),
        dependencies,
    })
}

/// Read and parse every file; unreadable files are logged and skipped.
pub fn load_sources(paths: &[PathBuf]) -> Vec<SourceFile> {
    paths
        .iter()
        .filter_map(|path| match load_source(path) {
            Ok(file) => Some(file),
            Err(err) => {
                warn!("skipping {}: {}", path.display(), err);
                None
            }
        })
        .collect()
}

fn load_source(path: &Path) -> crate::errors::Result<SourceFile> {
    let content = io::read_file(path)?;
    parse_go_file(path, &content)
}

/// Analyze `targets` in order. `dependencies` only contribute declarations.
pub fn check_sources(
    targets: &[SourceFile],
    dependencies: &[SourceFile],
    classifier: ClassifierConfig,
) -> CheckReport {
    let span = info_span!("check", files = targets.len());
    let _guard = span.enter();

    let mut index = PackageIndex::build(targets);
    for file in dependencies {
        index.add_file(file);
    }
    debug!(packages = index.package_count(), "Package index built");

    let analyzer = ConverterAnalyzer::new(classifier);
    let mut report = CheckReport::default();

    for file in targets {
        let _file_span = debug_span!("file", path = %file.path.display()).entered();
        report.summary.files_analyzed += 1;

        let mut file_warnings = 0;
        for (func, verdict) in analyzer.analyze_file(file, &index) {
            match verdict {
                Verdict::Leaking(result) => {
                    report.diagnostics.push(diagnostic(file, func, result));
                    file_warnings += 1;
                }
                Verdict::Skipped(err) => {
                    warn!("validation error, ignoring {}: {}", func.name, err);
                }
                Verdict::Valid => debug!(function = %func.name, "converter uses every field"),
                Verdict::NotConverter => trace!(function = %func.name, "not a converter"),
            }
        }

        if file_warnings > 0 {
            report.summary.warnings += file_warnings;
            report.summary.files_with_warnings += 1;
        }
    }

    info!(
        files = report.summary.files_analyzed,
        warnings = report.summary.warnings,
        "Check complete"
    );
    report
}

fn diagnostic(file: &SourceFile, func: &FuncDecl, result: ConverterValidationResult) -> LeakDiagnostic {
    LeakDiagnostic {
        file: file.path.clone(),
        function: func.name.clone(),
        line: func.position.line,
        column: func.position.column,
        signature: func.header.clone(),
        message: result.message(),
        missing_input_fields: result.missing_input_fields,
        missing_output_fields: result.missing_output_fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AnalysisSummary;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn source(path: &str, text: &str) -> SourceFile {
        parse_go_file(Path::new(path), text).unwrap()
    }

    fn model() -> SourceFile {
        source(
            "app/model/model.go",
            indoc! {r#"
                package model

                type Order struct {
                    ID    string
                    Total int
                }
            "#},
        )
    }

    #[test]
    fn test_report_counts_files_and_warnings() {
        let leaky = source(
            "app/api/api.go",
            indoc! {r#"
                package api

                import "app/model"

                type OrderResponse struct {
                    ID    string
                    Total int
                }

                func ToResponse(o model.Order) OrderResponse {
                    return OrderResponse{ID: o.ID}
                }

                func ToResponses(os []model.Order) []OrderResponse {
                    return nil
                }
            "#},
        );
        let targets = vec![model(), leaky];

        let report = check_sources(&targets, &[], ClassifierConfig::default());

        assert_eq!(
            report.summary,
            AnalysisSummary {
                files_analyzed: 2,
                files_with_warnings: 1,
                warnings: 2,
            }
        );
        let first = &report.diagnostics[0];
        assert_eq!(first.function, "ToResponse");
        assert_eq!(first.file, PathBuf::from("app/api/api.go"));
        assert_eq!((first.line, first.column), (10, 6));
        assert_eq!(first.missing_input_fields, vec!["o.Total"]);
        assert_eq!(first.missing_output_fields, vec!["Total"]);
        assert_eq!(
            first.message,
            "converter function is leaking fields: missing input fields: [o.Total]; missing output fields: [Total]"
        );
        assert_eq!(
            first.signature,
            "func ToResponse(o model.Order) OrderResponse"
        );
        assert_eq!(report.diagnostics[1].function, "ToResponses");
    }

    #[test]
    fn test_dependencies_resolve_but_are_not_reported() {
        let converter = source(
            "app/api/api.go",
            indoc! {r#"
                package api

                import "app/model"

                type OrderView struct{ ID string }

                func View(o *model.Order) *OrderView {
                    return &OrderView{ID: o.ID}
                }
            "#},
        );

        let report = check_sources(
            std::slice::from_ref(&converter),
            &[model()],
            ClassifierConfig::default(),
        );
        assert_eq!(report.summary.files_analyzed, 1);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].missing_input_fields, vec!["o.Total"]);

        let unresolved = check_sources(
            std::slice::from_ref(&converter),
            &[],
            ClassifierConfig::default(),
        );
        assert!(
            unresolved.diagnostics.is_empty(),
            "unresolvable input types are never candidates"
        );
    }

    #[test]
    fn test_validation_errors_are_skipped() {
        let file = source(
            "app/model/model.go",
            indoc! {r#"
                package model

                type Order struct{ ID string }
                type OrderCopy struct{ ID string }

                func Copy(Order) OrderCopy {
                    return OrderCopy{}
                }
            "#},
        );
        let report = check_sources(std::slice::from_ref(&file), &[], ClassifierConfig::default());
        assert!(report.diagnostics.is_empty());
        assert_eq!(report.summary.to_string(), "Files total analyzed: 1. Warnings: 0");
    }
}
