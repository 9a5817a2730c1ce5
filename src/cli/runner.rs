//! CLI runner - decodes, infers and renders every input

use crate::cli::commands::Cli;
use crate::config::DriverConfig;
use crate::decode::decode_file;
use crate::document::{Document, Issue};
use crate::error::Result;
use crate::schema::{infer, SchemaNode};
use crate::types::OutputFormat;
use serde_json::{json, Value};
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Inference result for one input document
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Input path
    pub path: PathBuf,
    /// Inferred schema of the (selected part of the) document
    pub schema: SchemaNode,
    /// Uninferrable locations; only collected when explaining
    pub issues: Vec<Issue>,
}

impl Report {
    /// Infer a decoded document
    pub fn build(path: PathBuf, value: &Value, explain: bool) -> Self {
        let schema = infer(value);
        let issues = if explain {
            Document::parse(value).issues()
        } else {
            Vec::new()
        };
        Self {
            path,
            schema,
            issues,
        }
    }

    fn to_json(&self, explain: bool) -> Value {
        let mut report = json!({
            "path": self.path.display().to_string(),
            "schema": self.schema,
        });
        if explain {
            report["issues"] = self
                .issues
                .iter()
                .map(|issue| {
                    json!({
                        "location": issue.location.to_string(),
                        "schema": issue.schema,
                    })
                })
                .collect();
        }
        report
    }
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI, writing results to stdout
    pub async fn run(&self) -> Result<()> {
        let output = self.render().await?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{output}")?;
        Ok(())
    }

    /// Run the CLI and return what would be written to stdout
    pub async fn render(&self) -> Result<String> {
        let config = self.cli.driver_config()?;
        let reports = infer_files(&self.cli.paths, config.clone()).await?;
        render_reports(&reports, &config)
    }
}

/// Decode and infer every path concurrently; results keep argument order
///
/// The first failure, in argument order, fails the whole run.
pub async fn infer_files(paths: &[PathBuf], config: DriverConfig) -> Result<Vec<Report>> {
    let config = Arc::new(config);

    let tasks: Vec<_> = paths
        .iter()
        .cloned()
        .map(|path| {
            let config = Arc::clone(&config);
            tokio::spawn(async move { infer_file(path, &config).await })
        })
        .collect();

    let mut reports = Vec::with_capacity(tasks.len());
    for result in futures::future::join_all(tasks).await {
        let report = result.map_err(|e| anyhow::anyhow!("Inference task failed: {e}"))??;
        reports.push(report);
    }
    Ok(reports)
}

/// Decode and infer a single file
pub async fn infer_file(path: PathBuf, config: &DriverConfig) -> Result<Report> {
    let start = Instant::now();
    let value = decode_file(&path, config).await?;

    let explain = config.explain;
    let report = tokio::task::spawn_blocking(move || Report::build(path, &value, explain))
        .await
        .map_err(|e| anyhow::anyhow!("Inference task failed: {e}"))?;

    info!(
        path = %report.path.display(),
        kind = report.schema.name(),
        depth = report.schema.depth(),
        sentinels = report.schema.sentinel_count(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Inferred schema"
    );
    Ok(report)
}

/// Render reports in the configured output format
pub fn render_reports(reports: &[Report], config: &DriverConfig) -> Result<String> {
    match config.output_format {
        OutputFormat::Json => {
            let value = match reports {
                [single] if !config.explain => serde_json::to_value(&single.schema)?,
                [single] => single.to_json(true),
                many => many.iter().map(|r| r.to_json(config.explain)).collect(),
            };
            Ok(serde_json::to_string_pretty(&value)?)
        }
        OutputFormat::Tree => {
            let headers = reports.len() > 1;
            let mut out = String::new();
            for (idx, report) in reports.iter().enumerate() {
                if idx > 0 {
                    out.push_str("\n\n");
                }
                if headers {
                    let _ = writeln!(out, "==> {} <==", report.path.display());
                }
                let _ = write!(out, "{}", report.schema);
                if config.explain {
                    write_issues(&mut out, &report.issues, &report.path);
                }
            }
            Ok(out)
        }
    }
}

fn write_issues(out: &mut String, issues: &[Issue], path: &Path) {
    debug!(path = %path.display(), count = issues.len(), "Listing issues");
    if issues.is_empty() {
        out.push_str("\n\nno issues");
        return;
    }
    let _ = write!(out, "\n\nissues ({}):", issues.len());
    for issue in issues {
        let _ = write!(out, "\n  {issue}");
    }
}
