//! Transform command handler

use super::utils::{is_yaml, read_document, write_file, TableSource};
use crate::cli::{OutputFormat, TransformArgs};
use crate::config::Config;
use crate::error::{Error, ErrorContext, Result};
use crate::logging::redaction;
use crate::output::{OutputFormatter, OutputWriter};
use serde_json::Value;
use tartan_core::mapping::builtin::record_id;
use tartan_core::mapping::{records_from_document, transform_batch, Transformation};
use tartan_core::Tree;
use tracing::{debug, enabled, info, trace, Level};

/// Handle the transform command
pub async fn handle_transform(args: TransformArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let pretty = args.pretty || config.output.pretty;
    output.set_pretty(pretty);
    if !config.output.progress {
        output.disable_progress();
    }

    let source = TableSource::resolve(args.mappings.as_deref(), args.builtin.as_deref(), config);
    output.info(&format!("Using mapping table from {}", source))?;
    let table = source.load().await?;
    let compiled = table.compile();

    for entry in compiled.errors() {
        output.warning(&format!("Skipping {}", entry))?;
    }

    let document = read_document(&args.source).await?;
    let single = document.is_object();
    let records = records_from_document(document)?;

    if enabled!(Level::TRACE) {
        for record in &records {
            trace!(record = %redaction::redacted(record), "Source record");
        }
    }

    let spinner = if records.len() > 1 {
        output.spinner(&format!("Transforming {} records...", records.len()))
    } else {
        None
    };

    let count = records.len();
    let results = tokio::task::spawn_blocking(move || transform_batch(&records, &compiled))
        .await
        .map_err(|e| Error::other(format!("Transformation task failed: {}", e)))?;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    for result in &results {
        debug!(
            record_id = record_id_of(result).unwrap_or("<none>"),
            applied = result.report.applied,
            skipped = result.report.skipped.len(),
            "Record transformed"
        );
    }
    info!(records = count, table = %source, "Transformation finished");

    let documents = collect_documents(&results, single);

    match &args.save_to {
        Some(path) => {
            let content = serialize_for_file(&documents, path, pretty)?;
            write_file(path, &content)
                .await
                .with_context(|| format!("Failed to save output to {}", path.display()))?;
            output.success(&format!(
                "✓ Wrote {} document(s) to {}",
                results.len(),
                path.display()
            ))?;
        }
        None if args.report && output.format() != OutputFormat::Human => {
            return write_with_reports(output, &results, single);
        }
        None => output.data(&documents)?,
    }

    if args.report {
        write_reports(output, &results, single)?;
    }

    Ok(())
}

/// Destination documents, unwrapped when the input was a single record
fn collect_documents(results: &[Transformation], single: bool) -> Tree {
    match results {
        [only] if single => only.document.clone(),
        _ => Value::Array(results.iter().map(|r| r.document.clone()).collect()),
    }
}

/// Transformed documents carry no provider `id`, so records are labelled
/// by the unified `employee_number` when present
fn record_id_of(result: &Transformation) -> Option<&str> {
    result
        .document
        .get("employee_number")
        .and_then(Value::as_str)
        .or_else(|| record_id(&result.document))
}

fn serialize_for_file(documents: &Tree, path: &std::path::Path, pretty: bool) -> Result<String> {
    if is_yaml(path) {
        return Ok(serde_yaml::to_string(documents)?);
    }
    let format = if pretty {
        OutputFormat::JsonPretty
    } else {
        OutputFormat::Json
    };
    format.format(documents)
}

/// Machine-readable output with reports: each document next to its report
fn write_with_reports(output: &mut OutputWriter, results: &[Transformation], single: bool) -> Result<()> {
    match results {
        [only] if single => output.data(only),
        _ => output.data(&results),
    }
}

fn write_reports(output: &mut OutputWriter, results: &[Transformation], single: bool) -> Result<()> {
    if output.format() != OutputFormat::Human {
        let reports: Vec<_> = results.iter().map(|r| &r.report).collect();
        return match reports.as_slice() {
            [only] if single => output.data(only),
            _ => output.data(&reports),
        };
    }

    for (position, result) in results.iter().enumerate() {
        let title = match record_id_of(result) {
            Some(id) => format!("Report for record {} ({})", position, id),
            None => format!("Report for record {}", position),
        };
        output.section(&title)?;
        output.report(&result.report)?;
        if !result.report.is_complete() {
            output.skipped_table(&result.report.skipped)?;
        }
    }

    Ok(())
}
