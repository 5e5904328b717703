//! Validate command handler

use super::utils::load_table_file;
use crate::cli::{OutputFormat, ValidateArgs};
use crate::error::Result;
use crate::output::OutputWriter;
use serde_json::json;

/// Handle the validate command
pub async fn handle_validate(args: ValidateArgs, output: &mut OutputWriter) -> Result<()> {
    output.info(&format!("Validating mapping table: {}", args.table.display()))?;

    let table = load_table_file(&args.table).await?;
    let compiled = table.compile();

    if output.format() != OutputFormat::Human {
        output.data(&json!({
            "name": table.name,
            "entries": table.len(),
            "valid": compiled.is_valid(),
            "errors": compiled.errors(),
        }))?;
    }

    if compiled.is_valid() {
        output.success(&format!("✓ Mapping table is valid ({} entries)", table.len()))?;
        return Ok(());
    }

    output.error("✗ Mapping table has malformed entries")?;
    Ok(table.validate()?)
}
