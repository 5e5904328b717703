//! Get command handler

use super::utils::read_document;
use crate::cli::GetArgs;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use tartan_core::path::{self, Path};
use tracing::debug;

/// Handle the get command
///
/// Prints the value at the path, or fails with [`Error::Absent`] when
/// nothing is there. An explicit `null` is a value and is printed.
pub async fn handle_get(args: GetArgs, output: &mut OutputWriter) -> Result<()> {
    let path = Path::parse(&args.path)?;
    let document = read_document(&args.source).await?;

    match path::read(&document, &path) {
        Some(value) => {
            debug!(path = %path, "Path resolved");
            output.data(value)
        }
        None => Err(Error::Absent {
            path: path.to_string(),
        }),
    }
}
