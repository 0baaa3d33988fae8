//! `silt co2-table` command.

use std::path::Path;

use crate::co2::{self, TableGrid};
use crate::context::ServiceContext;

/// Execute the `co2-table` command.
///
/// # Errors
///
/// Returns an error string if a reference-database query fails or the
/// output file cannot be written.
pub fn run_with_context(ctx: &ServiceContext, output: &Path) -> Result<(), String> {
    let grid = TableGrid::default();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;
    runtime.block_on(co2::generate(ctx, &grid, output))?;

    println!("Wrote {}", output.display());
    Ok(())
}
