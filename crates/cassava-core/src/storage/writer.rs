//! Whole-grid output.

use std::io::Write;

use crate::error::{CassavaError, Result};
use cassava_engine::engine::{Grid, ReadPolicy};

#[cfg(windows)]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &str = "\n";

const DELIMITER: &str = ",";

/// Render every cell of the grid, row by row, as CSV text.
///
/// The first cell that fails under `policy` aborts the whole render.
pub fn render_grid(grid: &Grid, policy: ReadPolicy, precision: usize) -> Result<String> {
    let mut out = String::new();
    let mut fields = Vec::with_capacity(grid.column_count() as usize);

    for address in grid.addresses() {
        let value = grid
            .read(&address, policy, precision)
            .map_err(|source| CassavaError::Print { address, source })?;
        fields.push(value);

        if address.column() == grid.column_count() {
            out.push_str(&fields.join(DELIMITER));
            out.push_str(LINE_ENDING);
            fields.clear();
        }
    }

    Ok(out)
}

/// Write the rendered grid to `writer` and flush it.
///
/// Nothing is written unless every cell renders.
pub fn write_grid<W: Write>(
    writer: &mut W,
    grid: &Grid,
    policy: ReadPolicy,
    precision: usize,
) -> Result<()> {
    let rendered = render_grid(grid, policy, precision)?;
    log::debug!(
        "writing {} rows ({:?}, {} decimals)",
        grid.row_count(),
        policy,
        precision
    );
    writer.write_all(rendered.as_bytes())?;
    writer.flush()?;
    Ok(())
}
