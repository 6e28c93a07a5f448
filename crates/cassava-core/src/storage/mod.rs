//! Storage: CSV import and whole-grid output.

mod csv;
mod writer;

pub use csv::{load_grid, parse_csv_line, read_rows};
pub use writer::{render_grid, write_grid};
