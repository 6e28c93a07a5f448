//! Document state and logic (UI-agnostic).

mod io;

use cassava_engine::engine::Grid;
use std::path::PathBuf;

/// A loaded spreadsheet.
#[derive(Debug, Default)]
pub struct Document {
    /// Parsed cells and bounds
    pub grid: Grid,
    /// File the grid was loaded from, if any
    pub file_path: Option<PathBuf>,
}

impl Document {
    /// Create an empty document.
    ///
    /// This constructor is side-effect free: it does not touch the filesystem.
    pub fn new() -> Self {
        Self::default()
    }
}
