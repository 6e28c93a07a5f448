//! Error types for Cassava core.

use std::path::PathBuf;

use cassava_engine::engine::{Address, EngineError};
use thiserror::Error;

/// Errors that can occur while loading or printing a spreadsheet
#[derive(Error, Debug)]
pub enum CassavaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found - {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("File not readable - {}", .0.display())]
    NotReadable(PathBuf),

    /// The input could not be turned into a rectangular grid of valid cells.
    #[error("Cannot load spreadsheet")]
    Load(#[source] EngineError),

    /// A cell failed to evaluate during a whole-grid print.
    #[error("Cannot print cells that cannot be evaluated correctly ({address})")]
    Print {
        address: Address,
        #[source]
        source: EngineError,
    },
}

impl CassavaError {
    pub fn is_load_failure(&self) -> bool {
        matches!(self, CassavaError::Load(_))
    }

    pub fn is_print_failure(&self) -> bool {
        matches!(self, CassavaError::Print { .. })
    }
}

pub type Result<T> = std::result::Result<T, CassavaError>;
