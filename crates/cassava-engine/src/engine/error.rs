//! Error types for parsing, grid construction and evaluation.

use thiserror::Error;

use super::Address;

/// Errors raised by the engine.
///
/// Parse and shape errors surface when a grid is loaded; the rest surface
/// when a cell is read.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Malformed expression '{text}': {reason}")]
    MalformedExpression { text: String, reason: String },

    #[error("Inconsistent number of columns in row {row}: {expected} expected, found {found}")]
    ColumnCountMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("No more than 26 columns allowed (cells are named 'A' to 'Z'), found {found}")]
    TooManyColumns { found: usize },

    #[error("Blank cells cannot be evaluated. Bad reference?")]
    EmptyCellEvaluated,

    #[error("Self referring cell address: {0}")]
    SelfReference(Address),

    #[error("Address {address} is outside of the spreadsheet")]
    AddressOutOfRange { address: Address },

    #[error("Address {address} has a circular reference. Reference chain is [{}]", join_chain(.chain))]
    CircularReference { address: Address, chain: Vec<Address> },

    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),
}

impl EngineError {
    pub(crate) fn malformed(text: &str, reason: impl Into<String>) -> Self {
        EngineError::MalformedExpression {
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}

fn join_chain(chain: &[Address]) -> String {
    chain
        .iter()
        .map(Address::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

pub type Result<T> = std::result::Result<T, EngineError>;
