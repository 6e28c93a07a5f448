//! Command-line errors and exit codes.

use cassava_core::CassavaError;
use thiserror::Error;

pub const EXIT_USAGE: i32 = 1;
pub const EXIT_IO: i32 = 2;
pub const EXIT_LOAD: i32 = 3;
pub const EXIT_PRINT: i32 = 4;

/// Mistakes in how the program was invoked
#[derive(Error, Debug, PartialEq)]
pub enum CliError {
    #[error("{0} requires a value")]
    MissingValue(String),

    #[error("Invalid precision: {0}")]
    InvalidPrecision(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error("No input file given")]
    MissingInput,
}

/// Pick the process exit code for a failed run.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<CliError>().is_some() {
        return EXIT_USAGE;
    }
    match err.downcast_ref::<CassavaError>() {
        Some(CassavaError::FileNotFound(_) | CassavaError::NotReadable(_)) => EXIT_USAGE,
        Some(CassavaError::Io(_)) => EXIT_IO,
        Some(CassavaError::Load(_)) => EXIT_LOAD,
        Some(CassavaError::Print { .. }) => EXIT_PRINT,
        None if err.downcast_ref::<std::io::Error>().is_some() => EXIT_IO,
        None => EXIT_USAGE,
    }
}
