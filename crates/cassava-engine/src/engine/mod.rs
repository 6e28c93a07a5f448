//! Spreadsheet engine API.
//!
//! This module provides the core computation engine for the spreadsheet:
//!
//! - [`Address`] - Cell coordinates (A1 notation ↔ row/column numbers)
//! - [`Expr`], [`Operator`] - The expression tree stored in each cell
//! - [`parse`] - Turn cell text into an expression tree
//! - [`Grid`] - Cell storage, bounds, and strict/formatted reads
//! - [`CycleGuard`] - Circular reference detection within one read
//! - [`format_number`] - Format values for display

mod address;
mod cycle;
pub mod error;
mod expr;
mod format;
mod grid;
mod parser;

pub use address::{Address, MAX_COLUMNS};
pub use cycle::CycleGuard;
pub use error::{EngineError, Result};
pub use expr::{Expr, Operator};
pub use format::{DEFAULT_PRECISION, ReadPolicy, format_number};
pub use grid::Grid;
pub use parser::{parse, parse_binary, parse_terminal};
