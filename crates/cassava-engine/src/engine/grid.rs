//! The spreadsheet grid.
//!
//! Cell text is parsed when it is inserted and evaluated only when read.
//! Malformed text is caught at load time; reference problems (out of range,
//! self references, cycles) depend on the whole grid and are caught per read.

use std::collections::HashMap;

use super::address::MAX_COLUMNS;
use super::error::{EngineError, Result};
use super::format::{ReadPolicy, format_number};
use super::{Address, CycleGuard, Expr, parse};

/// Cells keyed by address, plus the grid bounds.
///
/// Reads take `&self` and give each top-level read its own [`CycleGuard`],
/// so a grid can be shared between threads once it is built.
#[derive(Clone, Debug, Default)]
pub struct Grid {
    cells: HashMap<Address, Expr>,
    row_count: u32,
    column_count: u8,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a grid from rows of cell text.
    ///
    /// Row 1 fixes the number of columns (at most 26); every later row must
    /// have exactly as many.
    pub fn from_rows<R, C, S>(rows: R) -> Result<Grid>
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut grid = Grid::new();
        let mut expected: Option<usize> = None;

        for (row_idx, row) in rows.into_iter().enumerate() {
            let fields: Vec<S> = row.into_iter().collect();
            let row_number = row_idx + 1;

            match expected {
                None => {
                    if fields.len() > MAX_COLUMNS as usize {
                        return Err(EngineError::TooManyColumns {
                            found: fields.len(),
                        });
                    }
                    expected = Some(fields.len());
                }
                Some(expected) if expected != fields.len() => {
                    return Err(EngineError::ColumnCountMismatch {
                        row: row_number,
                        expected,
                        found: fields.len(),
                    });
                }
                Some(_) => {}
            }

            let row = u32::try_from(row_number)
                .map_err(|_| EngineError::InvalidAddress(format!("row {}", row_number)))?;
            for (col_idx, field) in fields.iter().enumerate() {
                // col_idx < MAX_COLUMNS, checked above
                let address = Address::new(row, col_idx as u8 + 1)?;
                grid.put(address, field.as_ref())?;
            }
        }

        log::debug!(
            "loaded grid with {} rows and {} columns",
            grid.row_count,
            grid.column_count
        );
        Ok(grid)
    }

    /// Parse `text` into the cell at `address`, growing the bounds if needed.
    pub fn put(&mut self, address: Address, text: &str) -> Result<&mut Self> {
        let expr = parse(text)?;
        self.cells.insert(address, expr);
        self.row_count = self.row_count.max(address.row());
        self.column_count = self.column_count.max(address.column());
        Ok(self)
    }

    /// [`Grid::put`] with the address given by name ("B2").
    pub fn put_a1(&mut self, address: &str, text: &str) -> Result<&mut Self> {
        let address = address.parse::<Address>()?;
        self.put(address, text)
    }

    pub fn contents(&self, address: &Address) -> Option<&Expr> {
        self.cells.get(address)
    }

    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    pub fn column_count(&self) -> u8 {
        self.column_count
    }

    /// Number of cells holding an expression.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn in_bounds(&self, address: &Address) -> bool {
        address.row() <= self.row_count && address.column() <= self.column_count
    }

    /// Every address within the bounds, row by row.
    pub fn addresses(&self) -> impl Iterator<Item = Address> + '_ {
        (1..=self.row_count).flat_map(move |row| {
            (1..=self.column_count).filter_map(move |col| Address::new(row, col).ok())
        })
    }

    /// Evaluate a cell strictly.
    pub fn get(&self, address: &Address) -> Result<f64> {
        let mut guard = CycleGuard::new();
        match self.top_level(address)? {
            Some(expr) => expr.eval_with(Some(self), &mut guard),
            None => Err(EngineError::EmptyCellEvaluated),
        }
    }

    /// Evaluate and format a cell; blank cells fail.
    pub fn get_strict(&self, address: &Address, precision: usize) -> Result<String> {
        Ok(format_number(self.get(address)?, precision))
    }

    /// Format a cell; a blank cell reads as an empty string, but a blank
    /// referenced from another cell still fails.
    pub fn get_formatted(&self, address: &Address, precision: usize) -> Result<String> {
        let mut guard = CycleGuard::new();
        match self.top_level(address)? {
            Some(expr) => expr.display_string_with(Some(self), precision, &mut guard),
            None => Ok(String::new()),
        }
    }

    pub fn read(&self, address: &Address, policy: ReadPolicy, precision: usize) -> Result<String> {
        match policy {
            ReadPolicy::Strict => self.get_strict(address, precision),
            ReadPolicy::Formatted => self.get_formatted(address, precision),
        }
    }

    fn top_level(&self, address: &Address) -> Result<Option<&Expr>> {
        if !self.in_bounds(address) {
            return Err(EngineError::AddressOutOfRange { address: *address });
        }
        Ok(self.contents(address))
    }
}
