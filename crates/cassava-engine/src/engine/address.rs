//! Cell addresses.
//!
//! Converts between the spreadsheet-style name of a cell (e.g. "A1", "B2",
//! "Z100") and its one-indexed row/column coordinates. Column names are a
//! single uppercase letter, so a grid has at most 26 columns.
//!
//! # Examples
//!
//! ```
//! use cassava_engine::engine::Address;
//!
//! let cell: Address = "B3".parse().unwrap();
//! assert_eq!(cell.column(), 2);
//! assert_eq!(cell.row(), 3);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use super::error::{EngineError, Result};

/// Highest column number; columns are named 'A' to 'Z'.
pub const MAX_COLUMNS: u8 = 26;

/// A cell position, one-indexed in both directions.
///
/// Ordering is row-major. Serialized as its canonical name ("B2").
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address {
    row: u32,
    col: u8,
}

impl Address {
    /// Build an address from a one-indexed row and column.
    pub fn new(row: u32, col: u8) -> Result<Address> {
        if row == 0 || col == 0 || col > MAX_COLUMNS {
            return Err(EngineError::InvalidAddress(format!(
                "row {} column {}",
                row, col
            )));
        }
        Ok(Address { row, col })
    }

    /// Build an address from separate row ("2") and column ("B") names.
    pub fn from_parts(row: &str, column: &str) -> Result<Address> {
        let invalid = || EngineError::InvalidAddress(format!("{},{}", row, column));

        if row.is_empty() || !row.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let mut letters = column.chars();
        let col = match (letters.next(), letters.next()) {
            (Some(letter), None) => Address::column_from_letter(letter).ok_or_else(invalid)?,
            _ => return Err(invalid()),
        };
        let row = row.parse::<u32>().map_err(|_| invalid())?;

        Address::new(row, col).map_err(|_| invalid())
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn column(&self) -> u8 {
        self.col
    }

    pub fn column_letter(&self) -> char {
        (b'A' + self.col - 1) as char
    }

    /// Convert a column name to its number ('A' -> 1, 'Z' -> 26).
    /// Only uppercase letters are column names.
    pub fn column_from_letter(letter: char) -> Option<u8> {
        if letter.is_ascii_uppercase() {
            Some(letter as u8 - b'A' + 1)
        } else {
            None
        }
    }

    fn parse_a1(name: &str) -> Option<Address> {
        let caps = address_re().captures(name)?;
        let col = Address::column_from_letter(caps["letter"].chars().next()?)?;
        let row = caps["numbers"].parse::<u32>().ok()?;
        Address::new(row, col).ok()
    }
}

pub(crate) fn address_re() -> &'static Regex {
    static ADDRESS_RE: OnceLock<Regex> = OnceLock::new();
    ADDRESS_RE.get_or_init(|| {
        Regex::new(r"^(?<letter>[A-Z])(?<numbers>[0-9]+)$").expect("address regex must compile")
    })
}

impl std::str::FromStr for Address {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_a1(s).ok_or_else(|| EngineError::InvalidAddress(s.to_string()))
    }
}

impl TryFrom<String> for Address {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> String {
        address.to_string()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column_letter(), self.row)
    }
}
