//! CSV import.
//!
//! Input is headerless: every line is one row of cell texts separated by
//! commas. Quoted fields are supported so a cell may keep surrounding
//! whitespace or contain a comma; the expression parser decides whether the
//! text means anything.

use std::io::BufRead;

use crate::error::{CassavaError, Result};
use cassava_engine::engine::Grid;

/// Read every line of `reader` into a row of fields.
pub fn read_rows<R: BufRead>(reader: R) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();
    for line in reader.lines() {
        rows.push(parse_csv_line(&line?));
    }
    Ok(rows)
}

/// Read CSV text and build a grid from it.
pub fn load_grid<R: BufRead>(reader: R) -> Result<Grid> {
    let rows = read_rows(reader)?;
    log::debug!("read {} csv rows", rows.len());
    Grid::from_rows(rows).map_err(CassavaError::Load)
}

/// Parse a single CSV line, handling quoted fields
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut field_was_quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                // Check for escaped quote
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else {
            match c {
                '"' => {
                    in_quotes = true;
                    field_was_quoted = true;
                }
                ',' => {
                    fields.push(finish_field(&mut current, field_was_quoted));
                    field_was_quoted = false;
                }
                _ => current.push(c),
            }
        }
    }
    fields.push(finish_field(&mut current, field_was_quoted));
    fields
}

fn finish_field(current: &mut String, quoted: bool) -> String {
    let field = std::mem::take(current);
    if quoted {
        field
    } else {
        field.trim().to_string()
    }
}
