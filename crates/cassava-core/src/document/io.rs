use super::Document;
use crate::error::{CassavaError, Result};
use crate::storage::{load_grid, render_grid, write_grid};
use cassava_engine::engine::ReadPolicy;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::Path;

impl Document {
    /// Load a CSV file.
    ///
    /// Reports a missing path and a path that is not a readable regular file
    /// separately from I/O and load failures.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CassavaError::FileNotFound(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(CassavaError::NotReadable(path.to_path_buf()));
        }

        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => CassavaError::NotReadable(path.to_path_buf()),
            _ => CassavaError::Io(e),
        })?;

        let mut doc = Self::from_reader(BufReader::new(file))?;
        doc.file_path = Some(path.to_path_buf());
        log::debug!("opened {}", path.display());
        Ok(doc)
    }

    /// Load CSV text from any buffered reader (e.g. stdin).
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        Ok(Document {
            grid: load_grid(reader)?,
            file_path: None,
        })
    }

    /// Render the whole grid as CSV text.
    pub fn render(&self, policy: ReadPolicy, precision: usize) -> Result<String> {
        render_grid(&self.grid, policy, precision)
    }

    /// Print the whole grid; nothing is written if any cell fails.
    pub fn print<W: Write>(&self, writer: &mut W, policy: ReadPolicy, precision: usize) -> Result<()> {
        write_grid(writer, &self.grid, policy, precision)
    }
}
