//! Lazy row decoding for one delimited accident file
//!
//! The file handle is owned by [`Rows`] and released when the iterator is
//! dropped, whether decoding ran to the end or stopped at the first error.

use csv::{ByteRecord, ErrorKind, Reader, ReaderBuilder};
use encoding_rs::Encoding;
use std::borrow::Cow;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use super::column_mapping::ColumnMapping;
use crate::{Error, Result};

/// Opens delimited files as lazy row iterators
#[derive(Debug, Clone, Copy)]
pub struct RowDecoder;

impl RowDecoder {
    /// Open `path` and read its header record
    ///
    /// Fields that are not valid UTF-8 are decoded with `encoding`.
    pub fn open(path: &Path, delimiter: u8, encoding: &'static Encoding) -> Result<Rows> {
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::file_not_found(path),
            _ => Error::io(format!("Failed to open {}", path.display()), e),
        })?;

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(false)
            .from_reader(file);

        let header = reader
            .byte_headers()
            .map_err(|e| structure_error(path, e))?
            .clone();
        let mapping = ColumnMapping::from_header(header.iter().map(|f| decode_field(f, encoding)));

        debug!(
            "Opened {} with {} columns (delimiter {:?}, fallback encoding {})",
            path.display(),
            mapping.len(),
            delimiter as char,
            encoding.name()
        );

        Ok(Rows {
            reader,
            mapping: Arc::new(mapping),
            path: Arc::new(path.to_path_buf()),
            encoding,
            record: ByteRecord::new(),
            finished: false,
        })
    }
}

/// Iterator over the data records of one file
pub struct Rows {
    reader: Reader<File>,
    mapping: Arc<ColumnMapping>,
    path: Arc<PathBuf>,
    encoding: &'static Encoding,
    record: ByteRecord,
    finished: bool,
}

impl Rows {
    /// Header mapping shared by every row
    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }
}

impl Iterator for Rows {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.reader.read_byte_record(&mut self.record) {
            Ok(true) => {
                let values = self
                    .record
                    .iter()
                    .map(|f| decode_field(f, self.encoding).trim().to_string())
                    .collect();
                let line = self.record.position().map(|p| p.line()).unwrap_or(0);

                Some(Ok(Row {
                    mapping: Arc::clone(&self.mapping),
                    path: Arc::clone(&self.path),
                    values,
                    line,
                }))
            }
            Ok(false) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(structure_error(&self.path, e)))
            }
        }
    }
}

/// One decoded record, addressed by column name
#[derive(Debug, Clone)]
pub struct Row {
    mapping: Arc<ColumnMapping>,
    path: Arc<PathBuf>,
    values: Vec<String>,
    line: u64,
}

impl Row {
    /// Trimmed value of `name`, or [`Error::MissingColumn`] when the header lacks it
    pub fn column(&self, name: &str) -> Result<&str> {
        self.get(name)
            .ok_or_else(|| Error::missing_column(name, self.path.as_path()))
    }

    /// Trimmed value of `name`, if the header declares it
    pub fn get(&self, name: &str) -> Option<&str> {
        self.mapping
            .get_index(name)
            .and_then(|index| self.values.get(index))
            .map(String::as_str)
    }

    /// File this row was read from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// One-based line number of the record in its file
    pub fn line(&self) -> u64 {
        self.line
    }
}

fn decode_field<'a>(bytes: &'a [u8], encoding: &'static Encoding) -> Cow<'a, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => encoding.decode_without_bom_handling(bytes).0,
    }
}

fn structure_error(path: &Path, error: csv::Error) -> Error {
    let message = match error.kind() {
        ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => format!(
            "record on line {} has {} fields, header has {}",
            pos.as_ref().map(|p| p.line()).unwrap_or(0),
            len,
            expected_len
        ),
        _ => error.to_string(),
    };
    Error::csv_parsing(path, message, Some(error))
}
