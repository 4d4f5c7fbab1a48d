//! Row decoding for BAAC delimited files
//!
//! This module turns one delimited text file into a lazy sequence of rows
//! addressed by column name. It hides the differences that only concern the
//! file container rather than its content:
//! - [`column_mapping`] - Case-insensitive header mapping, BOM stripping
//! - [`decoder`] - Lazy record iteration with delimiter and encoding fallback
//! - [`field_parsers`] - Typed field extraction with contextual value errors
//!
//! ## Usage
//!
//! ```no_run
//! use accident_processor::app::services::row_decoder::RowDecoder;
//! use std::path::Path;
//!
//! # fn example() -> accident_processor::Result<()> {
//! let rows = RowDecoder::open(Path::new("lieux-2019.csv"), b';', encoding_rs::UTF_8)?;
//! for row in rows {
//!     let row = row?;
//!     println!("{}", row.column("Num_Acc")?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod column_mapping;
pub mod decoder;
pub mod field_parsers;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_mapping::ColumnMapping;
pub use decoder::{Row, RowDecoder, Rows};
