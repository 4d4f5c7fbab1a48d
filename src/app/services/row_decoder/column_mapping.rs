//! Case-insensitive header mapping for delimited accident files
//!
//! Header names are trimmed and lower-cased once when the file is opened, so
//! that the same logical column resolves whether a generation writes `Num_Acc`
//! or `num_acc`.

use std::collections::HashMap;

const UTF8_BOM: char = '\u{feff}';

/// Column mapping built from a file's header record
#[derive(Debug, Clone, Default)]
pub struct ColumnMapping {
    /// Normalized column name to index mapping
    name_to_index: HashMap<String, usize>,

    /// Normalized column names in header order
    names: Vec<String>,
}

impl ColumnMapping {
    /// Build a mapping from decoded header fields
    ///
    /// A leading byte order mark on the first field is removed. When a name
    /// occurs twice the first occurrence wins.
    pub fn from_header<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut name_to_index = HashMap::new();
        let mut names = Vec::new();

        for (index, field) in fields.into_iter().enumerate() {
            let name = normalize(field.as_ref());
            name_to_index.entry(name.clone()).or_insert(index);
            names.push(name);
        }

        Self {
            name_to_index,
            names,
        }
    }

    /// Get the index of a column, matching case-insensitively
    pub fn get_index(&self, column_name: &str) -> Option<usize> {
        self.name_to_index.get(&normalize(column_name)).copied()
    }

    /// Check if a column exists in the mapping
    pub fn has_column(&self, column_name: &str) -> bool {
        self.get_index(column_name).is_some()
    }

    /// Normalized column names in header order
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Number of columns declared by the header
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim_start_matches(UTF8_BOM).trim().to_lowercase()
}
