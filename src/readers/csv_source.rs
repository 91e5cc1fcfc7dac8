use csv::{ReaderBuilder, StringRecord};
use encoding_rs::{Encoding, UTF_8};
use memmap2::Mmap;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{ProcessingError, Result};
use crate::readers::SourceKind;
use crate::utils::constants::DEFAULT_MMAP_THRESHOLD;
use crate::utils::numeric::coerce_numeric;

/// Reads a source file into memory and decodes it to text.
pub struct SourceLoader {
    encoding: &'static Encoding,
    mmap_threshold: u64,
}

impl SourceLoader {
    pub fn new() -> Self {
        Self {
            encoding: UTF_8,
            mmap_threshold: DEFAULT_MMAP_THRESHOLD,
        }
    }

    /// Use a WHATWG encoding label such as `utf-8` or `euc-kr`
    pub fn with_encoding(mut self, label: &str) -> Result<Self> {
        self.encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| ProcessingError::UnknownEncoding(label.to_string()))?;
        Ok(self)
    }

    pub fn with_mmap_threshold(mut self, bytes: u64) -> Self {
        self.mmap_threshold = bytes;
        self
    }

    /// Load and parse a source table with headers
    pub fn load(&self, kind: SourceKind, path: &Path) -> Result<SourceTable> {
        if !path.is_file() {
            return Err(ProcessingError::SourceNotFound(path.to_path_buf()));
        }

        let file = File::open(path)?;
        let size = file.metadata()?.len();

        let text = if size >= self.mmap_threshold && size > 0 {
            debug!("Memory-mapping {} ({} bytes)", path.display(), size);
            let mmap = unsafe { Mmap::map(&file)? };
            self.decode(kind, &mmap)
        } else {
            let bytes = std::fs::read(path)?;
            self.decode(kind, &bytes)
        };

        SourceTable::from_text(kind, &text)
    }

    /// Decode bytes, stripping a byte-order mark if present
    fn decode(&self, kind: SourceKind, bytes: &[u8]) -> String {
        let (text, actual, had_errors) = self.encoding.decode(bytes);
        if had_errors {
            warn!(
                "{}: malformed {} sequences replaced during decoding",
                kind,
                actual.name()
            );
        }
        text.into_owned()
    }
}

impl Default for SourceLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// A named column resolved against a table header. `index` is `None`
/// when an optional column is absent; every cell then reads as missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub index: Option<usize>,
}

impl Column {
    pub fn cell<'r>(&self, record: &'r StringRecord) -> Option<&'r str> {
        self.index.and_then(|i| record.get(i))
    }

    /// Text cell, empty when absent
    pub fn text(&self, record: &StringRecord) -> String {
        self.cell(record).unwrap_or_default().to_string()
    }

    pub fn is_present(&self) -> bool {
        self.index.is_some()
    }
}

/// Data-quality notes gathered while mapping rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellIssues {
    /// Cells that were present but failed numeric coercion, per column
    pub invalid_cells: BTreeMap<String, usize>,
    /// Rows dropped during mapping
    pub dropped_rows: usize,
}

impl CellIssues {
    /// Coerce a numeric cell; failures are tallied and read as missing
    pub fn numeric(&mut self, record: &StringRecord, column: &Column) -> Option<f64> {
        let coerced = coerce_numeric(column.cell(record));
        if coerced.is_invalid() {
            debug!(
                "Line {}: non-numeric value {:?} in column {}",
                record.position().map(|p| p.line()).unwrap_or_default(),
                column.cell(record).unwrap_or_default(),
                column.name
            );
            *self.invalid_cells.entry(column.name.clone()).or_default() += 1;
        }
        coerced.value()
    }

    pub fn drop_row(&mut self) {
        self.dropped_rows += 1;
    }

    pub fn merge(&mut self, other: CellIssues) {
        for (column, count) in other.invalid_cells {
            *self.invalid_cells.entry(column).or_default() += count;
        }
        self.dropped_rows += other.dropped_rows;
    }

    pub fn total_invalid(&self) -> usize {
        self.invalid_cells.values().sum()
    }
}

/// Typed rows mapped from a source table
#[derive(Debug, Clone)]
pub struct ParsedRows<T> {
    pub kind: SourceKind,
    pub rows: Vec<T>,
    pub issues: CellIssues,
}

impl<T> ParsedRows<T> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A fully loaded source table
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub kind: SourceKind,
    pub headers: StringRecord,
    pub records: Vec<StringRecord>,
}

impl SourceTable {
    pub fn from_text(kind: SourceKind, text: &str) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let records = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            kind,
            headers,
            records,
        })
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Resolve a column that must exist; its absence is fatal
    pub fn required(&self, name: &str) -> Result<Column> {
        match self.position(name) {
            Some(index) => Ok(Column {
                name: name.to_string(),
                index: Some(index),
            }),
            None => Err(ProcessingError::MissingColumn {
                source_name: self.kind.to_string(),
                column: name.to_string(),
            }),
        }
    }

    /// Resolve a value column that may be absent
    pub fn optional(&self, name: &str) -> Column {
        let index = self.position(name);
        if index.is_none() {
            warn!("{}: column {} not present, reading as missing", self.kind, name);
        }
        Column {
            name: name.to_string(),
            index,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Map every record to a typed row in parallel, preserving input order
    pub fn map_rows<T, F>(&self, parse: F) -> ParsedRows<T>
    where
        T: Send,
        F: Fn(&StringRecord, &mut CellIssues) -> Option<T> + Sync + Send,
    {
        let (rows, issues) = self
            .records
            .par_iter()
            .fold(
                || (Vec::new(), CellIssues::default()),
                |(mut rows, mut issues), record| {
                    if let Some(row) = parse(record, &mut issues) {
                        rows.push(row);
                    }
                    (rows, issues)
                },
            )
            .reduce(
                || (Vec::new(), CellIssues::default()),
                |(mut rows, mut issues), (more_rows, more_issues)| {
                    rows.extend(more_rows);
                    issues.merge(more_issues);
                    (rows, issues)
                },
            );

        ParsedRows {
            kind: self.kind,
            rows,
            issues,
        }
    }
}
