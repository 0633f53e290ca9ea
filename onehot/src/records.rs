//! Whole-file ingestion of FASTA records.

use crate::alphabet::ClassCounts;
use crate::config::{Config, ParserOptions};
use crate::error::{Error, Result};
use crate::input::*;
use crate::parser::{Event, FastaParser, Parser};

use log::debug;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

const INGEST_CONFIG: Config = ParserOptions::default().compute_class_counts().config();

/// A FASTA record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Header text up to the first whitespace.
    pub id: String,
    /// Full header line without `>` and surrounding whitespace.
    pub description: String,
    /// Concatenated sequence lines, as read.
    pub sequence: Vec<u8>,
    /// Line of the header in the input, starting at 1.
    pub line: usize,
    pub counts: ClassCounts,
}

impl Record {
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// The records of a FASTA file, in input order and indexed by identifier.
#[derive(Debug, Default, Clone)]
pub struct RecordSet {
    records: Vec<Record>,
    index: HashMap<String, usize>,
}

impl RecordSet {
    /// Parse records from an in-memory FASTA, without decompression.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        Self::from_parser(FastaParser::<INGEST_CONFIG, _>::from_slice(data))
    }

    /// Parse records from a reader, with transparent decompression.
    pub fn from_reader<R: Read + Send>(reader: R) -> Result<Self> {
        Self::from_parser(FastaParser::<INGEST_CONFIG, _>::from_reader(reader))
    }

    /// Parse records from a file, with transparent decompression.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let parser = FastaParser::<INGEST_CONFIG, _>::from_file(path)
            .map_err(|e| Error::from_open(path.to_path_buf(), e))?;
        Self::from_parser(parser).map_err(|e| match e {
            Error::Io(source) => Error::InputUnreadable {
                path: path.to_path_buf(),
                source,
            },
            e => e,
        })
    }

    fn from_parser<P>(mut parser: P) -> Result<Self>
    where
        P: Parser + Iterator<Item = Result<Event>>,
    {
        let mut set = Self::default();
        while let Some(event) = parser.next() {
            let Event::Record(line) = event?;
            let header = String::from_utf8_lossy(parser.get_header()).into_owned();
            let description = header.trim();
            let id = description
                .split_whitespace()
                .next()
                .ok_or_else(|| Error::parse(line, "empty record identifier"))?;
            if set.index.contains_key(id) {
                return Err(Error::DuplicateRecord {
                    id: id.to_string(),
                    line,
                });
            }
            let record = Record {
                id: id.to_string(),
                description: description.to_string(),
                counts: *parser.get_class_counts(),
                sequence: parser.get_sequence_owned(),
                line,
            };
            debug!("read record {:?} of length {}", record.id, record.len());
            set.index.insert(record.id.clone(), set.records.len());
            set.records.push(record);
        }
        Ok(set)
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.index.get(id).map(|&i| &self.records[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total number of symbols over all records.
    pub fn total_len(&self) -> usize {
        self.records.iter().map(Record::len).sum()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for RecordSet {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// Read every record of a FASTA file, possibly compressed.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<RecordSet> {
    RecordSet::from_path(path)
}
