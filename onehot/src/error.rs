//! Error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The input path does not exist.
    #[error("input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    /// The input exists but cannot be opened or read (including corrupt compressed data).
    #[error("cannot read input {}: {source}", path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Malformed FASTA.
    #[error("invalid FASTA at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Two records of the input share an identifier.
    #[error("duplicate record identifier {id:?} at line {line}")]
    DuplicateRecord { id: String, line: usize },

    /// An entry with this name already exists in the output container.
    #[error("entry {name:?} already exists in the output container")]
    DuplicateEntry { name: String },

    /// The HDF5 library failed to create, write or close the container.
    #[error("cannot write output container {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: hdf5::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Map an open error to [`Error::InputNotFound`] or [`Error::InputUnreadable`].
    pub(crate) fn from_open(path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::InputNotFound { path }
        } else {
            Self::InputUnreadable { path, source }
        }
    }
}
