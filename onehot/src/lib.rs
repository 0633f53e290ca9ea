//! One-hot encoding of FASTA records into HDF5 containers.
//!
//! Each record of a FASTA file becomes a `(L, 6)` dataset of the output
//! container, with one row per symbol and one column per class of
//! [`CLASS_ORDER`](alphabet::CLASS_ORDER).

pub mod alphabet;
mod carrying_add;
pub mod config;
pub mod container;
pub mod convert;
pub mod encoder;
pub mod error;
pub mod input;
pub mod lexer;
pub mod parser;
pub mod progress;
pub mod records;

pub use alphabet::{Base, ClassCounts, classify};
pub use config::{Config, ParserOptions};
pub use container::{Compression, ContainerWriter, NamePolicy, WriterOptions};
pub use convert::{ConvertOptions, RecordSummary, Summary, convert, default_output_path};
pub use encoder::{Encoder, OneHotArray, decode, encode};
pub use error::{Error, Result};
pub use parser::{Event, FastaParser, Parser};
pub use progress::{NoProgress, Progress};
pub use records::{Record, RecordSet, read_records};

#[cfg(target_feature = "avx2")]
pub(crate) mod simd {
    mod avx2;
    pub use avx2::*;
}
#[cfg(target_feature = "neon")]
pub(crate) mod simd {
    mod neon;
    pub use neon::*;
}
#[cfg(not(any(target_feature = "avx2", target_feature = "neon")))]
pub(crate) mod simd {
    mod fallback;
    pub use fallback::*;
}
