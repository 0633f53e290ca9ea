//! Parser types and traits.

mod fasta;
mod traits;

pub use fasta::*;
pub use traits::*;

/// Returned by the parser each time a record is complete.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Event {
    /// A complete record, with the (1-based) line number of its header.
    Record(usize),
}
