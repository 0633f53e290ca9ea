//! Block-wise lexing of FASTA into bitmasks.

use crate::alphabet::Base;
use crate::carrying_add::Carry;
use crate::config::*;
use crate::input::*;
use crate::simd::extract_fasta_bitmask;

use core::fmt;

/// Number of classes with their own bitmask, [`Base::Other`] being the complement.
pub(crate) const NUM_KNOWN_CLASSES: usize = 5;

/// Raw byte masks of a block, as computed by the SIMD kernels.
pub(crate) struct FastaBitmask {
    pub open_bracket: u64,
    pub line_feeds: u64,
    pub blanks: u64,
    pub classes: [u64; NUM_KNOWN_CLASSES],
}

/// A lexed block: bit `i` of each mask describes byte `i` of the block.
/// Bits past `len` are always zero.
#[derive(Default, PartialEq, Debug, Clone)]
pub struct FastaChunk {
    pub len: usize,
    /// The `>` opening each header line.
    pub header_start: u64,
    /// Header lines, from `>` up to and including the line feed.
    pub header: u64,
    pub line_feeds: u64,
    /// Sequence symbols, i.e. bytes outside headers that are neither line feeds nor blanks.
    pub symbols: u64,
    /// Symbols of class A, T, G, C and N, only filled when class counts are enabled.
    pub classes: [u64; NUM_KNOWN_CLASSES],
}

impl FastaChunk {
    /// Symbols of the given class.
    #[inline(always)]
    pub fn class_mask(&self, class: Base) -> u64 {
        match class {
            Base::Other => self.classes.iter().fold(self.symbols, |acc, m| acc & !m),
            _ => self.classes[class.index()],
        }
    }
}

/// Mask of the `n` lowest bits.
#[inline(always)]
pub(crate) const fn low_bits(n: usize) -> u64 {
    if n >= 64 { !0 } else { (1 << n) - 1 }
}

pub struct FastaLexer<const CONFIG: Config, I: InputData> {
    pub(crate) input: I,
    carry: Carry,
    at_line_start: bool,
}

impl<const CONFIG: Config, I: InputData> FromInputData<I> for FastaLexer<CONFIG, I> {
    fn from_input(input: I) -> Self {
        Self {
            input,
            carry: Carry::new(false),
            at_line_start: true,
        }
    }
}

impl<const CONFIG: Config, I: InputData> Iterator for FastaLexer<CONFIG, I> {
    type Item = FastaChunk;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        let len = self.input.next_block()?;
        let mask = extract_fasta_bitmask::<CONFIG>(self.input.current_block());
        let valid = low_bits(len);

        // `>` only opens a header at the start of a line
        let line_start = (mask.line_feeds << 1) | self.at_line_start as u64;
        self.at_line_start = (mask.line_feeds >> (len - 1)) & 1 != 0;
        let header_start = mask.open_bracket & line_start & valid;

        let non_lf = !mask.line_feeds;
        let header = (self.carry.add(header_start, non_lf) ^ non_lf) & valid;
        let symbols = !header & non_lf & !mask.blanks & valid;

        Some(FastaChunk {
            len,
            header_start,
            header,
            line_feeds: mask.line_feeds & valid,
            symbols,
            classes: mask.classes.map(|m| m & symbols),
        })
    }
}

impl fmt::Display for FastaChunk {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for i in 0..self.len {
            let bit = 1u64 << i;
            if self.header & bit != 0 {
                write!(f, ">")?;
            } else if self.symbols & bit == 0 {
                write!(f, " ")?;
            } else {
                let class = Base::ALL
                    .into_iter()
                    .find(|&class| self.class_mask(class) & bit != 0)
                    .unwrap_or(Base::Other);
                write!(f, "{class}")?;
            }
        }
        Ok(())
    }
}
