//! One-hot encoding of sequences.
//!
//! Row `i` of an encoded sequence has a single `1`, in the column of the
//! class of symbol `i` (see [`CLASS_ORDER`](crate::alphabet::CLASS_ORDER)),
//! and `0` elsewhere.

use crate::alphabet::{Base, NUM_CLASSES, classify};
use crate::progress::Progress;

use ndarray::{Array2, ArrayView1, ArrayViewMut2, Zip};

/// A `(L, 6)` one-hot matrix.
pub type OneHotArray = Array2<i32>;

/// Rows encoded and written at once for long sequences.
pub const DEFAULT_BLOCK_ROWS: usize = 1_000_000;

/// Below this many rows, encoding in parallel is not worth it.
const MIN_PARALLEL_ROWS: usize = 1 << 14;

/// Encode a sequence into a `(seq.len(), 6)` matrix.
pub fn encode(seq: &[u8]) -> OneHotArray {
    let mut array = Array2::zeros((seq.len(), NUM_CLASSES));
    fill(array.view_mut(), seq, false);
    array
}

fn fill(mut rows: ArrayViewMut2<i32>, seq: &[u8], parallel: bool) {
    let zip = Zip::from(rows.rows_mut()).and(ArrayView1::from(seq));
    if parallel && seq.len() >= MIN_PARALLEL_ROWS {
        zip.par_for_each(|mut row, &x| row[classify(x).index()] = 1);
    } else {
        zip.for_each(|mut row, &x| row[classify(x).index()] = 1);
    }
}

/// The class of a one-hot row, or `None` if the row is not one-hot.
pub fn decode_row(row: ArrayView1<i32>) -> Option<Base> {
    let mut class = None;
    for (i, &v) in row.iter().enumerate() {
        match v {
            0 => {}
            1 if class.is_none() => class = Base::from_index(i),
            _ => return None,
        }
    }
    class
}

/// The classes of every row of a one-hot matrix, or `None` if any row is not one-hot.
pub fn decode(array: &OneHotArray) -> Option<Vec<Base>> {
    if array.ncols() != NUM_CLASSES {
        return None;
    }
    array.rows().into_iter().map(decode_row).collect()
}

/// Encodes long sequences block by block, bounding the memory in use.
#[derive(Debug, Clone, Copy)]
pub struct Encoder {
    block_rows: usize,
    parallel: bool,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_ROWS)
    }
}

impl Encoder {
    pub fn new(block_rows: usize) -> Self {
        Self {
            block_rows: block_rows.max(1),
            parallel: true,
        }
    }

    /// Whether blocks are encoded on the current rayon thread pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    #[inline(always)]
    pub fn block_rows(&self) -> usize {
        self.block_rows
    }

    /// Encode a whole sequence at once.
    pub fn encode(&self, seq: &[u8]) -> OneHotArray {
        let mut array = Array2::zeros((seq.len(), NUM_CLASSES));
        fill(array.view_mut(), seq, self.parallel);
        array
    }

    /// Encode `seq` in blocks of at most [`block_rows`](Self::block_rows) rows,
    /// passing each block to `sink` along with the index of its first row.
    ///
    /// An empty sequence yields no block.
    pub fn encode_blocks<E, F>(
        &self,
        seq: &[u8],
        progress: &mut dyn Progress,
        mut sink: F,
    ) -> Result<(), E>
    where
        F: FnMut(usize, OneHotArray) -> Result<(), E>,
    {
        for (i, chunk) in seq.chunks(self.block_rows).enumerate() {
            sink(i * self.block_rows, self.encode(chunk))?;
            progress.advance(chunk.len());
        }
        Ok(())
    }
}
