//! Input formats and helpers.
//!
//! Every input hands the lexer fixed blocks of [`BLOCK_SIZE`] bytes.
//! Only the last block of an input may be shorter, and the bytes past its
//! length are zeros so that SIMD loads never read out of bounds.

use deko::read::AnyDecoder;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

pub const BLOCK_SIZE: usize = 64;
const DEFAULT_BUFFER_SIZE: usize = 1 << 16;

/// A zero-padded block of input bytes.
pub type Block = [u8; BLOCK_SIZE];

pub trait InputData {
    /// Load the next block, returning its length, or `None` once the input is exhausted.
    fn next_block(&mut self) -> Option<usize>;

    /// Get a reference to the current (zero-padded) block.
    fn current_block(&self) -> &Block;

    /// Returns the length of the current block.
    fn current_len(&self) -> usize;

    /// Get a reference to the bytes of the current block, without padding.
    #[inline(always)]
    fn current_chunk(&self) -> &[u8] {
        &self.current_block()[..self.current_len()]
    }

    /// Take the read error that stopped the input early, if any.
    ///
    /// This is only relevant for reader-based implementations.
    #[inline(always)]
    fn take_error(&mut self) -> Option<io::Error> {
        None
    }

    /// Returns the type of compression format detected.
    ///
    /// This is only available for reader-based implementations.
    #[inline(always)]
    fn compression_format(&mut self) -> io::Result<Option<deko::Format>> {
        Ok(None)
    }

    /// Returns `true` if compression has been detected.
    #[inline(always)]
    fn is_compressed(&mut self) -> io::Result<bool> {
        Ok(self.compression_format()?.is_some())
    }
}

pub trait FromInputData<I: InputData>: Sized {
    /// Build the struct from a type implementing [`InputData`].
    fn from_input(input: I) -> Self;
}

/// Slice input, without transparent decompression.
pub struct SliceInput<'a> {
    data: &'a [u8],
    pos: usize,
    block: Block,
    len: usize,
}

impl<'a> SliceInput<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            block: [0; BLOCK_SIZE],
            len: 0,
        }
    }
}

impl InputData for SliceInput<'_> {
    #[inline(always)]
    fn next_block(&mut self) -> Option<usize> {
        if self.pos >= self.data.len() {
            return None;
        }
        let n = BLOCK_SIZE.min(self.data.len() - self.pos);
        self.block[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.block[n..].fill(0);
        self.pos += n;
        self.len = n;
        Some(n)
    }

    #[inline(always)]
    fn current_block(&self) -> &Block {
        &self.block
    }

    #[inline(always)]
    fn current_len(&self) -> usize {
        self.len
    }
}

pub trait FromSlice<'a>: FromInputData<SliceInput<'a>> {
    /// Build the struct from a slice.
    #[inline(always)]
    fn from_slice(data: &'a [u8]) -> Self {
        Self::from_input(SliceInput::new(data))
    }
}

impl<'a, F: FromInputData<SliceInput<'a>>> FromSlice<'a> for F {}

/// Reader input, with transparent decompression.
pub struct ReaderInput<R: Read + Send> {
    decoder: AnyDecoder<R>,
    data: Vec<u8>,
    data_len: usize,
    data_pos: usize,
    block: Block,
    len: usize,
    finished: bool,
    error: Option<io::Error>,
}

impl<R: Read + Send> ReaderInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            decoder: AnyDecoder::new(reader),
            data: vec![0; DEFAULT_BUFFER_SIZE],
            data_len: 0,
            data_pos: 0,
            block: [0; BLOCK_SIZE],
            len: 0,
            finished: false,
            error: None,
        }
    }

    /// Refill the internal buffer, returns `false` at the end of the stream or on error.
    fn refill(&mut self) -> bool {
        while !self.finished {
            match self.decoder.read(&mut self.data) {
                Ok(0) => self.finished = true,
                Ok(n) => {
                    self.data_len = n;
                    self.data_pos = 0;
                    return true;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.error = Some(e);
                    self.finished = true;
                }
            }
        }
        false
    }
}

impl<R: Read + Send> InputData for ReaderInput<R> {
    #[inline(always)]
    fn next_block(&mut self) -> Option<usize> {
        let mut n = 0;
        // short reads are stitched together so that only the last block is partial
        while n < BLOCK_SIZE {
            if self.data_pos == self.data_len && !self.refill() {
                break;
            }
            let k = (BLOCK_SIZE - n).min(self.data_len - self.data_pos);
            self.block[n..n + k].copy_from_slice(&self.data[self.data_pos..self.data_pos + k]);
            self.data_pos += k;
            n += k;
        }
        self.block[n..].fill(0);
        self.len = n;
        if n == 0 { None } else { Some(n) }
    }

    #[inline(always)]
    fn current_block(&self) -> &Block {
        &self.block
    }

    #[inline(always)]
    fn current_len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    #[inline(always)]
    fn compression_format(&mut self) -> io::Result<Option<deko::Format>> {
        let format = self.decoder.kind()?;
        if format == deko::Format::Verbatim {
            Ok(None)
        } else {
            Ok(Some(format))
        }
    }
}

pub trait FromReader<R: Read + Send>: FromInputData<ReaderInput<R>> {
    /// Build the struct from a reader, with transparent decompression.
    #[inline(always)]
    fn from_reader(reader: R) -> Self {
        Self::from_input(ReaderInput::new(reader))
    }
}

impl<R: Read + Send, F: FromInputData<ReaderInput<R>>> FromReader<R> for F {}

/// File input, with transparent decompression.
pub type FileInput = ReaderInput<File>;

impl FileInput {
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::new(File::open(path)?))
    }
}

pub trait FromFile: FromInputData<FileInput> {
    /// Build the struct from a file, with transparent decompression.
    #[inline(always)]
    fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::from_input(FileInput::open(path)?))
    }
}

impl<F: FromInputData<FileInput>> FromFile for F {}
