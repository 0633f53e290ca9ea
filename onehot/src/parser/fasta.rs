use super::*;
use crate::alphabet::{Base, ClassCounts};
use crate::config::{advanced::*, *};
use crate::error::{Error, Result};
use crate::input::*;
use crate::lexer::*;

use core::mem::take;

/// A parser for the [FASTA format](https://en.wikipedia.org/wiki/FASTA_format).
///
/// A header is a line starting with `>`. Sequence lines are concatenated,
/// skipping line feeds, carriage returns, spaces and tabs. Any other byte
/// outside a header is a symbol. Sequence data before the first header is
/// an error; blank lines are not.
pub struct FastaParser<const CONFIG: Config, I: InputData> {
    lexer: FastaLexer<CONFIG, I>,
    block: FastaChunk,
    pos_in_block: usize,
    lines_before_block: usize,
    done: bool,
    in_record: bool,
    record_line: usize,
    cur_header: Vec<u8>,
    cur_sequence: Vec<u8>,
    seq_len: usize,
    class_counts: ClassCounts,
}

impl<const CONFIG: Config, I: InputData> FastaParser<CONFIG, I> {
    fn from_lexer(lexer: FastaLexer<CONFIG, I>) -> Self {
        Self {
            lexer,
            block: FastaChunk::default(),
            pos_in_block: 0,
            lines_before_block: 0,
            done: false,
            in_record: false,
            record_line: 0,
            cur_header: Vec::new(),
            cur_sequence: Vec::new(),
            seq_len: 0,
            class_counts: ClassCounts::new(),
        }
    }
}

impl<const CONFIG: Config, I: InputData> FromInputData<I> for FastaParser<CONFIG, I> {
    fn from_input(input: I) -> Self {
        Self::from_lexer(FastaLexer::from_input(input))
    }
}

impl<const CONFIG: Config, I: InputData> Parser for FastaParser<CONFIG, I> {
    #[inline(always)]
    fn clear_record(&mut self) {
        if flag_is_set(CONFIG, COMPUTE_HEADER) {
            self.cur_header.clear();
        }
        if flag_is_set(CONFIG, COMPUTE_SEQUENCE) {
            self.cur_sequence.clear();
        }
        if flag_is_set(CONFIG, COMPUTE_SEQ_LEN) {
            self.seq_len = 0;
        }
        if flag_is_set(CONFIG, COMPUTE_CLASS_COUNTS) {
            self.class_counts.clear();
        }
    }

    #[inline(always)]
    fn get_header(&self) -> &[u8] {
        assert!(flag_is_set(CONFIG, COMPUTE_HEADER));
        &self.cur_header
    }

    #[inline(always)]
    fn get_header_owned(&mut self) -> Vec<u8> {
        assert!(flag_is_set(CONFIG, COMPUTE_HEADER));
        self.cur_header.clone()
    }

    #[inline(always)]
    fn get_sequence(&self) -> &[u8] {
        assert!(flag_is_set(CONFIG, COMPUTE_SEQUENCE));
        &self.cur_sequence
    }

    #[inline(always)]
    fn get_sequence_owned(&mut self) -> Vec<u8> {
        assert!(flag_is_set(CONFIG, COMPUTE_SEQUENCE));
        let capacity = self.cur_sequence.capacity();
        let res = take(&mut self.cur_sequence);
        self.cur_sequence.reserve(capacity);
        res
    }

    #[inline(always)]
    fn get_seq_len(&self) -> usize {
        assert!(flag_is_set(CONFIG, COMPUTE_SEQ_LEN));
        self.seq_len
    }

    #[inline(always)]
    fn get_class_counts(&self) -> &ClassCounts {
        assert!(flag_is_set(CONFIG, COMPUTE_CLASS_COUNTS));
        &self.class_counts
    }
}

/// Append the bytes of `chunk` selected by `mask`, one run of set bits at a time.
#[inline(always)]
fn extend_from_mask(dst: &mut Vec<u8>, chunk: &[u8], mut mask: u64) {
    while mask != 0 {
        let start = mask.trailing_zeros() as usize;
        let run = (!(mask >> start)).trailing_zeros() as usize;
        dst.extend_from_slice(&chunk[start..start + run]);
        mask &= !low_bits(start + run);
    }
}

impl<const CONFIG: Config, I: InputData> FastaParser<CONFIG, I> {
    /// Line number (1-based) of the byte at `pos` in the current block.
    #[inline(always)]
    fn line_at(&self, pos: usize) -> usize {
        self.lines_before_block + (self.block.line_feeds & low_bits(pos)).count_ones() as usize + 1
    }

    #[inline(always)]
    fn load_block(&mut self) -> bool {
        self.lines_before_block += self.block.line_feeds.count_ones() as usize;
        match self.lexer.next() {
            Some(block) => {
                self.block = block;
                self.pos_in_block = 0;
                true
            }
            None => {
                self.block = FastaChunk::default();
                self.pos_in_block = 0;
                false
            }
        }
    }

    /// Accumulate the part of the current record selected by `segment`.
    #[inline(always)]
    fn consume(&mut self, segment: u64) {
        let symbols = self.block.symbols & segment;
        if flag_is_set(CONFIG, COMPUTE_HEADER) {
            let header =
                self.block.header & !self.block.header_start & !self.block.line_feeds & segment;
            extend_from_mask(&mut self.cur_header, self.lexer.input.current_chunk(), header);
        }
        if flag_is_set(CONFIG, COMPUTE_SEQUENCE) {
            extend_from_mask(&mut self.cur_sequence, self.lexer.input.current_chunk(), symbols);
        }
        if flag_is_set(CONFIG, COMPUTE_SEQ_LEN) {
            self.seq_len += symbols.count_ones() as usize;
        }
        if flag_is_set(CONFIG, COMPUTE_CLASS_COUNTS) {
            let mut known = 0;
            for (count, mask) in self.class_counts.0.iter_mut().zip(self.block.classes) {
                let n = (mask & segment).count_ones() as usize;
                *count += n;
                known += n;
            }
            self.class_counts.0[Base::Other.index()] += symbols.count_ones() as usize - known;
        }
    }

    #[inline(always)]
    fn finish_record(&mut self) -> Option<Result<Event>> {
        if self.in_record {
            self.in_record = false;
            Some(Ok(Event::Record(self.record_line)))
        } else {
            None
        }
    }
}

impl<const CONFIG: Config, I: InputData> Iterator for FastaParser<CONFIG, I> {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            if self.pos_in_block >= self.block.len {
                if !self.load_block() {
                    self.done = true;
                    if let Some(e) = self.lexer.input.take_error() {
                        self.in_record = false;
                        return Some(Err(Error::Io(e)));
                    }
                    return self.finish_record();
                }
                continue;
            }

            let here = 1u64 << self.pos_in_block;
            if self.block.header_start & here != 0 {
                // the previous record ends here, the new one starts on the next call
                if self.in_record {
                    return self.finish_record();
                }
                self.clear_record();
                self.in_record = true;
                self.record_line = self.line_at(self.pos_in_block);
                self.pos_in_block += 1;
                continue;
            }

            let window = !0u64 << self.pos_in_block;
            let starts = self.block.header_start & window;
            let end = if starts == 0 {
                self.block.len
            } else {
                starts.trailing_zeros() as usize
            };
            let segment = window & low_bits(end);

            if !self.in_record {
                let orphans = self.block.symbols & segment;
                if orphans != 0 {
                    self.done = true;
                    let line = self.line_at(orphans.trailing_zeros() as usize);
                    return Some(Err(Error::parse(
                        line,
                        "sequence data before the first header line (expected '>')",
                    )));
                }
            } else {
                self.consume(segment);
            }
            self.pos_in_block = end;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG_HEADER: Config = ParserOptions::default().ignore_sequence().config();
    const CONFIG_SEQUENCE: Config = ParserOptions::default().ignore_headers().config();
    const CONFIG_COUNTS: Config = ParserOptions::default()
        .ignore_headers()
        .ignore_sequence()
        .compute_class_counts()
        .config();

    static FASTA: &[u8] =
        b">head\nTTTCTtaAAAA\nAGAAAA\nACAAN\n\n>hhh\nCTCTTANNAAA\nCAAAnAGCTTT\n>A B C \nCCAC"
            .as_slice();

    fn headers(data: &[u8]) -> Vec<String> {
        let mut f = FastaParser::<CONFIG_HEADER, _>::from_slice(data);
        let mut res = Vec::new();
        while let Some(event) = f.next() {
            event.unwrap();
            res.push(String::from_utf8(f.get_header_owned()).unwrap());
        }
        res
    }

    fn sequences(data: &[u8]) -> Vec<String> {
        let mut f = FastaParser::<CONFIG_SEQUENCE, _>::from_slice(data);
        let mut res = Vec::new();
        while let Some(event) = f.next() {
            event.unwrap();
            res.push(String::from_utf8(f.get_sequence_owned()).unwrap());
        }
        res
    }

    #[test]
    fn test_header() {
        assert_eq!(headers(FASTA), vec!["head", "hhh", "A B C "]);
    }

    #[test]
    fn test_sequence() {
        assert_eq!(
            sequences(FASTA),
            vec!["TTTCTtaAAAAAGAAAAACAAN", "CTCTTANNAAACAAAnAGCTTT", "CCAC"]
        );
    }

    #[test]
    fn test_events_carry_header_lines() {
        let f = FastaParser::<CONFIG_HEADER, _>::from_slice(FASTA);
        let lines: Vec<usize> = f
            .map(|e| match e.unwrap() {
                Event::Record(line) => line,
            })
            .collect();
        assert_eq!(lines, vec![1, 6, 9]);
    }

    #[test]
    fn test_empty_input() {
        assert!(sequences(b"").is_empty());
        assert!(sequences(b"\n\n  \r\n").is_empty());
    }

    #[test]
    fn test_empty_records() {
        assert_eq!(sequences(b">a\n>b\n\n>c"), vec!["", "", ""]);
        assert_eq!(headers(b">a\n>b\n\n>c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_many_records_in_one_block() {
        assert_eq!(sequences(b">1\nA\n>2\nC\n>3\nG\n>4\nT"), vec!["A", "C", "G", "T"]);
    }

    #[test]
    fn test_long_lines_across_blocks() {
        let seq: String = (0..1000).map(|i| ['A', 'C', 'G', 'T', 'n'][i % 5]).collect();
        let mut data = format!(">{}\n", "h".repeat(130));
        for line in seq.as_bytes().chunks(70) {
            data.push_str(std::str::from_utf8(line).unwrap());
            data.push_str("\r\n");
        }
        data.push_str(">second\nAC");
        assert_eq!(sequences(data.as_bytes()), vec![seq, "AC".to_string()]);
        assert_eq!(headers(data.as_bytes())[0].trim_end(), "h".repeat(130));
    }

    #[test]
    fn test_missing_header_is_an_error() {
        let mut f = FastaParser::<CONFIG_SEQUENCE, _>::from_slice(b"\nACGT\n>a\nAC\n");
        match f.next() {
            Some(Err(Error::Parse { line, .. })) => assert_eq!(line, 2),
            _ => panic!("expected a parse error"),
        }
        assert!(f.next().is_none());
    }

    #[test]
    fn test_length_without_sequence() {
        const CONFIG_LEN: Config = ParserOptions::default()
            .ignore_sequence()
            .compute_length()
            .config();
        let mut f = FastaParser::<CONFIG_LEN, _>::from_slice(FASTA);
        let mut res = Vec::new();
        while let Some(event) = f.next() {
            event.unwrap();
            res.push((String::from_utf8(f.get_header_owned()).unwrap(), f.get_seq_len()));
        }
        assert_eq!(
            res,
            vec![
                ("head".to_string(), 22),
                ("hhh".to_string(), 22),
                ("A B C ".to_string(), 4)
            ]
        );
    }

    #[test]
    fn test_class_counts() {
        let mut f = FastaParser::<CONFIG_COUNTS, _>::from_slice(FASTA);
        let mut res = Vec::new();
        while let Some(event) = f.next() {
            event.unwrap();
            res.push((f.get_seq_len(), f.get_class_counts().0));
        }
        assert_eq!(
            res,
            vec![
                (22, [13, 5, 1, 2, 1, 0]),
                (22, [8, 6, 1, 4, 3, 0]),
                (4, [1, 0, 0, 3, 0, 0]),
            ]
        );
    }

    #[test]
    fn test_class_counts_match_sequence() {
        let data = b">x\nACGTNRYacgtn-*.\n>y\n>z\nXXXXa";
        let mut f = FastaParser::<{ CONFIG_COUNTS | COMPUTE_SEQUENCE }, _>::from_slice(data);
        while let Some(event) = f.next() {
            event.unwrap();
            assert_eq!(
                *f.get_class_counts(),
                ClassCounts::from_sequence(f.get_sequence())
            );
        }
    }
}
