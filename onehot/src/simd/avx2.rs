#![allow(clippy::missing_transmute_annotations)]

use crate::config::{advanced::*, *};
use crate::input::Block;
use crate::lexer::*;
use core::arch::x86_64::*;
use core::mem::transmute;

const GREATER_THAN: __m256i = unsafe { transmute([b'>'; 32]) };
const LINE_FEED: __m256i = unsafe { transmute([b'\n'; 32]) };
const SPACE: __m256i = unsafe { transmute([b' '; 32]) };
const TAB: __m256i = unsafe { transmute([b'\t'; 32]) };
const CARRIAGE_RETURN: __m256i = unsafe { transmute([b'\r'; 32]) };
// clearing bit 5 maps a lowercase letter to its uppercase, and nothing else onto a letter
const CASE_FOLD: __m256i = unsafe { transmute([0b11011111u8; 32]) };
const SYMBOLS: [__m256i; NUM_KNOWN_CLASSES] = unsafe {
    [
        transmute([b'A'; 32]),
        transmute([b'T'; 32]),
        transmute([b'G'; 32]),
        transmute([b'C'; 32]),
        transmute([b'N'; 32]),
    ]
};

#[inline(always)]
pub fn extract_fasta_bitmask<const CONFIG: Config>(buf: &Block) -> FastaBitmask {
    unsafe {
        let ptr = buf.as_ptr() as *const __m256i;
        let v_buf1 = _mm256_loadu_si256(ptr);
        let v_buf2 = _mm256_loadu_si256(ptr.add(1));

        let open_bracket = u8_mask(v_buf1, v_buf2, GREATER_THAN);
        let line_feeds = u8_mask(v_buf1, v_buf2, LINE_FEED);
        let blanks = u8_mask(v_buf1, v_buf2, SPACE)
            | u8_mask(v_buf1, v_buf2, TAB)
            | u8_mask(v_buf1, v_buf2, CARRIAGE_RETURN);

        let mut classes = [0; NUM_KNOWN_CLASSES];
        if flag_is_set(CONFIG, COMPUTE_CLASS_COUNTS) {
            let folded1 = _mm256_and_si256(v_buf1, CASE_FOLD);
            let folded2 = _mm256_and_si256(v_buf2, CASE_FOLD);
            for (mask, symbol) in classes.iter_mut().zip(SYMBOLS) {
                *mask = u8_mask(folded1, folded2, symbol);
            }
        }

        FastaBitmask {
            open_bracket,
            line_feeds,
            blanks,
            classes,
        }
    }
}

#[inline(always)]
pub fn u8_mask(v_buf: __m256i, v_buf2: __m256i, v_c: __m256i) -> u64 {
    unsafe {
        let cmp_c = _mm256_cmpeq_epi8(v_buf, v_c);
        let cmp_c2 = _mm256_cmpeq_epi8(v_buf2, v_c);
        let a = _mm256_movemask_epi8(cmp_c) as u32 as u64;
        let b = _mm256_movemask_epi8(cmp_c2) as u32 as u64;
        a | (b << 32)
    }
}
