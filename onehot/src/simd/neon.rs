#![allow(clippy::missing_transmute_annotations)]

use crate::config::{advanced::*, *};
use crate::input::Block;
use crate::lexer::*;
use core::arch::aarch64::*;
use core::mem::transmute;

const GREATER_THAN: uint8x16_t = unsafe { transmute([b'>'; 16]) };
const LINE_FEED: uint8x16_t = unsafe { transmute([b'\n'; 16]) };
const SPACE: uint8x16_t = unsafe { transmute([b' '; 16]) };
const TAB: uint8x16_t = unsafe { transmute([b'\t'; 16]) };
const CARRIAGE_RETURN: uint8x16_t = unsafe { transmute([b'\r'; 16]) };
const CASE_FOLD: uint8x16_t = unsafe { transmute([0b11011111u8; 16]) };
const SYMBOLS: [uint8x16_t; NUM_KNOWN_CLASSES] = unsafe {
    [
        transmute([b'A'; 16]),
        transmute([b'T'; 16]),
        transmute([b'G'; 16]),
        transmute([b'C'; 16]),
        transmute([b'N'; 16]),
    ]
};

#[inline(always)]
pub fn extract_fasta_bitmask<const CONFIG: Config>(buf: &Block) -> FastaBitmask {
    unsafe {
        let v = vld4q_u8(buf.as_ptr());

        let open_bracket = movemask_64(map_8x16x4(v, |v| vceqq_u8(v, GREATER_THAN)));
        let line_feeds = movemask_64(map_8x16x4(v, |v| vceqq_u8(v, LINE_FEED)));
        let blanks = movemask_64(map_8x16x4(v, |v| {
            vorrq_u8(
                vorrq_u8(vceqq_u8(v, SPACE), vceqq_u8(v, TAB)),
                vceqq_u8(v, CARRIAGE_RETURN),
            )
        }));

        let mut classes = [0; NUM_KNOWN_CLASSES];
        if flag_is_set(CONFIG, COMPUTE_CLASS_COUNTS) {
            let folded = map_8x16x4(v, |v| vandq_u8(v, CASE_FOLD));
            for (mask, symbol) in classes.iter_mut().zip(SYMBOLS) {
                *mask = movemask_64(map_8x16x4(folded, |v| vceqq_u8(v, symbol)));
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
fn map_8x16x4<F>(v: uint8x16x4_t, mut f: F) -> uint8x16x4_t
where
    F: FnMut(uint8x16_t) -> uint8x16_t,
{
    uint8x16x4_t(f(v.0), f(v.1), f(v.2), f(v.3))
}

// computing movemask is significantly more expensive than on x86

#[inline(always)]
fn movemask_64(v: uint8x16x4_t) -> u64 {
    // https://stackoverflow.com/questions/74722950/convert-vector-compare-mask-into-bit-mask-in-aarch64-simd-or-arm-neon/74748402#74748402
    unsafe {
        let acc = vsriq_n_u8(vsriq_n_u8(v.3, v.2, 1), vsriq_n_u8(v.1, v.0, 1), 2);
        vget_lane_u64(
            vreinterpret_u64_u8(vshrn_n_u16(
                vreinterpretq_u16_u8(vsriq_n_u8(acc, acc, 4)),
                4,
            )),
            0,
        )
    }
}
