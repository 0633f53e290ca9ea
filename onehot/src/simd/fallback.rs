use crate::alphabet::{Base, classify};
use crate::config::{advanced::*, *};
use crate::input::Block;
use crate::lexer::*;

#[inline(always)]
pub fn extract_fasta_bitmask<const CONFIG: Config>(buf: &Block) -> FastaBitmask {
    let mut open_bracket = 0;
    let mut line_feeds = 0;
    let mut blanks = 0;
    let mut classes = [0; NUM_KNOWN_CLASSES];

    for (i, &x) in buf.iter().enumerate() {
        let bit = 1u64 << i;
        open_bracket |= if x == b'>' { bit } else { 0 };
        line_feeds |= if x == b'\n' { bit } else { 0 };
        blanks |= if matches!(x, b' ' | b'\t' | b'\r') {
            bit
        } else {
            0
        };

        if flag_is_set(CONFIG, COMPUTE_CLASS_COUNTS) {
            let class = classify(x);
            if class != Base::Other {
                classes[class.index()] |= bit;
            }
        }
    }

    FastaBitmask {
        open_bracket,
        line_feeds,
        blanks,
        classes,
    }
}
