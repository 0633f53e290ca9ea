//! The parser agrees with needletail on headers and sequences.

use needletail::parse_fastx_reader;
use onehot::input::*;
use onehot::*;
use proptest::prelude::*;

const CONFIG: Config = ParserOptions::default().compute_class_counts().config();

fn check_mismatch(left: &[u8], right: &[u8]) -> Option<usize> {
    let len = left.len().min(right.len());
    (0..len)
        .find(|&i| left[i] != right[i])
        .or((left.len() != right.len()).then_some(len))
}

fn compare(fasta: &[u8]) {
    let mut reader = parse_fastx_reader(fasta).expect("needletail cannot read the input");
    let mut parser = FastaParser::<CONFIG, _>::from_slice(fasta);
    let mut n = 0;
    while let Some(r) = reader.next() {
        let record = r.expect("invalid record");
        assert!(matches!(parser.next(), Some(Ok(Event::Record(_)))), "record {n}");

        let header = String::from_utf8_lossy(parser.get_header());
        let expected = String::from_utf8_lossy(record.id());
        assert_eq!(header.trim_end(), expected.trim_end(), "record {n}");

        let (left, right) = (&*record.seq(), parser.get_sequence());
        if let Some(pos) = check_mismatch(left, right) {
            panic!("sequence mismatch in record {n} at {pos}");
        }
        assert_eq!(parser.get_seq_len(), left.len());
        assert_eq!(*parser.get_class_counts(), ClassCounts::from_sequence(left));
        n += 1;
    }
    assert!(parser.next().is_none());
}

fn fasta() -> impl Strategy<Value = Vec<u8>> {
    let record = (
        "[A-Za-z0-9_.|:-]{1,20}( [ -~]{0,30})?",
        proptest::collection::vec(
            prop_oneof![
                proptest::sample::select(&b"ACGTNacgtnRYKM"[..]),
                b'!'..=b'=',
            ],
            1..400,
        ),
    );
    (
        proptest::collection::vec(record, 1..8),
        1usize..120,
        any::<bool>(),
    )
        .prop_map(|(records, width, crlf)| {
            let eol: &[u8] = if crlf { b"\r\n" } else { b"\n" };
            let mut out = Vec::new();
            for (header, seq) in records {
                out.push(b'>');
                out.extend_from_slice(header.trim_end().as_bytes());
                out.extend_from_slice(eol);
                for line in seq.chunks(width) {
                    out.extend_from_slice(line);
                    out.extend_from_slice(eol);
                }
            }
            out
        })
}

#[test]
fn test_agrees_on_simple_file() {
    compare(b">chr1 test\nACGTNNacgt\nAC\n>chr2\nTTTT\n>chr3 x y\nG");
}

#[test]
fn test_agrees_on_long_lines() {
    let mut fasta = format!(">{}\n", "h".repeat(200)).into_bytes();
    fasta.extend((0..5000).map(|i| b"ACGTNacgtn"[i % 10]));
    fasta.extend_from_slice(b"\n>short\nAC\n");
    compare(&fasta);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn agrees_on_generated_files(fasta in fasta()) {
        compare(&fasta);
    }
}
