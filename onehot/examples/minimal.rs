use onehot::input::*;
use onehot::*;

// set the options of the parser (at compile-time)
const CONFIG: Config = ParserOptions::default()
    .ignore_sequence()
    .compute_class_counts()
    .config();

fn main() {
    let path = std::env::args().nth(1).expect("No input file given");

    // create a parser with the desired options
    let mut parser = FastaParser::<CONFIG, _>::from_file(&path).expect("Cannot open file");

    // iterate over records
    while let Some(event) = parser.next() {
        let Event::Record(line) = event.expect("Invalid FASTA");

        // the header, without `>`
        let header = String::from_utf8_lossy(parser.get_header());

        // the number of symbols of each class, without building the sequence
        let counts = parser.get_class_counts();

        println!("{line}\t{}\t{}\t{counts}", header.trim(), parser.get_seq_len());
    }
}
