mod progress;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use onehot::{Compression, ConvertOptions, Encoder, NamePolicy, WriterOptions, convert};
use std::path::PathBuf;
use std::process::ExitCode;

use progress::BarProgress;

/// Convert a FASTA file into an HDF5 container holding one `(L, 6)`
/// one-hot dataset per record, with columns A, T, G, C, N and other.
#[derive(Parser, Debug)]
#[command(name = "fasta2h5")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// FASTA file, plain or compressed (gzip, zstd)
    input: PathBuf,

    /// Output container [default: the input path with an .h5 extension]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Gzip compression level of the datasets
    #[arg(short, long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(0..=9))]
    level: u8,

    /// Store the datasets uncompressed
    #[arg(long)]
    no_compression: bool,

    /// Use record identifiers as dataset names, even if they contain `/`
    #[arg(long)]
    verbatim_names: bool,

    /// Number of threads used to encode long sequences
    ///
    /// If not specified, defaults to the number of logical CPUs.
    #[arg(short = 't', long)]
    threads: Option<usize>,

    /// Do not show progress bars
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn convert_options(&self, parallel: bool) -> ConvertOptions {
        let compression = if self.no_compression {
            Compression::None
        } else {
            Compression::Gzip(self.level)
        };
        let names = if self.verbatim_names {
            NamePolicy::Verbatim
        } else {
            NamePolicy::Sanitize
        };
        ConvertOptions {
            output: self.output.clone(),
            writer: WriterOptions {
                compression,
                names,
                encoder: Encoder::default().parallel(parallel),
            },
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("cannot start the thread pool")?;
    }
    let parallel = rayon::current_num_threads() > 1;
    debug!("{:?}, parallel encoding: {parallel}", cli);

    let options = cli.convert_options(parallel);
    let mut progress = BarProgress::new(!cli.quiet);
    let summary = convert(&cli.input, &options, &mut progress)
        .with_context(|| format!("cannot convert {}", cli.input.display()))?;

    info!(
        "{} records, {} symbols ({})",
        summary.records.len(),
        summary.total_len(),
        summary.total_counts()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
