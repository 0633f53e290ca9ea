//! The FASTA to HDF5 conversion pipeline.

use crate::alphabet::ClassCounts;
use crate::container::{ContainerWriter, WriterOptions};
use crate::error::Result;
use crate::progress::Progress;
use crate::records::{Record, RecordSet, read_records};

use log::info;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Extensions of compressed inputs, dropped when deriving the output name.
const COMPRESSION_EXTENSIONS: [&str; 5] = ["gz", "bgz", "zst", "bz2", "xz"];

#[derive(Debug, Default, Clone)]
pub struct ConvertOptions {
    /// Destination of the container, derived from the input path when `None`.
    pub output: Option<PathBuf>,
    pub writer: WriterOptions,
}

/// What was written for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    pub id: String,
    /// Name of the dataset in the container.
    pub entry: String,
    pub len: usize,
    pub counts: ClassCounts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub output: PathBuf,
    pub records: Vec<RecordSummary>,
}

impl Summary {
    /// Total number of rows written.
    pub fn total_len(&self) -> usize {
        self.records.iter().map(|r| r.len).sum()
    }

    /// Class counts over all records.
    pub fn total_counts(&self) -> ClassCounts {
        let mut total = ClassCounts::new();
        for r in &self.records {
            for (t, c) in total.0.iter_mut().zip(r.counts.0) {
                *t += c;
            }
        }
        total
    }
}

/// Container path next to `input`: `genome.fa.gz` gives `genome.h5`, `reads` gives `reads.h5`.
pub fn default_output_path<P: AsRef<Path>>(input: P) -> PathBuf {
    let input = input.as_ref();
    let mut output = input.to_path_buf();
    if let Some(ext) = input.extension().and_then(|e| e.to_str()) {
        if COMPRESSION_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) {
            output.set_extension("");
        }
    }
    output.set_extension("h5");
    if output == input {
        // `x.h5` itself: keep the input untouched
        let mut name = input.file_name().map(OsString::from).unwrap_or_default();
        name.push(".h5");
        output.set_file_name(name);
    }
    output
}

/// Write the records of `set` in order into a new container at `output`.
pub fn write_records(
    set: &RecordSet,
    output: &Path,
    options: &WriterOptions,
    progress: &mut dyn Progress,
) -> Result<Vec<RecordSummary>> {
    let mut writer = ContainerWriter::create(output, *options)?;
    let mut summaries = Vec::with_capacity(set.len());
    for record in set {
        let entry = writer.write_record(&record.id, &record.description, &record.sequence, progress)?;
        info!("{}: {} symbols ({})", record.id, record.len(), record.counts);
        summaries.push(summarize(record, entry));
    }
    writer.finish()?;
    Ok(summaries)
}

fn summarize(record: &Record, entry: String) -> RecordSummary {
    RecordSummary {
        id: record.id.clone(),
        entry,
        len: record.len(),
        counts: record.counts,
    }
}

/// Convert the FASTA file at `input` into a one-hot container.
///
/// All records are read before the container is created, so invalid input
/// never produces an output file.
pub fn convert<P: AsRef<Path>>(
    input: P,
    options: &ConvertOptions,
    progress: &mut dyn Progress,
) -> Result<Summary> {
    let input = input.as_ref();
    let output = options
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(input));

    let set = read_records(input)?;
    info!(
        "read {} records ({} symbols) from {}",
        set.len(),
        set.total_len(),
        input.display()
    );

    let records = write_records(&set, &output, &options.writer, progress)?;
    info!("wrote {} datasets to {}", records.len(), output.display());
    Ok(Summary { output, records })
}
