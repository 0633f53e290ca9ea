//! HDF5 output container.
//!
//! Every record becomes a `(L, 6)` dataset of `i32` at the root of the file,
//! carrying two string attributes: `description` (the header line) and
//! `alphabet` (the column order).

use crate::alphabet::{CLASS_ORDER, NUM_CLASSES};
use crate::encoder::Encoder;
use crate::error::{Error, Result};
use crate::progress::Progress;

use hdf5::types::VarLenUnicode;
use log::{debug, warn};
use ndarray::s;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Gzip level used when none is given.
pub const DEFAULT_LEVEL: u8 = 4;

/// Compression of the datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    /// HDF5 deflate filter, level 0 to 9.
    Gzip(u8),
}

impl Default for Compression {
    fn default() -> Self {
        Self::Gzip(DEFAULT_LEVEL)
    }
}

/// How record identifiers map to dataset names.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum NamePolicy {
    /// Replace `/` by `_`, and prefix `.` and `..` with `_`,
    /// so that every record is a dataset of the root group.
    #[default]
    Sanitize,
    /// Use identifiers as given.
    Verbatim,
}

/// Dataset name of a record identifier.
pub fn entry_name(id: &str, policy: NamePolicy) -> Cow<'_, str> {
    match policy {
        NamePolicy::Verbatim => Cow::Borrowed(id),
        NamePolicy::Sanitize => {
            let name = if id.contains('/') {
                Cow::Owned(id.replace('/', "_"))
            } else {
                Cow::Borrowed(id)
            };
            if name == "." || name == ".." {
                Cow::Owned(format!("_{name}"))
            } else {
                name
            }
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct WriterOptions {
    pub compression: Compression,
    pub names: NamePolicy,
    pub encoder: Encoder,
}

/// Writes records into a new container.
///
/// Data goes to a temporary file next to the destination, renamed over it by
/// [`finish`](Self::finish). A writer dropped before `finish` removes the
/// temporary file and leaves the destination untouched.
pub struct ContainerWriter {
    file: Option<hdf5::File>,
    path: PathBuf,
    tmp_path: PathBuf,
    options: WriterOptions,
    entries: usize,
    finished: bool,
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.{}.tmp", std::process::id()))
}

impl ContainerWriter {
    pub fn create<P: AsRef<Path>>(path: P, options: WriterOptions) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let tmp_path = tmp_path_for(&path);
        let file = hdf5::File::create(&tmp_path).map_err(|source| Error::OutputWrite {
            path: path.clone(),
            source,
        })?;
        debug!("writing {} through {}", path.display(), tmp_path.display());
        Ok(Self {
            file: Some(file),
            path,
            tmp_path,
            options,
            entries: 0,
            finished: false,
        })
    }

    /// Destination of the container.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of datasets written so far.
    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    fn output_error(&self, source: hdf5::Error) -> Error {
        Error::OutputWrite {
            path: self.path.clone(),
            source,
        }
    }

    /// Encode `seq` into a new dataset named after `id`, returning the dataset name.
    pub fn write_record(
        &mut self,
        id: &str,
        description: &str,
        seq: &[u8],
        progress: &mut dyn Progress,
    ) -> Result<String> {
        let name = entry_name(id, self.options.names).into_owned();
        if name != id {
            warn!("record {id:?} is stored as {name:?}");
        }
        let Some(file) = self.file.as_ref() else {
            return Err(self.output_error("container is closed".into()));
        };
        if file.link_exists(&name) {
            return Err(Error::DuplicateEntry { name });
        }

        let len = seq.len();
        let encoder = self.options.encoder;
        let mut builder = file.new_dataset::<i32>().shape((len, NUM_CLASSES));
        if len > 0 {
            builder = builder.chunk((len.min(encoder.block_rows()), NUM_CLASSES));
            if let Compression::Gzip(level) = self.options.compression {
                builder = builder.deflate(level.min(9));
            }
        }

        progress.start_record(id, len);
        let result = builder
            .create(name.as_str())
            .and_then(|dataset| {
                write_str_attr(&dataset, "description", description)?;
                write_str_attr(&dataset, "alphabet", CLASS_ORDER)?;
                encoder.encode_blocks(seq, progress, |start, block| {
                    debug!("{name}: rows {start}..{}", start + block.nrows());
                    dataset.write_slice(&block, s![start..start + block.nrows(), ..])
                })
            });
        progress.finish_record();
        result.map_err(|e| self.output_error(e))?;

        self.entries += 1;
        Ok(name)
    }

    /// Close the container and move it to its destination.
    pub fn finish(mut self) -> Result<PathBuf> {
        if let Some(file) = self.file.take() {
            file.close().map_err(|e| self.output_error(e))?;
        }
        fs::rename(&self.tmp_path, &self.path)?;
        self.finished = true;
        Ok(self.path.clone())
    }
}

impl Drop for ContainerWriter {
    fn drop(&mut self) {
        drop(self.file.take());
        if !self.finished {
            if let Err(e) = fs::remove_file(&self.tmp_path) {
                debug!("cannot remove {}: {e}", self.tmp_path.display());
            }
        }
    }
}

fn write_str_attr(dataset: &hdf5::Dataset, key: &str, value: &str) -> hdf5::Result<()> {
    // HDF5 strings cannot hold NUL
    let value = VarLenUnicode::from_str(&value.replace('\0', ""))
        .map_err(|e| hdf5::Error::from(e.to_string()))?;
    dataset
        .new_attr::<VarLenUnicode>()
        .create(key)
        .and_then(|attr| attr.write_scalar(&value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(entry_name("chr1", NamePolicy::Sanitize), "chr1");
        assert_eq!(entry_name("a/b/c", NamePolicy::Sanitize), "a_b_c");
        assert_eq!(entry_name(".", NamePolicy::Sanitize), "_.");
        assert_eq!(entry_name("..", NamePolicy::Sanitize), "_..");
        assert_eq!(entry_name("...", NamePolicy::Sanitize), "...");
        assert_eq!(entry_name("a/b", NamePolicy::Verbatim), "a/b");
    }

    #[test]
    fn test_tmp_path() {
        let tmp = tmp_path_for(Path::new("/data/out.h5"));
        assert_eq!(tmp.parent(), Some(Path::new("/data")));
        let name = tmp.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with(".out.h5.") && name.ends_with(".tmp"));
    }

    #[test]
    fn test_default_options() {
        let options = WriterOptions::default();
        assert_eq!(options.compression, Compression::Gzip(4));
        assert_eq!(options.names, NamePolicy::Sanitize);
        assert_eq!(options.encoder.block_rows(), crate::encoder::DEFAULT_BLOCK_ROWS);
    }
}
