//! Sink: sort the finished tally by key and write one `<key> <count>` line
//! per key.
//!
//! Console and file output share [`write_counts`], so both produce the same
//! bytes. File output goes to a temporary file next to the target and is
//! renamed over it only once everything has been written and flushed; a
//! failed run never leaves a half-written target behind.

use super::accumulator::Tally;
use crate::error::{Result, TallyError};
use std::fmt;
use std::fs;
use std::hash::Hash;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Where aggregated output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    /// `None` means the console.
    pub fn from_option(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::File(PathBuf::from(p)),
            None => Self::Stdout,
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("stdout"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Write `tally` in ascending key order. Returns the number of lines written.
pub fn write_counts<W, K>(writer: &mut W, tally: &Tally<K>) -> io::Result<usize>
where
    W: Write,
    K: fmt::Display + Ord + Clone + Hash + Eq,
{
    let sorted = tally.sorted();
    for (key, count) in &sorted {
        writeln!(writer, "{} {}", key, count)?;
    }
    Ok(sorted.len())
}

/// Emit `tally` to `destination`, fully flushed before returning.
pub fn emit<K>(tally: &Tally<K>, destination: &Destination) -> Result<usize>
where
    K: fmt::Display + Ord + Clone + Hash + Eq,
{
    match destination {
        Destination::Stdout => emit_to_writer(tally, io::stdout().lock(), destination),
        Destination::File(path) => write_atomically(path, |w| write_counts(w, tally)),
    }
}

/// Buffered write of `tally` to any writer, flushed before returning.
/// `destination` only labels errors. This is the console path of [`emit`].
pub fn emit_to_writer<K, W>(tally: &Tally<K>, writer: W, destination: &Destination) -> Result<usize>
where
    K: fmt::Display + Ord + Clone + Hash + Eq,
    W: Write,
{
    let mut writer = BufWriter::new(writer);
    write_counts(&mut writer, tally)
        .and_then(|n| writer.flush().map(|()| n))
        .map_err(|source| TallyError::Write {
            destination: destination.to_string(),
            source,
        })
}

/// Run `write` against a temporary file in the target's directory, then
/// rename it into place. The target is either fully replaced or left as it
/// was.
pub fn write_atomically<F, T>(path: &Path, write: F) -> Result<T>
where
    F: FnOnce(&mut BufWriter<&mut fs::File>) -> io::Result<T>,
{
    let write_err = |source| TallyError::Write {
        destination: path.display().to_string(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(write_err)?;

    let mut temp = NamedTempFile::new_in(parent).map_err(write_err)?;
    let written = {
        let mut writer = BufWriter::new(temp.as_file_mut());
        let written = write(&mut writer).map_err(write_err)?;
        writer.flush().map_err(write_err)?;
        written
    };
    temp.as_file().sync_all().map_err(write_err)?;

    // on error the PersistError drops its NamedTempFile, which deletes it
    temp.persist(path).map_err(|e| TallyError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    Ok(written)
}
