//! Chunked line reading for parallel processing.
//!
//! Lines are read sequentially (the only blocking step) into fixed-size
//! batches; each batch is handed to a callback that fans it out with rayon.
//! Memory stays bounded by one batch regardless of input size.

use std::io::{self, BufRead};

/// Default number of lines per batch.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Read `reader` line by line, calling `on_chunk` with up to `chunk_size`
/// lines at a time and the number of raw bytes (newlines included) those
/// lines occupied.
///
/// Returns the total number of lines read. Trailing `\r` is stripped so
/// CRLF files parse like LF files.
pub fn for_each_chunk<R, F>(mut reader: R, chunk_size: usize, mut on_chunk: F) -> io::Result<usize>
where
    R: BufRead,
    F: FnMut(&[String], u64),
{
    let chunk_size = chunk_size.max(1);
    let mut chunk: Vec<String> = Vec::with_capacity(chunk_size.min(DEFAULT_CHUNK_SIZE));
    let mut chunk_bytes = 0u64;
    let mut total = 0usize;

    loop {
        let mut line = String::new();
        let read = reader.read_line(&mut line)?;
        if read == 0 {
            break;
        }
        chunk_bytes += read as u64;
        total += 1;

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        chunk.push(line);

        if chunk.len() == chunk_size {
            on_chunk(&chunk, chunk_bytes);
            chunk.clear();
            chunk_bytes = 0;
        }
    }

    if !chunk.is_empty() {
        on_chunk(&chunk, chunk_bytes);
    }

    Ok(total)
}
