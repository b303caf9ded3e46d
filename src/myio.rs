use anyhow::{Context, Result};
use flate2::read;
use flate2::write;
use flate2::Compression;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

const BUFFER_SIZE: usize = 128 * 1024;

/// Write normal or compressed files seamlessly.
/// Uses the presence of a `.gz` extension to decide, and `-` selects stdout.
pub fn writer(filename: &str) -> Result<Box<dyn Write>> {
    if filename == "-" {
        return Ok(Box::new(BufWriter::with_capacity(
            BUFFER_SIZE,
            io::stdout(),
        )));
    }
    let path = Path::new(filename);
    let file =
        File::create(path).with_context(|| format!("couldn't create {}", path.display()))?;

    if path.extension() == Some(OsStr::new("gz")) {
        Ok(Box::new(BufWriter::with_capacity(
            BUFFER_SIZE,
            write::GzEncoder::new(file, Compression::default()),
        )))
    } else {
        Ok(Box::new(BufWriter::with_capacity(BUFFER_SIZE, file)))
    }
}

/// Read normal or compressed files seamlessly.
/// Uses the presence of a `.gz` extension to decide, and `-` selects stdin.
pub fn reader(filename: &str) -> Result<Box<dyn BufRead>> {
    if filename == "-" {
        return Ok(Box::new(BufReader::with_capacity(
            BUFFER_SIZE,
            io::stdin(),
        )));
    }
    let path = Path::new(filename);
    let file = File::open(path).with_context(|| format!("couldn't open {}", path.display()))?;

    if path.extension() == Some(OsStr::new("gz")) {
        Ok(Box::new(BufReader::with_capacity(
            BUFFER_SIZE,
            read::GzDecoder::new(file),
        )))
    } else {
        Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, file)))
    }
}
