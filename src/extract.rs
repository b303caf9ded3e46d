use super::myio;
use anyhow::{anyhow, Context, Result};
use std::collections::HashSet;
use std::fs;
use std::io::{BufRead, Write};

/// Zero-based column of the SRA map that names the sample.
const SAMPLE_COLUMN: usize = 2;

/// Filter an SRA map table to the samples present in a directory.
///
/// The entries of `in_dir` name the samples to keep. The map header is
/// transferred unchanged; a data line survives when its sample column names
/// one of those entries.
pub fn run_dir_extract(in_dir: &str, sra_map: &str, out_file: &str) -> Result<()> {
    let mut sample_set: HashSet<String> = HashSet::new();
    let entries =
        fs::read_dir(in_dir).with_context(|| format!("couldn't read directory {}", in_dir))?;
    for entry in entries {
        sample_set.insert(entry?.file_name().to_string_lossy().into_owned());
    }
    println!("{} samples found in {}.", sample_set.len(), in_dir);

    let reader = myio::reader(sra_map)?;
    let mut out = myio::writer(out_file)?;
    let mut lines = reader.lines();
    // The input header is transferred unchanged.
    if let Some(header) = lines.next() {
        writeln!(out, "{}", header?)?;
    }
    let mut in_count = 0u64;
    let mut out_count = 0u64;
    for (idx, line) in lines.enumerate() {
        let line = line?;
        in_count += 1;
        let sample = line
            .split('\t')
            .nth(SAMPLE_COLUMN)
            .ok_or_else(|| anyhow!("line {} has no sample column", idx + 2))?;
        if sample_set.contains(sample) {
            writeln!(out, "{}", line)?;
            out_count += 1;
        }
    }
    out.flush()?;
    println!("{} lines read.  {} lines written.", in_count, out_count);
    Ok(())
}
