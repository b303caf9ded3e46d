use super::myio;
use anyhow::Result;
use std::io::{BufRead, Write};

/// Marker written into the `dup` column for a repeated checksum.
pub const DUP_FLAG: &str = "Y";

/// Append a `dup` column to a headered tab file.
///
/// A data row whose last field equals the last field of the preceding row is
/// flagged with [DUP_FLAG]; all other rows get an empty flag. Returns the
/// number of duplicates found.
pub fn mark_duplicates(input: impl BufRead, out: &mut dyn Write) -> Result<u64> {
    let mut lines = input.lines();
    if let Some(header) = lines.next() {
        writeln!(out, "{}\tdup", header?)?;
    }
    let mut dup_count = 0u64;
    let mut old_md5 = String::new();
    for line in lines {
        let line = line?;
        let md5 = line.rsplit('\t').next().unwrap_or("").to_string();
        if !old_md5.is_empty() && md5 == old_md5 {
            writeln!(out, "{}\t{}", line, DUP_FLAG)?;
            dup_count += 1;
        } else {
            writeln!(out, "{}\t", line)?;
            old_md5 = md5;
        }
    }
    out.flush()?;
    Ok(dup_count)
}

pub fn run_dup_mark(in_file: &str) -> Result<()> {
    let reader = myio::reader(in_file)?;
    let mut out = myio::writer("-")?;
    let dup_count = mark_duplicates(reader, &mut out)?;
    eprintln!("{} duplicates.", dup_count);
    Ok(())
}

/// Copy a file, dropping every line whose final tab field is the dup flag.
pub fn run_dup_clean(in_file: &str, out_file: &str) -> Result<()> {
    let reader = myio::reader(in_file)?;
    let mut out = myio::writer(out_file)?;
    let mut dropped = 0u64;
    for line in reader.lines() {
        let line = line?;
        if line.rsplit('\t').next() == Some(DUP_FLAG) {
            dropped += 1;
        } else {
            writeln!(out, "{}", line)?;
        }
    }
    out.flush()?;
    log::info!("{} flagged lines dropped.", dropped);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_mark_duplicates() {
        let input = "id\tmd5\n\
                     f1\taaa\n\
                     f2\taaa\n\
                     f3\tbbb\n\
                     f4\taaa\n";
        let mut out = Vec::new();
        let dups = mark_duplicates(Cursor::new(input), &mut out).unwrap();
        assert_eq!(dups, 1);
        let output = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "id\tmd5\tdup");
        assert_eq!(lines[1], "f1\taaa\t");
        assert_eq!(lines[2], "f2\taaa\tY");
        assert_eq!(lines[3], "f3\tbbb\t");
        // the checksum changed in between, so the third aaa is not adjacent
        assert_eq!(lines[4], "f4\taaa\t");
    }
}
