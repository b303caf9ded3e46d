use super::myio;
use anyhow::{anyhow, Result};
use std::collections::{HashMap, HashSet};
use std::io::{BufRead, Write};

/// Return the tab-delimited fields of a record.
/// # Example
/// ```
/// let fields = aurora_tools::column::parse_record("a\tb\tc\n");
/// assert_eq!(fields, vec!["a", "b", "c"]);
/// ```
pub fn parse_record(line: &str) -> Vec<String> {
    line.trim_end_matches('\n')
        .split('\t')
        .map(String::from)
        .collect()
}

fn column_index(col: usize) -> Result<usize> {
    if col == 0 {
        return Err(anyhow!("column index is 1-based, got 0"));
    }
    Ok(col - 1)
}

fn column_value<'a>(fields: &'a [String], col: usize, lineno: usize) -> Result<&'a str> {
    fields
        .get(col)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("line {} has no column {}", lineno, col + 1))
}

/// Count the occurrences of each value in one column of a headered tab file.
/// Blank values are skipped. Values with counts in `[min, max]` are printed
/// in first-seen order (`max` of 0 means no upper bound).
pub fn run_column_count(col: usize, path: &str, min: u64, max: u64) -> Result<()> {
    let col = column_index(col)?;
    let max = if max == 0 { u64::MAX } else { max };
    let mut counters: HashMap<String, u64> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    let reader = myio::reader(path)?;
    let mut lines = reader.lines().enumerate();
    // Skip the header line.
    lines.next();
    for (idx, line) in lines {
        let fields = parse_record(&line?);
        let col_text = column_value(&fields, col, idx + 1)?;
        if !col_text.is_empty() {
            let count = counters.entry(col_text.to_string()).or_insert_with(|| {
                order.push(col_text.to_string());
                0
            });
            *count += 1;
        }
    }
    println!("value\tcount");
    for value in &order {
        let count = counters[value];
        if count >= min && count <= max {
            println!("{}\t{}", value, count);
        }
    }
    Ok(())
}

/// Split a headered tab file into base (first occurrences of the key column)
/// and spill (repeats) files. The header goes to both outputs and lines with
/// a blank key are dropped.
pub fn run_column_split(
    col: usize,
    in_file: &str,
    base_file: &str,
    spill_file: &str,
) -> Result<()> {
    let col = column_index(col)?;
    let mut seen: HashSet<String> = HashSet::new();
    let mut base_count = 0u64;
    let mut spill_count = 0u64;

    let reader = myio::reader(in_file)?;
    let mut base_out = myio::writer(base_file)?;
    let mut spill_out = myio::writer(spill_file)?;
    let mut lines = reader.lines().enumerate();
    // Echo the header line.
    if let Some((_, header)) = lines.next() {
        let header = header?;
        writeln!(base_out, "{}", header)?;
        writeln!(spill_out, "{}", header)?;
    }
    for (idx, line) in lines {
        let line = line?;
        let fields = parse_record(&line);
        let col_text = column_value(&fields, col, idx + 1)?;
        if !col_text.is_empty() {
            if seen.contains(col_text) {
                writeln!(spill_out, "{}", line)?;
                spill_count += 1;
            } else {
                seen.insert(col_text.to_string());
                writeln!(base_out, "{}", line)?;
                base_count += 1;
            }
        }
    }
    base_out.flush()?;
    spill_out.flush()?;
    println!("{} base, {} spill.", base_count, spill_count);
    Ok(())
}

/// Count the distinct values in every column of a headered tab file.
///
/// Returns the per-column counts in header order; `run_unique_counts` prints
/// them as a summary.
pub fn unique_counts(input: impl BufRead) -> Result<Vec<(String, usize)>> {
    let mut lines = input.lines();
    let header = match lines.next() {
        Some(line) => parse_record(&line?),
        None => return Err(anyhow!("input has no header line")),
    };
    let mut values: Vec<HashSet<String>> = vec![HashSet::new(); header.len()];
    for (idx, line) in lines.enumerate() {
        let fields = parse_record(&line?);
        if fields.len() != header.len() {
            return Err(anyhow!(
                "line {} has {} fields but the header has {}",
                idx + 2,
                fields.len(),
                header.len()
            ));
        }
        for (set, value) in values.iter_mut().zip(fields) {
            set.insert(value);
        }
    }
    Ok(header
        .into_iter()
        .zip(values.iter().map(HashSet::len))
        .collect())
}

pub fn run_unique_counts(path: &str) -> Result<()> {
    let reader = myio::reader(path)?;
    let results = unique_counts(reader)?;
    println!("Summary of unique value counts:");
    for (column, count) in results {
        println!("{}: {} unique values", column, count);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_unique_counts() {
        let input = "genus\tspecies\tstrain\n\
                     Esch\tcoli\tK12\n\
                     Esch\tcoli\tO157\n\
                     Staph\taureus\tN315\n";
        let counts = unique_counts(Cursor::new(input)).unwrap();
        assert_eq!(
            counts,
            vec![
                ("genus".to_string(), 2),
                ("species".to_string(), 2),
                ("strain".to_string(), 3)
            ]
        );
    }

    #[test]
    fn test_unique_counts_ragged_row_rejected() {
        let input = "a\tb\n1\t2\t3\n";
        assert!(unique_counts(Cursor::new(input)).is_err());
    }

    #[test]
    fn test_column_index_is_one_based() {
        assert!(column_index(0).is_err());
        assert_eq!(column_index(3).unwrap(), 2);
    }
}
