use super::myio;
use anyhow::{anyhow, Result};
use std::io::{BufRead, Write};

/// Build a full PLF identifier from a genus code and a family index.
/// # Example
/// ```
/// let id = aurora_tools::family::family_id("Esch", "17");
/// assert_eq!(id, "PLF_Esch_00000017");
/// ```
pub fn family_id(genus: &str, fam_idx: &str) -> String {
    format!("PLF_{}_{:0>8}", genus, fam_idx)
}

/// Rewrite a headerless two-column family definition table, expanding the
/// family index in column 1 to a full PLF identifier.
pub fn run_fix_family_defs(genus: &str, in_file: &str, out_file: &str) -> Result<()> {
    let reader = myio::reader(in_file)?;
    let mut out = myio::writer(out_file)?;
    writeln!(out, "family_id\tname")?;
    let mut line_count = 0u64;
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let mut fields = line.trim_end_matches('\n').split('\t');
        let fam_idx = fields
            .next()
            .ok_or_else(|| anyhow!("line {} is empty", idx + 1))?;
        let name = fields
            .next()
            .ok_or_else(|| anyhow!("line {} has no family name", idx + 1))?;
        writeln!(out, "{}\t{}", family_id(genus, fam_idx), name)?;
        line_count += 1;
    }
    out.flush()?;
    println!("{} lines converted", line_count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_id_padding() {
        assert_eq!(family_id("Strep", "1"), "PLF_Strep_00000001");
        assert_eq!(family_id("Strep", "123456789"), "PLF_Strep_123456789");
    }
}
