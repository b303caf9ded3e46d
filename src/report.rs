use super::myio;
use anyhow::Result;
use std::collections::HashMap;
use std::fmt;
use std::io::{BufRead, Write};
use std::path::Path;

/// Fixed index of the record-type column in the raw roles report.
pub const TYPE_COLUMN: usize = 2;
/// Number of leading fields (after type removal) that form the sample key.
pub const KEY_FIELDS: usize = 2;

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    TooFewFields { line: usize, found: usize, need: usize },
    BadTypeTag { line: usize, tag: String },
    BadCount { key: String, column: usize, text: String },
    EmptyReport,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::TooFewFields { line, found, need } => write!(
                f,
                "line {} has {} fields but at least {} are required",
                line, found, need
            ),
            Error::BadTypeTag { line, tag } => write!(
                f,
                "line {} has unrecognized record type \"{}\" (expected \"good\" or \"bad\")",
                line, tag
            ),
            Error::BadCount { key, column, text } => write!(
                f,
                "sample \"{}\" has non-numeric hit count \"{}\" in column {}",
                key.replace('\t', "/"),
                text,
                column + 1
            ),
            Error::EmptyReport => write!(f, "report has no header line"),
        }
    }
}

impl std::error::Error for Error {}

type ReportResult<T> = Result<T, Error>;

/// An SRA test roles report loaded into memory.
///
/// Every sample key has up to two rows in the raw report, one tagged `good`
/// and one tagged `bad`. The loader strips the type tag, splits the rows into
/// the two maps, and remembers the keys in first-encounter order so the
/// consolidated output is deterministic.
#[derive(Debug)]
pub struct RoleReport {
    /// Header fields with the type column removed.
    pub header: Vec<String>,
    good: HashMap<String, Vec<String>>,
    bad: HashMap<String, Vec<String>>,
    keys: Vec<String>,
}

/// Return the tab-delimited fields of a record.
/// # Example
/// ```
/// let fields = aurora_tools::report::split_record("S1\tR1\tgood\t10\t5\n");
/// assert_eq!(fields, vec!["S1", "R1", "good", "10", "5"]);
/// ```
pub fn split_record(line: &str) -> Vec<String> {
    line.trim_end_matches('\n')
        .split('\t')
        .map(String::from)
        .collect()
}

/// Remove the record type from the fields and return it.
fn take_type(fields: &mut Vec<String>) -> String {
    fields.remove(TYPE_COLUMN)
}

impl RoleReport {
    /// Load a roles report from any line-oriented source.
    ///
    /// The first line is the header; its type column is stripped and the
    /// remaining field count fixes the required width of every data row.
    /// Rows with an unrecognized type tag are rejected rather than lumped in
    /// with the bad hits.
    pub fn from_reader(input: impl BufRead) -> Result<RoleReport> {
        let mut lines = input.lines();
        let mut header = match lines.next() {
            Some(line) => split_record(&line?),
            None => return Err(Error::EmptyReport.into()),
        };
        if header.len() <= TYPE_COLUMN {
            return Err(Error::TooFewFields {
                line: 1,
                found: header.len(),
                need: TYPE_COLUMN + 1,
            }
            .into());
        }
        take_type(&mut header);
        let width = header.len();

        let mut report = RoleReport {
            header,
            good: HashMap::new(),
            bad: HashMap::new(),
            keys: Vec::new(),
        };
        for (idx, line) in lines.enumerate() {
            let lineno = idx + 2;
            let mut fields = split_record(&line?);
            if fields.len() <= width {
                return Err(Error::TooFewFields {
                    line: lineno,
                    found: fields.len(),
                    need: width + 1,
                }
                .into());
            }
            let rec_type = take_type(&mut fields);
            log::debug!("Processing {} record at line {}.", rec_type, lineno);
            let key = format!("{}\t{}", fields[0], fields[1]);
            let map = if rec_type == "good" {
                &mut report.good
            } else if rec_type == "bad" {
                &mut report.bad
            } else {
                return Err(Error::BadTypeTag {
                    line: lineno,
                    tag: rec_type,
                }
                .into());
            };
            if !report.keys.contains(&key) {
                report.keys.push(key.clone());
            }
            if map.insert(key.clone(), fields).is_some() {
                log::warn!(
                    "Duplicate {} record for sample {} at line {}.",
                    rec_type,
                    key,
                    lineno
                );
            }
        }
        Ok(report)
    }

    /// Number of distinct sample keys in the report.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Build the consolidated row for one sample key.
    ///
    /// A key missing from the bad map had only good hits (all ratios 0.0);
    /// a key missing from the good map had only bad hits (all ratios 1.0).
    /// Otherwise each category column gets `bad / (bad + good)`, with `0.0`
    /// forced when the bad count is zero.
    fn consolidated_row(&self, key: &str) -> ReportResult<Vec<String>> {
        let width = self.header.len();
        let mut out_list = vec![key.to_string()];
        match (self.good.get(key), self.bad.get(key)) {
            (Some(_), None) => {
                for _ in KEY_FIELDS..width {
                    out_list.push("0.0".to_string());
                }
            }
            (None, Some(_)) => {
                for _ in KEY_FIELDS..width {
                    out_list.push("1.0".to_string());
                }
            }
            (Some(good_line), Some(bad_line)) => {
                for i in KEY_FIELDS..width {
                    let bad = parse_count(key, i, &bad_line[i])?;
                    let good = parse_count(key, i, &good_line[i])?;
                    if bad == 0.0 {
                        out_list.push("0.0".to_string());
                    } else {
                        out_list.push((bad / (bad + good)).to_string());
                    }
                }
            }
            // keys only enter the key list via one of the maps
            (None, None) => unreachable!("key {} in neither map", key),
        }
        Ok(out_list)
    }

    /// Write the consolidated report: the stripped header followed by one row
    /// per sample key in first-encounter order. Rows are written as they are
    /// produced, so a malformed count partway through leaves a truncated
    /// output file.
    pub fn consolidate(&self, out: &mut dyn Write) -> Result<()> {
        write_line(&self.header, out)?;
        for key in &self.keys {
            let out_list = self.consolidated_row(key)?;
            write_line(&out_list, out)?;
        }
        out.flush()?;
        Ok(())
    }
}

fn parse_count(key: &str, column: usize, text: &str) -> ReportResult<f64> {
    text.parse::<f64>().map_err(|_| Error::BadCount {
        key: key.to_string(),
        column,
        text: text.to_string(),
    })
}

/// Write one tab-delimited line of text.
fn write_line(fields: &[String], out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{}", fields.join("\t"))?;
    Ok(())
}

/// Consolidate `<path>/<prefix>.roles.tbl` into `<path>/<prefix>.rolePct.tbl`.
pub fn run_role_pct(path: &str, prefix: &str) -> Result<()> {
    let role_file = Path::new(path).join(format!("{}.roles.tbl", prefix));
    let out_file = Path::new(path).join(format!("{}.rolePct.tbl", prefix));
    let reader = myio::reader(&role_file.to_string_lossy())?;
    let report = RoleReport::from_reader(reader)?;
    log::info!(
        "{} samples loaded from {}.",
        report.len(),
        role_file.display()
    );
    let mut out = myio::writer(&out_file.to_string_lossy())?;
    log::info!("Writing output to {}.", out_file.display());
    report.consolidate(&mut out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn consolidate_to_string(input: &str) -> String {
        let report = RoleReport::from_reader(Cursor::new(input)).unwrap();
        let mut out = Vec::new();
        report.consolidate(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_sample_pair_ratios() {
        let input = "sample\trun\ttype\tcatA\tcatB\n\
                     S1\tR1\tgood\t10\t5\n\
                     S1\tR1\tbad\t2\t0\n";
        let output = consolidate_to_string(input);
        let mut lines = output.lines();
        assert_eq!(lines.next().unwrap(), "sample\trun\tcatA\tcatB");
        let row: Vec<&str> = lines.next().unwrap().split('\t').collect();
        assert_eq!(row[0], "S1");
        assert_eq!(row[1], "R1");
        assert!((row[2].parse::<f64>().unwrap() - 2.0 / 12.0).abs() < 1e-12);
        assert_eq!(row[3], "0.0");
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_one_sided_keys() {
        let input = "sample\trun\ttype\tcatA\tcatB\n\
                     S1\tR1\tgood\t10\t5\n\
                     S2\tR1\tbad\t3\t7\n";
        let output = consolidate_to_string(input);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[1], "S1\tR1\t0.0\t0.0");
        assert_eq!(lines[2], "S2\tR1\t1.0\t1.0");
    }

    #[test]
    fn test_first_seen_order_and_row_count() {
        let input = "sample\trun\ttype\tcatA\n\
                     S2\tR9\tgood\t1\n\
                     S1\tR1\tgood\t1\n\
                     S1\tR1\tbad\t1\n\
                     S2\tR9\tbad\t1\n\
                     S3\tR2\tbad\t4\n";
        let report = RoleReport::from_reader(Cursor::new(input)).unwrap();
        assert_eq!(report.len(), 3);
        let mut out = Vec::new();
        report.consolidate(&mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        let keys: Vec<String> = output
            .lines()
            .skip(1)
            .map(|l| l.split('\t').take(2).collect::<Vec<_>>().join("/"))
            .collect();
        assert_eq!(keys, vec!["S2/R9", "S1/R1", "S3/R2"]);
    }

    #[test]
    fn test_zero_bad_forces_zero_ratio() {
        let input = "sample\trun\ttype\tcatA\n\
                     S1\tR1\tgood\t0\n\
                     S1\tR1\tbad\t0\n";
        let output = consolidate_to_string(input);
        assert_eq!(output.lines().nth(1).unwrap(), "S1\tR1\t0.0");
    }

    #[test]
    fn test_unrecognized_type_tag_rejected() {
        let input = "sample\trun\ttype\tcatA\n\
                     S1\tR1\tugly\t10\n";
        let err = RoleReport::from_reader(Cursor::new(input)).unwrap_err();
        let err = err.downcast::<Error>().unwrap();
        assert_eq!(
            err,
            Error::BadTypeTag {
                line: 2,
                tag: "ugly".to_string()
            }
        );
    }

    #[test]
    fn test_short_row_rejected() {
        let input = "sample\trun\ttype\tcatA\tcatB\n\
                     S1\tR1\tgood\t10\n";
        let err = RoleReport::from_reader(Cursor::new(input)).unwrap_err();
        assert!(matches!(
            err.downcast::<Error>().unwrap(),
            Error::TooFewFields { line: 2, .. }
        ));
    }

    #[test]
    fn test_bad_count_aborts() {
        let input = "sample\trun\ttype\tcatA\n\
                     S1\tR1\tgood\tfive\n\
                     S1\tR1\tbad\t2\n";
        let report = RoleReport::from_reader(Cursor::new(input)).unwrap();
        let mut out = Vec::new();
        let err = report.consolidate(&mut out).unwrap_err();
        assert!(matches!(
            err.downcast::<Error>().unwrap(),
            Error::BadCount { .. }
        ));
        // header was already written before the failure
        assert_eq!(String::from_utf8(out).unwrap(), "sample\trun\tcatA\n");
    }

    #[test]
    fn test_rerun_on_own_output_fails() {
        let input = "sample\trun\ttype\tcatA\tcatB\n\
                     S1\tR1\tgood\t10\t5\n\
                     S1\tR1\tbad\t2\t0\n";
        let output = consolidate_to_string(input);
        // the consolidated table has no type column, so the value that lands
        // in the type position is a ratio and must be rejected
        let err = RoleReport::from_reader(Cursor::new(output.as_str())).unwrap_err();
        assert!(err.downcast::<Error>().is_ok());
    }

    #[test]
    fn test_from_test_file() {
        let reader = myio::reader(".test/sraSmall.roles.tbl").unwrap();
        let report = RoleReport::from_reader(reader).unwrap();
        assert_eq!(report.len(), 3);
        assert_eq!(report.header, vec!["sample", "run", "catA", "catB"]);
    }

    #[test]
    fn test_run_role_pct_end_to_end() {
        let dir = std::env::temp_dir().join("aurora_role_pct_test");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::copy(
            ".test/sraSmall.roles.tbl",
            dir.join("sraSmall.roles.tbl"),
        )
        .unwrap();
        run_role_pct(&dir.to_string_lossy(), "sraSmall").unwrap();
        let output = std::fs::read_to_string(dir.join("sraSmall.rolePct.tbl")).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "sample\trun\tcatA\tcatB");
        assert_eq!(lines[2], "S2\tR1\t0.0\t0.0");
        assert_eq!(lines[3], "S3\tR1\t1.0\t1.0");
    }
}
