use anyhow::{anyhow, Context, Result};
use itertools::Itertools;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Dump file holding the feature list of one genome directory.
const FEATURE_FILE: &str = "genome_feature.json";

fn subdirs(path: &str) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    let entries =
        fs::read_dir(path).with_context(|| format!("couldn't read directory {}", path))?;
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path());
        }
    }
    Ok(dirs)
}

fn read_json(path: &Path) -> Result<Value> {
    let json_str =
        fs::read_to_string(path).with_context(|| format!("couldn't read {}", path.display()))?;
    serde_json::from_str(&json_str)
        .with_context(|| format!("invalid JSON in {}", path.display()))
}

/// Tally `feature_type` values across the genome feature dumps found in the
/// subdirectories of the given paths. Prints an aligned type/count table in
/// sorted type order.
pub fn run_type_count(paths: &[String]) -> Result<()> {
    let mut dirs_in = 0u64;
    let mut type_counts: HashMap<String, u64> = HashMap::new();
    for inpath in paths {
        for dirpath in subdirs(inpath)? {
            dirs_in += 1;
            let fidfile = dirpath.join(FEATURE_FILE);
            let json_obj = read_json(&fidfile)?;
            let features = json_obj
                .as_array()
                .ok_or_else(|| anyhow!("{} is not a JSON array", fidfile.display()))?;
            for fidobj in features {
                let ftype = fidobj
                    .get("feature_type")
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        anyhow!("feature without a feature_type in {}", fidfile.display())
                    })?;
                *type_counts.entry(ftype.to_string()).or_insert(0) += 1;
            }
        }
    }
    println!("{} directories processed.", dirs_in);
    println!();
    for ftype in type_counts.keys().sorted() {
        println!("{:<15} {:>15}", ftype, type_counts[ftype]);
    }
    Ok(())
}

/// Outcome of normalizing one raw response dump.
#[derive(Debug, PartialEq, Eq)]
pub enum CleanKind {
    /// Already a bare array, copied through.
    Copied,
    /// SOLR response header unwrapped to `response.docs`.
    Cleaned,
    /// Single object boxed into a one-element array.
    Singleton,
    /// Empty file or scalar, replaced with `[]`.
    Empty,
}

/// Normalize one raw response dump to a bare JSON array.
/// # Example
/// ```
/// use aurora_tools::jsondump::{clean_response, CleanKind};
/// let (doc, kind) = clean_response("{\"response\": {\"docs\": [1, 2]}}").unwrap();
/// assert_eq!(doc.to_string(), "[1,2]");
/// assert_eq!(kind, CleanKind::Cleaned);
/// let (doc, kind) = clean_response("").unwrap();
/// assert_eq!(doc.to_string(), "[]");
/// assert_eq!(kind, CleanKind::Empty);
/// ```
pub fn clean_response(json_str: &str) -> Result<(Value, CleanKind)> {
    if json_str.is_empty() {
        return Ok((Value::Array(Vec::new()), CleanKind::Empty));
    }
    let json_obj: Value = serde_json::from_str(json_str)?;
    match json_obj {
        Value::Array(_) => Ok((json_obj, CleanKind::Copied)),
        Value::Object(ref map) => {
            // A dictionary probably carries a response header; if so the
            // document list is under response.docs. Anything else is a
            // single document.
            if map.contains_key("response") {
                let docs = json_obj
                    .get("response")
                    .and_then(|r| r.get("docs"))
                    .cloned()
                    .ok_or_else(|| anyhow!("response header without a docs list"))?;
                Ok((docs, CleanKind::Cleaned))
            } else {
                Ok((Value::Array(vec![json_obj]), CleanKind::Singleton))
            }
        }
        _ => Ok((Value::Array(Vec::new()), CleanKind::Empty)),
    }
}

/// Copy the `.json` files in the subdirectories of each input path into a
/// mirror tree under `out_path`, normalizing each to a bare JSON array.
pub fn run_response_clean(out_path: &str, paths: &[String]) -> Result<()> {
    let mut dirs_in = 0u64;
    let mut files_in = 0u64;
    let mut copied = 0u64;
    let mut cleaned = 0u64;
    let mut single_in = 0u64;
    let mut empty_in = 0u64;
    for inpath in paths {
        for dirpath in subdirs(inpath)? {
            dirs_in += 1;
            let outdir = match dirpath.file_name() {
                Some(base) => Path::new(out_path).join(base),
                None => continue,
            };
            fs::create_dir_all(&outdir)
                .with_context(|| format!("couldn't create {}", outdir.display()))?;
            let entries = fs::read_dir(&dirpath)?;
            for entry in entries {
                let entry = entry?;
                let name = entry.file_name().to_string_lossy().into_owned();
                if entry.file_type()?.is_file() && name.ends_with(".json") {
                    files_in += 1;
                    let jsonpath = entry.path();
                    let jsonout = outdir.join(&name);
                    log::info!("Copying {} to {}.", jsonpath.display(), jsonout.display());
                    let json_str = fs::read_to_string(&jsonpath)
                        .with_context(|| format!("couldn't read {}", jsonpath.display()))?;
                    let (doc_obj, kind) = clean_response(&json_str)
                        .with_context(|| format!("couldn't clean {}", jsonpath.display()))?;
                    match kind {
                        CleanKind::Copied => copied += 1,
                        CleanKind::Cleaned => cleaned += 1,
                        CleanKind::Singleton => single_in += 1,
                        CleanKind::Empty => empty_in += 1,
                    }
                    fs::write(&jsonout, doc_obj.to_string())
                        .with_context(|| format!("couldn't write {}", jsonout.display()))?;
                }
            }
        }
    }
    println!(
        "{} directories, {} files, {} cleaned, {} copied, {} empty, {} singletons.",
        dirs_in, files_in, cleaned, copied, empty_in, single_in
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_response_array_copied() {
        let (doc, kind) = clean_response("[{\"a\": 1}]").unwrap();
        assert_eq!(kind, CleanKind::Copied);
        assert_eq!(doc.to_string(), "[{\"a\":1}]");
    }

    #[test]
    fn test_clean_response_singleton_boxed() {
        let (doc, kind) = clean_response("{\"a\": 1}").unwrap();
        assert_eq!(kind, CleanKind::Singleton);
        assert_eq!(doc.to_string(), "[{\"a\":1}]");
    }

    #[test]
    fn test_clean_response_scalar_emptied() {
        let (doc, kind) = clean_response("42").unwrap();
        assert_eq!(kind, CleanKind::Empty);
        assert_eq!(doc.to_string(), "[]");
    }

    #[test]
    fn test_clean_response_header_without_docs_fails() {
        assert!(clean_response("{\"response\": {}}").is_err());
    }

    #[test]
    fn test_clean_response_invalid_json_fails() {
        assert!(clean_response("{oops").is_err());
    }
}
